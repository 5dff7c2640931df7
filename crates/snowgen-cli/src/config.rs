use anyhow::bail;
use clap::{Parser, ValueEnum};
use snowgen::{GeneratorConfig, MAX_DATACENTER_ID, MAX_EPOCH, MAX_WORKER_ID, TWITTER_EPOCH};

/// Command-line arguments for the `snowgen` binary.
///
/// Identity settings fall back to environment variables (and a `.env` file in
/// the working directory) so the same binary can be dropped into a deployment
/// without wrapper scripts.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowgen",
    version,
    about = "Generate or decode Twitter Snowflake-style 64-bit IDs"
)]
pub struct CliArgs {
    /// Worker ID encoded into every generated ID, in [0, 31].
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 0)]
    pub worker_id: u64,

    /// Datacenter ID encoded into every generated ID, in [0, 31].
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0)]
    pub datacenter_id: u64,

    /// Epoch in milliseconds since 1970-01-01 UTC. Defaults to the Twitter
    /// epoch.
    ///
    /// Environment variable: `EPOCH`
    #[arg(long, env = "EPOCH", default_value_t = TWITTER_EPOCH)]
    pub epoch: u64,

    /// Number of IDs to generate.
    ///
    /// Environment variable: `COUNT`
    #[arg(short = 'n', long, env = "COUNT", default_value_t = 1)]
    pub count: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Decode the given IDs instead of generating new ones.
    #[arg(long, num_args = 1.., value_name = "ID")]
    pub decode: Vec<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One decimal ID per line.
    Plain,
    /// One JSON object per line with the ID and its decoded fields.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Generate { count: usize },
    Decode { ids: Vec<u64> },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub generator: GeneratorConfig,
    pub mode: Mode,
    pub format: OutputFormat,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.worker_id > MAX_WORKER_ID {
            bail!(
                "WORKER_ID ({}) exceeds the worker ID space (max = {MAX_WORKER_ID})",
                args.worker_id
            );
        }

        if args.datacenter_id > MAX_DATACENTER_ID {
            bail!(
                "DATACENTER_ID ({}) exceeds the datacenter ID space (max = {MAX_DATACENTER_ID})",
                args.datacenter_id
            );
        }

        if args.epoch > MAX_EPOCH {
            bail!(
                "EPOCH ({}) exceeds the epoch range (max = {MAX_EPOCH})",
                args.epoch
            );
        }

        let mode = if args.decode.is_empty() {
            if args.count == 0 {
                bail!("COUNT must be greater than 0");
            }
            Mode::Generate { count: args.count }
        } else {
            Mode::Decode { ids: args.decode }
        };

        Ok(Self {
            generator: GeneratorConfig {
                worker_id: args.worker_id,
                datacenter_id: args.datacenter_id,
                epoch: args.epoch,
            },
            mode,
            format: args.format,
        })
    }
}
