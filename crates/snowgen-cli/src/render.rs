use std::io::Write;

use serde::Serialize;
use snowgen::SnowflakeParts;

use crate::config::OutputFormat;

#[derive(Serialize)]
struct Record {
    id: u64,
    unix_millis: u64,
    #[serde(flatten)]
    parts: SnowflakeParts,
}

/// Writes one ID in the requested format, followed by a newline.
pub fn write_id<W: Write>(
    out: &mut W,
    id: u64,
    epoch: u64,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => writeln!(out, "{id}")?,
        OutputFormat::Json => {
            let parts = SnowflakeParts::decompose(id);
            let record = Record {
                id,
                unix_millis: parts.unix_millis(epoch),
                parts,
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
