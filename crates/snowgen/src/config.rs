use crate::{
    error::Result,
    generator::Generator,
    time::{SystemClock, TWITTER_EPOCH, TimeSource},
};

/// Identity parameters for a [`Generator`], in a form that can be embedded in
/// an application's own configuration.
///
/// With the `serde` feature the struct (de)serializes by field name and
/// `epoch` may be omitted, falling back to [`TWITTER_EPOCH`].
///
/// # Example
///
/// ```
/// use snowgen::{GeneratorConfig, TWITTER_EPOCH};
///
/// let config = GeneratorConfig {
///     worker_id: 3,
///     datacenter_id: 7,
///     ..Default::default()
/// };
/// assert_eq!(config.epoch, TWITTER_EPOCH);
///
/// let generator = config.build().unwrap();
/// assert_eq!(generator.worker_id(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    pub worker_id: u64,
    pub datacenter_id: u64,
    #[cfg_attr(feature = "serde", serde(default = "default_epoch"))]
    pub epoch: u64,
}

#[cfg(feature = "serde")]
const fn default_epoch() -> u64 {
    TWITTER_EPOCH
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            worker_id: 0,
            datacenter_id: 0,
            epoch: TWITTER_EPOCH,
        }
    }
}

impl GeneratorConfig {
    /// Builds a generator on the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if either ID is out of range.
    pub fn build(&self) -> Result<Generator<SystemClock>> {
        self.build_with(SystemClock)
    }

    /// Builds a generator reading time from `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if either ID is out of range.
    pub fn build_with<T: TimeSource>(&self, time: T) -> Result<Generator<T>> {
        Generator::with_time_source(self.worker_id, self.datacenter_id, self.epoch, time)
    }
}
