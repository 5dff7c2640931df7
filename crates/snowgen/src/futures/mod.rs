mod sleep_provider;
mod tokio;

pub use sleep_provider::*;
pub use self::tokio::*;

use core::time::Duration;

use crate::{
    error::Result,
    generator::{Generator, IdGenStatus},
    time::TimeSource,
};

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Returns a future that resolves to the next available ID.
    ///
    /// Unlike [`Generator::next_id`], an exhausted sequence does not spin the
    /// thread: the future hands control back to the runtime through `S` until
    /// the clock reaches the next millisecond, then polls again.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::next_id`].
    ///
    /// # Example
    /// ```
    /// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
    /// use snowgen::{Generator, TokioSleep};
    ///
    /// let generator = Generator::new(2, 3).unwrap();
    /// let id = generator.next_id_async::<TokioSleep>().await.unwrap();
    /// assert_eq!((id >> 12) & 31, 2);
    /// # });
    /// ```
    pub async fn next_id_async<S>(&self) -> Result<u64>
    where
        S: SleepProvider,
    {
        loop {
            let yield_until = match self.try_poll_id()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { yield_until } => yield_until,
            };
            let wait = yield_until.saturating_sub(self.timestamp());
            S::sleep_for(Duration::from_millis(wait)).await;
        }
    }
}
