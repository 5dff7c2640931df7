use core::{future::Future, time::Duration};

/// A trait that abstracts over how to wait for a given [`Duration`] in async
/// contexts.
///
/// This keeps [`Generator::next_id_async`] independent of a particular
/// runtime's timer.
///
/// [`Generator::next_id_async`]: crate::Generator::next_id_async
pub trait SleepProvider {
    /// The future must be `Send` so callers can hold it across `.await`
    /// points in multi-threaded runtimes.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
