/// Represents the result of polling a [`Generator`] for a new ID.
///
/// - [`IdGenStatus::Ready`] indicates a new ID was successfully generated.
/// - [`IdGenStatus::Pending`] means the sequence for the current millisecond
///   is exhausted and no ID can be issued until the clock reaches
///   `yield_until`.
///
/// This allows non-blocking generation loops and cooperative backoff, which
/// [`Generator::next_id`] cannot offer because it spins on the calling thread.
///
/// # Example
///
/// ```
/// use snowgen::{Generator, IdGenStatus};
///
/// let generator = Generator::new(1, 1).unwrap();
/// let id = loop {
///     match generator.try_poll_id().unwrap() {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert_eq!((id >> 12) & 31, 1);
/// ```
///
/// [`Generator`]: crate::Generator
/// [`Generator::next_id`]: crate::Generator::next_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: u64,
    },
    /// No ID could be generated because the sequence has been exhausted for the
    /// current millisecond.
    Pending {
        /// The Unix millisecond (inclusive) at which generation may resume.
        yield_until: u64,
    },
}
