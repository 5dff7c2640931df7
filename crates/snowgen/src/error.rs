/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowgen` can emit.
///
/// Construction errors are permanent for the given arguments. A
/// [`Error::ClockMovingBackwards`] or [`Error::ClockBeforeEpoch`] leaves the
/// generator untouched, so the caller may retry once the clock has recovered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The worker ID does not fit in its 5-bit field.
    #[error("worker ID {worker_id} is out of range [0, {max}]", max = crate::MAX_WORKER_ID)]
    WorkerIdOutOfRange { worker_id: u64 },

    /// The datacenter ID does not fit in its 5-bit field.
    #[error("datacenter ID {datacenter_id} is out of range [0, {max}]", max = crate::MAX_DATACENTER_ID)]
    DatacenterIdOutOfRange { datacenter_id: u64 },

    /// The epoch does not fit an `i64` millisecond count.
    #[error("epoch {epoch} ms is out of range [0, {max}]", max = crate::MAX_EPOCH)]
    EpochOutOfRange { epoch: u64 },

    /// The time source reported a timestamp before the generator epoch.
    #[error("system clock is before the epoch: epoch {epoch} ms, now {now} ms")]
    ClockBeforeEpoch { epoch: u64, now: u64 },

    /// The time source reported a timestamp older than the last one used to
    /// issue an ID.
    #[error("system clock is moving backwards: last ID at {last_timestamp} ms, now {now} ms")]
    ClockMovingBackwards { last_timestamp: u64, now: u64 },

    /// The generation lock was **poisoned** by a thread that panicked while
    /// holding it.
    ///
    /// `parking_lot` mutexes do not poison, so this variant is absent when the
    /// `parking-lot` feature is enabled.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = Error::WorkerIdOutOfRange { worker_id: 32 };
        assert_eq!(err.to_string(), "worker ID 32 is out of range [0, 31]");

        let err = Error::DatacenterIdOutOfRange { datacenter_id: 40 };
        assert_eq!(err.to_string(), "datacenter ID 40 is out of range [0, 31]");

        let err = Error::ClockMovingBackwards {
            last_timestamp: 1_000,
            now: 990,
        };
        assert_eq!(
            err.to_string(),
            "system clock is moving backwards: last ID at 1000 ms, now 990 ms"
        );

        let err = Error::EpochOutOfRange { epoch: u64::MAX };
        assert_eq!(
            err.to_string(),
            "epoch 18446744073709551615 ms is out of range [0, 9223372036854775807]"
        );

        let err = Error::ClockBeforeEpoch {
            epoch: 1_000,
            now: 999,
        };
        assert_eq!(
            err.to_string(),
            "system clock is before the epoch: epoch 1000 ms, now 999 ms"
        );
    }
}
