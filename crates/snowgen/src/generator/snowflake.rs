use core::{cmp::Ordering, fmt};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    generator::{IdGenStatus, Mutex, MutexGuard},
    layout::{MAX_DATACENTER_ID, MAX_EPOCH, MAX_WORKER_ID, SEQUENCE_MASK, SnowflakeParts},
    time::{SystemClock, TWITTER_EPOCH, TimeSource},
};

/// Mutable generation state, guarded by the generator's lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    /// Unix millisecond of the last issued ID.
    pub(crate) last_timestamp: u64,
    /// Sequence of the last issued ID within `last_timestamp`.
    pub(crate) sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The identity (`worker_id`, `datacenter_id`, `epoch`) is fixed at
/// construction. The last timestamp and sequence sit behind a single mutex, so
/// every call to [`Generator::next_id`] is atomic with respect to other callers
/// on the same instance. Share it between threads with an [`Arc`].
///
/// Two generators only produce disjoint IDs if they were built with distinct
/// `(worker_id, datacenter_id)` pairs. Assigning those pairs is up to the
/// deployment.
///
/// ## See Also
/// - [`IdGenStatus`] for the non-blocking [`Generator::try_poll_id`]
/// - [`GeneratorConfig`] for building from a serialised config
///
/// [`Arc`]: std::sync::Arc
/// [`GeneratorConfig`]: crate::GeneratorConfig
pub struct Generator<T = SystemClock>
where
    T: TimeSource,
{
    worker_id: u64,
    datacenter_id: u64,
    epoch: u64,
    #[cfg(feature = "cache-padded")]
    pub(crate) state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Mutex<State>,
    pub(crate) time: T,
}

impl Generator<SystemClock> {
    /// Creates a generator on the system clock using [`TWITTER_EPOCH`].
    ///
    /// # Errors
    ///
    /// - [`Error::WorkerIdOutOfRange`] if `worker_id > 31`
    /// - [`Error::DatacenterIdOutOfRange`] if `datacenter_id > 31`
    /// - [`Error::EpochOutOfRange`] if `epoch` does not fit an `i64`
    ///
    /// Checked in that order.
    ///
    /// # Example
    /// ```
    /// use snowgen::{Error, Generator};
    ///
    /// let generator = Generator::new(15, 16).unwrap();
    /// assert_eq!(generator.worker_id(), 15);
    /// assert_eq!(generator.datacenter_id(), 16);
    ///
    /// assert!(matches!(
    ///     Generator::new(32, 0),
    ///     Err(Error::WorkerIdOutOfRange { worker_id: 32 })
    /// ));
    /// ```
    pub fn new(worker_id: u64, datacenter_id: u64) -> Result<Self> {
        Self::with_epoch(worker_id, datacenter_id, TWITTER_EPOCH)
    }

    /// Creates a generator on the system clock with a custom epoch, given in
    /// milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::new`].
    pub fn with_epoch(worker_id: u64, datacenter_id: u64, epoch: u64) -> Result<Self> {
        Self::with_time_source(worker_id, datacenter_id, epoch, SystemClock)
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time`.
    ///
    /// The generation state starts at timestamp zero and sequence zero, so the
    /// first call always takes the "new millisecond" path.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::new`].
    pub fn with_time_source(
        worker_id: u64,
        datacenter_id: u64,
        epoch: u64,
        time: T,
    ) -> Result<Self> {
        if worker_id > MAX_WORKER_ID {
            return Err(Error::WorkerIdOutOfRange { worker_id });
        }
        if datacenter_id > MAX_DATACENTER_ID {
            return Err(Error::DatacenterIdOutOfRange { datacenter_id });
        }
        if epoch > MAX_EPOCH {
            return Err(Error::EpochOutOfRange { epoch });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(worker_id, datacenter_id, epoch, "created snowflake generator");

        Ok(Self {
            worker_id,
            datacenter_id,
            epoch,
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(State::default())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(State::default()),
            time,
        })
    }

    /// The worker ID encoded into every ID.
    pub fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// The datacenter ID encoded into every ID.
    pub fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Milliseconds since the Unix epoch that this generator counts from.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current time of the underlying time source, in milliseconds since the
    /// Unix epoch (not the generator epoch).
    ///
    /// Handy for comparing against [`Generator::issued_at`] to measure drift.
    pub fn timestamp(&self) -> u64 {
        self.time.current_millis()
    }

    /// Unix millisecond at which `id` was issued, assuming it came from a
    /// generator sharing this one's epoch.
    pub fn issued_at(&self, id: u64) -> u64 {
        SnowflakeParts::decompose(id).unix_millis(self.epoch)
    }

    /// Generates the next ID, blocking the calling thread if the sequence for
    /// the current millisecond is exhausted.
    ///
    /// The clock read, the comparison against the previous timestamp, the
    /// sequence update and the packing all happen under one lock. When 4096
    /// IDs have already been issued in the current millisecond, this call
    /// busy-spins until the clock ticks over; it never sleeps.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovingBackwards`] if the time source reports a time
    ///   before the last issued ID. The state is left untouched, so a later
    ///   call succeeds once the clock has caught up.
    /// - [`Error::ClockBeforeEpoch`] if the time source reports a time before
    ///   the generator epoch. The state is left untouched.
    /// - [`Error::LockPoisoned`] if another caller panicked while holding the
    ///   lock (only without the `parking-lot` feature).
    ///
    /// # Example
    /// ```
    /// use snowgen::{Generator, SnowflakeParts};
    ///
    /// let generator = Generator::new(5, 24).unwrap();
    /// let id = generator.next_id().unwrap();
    ///
    /// let parts = SnowflakeParts::decompose(id);
    /// assert_eq!(parts.worker_id, 5);
    /// assert_eq!(parts.datacenter_id, 24);
    /// assert!(generator.issued_at(id) <= generator.timestamp());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<u64> {
        let mut state = self.lock_state()?;
        let now = self.time.current_millis();
        if now < self.epoch && now >= state.last_timestamp {
            return Err(self.cold_clock_before_epoch(now));
        }

        let timestamp = match now.cmp(&state.last_timestamp) {
            Ordering::Equal => {
                state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
                if state.sequence == 0 {
                    state.last_timestamp = self.spin_until_after(state.last_timestamp);
                }
                state.last_timestamp
            }
            Ordering::Greater => {
                state.sequence = 0;
                state.last_timestamp = now;
                now
            }
            Ordering::Less => return Err(Self::cold_clock_behind(state.last_timestamp, now)),
        };

        Ok(self.compose(timestamp, state.sequence))
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Behaves like [`Generator::next_id`] except that an exhausted sequence
    /// yields [`IdGenStatus::Pending`] instead of spinning. The state is not
    /// modified in that case, so the caller can back off however suits its
    /// scheduler and poll again.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus> {
        let mut state = self.lock_state()?;
        let now = self.time.current_millis();
        if now < self.epoch && now >= state.last_timestamp {
            return Err(self.cold_clock_before_epoch(now));
        }

        match now.cmp(&state.last_timestamp) {
            Ordering::Equal => {
                if state.sequence < SEQUENCE_MASK {
                    state.sequence += 1;
                    Ok(IdGenStatus::Ready {
                        id: self.compose(now, state.sequence),
                    })
                } else {
                    Ok(IdGenStatus::Pending {
                        yield_until: now + 1,
                    })
                }
            }
            Ordering::Greater => {
                state.sequence = 0;
                state.last_timestamp = now;
                Ok(IdGenStatus::Ready {
                    id: self.compose(now, 0),
                })
            }
            Ordering::Less => Err(Self::cold_clock_behind(state.last_timestamp, now)),
        }
    }

    pub(crate) fn lock_state(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    fn spin_until_after(&self, last_timestamp: u64) -> u64 {
        loop {
            let now = self.time.current_millis();
            if now > last_timestamp {
                return now;
            }
            core::hint::spin_loop();
        }
    }

    fn compose(&self, timestamp: u64, sequence: u64) -> u64 {
        SnowflakeParts {
            timestamp: timestamp - self.epoch,
            datacenter_id: self.datacenter_id,
            worker_id: self.worker_id,
            sequence,
        }
        .compose()
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last_timestamp: u64, now: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            last_timestamp,
            now,
            behind_ms = last_timestamp - now,
            "clock moved backwards, refusing to generate id"
        );
        Error::ClockMovingBackwards {
            last_timestamp,
            now,
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_before_epoch(&self, now: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            epoch = self.epoch,
            now,
            "clock is before the generator epoch, refusing to generate id"
        );
        Error::ClockBeforeEpoch {
            epoch: self.epoch,
            now,
        }
    }
}

impl<T> fmt::Debug for Generator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("worker_id", &self.worker_id)
            .field("datacenter_id", &self.datacenter_id)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
