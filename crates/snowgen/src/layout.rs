/// Width of the worker ID field.
pub const WORKER_ID_BITS: u64 = 5;

/// Width of the datacenter ID field.
pub const DATACENTER_ID_BITS: u64 = 5;

/// Width of the per-millisecond sequence field.
pub const SEQUENCE_BITS: u64 = 12;

/// Width of the elapsed-time field. Bit 63 stays reserved.
pub const TIMESTAMP_BITS: u64 = 41;

/// Largest accepted worker ID (31).
pub const MAX_WORKER_ID: u64 = (1 << WORKER_ID_BITS) - 1;

/// Largest accepted datacenter ID (31).
pub const MAX_DATACENTER_ID: u64 = (1 << DATACENTER_ID_BITS) - 1;

/// Bitmask for the 12-bit sequence field (4095).
pub const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Bitmask for the 41-bit elapsed-time field before shifting.
pub const TIMESTAMP_MASK: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Largest accepted generator epoch, in Unix milliseconds. Keeps every
/// decoded wall-clock time representable as an `i64`.
pub const MAX_EPOCH: u64 = i64::MAX as u64;

/// Worker ID occupies bits 12 through 16.
pub const WORKER_ID_SHIFT: u64 = SEQUENCE_BITS;

/// Datacenter ID occupies bits 17 through 21.
pub const DATACENTER_ID_SHIFT: u64 = SEQUENCE_BITS + WORKER_ID_BITS;

/// Elapsed time occupies bits 22 through 62.
pub const TIMESTAMP_SHIFT: u64 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

/// The four fields of a packed Snowflake ID.
///
/// `timestamp` is the **elapsed** milliseconds since the generator epoch, as
/// stored in the ID. Use [`SnowflakeParts::unix_millis`] to recover the
/// wall-clock time.
///
/// # Example
///
/// ```
/// use snowgen::{SnowflakeParts, TWITTER_EPOCH};
///
/// let parts = SnowflakeParts {
///     timestamp: 1000,
///     datacenter_id: 24,
///     worker_id: 5,
///     sequence: 7,
/// };
/// let id = parts.compose();
/// assert_eq!(SnowflakeParts::decompose(id), parts);
/// assert_eq!(parts.unix_millis(TWITTER_EPOCH), TWITTER_EPOCH + 1000);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeParts {
    pub timestamp: u64,
    pub datacenter_id: u64,
    pub worker_id: u64,
    pub sequence: u64,
}

impl SnowflakeParts {
    /// Packs the fields into an ID. Each field is masked to its width first.
    pub const fn compose(&self) -> u64 {
        ((self.timestamp & TIMESTAMP_MASK) << TIMESTAMP_SHIFT)
            | ((self.datacenter_id & MAX_DATACENTER_ID) << DATACENTER_ID_SHIFT)
            | ((self.worker_id & MAX_WORKER_ID) << WORKER_ID_SHIFT)
            | (self.sequence & SEQUENCE_MASK)
    }

    /// Splits an ID into its fields. The reserved top bit is ignored.
    pub const fn decompose(id: u64) -> Self {
        Self {
            timestamp: (id >> TIMESTAMP_SHIFT) & TIMESTAMP_MASK,
            datacenter_id: (id >> DATACENTER_ID_SHIFT) & MAX_DATACENTER_ID,
            worker_id: (id >> WORKER_ID_SHIFT) & MAX_WORKER_ID,
            sequence: id & SEQUENCE_MASK,
        }
    }

    /// Milliseconds since the Unix epoch at which the ID was issued, given the
    /// epoch of the generator that issued it.
    ///
    /// Saturates at `u64::MAX` for epochs no generator would accept.
    pub const fn unix_millis(&self, epoch: u64) -> u64 {
        self.timestamp.saturating_add(epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_twitter_layout() {
        assert_eq!(SEQUENCE_MASK, 4095);
        assert_eq!(MAX_WORKER_ID, 31);
        assert_eq!(MAX_DATACENTER_ID, 31);
        assert_eq!(WORKER_ID_SHIFT, 12);
        assert_eq!(DATACENTER_ID_SHIFT, 17);
        assert_eq!(TIMESTAMP_SHIFT, 22);
        assert_eq!(
            TIMESTAMP_BITS + DATACENTER_ID_BITS + WORKER_ID_BITS + SEQUENCE_BITS,
            63
        );
    }

    #[test]
    fn fields_land_in_their_bits() {
        let id = SnowflakeParts {
            timestamp: 1,
            datacenter_id: 1,
            worker_id: 1,
            sequence: 1,
        }
        .compose();
        assert_eq!(id, (1 << 22) | (1 << 17) | (1 << 12) | 1);
    }

    #[test]
    fn max_fields_never_set_sign_bit() {
        let id = SnowflakeParts {
            timestamp: TIMESTAMP_MASK,
            datacenter_id: MAX_DATACENTER_ID,
            worker_id: MAX_WORKER_ID,
            sequence: SEQUENCE_MASK,
        }
        .compose();
        assert_eq!(id, i64::MAX as u64);
        assert_eq!(SnowflakeParts::decompose(id).timestamp, TIMESTAMP_MASK);
    }

    #[test]
    fn oversized_fields_are_masked() {
        let parts = SnowflakeParts {
            timestamp: 0,
            datacenter_id: 32,
            worker_id: 33,
            sequence: 4096,
        };
        let decoded = SnowflakeParts::decompose(parts.compose());
        assert_eq!(decoded.datacenter_id, 0);
        assert_eq!(decoded.worker_id, 1);
        assert_eq!(decoded.sequence, 0);
    }

    #[test]
    fn unix_millis_saturates_on_huge_epoch() {
        let parts = SnowflakeParts::decompose(i64::MAX as u64);
        assert_eq!(parts.unix_millis(u64::MAX), u64::MAX);
        assert_eq!(parts.unix_millis(MAX_EPOCH), MAX_EPOCH + TIMESTAMP_MASK);
        assert_eq!(parts.unix_millis(0), TIMESTAMP_MASK);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parts_serialize_by_field_name() {
        let parts = SnowflakeParts {
            timestamp: 10,
            datacenter_id: 2,
            worker_id: 3,
            sequence: 4,
        };
        let json = serde_json::to_string(&parts).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":10,"datacenter_id":2,"worker_id":3,"sequence":4}"#
        );
        let back: SnowflakeParts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parts);
    }
}
