//! Time source used to stamp uploads and result records.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// The importer reads it twice: once for the upload file name and once for
/// the result timestamp. Tests substitute a fixed instant.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as milliseconds since the Unix epoch, the suffix of
    /// upload file names.
    fn unix_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Frozen(i64);

    impl Clock for Frozen {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp_millis(self.0).unwrap()
        }
    }

    #[test]
    fn test_unix_millis_keeps_milliseconds() {
        assert_eq!(Frozen(1_700_000_000_123).unix_millis(), 1_700_000_000_123);
        assert_eq!(Frozen(0).unix_millis(), 0);
    }
}
