//! Lock term arithmetic.
//!
//! Elapsed days are whole days since creation, floored on integer seconds
//! (T+1 mode): a position created at any second of a day matures exactly
//! `staking_days × 86400` seconds later, not at a calendar boundary. A head
//! time before the creation time counts as zero days.

use lockvote_types::Timestamp;

/// Where a position stands relative to its term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermStatus {
    /// Retarget allowed, claim not.
    Locked { elapsed_days: u64, remaining_days: u64 },
    /// Claim allowed, retarget not.
    Matured { elapsed_days: u64 },
}

impl TermStatus {
    pub fn of(staking_days: u32, create_date_time: Timestamp, head_time: Timestamp) -> Self {
        let elapsed_days = elapsed_days(create_date_time, head_time);
        let term = u64::from(staking_days);
        if term > elapsed_days {
            Self::Locked {
                elapsed_days,
                remaining_days: term - elapsed_days,
            }
        } else {
            Self::Matured { elapsed_days }
        }
    }

    pub fn is_matured(&self) -> bool {
        matches!(self, Self::Matured { .. })
    }

    pub fn elapsed_days(&self) -> u64 {
        match self {
            Self::Locked { elapsed_days, .. } | Self::Matured { elapsed_days } => *elapsed_days,
        }
    }
}

/// Whole days from `create_date_time` to `head_time`.
pub fn elapsed_days(create_date_time: Timestamp, head_time: Timestamp) -> u64 {
    create_date_time.elapsed_days_since(head_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockvote_types::SECONDS_PER_DAY;

    const T0: u64 = 1_700_000_000;

    fn at_day(day: u64, extra_secs: u64) -> Timestamp {
        Timestamp::new(T0 + day * SECONDS_PER_DAY + extra_secs)
    }

    #[test]
    fn locked_until_last_second_of_term() {
        let status = TermStatus::of(30, Timestamp::new(T0), at_day(29, SECONDS_PER_DAY - 1));
        assert_eq!(
            status,
            TermStatus::Locked {
                elapsed_days: 29,
                remaining_days: 1
            }
        );
    }

    #[test]
    fn matures_exactly_at_term() {
        let status = TermStatus::of(30, Timestamp::new(T0), at_day(30, 0));
        assert_eq!(status, TermStatus::Matured { elapsed_days: 30 });
        assert!(status.is_matured());
    }

    #[test]
    fn future_creation_counts_as_day_zero() {
        let status = TermStatus::of(1, Timestamp::new(T0 + 200), Timestamp::new(T0));
        assert_eq!(status.elapsed_days(), 0);
        assert!(!status.is_matured());
    }
}
