//! Reveal-window arithmetic for timeout claims.

use chrono::{DateTime, Duration, Utc};

/// Instant from which player2 may claim the pot, `None` if it lies past the
/// last representable instant
pub fn reveal_deadline(joined_at: DateTime<Utc>, window: Duration) -> Option<DateTime<Utc>> {
    joined_at.checked_add_signed(window)
}

/// The deadline itself is claimable. A deadline that cannot be represented
/// is never reached.
pub fn can_claim(now: DateTime<Utc>, joined_at: DateTime<Utc>, window: Duration) -> bool {
    reveal_deadline(joined_at, window).map_or(false, |deadline| now >= deadline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_window_boundaries() {
        let joined_at = Utc::now();
        let window = Duration::hours(24);

        assert!(!can_claim(joined_at, joined_at, window));
        assert!(!can_claim(joined_at + window - Duration::seconds(1), joined_at, window));
        assert!(can_claim(joined_at + window, joined_at, window));
        assert!(can_claim(joined_at + window * 2, joined_at, window));
        assert_eq!(reveal_deadline(joined_at, window), Some(joined_at + window));
    }

    #[test]
    fn test_unrepresentable_deadline_is_never_claimable() {
        let joined_at = Utc::now();
        let window = Duration::seconds(9_000_000_000_000);

        assert_eq!(reveal_deadline(joined_at, window), None);
        assert!(!can_claim(DateTime::<Utc>::MAX_UTC, joined_at, window));
    }
}
