//! Math utilities for the classifier
//!
//! Smoothed per-token odds, combined in log space and mapped back to a
//! probability with a logistic transform.

/// Signal assumed for a token with no observations
pub const NEUTRAL_SIGNAL: f64 = 0.5;

/// Stand-ins for a blended signal of exactly 0 or 1, which has no log-odds
pub const MIN_SIGNAL: f64 = 0.01;
pub const MAX_SIGNAL: f64 = 0.99;

/// `count / total`, or 0 when `total` is 0
#[inline]
pub fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Pull a raw signal toward neutral, weighted by how often the token was seen
///
/// Formula: (0.5 + seen * raw) / (1 + seen)
///
/// Only the exact extremes are replaced; everything in between is kept as is.
#[inline]
pub fn blend(raw: f64, seen: u64) -> f64 {
    let n = seen as f64;
    let blended = (NEUTRAL_SIGNAL + n * raw) / (1.0 + n);
    if blended <= 0.0 {
        MIN_SIGNAL
    } else if blended >= 1.0 {
        MAX_SIGNAL
    } else {
        blended
    }
}

/// Contribution of one token to the log-odds sum: ln(1-p) - ln(p)
#[inline]
pub fn log_odds(p: f64) -> f64 {
    (1.0 - p).ln() - p.ln()
}

/// Final probability from the summed log-odds: 1 / (1 + e^sum)
#[inline]
pub fn logistic(log_sum: f64) -> f64 {
    1.0 / (1.0 + log_sum.exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_guards_zero() {
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn test_blend_pulls_toward_neutral() {
        assert!((blend(1.0, 1) - 0.75).abs() < 1e-12);
        assert!((blend(0.0, 1) - 0.25).abs() < 1e-12);
        assert!((blend(1.0, 0) - 0.5).abs() < 1e-12);
        // Heavily observed tokens approach the raw signal without being capped
        assert!((blend(1.0, 200) - 200.5 / 201.0).abs() < 1e-12);
        assert!(blend(1.0, 200) > MAX_SIGNAL);
        assert!(blend(0.0, 200) < MIN_SIGNAL);
        assert!(blend(0.0, 200) > 0.0);
    }

    #[test]
    fn test_blend_replaces_exact_extremes() {
        assert_eq!(blend(1.0, u64::MAX), MAX_SIGNAL);
        assert_eq!(blend(-1.0, u64::MAX), MIN_SIGNAL);
    }

    #[test]
    fn test_neutral_token_is_zero_log_odds() {
        assert!(log_odds(0.5).abs() < 1e-12);
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_direction() {
        assert!(logistic(log_odds(0.75)) > 0.5);
        assert!(logistic(log_odds(0.25)) < 0.5);
    }
}
