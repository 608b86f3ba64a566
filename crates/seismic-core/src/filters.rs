//! Magnitude and time range filter parameters

use crate::earthquake::Earthquake;

/// Lower magnitude bound applied before the user touches the slider
pub const DEFAULT_MIN_MAGNITUDE: f64 = 0.0;

/// Upper magnitude bound applied before the user touches the slider
pub const DEFAULT_MAX_MAGNITUDE: f64 = 10.0;

/// Range filters plus the cross-section switch.
///
/// All four bounds are exclusive: a record sitting exactly on a bound is
/// rejected. Out-of-order bounds are accepted and simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub min_magnitude: f64,
    pub max_magnitude: f64,

    /// Milliseconds since the Unix epoch
    pub min_time: f64,

    /// Milliseconds since the Unix epoch
    pub max_time: f64,

    /// Restrict visible earthquakes to the drawn cross-section rectangle
    pub cross_section: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
            min_time: f64::NEG_INFINITY,
            max_time: f64::INFINITY,
            cross_section: false,
        }
    }
}

impl FilterParams {
    /// Magnitude and time test. NaN fields never match.
    pub fn matches(&self, eq: &Earthquake) -> bool {
        eq.magnitude > self.min_magnitude
            && eq.magnitude < self.max_magnitude
            && eq.time > self.min_time
            && eq.time < self.max_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quake(magnitude: f64, time: f64) -> Earthquake {
        Earthquake::new(0.0, 0.0, magnitude, time)
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let params = FilterParams {
            min_magnitude: 2.0,
            max_magnitude: 8.0,
            min_time: 100.0,
            max_time: 200.0,
            cross_section: false,
        };

        assert!(params.matches(&quake(5.0, 150.0)));
        assert!(!params.matches(&quake(2.0, 150.0)));
        assert!(!params.matches(&quake(8.0, 150.0)));
        assert!(!params.matches(&quake(5.0, 100.0)));
        assert!(!params.matches(&quake(5.0, 200.0)));
    }

    #[test]
    fn test_nan_never_matches() {
        let params = FilterParams::default();
        assert!(!params.matches(&quake(f64::NAN, 0.0)));
        assert!(!params.matches(&quake(5.0, f64::NAN)));
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let params = FilterParams {
            min_magnitude: 8.0,
            max_magnitude: 2.0,
            ..FilterParams::default()
        };
        assert!(!params.matches(&quake(5.0, 0.0)));
    }

    #[test]
    fn test_default_time_range_is_unbounded() {
        let params = FilterParams::default();
        assert!(params.matches(&quake(5.0, -1.0e15)));
        assert!(params.matches(&quake(5.0, 1.0e15)));
        assert!(!params.matches(&quake(0.0, 0.0)));
    }
}
