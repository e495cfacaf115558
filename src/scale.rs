//! Visual scales rebuilt on every filter pass.

/// Largest marker radius, in pixels.
pub const MAX_RADIUS: f64 = 25.0;

/// Square-root scale from `[0, max]` onto `[0, range_max]`.
///
/// A degenerate domain (`max == 0`) maps everything to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    range_max: f64,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        Self {
            domain_max,
            range_max,
        }
    }

    /// Radius scale for a pass whose busiest station saw `max_traffic` trips.
    pub fn radius(max_traffic: u32) -> Self {
        Self::new(max_traffic as f64, MAX_RADIUS)
    }

    pub fn apply(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 {
            return 0.0;
        }
        value.sqrt() / self.domain_max.sqrt() * self.range_max
    }
}

/// Quantize scale over `[0, 1]` with three evenly spaced buckets.
///
/// | Input           | Output |
/// |-----------------|--------|
/// | < 1/3           | 0.0    |
/// | >= 1/3, < 2/3   | 0.5    |
/// | >= 2/3          | 1.0    |
/// | NaN             | None   |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeScale {
    buckets: [f64; 3],
}

impl Default for QuantizeScale {
    fn default() -> Self {
        Self {
            buckets: [0.0, 0.5, 1.0],
        }
    }
}

impl QuantizeScale {
    pub fn apply(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let n = self.buckets.len();
        let index = (1..n)
            .take_while(|&i| value >= i as f64 / n as f64)
            .count();
        Some(self.buckets[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_scale_endpoints() {
        let scale = SqrtScale::radius(400);
        assert_eq!(scale.apply(0.0), 0.0);
        assert_eq!(scale.apply(400.0), 25.0);
        assert_eq!(scale.apply(100.0), 12.5);
    }

    #[test]
    fn test_sqrt_scale_degenerate_domain() {
        let scale = SqrtScale::radius(0);
        assert_eq!(scale.apply(0.0), 0.0);
    }

    #[test]
    fn test_quantize_boundaries() {
        let q = QuantizeScale::default();
        assert_eq!(q.apply(0.0), Some(0.0));
        assert_eq!(q.apply(0.33), Some(0.0));
        assert_eq!(q.apply(1.0 / 3.0), Some(0.5));
        assert_eq!(q.apply(0.5), Some(0.5));
        assert_eq!(q.apply(2.0 / 3.0), Some(1.0));
        assert_eq!(q.apply(1.0), Some(1.0));
    }

    #[test]
    fn test_quantize_clamps_and_nan() {
        let q = QuantizeScale::default();
        assert_eq!(q.apply(-0.2), Some(0.0));
        assert_eq!(q.apply(1.7), Some(1.0));
        assert_eq!(q.apply(f64::NAN), None);
    }
}
