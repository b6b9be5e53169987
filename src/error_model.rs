use serde::{Deserialize, Serialize};

/// Transforms a raw deviation between a realised value and its target into a
/// bounded error signal.
///
/// Every variant special-cases a zero target so no input can divide by zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ErrorScaling {
    /// Identity, the raw realised value is the error.
    None,
    /// Clamps the value to `[target / limit, limit * target]`; with a zero
    /// target the window collapses to `[-1, 1]`.
    DeviationLimit { limit: f32 },
    /// Maps the value relative to its target into `[-1, 1]`, saturating at
    /// half and double the target. A zero target collapses to the sign of
    /// the value.
    Pct100,
}

impl ErrorScaling {
    pub const DEFAULT_LIMIT: f32 = 2.0;

    pub fn deviation_limit() -> Self {
        ErrorScaling::DeviationLimit {
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Scales the realised `value` against `target`.
    pub fn scale(&self, value: f32, target: f32) -> f32 {
        match *self {
            ErrorScaling::None => value,
            ErrorScaling::DeviationLimit { limit } => {
                if target == 0.0 {
                    value.clamp(-1.0, 1.0)
                } else if value > limit * target {
                    limit * target
                } else if value < target / limit {
                    target / limit
                } else {
                    value
                }
            }
            ErrorScaling::Pct100 => {
                if target == 0.0 {
                    // Sign fallback keeps the zero-target branch bounded.
                    if value < 0.0 {
                        -1.0
                    } else if value > 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                } else if value <= target / 2.0 {
                    -1.0
                } else if value >= target + target {
                    1.0
                } else {
                    value / target - 1.0
                }
            }
        }
    }
}

/// Reduces the full error array to one scalar with a selectable norm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ErrorAggregation {
    Sum,
    SumOfSquare,
    EuclideanDistance,
    /// Placeholder, aggregates as a plain sum until a real formula lands.
    CrossEntropy,
    /// Pseudo-Huber loss, `slope^2 * (sqrt(1 + sum((e / slope)^2)) - 1)`.
    PseudoHuber { slope: f32 },
}

impl ErrorAggregation {
    pub const DEFAULT_SLOPE: f32 = 0.5;

    pub fn pseudo_huber() -> Self {
        ErrorAggregation::PseudoHuber {
            slope: Self::DEFAULT_SLOPE,
        }
    }

    /// Aggregates the whole error array into one scalar.
    pub fn run(&self, errors: &[f32]) -> f32 {
        match *self {
            ErrorAggregation::Sum | ErrorAggregation::CrossEntropy => errors.iter().sum(),
            ErrorAggregation::SumOfSquare => errors.iter().map(|e| e * e).sum(),
            ErrorAggregation::EuclideanDistance => {
                errors.iter().map(|e| e * e).sum::<f32>().sqrt()
            }
            ErrorAggregation::PseudoHuber { slope } => {
                let mut t = 1.0;
                for e in errors {
                    let s = e / slope;
                    t += s * s;
                }
                slope * slope * (t.sqrt() - 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn pct100_saturation() {
        let s = ErrorScaling::Pct100;
        assert_eq!(s.scale(2.0, 1.0), 1.0);
        assert_eq!(s.scale(0.5, 1.0), -1.0);
        assert!(approx_eq(s.scale(1.5, 1.0), 0.5));
        assert_eq!(s.scale(0.0, 0.0), 0.0);
        assert_eq!(s.scale(7.0, 0.0), 1.0);
        assert_eq!(s.scale(-7.0, 0.0), -1.0);
    }

    #[test]
    fn pct100_interior_point() {
        // Halfway between target and saturation: v = 0.5, t = 1.0 is exactly
        // the lower saturation edge, so probe just inside it.
        assert!(approx_eq(ErrorScaling::Pct100.scale(0.6, 1.0), -0.4));
    }

    #[test]
    fn deviation_limit_windows() {
        let s = ErrorScaling::deviation_limit();
        assert_eq!(s.scale(5.0, 2.0), 4.0);
        assert_eq!(s.scale(0.5, 2.0), 1.0);
        assert_eq!(s.scale(3.0, 2.0), 3.0);
        // Zero target clamps to the unit window.
        assert_eq!(s.scale(8.0, 0.0), 1.0);
        assert_eq!(s.scale(-8.0, 0.0), -1.0);
        assert_eq!(s.scale(0.3, 0.0), 0.3);
    }

    #[test]
    fn no_scaling_is_identity() {
        assert_eq!(ErrorScaling::None.scale(3.25, 100.0), 3.25);
    }

    #[test]
    fn aggregation_norms() {
        let e = [3.0, 4.0];
        assert_eq!(ErrorAggregation::Sum.run(&e), 7.0);
        assert_eq!(ErrorAggregation::SumOfSquare.run(&e), 25.0);
        assert_eq!(ErrorAggregation::EuclideanDistance.run(&e), 5.0);
        // delta^2 * (sqrt(1 + (3/0.5)^2 + (4/0.5)^2) - 1)
        let expected = 0.25 * ((1.0f32 + 36.0 + 64.0).sqrt() - 1.0);
        assert!(approx_eq(ErrorAggregation::pseudo_huber().run(&e), expected));
    }

    #[test]
    fn aggregation_of_empty_errors() {
        assert_eq!(ErrorAggregation::Sum.run(&[]), 0.0);
        assert_eq!(ErrorAggregation::EuclideanDistance.run(&[]), 0.0);
        assert_eq!(ErrorAggregation::pseudo_huber().run(&[]), 0.0);
    }
}
