use serde::{Deserialize, Serialize};

/// An elementwise activation function.
///
/// Every variant is a pure function of its input; `f` evaluates it and `df`
/// evaluates its derivative at the same point. All formulas are written to
/// stay finite for any finite `f32` input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    /// `y = x`.
    Passthrough,
    /// `y = 1 / (1 + e^(-amp * x))`.
    Sigmoid { amp: f32 },
    /// `y = 1 / (1 + |x|)`, a division-only gate squash.
    FastSigmoid,
    /// `y = 0.5 * (amp * x / (1 + |amp * x|)) + 0.5`, the biased two-argument
    /// fast-sigmoid form, mapping into (0, 1) around 0.5.
    FastSigmoidBiased { amp: f32 },
    /// `y = tanh(x)`.
    Tanh,
    /// `y = max(x, 0)`.
    Relu,
}
use Activation::*;

impl Activation {
    pub fn sigmoid(amp: f32) -> Self {
        Sigmoid { amp }
    }

    pub fn fast_sigmoid_biased(amp: f32) -> Self {
        FastSigmoidBiased { amp }
    }

    /// Evaluates the activation at `x`.
    pub fn f(&self, x: f32) -> f32 {
        match self {
            Passthrough => x,
            Sigmoid { amp } => 1.0 / (1.0 + (-x * amp).exp()),
            FastSigmoid => 1.0 / (1.0 + x.abs()),
            FastSigmoidBiased { amp } => {
                let ax = amp * x;
                0.5 * (ax / (1.0 + ax.abs())) + 0.5
            }
            Tanh => x.tanh(),
            Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
        }
    }

    /// Evaluates the derivative of the activation at `x`.
    pub fn df(&self, x: f32) -> f32 {
        match self {
            Passthrough => 1.0,
            Sigmoid { .. } => {
                let sig = self.f(x);
                sig * (1.0 - sig)
            }
            FastSigmoid => {
                let d = 1.0 + x.abs();
                -x.signum() / (d * d)
            }
            FastSigmoidBiased { amp } => {
                let d = 1.0 + (amp * x).abs();
                0.5 * amp / (d * d)
            }
            Tanh => {
                let th = x.tanh();
                1.0 - th * th
            }
            Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn sigmoid_midpoint() {
        assert!(approx_eq(Activation::sigmoid(1.0).f(0.0), 0.5));
    }

    #[test]
    fn sigmoid_derivative_matches_run() {
        let act = Activation::sigmoid(1.0);
        for x in [-3.0, -0.5, 0.0, 0.5, 3.0] {
            let sig = act.f(x);
            assert!(approx_eq(act.df(x), sig * (1.0 - sig)));
        }
    }

    #[test]
    fn fast_sigmoid_ranges() {
        assert_eq!(FastSigmoid.f(0.0), 1.0);
        assert!(approx_eq(FastSigmoid.f(1.0), 0.5));
        assert!(approx_eq(FastSigmoid.f(-1.0), 0.5));
        // The biased form is centered at 0.5 and bounded by (0, 1).
        let biased = Activation::fast_sigmoid_biased(1.0);
        assert!(approx_eq(biased.f(0.0), 0.5));
        assert!(biased.f(1e20) <= 1.0);
        assert!(biased.f(-1e20) >= 0.0);
    }

    #[test]
    fn tanh_derivative() {
        for x in [-2.0f32, 0.0, 1.5] {
            let th = x.tanh();
            assert!(approx_eq(Tanh.df(x), 1.0 - th * th));
        }
    }

    #[test]
    fn relu_kink() {
        assert_eq!(Relu.f(-3.0), 0.0);
        assert_eq!(Relu.f(3.0), 3.0);
        assert_eq!(Relu.df(-3.0), 0.0);
        assert_eq!(Relu.df(3.0), 1.0);
        assert_eq!(Relu.df(0.0), 0.0);
    }

    #[test]
    fn passthrough_is_identity() {
        assert_eq!(Passthrough.f(42.5), 42.5);
        assert_eq!(Passthrough.df(42.5), 1.0);
    }
}
