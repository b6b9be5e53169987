use super::Layer;

/// The post-processing step a [`Filter`] applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Subtracts the slice mean from every element (zero-centering).
    ShiftNormalize,
    /// Rescales the slice to min-subtracted proportions of its sum,
    /// `(s[i] - min) / (sum - size * min)`.
    Ratio,
    /// Numerically stable softmax: shift by the max, exponentiate, normalize.
    Softmax,
}

/// A decorator wrapping one descriptor and post-processing its state slice
/// in place after activation. The wrapped descriptor's facts pass through
/// unchanged; a filter never changes shape.
#[derive(Clone, Debug)]
pub struct Filter {
    kind: FilterKind,
    inner: Box<Layer>,
}

impl Filter {
    pub fn new(kind: FilterKind, inner: Layer) -> Self {
        Self {
            kind,
            inner: Box::new(inner),
        }
    }

    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn bias(&self) -> bool {
        self.inner.bias()
    }

    pub fn weights_size(&self) -> usize {
        self.inner.weights_size()
    }

    pub fn errors_size(&self) -> usize {
        self.inner.errors_size()
    }

    pub fn activate(&self, acc: &mut [f32], states: &mut [f32], weights: &[f32]) {
        self.inner.activate(acc, states, weights);

        match self.kind {
            FilterKind::ShiftNormalize => shift_normalize(states),
            FilterKind::Ratio => ratio(states),
            FilterKind::Softmax => softmax(states),
        }
    }

    pub fn check(&self, states: &[f32], errors: &mut [f32]) {
        self.inner.check(states, errors);
    }
}

fn shift_normalize(states: &mut [f32]) {
    let n = states.len() as f32;
    let mut avg = 0.0;
    for s in states.iter() {
        avg += s / n;
    }
    for s in states.iter_mut() {
        *s -= avg;
    }
}

fn ratio(states: &mut [f32]) {
    let mut min = f32::MAX;
    let mut sum = 0.0;
    for s in states.iter() {
        if *s < min {
            min = *s;
        }
        sum += s;
    }

    let denom = sum - states.len() as f32 * min;
    if denom == 0.0 {
        // All elements equal: every proportion degenerates to the uniform
        // share instead of 0/0.
        let uniform = 1.0 / states.len() as f32;
        for s in states.iter_mut() {
            *s = uniform;
        }
        return;
    }

    for s in states.iter_mut() {
        *s = (*s - min) / denom;
    }
}

fn softmax(states: &mut [f32]) {
    let mut max = f32::MIN;
    for s in states.iter() {
        if *s > max {
            max = *s;
        }
    }

    let mut sum = 0.0;
    for s in states.iter_mut() {
        *s = (*s - max).exp();
        sum += *s;
    }

    for s in states.iter_mut() {
        *s /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn run(kind: FilterKind, values: &[f32]) -> Vec<f32> {
        let f = Filter::new(kind, Layer::input(values.len()));
        let mut acc = values.to_vec();
        let mut states = vec![0.0; values.len()];
        f.activate(&mut acc, &mut states, &[]);
        states
    }

    #[test]
    fn shift_normalize_centers_on_zero() {
        let out = run(FilterKind::ShiftNormalize, &[1.0, 2.0, 3.0, 6.0]);
        assert!(approx_eq(out.iter().sum::<f32>(), 0.0));
        assert!(approx_eq(out[0], -2.0));
        assert!(approx_eq(out[3], 3.0));
    }

    #[test]
    fn ratio_yields_min_subtracted_proportions() {
        let out = run(FilterKind::Ratio, &[2.0, 4.0, 6.0]);
        // (s - 2) / (12 - 3 * 2)
        assert!(approx_eq(out[0], 0.0));
        assert!(approx_eq(out[1], 1.0 / 3.0));
        assert!(approx_eq(out[2], 2.0 / 3.0));
        assert!(approx_eq(out.iter().sum::<f32>(), 1.0));
    }

    #[test]
    fn ratio_degenerates_to_uniform_when_flat() {
        let out = run(FilterKind::Ratio, &[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(out, vec![0.25; 4]);
    }

    #[test]
    fn softmax_sums_to_one() {
        let out = run(FilterKind::Softmax, &[1.0, 2.0, 3.0]);
        assert!(approx_eq(out.iter().sum::<f32>(), 1.0));
        assert!(out[0] < out[1] && out[1] < out[2]);
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let a = run(FilterKind::Softmax, &[1.0, 2.0, 3.0]);
        let b = run(FilterKind::Softmax, &[101.0, 102.0, 103.0]);
        for (x, y) in a.iter().zip(&b) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn softmax_survives_large_magnitudes() {
        let out = run(FilterKind::Softmax, &[1000.0, 1000.5, 999.0]);
        assert!(out.iter().all(|s| s.is_finite()));
        assert!(approx_eq(out.iter().sum::<f32>(), 1.0));
    }
}
