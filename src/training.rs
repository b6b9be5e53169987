use crate::layout::Layout;

/// Everything a learning rule gets to see for one update: the resolved
/// layout plus the network's live arrays. The weight array is the only
/// mutable part; a rule must leave every array at its original length.
pub struct TrainContext<'a> {
    pub layout: &'a Layout,
    pub accumulators: &'a [f32],
    pub states: &'a [f32],
    pub errors: &'a [f32],
    /// The aggregated scalar error at the time of the update.
    pub error: f32,
    pub weights: &'a mut [f32],
}

/// The weight-update extension seam.
///
/// [`Network::train`](crate::Network::train) handles the step bookkeeping
/// and error refresh; the rule only decides how the weights move. No
/// learning algorithm ships with the crate.
pub trait LearningRule {
    fn update(&mut self, ctx: TrainContext<'_>);
}

/// A rule that leaves the weights untouched. Useful as the placeholder
/// while stepping a network without a learner attached.
#[derive(Default, Clone, Copy)]
pub struct NoLearning;

impl NoLearning {
    pub fn new() -> Self {
        Self
    }
}

impl LearningRule for NoLearning {
    fn update(&mut self, _ctx: TrainContext<'_>) {}
}
