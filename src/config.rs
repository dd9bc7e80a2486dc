use crate::figure::Figure;

/// All refinement parameters in one struct.
/// Designed to be adjustable at runtime and mapped directly from
/// command-line options.
#[derive(Debug, Clone)]
pub struct RefineConfig {
    /// Perfection threshold. When non-zero, the geometric length-suggestion
    /// rule is suppressed for colliding segments longer than this, falling
    /// back to single-unit extension. Zero places no cap on the geometric
    /// rule. Larger figures refine faster with a small threshold at the cost
    /// of a less compact result.
    pub threshold: u32,
    /// Upper bound on how many leading segments to finalise.
    /// Saturates at the figure's segment count.
    pub max_segments: u32,
    /// Which refinement algorithm to run.
    pub method: RefineMethod,
}

/// Refinement algorithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineMethod {
    /// Grow each segment from unit length, backtracking to lengthen earlier
    /// segments whenever the new one collides. The primary variant.
    ShrinkFromEnd,
    /// Reserved. Currently fails with `Unimplemented` without touching the
    /// figure.
    GrowFromStart,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            threshold: 1,
            max_segments: u32::MAX,
            method: RefineMethod::ShrinkFromEnd,
        }
    }
}

impl RefineConfig {
    /// Index one past the last segment this configuration will finalise
    /// for `figure`.
    pub(crate) fn cap(&self, figure: &Figure) -> usize {
        (self.max_segments as usize).min(figure.len())
    }
}
