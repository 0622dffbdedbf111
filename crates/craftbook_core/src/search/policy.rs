//! Tunable thresholds for fuzzy field matching.

/// How per-word keyword distances are combined into one closeness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Worst word decides; one badly misspelled word vetoes the match.
    #[default]
    Max,
    /// Distances add up; long queries accumulate error.
    Sum,
}

/// Field-level tolerance settings used by the fuzzy predicates.
///
/// A field matches when its closeness is strictly below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    pub name_threshold: usize,
    pub address_threshold: usize,
    pub tag_threshold: usize,
    /// Keyword tokens shorter than this skip fuzzy scoring and need an exact
    /// whole-word match.
    pub short_token_len: usize,
    pub aggregation: Aggregation,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            name_threshold: 2,
            address_threshold: 3,
            tag_threshold: 3,
            short_token_len: 3,
            aggregation: Aggregation::Max,
        }
    }
}
