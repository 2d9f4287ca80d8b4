/// Aggregated view of quiz progress, useful for a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: usize,
    pub is_complete: bool,
}
