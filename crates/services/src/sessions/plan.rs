use rand::rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Selection result for a quiz draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlan {
    pub order: Vec<usize>,
}

impl QuizPlan {
    /// Number of questions selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Draws a uniform random sample of unseen bank indices.
///
/// Shuffle-and-slice over the unseen pool: every unseen index is equally
/// likely, no index repeats, and seen indices are never selected.
pub struct QuizSampler<'a> {
    bank_size: usize,
    seen: &'a HashSet<usize>,
}

impl<'a> QuizSampler<'a> {
    #[must_use]
    pub fn new(bank_size: usize, seen: &'a HashSet<usize>) -> Self {
        Self { bank_size, seen }
    }

    /// Number of bank indices still available for sampling.
    #[must_use]
    pub fn available(&self) -> usize {
        self.bank_size - self.seen.len().min(self.bank_size)
    }

    /// Draw `count` distinct unseen indices in random order.
    ///
    /// The caller is expected to have checked `count <= available()`; a
    /// larger `count` simply yields every unseen index.
    #[must_use]
    pub fn draw(&self, count: usize) -> QuizPlan {
        let mut pool: Vec<usize> = (0..self.bank_size)
            .filter(|i| !self.seen.contains(i))
            .collect();
        pool.shuffle(&mut rng());
        pool.truncate(count);
        QuizPlan { order: pool }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_yields_requested_count_without_duplicates() {
        let seen = HashSet::new();
        let plan = QuizSampler::new(10, &seen).draw(4);

        assert_eq!(plan.len(), 4);
        let unique: HashSet<_> = plan.order.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(plan.order.iter().all(|i| *i < 10));
    }

    #[test]
    fn draw_excludes_seen_indices() {
        let seen: HashSet<usize> = [0, 2, 4, 6, 8].into_iter().collect();
        let sampler = QuizSampler::new(10, &seen);
        assert_eq!(sampler.available(), 5);

        let plan = sampler.draw(5);
        assert_eq!(plan.len(), 5);
        assert!(plan.order.iter().all(|i| !seen.contains(i)));
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let seen = HashSet::new();
        let plan = QuizSampler::new(5, &seen).draw(5);

        let mut sorted = plan.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn overdraw_is_capped_at_available() {
        let seen: HashSet<usize> = [1].into_iter().collect();
        let plan = QuizSampler::new(3, &seen).draw(10);
        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
    }
}
