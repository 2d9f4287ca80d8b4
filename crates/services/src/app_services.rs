use std::collections::HashMap;

use question_bank::BankSource;
use quiz_core::model::TopicId;

use crate::Clock;
use crate::error::TrainerError;
use crate::sessions::TopicTrainer;

/// Assembles one independent `TopicTrainer` per topic.
///
/// A topic whose bank fails to load is recorded as unavailable and skipped;
/// the remaining topics stay fully usable. Sessions are held per topic with
/// no shared mutable state between them.
pub struct TrainerServices {
    order: Vec<TopicId>,
    trainers: HashMap<TopicId, TopicTrainer>,
    unavailable: Vec<TrainerError>,
}

impl TrainerServices {
    /// Load a trainer for each topic from the shared bank source.
    #[must_use]
    pub fn load(source: &dyn BankSource, clock: Clock, topic_ids: &[TopicId]) -> Self {
        let mut order = Vec::with_capacity(topic_ids.len());
        let mut trainers = HashMap::with_capacity(topic_ids.len());
        let mut unavailable = Vec::new();

        for topic_id in topic_ids {
            match TopicTrainer::load(source, topic_id.clone(), clock) {
                Ok(trainer) => {
                    order.push(topic_id.clone());
                    trainers.insert(topic_id.clone(), trainer);
                }
                Err(err) => unavailable.push(err),
            }
        }

        Self {
            order,
            trainers,
            unavailable,
        }
    }

    /// Topics with a loaded bank, in the order they were requested.
    #[must_use]
    pub fn topics(&self) -> &[TopicId] {
        &self.order
    }

    #[must_use]
    pub fn trainer(&self, topic_id: &TopicId) -> Option<&TopicTrainer> {
        self.trainers.get(topic_id)
    }

    #[must_use]
    pub fn trainer_mut(&mut self, topic_id: &TopicId) -> Option<&mut TopicTrainer> {
        self.trainers.get_mut(topic_id)
    }

    /// Load failures, one per topic whose bank was missing or malformed.
    #[must_use]
    pub fn unavailable(&self) -> &[TrainerError] {
        &self.unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use question_bank::{InMemorySource, QuestionRecord};
    use quiz_core::time::fixed_clock;

    fn record(prompt: &str) -> QuestionRecord {
        QuestionRecord {
            prompt: prompt.into(),
            choices: vec!["yes".into(), "no".into()],
            correct_index: 0,
            explanation: String::new(),
        }
    }

    #[test]
    fn bad_topic_leaves_others_usable() {
        let source = InMemorySource::new();
        let mna = TopicId::new("mna").unwrap();
        let real_estate = TopicId::new("real-estate").unwrap();
        source.insert(mna.clone(), vec![record("Q1"), record("Q2")]);
        // real-estate intentionally unregistered.

        let services = TrainerServices::load(
            &source,
            fixed_clock(),
            &[mna.clone(), real_estate.clone()],
        );

        assert_eq!(services.topics(), &[mna.clone()]);
        assert!(services.trainer(&mna).is_some());
        assert!(services.trainer(&real_estate).is_none());
        assert_eq!(services.unavailable().len(), 1);
        assert!(matches!(
            &services.unavailable()[0],
            TrainerError::BankUnavailable { topic, .. } if *topic == real_estate
        ));
    }

    #[test]
    fn topic_sessions_are_independent() {
        let source = InMemorySource::new();
        let mna = TopicId::new("mna").unwrap();
        let restructuring = TopicId::new("restructuring").unwrap();
        source.insert(mna.clone(), vec![record("M1"), record("M2")]);
        source.insert(restructuring.clone(), vec![record("R1"), record("R2")]);

        let mut services =
            TrainerServices::load(&source, fixed_clock(), &[mna.clone(), restructuring.clone()]);

        let trainer = services.trainer_mut(&mna).unwrap();
        trainer.start(2).unwrap();
        trainer.check("yes").unwrap();
        trainer.advance().unwrap();

        // The other topic is untouched by M&A progress.
        let other = services.trainer(&restructuring).unwrap();
        assert!(!other.session().is_configured());
        assert_eq!(other.session().seen_count(), 0);
    }
}
