use question_bank::{InMemorySource, QuestionRecord};
use quiz_core::model::TopicId;
use quiz_core::time::fixed_clock;
use services::{TopicTrainer, TrainerServices};

fn record(i: usize) -> QuestionRecord {
    QuestionRecord {
        prompt: format!("Q{i}"),
        choices: vec![format!("right{i}"), format!("wrong{i}")],
        correct_index: 0,
        explanation: format!("E{i}"),
    }
}

fn seeded_source(topic: &TopicId, size: usize) -> InMemorySource {
    let source = InMemorySource::new();
    source.insert(topic.clone(), (0..size).map(record).collect());
    source
}

#[test]
fn full_quiz_produces_final_review_data() {
    let topic = TopicId::new("mna").unwrap();
    let source = seeded_source(&topic, 3);
    let mut trainer = TopicTrainer::load(&source, topic.clone(), fixed_clock()).unwrap();

    trainer.start(3).unwrap();

    // Answer the first two correctly and the last one wrong.
    let mut last = None;
    for i in 0..3 {
        let question = trainer.current_question().unwrap();
        let choice = if i < 2 {
            question.correct_choice().to_owned()
        } else {
            question.choices()[1].clone()
        };
        let checked = trainer.check(&choice).unwrap();
        assert_eq!(checked.is_correct, i < 2);
        last = Some(trainer.advance().unwrap());
    }

    let outcome = last.unwrap();
    assert!(outcome.progress.is_complete);
    assert_eq!(outcome.progress.answered, 3);
    assert_eq!(outcome.progress.score, 2);

    let report = outcome.report.expect("completed quiz yields a report");
    assert_eq!(report.topic_id(), &topic);
    assert_eq!(report.total(), 3);
    assert_eq!(report.correct(), 2);
    assert_eq!(report.records().len(), 3);
    assert!(report.records()[2].correct_choice.starts_with("right"));

    let review = services::FinalReview::from_report(&report);
    assert_eq!(review.score, 2);
    assert_eq!(review.entries.len(), 3);
    assert_eq!(review.entries[0].number, 1);
}

#[test]
fn consecutive_quizzes_never_repeat_until_exhaustion() {
    let topic = TopicId::new("real-estate").unwrap();
    let source = seeded_source(&topic, 6);
    let mut trainer = TopicTrainer::load(&source, topic, fixed_clock()).unwrap();

    let mut prompts_seen = std::collections::HashSet::new();

    // Three quizzes of two questions each walk the entire bank.
    for _ in 0..3 {
        trainer.start(2).unwrap();
        for _ in 0..2 {
            let prompt = trainer.current_question().unwrap().prompt().to_owned();
            assert!(prompts_seen.insert(prompt), "question repeated early");
            let choice = trainer.current_question().unwrap().correct_choice().to_owned();
            trainer.check(&choice).unwrap();
            trainer.advance().unwrap();
        }
        trainer.restart();
    }
    assert_eq!(prompts_seen.len(), 6);

    // The pool is exhausted; the next start resets the seen set and succeeds.
    trainer.start(6).unwrap();
    assert_eq!(trainer.session().selected_count(), 6);
    assert_eq!(trainer.session().seen_count(), 0);
}

#[test]
fn requesting_more_than_unseen_pool_is_rejected() {
    let topic = TopicId::new("mna").unwrap();
    let source = seeded_source(&topic, 4);
    let mut trainer = TopicTrainer::load(&source, topic, fixed_clock()).unwrap();

    trainer.start(3).unwrap();
    for _ in 0..3 {
        let choice = trainer.current_question().unwrap().correct_choice().to_owned();
        trainer.check(&choice).unwrap();
        trainer.advance().unwrap();
    }
    trainer.restart();

    // Only one unseen question remains.
    let err = trainer.start(2).unwrap_err();
    assert!(matches!(
        err,
        services::SessionError::InvalidConfiguration {
            requested: 2,
            available: 1
        }
    ));
    trainer.start(1).unwrap();
}

#[test]
fn three_topic_composition_keeps_scores_apart() {
    let source = InMemorySource::new();
    let topics: Vec<TopicId> = ["mna", "real-estate", "restructuring"]
        .into_iter()
        .map(|s| TopicId::new(s).unwrap())
        .collect();
    for topic in &topics {
        source.insert(topic.clone(), (0..2).map(record).collect());
    }

    let mut services = TrainerServices::load(&source, fixed_clock(), &topics);
    assert_eq!(services.topics().len(), 3);
    assert!(services.unavailable().is_empty());

    // Play M&A perfectly, Real Estate badly, leave Restructuring alone.
    let trainer = services.trainer_mut(&topics[0]).unwrap();
    trainer.start(2).unwrap();
    for _ in 0..2 {
        let choice = trainer.current_question().unwrap().correct_choice().to_owned();
        trainer.check(&choice).unwrap();
        trainer.advance().unwrap();
    }

    let trainer = services.trainer_mut(&topics[1]).unwrap();
    trainer.start(2).unwrap();
    for _ in 0..2 {
        let choice = trainer.current_question().unwrap().choices()[1].clone();
        trainer.check(&choice).unwrap();
        trainer.advance().unwrap();
    }

    assert_eq!(services.trainer(&topics[0]).unwrap().session().score(), 2);
    assert_eq!(services.trainer(&topics[1]).unwrap().session().score(), 0);
    let untouched = services.trainer(&topics[2]).unwrap().session();
    assert!(!untouched.is_configured());
    assert_eq!(untouched.seen_count(), 0);
}
