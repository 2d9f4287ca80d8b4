use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use question_bank::JsonBankSource;
use quiz_core::model::{Question, TopicId, TopicIdError};
use services::{Clock, FinalReview, TopicTrainer, TrainerServices};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BANK_DIR: &str = "banks";
const DEFAULT_TOPICS: &str = "mna,real-estate,restructuring";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTopic { raw: String, source: TopicIdError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTopic { raw, source } => {
                write!(f, "invalid topic {raw:?}: {source}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    bank_dir: PathBuf,
    topics: Vec<TopicId>,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_topics(raw: &str) -> Result<Vec<TopicId>, ArgsError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<TopicId>().map_err(|source| ArgsError::InvalidTopic {
                raw: s.to_owned(),
                source,
            })
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, ArgsError> {
    let mut bank_dir =
        std::env::var("QUIZ_BANK_DIR").unwrap_or_else(|_| DEFAULT_BANK_DIR.to_owned());
    let mut topics_raw =
        std::env::var("QUIZ_TOPICS").unwrap_or_else(|_| DEFAULT_TOPICS.to_owned());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--banks" => bank_dir = require_value(&mut args, "--banks")?,
            "--topics" => topics_raw = require_value(&mut args, "--topics")?,
            other => return Err(ArgsError::UnknownArg(other.to_owned())),
        }
    }

    Ok(Args {
        bank_dir: PathBuf::from(bank_dir),
        topics: parse_topics(&topics_raw)?,
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--banks <dir>] [--topics <a,b,c>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --banks {DEFAULT_BANK_DIR}");
    eprintln!("  --topics {DEFAULT_TOPICS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_DIR, QUIZ_TOPICS, RUST_LOG");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_PKG_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            print_usage();
            std::process::exit(2);
        }
    };

    tracing::info!(bank_dir = %args.bank_dir.display(), "loading question banks");
    let source = JsonBankSource::new(args.bank_dir);
    let mut services = TrainerServices::load(&source, Clock::default(), &args.topics);

    for err in services.unavailable() {
        tracing::warn!("{err}");
        eprintln!("note: {err}; topic skipped");
    }
    if services.topics().is_empty() {
        eprintln!("error: no usable topics");
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    run(&mut services, &mut lines)?;
    Ok(())
}

/// Main interaction loop: topic menu, then one quiz at a time.
fn run(
    services: &mut TrainerServices,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
    loop {
        println!();
        println!("Corporate Finance Trainer");
        let topics: Vec<TopicId> = services.topics().to_vec();
        for (i, topic) in topics.iter().enumerate() {
            println!("  {}. {topic}", i + 1);
        }
        println!("  q. quit");

        let Some(choice) = prompt("Topic> ", lines)? else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let Some(topic) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| topics.get(i))
        else {
            println!("Pick a number between 1 and {}.", topics.len());
            continue;
        };

        let trainer = services
            .trainer_mut(topic)
            .expect("listed topics are loaded");
        if !run_quiz(trainer, lines)? {
            return Ok(());
        }
    }
}

/// Run one quiz for a topic. Returns false when the user quits mid-quiz.
fn run_quiz(
    trainer: &mut TopicTrainer,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<bool> {
    let available = trainer.session().available();
    println!(
        "Topic {}: {} question(s) available.",
        trainer.topic_id(),
        available
    );

    let count = loop {
        let Some(raw) = prompt("How many questions? ", lines)? else {
            return Ok(false);
        };
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 && n <= available => break n,
            _ => println!("Enter a number between 1 and {available}."),
        }
    };

    if let Err(err) = trainer.start(count) {
        // Count was validated against the pool above; surface anyway.
        println!("Could not start quiz: {err}");
        return Ok(true);
    }

    loop {
        let (prompt_text, choices) = {
            let question = trainer
                .current_question()
                .expect("quiz loop only runs while active");
            (question.prompt().to_owned(), numbered_choices(question))
        };
        let progress = trainer.session().progress();
        println!();
        println!(
            "Question {}/{} (score {})",
            progress.answered + 1,
            progress.total,
            progress.score
        );
        println!("{prompt_text}");
        for line in &choices {
            println!("{line}");
        }

        let Some(raw) = prompt("Answer> ", lines)? else {
            return Ok(false);
        };
        let Some(choice) = raw
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| {
                trainer
                    .current_question()
                    .ok()
                    .and_then(|q| q.choice(i).map(str::to_owned))
            })
        else {
            println!("Pick one of the listed choice numbers.");
            continue;
        };

        let checked = trainer
            .check(&choice)
            .expect("check is valid while a question is on screen");
        if checked.is_correct {
            println!("Correct!");
        } else {
            println!("Incorrect. Correct answer: {}", checked.correct_choice);
        }
        if !checked.explanation.is_empty() {
            println!("  {}", checked.explanation);
        }

        if prompt("[Enter to continue] ", lines)?.is_none() {
            return Ok(false);
        }
        let outcome = trainer
            .advance()
            .expect("a checked answer is always pending here");

        if let Some(report) = outcome.report {
            print_review(&FinalReview::from_report(&report));
            trainer.restart();
            return Ok(true);
        }
    }
}

fn numbered_choices(question: &Question) -> Vec<String> {
    question
        .choices()
        .iter()
        .enumerate()
        .map(|(i, choice)| format!("  {}. {choice}", i + 1))
        .collect()
}

fn print_review(review: &FinalReview) {
    println!();
    println!(
        "Quiz finished: {} — score {}/{}",
        review.topic_id, review.score, review.total
    );
    for entry in &review.entries {
        let mark = if entry.is_correct { "✔" } else { "✘" };
        println!();
        println!("{} Q{}: {}", mark, entry.number, entry.prompt);
        println!("   your answer:    {}", entry.user_choice);
        if !entry.is_correct {
            println!("   correct answer: {}", entry.correct_choice);
        }
        if !entry.explanation.is_empty() {
            println!("   {}", entry.explanation);
        }
    }
}

/// Print `text` and read one trimmed line; `None` on EOF.
fn prompt(
    text: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_owned())),
        None => Ok(None),
    }
}
