use crate::infra::load_questions;
use agent_quiz::config::AppConfig;
use agent_quiz::error::AppError;
use agent_quiz::quiz::{
    classifier, profiles, AnswerSet, Axis, OptionLabel, Question, QuestionSet, QuizEvaluator,
    QuizResult,
};
use agent_quiz::telemetry::{self, LogOutput};
use clap::Args;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

const PROGRESS_STEPS: usize = 20;
const MAX_BAR_WIDTH: i64 = 40;

#[derive(Args, Debug, Default)]
pub(crate) struct TakeArgs {
    /// Question dataset CSV (defaults to QUIZ_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Show the result immediately, skipping the progress bar
    #[arg(long)]
    pub(crate) no_delay: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON object mapping 0-based question index to option label, e.g. {"0": "A"}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Question dataset CSV (defaults to QUIZ_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn prepare(dataset: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dataset) = dataset {
        config.quiz.dataset_path = dataset;
    }
    telemetry::init(&config.telemetry, LogOutput::Stderr)?;
    Ok(config)
}

pub(crate) fn run_take(args: TakeArgs) -> Result<(), AppError> {
    let config = prepare(args.dataset)?;
    let questions = load_questions(&config.quiz.dataset_path)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    writeln!(out, "Agent role quiz: {} questions", questions.len())?;
    writeln!(out, "Answer with the letter of the option that fits you best.\n")?;

    let answers = ask_questions(&questions, &mut input, &mut out)?;
    let result = QuizEvaluator::default().evaluate(&questions, &answers)?;

    if !args.no_delay {
        reveal(config.quiz.reveal_delay, &mut out)?;
    }
    render_result(&mut out, &result)?;
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = prepare(args.dataset)?;
    let questions = load_questions(&config.quiz.dataset_path)?;

    let raw = std::fs::read_to_string(&args.answers)?;
    let answers = parse_answer_file(&raw, &questions)?;
    let result = QuizEvaluator::default().evaluate(&questions, &answers)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let body = serde_json::to_string_pretty(&result)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        writeln!(out, "{body}")?;
    } else {
        render_result(&mut out, &result)?;
    }
    Ok(())
}

pub(crate) fn run_profiles() -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (code, profile) in profiles::all() {
        writeln!(out, "{code}  {}", profile.title)?;
        writeln!(out, "      {}", profile.description)?;
    }
    writeln!(
        out,
        "\nAny other code: {}",
        profiles::FALLBACK_PROFILE.title
    )?;
    Ok(())
}

fn parse_answer_file(raw: &str, questions: &QuestionSet) -> Result<AnswerSet, AppError> {
    let labels: BTreeMap<usize, String> = serde_json::from_str(raw)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(AnswerSet::from_labels(questions, labels)?)
}

/// Prompts every question in order. Stops early at end of input, leaving the
/// remaining questions unanswered.
pub(crate) fn ask_questions<R, W>(
    questions: &QuestionSet,
    input: &mut R,
    out: &mut W,
) -> io::Result<AnswerSet>
where
    R: BufRead,
    W: Write,
{
    let mut answers = AnswerSet::new();

    for (index, question) in questions.questions().iter().enumerate() {
        writeln!(out, "Q{}. {}", index + 1, question.text)?;
        for option in &question.options {
            writeln!(out, "  {}) {}", option.label, option.text)?;
        }

        match read_choice(question, input, out)? {
            Some(label) => {
                if let Some(option) = question.option(label) {
                    answers.record(index, option.score_expression.as_str());
                }
            }
            None => break,
        }
        writeln!(out)?;
    }

    Ok(answers)
}

fn read_choice<R, W>(question: &Question, input: &mut R, out: &mut W) -> io::Result<Option<OptionLabel>>
where
    R: BufRead,
    W: Write,
{
    let offered = question
        .options
        .iter()
        .map(|option| option.label.to_string())
        .collect::<Vec<_>>()
        .join("/");

    loop {
        write!(out, "Your answer [{offered}]: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        match OptionLabel::parse(&line) {
            Some(label) if question.option(label).is_some() => return Ok(Some(label)),
            _ => writeln!(out, "Please choose one of {offered}.")?,
        }
    }
}

/// Cosmetic progress bar spread over `delay`.
pub(crate) fn reveal<W: Write>(delay: Duration, out: &mut W) -> io::Result<()> {
    if delay.is_zero() {
        return Ok(());
    }

    let step = delay / PROGRESS_STEPS as u32;
    for filled in 1..=PROGRESS_STEPS {
        write!(
            out,
            "\rAnalyzing [{:<width$}] {:>3}%",
            "#".repeat(filled),
            filled * 100 / PROGRESS_STEPS,
            width = PROGRESS_STEPS
        )?;
        out.flush()?;
        std::thread::sleep(step);
    }
    writeln!(out)
}

pub(crate) fn render_result<W: Write>(out: &mut W, result: &QuizResult) -> io::Result<()> {
    writeln!(out, "Analysis complete!\n")?;

    writeln!(out, "Best-fit role: {}", result.role)?;
    writeln!(out, "  {}", result.role_profile.summary)?;
    writeln!(
        out,
        "  Agents to try: {}",
        result.role_profile.example_agents.join(", ")
    )?;

    writeln!(
        out,
        "\nPlaystyle code: {} ({})",
        result.type_code, result.profile.title
    )?;
    writeln!(out, "  {}", result.profile.description)?;
    if let Some(advice) = result.profile.advice {
        writeln!(out, "  Advice: {advice}")?;
    }

    writeln!(out, "\nRole scores")?;
    for entry in &result.role_ranking {
        let width = entry.score.clamp(0, MAX_BAR_WIDTH) as usize;
        writeln!(
            out,
            "  {:<10} {:>4} {}",
            entry.role,
            entry.score,
            "#".repeat(width)
        )?;
    }

    writeln!(out, "\nAxes")?;
    for axis in Axis::ordered() {
        let letter = classifier::axis_letter(&result.tally, axis);
        let leaning = if letter == axis.high_letter() {
            axis.high_label()
        } else {
            axis.low_label()
        };
        writeln!(
            out,
            "  {:<17} {} {:<10} ({})",
            axis.label(),
            letter,
            leaning,
            result.tally.axis_score(axis)
        )?;
    }

    writeln!(out, "\nFull tally")?;
    for (category, points) in result.tally.iter() {
        writeln!(out, "  {category}: {points}")?;
    }
    Ok(())
}
