use std::path::{Path, PathBuf};
use std::sync::Arc;

use brand_health::assessment::{
    report, AnswerImporter, AnswerLabel, AssessmentResults, AssessmentService, AssessmentSession,
    HttpSink, ResponseSet, SectionMap, SubmissionForm, ValidationError, ValidationPolicy,
    QUESTIONNAIRE,
};
use brand_health::config::AppConfig;
use brand_health::error::AppError;
use brand_health::telemetry;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "brand-health",
    about = "Score, validate, and submit Brand Health Assessment questionnaires",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the questionnaire and the Likert answer scale
    Questions,
    /// Score a completed set of answers without submitting
    Score(ScoreArgs),
    /// Validate a full submission and post it to the assessment backend
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Answers file: CSV with question,answer rows, or a JSON mapping from
    /// question text to weight
    #[arg(long)]
    answers: PathBuf,
    /// Render the full report instead of the one-line summary
    #[arg(long)]
    report: bool,
    /// Report date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// Submission JSON file: name, email, company, contact, and a responses
    /// mapping from question text to weight
    #[arg(long)]
    input: PathBuf,
    /// Override the configured submission endpoint
    #[arg(long)]
    endpoint: Option<String>,
    /// Override the configured request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Do not require the contact number field
    #[arg(long)]
    no_contact: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Questions => {
            run_questions();
            Ok(())
        }
        Command::Score(args) => run_score(args),
        Command::Submit(args) => run_submit(args, config).await,
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn run_questions() {
    println!("Brand Health Assessment questionnaire");
    for (index, question) in QUESTIONNAIRE.iter().enumerate() {
        println!("{:2}. {question}", index + 1);
    }
    println!("\nAnswer scale");
    for answer in AnswerLabel::ordered() {
        println!("- {} ({})", answer.label(), answer.weight());
    }
}

fn load_answers(path: &Path) -> Result<ResponseSet, AppError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(AnswerImporter::from_path(path)?)
    } else {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let responses = load_answers(&args.answers)?;
    if !responses.is_complete() {
        return Err(AppError::Service(
            ValidationError::IncompleteResponses.into(),
        ));
    }

    let results = AssessmentResults::build(&responses, &SectionMap);
    if args.report {
        let date = args.date.unwrap_or_else(|| Local::now().date_naive());
        print!("{}", report::render(&results, date));
    } else {
        println!(
            "Brand health score: {}% ({}/{} points)",
            results.overall_percentage, results.overall_score, results.max_score
        );
    }
    Ok(())
}

async fn run_submit(args: SubmitArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(endpoint) = args.endpoint {
        config.submission.endpoint = endpoint;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.submission.timeout_secs = timeout_secs;
    }

    let raw = std::fs::read_to_string(&args.input)?;
    let form: SubmissionForm = serde_json::from_str(&raw)?;

    let mut session = AssessmentSession::from_form(form);
    session.confirm_contact()?;

    let policy = ValidationPolicy {
        require_contact: !args.no_contact,
        ..ValidationPolicy::default()
    };
    let sink = HttpSink::new(
        config.submission.endpoint.clone(),
        config.submission.timeout(),
    )?;
    let service = AssessmentService::new(Arc::new(sink), policy);

    info!(endpoint = %config.submission.endpoint, "posting assessment");
    let outcome = service.submit(&mut session).await?;

    println!("Thank you for your submission!");
    println!(
        "Your brand health score is: {}% ({}/{} points)",
        outcome.score.percentage, outcome.score.total, outcome.score.max
    );
    if let Some(message) = outcome.ack.message {
        println!("Backend response: {message}");
    }
    println!(
        "A detailed report will be sent to: {}",
        session.form().contact.email
    );
    Ok(())
}
