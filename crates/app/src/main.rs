use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use quiz_core::model::QuizSettings;
use services::{Clock, QuizService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

mod db;
mod play;

#[derive(Parser)]
#[command(name = "quiz", version, about = "Multiple-choice quiz sessions")]
struct Args {
    /// Question catalog (JSON object keyed by subject)
    #[arg(long, env = "QUIZ_CATALOG", default_value = "data/questions.json")]
    catalog: PathBuf,

    /// SQLite database for history and results
    #[arg(long, env = "QUIZ_DB_URL", default_value = "sqlite:quiz.sqlite3")]
    db: String,

    /// Keep history and results in memory only
    #[arg(long)]
    memory: bool,

    /// Questions per session
    #[arg(long, env = "QUIZ_SESSION_SIZE", default_value_t = QuizSettings::DEFAULT_SESSION_SIZE)]
    session_size: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List subjects with playable questions
    Subjects,
    /// Play one session of a subject
    Play {
        #[arg(long)]
        subject: String,
    },
    /// Forget which questions of a subject were already served
    Reset {
        #[arg(long)]
        subject: String,
    },
    /// Show recorded results, newest first
    Leaderboard {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

async fn open_storage(args: &Args) -> anyhow::Result<Storage> {
    if args.memory {
        return Ok(Storage::in_memory());
    }
    let db_url = db::normalize_sqlite_url(&args.db);
    db::prepare_sqlite_file(&db_url)?;
    Storage::sqlite(&db_url)
        .await
        .with_context(|| format!("opening {db_url}"))
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = QuizSettings::new(args.session_size)?;
    let catalog = storage::load_catalog(&args.catalog)?;
    if catalog.is_empty() {
        tracing::warn!(path = %args.catalog.display(), "catalog has no playable questions");
    }
    let storage = open_storage(&args).await?;
    let service = QuizService::from_storage(Clock::system(), Arc::new(catalog), &storage, settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Subjects => {
            for subject in service.subjects() {
                writeln!(out, "{subject}")?;
            }
        }
        Command::Play { subject } => {
            let Some(mut quiz) = service.start_run(subject).await? else {
                writeln!(
                    out,
                    "You've completed all questions for {}! Run `quiz reset --subject {subject}` to start over.",
                    subject.to_uppercase()
                )?;
                return Ok(());
            };
            let stdin = io::stdin();
            play::play(&mut quiz, &mut stdin.lock(), &mut out)?;
            let summary = service.finish_run(&quiz).await?;
            play::print_results(&quiz, summary, &mut out)?;
        }
        Command::Reset { subject } => {
            if !service.catalog().contains_subject(subject) {
                bail!("unknown subject: {subject}");
            }
            service.reset_subject_progress(subject).await?;
            writeln!(out, "Progress for {subject} reset.")?;
        }
        Command::Leaderboard { subject, limit } => {
            let results = service.leaderboard(subject.as_deref(), *limit).await?;
            play::print_leaderboard(&results, &mut out)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
