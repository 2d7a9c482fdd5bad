use std::io::{self, BufRead};
use std::time::Instant;

use clap::{Parser, Subcommand};
use neonest::app::{App, AppError};
use neonest::catalog::toys::{AgeCategory, ToyRecord};
use neonest::config::{ClientConfig, ConfigError, normalize_base_url};
use neonest::net::types::{MessageRole, Role, SignupRequest};
use neonest::services::chat::SubmitOutcome;
use neonest::services::signup::SignupError;
use neonest::state::milestones::{MilestoneError, NO_COMPLETED_MONTH};
use neonest::state::ui::QUICK_QUESTIONS;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Signup(#[from] SignupError),
    #[error(transparent)]
    Milestone(#[from] MilestoneError),
    #[error("expected MONTH:MILESTONE, got {0:?}")]
    InvalidMilestoneArg(String),
    #[error("no quick question at index {0}")]
    UnknownQuickQuestion(usize),
    #[error("age must be zero or more months, got {0}")]
    NegativeAge(i64),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "neonest", about = "NeoNest parenting assistant client")]
struct Cli {
    #[arg(long, env = "NEONEST_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "NEONEST_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with a persona. Reads one message per line from stdin when no
    /// messages are given.
    Chat {
        #[arg(long, default_value_t = Role::Pediatrician)]
        role: Role,
        messages: Vec<String>,
    },
    /// Send one of the canned quick questions.
    Quick {
        #[arg(long)]
        index: usize,
        #[arg(long, default_value_t = Role::Pediatrician)]
        role: Role,
    },
    Roles,
    QuickQuestions,
    /// Browse the toy catalog.
    Toys {
        #[arg(long, conflicts_with = "age")]
        category: Option<AgeCategory>,
        /// Baby's age in months; picks the matching category.
        #[arg(long, allow_negative_numbers = true)]
        age: Option<i64>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    /// Tick milestones and show progress.
    Milestones {
        /// `MONTH:MILESTONE`, repeatable.
        #[arg(long = "done")]
        done: Vec<String>,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("neonest: .env not loaded: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = normalize_base_url(&base_url)?;
    }
    if let Some(token) = cli.token.filter(|t| !t.trim().is_empty()) {
        config.token = Some(token);
    }

    let mut app = App::from_config(&config)?;
    match cli.command {
        Command::Chat { role, messages } => run_chat(&mut app, role, messages).await,
        Command::Quick { index, role } => run_quick(&mut app, role, index).await,
        Command::Roles => {
            for role in Role::ALL {
                println!("{:<14} {}", role.as_str(), role.label());
            }
            Ok(())
        }
        Command::QuickQuestions => {
            for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
                println!("{i}: {question}");
            }
            Ok(())
        }
        Command::Toys { category, age, search, skills } => run_toys(&app, category, age, &search, &skills),
        Command::Milestones { done } => run_milestones(&mut app, &done),
        Command::Signup { name, email, password } => run_signup(&mut app, SignupRequest { name, email, password }).await,
    }
}

// =============================================================================
// CHAT
// =============================================================================

async fn run_chat(app: &mut App, role: Role, messages: Vec<String>) -> Result<(), CliError> {
    app.open_role(role, Instant::now()).await;

    let messages = if messages.is_empty() {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        messages
    };

    for message in messages {
        app.screen.input = message;
        settle(app.submit().await).await;
    }
    print_transcript(app);
    Ok(())
}

async fn run_quick(app: &mut App, role: Role, index: usize) -> Result<(), CliError> {
    let question = QUICK_QUESTIONS
        .get(index)
        .ok_or(CliError::UnknownQuickQuestion(index))?;
    app.open_role(role, Instant::now()).await;
    settle(app.submit_quick_question(question).await).await;
    print_transcript(app);
    Ok(())
}

/// Wait for a background save so the process does not exit mid-request.
async fn settle(outcome: SubmitOutcome) {
    if let SubmitOutcome::Replied { persist: Some(handle), .. } = outcome {
        if let Err(e) = handle.await {
            warn!(error = %e, "chat: save task panicked");
        }
    }
}

fn print_transcript(app: &App) {
    for message in app.transcript() {
        let speaker = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => app.screen.role.label(),
            MessageRole::System => "!",
        };
        println!("[{speaker}] {}", message.content);
    }
}

// =============================================================================
// TOYS
// =============================================================================

fn run_toys(
    app: &App,
    category: Option<AgeCategory>,
    age: Option<i64>,
    search: &str,
    skills: &[String],
) -> Result<(), CliError> {
    let category = match (category, age) {
        (Some(category), _) => category,
        (None, Some(months)) => AgeCategory::for_age(months).ok_or(CliError::NegativeAge(months))?,
        (None, None) => AgeCategory::All,
    };

    println!("{} ({category})", category.label());
    println!("{}", category.tip());
    println!();
    for toy in app.catalog.grid(category, search, skills) {
        print_toy(toy);
    }
    Ok(())
}

fn print_toy(toy: &ToyRecord) {
    println!("#{:<3} {:<28} {:>4}  {}", toy.id, toy.name, toy.age, toy.skills.join(", "));
}

// =============================================================================
// MILESTONES
// =============================================================================

fn run_milestones(app: &mut App, done: &[String]) -> Result<(), CliError> {
    for raw in done {
        let (month, milestone) = parse_done(raw)?;
        app.milestones.toggle(month, milestone)?;
    }

    let months: Vec<u32> = app.milestones.months().collect();
    for month in months {
        let (checked, total) = app.milestones.month_progress(month).unwrap_or_default();
        println!("Month {month}: {checked}/{total}");
        for milestone in app.milestones.milestones_for(month) {
            let mark = if app.milestones.is_completed(month, milestone) { "x" } else { " " };
            println!("  [{mark}] {milestone}");
        }
        for toy in app.suggested_toys(month) {
            println!("  suggested: {}", toy.name);
        }
    }

    match app.milestones.latest_completed_month() {
        NO_COMPLETED_MONTH => println!("No month completed yet."),
        month => println!("Latest completed month: {month}"),
    }
    Ok(())
}

fn parse_done(raw: &str) -> Result<(u32, &str), CliError> {
    let invalid = || CliError::InvalidMilestoneArg(raw.to_string());
    let (month, milestone) = raw.split_once(':').ok_or_else(invalid)?;
    let month = month.trim().parse().map_err(|_| invalid())?;
    Ok((month, milestone.trim()))
}

// =============================================================================
// SIGNUP
// =============================================================================

async fn run_signup(app: &mut App, request: SignupRequest) -> Result<(), CliError> {
    match app.signup(&request).await {
        Ok(response) => {
            println!("Welcome, {}!", response.new_user.name);
            println!("token: {}", response.token);
            Ok(())
        }
        Err(SignupError::Validation(errors)) => {
            for error in &errors {
                eprintln!("{:?}: {}", error.field, error.message);
            }
            Err(SignupError::Validation(errors).into())
        }
        Err(SignupError::EmailExists(message)) => {
            eprintln!("{message}. Log in with that email instead.");
            Err(SignupError::EmailExists(message).into())
        }
        Err(e) => Err(e.into()),
    }
}
