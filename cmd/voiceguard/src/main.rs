//! voiceguard - Speaker enrollment and verification from the command line.
//!
//! Works on precomputed speaker embeddings (JSON arrays of 192 floats);
//! microphone capture and the embedding model itself live outside this
//! tool. Identities are kept in a human-editable JSON store next to a
//! small policy config.

mod config;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::AppConfig;
use voiceguard_engine::{parse_birth_date, Engine, Policy};
use voiceguard_identity::{EnrollmentInfo, IdentityStore, JsonStore};

/// Speaker enrollment and verification against stored voiceprints.
#[derive(Parser)]
#[command(name = "voiceguard")]
#[command(about = "Speaker enrollment and verification against stored voiceprints")]
#[command(version)]
struct Cli {
    /// Identity store file
    #[arg(long, global = true, default_value = "users.json")]
    db: PathBuf,

    /// Config file
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enroll a new speaker from a precomputed embedding
    Enroll {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: String,

        /// JSON file holding the embedding (array of 192 floats)
        #[arg(long)]
        embedding: PathBuf,
    },
    /// Verify a probe embedding against all enrolled speakers
    Verify {
        /// JSON file holding the probe embedding
        #[arg(long)]
        embedding: PathBuf,

        /// Override the configured similarity threshold for this attempt
        #[arg(long)]
        threshold: Option<f32>,
    },
    /// List enrolled speakers
    List,
    /// Delete an enrolled speaker by ID
    Delete {
        id: u64,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Set the similarity threshold (0 to 1)
    SetThreshold {
        value: f32,
    },
    /// Set the prompt scripts shown during recording
    SetScripts {
        #[arg(long)]
        registration: Option<String>,

        #[arg(long)]
        verification: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    }

    match &cli.command {
        Commands::Enroll {
            first_name,
            last_name,
            dob,
            embedding,
        } => enroll(&cli, first_name, last_name, dob, embedding),
        Commands::Verify {
            embedding,
            threshold,
        } => verify(&cli, embedding, *threshold),
        Commands::List => list(&cli),
        Commands::Delete { id } => delete(&cli, *id),
        Commands::Config { command } => run_config(&cli, command),
    }
}

/// A corrupt store aborts here rather than silently starting empty; the
/// file is hand-editable and losing it quietly would be worse.
fn open_engine(cli: &Cli) -> Result<Engine> {
    let store = JsonStore::open(&cli.db)
        .with_context(|| format!("opening identity store {}", cli.db.display()))?;
    Ok(Engine::new(Box::new(store)))
}

fn read_embedding(path: &PathBuf) -> Result<Vec<f32>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading embedding {}", path.display()))?;
    let embedding: Vec<f32> = serde_json::from_str(&data)
        .with_context(|| format!("parsing embedding {}", path.display()))?;
    Ok(embedding)
}

fn enroll(cli: &Cli, first_name: &str, last_name: &str, dob: &str, embedding: &PathBuf) -> Result<()> {
    let engine = open_engine(cli)?;
    let info = EnrollmentInfo {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth: parse_birth_date(dob)?,
    };
    let embedding = read_embedding(embedding)?;

    let record = engine.enroll(info, embedding)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Enrolled {} (id {})", record.full_name(), record.id);
    }
    Ok(())
}

fn verify(cli: &Cli, embedding: &PathBuf, threshold: Option<f32>) -> Result<()> {
    let engine = open_engine(cli)?;
    let cfg = AppConfig::load(&cli.config)?;
    let policy = Policy::new(threshold.unwrap_or(cfg.similarity_threshold))?;
    let probe = read_embedding(embedding)?;

    let result = engine.verify(&probe, policy)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match (&result.identity, &result.candidate) {
        (Some(identity), _) => {
            println!("Match found!");
            println!("Name: {}", identity.full_name());
            println!("DOB: {}", identity.date_of_birth);
            println!("Similarity: {:.2}", result.score);
        }
        (None, Some(candidate)) => {
            println!("No matching user found.");
            println!(
                "Best similarity: {:.2} (threshold {:.2})",
                result.score,
                policy.threshold()
            );
            println!("Closest: {}", candidate.full_name());
        }
        (None, None) => {
            println!("No registered users found.");
        }
    }
    Ok(())
}

fn list(cli: &Cli) -> Result<()> {
    let engine = open_engine(cli)?;
    let records = engine.store().all()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No users registered yet.");
        return Ok(());
    }
    for r in &records {
        println!("{:>4}  {:<30} {}", r.id, r.full_name(), r.date_of_birth);
    }
    Ok(())
}

fn delete(cli: &Cli, id: u64) -> Result<()> {
    let engine = open_engine(cli)?;
    if engine.store().remove(id)? {
        println!("Deleted user {id}.");
    } else {
        println!("User {id} not found - nothing deleted.");
    }
    Ok(())
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> Result<()> {
    let mut cfg = AppConfig::load(&cli.config)?;

    match command {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        ConfigCommands::SetThreshold { value } => {
            // Same validation the engine applies at verification time.
            Policy::new(*value)?;
            cfg.similarity_threshold = *value;
            cfg.save(&cli.config)?;
            println!("Threshold set to {value}.");
        }
        ConfigCommands::SetScripts {
            registration,
            verification,
        } => {
            if let Some(s) = registration {
                cfg.registration_script = s.clone();
            }
            if let Some(s) = verification {
                cfg.verification_script = s.clone();
            }
            cfg.save(&cli.config)?;
            println!("Scripts updated.");
        }
    }
    Ok(())
}
