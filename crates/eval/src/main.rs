//! Evaluation CLI for the advice scoring models.
//!
//! Usage:
//!     eval models
//!     eval score --personas personas.json --data-dir reference/ --model advice-commute
//!     eval sweep --personas personas.json --data-dir reference/ --trainings trainings.json

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use advisor_backend_catalog::{CatalogConfig, HttpTrainingCatalog, StaticCatalog, TrainingCatalog};
use advisor_model::{Project, Training, UserProfile};
use advisor_scoring::{list_model_ids, AdviceScore, Registry, ScoreMatrix, ScoringContext};
use advisor_store::MemoryStore;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "eval")]
#[command(about = "Evaluate advice scoring models")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Training catalog URL
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// JSON file of fixed trainings per market, used when no catalog URL is set
    #[arg(long, global = true)]
    trainings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ids of all registered models
    Models,

    /// Score personas with every model, or a single one
    Score {
        #[command(flatten)]
        inputs: Inputs,

        /// Only run this model
        #[arg(short, long)]
        model: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that models and personas are not degenerate
    Sweep {
        #[command(flatten)]
        inputs: Inputs,
    },
}

#[derive(Args)]
struct Inputs {
    /// JSON file of personas, keyed by name
    #[arg(short, long)]
    personas: PathBuf,

    /// Directory holding one `<collection>.json` file per reference collection
    #[arg(short, long)]
    data_dir: PathBuf,

    /// Date to score at (YYYY-MM-DD or RFC 3339), defaults to now
    #[arg(long)]
    now: Option<String>,
}

/// A persona as stored in the personas file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Persona {
    user: UserProfile,
    project: Project,
    #[serde(default)]
    features_enabled: BTreeSet<String>,
}

/// Trainings of one market in a fixed trainings file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketTrainings {
    rome_id: String,
    departement_id: String,
    trainings: Vec<Training>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("advisor=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let catalog: Box<dyn TrainingCatalog> = match (cli.catalog_url, cli.trainings) {
        (Some(base_url), _) => Box::new(HttpTrainingCatalog::new(CatalogConfig {
            base_url,
            ..Default::default()
        })?),
        (None, Some(path)) => Box::new(load_trainings(&path)?),
        (None, None) => Box::new(StaticCatalog::empty()),
    };

    match cli.command {
        Commands::Models => {
            for id in list_model_ids() {
                println!("{}", id);
            }
        }
        Commands::Score { inputs, model, format } => {
            run_score(&inputs, catalog.as_ref(), model, &format)?;
        }
        Commands::Sweep { inputs } => {
            run_sweep(&inputs, catalog.as_ref())?;
        }
    }

    Ok(())
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(now) = now else {
        return Ok(Utc::now());
    };
    if let Ok(date) = NaiveDate::parse_from_str(now, "%Y-%m-%d") {
        let noon = date.and_hms_opt(12, 0, 0).context("invalid time of day")?;
        return Ok(noon.and_utc());
    }
    let date = DateTime::parse_from_rfc3339(now).with_context(|| format!("invalid date {:?}", now))?;
    Ok(date.with_timezone(&Utc))
}

fn load_personas(path: &Path) -> Result<BTreeMap<String, Persona>> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_personas(&content).with_context(|| format!("parsing {}", path.display()))
}

fn parse_personas(content: &str) -> Result<BTreeMap<String, Persona>> {
    let mut personas: BTreeMap<String, Persona> = serde_json::from_str(content)?;
    for persona in personas.values_mut() {
        let features = std::mem::take(&mut persona.features_enabled);
        persona.user.features_enabled.extend(features);
    }
    if personas.is_empty() {
        bail!("no persona to score");
    }
    Ok(personas)
}

fn load_trainings(path: &Path) -> Result<StaticCatalog> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_trainings(&content).with_context(|| format!("parsing {}", path.display()))
}

fn parse_trainings(content: &str) -> Result<StaticCatalog> {
    let markets: Vec<MarketTrainings> = serde_json::from_str(content)?;
    Ok(markets
        .into_iter()
        .fold(StaticCatalog::empty(), |catalog, market| {
            catalog.with_trainings(market.rome_id, market.departement_id, market.trainings)
        }))
}

struct Loaded {
    personas: BTreeMap<String, Persona>,
    store: MemoryStore,
    now: DateTime<Utc>,
}

fn load(inputs: &Inputs) -> Result<Loaded> {
    let personas = load_personas(&inputs.personas)?;
    let store = MemoryStore::from_dir(&inputs.data_dir)
        .with_context(|| format!("loading reference data from {}", inputs.data_dir.display()))?;
    let now = parse_now(inputs.now.as_deref())?;
    tracing::info!(personas = personas.len(), %now, "Loaded inputs");
    Ok(Loaded { personas, store, now })
}

fn run_score(inputs: &Inputs, catalog: &dyn TrainingCatalog, model: Option<String>, format: &str) -> Result<()> {
    let Loaded { personas, store, now } = load(inputs)?;
    let model_ids: Vec<String> = match model {
        Some(id) => vec![id],
        None => list_model_ids().into_iter().collect(),
    };

    let registry = Registry::new();
    let mut results: BTreeMap<&str, Vec<AdviceScore>> = BTreeMap::new();
    for (name, persona) in &personas {
        let context = ScoringContext::new(&persona.user, &persona.project, &store, catalog).with_now(now);
        results.insert(name.as_str(), registry.score_project(&context, &model_ids)?);
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let id_width = model_ids.iter().map(String::len).max().unwrap_or(0);
    print!("{:id_width$}", "");
    for name in results.keys() {
        print!("  {}", name);
    }
    println!();
    for (index, id) in model_ids.iter().enumerate() {
        print!("{:id_width$}", id);
        for (name, scores) in &results {
            let cell = match scores.get(index) {
                Some(AdviceScore { error: Some(_), .. }) => "ERR".to_string(),
                Some(score) => score.score.to_string(),
                None => "-".to_string(),
            };
            print!("  {:>width$}", cell, width = name.len());
        }
        println!();
    }

    for (name, scores) in &results {
        for score in scores {
            if let Some(error) = &score.error {
                println!("\n{} / {}: {}", name, score.advice_id, error);
            }
        }
    }

    Ok(())
}

fn run_sweep(inputs: &Inputs, catalog: &dyn TrainingCatalog) -> Result<()> {
    let Loaded { personas, store, now } = load(inputs)?;
    let registry = Registry::new();
    let mut matrix = ScoreMatrix::new(registry.list_model_ids());
    for (name, persona) in &personas {
        let context = ScoringContext::new(&persona.user, &persona.project, &store, catalog).with_now(now);
        matrix.record(name.as_str(), &registry, &context)?;
    }

    let violations = matrix.violations(&registry)?;
    println!(
        "Swept {} models over {} personas",
        matrix.model_ids.len(),
        matrix.rows.len()
    );
    if violations.is_empty() {
        println!("OK");
        return Ok(());
    }

    for violation in &violations {
        println!("FAILED: {}", violation);
    }
    std::process::exit(1);
}
