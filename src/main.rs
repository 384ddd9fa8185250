//! Headless Realm Runner
//!
//! Resets a realm on generated terrain, runs it with idle players and prints
//! per-tick population plus a final snapshot summary as JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ahash::AHashMap;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use realm_core::core::config::RealmConfig;
use realm_core::core::error::Result;
use realm_core::core::types::EntityId;
use realm_core::datastore::schema::TableKind;
use realm_core::entity::entity::Action;
use realm_core::snapshot::{GameStateGenerator, Subject};
use realm_core::world::terrain::{FractalTerrain, RawTerrain};
use realm_core::{Realm, StepSummary};

/// Headless Realm Runner - step a realm and report what happened
#[derive(Parser, Debug)]
#[command(name = "realm-sim")]
#[command(about = "Run a headless realm and print per-tick summaries as JSON")]
struct Args {
    /// TOML config file; defaults are used for missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Seed override
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct SnapshotSummary {
    tick: u64,
    alive_agents: Vec<EntityId>,
    entity_rows: usize,
    item_rows: usize,
    event_rows: usize,
    events_per_agent: BTreeMap<EntityId, usize>,
}

#[derive(Serialize)]
struct RunReport {
    seed: u64,
    steps: Vec<StepSummary>,
    snapshot: SnapshotSummary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("realm_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RealmConfig::load(path)?,
        None => RealmConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let size = config.map.size;
    let seed = config.seed;
    let mut terrain_rng = ChaCha8Rng::seed_from_u64(seed);
    let raw = RawTerrain::noise(size, &mut terrain_rng);

    let mut realm = Realm::new(config)?;
    realm.reset(&raw, &FractalTerrain)?;
    let generator = GameStateGenerator::new(&realm);

    let idle: AHashMap<EntityId, Action> = AHashMap::new();
    let mut steps = Vec::with_capacity(args.ticks as usize);
    for _ in 0..args.ticks {
        steps.push(realm.step(&idle));
    }

    let obs: BTreeMap<EntityId, ()> = BTreeMap::new();
    let state = generator.generate(&realm, obs);
    let subjects: Vec<Subject> = state.alive_agents().iter().map(|id| Subject::single(*id)).collect();
    let counts = state.par_evaluate(&subjects, |view| view.event().len());
    let events_per_agent = subjects
        .iter()
        .zip(counts)
        .filter_map(|(subject, n)| subject.agents().first().map(|id| (*id, n)))
        .collect();

    let report = RunReport {
        seed,
        steps,
        snapshot: SnapshotSummary {
            tick: state.tick(),
            alive_agents: state.alive_agents().iter().copied().collect(),
            entity_rows: state.table(TableKind::Entity).len(),
            item_rows: state.table(TableKind::Item).len(),
            event_rows: state.table(TableKind::Event).len(),
            events_per_agent,
        },
    };

    tracing::info!("Finished {} ticks", args.ticks);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize report: {}", e),
    }
    Ok(())
}
