//! Party Skill Simulation
//!
//! Spawns actors, trains and decays their skills at random, and keeps a
//! party's shared skills in sync with its leader every tick. Prints the
//! resulting skill tables as text or JSON.

use clap::Parser;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use skill_sheet::core::config::SimulationConfig;
use skill_sheet::core::error::Result;
use skill_sheet::core::types::SkillId;
use skill_sheet::party::{Party, Roster};
use skill_sheet::skills::{SkillCatalog, SkillSheet, SkillTable};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Party Skill Simulation - train actors and share skills within a party
#[derive(Parser, Debug)]
#[command(name = "party_sim")]
#[command(about = "Simulate skill training and party skill sharing")]
struct Args {
    /// Simulation config file (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skill catalog file, overriding the config
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Number of actors, overriding the config
    #[arg(long)]
    actors: Option<usize>,

    /// Number of ticks, overriding the config
    #[arg(long)]
    ticks: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct ActorReport {
    actor: usize,
    role: &'static str,
    base: SkillTable,
    shared: SkillTable,
    combined: SkillTable,
}

#[derive(Serialize)]
struct SimulationReport {
    seed: u64,
    ticks: u64,
    actors: Vec<ActorReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skill_sheet=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(catalog) = args.catalog {
        config.catalog_path = catalog;
    }
    if let Some(actors) = args.actors {
        config.actors = actors;
        config.party_size = config.party_size.min(actors);
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let catalog = SkillCatalog::load(&config.catalog_path)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        actors = config.actors,
        party_size = config.party_size,
        ticks = config.ticks,
        "Starting party skill simulation"
    );

    let (roster, party) = run_simulation(&config, &catalog, seed)?;

    let report = build_report(&roster, &party, seed, config.ticks);
    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report, &catalog);
    }

    Ok(())
}

fn run_simulation(config: &SimulationConfig, catalog: &SkillCatalog, seed: u64) -> Result<(Roster, Party)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let skill_ids: Vec<SkillId> = catalog.ids().collect();

    let mut roster = Roster::new();
    for _ in 0..config.actors {
        roster.spawn(SkillSheet::new());
    }

    let actors = roster.actors().to_vec();
    let mut party = Party::new(actors[0]);
    for &follower in &actors[1..config.party_size] {
        party.add_follower(follower)?;
    }

    for tick in 0..config.ticks {
        for &actor in &actors {
            let Some(sheet) = roster.get_mut(actor) else {
                continue;
            };

            if rng.gen::<f32>() < config.train_chance {
                if let Some(&id) = skill_ids.choose(&mut rng) {
                    sheet.train(id);
                }
            }

            if rng.gen::<f32>() < config.decay_chance {
                let trained = sheet.base().skill_ids();
                if let Some(&id) = trained.choose(&mut rng) {
                    sheet.untrain(id);
                }
            }
        }

        roster.refresh_party(&party, catalog)?;

        if tick % 25 == 0 {
            let leader_levels = roster
                .get(party.leader())
                .map_or(0, |sheet| sheet.base().total_levels());
            tracing::debug!(tick, leader_levels, "Simulation progress");
        }
    }

    Ok((roster, party))
}

fn build_report(roster: &Roster, party: &Party, seed: u64, ticks: u64) -> SimulationReport {
    let actors = roster
        .actors()
        .iter()
        .enumerate()
        .filter_map(|(idx, &actor)| {
            let sheet = roster.get(actor)?;
            let role = if actor == party.leader() {
                "leader"
            } else if party.contains(actor) {
                "follower"
            } else {
                "solo"
            };
            Some(ActorReport {
                actor: idx,
                role,
                base: sheet.base().clone(),
                shared: sheet.shared().clone(),
                combined: sheet.combined().clone(),
            })
        })
        .collect();

    SimulationReport { seed, ticks, actors }
}

fn format_table(table: &SkillTable, catalog: &SkillCatalog) -> String {
    if table.is_empty() {
        return "-".to_string();
    }
    table
        .iter()
        .map(|skill| format!("{} {}", catalog.name_of(skill.id), skill.level))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_text(report: &SimulationReport, catalog: &SkillCatalog) {
    println!("=== PARTY SKILLS (seed {}, {} ticks) ===", report.seed, report.ticks);
    for actor in &report.actors {
        println!();
        println!(
            "Actor {} [{}] - {} skills, {} total levels",
            actor.actor,
            actor.role,
            actor.combined.count(),
            actor.combined.total_levels()
        );
        println!("  base:     {}", format_table(&actor.base, catalog));
        println!("  shared:   {}", format_table(&actor.shared, catalog));
        println!("  combined: {}", format_table(&actor.combined, catalog));
    }
}
