pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod scoring;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;

use crate::cache::ResultCache;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::SqliteRepository;
use crate::scoring::{EventResult, Standings};
use crate::services::import::ImportService;
use crate::services::scoring::{CardView, ScoringService};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::reset_schema(&mut conn)?;
    ResultCache::new(&config.cache_dir)?.clear()?;
    println!("Initialized {}", config.database_path);
    Ok(())
}

pub fn handle_import(file: &Path) -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database_path)?;
    let cache = ResultCache::new(&config.cache_dir)?;
    let summary = ImportService::new(pool, config, Some(cache)).run(file)?;
    println!(
        "Imported {} leagues, {} events, {} cards",
        summary.leagues, summary.events, summary.cards
    );
    Ok(())
}

pub fn handle_standings(league_id: i64, json: bool) -> Result<()> {
    let standings = scoring_service()?.standings(league_id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else {
        print_standings(&standings);
    }
    Ok(())
}

pub fn handle_event(event_id: i64, json: bool) -> Result<()> {
    let result = scoring_service()?.event_result(event_id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_event(&result);
    }
    Ok(())
}

pub fn handle_card(card_id: i64, json: bool) -> Result<()> {
    let view = scoring_service()?.card_view(card_id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_card(&view);
    }
    Ok(())
}

pub fn handle_commit(league_id: i64) -> Result<()> {
    let written = scoring_service()?.commit(league_id)?;
    println!("League {}: {} initial handicaps stored", league_id, written);
    Ok(())
}

fn scoring_service() -> Result<ScoringService<SqliteRepository>> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database_path)?;
    let cache = ResultCache::new(&config.cache_dir)?;
    Ok(ScoringService::new(SqliteRepository::new(pool), Some(cache)))
}

fn render_handicap(handicap: Option<f64>) -> String {
    handicap.map(|h| format!("{:.2}", h)).unwrap_or_else(|| "-".to_string())
}

fn print_standings(standings: &Standings) {
    println!("{:>4}  {:<24} {:>6} {:>8} {:>7} {:>7}", "Rank", "Player", "Points", "HC", "Events", "Rounds");
    for row in &standings.rows {
        let name = if row.valid_hc { row.name.clone() } else { format!("{}*", row.name) };
        println!(
            "{:>4}  {:<24} {:>6} {:>8} {:>7} {:>7}",
            row.rank,
            name,
            row.points,
            render_handicap(row.handicap),
            row.events_attended,
            row.rounds_played
        );
    }
}

fn print_event(result: &EventResult) {
    println!(
        "{} ({}, {} rounds)",
        result.name.as_deref().unwrap_or("Event"),
        result.date.format("%a %b %d, %Y"),
        result.rounds
    );
    println!("{:>4}  {:>10} {:>7} {:>8} {:>8} {:>6}", "Rank", "Contestant", "Scratch", "HC score", "HC", "Points");
    for entry in &result.entries {
        println!(
            "{:>4}  {:>10} {:>7} {:>8} {:>8} {:>6}",
            entry.rank,
            entry.contestant_id,
            entry.scratch_score,
            entry.handicap_score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            render_handicap(entry.handicap),
            entry.points_earned.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
        );
    }
}

fn print_card(view: &CardView) {
    println!("Card {} - {} ({})", view.result.card_id, view.event_name, view.date);
    println!("Par {}", view.result.par);
    for (entry, name) in view.result.entries.iter().zip(&view.players) {
        println!("  {:<24} {}", name, entry.outcome);
    }
}
