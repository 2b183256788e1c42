use anyhow::Result;

use disc_golf_league::cli::Command;
use disc_golf_league::{
    handle_card, handle_commit, handle_event, handle_import, handle_init, handle_serve,
    handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Import { file } => handle_import(file),
        Command::Standings { league_id, json } => handle_standings(*league_id, *json),
        Command::Event { event_id, json } => handle_event(*event_id, *json),
        Command::Card { card_id, json } => handle_card(*card_id, *json),
        Command::Commit { league_id } => handle_commit(*league_id),
    }
}
