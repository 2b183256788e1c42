use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "disc golf league scoring backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Recreate the database schema, dropping all data
    Init,
    /// Load a JSON league fixture into the database
    Import {
        /// Path to the fixture file
        file: PathBuf,
    },
    /// Print league standings
    Standings {
        league_id: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print one event's results
    Event {
        event_id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Print one resolved card
    Card {
        card_id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Persist pending initial handicaps of a league
    Commit { league_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["league", "standings", "4", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Standings {
                league_id: 4,
                json: true
            }
        );

        let cli = Cli::try_parse_from(["league", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 3000 });

        let cli = Cli::try_parse_from(["league", "import", "fixture.json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Import {
                file: PathBuf::from("fixture.json")
            }
        );
    }
}
