pub mod league;
pub mod settings;

pub use league::LeagueSettings;
pub use settings::AppConfig;
