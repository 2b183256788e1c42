pub mod awards;
pub mod cards;
pub mod connection;
pub mod contestants;
pub mod events;
pub mod layouts;
pub mod leagues;
pub mod players;
pub mod repository;
pub mod scores;
pub mod setup;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use repository::{LeagueRepository, SqliteRepository};
