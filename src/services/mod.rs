pub mod import;
pub mod scoring;
pub mod server;
