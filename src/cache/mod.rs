mod structs;

pub use structs::ResultCache;
