pub mod aggregator;
pub mod domains;
pub mod filter_engine;
pub mod format;
