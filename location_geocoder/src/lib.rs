pub mod cache;
pub mod config;
pub mod noop;
pub mod searcher;
