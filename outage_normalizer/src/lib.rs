mod aggregation;
mod cleaning;
pub mod config;
pub mod normalizer;
mod raw;
mod writer;
