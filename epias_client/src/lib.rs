pub mod client;
pub mod config;
mod export;
mod ticket;
