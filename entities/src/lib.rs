pub mod export;
pub mod locations;
pub mod outages;
