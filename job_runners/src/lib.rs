pub mod configuration;
pub mod importer;
