pub mod geocoding;
pub mod import_outages;
