use std::path::PathBuf;

use clap::Parser;

use crate::dataset::{load_dataset, Dataset};
use crate::render::{bullet_list, markdown_table};

#[derive(Parser, Debug)]
#[command(
    name = "outage_viewer",
    version,
    about = "EPİAŞ Elektrik Kesintisi Verileri"
)]
pub struct Cli {
    #[arg(long, default_value = "db", help = "Directory holding the cleaned exports")]
    pub directory: PathBuf,
    #[arg(long, help = "City to list districts or outages for")]
    pub city: Option<String>,
    #[arg(long, requires = "city", help = "District to show outages for")]
    pub district: Option<String>,
}

/// Walks the city then district selection and returns what should be printed.
pub fn select(dataset: &Dataset, city: Option<&str>, district: Option<&str>) -> String {
    let Some(city) = city else {
        return format!(
            "Şehirler:\n{}\n\nLütfen bir şehir seçiniz.",
            bullet_list(&dataset.cities())
        );
    };
    let in_city = dataset.in_city(city);
    if in_city.is_empty() {
        return format!("{city} ile ilgili veri bulunamadı.");
    }

    let Some(district) = district else {
        return format!(
            "{city} ilçeleri:\n{}\n\nLütfen bir ilçe seçiniz.",
            bullet_list(&in_city.districts())
        );
    };
    let in_district = in_city.in_district(district);
    if in_district.is_empty() {
        return format!("{district} ile ilgili veri bulunamadı.");
    }

    format!(
        "{city} - {district} İçin Elektrik Kesinti Saatleri\n\n{}",
        markdown_table(&in_district)
    )
}

pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let dataset = load_dataset(&cli.directory)?;
    tracing::debug!(rows = dataset.len(), "Loaded cleaned exports");
    Ok(select(&dataset, cli.city.as_deref(), cli.district.as_deref()))
}
