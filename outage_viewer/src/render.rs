use tabled::builder::Builder;
use tabled::settings::Style;

use crate::dataset::Dataset;

pub fn markdown_table(dataset: &Dataset) -> String {
    let mut builder = Builder::default();
    builder.push_record(dataset.columns().iter().map(String::as_str));
    for row in dataset.rows() {
        builder.push_record(row);
    }
    builder.build().with(Style::markdown()).to_string()
}

pub fn bullet_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("- {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
