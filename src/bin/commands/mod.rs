pub mod cluster;
pub mod config;
pub mod table;
pub mod tables;

use hbadmin::OutputFormat;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Print `rows` as a table or pipe-separated values, or `json` for the JSON formats
pub(crate) fn print_output<T, J, F>(
    rows: &[T],
    json: &J,
    output_format: OutputFormat,
    psv_header: &str,
    psv_row: F,
) where
    T: Tabled,
    J: Serialize + ?Sized,
    F: Fn(&T) -> String,
{
    match output_format {
        OutputFormat::Table => {
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
        OutputFormat::Markdown => {
            println!("{}", Table::new(rows).with(Style::markdown()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty | OutputFormat::JsonLine => {
            match output_format.to_json(json) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
            }
        }
        OutputFormat::Psv => {
            println!("{}", psv_header);
            for row in rows {
                println!("{}", psv_row(row));
            }
        }
    }
}
