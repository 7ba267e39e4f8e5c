use anyhow::Result;
use clap::Args;
use hbadmin::{table_name, AdminSession, ClusterConnector, OutputFormat};
use tabled::Tabled;

use super::print_output;

/// Arguments for the Tables command
#[derive(Args)]
pub struct TablesArgs {
    /// Also show the column families of each table
    #[clap(long)]
    pub families: bool,
}

#[derive(Tabled)]
struct TableRow {
    name: String,
    families: String,
}

#[derive(Tabled)]
struct TableNameRow {
    name: String,
}

pub fn run<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: TablesArgs,
    output_format: OutputFormat,
) -> Result<()> {
    let TablesArgs { families } = args;

    if !families {
        let names = session.list_tables()?;
        let rows: Vec<TableNameRow> = names
            .iter()
            .map(|name| TableNameRow { name: name.clone() })
            .collect();
        print_output(&rows, &names, output_format, "name", |r| r.name.clone());
        return Ok(());
    }

    let descriptors = session.describe_tables()?;
    let rows: Vec<TableRow> = descriptors
        .iter()
        .map(|d| TableRow {
            name: table_name(d).to_string(),
            families: d.families().join(","),
        })
        .collect();
    print_output(&rows, &descriptors, output_format, "name|families", |r| {
        format!("{}|{}", r.name, r.families)
    });
    Ok(())
}
