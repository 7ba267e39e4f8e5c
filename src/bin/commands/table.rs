use anyhow::Result;
use clap::Args;
use hbadmin::{AdminSession, ClusterConnector, OutputFormat};
use serde::Serialize;
use tabled::Tabled;

use super::print_output;

/// Arguments for the single-table commands
#[derive(Args)]
pub struct TableArgs {
    /// Table name
    pub table: String,
}

#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    table: String,
    check: &'static str,
    result: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ColumnRow {
    table: String,
    family: String,
}

fn print_check(row: CheckRow, output_format: OutputFormat) {
    let rows = [row];
    print_output(&rows, &rows[0], output_format, "table|check|result", |r| {
        format!("{}|{}|{}", r.table, r.check, r.result)
    });
}

pub fn run_exists<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: TableArgs,
    output_format: OutputFormat,
) -> Result<()> {
    let result = session.table_exists(&args.table)?;
    print_check(
        CheckRow {
            table: args.table,
            check: "exists",
            result,
        },
        output_format,
    );
    Ok(())
}

pub fn run_enabled<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: TableArgs,
    output_format: OutputFormat,
) -> Result<()> {
    let result = session.table_enabled(&args.table)?;
    print_check(
        CheckRow {
            table: args.table,
            check: "enabled",
            result,
        },
        output_format,
    );
    Ok(())
}

pub fn run_enable<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: TableArgs,
    output_format: OutputFormat,
) -> Result<()> {
    session.enable_table(&args.table)?;
    if output_format.is_json() {
        println!("{}", serde_json::json!({"table": args.table, "enabled": true}));
    } else {
        println!("Table '{}' enabled", args.table);
    }
    Ok(())
}

pub fn run_disable<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: TableArgs,
    output_format: OutputFormat,
) -> Result<()> {
    session.disable_table(&args.table)?;
    if output_format.is_json() {
        println!("{}", serde_json::json!({"table": args.table, "enabled": false}));
    } else {
        println!("Table '{}' disabled", args.table);
    }
    Ok(())
}

pub fn run_columns<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: TableArgs,
    output_format: OutputFormat,
) -> Result<()> {
    let families = session.get_all_columns(&args.table)?;
    let rows: Vec<ColumnRow> = families
        .iter()
        .map(|family| ColumnRow {
            table: args.table.clone(),
            family: family.clone(),
        })
        .collect();
    print_output(&rows, &families, output_format, "table|family", |r| {
        format!("{}|{}", r.table, r.family)
    });
    Ok(())
}
