use anyhow::Result;
use clap::Args;
use hbadmin::{AdminSession, ClusterConnector, OutputFormat};
use std::io::BufRead;
use tabled::Tabled;

use super::print_output;

/// Arguments for the Shutdown command
#[derive(Args)]
pub struct ShutdownArgs {
    /// Skip confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

#[derive(Tabled)]
struct FieldRow {
    field: &'static str,
    value: String,
}

pub fn run_version<C: ClusterConnector>(session: &AdminSession<C>, output_format: OutputFormat) {
    let version = session.hbase_version();
    if output_format.is_json() {
        println!("{}", serde_json::json!({ "version": version }));
    } else {
        println!("{}", version);
    }
}

pub fn run_status<C: ClusterConnector>(session: &AdminSession<C>, output_format: OutputFormat) {
    let status = session.status();
    let rows: Vec<FieldRow> = status
        .fields()
        .into_iter()
        .map(|(field, value)| FieldRow { field, value })
        .collect();
    print_output(&rows, &status, output_format, "field|value", |r| {
        format!("{}|{}", r.field, r.value)
    });
}

pub fn run_shutdown<C: ClusterConnector>(
    session: &AdminSession<C>,
    args: ShutdownArgs,
    output_format: OutputFormat,
) -> Result<()> {
    let stdin = std::io::stdin();
    if shutdown_confirmed(session, args, stdin.lock())? {
        if output_format.is_json() {
            println!("{}", serde_json::json!({ "shutdown": true }));
        } else {
            println!("Cluster shutdown requested");
        }
    }
    Ok(())
}

/// Ask on stderr unless `--yes` was given, then shut down; `false` when aborted
///
/// The prompt is shown for every output format, the cluster is not local state.
fn shutdown_confirmed<C: ClusterConnector, R: BufRead>(
    session: &AdminSession<C>,
    args: ShutdownArgs,
    mut input: R,
) -> Result<bool> {
    let ShutdownArgs { yes } = args;

    // Confirmation prompt
    if !yes {
        eprintln!(
            "This will shut down the whole cluster at {}",
            session.host().unwrap_or("(not connected)")
        );
        eprint!("Are you sure? [y/N] ");

        let mut answer = String::new();
        if input.read_line(&mut answer).is_err() {
            eprintln!("Aborted.");
            return Ok(false);
        }
        let answer = answer.trim().to_lowercase();
        if answer != "y" && answer != "yes" {
            eprintln!("Aborted.");
            return Ok(false);
        }
    }

    session.shutdown_cluster()?;
    Ok(true)
}
