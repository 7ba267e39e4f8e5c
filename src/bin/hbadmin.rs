use clap::{Parser, Subcommand};
use hbadmin::*;
use tracing::{warn, Level};

mod commands;

use commands::cluster::ShutdownArgs;
use commands::table::TableArgs;
use commands::tables::TablesArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.hbadmin/hbadmin.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long, global = true)]
    debug: bool,

    /// Cluster master host, overrides the configuration file
    #[clap(short, long, global = true)]
    master: Option<String>,

    /// Coordination quorum (comma-separated), overrides the configuration file
    #[clap(short, long, global = true)]
    quorum: Option<String>,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables
    Tables(TablesArgs),

    /// Check whether a table exists
    Exists(TableArgs),

    /// Check whether a table is enabled
    Enabled(TableArgs),

    /// Enable a table
    Enable(TableArgs),

    /// Disable a table
    Disable(TableArgs),

    /// List the column families of a table
    Columns(TableArgs),

    /// Show the client library version
    Version,

    /// Shut down the whole cluster
    Shutdown(ShutdownArgs),

    /// Connect and show the connection status
    Status,

    /// Show configuration
    Config,
}

fn run_connected<C: ClusterConnector>(
    session: &AdminSession<C>,
    command: Commands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::Tables(args) => commands::tables::run(session, args, output_format),
        Commands::Exists(args) => commands::table::run_exists(session, args, output_format),
        Commands::Enabled(args) => commands::table::run_enabled(session, args, output_format),
        Commands::Enable(args) => commands::table::run_enable(session, args, output_format),
        Commands::Disable(args) => commands::table::run_disable(session, args, output_format),
        Commands::Columns(args) => commands::table::run_columns(session, args, output_format),
        Commands::Shutdown(args) => commands::cluster::run_shutdown(session, args, output_format),
        Commands::Status => {
            commands::cluster::run_status(session, output_format);
            Ok(())
        }
        // handled without a connection
        Commands::Version | Commands::Config => Ok(()),
    }
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let base_level = if cli.debug { Level::INFO } else { Level::WARN };
    if let Err(e) = logging::init(base_level) {
        eprintln!("ERROR: {}", e);
    }

    let config = match AdminConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let output_format = cli.format;

    let mut session =
        AdminSession::with_base_configuration(RestGateway::new(), config.base_configuration());

    match cli.command {
        Commands::Config => commands::config::run(&config, cli.config, output_format),
        Commands::Version => commands::cluster::run_version(&session, output_format),
        command => {
            let master = cli.master.unwrap_or_else(|| config.master.clone());
            let quorum = cli.quorum.unwrap_or_else(|| config.quorum.clone());

            match session.connect(&master, &quorum) {
                Ok(ConnectStatus::Connected) => {}
                Ok(ConnectStatus::MasterNotRunning { message }) => {
                    eprintln!("WARNING: master not running: {}", message);
                }
                Err(e) => {
                    eprintln!("ERROR: {}", e);
                    std::process::exit(1);
                }
            }

            let result = run_connected(&session, command, output_format);

            if session.connected() {
                if let Err(e) = session.disconnect() {
                    warn!("failed to disconnect: {}", e);
                }
            }

            if let Err(e) = result {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    }
}
