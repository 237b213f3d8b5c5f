use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use seniordash::api::{AppConfig, run_http_server, select_customer};
use seniordash::core::{Dataset, compare_spending, export_file_name, export_rows, write_export};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_PATH: &str = "data/customers.csv";

#[derive(Parser, Debug)]
#[command(
    name = "seniordash",
    about = "Senior customer finance dashboard with savings and deposit suggestions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = DEFAULT_DATA_PATH, help = "Customer CSV file")]
        data: PathBuf,
    },
    /// Write one customer's analysis CSV without starting the server
    Export {
        #[arg(long, help = "Customer name to analyse")]
        name: String,
        #[arg(long, default_value = DEFAULT_DATA_PATH, help = "Customer CSV file")]
        data: PathBuf,
        #[arg(long, default_value = ".", help = "Directory for <name>_분석.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port, data } => {
            if let Err(e) = run_http_server(port, AppConfig { data_path: data }).await {
                error!("server error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Command::Export { name, data, out } => match run_export(&name, &data, &out) {
            Ok(path) => {
                info!(path = %path.display(), "analysis exported");
                ExitCode::SUCCESS
            }
            Err(msg) => {
                error!("{msg}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_export(name: &str, data: &Path, out: &Path) -> Result<PathBuf, String> {
    let dataset = Dataset::load(data)
        .map_err(|e| format!("failed to load {}: {e}", data.display()))?;
    let customer = select_customer(&dataset, name).map_err(|e| e.to_string())?;
    let rows = export_rows(customer, &compare_spending(&dataset, customer));

    let path = out.join(export_file_name(name));
    let file = std::fs::File::create(&path)
        .map_err(|e| format!("failed to create {}: {e}", path.display()))?;
    write_export(&rows, std::io::BufWriter::new(file)).map_err(|e| e.to_string())?;
    Ok(path)
}
