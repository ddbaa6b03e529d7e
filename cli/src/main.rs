mod render;
mod shell;

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use legal_lens::config::{ClientConfig, ConfigError};
use legal_lens::net::types::DocId;
use legal_lens::{ApiError, HttpBackend, Workspace};
use tracing_subscriber::EnvFilter;

use render::{RenderOptions, View, render_workspace};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("reading {what} failed: {source}")]
    Io { what: String, source: io::Error },
    #[error("finished with {0} alert(s)")]
    Alerted(usize),
}

#[derive(Parser, Debug)]
#[command(name = "legal-lens", about = "Contract summary, risk detection and Q&A client")]
struct Cli {
    #[arg(long, help = "Backend URL [env: LEGAL_LENS_BASE_URL, default: http://localhost:8000]")]
    base_url: Option<String>,

    #[arg(long, help = "Request timeout in seconds [env: LEGAL_LENS_REQUEST_TIMEOUT_SECS, default: 120]")]
    timeout_secs: Option<u64>,

    #[arg(long, help = "Connect timeout in seconds [env: LEGAL_LENS_CONNECT_TIMEOUT_SECS, default: 10]")]
    connect_timeout_secs: Option<u64>,

    #[arg(long, default_value_t = false, help = "Disable colored risk output")]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit contract text and show summary, risks and suggestions.
    Paste {
        #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
    /// Upload a .txt or .pdf contract and show its analysis.
    Upload { path: PathBuf },
    /// Ask a question about an already indexed document.
    Ask {
        #[arg(long)]
        doc_id: String,
        question: String,
    },
    /// Interactive session.
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::from_env()?.with_overrides(
        cli.base_url.as_deref(),
        cli.timeout_secs,
        cli.connect_timeout_secs,
    )?;
    let backend = HttpBackend::new(config)?;
    tracing::debug!(base_url = backend.base_url(), "backend configured");
    let workspace = Workspace::new(Arc::new(backend));
    let color = !cli.no_color;
    let opts = RenderOptions { view: View::All, color };

    match cli.command {
        Command::Paste { input } => {
            let text = read_input(&input)?;
            workspace.set_paste_text(text);
            workspace.submit_text().await;
        }
        Command::Upload { path } => {
            workspace.select_file(Some(path));
            workspace.upload_file().await;
        }
        Command::Ask { doc_id, question } => {
            workspace.attach_document(DocId::new(doc_id));
            workspace.set_question(question);
            workspace.ask().await;
        }
        Command::Shell => {
            return shell::run(&workspace, color).await.map_err(|source| CliError::Io {
                what: "terminal".to_owned(),
                source,
            });
        }
    }

    let alerted = shell::print_alerts(&workspace, color);
    println!("{}", workspace.with_state(|state| render_workspace(state, opts)));

    if alerted > 0 {
        return Err(CliError::Alerted(alerted));
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String, CliError> {
    let mut text = String::new();
    let result = if input == "-" {
        io::stdin().read_to_string(&mut text)
    } else {
        File::open(input).and_then(|mut file| file.read_to_string(&mut text))
    };
    result.map_err(|source| CliError::Io { what: input.to_owned(), source })?;
    Ok(text)
}
