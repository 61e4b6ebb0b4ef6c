use std::{num::NonZeroU64, process::ExitCode, sync::Arc, time::Duration};

use clap::Parser;
use tokio::io::{BufReader, stdin};
use tracing::info;

use client::{Config, Field, FormFields, SubmitHandler, TerminalOutput, session::run_lines};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Form fields as NAME=VALUE pairs
    fields: Vec<Field>,

    /// Read one form per stdin line instead, submitting each as it arrives
    #[arg(short, long, conflicts_with = "fields")]
    interactive: bool,

    /// Backend base URL, overrides PREDICT_URL
    #[arg(long)]
    url: Option<String>,

    /// Endpoint path, overrides PREDICT_PATH
    #[arg(long)]
    path: Option<String>,

    /// Request timeout in milliseconds, overrides PREDICT_TIMEOUT_MS
    #[arg(long)]
    timeout_ms: Option<NonZeroU64>,

    /// Do not print the in-flight placeholder
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    client::init_tracing();

    let args = Args::parse();
    let config = configure(&args)?;

    let handler = SubmitHandler::new(config, Arc::new(TerminalOutput))?;
    info!("Posting forms to {}", handler.endpoint());

    if args.interactive {
        let submitted = run_lines(handler, BufReader::new(stdin())).await?;
        info!("Submitted {submitted} forms");

        return Ok(ExitCode::SUCCESS);
    }

    let fields: FormFields = args.fields.into_iter().collect();
    let outcome = handler.submit(fields).await;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn configure(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load()?;

    if let Some(url) = &args.url {
        config = config.with_base_url(url)?;
    }
    if let Some(path) = &args.path {
        config = config.with_path(path.as_str());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms.get()));
    }
    if args.no_progress {
        config = config.with_progress(false);
    }

    Ok(config)
}
