use anyhow::Context;
use clap::Parser;
use linkprep::{run, PipelineError, ProgressBarObserver};
use linkprep_core::config::PrepConfig;
use linkprep_core::error::LinkPrepError;
use sampler::{LogObserver, SlotObserver};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Build train/dev link-prediction pairs from a citation graph.
#[derive(Parser, Debug)]
#[command(name = "linkprep", version, about)]
struct Cli {
    /// Directory holding abstracts.txt, authors.txt and edgelist.txt.
    input_dir: Option<PathBuf>,

    /// Directory the partition files are written to (created if missing).
    output_dir: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON); defaults to ./linkprep.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    dev_ratio: Option<f64>,

    /// Draws allowed per negative slot before the run fails.
    #[arg(long)]
    max_retries: Option<u32>,
}

fn prompt_path(message: &str) -> anyhow::Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read path from stdin")?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        anyhow::bail!("no path given");
    }
    Ok(PathBuf::from(trimmed))
}

fn load_config(cli: &Cli) -> anyhow::Result<PrepConfig> {
    let mut config = PrepConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(seed) = cli.seed {
        config.split.seed = seed;
    }
    if let Some(ratio) = cli.dev_ratio {
        config.split.dev_ratio = ratio;
    }
    if let Some(retries) = cli.max_retries {
        config.sampler.max_retries_per_slot = retries;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn execute(cli: Cli, config: PrepConfig) -> anyhow::Result<()> {
    let input_dir = match cli.input_dir {
        Some(dir) => dir,
        None => prompt_path("Input the path of dataset")?,
    };
    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => prompt_path("Input the path of output")?,
    };

    let mut observer: Box<dyn SlotObserver> = if io::stderr().is_terminal() {
        Box::new(ProgressBarObserver::new())
    } else {
        Box::new(LogObserver::new(config.sampler.log_every))
    };

    match run(&config, &input_dir, &output_dir, observer.as_mut()) {
        Ok(report) => {
            info!(
                artifacts = report.manifest.artifacts.len(),
                output = %output_dir.display(),
                "Done"
            );
            Ok(())
        }
        Err(err) => {
            log_failure(&err);
            Err(err.into())
        }
    }
}

fn log_failure(err: &PipelineError) {
    error!(code = %err.error_code(), "{}", err);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = load_config(&cli).and_then(|config| {
        linkprep_core::init_tracing(config.logging.format);
        execute(cli, config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
