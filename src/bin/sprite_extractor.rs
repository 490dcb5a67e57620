use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use tracing::Level;

/// Extract sprites from TexturePacker sprite sheets (JSON hash).
///
/// Example: `sprite-extractor --sheet out.png --data out.json` writes every sprite
/// of out.png into the current directory.
#[derive(Parser, Debug)]
#[command(name = "sprite-extractor", version)]
struct Cli {
    /// Texture sheet image.
    #[arg(long, value_name = "FILENAME")]
    sheet: PathBuf,

    /// Sheet data file (JSON hash).
    #[arg(long, value_name = "FILENAME")]
    data: PathBuf,

    /// Show verbose information.
    #[arg(short, long)]
    verbose: bool,

    /// Directory sprites are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Extract sprites in parallel; every sprite is attempted even after a failure.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {
            println!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Encountered error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let opts = sprite_extractor::ExtractOpts {
        out_dir: cli.out_dir,
        parallel: cli.parallel,
        threads: cli.threads,
    };

    let report = sprite_extractor::extract_files(&cli.sheet, &cli.data, &opts)
        .with_context(|| format!("extract '{}'", cli.sheet.display()))?;

    tracing::debug!(sprites = report.written.len(), "all sprites written");
    Ok(())
}
