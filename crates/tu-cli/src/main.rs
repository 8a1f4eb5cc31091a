// crates/tu-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tu_scheduler::decide_tu;

/// spec.md §6: `<tool> [-c] [-v|-q|-p] MATRIX_FILE`.
#[derive(Parser, Debug)]
#[command(
    name = "tu-cli",
    about = "Total-unimodularity decision and decomposition CLI",
    long_about = "Decide whether an integer matrix is totally unimodular via Seymour's \
        decomposition of regular matroids, printing the decision and, on request, a \
        certificate: the decomposition tree on success or a minimal violating submatrix \
        on failure.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    /// Matrix file, dense or sparse text format (auto-detected from the header).
    matrix_file: PathBuf,

    /// Emit a certificate alongside the decision: the decomposition tree when the
    /// matrix is TU, or a minimal non-TU submatrix otherwise.
    #[arg(short = 'c', long)]
    certificate: bool,

    /// Verbose: also log each decomposition step.
    #[arg(short = 'v', long, conflicts_with_all = ["quiet", "porcelain"])]
    verbose: bool,

    /// Quiet: print nothing; only the exit code reports the decision.
    #[arg(short = 'q', long, conflicts_with_all = ["verbose", "porcelain"])]
    quiet: bool,

    /// Porcelain: a single stable machine-readable line, for scripting.
    #[arg(short = 'p', long, conflicts_with_all = ["verbose", "quiet"])]
    porcelain: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = File::open(&cli.matrix_file)
        .with_context(|| format!("opening matrix file {}", cli.matrix_file.display()))?;
    let matrix = tu_io::read_matrix_auto(BufReader::new(file))
        .with_context(|| format!("parsing matrix file {}", cli.matrix_file.display()))?;

    info!(rows = matrix.rows(), cols = matrix.cols(), "matrix loaded");

    let decision = decide_tu(&matrix, cli.certificate).context("running the TU decision")?;

    if cli.porcelain {
        println!("{}", if decision.is_regular { "TU" } else { "NOT_TU" });
    } else if !cli.quiet {
        if decision.is_regular {
            println!("totally unimodular");
        } else {
            println!("not totally unimodular");
        }
    }

    if cli.certificate && !cli.quiet {
        print_certificate(&decision);
    }

    Ok(())
}

fn print_certificate(decision: &tu_scheduler::TuDecision) {
    if decision.is_regular {
        if let Some(tree) = &decision.tree {
            println!("decomposition leaves: {}", tree.leaf_count());
        }
    } else if let Some(violator) = &decision.violator {
        let rows: Vec<String> = violator.rows.iter().map(ToString::to_string).collect();
        let cols: Vec<String> = violator.columns.iter().map(ToString::to_string).collect();
        println!("violating submatrix rows=[{}] cols=[{}]", rows.join(","), cols.join(","));
    }
}

/// Initialize tracing with an env-driven filter, defaulting to INFO or DEBUG
/// under `-v`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
