//! # kisplit
//!
//! Command-line interface for splitting a test suite into group files.
//!
//! ## Usage
//! ```bash
//! # Split loaded tests into 5 groups, keeping dependent tests together
//! kisplit tests --groups 5 --tests-from tests --groups-to tests/_data/paracept_
//!
//! # Split test files of two suites into chunks of 4 groups each
//! kisplit files --groups 4 --tests-from tests --suites unit,acceptance
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use kisplit::{
    config::{DEFAULT_EXCLUDE, DEFAULT_LOCATION, DEFAULT_OUTPUT_PATTERN, SplitConfig},
    loader::ManifestLoader,
    partition::{ChunkedFilePartitioner, ModuloFilePartitioner, Partitioner, RecordPartitioner},
    splitter,
    writer::render_group,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kisplit",
    about = "Split a test suite into dependency-safe groups for parallel runners",
    version
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split loaded test records, keeping dependent tests in one group.
    Tests {
        #[command(flatten)]
        split: SplitArgs,

        /// Manifest file name looked up in directory locations.
        #[arg(long, default_value = kisplit::loader::DEFAULT_MANIFEST_NAME)]
        manifest: String,
    },

    /// Split test files found below the locations.
    Files {
        #[command(flatten)]
        split: SplitArgs,

        /// How files are assigned to groups.
        #[arg(long, value_enum, default_value_t = FileMode::Chunked)]
        mode: FileMode,

        /// File name patterns of test files (repeatable, replaces the defaults).
        #[arg(long = "pattern")]
        patterns: Vec<String>,
    },
}

#[derive(Args)]
struct SplitArgs {
    /// Number of groups to create.
    #[arg(short, long, env = "KISPLIT_GROUPS")]
    groups: usize,

    /// Project root the locations are relative to (defaults to the working directory).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Location of the tests, relative to the root.
    #[arg(long, default_value = DEFAULT_LOCATION)]
    tests_from: String,

    /// Comma-separated suites below `--tests-from`, each split separately.
    #[arg(long, default_value = "")]
    suites: String,

    /// Prefix of the written group files.
    #[arg(long, default_value = DEFAULT_OUTPUT_PATTERN)]
    groups_to: String,

    /// Directory excluded from file discovery.
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    exclude: String,

    /// Print the planned group files instead of writing them.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FileMode {
    /// Sorted files in contiguous chunks, one set of group files per suite.
    Chunked,
    /// Files dealt round-robin in discovery order.
    Modulo,
}

impl SplitArgs {
    fn config(&self) -> SplitConfig {
        let config = SplitConfig::new(self.groups)
            .with_suites(&self.tests_from, &self.suites)
            .with_output_pattern(&self.groups_to)
            .with_exclude(&self.exclude);
        match &self.root {
            Some(root) => config.with_project_root(root),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tests { split, manifest } => {
            let partitioner = RecordPartitioner::new()
                .with_loader(ManifestLoader::new().with_file_name(manifest));
            execute(&split, split.config(), partitioner)
        }
        Commands::Files {
            split,
            mode,
            patterns,
        } => {
            let mut config = split.config();
            if !patterns.is_empty() {
                config = config.with_name_patterns(patterns);
            }
            match mode {
                FileMode::Chunked => execute(&split, config, ChunkedFilePartitioner::new()),
                FileMode::Modulo => execute(&split, config, ModuloFilePartitioner::new()),
            }
        }
    }
}

fn execute<P: Partitioner>(
    args: &SplitArgs,
    config: SplitConfig,
    partitioner: P,
) -> anyhow::Result<()> {
    let splitter = splitter(config).with_partitioner(partitioner);

    if args.dry_run {
        let partitions = splitter.plan().context("failed to plan split")?;
        for partition in &partitions {
            for group in partition.groups.iter() {
                let path = splitter
                    .config()
                    .artifact_path(partition.suite.as_deref(), group.index);
                println!("{}:", path.display());
                println!("{}", render_group(group.items));
            }
        }
        return Ok(());
    }

    let report = splitter.run().context("failed to split tests")?;
    for group in &report.written {
        println!("{} ({} entries)", group.path.display(), group.items);
    }
    Ok(())
}

/// Initialize the tracing subscriber from the `-v` count, `RUST_LOG` wins.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
