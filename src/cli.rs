//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `depgen`.
#[derive(Debug, Parser)]
#[command(name = "depgen", version, about = "Generate make dependency files from #include lines")]
pub struct Cli {
    /// Config file (defaults to $DEPGEN_CONFIG, then ./depgen.yaml, then the built-in target).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute; `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the dependency file of every target (or the named ones).
    Generate {
        /// Restrict to these targets.
        #[arg(long = "target", value_name = "NAME")]
        targets: Vec<String>,
    },
    /// Print the dependencies of a target without writing anything.
    Show {
        /// Target to show; the first configured target when omitted.
        #[arg(long, value_name = "NAME")]
        target: Option<String>,
        /// Print JSON instead of makefile rules.
        #[arg(long)]
        json: bool,
    },
    /// Convert compiler-generated rules (e.g. `gcc -MM`) into a dependency file.
    Extract {
        /// File holding the compiler output.
        input: PathBuf,
        /// Dependency file to write.
        #[arg(long, short)]
        output: PathBuf,
        /// Comment line written at the top.
        #[arg(long)]
        comment: Option<String>,
    },
    /// List configured targets.
    Targets,
}
