mod inspect;
mod resolve;
mod schema;

use clap::{Parser, Subcommand, ValueEnum};
use classpack_core::ResolverConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "classpack",
    version,
    about = "Resolve the artifacts a set of classes depends on",
    long_about = "Classpack walks a precomputed class dependency graph from a set of root classes, \
                  collects the archives and class directories backing every reachable class, and \
                  optionally packs class directories into standalone archives ready for deployment."
)]
pub struct Cli {
    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the artifacts needed by root classes
    #[command(
        long_about = "Loads the dependency graph snapshot and prints the local artifacts backing the \
                            transitive dependencies of the given root classes. Without roots, every \
                            known artifact is printed."
    )]
    Resolve(ResolveArgs),
    /// Print the JSON schema of the graph snapshot format
    Schema,
    /// Summarize a graph snapshot
    Inspect {
        /// Graph snapshot file
        #[arg(long, value_name = "GRAPH_JSON")]
        graph: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Graph snapshot file
    #[arg(long, value_name = "GRAPH_JSON")]
    pub graph: PathBuf,

    /// Root class (repeatable)
    #[arg(long = "root", value_name = "CLASS")]
    pub roots: Vec<String>,

    /// Drop artifacts whose location contains this text (repeatable)
    #[arg(long = "exclude", value_name = "SUBSTRING")]
    pub exclusions: Vec<String>,

    /// Pack class directories into archives; the archives are kept on disk
    #[arg(long)]
    pub archive_dirs: bool,

    /// Parent directory for generated archives
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Deployment name used in JSON output
    #[arg(long, default_value = "classpack")]
    pub name: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ResolverConfig::from_env();
    let component = match &cli.command {
        Commands::Resolve(_) => "resolve",
        _ => "cli",
    };
    let _guard = classpack_core::logging::init_logging(component, cli.verbose, &config.log);

    match cli.command {
        Commands::Resolve(args) => resolve::run(args, config),
        Commands::Schema => schema::run(),
        Commands::Inspect { graph } => inspect::run(graph),
    }
}
