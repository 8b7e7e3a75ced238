use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perseq::script::{parse_script, Session};
use tracing_subscriber::EnvFilter;

/// Walkthrough from the crate documentation: build, two updates, and reads
/// against every version showing the old ones never change.
const DEMO_SCRIPT: &str = "\
build 1 3 5 7 9 11
query v0 1 4 sum
update v0 2 10
query v1 1 4 sum
query v0 1 4 sum
array v1
array v0
update v1 0 20
query v2 0 5 all
diff v0 v2
lineage v2
stats
";

#[derive(Parser, Debug)]
#[command(
    name = "perseq",
    about = "Persistent versioned sequence with range sum/min/max queries"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `perseq=trace`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the built-in walkthrough script.
    Demo,
    /// Execute a command script file (one command per line, `#` comments).
    Run {
        /// Script to execute.
        script: PathBuf,
    },
    /// Execute commands given on the command line, one per argument.
    Exec {
        /// Commands, e.g. `"build 1 2 3"` `"query v0 0 2 max"`.
        #[arg(required = true)]
        commands: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Demo => run_source(DEMO_SCRIPT, "demo script")?,
        Commands::Run { script } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            run_source(&source, &script.display().to_string())?
        }
        Commands::Exec { commands } => run_source(&commands.join("\n"), "inline commands")?,
    }

    Ok(())
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter '{default_filter}'"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_source(source: &str, origin: &str) -> Result<()> {
    let lines = parse_script(source).with_context(|| format!("failed to parse {origin}"))?;
    let mut session = Session::new();

    // Print as we go so output before a failing line is not lost
    for line in &lines {
        let output = session
            .run_line(line)
            .with_context(|| format!("failed to execute {origin}"))?;
        println!("{output}");
    }

    Ok(())
}
