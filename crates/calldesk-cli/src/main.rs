mod cmd_config;
mod cmd_ingest;
mod cmd_list;
mod cmd_normalize;
mod cmd_prompt;
mod cmd_serve;
mod cmd_summarize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calldesk",
    version,
    about = "Call transcript dashboard backend for home-insurance support"
)]
struct Cli {
    /// Data directory holding transcripts/, summaries/, agents/ and config.json
    #[arg(long, global = true, env = "CALLDESK_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind (config key: bind, default 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (config key: port, default 5000)
        #[arg(long, env = "PORT")]
        port: Option<u16>,
        /// Dashboard origin allowed by CORS (config key: frontend_url)
        #[arg(long, env = "FRONTEND_URL")]
        frontend_url: Option<String>,
    },
    /// Store transcripts from a JSON file (one object or an array) and summarize them
    Ingest {
        /// Path to the JSON file
        file: PathBuf,
        /// Output stored transcripts as JSON
        #[arg(long)]
        json: bool,
    },
    /// List stored transcripts, newest first
    List,
    /// Rewrite generator-style transcript files into the stored shape
    Normalize,
    /// Regenerate the summary and insights for one transcript
    Summarize {
        /// Transcript id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Regenerate summaries for every stored transcript
    Backfill {
        /// Only transcripts that have no summary yet
        #[arg(long)]
        missing_only: bool,
    },
    /// Manage data-directory configuration
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
    /// Render an LLM prompt template
    Prompt {
        /// Template name (e.g. GENERATE_SUMMARY); omit to list templates
        key: Option<String>,
        /// Placeholder value as name=value (repeatable)
        #[arg(long = "var")]
        vars: Vec<String>,
        /// Fill {transcript} from a stored transcript
        #[arg(long)]
        transcript: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let data_dir = cli.data_dir;

    match cli.cmd {
        Command::Serve {
            bind,
            port,
            frontend_url,
        } => cmd_serve::execute(&data_dir, bind, port, frontend_url),
        Command::Ingest { file, json } => cmd_ingest::execute(&data_dir, &file, json),
        Command::List => cmd_list::execute(&data_dir),
        Command::Normalize => cmd_normalize::execute(&data_dir),
        Command::Summarize { id, json } => cmd_summarize::summarize(&data_dir, &id, json),
        Command::Backfill { missing_only } => cmd_summarize::backfill(&data_dir, missing_only),
        Command::Config { cmd } => cmd_config::run(cmd, &data_dir),
        Command::Prompt {
            key,
            vars,
            transcript,
        } => cmd_prompt::execute(&data_dir, key.as_deref(), &vars, transcript.as_deref()),
    }
}
