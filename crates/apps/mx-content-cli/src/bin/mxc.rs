use anyhow::{Context, Result};
use clap::Parser;
use mx_content_cli::commands::{self, BuildRequest};
use mx_content_cli::{CliConfig, ContentSummary, SummaryRenderer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mxc", about = "Inspect and produce Matrix location message content")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repeat for more detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the effective values of a content document.
    Inspect {
        /// Content JSON file, `-` for stdin.
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Build content from scratch.
    Build {
        #[arg(long)]
        body: String,
        #[arg(long)]
        geo_uri: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        ts: Option<u64>,
        #[arg(long)]
        text: Option<String>,
        /// `self`, `pin`, or a full asset type.
        #[arg(long)]
        asset: Option<String>,
        /// Also emit the stable keys.
        #[arg(long)]
        promote: bool,
    },
    /// Copy every extension value into its stable key.
    Promote { input: Option<PathBuf> },
    /// Wrap content as an edit of an existing event.
    Edit {
        input: Option<PathBuf>,
        #[arg(long)]
        event_id: String,
    },
}

fn init_logging(verbose: u8, configured: Option<&str>) {
    let level = match verbose {
        0 => configured.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;
    init_logging(cli.verbose, config.log_level.as_deref());
    let pretty = cli.pretty || config.pretty;

    let output = match cli.command {
        Command::Inspect { input, json } => {
            let content = commands::decode_input(&commands::read_input(input.as_deref())?)?;
            let renderer =
                if json { SummaryRenderer::Json { pretty } } else { SummaryRenderer::Text };
            renderer.render(&ContentSummary::from_content(&content))?
        }
        Command::Build { body, geo_uri, description, ts, text, asset, promote } => {
            let request =
                BuildRequest { body, geo_uri, description, timestamp: ts, text, asset, promote };
            let content = commands::build(&request, &config.encode)?;
            commands::render_content(&content, pretty)?
        }
        Command::Promote { input } => {
            let content = commands::decode_input(&commands::read_input(input.as_deref())?)?;
            commands::render_content(&commands::promote(content), pretty)?
        }
        Command::Edit { input, event_id } => {
            let content = commands::decode_input(&commands::read_input(input.as_deref())?)?;
            commands::render_content(&commands::edit(&content, &event_id), pretty)?
        }
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("mxc: {err:#}");
        std::process::exit(1);
    }
}
