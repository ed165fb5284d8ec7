use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::contract::Progress;
use crate::fetch::HttpTransport;
use crate::generate::{generate, write_output};
use crate::load_config::load_config;

/// CLI for wp-translation-strings: extract and mark up content strings.
#[derive(Parser)]
#[clap(
    name = "wp-translation-strings",
    version,
    about = "Generate _x() translation markers for taxonomy terms and post titles served by a WordPress REST API"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all allow-listed content and write the generated strings file
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Base URL of the content API (defaults to the production endpoint)
    #[clap(long)]
    pub url: Option<String>,

    /// Comma-separated taxonomy slugs to fetch
    #[clap(long)]
    pub taxonomies: Option<String>,

    /// Skip taxonomy processing entirely
    #[clap(long)]
    pub no_taxonomies: bool,

    /// Comma-separated post type slugs to fetch
    #[clap(long)]
    pub post_types: Option<String>,

    /// Skip post type processing entirely
    #[clap(long)]
    pub no_post_types: bool,

    /// Textdomain for the generated _x() calls
    #[clap(long)]
    pub textdomain: Option<String>,

    /// Destination path for the generated file
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Operator feedback on stderr. Stdout carries only the generated blob, so
/// piping the tool yields exactly the file contents.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn retrieving_taxonomies(&self) {
        eprintln!();
        eprintln!("Retrieving taxonomies...");
    }

    fn retrieving_terms(&self) {
        eprintln!("Retrieving terms...");
    }

    fn collection_started(&self, label: &str) {
        eprintln!("{label}... ");
    }

    fn page_fetched(&self, page: u32) {
        eprintln!("Page {page}... ");
    }

    fn string_extracted(&self, text: &str) {
        eprintln!("{text}");
    }

    fn retrieving_post_types(&self) {
        eprintln!();
        eprintln!("Retrieving post types...");
    }

    fn run_complete(&self) {
        eprintln!();
        eprintln!("Done.");
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let config = load_config(&args)?;
            config.trace_loaded();

            let transport = HttpTransport::new();
            let progress = ConsoleProgress;

            let report = generate(&config, &transport, &progress).await?;
            write_output(&config.output_path, &report.output)?;

            // Mirror the generated file on stdout for inspection/logging.
            print!("{}", report.output);
            progress.run_complete();
            Ok(())
        }
    }
}
