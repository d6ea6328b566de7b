//! academy CLI: browse course content and check answers from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "academy", version, about = "Mainframe Academy course and answer checker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Course content directory (overrides config)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the course catalog
    Catalog,

    /// Show the chapters and parts of a course
    Outline {
        /// Course id (e.g. "pl1-basics")
        #[arg(long)]
        course: String,
    },

    /// Validate course content TOML files
    Validate {
        /// Course file or directory (defaults to the configured content directory)
        path: Option<PathBuf>,
    },

    /// Grade an exercise submission
    Grade {
        /// Course id
        #[arg(long)]
        course: String,

        /// Chapter number, starting at 1
        #[arg(long)]
        chapter: usize,

        /// File containing the submission ("-" reads stdin)
        #[arg(long)]
        submission: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Skip the "checking..." delay
        #[arg(long)]
        no_delay: bool,
    },

    /// Answer and score a chapter quiz
    Quiz {
        /// Course id
        #[arg(long)]
        course: String,

        /// Chapter number, starting at 1
        #[arg(long)]
        chapter: usize,

        /// Chosen option numbers in question order, starting at 1 (e.g. "2,1,3")
        #[arg(long)]
        answers: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show or change the color theme
    Theme {
        /// "light", "dark", or "toggle"
        value: Option<String>,
    },

    /// Create a starter config and sample course content
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("academy=info".parse().unwrap())
                .add_directive("academy_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        content_dir: cli.content,
    };

    let result = match cli.command {
        Commands::Catalog => commands::catalog::execute(&ctx),
        Commands::Outline { course } => commands::outline::execute(&ctx, course),
        Commands::Validate { path } => commands::validate::execute(&ctx, path),
        Commands::Grade {
            course,
            chapter,
            submission,
            format,
            no_delay,
        } => commands::grade::execute(&ctx, course, chapter, submission, format, no_delay).await,
        Commands::Quiz {
            course,
            chapter,
            answers,
            format,
        } => commands::quiz::execute(&ctx, course, chapter, answers, format),
        Commands::Theme { value } => commands::theme::execute(&ctx, value),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
