#![forbid(unsafe_code)]
//! Onramp command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use onramp::commands::{
    execute_generate, execute_interview, execute_sections, execute_tags, execute_validate,
    GenerateOptions, InterviewOptions, SectionsOptions, TagsOptions, ValidateOptions,
};
use onramp::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "onramp")]
#[command(about = "Payment gateway onboarding guides from discovery answers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".onramp.config.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a guide from a saved answers file
    Generate {
        /// Answers file (JSON); reads stdin when omitted
        input: Option<PathBuf>,

        /// Write the guide here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (markdown, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Print the tag and score breakdown to stderr
        #[arg(long)]
        explain: bool,
    },

    /// Run the discovery questionnaire interactively
    Interview {
        /// Write the guide here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (markdown, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also save the raw answers to this path
        #[arg(long)]
        save_answers: Option<PathBuf>,
    },

    /// List the content library sections
    Sections {
        /// Only list sections matching these answers (JSON file)
        #[arg(short, long)]
        matching: Option<PathBuf>,

        /// Show each section's tags
        #[arg(short, long)]
        tags: bool,
    },

    /// Show the tag mapping and complexity for a submission
    Tags {
        /// Answers file (JSON); reads stdin when omitted
        input: Option<PathBuf>,

        /// Emit JSON instead of the human listing
        #[arg(long)]
        json: bool,
    },

    /// Validate reference and checklist content files
    Validate {
        /// Reference markdown to validate
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Checklist JSON to validate
        #[arg(long)]
        checklist: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "onramp=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Generate {
            input,
            output,
            format,
            explain,
        } => {
            let options = GenerateOptions {
                input,
                output,
                format,
                explain,
            };
            execute_generate(options, &config)?;
        }

        Commands::Interview {
            output,
            format,
            save_answers,
        } => {
            let options = InterviewOptions {
                output,
                format,
                save_answers,
            };
            execute_interview(options, &config)?;
        }

        Commands::Sections { matching, tags } => {
            let options = SectionsOptions {
                matching,
                show_tags: tags,
            };
            execute_sections(options, &config)?;
        }

        Commands::Tags { input, json } => {
            let options = TagsOptions { input, json };
            execute_tags(options, &config)?;
        }

        Commands::Validate {
            reference,
            checklist,
        } => {
            let options = ValidateOptions {
                reference,
                checklist,
            };
            execute_validate(options, &config)?;
        }
    }

    Ok(())
}
