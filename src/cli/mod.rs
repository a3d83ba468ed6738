//! CLI command definitions and parsing
use crate::analysis::Sentiment;
use crate::app::View;
use crate::reviews::BusinessCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "reviewiq",
    version,
    author = "neur0map",
    about = "Turn raw customer reviews into sentiment, themes, and suggested actions",
    long_about = "ReviewIQ sends a batch of customer reviews to a hosted generative model, \
                  renders the structured analysis as a dashboard, a filterable review list, \
                  and suggested actions, and keeps a local history of past reports."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/reviewiq/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile to apply on top of the config file
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that renders an analysis
#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// View to render after the analysis is loaded
    #[arg(long, default_value = "dashboard", value_parser = parse_view)]
    pub view: View,

    /// Only show reviews with this sentiment (reviews view)
    #[arg(long, value_parser = parse_sentiment)]
    pub sentiment: Option<Sentiment>,

    /// Only show reviews containing this text, case-insensitive (reviews view)
    #[arg(long)]
    pub search: Option<String>,

    /// Print the raw analysis document as JSON instead
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a batch of reviews
    Analyze {
        /// Business the reviews are about
        #[arg(short, long, default_value = "")]
        business: String,

        /// Business category (E-commerce, SaaS, Local Service, Restaurant, Mobile App, or custom)
        #[arg(short = 't', long, value_parser = parse_category)]
        category: Option<BusinessCategory>,

        /// Read reviews from a text file, one per line (defaults to stdin)
        #[arg(short, long, conflicts_with = "csv")]
        file: Option<PathBuf>,

        /// Read reviews from a CSV file, one per row
        #[arg(long)]
        csv: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Browse saved analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved analyses, most recent first
    List {
        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Open a saved analysis
    Show {
        /// Record id (e.g. analysis-1b4e...)
        id: String,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_view(s: &str) -> Result<View, String> {
    s.parse()
}

fn parse_sentiment(s: &str) -> Result<Sentiment, String> {
    s.parse()
}

fn parse_category(s: &str) -> Result<BusinessCategory, String> {
    s.parse()
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
