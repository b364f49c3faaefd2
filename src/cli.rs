use clap::{Args, Parser, Subcommand};

use crate::model::CopyStyle;

#[derive(Debug, Parser)]
#[command(
    name = "copy-generator",
    version,
    about = "LLM-powered marketing copy generator"
)]
pub struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API key (overrides environment variable)
    #[arg(short = 'k', long = "key", global = true)]
    pub key: Option<String>,

    /// Model name (overrides environment variable)
    #[arg(short = 'm', long = "model", global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate copy variants for a product
    Generate(GenerateArgs),

    /// List history, most recent first
    History,

    /// Show a history record and its variants
    Show {
        /// Record id
        id: String,
    },

    /// Delete a history record
    Delete {
        /// Record id
        id: String,
    },

    /// Toggle the favorite flag of a copy variant
    Favorite {
        /// Copy variant id
        copy_id: String,
    },

    /// List favorite variants grouped by record
    Favorites {
        /// Filter by topic, product, title or content
        #[arg(short = 's', long = "search")]
        search: Option<String>,
    },

    /// Search history by topic, product, title or content
    Search {
        term: String,
    },

    /// Copy a variant's content to the clipboard
    Copy {
        /// Copy variant id
        copy_id: String,
    },

    /// Share a variant (title and content)
    Share {
        /// Copy variant id
        copy_id: String,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Topic the copy is about
    #[arg(short = 't', long = "topic")]
    pub topic: Option<String>,

    /// Product name
    #[arg(short = 'p', long = "product")]
    pub product: Option<String>,

    /// Product feature (repeatable, at most 5)
    #[arg(short = 'f', long = "feature")]
    pub features: Vec<String>,

    /// Target audience
    #[arg(short = 'a', long = "audience")]
    pub audience: Option<String>,

    /// Copy style: seeding, review, tutorial or story
    #[arg(short = 's', long = "style", default_value_t = CopyStyle::Seeding)]
    pub style: CopyStyle,

    /// Attempts before giving up
    #[arg(long = "max-attempts", default_value_t = 3)]
    pub max_attempts: usize,

    /// Copy the first generated variant to the clipboard
    #[arg(short = 'c', long = "copy")]
    pub copy: bool,
}
