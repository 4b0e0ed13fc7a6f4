use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "faq", version, about = "Help-center FAQ browser")]
pub struct Cli {
    /// Catalog file, one JSON record per line. Defaults to the built-in FAQs.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Engine config (TOML). Defaults to the per-user config file when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the configured fuzzy threshold.
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    #[arg(long, global = true, default_value = "text")]
    pub output: String,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Every FAQ in catalog order.
    List,
    Categories,
    /// Landing-page preview.
    Featured {
        #[arg(long)]
        limit: Option<usize>,
    },
    Search {
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        /// Raw `key=value` filter; keys are search, category and sort.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    Vote {
        #[arg(long)]
        id: String,
        #[arg(long, conflicts_with = "not_helpful")]
        helpful: bool,
        #[arg(long, required_unless_present = "helpful")]
        not_helpful: bool,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,
    },
    /// Reads commands from stdin against a single session.
    Session,
    Export {
        #[arg(long)]
        output_file: PathBuf,
    },
}

impl Commands {
    /// Filter pairs in the order they apply; explicit flags win over `--filter`.
    pub fn search_filters(&self) -> Vec<(String, String)> {
        let Commands::Search {
            term,
            category,
            sort,
            filters,
        } = self
        else {
            return Vec::new();
        };

        let mut pairs = filters.clone();
        let named = [("search", term), ("category", category), ("sort", sort)];
        for (key, value) in named {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        pairs
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}
