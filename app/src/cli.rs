use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jobs", version, about = "Browse the job feed and keep bookmarks")]
pub struct Cli {
    /// Settings file (defaults to ./jobs.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep bookmarks in memory only for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List jobs, scrolling through up to `pages` pages
    Browse {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Pull-to-refresh and list the first page again
    Refresh,
    /// List bookmarked jobs
    Bookmarks,
    /// Bookmark a job, or remove it if already bookmarked
    Bookmark {
        id: i64,
        /// Feed pages to search when the job is not bookmarked yet
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Show every detail of a job
    Show {
        id: i64,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
}
