//! Command line surface, parsed with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Static site generator for single-page academic homepages.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory, relative to the project root
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content tables directory, relative to the project root
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Assets directory, relative to the project root
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Config file name inside the project root
    #[arg(short = 'C', long, default_value = "lectern.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by `build` and `serve`.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Delete the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Minify emitted HTML (overrides [build] minify)
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true", action = clap::ArgAction::Set)]
    pub minify: Option<bool>,

    /// Write sitemap.xml (overrides [build.sitemap] enable)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = clap::ArgAction::Set)]
    pub sitemap: Option<bool>,

    /// Base URL to build absolute links against, replacing [base] url.
    ///
    /// Lets CI deploy the same checkout to different hosts without
    /// editing lectern.toml, e.g.
    /// `lectern build --base-url "https://jdoe.github.io"`.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scaffold a starter site with example data tables
    Init {
        /// Directory to create, relative to the root. Omit to scaffold
        /// into the (empty) current directory.
        name: Option<PathBuf>,
    },

    /// Build the site into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build, then serve locally and rebuild on changes
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind, e.g. 0.0.0.0 for LAN access
        #[arg(short, long)]
        interface: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Watch for changes (overrides [serve] watch)
        #[arg(short, long, num_args = 0..=1, default_missing_value = "true", action = clap::ArgAction::Set)]
        watch: Option<bool>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// The shared build flags, for the commands that carry them.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            Commands::Init { .. } => None,
        }
    }
}
