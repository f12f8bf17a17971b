//! Lectern builds single-page academic sites from TOML data tables.
//!
//! `lectern init` scaffolds a site, `lectern build` renders it into a
//! static output directory, and `lectern serve` previews the result
//! while rebuilding on change.

mod build;
mod cli;
mod compose;
mod config;
mod data;
mod init;
mod logger;
mod markup;
mod minify;
mod router;
mod serve;
mod shell;
mod sitemap;
mod slug;
mod watch;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(prepare_config(cli)?);

    match &cli.command {
        Commands::Init { name } => new_site(&cfg(), name.is_some()),
        Commands::Build { .. } => build_site(&cfg()),
        Commands::Serve { .. } => {
            build_site(&cfg())?;
            serve_site()
        }
    }
}

/// Read `lectern.toml` if there is one, fold in CLI flags, and gate on
/// the command: `init` wants no config in its target, everything else
/// requires one.
fn prepare_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let file = root.join(&cli.config);

    let mut config = match file.exists() {
        true => SiteConfig::from_path(&file)?,
        false => SiteConfig::default(),
    };
    config.update_with_cli(cli);

    // `update_with_cli` re-anchors `config_path`, so for `init NAME`
    // this checks inside the site directory about to be created.
    let occupied = config.config_path.exists();
    if cli.is_init() {
        if occupied {
            bail!(
                "`{}` already exists. Move it aside, or init somewhere else.",
                config.config_path.display()
            );
        }
        return Ok(config);
    }

    if !occupied {
        bail!("no config file found here. Run `lectern init` to start a site.");
    }
    config.validate()?;
    Ok(config)
}
