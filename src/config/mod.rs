//! Configuration loaded from `lectern.toml`.
//!
//! Five sections, each with its own module and serde type:
//!
//! - `[base]` site-wide settings: canonical URL, default route, language
//! - `[profile]` the site owner: name, position, contact, interests
//! - `[meta]` per-route `<title>` and description overrides
//! - `[build]` directory layout, minification, sitemap, head entries
//! - `[serve]` development server interface, port and watcher
//!
//! Every key has a default, so a minimal config is just a `[profile]`
//! with a name and an email. Unknown keys are rejected rather than
//! ignored; a typo in `lectern.toml` should fail loudly, not silently
//! fall back to a default.

mod base;
mod build;
pub mod defaults;
mod error;
mod handle;
mod meta;
mod profile;
mod serve;

pub use handle::{cfg, init_config, reload_config};
pub use meta::{MetaTable, RouteMeta};
pub use profile::{ProfileConfig, SocialLink};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use base::BaseConfig;
use build::BuildConfig;
use educe::Educe;
use error::ConfigError;
use meta::MetaConfig;
use serde::{Deserialize, Serialize};
use serve::ServeConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// The whole of `lectern.toml`, plus loading context that never comes
/// from the file (`cli`, `config_path`).
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Parsed CLI arguments, attached by `update_with_cli`.
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path of the loaded config file.
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub meta: MetaConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse a config from TOML text.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Read and parse a config file, naming the file in either failure.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        let config = toml::from_str(&content)
            .map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;
        Ok(config)
    }

    /// Project root directory.
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the project root directory.
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Parsed CLI arguments. Panics when called before `update_with_cli`;
    /// loading in `main` guarantees the order.
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Fold CLI arguments into the loaded config. File values lose to
    /// anything passed on the command line.
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = self.resolve_root(cli);
        self.set_root(&root);
        self.anchor_paths(&root);

        if let Some(args) = cli.build_args() {
            Self::overlay(&mut self.build.minify, args.minify.as_ref());
            Self::overlay(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if args.clean {
                self.build.clear = true;
            }
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::overlay(&mut self.serve.interface, interface.as_ref());
            Self::overlay(&mut self.serve.port, port.as_ref());
            Self::overlay(&mut self.serve.watch, watch.as_ref());
            // Local preview links must point at the local server, not at
            // the production URL.
            self.base.url = Some(format!(
                "http://{}:{}",
                self.serve.interface, self.serve.port
            ));
        }
    }

    /// Pick the effective project root. `init NAME` nests the new site
    /// one level below whatever `--root` (or the cwd) says.
    fn resolve_root(&self, cli: &'static Cli) -> PathBuf {
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        }
    }

    /// Overwrite a config value when the CLI supplied one.
    fn overlay<T: Clone>(slot: &mut T, flag: Option<&T>) {
        if let Some(value) = flag {
            *slot = value.clone();
        }
    }

    /// Re-root every configured path and make them all absolute, so the
    /// rest of the program never depends on the working directory.
    fn anchor_paths(&mut self, root: &Path) {
        let cli = self.get_cli();

        Self::overlay(&mut self.build.data, cli.data.as_ref());
        Self::overlay(&mut self.build.assets, cli.assets.as_ref());
        Self::overlay(&mut self.build.output, cli.output.as_ref());

        let root = Self::absolutize(root);
        self.config_path = Self::absolutize(&root.join(&cli.config));

        self.build.data = Self::absolutize(&root.join(&self.build.data));
        self.build.assets = Self::absolutize(&root.join(&self.build.assets));
        self.build.output = Self::absolutize(&root.join(&self.build.output));
        self.build.sitemap.path = self.build.output.join(&self.build.sitemap.path);

        self.set_root(&root);
    }

    /// Canonicalize when the path exists; otherwise join onto the cwd.
    fn absolutize(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Reject configs that cannot produce a working site.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("config file missing at `{}`", self.config_path.display());
        }

        if self.profile.name.is_empty() {
            bail!(ConfigError::Invalid("[profile.name] is required".into()));
        }
        if self.profile.email.is_empty() {
            bail!(ConfigError::Invalid("[profile.email] is required".into()));
        }

        if self.build.sitemap.enable && self.base.url.is_none() {
            bail!(ConfigError::Invalid(
                "[build.sitemap] needs [base.url] for absolute locations".into()
            ));
        }

        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Invalid(
                "[base.url] must be an http:// or https:// URL".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;

    #[test]
    fn test_minimal_config_parses() {
        let config = SiteConfig::from_str(
            r#"
            [profile]
            name = "Chiara Bernardi"
            email = "c.bernardi@qmul.ac.uk"
        "#,
        )
        .unwrap();

        assert_eq!(config.profile.name, "Chiara Bernardi");
        assert_eq!(config.profile.email, "c.bernardi@qmul.ac.uk");
    }

    #[test]
    fn test_broken_toml_is_an_error() {
        let result = SiteConfig::from_str("[profile\nname = \"x\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_root_defaults_to_cwd() {
        let config = SiteConfig::default();

        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_root_roundtrips_through_setter() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/srv/site"));

        assert_eq!(config.get_root(), Path::new("/srv/site"));
    }

    #[test]
    fn test_default_config_shape() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.base.default_route, Route::Home);
        assert!(config.profile.name.is_empty());
        assert!(config.build.minify);
        assert!(!config.build.clear);
        assert_eq!(config.serve.port, 4812);
    }

    #[test]
    fn test_every_section_together() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            url = "https://chiarabernardi.org"
            language = "en-GB"
            copyright = "2026 Chiara Bernardi"

            [profile]
            name = "Chiara Bernardi"
            position = "PhD Candidate"
            institution = "Queen Mary University of London"
            department = "School of Economics and Finance"
            address = "Mile End Road, London E1 4NS"
            email = "c.bernardi@qmul.ac.uk"
            interests = ["labour economics"]

            [meta.home]
            title = "Chiara Bernardi"

            [build]
            output = "_site"

            [build.sitemap]
            enable = true

            [serve]
            port = 8088
        "#,
        )
        .unwrap();

        assert_eq!(config.base.url.as_deref(), Some("https://chiarabernardi.org"));
        assert_eq!(config.profile.institution, "Queen Mary University of London");
        assert_eq!(config.meta.home.title.as_deref(), Some("Chiara Bernardi"));
        assert_eq!(config.build.output, PathBuf::from("_site"));
        assert!(config.build.sitemap.enable);
        assert_eq!(config.serve.port, 8088);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [profile]
            name = "Test"

            [theme]
            color = "blue"
        "#,
        );

        assert!(result.is_err());
    }
}
