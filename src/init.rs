//! `lectern init`: scaffold a new site.
//!
//! Lays down the directory tree, a starter `lectern.toml`, one example
//! entry per data table and an editable stylesheet. The scaffold builds
//! as-is, so `init` followed by `serve` shows a working page before any
//! editing.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

const CONFIG_FILE: &str = "lectern.toml";

const SITE_DIRS: &[&str] = &[
    "data",
    "assets/images",
    "assets/styles",
    "assets/documents",
];

/// Starter content, embedded at compile time. Paths are relative to the
/// new site's root.
const STARTER_FILES: &[(&str, &str)] = &[
    (CONFIG_FILE, include_str!("embed/lectern.toml")),
    ("data/papers.toml", include_str!("embed/papers.toml")),
    ("data/teaching.toml", include_str!("embed/teaching.toml")),
    (
        "data/universities.toml",
        include_str!("embed/universities.toml"),
    ),
    ("assets/styles/site.css", include_str!("embed/site.css")),
];

/// Create a new site under the configured root.
///
/// `named` is false for a bare `lectern init`, which scaffolds into the
/// current directory and therefore insists on that directory being
/// empty.
pub fn new_site(config: &SiteConfig, named: bool) -> Result<()> {
    let root = config.get_root();

    if !named && !dir_is_empty(root)? {
        bail!(
            "Current directory is not empty. Use `lectern init <SITE_NAME>` to create in a subdirectory."
        );
    }

    scaffold(root)?;

    let output = config
        .build
        .output
        .strip_prefix(root)
        .unwrap_or(Path::new("public"));
    write_ignore_files(root, output)?;

    log!("init"; "site created at {}", root.display());
    log!("init"; "fill in [profile] in {CONFIG_FILE}, then run `lectern serve`");
    Ok(())
}

/// A directory that does not exist yet counts as empty.
fn dir_is_empty(path: &Path) -> Result<bool> {
    match fs::read_dir(path) {
        Ok(mut entries) => Ok(entries.next().is_none()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err.into()),
    }
}

/// Lay down the directory tree and the embedded starter files.
fn scaffold(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "`{}` already exists. Try `lectern init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    for (rel, content) in STARTER_FILES {
        let path = root.join(rel);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

/// Point fresh `.gitignore` and `.ignore` files at the build output.
/// Existing ignore files are left alone.
fn write_ignore_files(root: &Path, output: &Path) -> Result<()> {
    let line = output.display().to_string();

    for name in [".gitignore", ".ignore"] {
        let path = root.join(name);
        if !path.exists() {
            fs::write(&path, &line)?;
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
