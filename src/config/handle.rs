//! Process-wide config handle.
//!
//! The config lives in an `ArcSwap` so the server and watcher threads
//! read it without locking while the watcher swaps in a fresh copy when
//! `lectern.toml` changes on disk. Readers that already hold an `Arc`
//! keep seeing the config they loaded; only later `cfg()` calls observe
//! the replacement.
//!
//! A fingerprint of the raw file content is kept alongside, so editor
//! noise (save without changes, touched mtime) does not trigger a
//! rebuild.

use super::SiteConfig;
use arc_swap::ArcSwap;
use rustc_hash::FxHasher;
use std::hash::Hasher;
use std::sync::{Arc, LazyLock, atomic::AtomicU64, atomic::Ordering};

static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Fingerprint of the config file content behind the current CONFIG.
static LOADED_FINGERPRINT: AtomicU64 = AtomicU64::new(0);

fn fingerprint(content: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(content);
    hasher.finish()
}

/// Current config, wait-free.
///
/// The returned `Arc` derefs to `&SiteConfig`, so callers pass `&cfg()`
/// straight into functions taking a config reference.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Install the config loaded at startup. Called once from `main`.
#[inline]
pub fn init_config(config: SiteConfig) {
    if config.config_path.exists()
        && let Ok(content) = std::fs::read_to_string(&config.config_path)
    {
        LOADED_FINGERPRINT.store(fingerprint(content.as_bytes()), Ordering::Relaxed);
    }

    CONFIG.store(Arc::new(config));
}

/// Re-read `lectern.toml` and swap the global config if its content
/// actually changed.
///
/// Returns `Ok(true)` when a new config was installed, `Ok(false)` when
/// the file matches the last load. Parse and validation failures leave
/// the old config in place; watch mode reports them and keeps running.
pub fn reload_config() -> anyhow::Result<bool> {
    let current = cfg();
    let cli = current.get_cli();

    // config_path is absolute by the time anything can call this.
    let content = std::fs::read_to_string(&current.config_path)?;

    let seen = fingerprint(content.as_bytes());
    if seen == LOADED_FINGERPRINT.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let mut fresh = SiteConfig::from_str(&content)?;
    fresh.update_with_cli(cli);
    fresh.validate()?;

    CONFIG.store(Arc::new(fresh));
    LOADED_FINGERPRINT.store(seen, Ordering::Relaxed);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let content = b"[profile]\nname = \"Chiara Bernardi\"";

        assert_eq!(fingerprint(content), fingerprint(content));
    }

    #[test]
    fn test_fingerprint_sees_one_byte_edits() {
        let before = fingerprint(b"[serve]\nport = 4812");
        let after = fingerprint(b"[serve]\nport = 4813");

        assert_ne!(before, after);
    }

    #[test]
    fn test_fingerprint_of_empty_file() {
        // Empty and missing-section configs are legal, so the empty
        // fingerprint must be stable too.
        assert_eq!(fingerprint(b""), fingerprint(b""));
    }
}
