//! `[serve]` section of `lectern.toml`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section. Settings for the development server started by
/// `lectern serve`.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"   # reachable from the LAN
/// port = 8080
/// watch = false           # serve without rebuilding on changes
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Interface to bind. `127.0.0.1` keeps the server local; `0.0.0.0`
    /// exposes it to the network.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// TCP port to listen on. When taken, the next few ports are tried
    /// before giving up.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Rebuild the site when data, assets or the config change.
    #[serde(default = "defaults::on")]
    #[educe(Default = true)]
    pub watch: bool,
}
