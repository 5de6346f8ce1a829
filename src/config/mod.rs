#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod sources;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::ServeConfig;
pub use env::{EnvConfig, RuntimeMode, ValidationMode};
pub use sources::ContentSources;
pub use toml_config::SiteToml;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for any revalidation window: one year.
pub const MAX_REVALIDATE_SECS: u64 = 31_536_000;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Server settings once flags, file and defaults are combined.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub public_dir: PathBuf,
    pub revalidate: Duration,
    pub site_config_revalidate: Duration,
    pub request_timeout: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            public_dir: PathBuf::from("public"),
            revalidate: sources::DEFAULT_REVALIDATE,
            site_config_revalidate: sources::DEFAULT_SITE_CONFIG_REVALIDATE,
            request_timeout: crate::core::gist::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("public_dir", &self.public_dir.to_string_lossy())?;
        validate_range(
            "revalidate_secs",
            self.revalidate.as_secs(),
            0,
            MAX_REVALIDATE_SECS,
        )?;
        validate_range(
            "site_config_revalidate_secs",
            self.site_config_revalidate.as_secs(),
            0,
            MAX_REVALIDATE_SECS,
        )?;
        validate_range(
            "request_timeout_secs",
            self.request_timeout.as_secs(),
            1,
            MAX_REQUEST_TIMEOUT_SECS,
        )
    }
}
