pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::ServeConfig;

pub use config::{ContentSources, EnvConfig, ServerSettings, SiteToml};
pub use core::{gist::GistClient, services::ContentService};
pub use utils::error::{Result, SiteError};
pub use web::{router::create_router, state::AppState};
