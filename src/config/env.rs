//! Contact and social values read from the environment.
//!
//! Every value is optional. A variable that is absent or fails its rule
//! becomes an empty string; it never aborts startup.

use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_email, validate_present, validate_url};
use serde::Serialize;
use std::str::FromStr;

pub const EMAIL_VAR: &str = "NEXT_PUBLIC_EMAIL";
pub const ADDRESS_VAR: &str = "NEXT_PUBLIC_ADDRESS";
pub const PHONE_VAR: &str = "NEXT_PUBLIC_PHONE";
pub const GOOGLE_MAPS_LINK_VAR: &str = "NEXT_PUBLIC_GOOGLE_MAPS_LINK";
pub const LINKEDIN_PROFILE_VAR: &str = "NEXT_PUBLIC_LINKEDIN_PROFILE";
pub const GITHUB_PROFILE_VAR: &str = "NEXT_PUBLIC_GITHUB_PROFILE";
pub const GITHUB_REPOSITORY_VAR: &str = "NEXT_PUBLIC_GITHUB_REPOSITORY";
pub const CV_PDF_LINK_VAR: &str = "NEXT_PUBLIC_CV_PDF_LINK";
pub const NODE_ENV_VAR: &str = "NODE_ENV";
pub const DEBUG_MODE_VAR: &str = "DEBUG_MODE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
    Test,
}

impl FromStr for RuntimeMode {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" => Ok(RuntimeMode::Development),
            "production" => Ok(RuntimeMode::Production),
            "test" => Ok(RuntimeMode::Test),
            other => Err(SiteError::InvalidConfigValueError {
                field: NODE_ENV_VAR.to_string(),
                value: other.to_string(),
                reason: "Expected one of: development, production, test".to_string(),
            }),
        }
    }
}

/// How hard to fail on values that cannot be defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Strict,
    /// Test execution: any error yields the all-empty defaults.
    Relaxed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvConfig {
    pub email: String,
    pub address: String,
    pub phone: String,
    pub google_maps_link: String,
    pub linkedin_profile: String,
    pub github_profile: String,
    pub github_repository: String,
    pub cv_pdf_link: String,
    pub mode: RuntimeMode,
    pub debug_mode: bool,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(ValidationMode::Strict)
    }

    pub fn from_env_with(mode: ValidationMode) -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), mode)
    }

    pub fn from_lookup<F>(lookup: F, validation: ValidationMode) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::parse(&lookup) {
            Ok(config) => Ok(config),
            Err(e) if validation == ValidationMode::Relaxed => {
                tracing::warn!("Environment validation failed in relaxed mode: {}", e);
                Ok(Self::test_defaults())
            }
            Err(e) => Err(e),
        }
    }

    pub fn test_defaults() -> Self {
        Self {
            mode: RuntimeMode::Test,
            ..Self::default()
        }
    }

    pub fn is_production(&self) -> bool {
        self.mode == RuntimeMode::Production
    }

    pub fn is_development(&self) -> bool {
        self.mode == RuntimeMode::Development
    }

    fn parse<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(NODE_ENV_VAR) {
            Some(value) => value.parse()?,
            None => RuntimeMode::default(),
        };

        Ok(Self {
            email: optional(lookup, EMAIL_VAR, validate_email),
            address: optional(lookup, ADDRESS_VAR, validate_present),
            phone: optional(lookup, PHONE_VAR, validate_present),
            google_maps_link: optional(lookup, GOOGLE_MAPS_LINK_VAR, validate_url),
            linkedin_profile: optional(lookup, LINKEDIN_PROFILE_VAR, validate_url),
            github_profile: optional(lookup, GITHUB_PROFILE_VAR, validate_url),
            github_repository: optional(lookup, GITHUB_REPOSITORY_VAR, validate_url),
            cv_pdf_link: optional(lookup, CV_PDF_LINK_VAR, validate_url),
            mode,
            debug_mode: lookup(DEBUG_MODE_VAR).as_deref() == Some("true"),
        })
    }
}

fn optional<F>(lookup: &F, name: &str, rule: fn(&str, &str) -> Result<()>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => String::new(),
        Some(value) => match rule(name, &value) {
            Ok(()) => value,
            Err(e) => {
                tracing::debug!("Ignoring {}: {}", name, e);
                String::new()
            }
        },
    }
}
