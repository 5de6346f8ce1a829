use crate::config::toml_config::SiteToml;
use crate::config::{ServerSettings, MAX_REQUEST_TIMEOUT_SECS, MAX_REVALIDATE_SECS};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_socket_addr,
    Validate,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command line of the site server.
///
/// Flags left unset fall back to the TOML file, then to the built-in
/// defaults shown in the help text.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "folio-site")]
#[command(about = "Portfolio website rendered from remote gist content")]
pub struct ServeConfig {
    #[arg(long, value_name = "ADDR", help = "Address to listen on [default: 127.0.0.1:3000]")]
    pub bind: Option<String>,

    #[arg(long, value_name = "PATH", help = "Optional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory served under /static [default: public]")]
    pub public_dir: Option<PathBuf>,

    #[arg(long, help = "Seconds a fetched section stays fresh [default: 3600]")]
    pub revalidate_secs: Option<u64>,

    #[arg(long, help = "Seconds the site configuration stays fresh [default: 86400]")]
    pub site_config_revalidate_secs: Option<u64>,

    #[arg(long, help = "Timeout for one gist request [default: 10]")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,
}

impl ServeConfig {
    /// Combine flags, the optional file and defaults. Flags win.
    pub fn settings(&self, file: Option<&SiteToml>) -> Result<ServerSettings> {
        let defaults = ServerSettings::default();
        let server = file.map(|f| &f.server);
        let content = file.map(|f| &f.content);

        let bind = match self
            .bind
            .as_deref()
            .or_else(|| server.and_then(|s| s.bind.as_deref()))
        {
            Some(bind) => validate_socket_addr("bind", bind)?,
            None => defaults.bind,
        };

        let public_dir = self
            .public_dir
            .clone()
            .or_else(|| server.and_then(|s| s.public_dir.clone()))
            .unwrap_or(defaults.public_dir);

        let secs = |flag: Option<u64>, from_file: Option<u64>, default: Duration| {
            flag.or(from_file)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        let settings = ServerSettings {
            bind,
            public_dir,
            revalidate: secs(
                self.revalidate_secs,
                content.and_then(|c| c.revalidate_secs),
                defaults.revalidate,
            ),
            site_config_revalidate: secs(
                self.site_config_revalidate_secs,
                content.and_then(|c| c.site_config_revalidate_secs),
                defaults.site_config_revalidate,
            ),
            request_timeout: secs(
                self.request_timeout_secs,
                server.and_then(|s| s.request_timeout_secs),
                defaults.request_timeout,
            ),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for ServeConfig {
    fn validate(&self) -> Result<()> {
        if let Some(bind) = &self.bind {
            validate_socket_addr("bind", bind)?;
        }
        if let Some(dir) = &self.public_dir {
            validate_non_empty_string("public_dir", &dir.to_string_lossy())?;
        }
        if let Some(secs) = self.revalidate_secs {
            validate_range("revalidate_secs", secs, 0, MAX_REVALIDATE_SECS)?;
        }
        if let Some(secs) = self.site_config_revalidate_secs {
            validate_range("site_config_revalidate_secs", secs, 0, MAX_REVALIDATE_SECS)?;
        }
        if let Some(secs) = self.request_timeout_secs {
            validate_positive_number("request_timeout_secs", secs, 1)?;
            validate_range("request_timeout_secs", secs, 1, MAX_REQUEST_TIMEOUT_SECS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeConfig {
        let mut argv = vec!["folio-site"];
        argv.extend_from_slice(args);
        ServeConfig::parse_from(argv)
    }

    #[test]
    fn test_defaults_without_flags_or_file() {
        let config = parse(&[]);
        assert!(config.validate().is_ok());

        let settings = config.settings(None).unwrap();
        assert_eq!(settings, ServerSettings::default());
        assert_eq!(settings.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(settings.public_dir, PathBuf::from("public"));
        assert_eq!(settings.revalidate, Duration::from_secs(3600));
        assert_eq!(settings.site_config_revalidate, Duration::from_secs(86400));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_flags_are_parsed() {
        let config = parse(&[
            "--bind",
            "0.0.0.0:8080",
            "--public-dir",
            "site/public",
            "--revalidate-secs",
            "60",
            "--request-timeout-secs",
            "3",
            "--verbose",
            "--json-logs",
        ]);

        assert!(config.verbose);
        assert!(config.json_logs);
        let settings = config.settings(None).unwrap();
        assert_eq!(settings.bind.port(), 8080);
        assert_eq!(settings.public_dir, PathBuf::from("site/public"));
        assert_eq!(settings.revalidate, Duration::from_secs(60));
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_flags_win_over_file_and_file_wins_over_defaults() {
        let file = SiteToml::from_toml_str(
            r#"
[server]
bind = "0.0.0.0:9000"
public_dir = "assets"

[content]
revalidate_secs = 120
site_config_revalidate_secs = 240
"#,
        )
        .unwrap();
        let config = parse(&["--bind", "127.0.0.1:4000"]);

        let settings = config.settings(Some(&file)).unwrap();
        assert_eq!(settings.bind.port(), 4000);
        assert_eq!(settings.public_dir, PathBuf::from("assets"));
        assert_eq!(settings.revalidate, Duration::from_secs(120));
        assert_eq!(settings.site_config_revalidate, Duration::from_secs(240));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        assert!(parse(&["--bind", "not-an-address"]).validate().is_err());
        assert!(parse(&["--request-timeout-secs", "0"]).validate().is_err());
        assert!(parse(&["--request-timeout-secs", "3600"]).validate().is_err());
        assert!(parse(&["--revalidate-secs", "99999999999"]).validate().is_err());
    }

    #[test]
    fn test_invalid_bind_in_file_fails_settings() {
        let file = SiteToml::from_toml_str("[server]\nbind = \"nowhere\"\n").unwrap();
        let err = parse(&[]).settings(Some(&file)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_revalidate_is_allowed() {
        let settings = parse(&["--revalidate-secs", "0"]).settings(None).unwrap();
        assert!(settings.revalidate.is_zero());
    }
}
