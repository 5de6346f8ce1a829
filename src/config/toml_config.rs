use crate::domain::section::Section;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_positive_number, validate_socket_addr, validate_url, Validate,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex")
});

/// Optional site configuration file.
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8080"
/// public_dir = "public"
/// request_timeout_secs = 10
///
/// [content]
/// revalidate_secs = 3600
/// site_config_revalidate_secs = 86400
///
/// [sources]
/// career = "${CAREER_GIST_URL}"
/// site_config = "https://gist.githubusercontent.com/me/abc/raw/site.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteToml {
    #[serde(default)]
    pub server: ServerTable,
    #[serde(default)]
    pub content: ContentTable,
    #[serde(default)]
    pub sources: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerTable {
    pub bind: Option<String>,
    pub public_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTable {
    pub revalidate_secs: Option<u64>,
    pub site_config_revalidate_secs: Option<u64>,
}

impl SiteToml {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SiteError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// Parse `content`, then replace `${VAR}` placeholders in its string
    /// values through `lookup`.
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: SiteToml =
            toml::from_str(content).map_err(|e| SiteError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        if let Some(bind) = &config.server.bind {
            config.server.bind = Some(substitute_vars(bind, &lookup));
        }
        if let Some(dir) = &config.server.public_dir {
            let dir = substitute_vars(&dir.to_string_lossy(), &lookup);
            config.server.public_dir = Some(PathBuf::from(dir));
        }
        for url in config.sources.values_mut() {
            *url = substitute_vars(url, &lookup);
        }
        Ok(config)
    }

    /// Resolved URL for `section`; `None` when absent, empty or unresolved.
    pub fn source(&self, section: Section) -> Option<&str> {
        self.sources
            .get(section.key())
            .map(|url| url.trim())
            .filter(|url| !url.is_empty() && !PLACEHOLDER_RE.is_match(url))
    }

    /// Source keys whose placeholder had no matching variable.
    pub fn unresolved_sources(&self) -> Vec<&str> {
        self.sources
            .iter()
            .filter(|(_, url)| PLACEHOLDER_RE.is_match(url))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

impl Validate for SiteToml {
    fn validate(&self) -> Result<()> {
        if let Some(bind) = &self.server.bind {
            validate_socket_addr("server.bind", bind)?;
        }
        if let Some(timeout) = self.server.request_timeout_secs {
            validate_positive_number("server.request_timeout_secs", timeout, 1)?;
        }

        for key in self.sources.keys() {
            if !Section::ALL.iter().any(|s| s.key() == key) {
                let known: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();
                return Err(SiteError::InvalidConfigValueError {
                    field: format!("sources.{}", key),
                    value: key.clone(),
                    reason: format!("Unknown section. Valid sections: {}", known.join(", ")),
                });
            }
        }

        for section in Section::ALL {
            if let Some(url) = self.source(section) {
                validate_url(&format!("sources.{}", section.key()), url)?;
            }
        }

        Ok(())
    }
}

fn substitute_vars<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER_RE
        .replace_all(value, |caps: &Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[server]
bind = "0.0.0.0:8080"
public_dir = "assets"
request_timeout_secs = 5

[content]
revalidate_secs = 600
site_config_revalidate_secs = 7200

[sources]
career = "https://gist.example.com/career.json"
site_config = "https://gist.example.com/site.json"
"#;

    #[test]
    fn test_parse_full_file() {
        let config = SiteToml::from_toml_str(FULL_TOML).unwrap();

        assert_eq!(config.server.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.server.public_dir, Some(PathBuf::from("assets")));
        assert_eq!(config.server.request_timeout_secs, Some(5));
        assert_eq!(config.content.revalidate_secs, Some(600));
        assert_eq!(config.content.site_config_revalidate_secs, Some(7200));
        assert_eq!(
            config.source(Section::Career),
            Some("https://gist.example.com/career.json")
        );
        assert_eq!(config.source(Section::About), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_every_table_is_optional() {
        let config = SiteToml::from_toml_str("").unwrap();
        assert_eq!(config, SiteToml::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let content = r#"
[sources]
skills = "${SKILLS_URL}"
"#;
        let config = SiteToml::from_toml_str_with(content, |name| {
            (name == "SKILLS_URL").then(|| "https://gist.example.com/skills.json".to_string())
        })
        .unwrap();

        assert_eq!(
            config.source(Section::Skills),
            Some("https://gist.example.com/skills.json")
        );
    }

    #[test]
    fn test_substituted_values_cannot_inject_toml() {
        let content = r#"
[server]
bind = "${BIND}"

[sources]
career = "${CAREER_URL}"
"#;
        let injected = "https://gist.example.com/c.json\"\nblog = \"x";
        let config = SiteToml::from_toml_str_with(content, |name| match name {
            "BIND" => Some("0.0.0.0:8080".to_string()),
            "CAREER_URL" => Some(injected.to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources["career"], injected);
        assert!(!config.sources.contains_key("blog"));
    }

    #[test]
    fn test_placeholder_from_process_environment() {
        std::env::set_var("FOLIO_TEST_HOME_GIST", "https://gist.example.com/home.json");
        let config = SiteToml::from_toml_str(
            r#"
[sources]
home = "${FOLIO_TEST_HOME_GIST}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.source(Section::Home),
            Some("https://gist.example.com/home.json")
        );
    }

    #[test]
    fn test_unresolved_placeholder_leaves_source_unset() {
        let content = r#"
[sources]
about = "${FOLIO_TEST_NEVER_DEFINED}"
contact = ""
"#;
        let config = SiteToml::from_toml_str_with(content, |_| None).unwrap();

        assert_eq!(config.source(Section::About), None);
        assert_eq!(config.source(Section::Contact), None);
        assert_eq!(config.unresolved_sources(), vec!["about"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let config = SiteToml::from_toml_str(
            r#"
[sources]
blog = "https://gist.example.com/blog.json"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sources.blog"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_bind = SiteToml::from_toml_str("[server]\nbind = \"localhost\"\n").unwrap();
        assert!(bad_bind.validate().is_err());

        let bad_timeout =
            SiteToml::from_toml_str("[server]\nrequest_timeout_secs = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());

        let bad_url = SiteToml::from_toml_str("[sources]\ncareer = \"not a url\"\n").unwrap();
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = SiteToml::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(FULL_TOML.as_bytes()).unwrap();

        let config = SiteToml::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.source(Section::SiteConfig),
            Some("https://gist.example.com/site.json")
        );
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteToml::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.is_config_error());
    }
}
