use crate::config::toml_config::SiteToml;
use crate::domain::ports::SourceProvider;
use crate::domain::section::Section;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(3600);
pub const DEFAULT_SITE_CONFIG_REVALIDATE: Duration = Duration::from_secs(86400);

/// Gist URL per section plus the revalidation windows.
///
/// Empty values count as unset.
#[derive(Debug, Clone)]
pub struct ContentSources {
    urls: HashMap<Section, String>,
    revalidate: Duration,
    site_config_revalidate: Duration,
}

impl ContentSources {
    pub fn new() -> Self {
        Self {
            urls: HashMap::new(),
            revalidate: DEFAULT_REVALIDATE,
            site_config_revalidate: DEFAULT_SITE_CONFIG_REVALIDATE,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Section::ALL
            .iter()
            .fold(Self::new(), |sources, section| match lookup(section.env_var()) {
                Some(url) => sources.with_source(*section, url),
                None => sources,
            })
    }

    pub fn with_source(mut self, section: Section, url: impl Into<String>) -> Self {
        let url = url.into();
        let url = url.trim();
        if url.is_empty() {
            self.urls.remove(&section);
        } else {
            self.urls.insert(section, url.to_string());
        }
        self
    }

    pub fn with_revalidate(mut self, revalidate: Duration, site_config_revalidate: Duration) -> Self {
        self.revalidate = revalidate;
        self.site_config_revalidate = site_config_revalidate;
        self
    }

    /// Fill sections still unset from the file's `[sources]` table.
    pub fn merge_toml(mut self, file: &SiteToml) -> Self {
        for section in Section::ALL {
            if self.urls.contains_key(&section) {
                continue;
            }
            if let Some(url) = file.source(section) {
                self.urls.insert(section, url.to_string());
            }
        }
        self
    }

    pub fn is_configured(&self, section: Section) -> bool {
        self.urls.contains_key(&section)
    }

    /// Configured sections in declaration order.
    pub fn configured(&self) -> Vec<(Section, &str)> {
        Section::ALL
            .iter()
            .filter_map(|s| self.urls.get(s).map(|url| (*s, url.as_str())))
            .collect()
    }

    pub fn missing(&self) -> Vec<Section> {
        Section::ALL
            .iter()
            .copied()
            .filter(|s| !self.urls.contains_key(s))
            .collect()
    }
}

impl Default for ContentSources {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceProvider for ContentSources {
    fn source_url(&self, section: Section) -> Option<&str> {
        self.urls.get(&section).map(String::as_str)
    }

    fn revalidate(&self, section: Section) -> Duration {
        match section {
            Section::SiteConfig => self.site_config_revalidate,
            _ => self.revalidate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_reads_section_variables() {
        let sources = ContentSources::from_lookup(|name| match name {
            "NEXT_PUBLIC_GIST_CAREER_URL" => Some("https://gist.example.com/career.json".into()),
            "NEXT_PUBLIC_GIST_ABOUT_URL" => Some("".into()),
            _ => None,
        });

        assert_eq!(
            sources.source_url(Section::Career),
            Some("https://gist.example.com/career.json")
        );
        assert_eq!(sources.source_url(Section::About), None);
        assert!(!sources.is_configured(Section::About));
        assert_eq!(sources.configured().len(), 1);
        assert_eq!(sources.missing().len(), 7);
    }

    #[test]
    fn test_revalidate_windows() {
        let sources = ContentSources::new();
        assert_eq!(sources.revalidate(Section::Career), Duration::from_secs(3600));
        assert_eq!(sources.revalidate(Section::SiteConfig), Duration::from_secs(86400));

        let sources = sources.with_revalidate(Duration::from_secs(60), Duration::from_secs(120));
        assert_eq!(sources.revalidate(Section::Skills), Duration::from_secs(60));
        assert_eq!(sources.revalidate(Section::SiteConfig), Duration::from_secs(120));
    }

    #[test]
    fn test_environment_wins_over_file() {
        let file = SiteToml::from_toml_str(
            r#"
[sources]
career = "https://file.example.com/career.json"
skills = "https://file.example.com/skills.json"
"#,
        )
        .unwrap();

        let sources = ContentSources::new()
            .with_source(Section::Career, "https://env.example.com/career.json")
            .merge_toml(&file);

        assert_eq!(
            sources.source_url(Section::Career),
            Some("https://env.example.com/career.json")
        );
        assert_eq!(
            sources.source_url(Section::Skills),
            Some("https://file.example.com/skills.json")
        );
    }

    #[test]
    fn test_configured_follows_section_order() {
        let sources = ContentSources::new()
            .with_source(Section::SiteConfig, "https://gist.example.com/site.json")
            .with_source(Section::Presentation, "https://gist.example.com/p.json");

        let sections: Vec<Section> = sources.configured().into_iter().map(|(s, _)| s).collect();
        assert_eq!(sections, vec![Section::Presentation, Section::SiteConfig]);
    }
}
