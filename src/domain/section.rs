use std::fmt;

/// A content section backed by its own gist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Presentation,
    Career,
    About,
    Skills,
    Contact,
    Consulting,
    Home,
    SiteConfig,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Presentation,
        Section::Career,
        Section::About,
        Section::Skills,
        Section::Contact,
        Section::Consulting,
        Section::Home,
        Section::SiteConfig,
    ];

    /// Environment variable holding the section's gist URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            Section::Presentation => "NEXT_PUBLIC_GIST_PRESENTATION_URL",
            Section::Career => "NEXT_PUBLIC_GIST_CAREER_URL",
            Section::About => "NEXT_PUBLIC_GIST_ABOUT_URL",
            Section::Skills => "NEXT_PUBLIC_GIST_SKILLS_URL",
            Section::Contact => "NEXT_PUBLIC_GIST_CONTACT_URL",
            Section::Consulting => "NEXT_PUBLIC_GIST_CONSULTING_URL",
            Section::Home => "NEXT_PUBLIC_GIST_HOME_URL",
            Section::SiteConfig => "NEXT_PUBLIC_GIST_SITE_CONFIG_URL",
        }
    }

    /// Key used for the section in the `[sources]` table of the TOML file.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Presentation => "presentation",
            Section::Career => "career",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Contact => "contact",
            Section::Consulting => "consulting",
            Section::Home => "home",
            Section::SiteConfig => "site_config",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
