//! Content records served by the gists.
//!
//! Every record deserializes from the camelCase JSON the gists use and
//! derives `Default`, so a fallback always has the same type as live data.
//! Consumers decide whether to render a section through `is_empty`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Site configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteInfo {
    pub title: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub base_url: String,
    pub author: String,
    pub author_url: String,
    pub twitter_handle: String,
    pub locale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteEntry {
    pub path: String,
    pub priority: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlDirectives {
    pub index: bool,
    pub follow: bool,
}

impl CrawlDirectives {
    /// Value for a `<meta name="robots">` tag, e.g. `index, follow`.
    pub fn to_meta_content(&self) -> String {
        let index = if self.index { "index" } else { "noindex" };
        let follow = if self.follow { "follow" } else { "nofollow" };
        format!("{}, {}", index, follow)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RobotsMeta {
    pub index: bool,
    pub follow: bool,
    pub google_bot: CrawlDirectives,
}

impl RobotsMeta {
    pub fn directives(&self) -> CrawlDirectives {
        CrawlDirectives {
            index: self.index,
            follow: self.follow,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenGraph {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub locale: String,
    pub images: Vec<OpenGraphImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Twitter {
    pub card: String,
    pub title: String,
    pub description: String,
    pub creator: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternates {
    pub canonical: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Verification {
    pub google: String,
}

/// Page-level SEO metadata rendered into every `<head>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaData {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub authors: Vec<Author>,
    pub robots: RobotsMeta,
    pub open_graph: OpenGraph,
    pub twitter: Twitter,
    pub alternates: Alternates,
    pub verification: Verification,
    pub other: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Browser,
    Fullscreen,
    #[default]
    Standalone,
    MinimalUi,
}

/// Web app manifest, serialized with the snake_case keys browsers expect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: DisplayMode,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RobotsRules {
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Robots {
    pub rules: RobotsRules,
    pub sitemap: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SitemapItem {
    pub url: String,
    pub last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_frequency: Option<ChangeFrequency>,
    pub priority: f64,
}

impl Default for SitemapItem {
    fn default() -> Self {
        Self {
            url: String::new(),
            last_modified: String::new(),
            change_frequency: None,
            priority: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfigData {
    pub site_info: SiteInfo,
    pub routes: Vec<RouteEntry>,
    pub meta_data_data: MetaData,
    pub manifest_data: Manifest,
    pub robots_data: Robots,
    pub sitemap_data: Vec<SitemapItem>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultingMention {
    pub text: String,
    pub link_url: String,
    pub link_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_pdf_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consulting_mention: Option<ConsultingMention>,
}

impl PresentationData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.job_title.is_none()
            && self.description.is_none()
            && self.years_of_experience.is_none()
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "No body",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: String,
    pub contract_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub dates: String,
    pub position: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub icon_width: u32,
    #[serde(default)]
    pub icon_height: u32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub contributions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerData {
    pub description_list: Vec<String>,
    pub experience_list: Vec<Experience>,
}

impl CareerData {
    pub fn is_empty(&self) -> bool {
        self.description_list.is_empty() && self.experience_list.is_empty()
    }

    pub fn experience(&self, id: &str) -> Option<&Experience> {
        self.experience_list.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutBlock {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub about_list: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Advanced,
    Intermediate,
    Beginner,
    /// Any level the site has no badge for.
    #[default]
    #[serde(other)]
    Unknown,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != SkillLevel::Unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub local_path: String,
    pub label: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skill_list: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ContactLinks>,
}

impl ContactData {
    /// The contact page needs both blocks; either one missing hides it.
    pub fn is_empty(&self) -> bool {
        self.contact.is_none() || self.links.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub achievement_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultingService {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultingData {
    pub description_list: Vec<String>,
    pub service_list: Vec<ConsultingService>,
}

impl ConsultingData {
    pub fn is_empty(&self) -> bool {
        self.description_list.is_empty() && self.service_list.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<String>,
    pub about: Vec<AboutBlock>,
    pub skills: Vec<SkillCategory>,
}

impl HomeData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.job_title.is_none()
            && self.description.is_none()
            && self.years_of_experience.is_none()
            && self.about.is_empty()
            && self.skills.is_empty()
    }

    /// Fill the presentation fields the presentation gist left unset.
    pub fn complete(&self, presentation: PresentationData) -> PresentationData {
        PresentationData {
            name: presentation.name.or_else(|| self.name.clone()),
            job_title: presentation.job_title.or_else(|| self.job_title.clone()),
            description: presentation.description.or_else(|| self.description.clone()),
            years_of_experience: presentation
                .years_of_experience
                .or_else(|| self.years_of_experience.clone()),
            ..presentation
        }
    }
}
