//! Askama page templates and the view records they render.

use crate::config::EnvConfig;
use crate::domain::model::{
    AboutBlock, Achievement, CareerData, ConsultingData, ConsultingService, ContactData,
    Experience, MetaData, PresentationData, SitemapItem, SkillCategory,
};
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Utc};

/// Render `template` into an HTML response with `status`.
///
/// A render failure is logged and answered with a bare 500.
pub fn render_html<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
}

pub const HOME_NAV: [NavLink; 4] = [
    NavLink {
        title: "Career",
        href: "#career",
    },
    NavLink {
        title: "About",
        href: "#about",
    },
    NavLink {
        title: "Skills",
        href: "#skills",
    },
    NavLink {
        title: "Contact",
        href: "/contact",
    },
];

pub const PAGE_NAV: [NavLink; 1] = [NavLink {
    title: "Back to main page",
    href: "/",
}];

/// Shared `<head>`, navigation and footer values.
pub struct Layout {
    pub title: String,
    pub meta: MetaData,
    pub keywords: String,
    pub robots: String,
    pub google_bot: String,
    pub owner: String,
    pub nonce: String,
    pub env: EnvConfig,
    pub nav: &'static [NavLink],
    pub year: i32,
}

impl Layout {
    pub fn new(meta: MetaData, env: EnvConfig, nonce: String, nav: &'static [NavLink]) -> Self {
        Self {
            title: meta.title.clone(),
            keywords: meta.keywords.join(", "),
            robots: meta.robots.directives().to_meta_content(),
            google_bot: meta.robots.google_bot.to_meta_content(),
            owner: meta
                .authors
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| meta.title.clone()),
            meta,
            nonce,
            env,
            nav,
            year: Utc::now().year(),
        }
    }

    pub fn with_title(mut self, page: &str) -> Self {
        self.title = format!("{} | {}", page, self.meta.title);
        self
    }

    pub fn has_footer_contact(&self) -> bool {
        !self.env.email.is_empty() || !self.env.address.is_empty() || !self.env.phone.is_empty()
    }
}

pub struct PresentationView {
    pub display_name: String,
    pub job_title: String,
    pub years_of_experience: String,
    pub description: String,
    pub cv_pdf_link: String,
    pub mention_text: String,
    pub mention_url: String,
    pub mention_label: String,
}

impl PresentationView {
    /// `cv_fallback` is used when the section carries no CV link.
    pub fn new(data: &PresentationData, cv_fallback: &str) -> Self {
        let mention = data.consulting_mention.clone().unwrap_or_default();
        Self {
            display_name: data.display_name().to_string(),
            job_title: data.job_title.clone().unwrap_or_default(),
            years_of_experience: data.years_of_experience.clone().unwrap_or_default(),
            description: data.description.clone().unwrap_or_default(),
            cv_pdf_link: data
                .cv_pdf_link
                .clone()
                .filter(|link| !link.is_empty())
                .unwrap_or_else(|| cv_fallback.to_string()),
            mention_text: mention.text,
            mention_url: mention.link_url,
            mention_label: mention.link_label,
        }
    }

    pub fn has_mention(&self) -> bool {
        !self.mention_text.is_empty() && !self.mention_url.is_empty()
    }
}

pub struct ExperienceCard {
    pub id: String,
    pub contract_type: String,
    pub position: String,
    pub company: String,
    pub dates: String,
    pub icon_path: String,
    pub icon_width: u32,
    pub icon_height: u32,
    pub summary: String,
    pub contributions: Vec<String>,
}

impl From<&Experience> for ExperienceCard {
    fn from(e: &Experience) -> Self {
        Self {
            id: e.id.clone(),
            contract_type: e.contract_type.clone(),
            position: e.position.clone(),
            company: e.company.clone().unwrap_or_default(),
            dates: e.dates.clone(),
            icon_path: e.icon_path.clone(),
            icon_width: e.icon_width,
            icon_height: e.icon_height,
            summary: e.summary.clone(),
            contributions: e.contributions.clone(),
        }
    }
}

impl ExperienceCard {
    pub fn has_company(&self) -> bool {
        !self.company.is_empty()
    }

    pub fn has_icon(&self) -> bool {
        !self.icon_path.is_empty()
    }
}

pub struct CareerView {
    pub description_list: Vec<String>,
    pub cards: Vec<ExperienceCard>,
}

impl From<&CareerData> for CareerView {
    fn from(data: &CareerData) -> Self {
        Self {
            description_list: data.description_list.clone(),
            cards: data.experience_list.iter().map(ExperienceCard::from).collect(),
        }
    }
}

impl CareerView {
    pub fn is_empty(&self) -> bool {
        self.description_list.is_empty() && self.cards.is_empty()
    }
}

pub struct ConsultingCard {
    pub id: String,
    pub name: String,
    pub price: String,
    pub tasks: Vec<String>,
    pub achievements: Vec<Achievement>,
}

impl From<&ConsultingService> for ConsultingCard {
    fn from(s: &ConsultingService) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            price: s.price.clone().unwrap_or_default(),
            tasks: s.tasks.clone(),
            achievements: s.achievements.clone(),
        }
    }
}

#[derive(Default)]
pub struct ContactView {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

impl ContactView {
    /// `None` unless both the contact details and the links are present.
    pub fn from_data(data: &ContactData) -> Option<Self> {
        let (contact, links) = (data.contact.as_ref()?, data.links.as_ref()?);
        Some(Self {
            email: contact.email.clone().unwrap_or_default(),
            phone: contact.phone.clone().unwrap_or_default(),
            linkedin: links.linkedin.clone().unwrap_or_default(),
            github: links.github.clone().unwrap_or_default(),
        })
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub presentation: PresentationView,
    pub career: CareerView,
    pub about: Vec<AboutBlock>,
    pub skills: Vec<SkillCategory>,
}

#[derive(Template)]
#[template(path = "career.html")]
pub struct CareerTemplate {
    pub layout: Layout,
    pub career: CareerView,
}

#[derive(Template)]
#[template(path = "consulting.html")]
pub struct ConsultingTemplate {
    pub layout: Layout,
    pub description_list: Vec<String>,
    pub cards: Vec<ConsultingCard>,
}

impl ConsultingTemplate {
    pub fn new(layout: Layout, data: &ConsultingData) -> Self {
        Self {
            layout,
            description_list: data.description_list.clone(),
            cards: data.service_list.iter().map(ConsultingCard::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description_list.is_empty() && self.cards.is_empty()
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub visible: bool,
    pub contact: ContactView,
}

impl ContactTemplate {
    pub fn new(layout: Layout, data: &ContactData) -> Self {
        let contact = ContactView::from_data(data);
        Self {
            layout,
            visible: contact.is_some(),
            contact: contact.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "experience.html")]
pub struct ExperienceTemplate {
    pub layout: Layout,
    pub experience: ExperienceCard,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

pub struct SitemapEntry {
    pub url: String,
    pub last_modified: String,
    pub change_frequency: &'static str,
    pub priority: f64,
}

impl From<&SitemapItem> for SitemapEntry {
    fn from(item: &SitemapItem) -> Self {
        Self {
            url: item.url.clone(),
            last_modified: item.last_modified.clone(),
            change_frequency: item.change_frequency.map(|f| f.as_str()).unwrap_or(""),
            priority: item.priority,
        }
    }
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub entries: Vec<SitemapEntry>,
}

impl SitemapTemplate {
    pub fn new(items: &[SitemapItem]) -> Self {
        Self {
            entries: items.iter().map(SitemapEntry::from).collect(),
        }
    }
}
