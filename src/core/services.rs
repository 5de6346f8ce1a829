use crate::core::fallback;
use crate::domain::model::{
    AboutBlock, CareerData, ConsultingData, ContactData, Experience, HomeData, Manifest, MetaData,
    PresentationData, Robots, SiteConfigData, SitemapItem, SkillCategory,
};
use crate::domain::ports::{ContentFetcher, SourceProvider};
use crate::domain::section::Section;
use crate::utils::error::{Result, SiteError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Per-section content loaders.
///
/// Every loader resolves to a value of its section's type: the gist content
/// when it can be fetched, the section fallback otherwise.
#[derive(Clone)]
pub struct ContentService {
    fetcher: Arc<dyn ContentFetcher>,
    sources: Arc<dyn SourceProvider>,
}

impl ContentService {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, sources: Arc<dyn SourceProvider>) -> Self {
        Self { fetcher, sources }
    }

    pub fn sources(&self) -> &dyn SourceProvider {
        self.sources.as_ref()
    }

    /// Fetch a section without substituting the fallback.
    pub async fn try_load<T: DeserializeOwned>(&self, section: Section) -> Option<Result<T>> {
        let url = self.sources.source_url(section)?;
        let revalidate = self.sources.revalidate(section);
        let loaded = async {
            let value = self.fetcher.fetch_json(url, revalidate).await?;
            Ok::<T, SiteError>(serde_json::from_value(value)?)
        };
        Some(loaded.await)
    }

    /// Fetch `section` through its typed shape and hand it back as JSON.
    pub async fn try_load_json(&self, section: Section) -> Option<Result<Value>> {
        match section {
            Section::Presentation => self.try_load_as::<PresentationData>(section).await,
            Section::Career => self.try_load_as::<CareerData>(section).await,
            Section::About => self.try_load_as::<Vec<AboutBlock>>(section).await,
            Section::Skills => self.try_load_as::<Vec<SkillCategory>>(section).await,
            Section::Contact => self.try_load_as::<ContactData>(section).await,
            Section::Consulting => self.try_load_as::<ConsultingData>(section).await,
            Section::Home => self.try_load_as::<HomeData>(section).await,
            Section::SiteConfig => self.try_load_as::<SiteConfigData>(section).await,
        }
    }

    async fn try_load_as<T>(&self, section: Section) -> Option<Result<Value>>
    where
        T: DeserializeOwned + Serialize,
    {
        let loaded = self.try_load::<T>(section).await?;
        Some(loaded.and_then(|data| Ok(serde_json::to_value(data)?)))
    }

    async fn load_or<T, F>(&self, section: Section, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.try_load(section).await {
            None => {
                tracing::error!(
                    "Missing environment variable for {} section ({})",
                    section,
                    section.env_var()
                );
                fallback()
            }
            Some(Ok(data)) => data,
            Some(Err(e)) => {
                tracing::error!(section = %section, error = %e, "Error fetching {} data", section);
                fallback()
            }
        }
    }

    pub async fn presentation_data(&self) -> PresentationData {
        self.load_or(Section::Presentation, PresentationData::default)
            .await
    }

    pub async fn career_data(&self) -> CareerData {
        self.load_or(Section::Career, fallback::career).await
    }

    pub async fn about_data(&self) -> Vec<AboutBlock> {
        self.load_or(Section::About, Vec::new).await
    }

    pub async fn skills_data(&self) -> Vec<SkillCategory> {
        self.load_or(Section::Skills, Vec::new).await
    }

    pub async fn contact_data(&self) -> ContactData {
        self.load_or(Section::Contact, ContactData::default).await
    }

    pub async fn consulting_data(&self) -> ConsultingData {
        self.load_or(Section::Consulting, ConsultingData::default)
            .await
    }

    pub async fn home_data(&self) -> HomeData {
        self.load_or(Section::Home, HomeData::default).await
    }

    pub async fn site_config_data(&self) -> SiteConfigData {
        self.load_or(Section::SiteConfig, fallback::site_config)
            .await
    }

    pub async fn meta_data(&self) -> MetaData {
        self.site_config_data().await.meta_data_data
    }

    pub async fn manifest_data(&self) -> Manifest {
        self.site_config_data().await.manifest_data
    }

    pub async fn robots_data(&self) -> Robots {
        self.site_config_data().await.robots_data
    }

    pub async fn sitemap_data(&self) -> Vec<SitemapItem> {
        self.site_config_data().await.sitemap_data
    }

    pub async fn experience_by_id(&self, id: &str) -> Option<Experience> {
        self.career_data().await.experience(id).cloned()
    }
}
