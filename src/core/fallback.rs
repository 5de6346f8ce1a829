//! Values served in place of gist content that cannot be loaded.
//!
//! Section fallbacks are the empty records; only the site configuration
//! carries real defaults so metadata, robots, sitemap and manifest stay
//! usable.

use crate::domain::model::{
    Alternates, Author, CareerData, ChangeFrequency, CrawlDirectives, DisplayMode, Manifest,
    ManifestIcon, MetaData, OpenGraph, OpenGraphImage, RobotsMeta, RobotsRules, Robots,
    RouteEntry, SiteConfigData, SiteInfo, SitemapItem, Twitter, Verification,
};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;

pub fn career() -> CareerData {
    CareerData {
        description_list: vec![],
        experience_list: vec![],
    }
}

pub fn site_config() -> SiteConfigData {
    SiteConfigData {
        site_info: SiteInfo {
            title: "Portfolio".to_string(),
            name: "Minimalist Portfolio".to_string(),
            short_name: "Portfolio".to_string(),
            description: "A professional portfolio website".to_string(),
            base_url: "/".to_string(),
            author: "Portfolio Owner".to_string(),
            author_url: "/".to_string(),
            twitter_handle: String::new(),
            locale: "en_US".to_string(),
        },
        routes: vec![RouteEntry {
            path: String::new(),
            priority: 1.0,
        }],
        meta_data_data: meta_data(),
        manifest_data: manifest(),
        robots_data: robots(),
        sitemap_data: sitemap(),
    }
}

pub fn meta_data() -> MetaData {
    MetaData {
        title: "Minimalist Portfolio".to_string(),
        description: "A professional portfolio website showcasing skills and experience"
            .to_string(),
        keywords: vec!["portfolio".to_string(), "professional".to_string()],
        authors: vec![Author {
            name: "Portfolio Owner".to_string(),
            url: "/".to_string(),
        }],
        robots: RobotsMeta {
            index: true,
            follow: true,
            google_bot: CrawlDirectives {
                index: true,
                follow: true,
            },
        },
        open_graph: OpenGraph {
            url: "/".to_string(),
            kind: "website".to_string(),
            title: "Minimalist Portfolio".to_string(),
            description: "A professional portfolio website".to_string(),
            site_name: "Portfolio".to_string(),
            locale: "en_US".to_string(),
            images: vec![OpenGraphImage {
                url: "/og-image.jpg".to_string(),
                width: 1200,
                height: 630,
                alt: "Portfolio".to_string(),
            }],
        },
        twitter: Twitter {
            card: "summary_large_image".to_string(),
            title: "Portfolio".to_string(),
            description: "A professional portfolio website".to_string(),
            creator: String::new(),
            images: vec!["/twitter-image.jpg".to_string()],
        },
        alternates: Alternates {
            canonical: "/".to_string(),
        },
        verification: Verification {
            google: String::new(),
        },
        other: BTreeMap::from([("application-name".to_string(), "Portfolio".to_string())]),
    }
}

pub fn manifest() -> Manifest {
    Manifest {
        name: "Portfolio".to_string(),
        short_name: "Portfolio".to_string(),
        description: "A professional portfolio website".to_string(),
        start_url: "/".to_string(),
        display: DisplayMode::Standalone,
        background_color: "#ffffff".to_string(),
        theme_color: "#000000".to_string(),
        icons: vec![ManifestIcon {
            src: "/favicon.ico".to_string(),
            sizes: "64x64".to_string(),
            mime_type: "image/x-icon".to_string(),
        }],
    }
}

pub fn robots() -> Robots {
    Robots {
        rules: RobotsRules {
            user_agent: "*".to_string(),
            allow: Some("/".to_string()),
            disallow: None,
        },
        sitemap: "/sitemap.xml".to_string(),
    }
}

pub fn sitemap() -> Vec<SitemapItem> {
    vec![SitemapItem {
        url: "/".to_string(),
        last_modified: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        change_frequency: Some(ChangeFrequency::Monthly),
        priority: 1.0,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site_config_is_self_consistent() {
        let config = site_config();
        assert_eq!(config.meta_data_data, meta_data());
        assert_eq!(config.manifest_data, manifest());
        assert_eq!(config.robots_data, robots());
        assert_eq!(config.sitemap_data.len(), 1);
        assert_eq!(config.sitemap_data[0].url, "/");
        assert_eq!(config.sitemap_data[0].change_frequency, Some(ChangeFrequency::Monthly));
    }

    #[test]
    fn test_career_fallback_is_empty() {
        assert!(career().is_empty());
    }
}
