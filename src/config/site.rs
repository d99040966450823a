//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,

    /// Public base URL, used for permalinks and Open Graph tags
    pub url: String,

    /// Service cards shown on the landing page
    pub features: Vec<Feature>,

    // Directory
    pub content_dir: String,
    pub assets_dir: String,

    /// How many summaries the landing page shows
    pub landing_posts: usize,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub outreach: OutreachConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine".to_string(),
            tagline: "Digital craft for growing brands".to_string(),
            description: "A digital agency building websites, software and campaigns.".to_string(),
            author: "Vitrine Studio".to_string(),
            url: "https://example.com".to_string(),
            features: default_features(),
            content_dir: "content/posts".to_string(),
            assets_dir: "assets".to_string(),
            landing_posts: 5,
            server: ServerConfig::default(),
            outreach: OutreachConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// One landing-page service card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub desc: String,
}

/// HTTP bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

/// Outbound mail settings. The API credential itself is never stored here;
/// it comes from the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachConfig {
    /// Base URL of the transactional-email provider API
    pub provider_url: String,

    /// Sender identity for both notification and acknowledgment mails
    pub from_address: String,

    /// Internal recipient for contact-form notifications
    pub notify_address: String,

    /// Provider audience that newsletter signups are added to
    pub audience_id: String,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            provider_url: "https://api.resend.com".to_string(),
            from_address: "Vitrine Studio <hello@example.com>".to_string(),
            notify_address: "inbox@example.com".to_string(),
            audience_id: String::new(),
        }
    }
}

fn default_features() -> Vec<Feature> {
    let cards = [
        (
            "Web Design",
            "Create stunning websites that adapt seamlessly to all devices, ensuring an optimal user experience.",
        ),
        (
            "Custom Software Solutions",
            "Develop tailor-made software applications to streamline your business processes and boost efficiency.",
        ),
        (
            "Social Media Management",
            "Strategically manage and grow your social media presence to enhance brand awareness and customer engagement.",
        ),
        (
            "SEO Optimization",
            "Improve your online visibility and drive organic traffic with our expert search engine optimization strategies.",
        ),
        (
            "Digital Marketing",
            "Create and execute comprehensive digital marketing campaigns to enhance your brand presence and engage customers.",
        ),
        (
            "UI/UX Design",
            "Craft intuitive and visually appealing user interfaces to enhance user engagement and satisfaction.",
        ),
    ];

    cards
        .into_iter()
        .map(|(title, desc)| Feature {
            title: title.to_string(),
            desc: desc.to_string(),
        })
        .collect()
}
