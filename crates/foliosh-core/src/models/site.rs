//! Static site content from which the virtual filesystem is built.

use serde::Deserialize;

use crate::config;
use crate::core::SiteError;
use crate::models::{Block, Rich};

/// Site owner and contact details.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub name: String,
    pub handle: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
}

/// A portfolio project, exposed as `/projects/<slug>.txt`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub long_description: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

impl Project {
    /// File name inside `/projects`.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.slug)
    }

    /// Plain-text project sheet served by `cat`.
    pub fn to_file_text(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\n\n{}\n\nTechnologies: {}\n\nCheck it out:\nLive: {}\nRepo: {}",
            self.title,
            self.description,
            self.long_description,
            self.technologies.join(", "),
            self.live_url.as_deref().unwrap_or("N/A"),
            self.repo_url.as_deref().unwrap_or("N/A"),
        )
    }
}

/// A sample source file placed under `/mycode`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CodeSample {
    pub name: String,
    pub content: String,
}

/// Everything the terminal shows that is not fetched from the backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Site {
    pub owner: Owner,
    /// Seed text for the backend "about" document
    pub about: String,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub code: Vec<CodeSample>,
}

impl Site {
    /// Parse a site document.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let site: Site = serde_json::from_str(json)?;
        if let Some(p) = site.projects.iter().find(|p| p.slug.is_empty()) {
            return Err(SiteError::Invalid(format!(
                "project '{}' has an empty slug",
                p.title
            )));
        }
        Ok(site)
    }

    /// The site document compiled into the binary.
    pub fn embedded() -> Result<Self, SiteError> {
        Self::from_json(config::SITE_JSON)
    }

    /// Contents of `/quotes.txt`.
    pub fn quotes_text(&self) -> String {
        self.quotes.join("\n")
    }

    /// Contact card shown by `contact` and `cat contact.txt`.
    pub fn contact_card(&self) -> Rich {
        Rich::new().text("Get in touch:").with(Block::Pairs {
            pairs: vec![
                ("Email".to_string(), self.owner.email.clone()),
                ("GitHub".to_string(), self.owner.github.clone()),
                ("LinkedIn".to_string(), self.owner.linkedin.clone()),
            ],
            separator: ": ",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_site_parses() {
        let site = Site::embedded().unwrap();
        assert!(!site.projects.is_empty());
        assert!(site.quotes.iter().any(|q| q.contains("love")));
    }

    #[test]
    fn test_project_file_text() {
        let project = Project {
            title: "Gamma".into(),
            slug: "gamma".into(),
            description: "A tool.".into(),
            long_description: "Longer.".into(),
            technologies: vec!["Rust".into(), "Tokio".into()],
            live_url: None,
            repo_url: Some("https://example.com/gamma".into()),
        };
        assert_eq!(project.file_name(), "gamma.txt");
        assert_eq!(
            project.to_file_text(),
            "Title: Gamma\nDescription: A tool.\n\nLonger.\n\nTechnologies: Rust, Tokio\n\nCheck it out:\nLive: N/A\nRepo: https://example.com/gamma"
        );
    }

    #[test]
    fn test_empty_slug_rejected() {
        let json = r#"{
            "owner": {"name":"a","handle":"a","email":"a@b.c","github":"g","linkedin":"l"},
            "about": "hi",
            "projects": [{"title":"X","slug":"","description":"d","long_description":"l","technologies":[]}]
        }"#;
        assert!(matches!(Site::from_json(json), Err(SiteError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Site::from_json("{"), Err(SiteError::Parse(_))));
    }

    #[test]
    fn test_contact_card_text() {
        let site = Site::embedded().unwrap();
        let text = site.contact_card().to_string();
        assert!(text.starts_with("Get in touch:\n  Email"));
    }
}
