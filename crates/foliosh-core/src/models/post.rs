//! Blog post records exchanged with the content backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub author_id: u64,
    /// Tag names attached to the post
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Tag list formatted as ` [a, b]`, or empty when untagged.
    pub fn tags_suffix(&self) -> String {
        if self.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", self.tags.join(", "))
        }
    }
}

/// Fields needed to create a draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub author_id: u64,
}

/// A slug returned by prefix search, with its visibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlugHit {
    pub slug: String,
    pub is_published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(tags: &[&str]) -> Post {
        Post {
            id: 1,
            title: "Hello".into(),
            slug: "hello".into(),
            content: None,
            is_published: false,
            published_at: None,
            created_at: Utc::now(),
            author_id: 1,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_tags_suffix() {
        assert_eq!(post(&[]).tags_suffix(), "");
        assert_eq!(post(&["rust", "wasm"]).tags_suffix(), " [rust, wasm]");
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":3,"title":"T","slug":"t","created_at":"2024-01-02T00:00:00Z","author_id":9}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(!post.is_published);
        assert!(post.content.is_none());
        assert!(post.tags.is_empty());
    }
}
