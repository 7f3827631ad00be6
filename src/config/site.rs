//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::helpers::{strip_html, truncate_chars, truncate_words, ELLIPSIS};

/// Main site configuration
///
/// Only the keys the generator reads are typed; everything else in the
/// Jekyll config lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub source: String,
    pub data_dir: String,
    pub posts_dir: String,
    pub press_releases_dir: String,
    pub blog_home_dir: String,

    // Feed
    pub locale: String,

    // Layouts
    pub post_layout: String,
    pub blog_home_layout: String,

    // Transformation
    #[serde(default)]
    pub excerpt: ExcerptConfig,
    pub unresolved_references: ReferencePolicy,
    pub invalid_entries: EntryPolicy,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: ".".to_string(),
            data_dir: "_data".to_string(),
            posts_dir: "_posts".to_string(),
            press_releases_dir: "_press_releases".to_string(),
            blog_home_dir: "_pages/blog".to_string(),

            locale: "en-us".to_string(),

            post_layout: "article".to_string(),
            blog_home_layout: "blog-listing".to_string(),

            excerpt: ExcerptConfig::default(),
            unresolved_references: ReferencePolicy::default(),
            invalid_entries: EntryPolicy::default(),

            extra: HashMap::new(),
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

/// How a UID with no matching lookup entry is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Leave the raw UID in place silently
    Keep,
    /// Leave the raw UID in place and log a warning
    #[default]
    Warn,
    /// Remove the unresolved reference and log a warning
    Drop,
}

/// What happens to an entry whose date or required fields are malformed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPolicy {
    /// Skip the entry and report it in the run summary
    #[default]
    Skip,
    /// Stop the run
    Abort,
}

/// Truncation algorithm used to synthesize excerpts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcerptStrategy {
    /// Word-boundary truncation to a character budget
    #[default]
    Chars,
    /// Truncation to a word count
    Words,
}

impl ExcerptStrategy {
    fn default_length(self) -> usize {
        match self {
            ExcerptStrategy::Chars => 240,
            ExcerptStrategy::Words => 35,
        }
    }
}

/// Excerpt synthesis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    pub strategy: ExcerptStrategy,
    /// Characters or words depending on the strategy
    pub length: Option<usize>,
}

impl ExcerptConfig {
    pub fn length(&self) -> usize {
        self.length.unwrap_or(self.strategy.default_length())
    }

    /// Build a plain-text excerpt from an HTML body
    pub fn excerpt(&self, html: &str) -> String {
        let text = strip_html(html);
        match self.strategy {
            ExcerptStrategy::Chars => truncate_chars(&text, self.length(), ELLIPSIS),
            ExcerptStrategy::Words => truncate_words(&text, self.length(), ELLIPSIS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.data_dir, "_data");
        assert_eq!(config.locale, "en-us");
        assert_eq!(config.excerpt.strategy, ExcerptStrategy::Chars);
        assert_eq!(config.excerpt.length(), 240);
        assert_eq!(config.unresolved_references, ReferencePolicy::Warn);
        assert_eq!(config.invalid_entries, EntryPolicy::Skip);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Company Blog
source: site
data_dir: _cms
excerpt:
  strategy: words
unresolved_references: drop
invalid_entries: abort
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source, "site");
        assert_eq!(config.data_dir, "_cms");
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.excerpt.strategy, ExcerptStrategy::Words);
        assert_eq!(config.excerpt.length(), 35);
        assert_eq!(config.unresolved_references, ReferencePolicy::Drop);
        assert_eq!(config.invalid_entries, EntryPolicy::Abort);
        assert_eq!(
            config.extra.get("title").and_then(|v| v.as_str()),
            Some("Company Blog")
        );
    }

    #[test]
    fn test_excerpt_strategies() {
        let html = "<p>one two <em>three</em> four</p>";

        let chars = ExcerptConfig {
            strategy: ExcerptStrategy::Chars,
            length: Some(10),
        };
        assert_eq!(chars.excerpt(html), "one two...");

        let words = ExcerptConfig {
            strategy: ExcerptStrategy::Words,
            length: Some(3),
        };
        assert_eq!(words.excerpt(html), "one two three...");

        assert_eq!(
            ExcerptConfig::default().excerpt("<p>Hi <b>there</b></p>"),
            "Hi there"
        );
    }
}
