//! Front-matter assembly
//!
//! Turns resolved CMS entries into Jekyll documents: a YAML front-matter
//! block, the `---` delimiter, then the raw body wrapped so Liquid leaves it
//! alone.

use serde_json::{json, Value};

use super::entry::reference_uid;
use super::post::{most_recent, ProcessedPost};
use super::Entry;
use crate::config::SiteConfig;
use crate::error::{ContentError, Result};
use crate::helpers::ensure_trailing_slash;

/// Body field of a post
pub const POST_BODY: &str = "full_description";
/// Body field of a press release
pub const PRESS_RELEASE_BODY: &str = "body";

const RAW: &str = "{% raw %}";
const ENDRAW: &str = "{% endraw %}";

/// A document ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: Entry,
    /// Raw body; `None` for front-matter-only pages
    pub body: Option<String>,
}

impl Document {
    /// Serialize to the on-disk format
    pub fn render(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(&self.front_matter)?;

        let mut out = String::with_capacity(yaml.len() + 64);
        out.push_str("---\n");
        out.push_str(&yaml);
        out.push_str("---\n");
        if let Some(body) = &self.body {
            out.push_str(&raw_block(body));
        }
        Ok(out)
    }
}

/// Wrap a body so Liquid does not interpret any template syntax in it
fn raw_block(body: &str) -> String {
    // An endraw inside the body would close the block early. Close the block,
    // print `{%` from a string literal and reopen; the literal must not hold a
    // `}` or the `{{ }}` token ends there.
    let escaped = body.replace(ENDRAW, "{% endraw %}{{ \"{%\" }} endraw %}{% raw %}");
    format!("{}{}{}", RAW, escaped, ENDRAW)
}

/// Builds front-matter documents for each content kind
pub struct FrontMatterAssembler<'a> {
    config: &'a SiteConfig,
}

impl<'a> FrontMatterAssembler<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Assemble a resolved post
    pub fn post(&self, mut post: Entry) -> Result<Document> {
        let url = post.require_str("url")?.to_string();
        let body = take_body(&mut post, POST_BODY)?;

        post.insert("layout", self.config.post_layout.as_str());
        post.insert("permalink", url);
        post.insert("search_type", "blog_post");

        if needs_excerpt(&post) {
            post.insert("excerpt", self.config.excerpt.excerpt(&body));
        }

        Ok(Document {
            front_matter: post,
            body: Some(body),
        })
    }

    /// Assemble a press release
    pub fn press_release(&self, mut release: Entry) -> Result<Document> {
        let url = release.require_str("url")?.to_string();
        let body = take_body(&mut release, PRESS_RELEASE_BODY)?;

        release.insert("permalink", ensure_trailing_slash(&url));
        release.remove("url");
        release.insert("search_type", "press_release");

        Ok(Document {
            front_matter: release,
            body: Some(body),
        })
    }

    /// Assemble the blog landing page around its featured post
    pub fn blog_home(&self, home: &Entry, featured: Option<&ProcessedPost>) -> Document {
        let field = |path: &str| home.lookup(path).cloned().unwrap_or(Value::Null);

        let mut front_matter = Entry::new();
        front_matter.insert("layout", self.config.blog_home_layout.as_str());
        front_matter.insert("permalink", field("url"));
        front_matter.insert("title", field("seo.meta_title"));
        front_matter.insert("pagination", json!({ "enabled": true }));
        front_matter.insert(
            "seo",
            json!({ "meta_description": field("seo.meta_description") }),
        );
        front_matter.insert(
            "featured_post",
            featured
                .map(|post| Value::from(post.record.clone()))
                .unwrap_or(Value::Null),
        );

        Document {
            front_matter,
            body: None,
        }
    }
}

/// Pick the blog home's featured post
///
/// A single `featured_post` reference selects that post when it was
/// processed in this run; otherwise the most recent post is used.
pub fn select_featured<'p>(
    home: &Entry,
    posts: &'p [ProcessedPost],
) -> Option<&'p ProcessedPost> {
    if let Some(Value::Array(references)) = home.get("featured_post") {
        if let [reference] = references.as_slice() {
            let uid = reference_uid(reference);
            match posts.iter().find(|post| uid.is_some() && post.uid() == uid) {
                Some(post) => return Some(post),
                None => tracing::warn!(
                    "Featured post {} was not generated in this run, using the most recent post",
                    reference
                ),
            }
        }
    }

    most_recent(posts)
}

/// Remove the body field and return its text
fn take_body(entry: &mut Entry, field: &str) -> Result<String> {
    match entry.remove(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(body)) => Ok(body),
        Some(_) => Err(ContentError::FieldType {
            field: field.to_string(),
            expected: "a string",
        }),
    }
}

/// Whether the entry lacks a non-blank excerpt
fn needs_excerpt(entry: &Entry) -> bool {
    match entry.get("excerpt") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
