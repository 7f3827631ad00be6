//! Reference resolution - replaces UID references in posts with the data
//! of the entries they point to

use serde_json::Value;

use super::entry::{is_null_marker, reference_uid};
use super::store::{find_by_uid, Feed};
use super::Entry;
use crate::config::ReferencePolicy;

/// Resolves category, author and featured-image references of a post
///
/// Lookup feeds that were absent are skipped; the matching post fields are
/// left as exported.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    categories: Option<&'a Feed>,
    authors: Option<&'a Feed>,
    assets: Option<&'a Feed>,
    policy: ReferencePolicy,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(policy: ReferencePolicy) -> Self {
        Self {
            categories: None,
            authors: None,
            assets: None,
            policy,
        }
    }

    pub fn with_categories(mut self, categories: Option<&'a Feed>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_authors(mut self, authors: Option<&'a Feed>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_assets(mut self, assets: Option<&'a Feed>) -> Self {
        self.assets = assets;
        self
    }

    /// Resolve every reference field of a post
    pub fn resolve(&self, post: &mut Entry) {
        self.resolve_featured_image(post);
        self.resolve_categories(post);
        self.resolve_author(post);
    }

    /// Replace each category UID with the category's title
    pub fn resolve_categories(&self, post: &mut Entry) {
        let Some(categories) = self.categories else {
            return;
        };
        let Some(Value::Array(items)) = post.get("category") else {
            return;
        };

        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            match reference_uid(item).and_then(|uid| find_by_uid(categories, uid)) {
                Some(category) => resolved.push(
                    category
                        .get("title")
                        .cloned()
                        .unwrap_or_else(|| item.clone()),
                ),
                None => resolved.extend(self.unresolved("category", item)),
            }
        }

        post.insert("category", resolved);
    }

    /// Collapse the author list to the first author's title and attach the
    /// full author record as `authorData`
    pub fn resolve_author(&self, post: &mut Entry) {
        let Some(authors) = self.authors else {
            return;
        };
        let first = match post.get("author") {
            Some(Value::Array(items)) => match items.first() {
                Some(first) => first.clone(),
                None => return,
            },
            _ => return,
        };

        match reference_uid(&first).and_then(|uid| find_by_uid(authors, uid)) {
            Some(author) => {
                post.insert("author", author.get("title").cloned().unwrap_or(Value::Null));
                post.insert("authorData", author.clone());
            }
            None => {
                if self.unresolved("author", &first).is_none() {
                    post.remove("author");
                }
            }
        }
    }

    /// Rewrite the featured image reference to `assets/images/<uid>/<filename>`
    pub fn resolve_featured_image(&self, post: &mut Entry) {
        let Some(assets) = self.assets else {
            return;
        };
        let image = match post.get("featured_image") {
            Some(image) if !is_null_marker(image) => image.clone(),
            _ => return,
        };

        let path = reference_uid(&image).and_then(|uid| {
            let asset = find_by_uid(assets, uid)?;
            let filename = asset.get("filename").and_then(reference_uid)?;
            Some(format!("assets/images/{}/{}", uid, filename))
        });

        match path {
            Some(path) => {
                post.insert("featured_image", path);
            }
            None => {
                if self.unresolved("featured_image", &image).is_none() {
                    post.remove("featured_image");
                }
            }
        }
    }

    /// Apply the unresolved-reference policy, returning the value to keep
    fn unresolved(&self, field: &str, reference: &Value) -> Option<Value> {
        match self.policy {
            ReferencePolicy::Keep => Some(reference.clone()),
            ReferencePolicy::Warn => {
                tracing::warn!("Unresolved {} reference: {}", field, reference);
                Some(reference.clone())
            }
            ReferencePolicy::Drop => {
                tracing::warn!("Dropping unresolved {} reference: {}", field, reference);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feed(entries: Value) -> Feed {
        entries
            .as_array()
            .unwrap()
            .iter()
            .map(|v| {
                let e = Entry::from_value(v.clone()).unwrap();
                (e.uid().unwrap().to_string(), e)
            })
            .collect()
    }

    fn post(value: Value) -> Entry {
        Entry::from_value(value).unwrap()
    }

    struct Stores {
        categories: Feed,
        authors: Feed,
        assets: Feed,
    }

    impl Stores {
        fn new() -> Self {
            Self {
                categories: feed(json!([
                    {"uid": "c1", "title": "News"},
                    {"uid": "c2", "title": "Engineering"}
                ])),
                authors: feed(json!([
                    {"uid": "a1", "title": "Jane", "bio": "Writes things"},
                    {"uid": "a2", "title": "Sam"}
                ])),
                assets: feed(json!([
                    {"uid": "img1", "filename": "cover.png"},
                    {"uid": "img2", "filename": {"uid": "banner.jpg"}}
                ])),
            }
        }

        fn resolver(&self, policy: ReferencePolicy) -> ReferenceResolver<'_> {
            ReferenceResolver::new(policy)
                .with_categories(Some(&self.categories))
                .with_authors(Some(&self.authors))
                .with_assets(Some(&self.assets))
        }
    }

    #[test]
    fn test_resolve_post() {
        let stores = Stores::new();
        let mut p = post(json!({
            "uid": "p1",
            "category": ["c1", "c2"],
            "author": ["a1", "a2"],
            "featured_image": "img1"
        }));

        stores.resolver(ReferencePolicy::Warn).resolve(&mut p);

        assert_eq!(p.get("category"), Some(&json!(["News", "Engineering"])));
        assert_eq!(p.get("author"), Some(&json!("Jane")));
        assert_eq!(
            p.get("authorData"),
            Some(&json!({"uid": "a1", "title": "Jane", "bio": "Writes things"}))
        );
        assert_eq!(
            p.get("featured_image"),
            Some(&json!("assets/images/img1/cover.png"))
        );
    }

    #[test]
    fn test_reference_objects() {
        let stores = Stores::new();
        let mut p = post(json!({
            "category": [{"uid": "c2", "_content_type_uid": "category"}],
            "author": [{"uid": "a2"}],
            "featured_image": {"uid": "img2"}
        }));

        stores.resolver(ReferencePolicy::Keep).resolve(&mut p);

        assert_eq!(p.get("category"), Some(&json!(["Engineering"])));
        assert_eq!(p.get("author"), Some(&json!("Sam")));
        assert_eq!(
            p.get("featured_image"),
            Some(&json!("assets/images/img2/banner.jpg"))
        );
    }

    #[test]
    fn test_unresolved_kept() {
        let stores = Stores::new();
        let original = post(json!({
            "category": ["c1", "missing"],
            "author": ["nobody"],
            "featured_image": "no-such-asset"
        }));
        let mut p = original.clone();

        stores.resolver(ReferencePolicy::Keep).resolve(&mut p);

        assert_eq!(p.get("category"), Some(&json!(["News", "missing"])));
        assert_eq!(p.get("author"), original.get("author"));
        assert!(!p.contains("authorData"));
        assert_eq!(p.get("featured_image"), original.get("featured_image"));
    }

    #[test]
    fn test_unresolved_dropped() {
        let stores = Stores::new();
        let mut p = post(json!({
            "uid": "p1",
            "category": ["missing", "c1"],
            "author": ["nobody"],
            "featured_image": "no-such-asset"
        }));

        stores.resolver(ReferencePolicy::Drop).resolve(&mut p);

        assert_eq!(p.get("category"), Some(&json!(["News"])));
        assert!(!p.contains("author"));
        assert!(!p.contains("featured_image"));
        assert_eq!(p.uid(), Some("p1"));
    }

    #[test]
    fn test_resolution_idempotent() {
        let stores = Stores::new();
        let resolver = stores.resolver(ReferencePolicy::Warn);
        let mut p = post(json!({
            "category": ["c1"],
            "author": ["a1"],
            "featured_image": "img1"
        }));

        resolver.resolve(&mut p);
        let once = p.clone();
        resolver.resolve(&mut p);

        assert_eq!(p, once);
    }

    #[test]
    fn test_skips_null_and_empty_fields() {
        let stores = Stores::new();
        let resolver = stores.resolver(ReferencePolicy::Drop);

        for image in [Value::Null, json!("null"), json!("")] {
            let mut p = post(json!({"featured_image": image.clone(), "author": []}));
            resolver.resolve(&mut p);
            assert_eq!(p.get("featured_image"), Some(&image));
            assert_eq!(p.get("author"), Some(&json!([])));
        }
    }

    #[test]
    fn test_absent_lookup_feeds() {
        let original = post(json!({
            "category": ["c1"],
            "author": ["a1"],
            "featured_image": "img1"
        }));
        let mut p = original.clone();

        ReferenceResolver::new(ReferencePolicy::Drop).resolve(&mut p);

        assert_eq!(p, original);
    }
}
