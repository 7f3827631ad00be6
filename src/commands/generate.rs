//! Generate Jekyll sources from the CMS feeds
//!
//! Stages run strictly in order: posts, then the blog home (which features
//! one of the posts written in this run), then press releases. An absent
//! feed skips only its own stage.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::EntryPolicy;
use crate::content::{
    select_featured, ContentStore, Entry, FrontMatterAssembler, ProcessedPost, ReferenceResolver,
};
use crate::error::ContentError;
use crate::generator::Emitter;
use crate::helpers::{build_filename, filename_for_date, parse_iso8601};
use crate::Site;

/// Filename of the blog landing page
pub const BLOG_HOME_FILE: &str = "index.md";

/// Outcome of one generation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Posts written
    pub posts: usize,
    /// Press releases written
    pub press_releases: usize,
    /// Path of the blog home, if one was written
    pub blog_home: Option<PathBuf>,
    /// Entries skipped because of malformed data
    pub skipped: Vec<SkippedEntry>,
}

/// An entry left out of the run
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub content_type: &'static str,
    pub key: String,
    pub reason: String,
}

impl RunReport {
    pub fn summary(&self) -> String {
        format!(
            "{} posts, {} press releases, blog home {}, {} skipped",
            self.posts,
            self.press_releases,
            if self.blog_home.is_some() {
                "written"
            } else {
                "not written"
            },
            self.skipped.len()
        )
    }
}

/// Run the whole pipeline
pub fn run(site: &Site) -> Result<RunReport> {
    let start = std::time::Instant::now();

    let store = site.store();
    let emitter = site.emitter();
    let mut report = RunReport::default();

    let posts = generate_posts(site, &store, &emitter, &mut report)?;
    report.posts = posts.len();

    report.blog_home = generate_blog_home(site, &store, &emitter, &posts)?;

    report.press_releases = generate_press_releases(site, &store, &emitter, &mut report)?;

    tracing::info!(
        "Generated {} in {:.2}s",
        report.summary(),
        start.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Resolve and write every post, returning the records that were written
pub fn generate_posts(
    site: &Site,
    store: &ContentStore,
    emitter: &Emitter,
    report: &mut RunReport,
) -> Result<Vec<ProcessedPost>> {
    tracing::info!("Generating blog posts...");

    let Some(posts) = store.load("posts")? else {
        tracing::info!("No new blog posts found");
        return Ok(Vec::new());
    };

    let categories = store.load("categories")?;
    let authors = store.load("authors")?;
    let assets = store.load("assets")?;

    let resolver = ReferenceResolver::new(site.config.unresolved_references)
        .with_categories(categories.as_ref())
        .with_authors(authors.as_ref())
        .with_assets(assets.as_ref());
    let assembler = FrontMatterAssembler::new(&site.config);

    let mut processed = Vec::with_capacity(posts.len());
    for (key, post) in posts {
        match write_post(post, &resolver, &assembler, emitter, &site.config.posts_dir) {
            Ok(post) => processed.push(post),
            Err(e) => handle_entry_error(site, report, "post", &key, e)?,
        }
    }

    tracing::info!("Wrote {} posts", processed.len());
    Ok(processed)
}

fn write_post(
    mut post: Entry,
    resolver: &ReferenceResolver,
    assembler: &FrontMatterAssembler,
    emitter: &Emitter,
    collection: &str,
) -> Result<ProcessedPost, ContentError> {
    let date = parse_iso8601(post.require_str("date")?)?;
    let filename = filename_for_date(&date, post.require_str("url")?);

    resolver.resolve(&mut post);
    let document = assembler.post(post)?;
    emitter.write(collection, &filename, &document.render()?)?;

    Ok(ProcessedPost::new(date, document.front_matter))
}

/// Write the blog landing page
pub fn generate_blog_home(
    site: &Site,
    store: &ContentStore,
    emitter: &Emitter,
    posts: &[ProcessedPost],
) -> Result<Option<PathBuf>> {
    tracing::info!("Generating blog home...");

    let Some(feed) = store.load("blog_home")? else {
        tracing::info!("No blog home found");
        return Ok(None);
    };
    let Some(home) = feed.values().next() else {
        return Ok(None);
    };

    let featured = select_featured(home, posts);
    if featured.is_none() {
        tracing::info!("No posts to feature on the blog home");
    }

    let document = FrontMatterAssembler::new(&site.config).blog_home(home, featured);
    let path = emitter.write(
        &site.config.blog_home_dir,
        BLOG_HOME_FILE,
        &document.render()?,
    )?;

    Ok(Some(path))
}

/// Write every press release, returning how many were written
pub fn generate_press_releases(
    site: &Site,
    store: &ContentStore,
    emitter: &Emitter,
    report: &mut RunReport,
) -> Result<usize> {
    tracing::info!("Generating press releases...");

    let Some(releases) = store.load("press_releases")? else {
        tracing::info!("No new press releases found");
        return Ok(0);
    };

    let assembler = FrontMatterAssembler::new(&site.config);
    let mut written = 0;
    for (key, release) in releases {
        match write_press_release(
            release,
            &assembler,
            emitter,
            &site.config.press_releases_dir,
        ) {
            Ok(()) => written += 1,
            Err(e) => handle_entry_error(site, report, "press release", &key, e)?,
        }
    }

    tracing::info!("Wrote {} press releases", written);
    Ok(written)
}

fn write_press_release(
    release: Entry,
    assembler: &FrontMatterAssembler,
    emitter: &Emitter,
    collection: &str,
) -> Result<(), ContentError> {
    let filename = build_filename(release.require_str("date")?, release.require_str("url")?)?;
    let document = assembler.press_release(release)?;
    emitter.write(collection, &filename, &document.render()?)?;
    Ok(())
}

/// Skip a malformed entry or stop the run, depending on configuration
///
/// Errors that are not about the entry's data (IO, serialization) always
/// stop the run.
fn handle_entry_error(
    site: &Site,
    report: &mut RunReport,
    content_type: &'static str,
    key: &str,
    error: ContentError,
) -> Result<()> {
    if error.is_entry_error() && site.config.invalid_entries == EntryPolicy::Skip {
        tracing::warn!("Skipping {} {}: {}", content_type, key, error);
        report.skipped.push(SkippedEntry {
            content_type,
            key: key.to_string(),
            reason: error.to_string(),
        });
        return Ok(());
    }

    Err(anyhow::Error::new(error).context(format!("Failed to generate {} {}", content_type, key)))
}
