//! Remove generated documents

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::generate::BLOG_HOME_FILE;
use crate::Site;

/// Delete the generated posts, press releases and blog home
///
/// Only Markdown files directly inside the collection directories are
/// removed; anything else placed there by hand is left alone.
pub fn run(site: &Site) -> Result<usize> {
    let emitter = site.emitter();
    let mut removed = 0;

    for collection in [&site.config.posts_dir, &site.config.press_releases_dir] {
        let dir = emitter.collection_dir(collection);
        if !dir.exists() {
            continue;
        }

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                fs::remove_file(path)?;
                tracing::debug!("Deleted: {:?}", path);
                removed += 1;
            }
        }
    }

    let blog_home = emitter
        .collection_dir(&site.config.blog_home_dir)
        .join(BLOG_HOME_FILE);
    if blog_home.exists() {
        fs::remove_file(&blog_home)?;
        tracing::debug!("Deleted: {:?}", blog_home);
        removed += 1;
    }

    tracing::info!("Removed {} generated files", removed);
    Ok(removed)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_generated_files() {
        let temp = TempDir::new().unwrap();
        let site = Site::with_config(temp.path(), SiteConfig::default());
        let emitter = site.emitter();

        emitter.write("_posts", "2024-01-05-a.md", "a").unwrap();
        emitter.write("_posts", "notes.txt", "keep").unwrap();
        emitter.write("_press_releases", "2024-02-01-b.md", "b").unwrap();
        emitter.write("_pages/blog", "index.md", "home").unwrap();
        emitter.write("_pages/blog", "about.md", "keep").unwrap();

        assert_eq!(run(&site).unwrap(), 3);
        assert!(!temp.path().join("_posts/2024-01-05-a.md").exists());
        assert!(temp.path().join("_posts/notes.txt").exists());
        assert!(!temp.path().join("_pages/blog/index.md").exists());
        assert!(temp.path().join("_pages/blog/about.md").exists());

        assert_eq!(run(&site).unwrap(), 0);
    }
}
