//! List the entries of a CMS feed

use anyhow::Result;

use crate::content::Feed;
use crate::Site;

/// List a content type's feed entries
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = site.store();

    match store.load(content_type)? {
        Some(feed) => {
            println!("{} ({}):", content_type, feed.len());
            for line in describe(&feed) {
                println!("  {}", line);
            }
        }
        None => {
            println!(
                "No {} feed found at {:?}",
                content_type,
                store.feed_path(content_type)
            );
        }
    }

    Ok(())
}

/// One line per entry: date, label and uid
fn describe(feed: &Feed) -> Vec<String> {
    feed.iter()
        .map(|(key, entry)| {
            let date = entry.opt_str("date").ok().flatten().unwrap_or("----------");
            let label = ["url", "title", "filename"]
                .iter()
                .find_map(|field| entry.opt_str(field).ok().flatten())
                .unwrap_or("");
            let uid = entry.uid().unwrap_or(key);
            format!("{} - {} [{}]", date, label, uid)
        })
        .collect()
}
