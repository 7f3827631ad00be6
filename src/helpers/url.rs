//! URL helper functions

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::helpers::date::{format_ymd, parse_iso8601};

/// Derive a filename slug from an entry URL
///
/// Every whitespace character and every `/` is removed, not replaced.
///
/// # Examples
/// ```ignore
/// slug_from_url("/blog/hello world") // -> "bloghelloworld"
/// ```
pub fn slug_from_url(url: &str) -> String {
    url.chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .collect()
}

/// Build the collection filename for an entry: `YYYY-MM-DD-<slug>.md`
pub fn build_filename(date: &str, url: &str) -> Result<String> {
    Ok(filename_for_date(&parse_iso8601(date)?, url))
}

/// Collection filename from an already parsed date
pub fn filename_for_date(date: &NaiveDateTime, url: &str) -> String {
    format!("{}-{}.md", format_ymd(date), slug_from_url(url))
}

/// Append a trailing slash unless the path already ends with one
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}
