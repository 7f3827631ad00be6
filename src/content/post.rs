//! Processed post records

use chrono::NaiveDateTime;

use super::Entry;

/// A post that was resolved and written during the current run
///
/// The post stage returns these and the blog-home stage selects its featured
/// post from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedPost {
    /// Parsed publish date
    pub date: NaiveDateTime,
    /// Final front-matter record as written
    pub record: Entry,
}

impl ProcessedPost {
    pub fn new(date: NaiveDateTime, record: Entry) -> Self {
        Self { date, record }
    }

    pub fn uid(&self) -> Option<&str> {
        self.record.uid()
    }
}

/// The most recently dated post; ties go to the earliest in feed order
pub fn most_recent(posts: &[ProcessedPost]) -> Option<&ProcessedPost> {
    posts.iter().fold(None, |best, post| match best {
        Some(best) if best.date >= post.date => Some(best),
        _ => Some(post),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_iso8601;
    use serde_json::json;

    fn processed(uid: &str, date: &str) -> ProcessedPost {
        let record = Entry::from_value(json!({ "uid": uid, "date": date })).unwrap();
        ProcessedPost::new(parse_iso8601(date).unwrap(), record)
    }

    #[test]
    fn test_most_recent() {
        let posts = vec![
            processed("old", "2023-12-31"),
            processed("new", "2024-02-01"),
            processed("mid", "2024-01-15"),
        ];
        assert_eq!(most_recent(&posts).and_then(|p| p.uid()), Some("new"));
    }

    #[test]
    fn test_most_recent_tie_keeps_feed_order() {
        let posts = vec![
            processed("first", "2024-02-01"),
            processed("second", "2024-02-01"),
        ];
        assert_eq!(most_recent(&posts).and_then(|p| p.uid()), Some("first"));
        assert!(most_recent(&[]).is_none());
    }
}
