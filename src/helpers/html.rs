//! HTML sanitizing and excerpt truncation

use lazy_static::lazy_static;
use regex::Regex;

/// Default suffix appended to truncated text
pub const ELLIPSIS: &str = "...";

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script.*?</script>").unwrap();
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style.*?</style>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"(?s)<.*?>").unwrap();
}

/// Strip HTML markup from a string
///
/// Script blocks, comments and style blocks are removed together with their
/// contents, then every remaining tag. Patterns span lines, so a tag broken
/// across several lines is removed whole.
///
/// # Examples
/// ```ignore
/// strip_html("<p>Hi <b>there</b></p>") // -> "Hi there"
/// ```
pub fn strip_html(s: &str) -> String {
    let s = SCRIPT_BLOCK.replace_all(s, "");
    let s = HTML_COMMENT.replace_all(&s, "");
    let s = STYLE_BLOCK.replace_all(&s, "");
    ANY_TAG.replace_all(&s, "").into_owned()
}

/// Truncate to a number of words
///
/// Keeps the first `max_words` words (at least one) joined by single spaces
/// and appends `suffix` when the input has `max_words` words or more.
/// Shorter input is returned untouched, whitespace included.
pub fn truncate_words(s: &str, max_words: usize, suffix: &str) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    let last = max_words.saturating_sub(1);

    if words.len() > last {
        format!("{}{}", words[..=last].join(" "), suffix)
    } else {
        s.to_string()
    }
}

/// Truncate to a number of characters without splitting words
///
/// Input of at most `limit` characters is returned untouched. Otherwise
/// words are kept while the running count (each word plus one separator)
/// stays below `limit`, and `suffix` is appended.
pub fn truncate_chars(s: &str, limit: usize, suffix: &str) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }

    let mut count = 0;
    let mut kept: Vec<&str> = Vec::new();

    for word in s.split_whitespace() {
        let len = word.chars().count();
        if count + len >= limit {
            return format!("{}{}", kept.join(" "), suffix);
        }
        count += len + 1;
        kept.push(word);
    }

    // Only whitespace pushed the input over the limit; every word fits.
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hi <b>there</b></p>"), "Hi there");
        assert_eq!(strip_html(""), "");
        assert_eq!(strip_html("plain text"), "plain text");
    }

    #[test]
    fn test_strip_html_blocks() {
        let html = r#"<div>Before</div>
<script type="text/javascript">
  var x = "<p>not content</p>";
</script>
<!-- a
comment -->
<style>
  p { color: red; }
</style>
<a
  href="/x">After</a>"#;

        let stripped = strip_html(html);
        assert!(stripped.contains("Before"));
        assert!(stripped.contains("After"));
        assert!(!stripped.contains("not content"));
        assert!(!stripped.contains("comment"));
        assert!(!stripped.contains("color"));
        assert!(!stripped.contains('<'));
        assert!(!stripped.contains('>'));
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(
            truncate_words("one two three four", 2, ELLIPSIS),
            "one two..."
        );
        assert_eq!(truncate_words("one  two", 5, ELLIPSIS), "one  two");
        assert_eq!(truncate_words("one two", 0, ELLIPSIS), "one...");
        // exactly max_words words still gets the suffix
        assert_eq!(truncate_words("a b", 2, ELLIPSIS), "a b...");
        assert_eq!(truncate_words("a", 2, ELLIPSIS), "a");
        assert_eq!(truncate_words("", 3, ELLIPSIS), "");
        assert_eq!(truncate_words("a b c d", 2, " [more]"), "a b [more]");
    }

    #[test]
    fn test_truncate_chars_no_op_when_short() {
        assert_eq!(truncate_chars("Hi there", 240, ELLIPSIS), "Hi there");
        assert_eq!(truncate_chars("exactly", 7, ELLIPSIS), "exactly");
        assert_eq!(truncate_chars("line\nbreak", 20, ELLIPSIS), "line\nbreak");
    }

    #[test]
    fn test_truncate_chars_word_boundary() {
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(truncate_chars(text, 12, ELLIPSIS), "The quick...");
        assert_eq!(truncate_chars(text, 3, ELLIPSIS), "...");

        for limit in 0..text.len() {
            let out = truncate_chars(text, limit, ELLIPSIS);
            let body = out.trim_end_matches(ELLIPSIS);
            let words: Vec<&str> = text.split_whitespace().collect();
            for (i, word) in body.split_whitespace().enumerate() {
                assert_eq!(word, words[i], "limit {} split a word", limit);
            }
            assert!(body.chars().count() < limit.max(1));
        }
    }

    #[test]
    fn test_truncate_chars_collapsed_whitespace() {
        assert_eq!(truncate_chars("a          b", 5, ELLIPSIS), "a b");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        let text = "héllo wörld ünïcode";
        assert_eq!(truncate_chars(text, 12, ELLIPSIS), "héllo wörld...");
    }
}
