//! Helper utilities for content text.

use crate::JsonValue;
use regex::Regex;
use std::sync::LazyLock;

/// Average reading speed in words per minute.
const WORDS_PER_MINUTE: usize = 200;

/// Derives a URL-safe slug from a title or name.
///
/// The derivation lowercases the input, replaces runs of characters outside
/// `a-z0-9` with a single hyphen and trims leading/trailing hyphens. Slugs
/// are stable public identifiers once stored, so the derivation must stay
/// byte-for-byte reproducible.
pub fn slugify(text: &str) -> String {
    let lowercased = text.to_lowercase();
    let slug = NON_ALPHANUMERIC_RUNS.replace_all(&lowercased, "-");
    slug.trim_matches('-').to_owned()
}

/// Estimates the reading time of a rich-text document in minutes.
///
/// The word count is taken over the whitespace-split JSON serialization of
/// the document, which is how the editor computed it; a nonempty document
/// always reads as at least one minute.
pub fn reading_time(content: &JsonValue) -> u32 {
    if content.is_null() {
        return 0;
    }
    let plain_text = content.to_string();
    let word_count = plain_text.split_whitespace().count();
    word_count.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

static NON_ALPHANUMERIC_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("fail to compile the slug pattern"));

#[cfg(test)]
mod tests {
    use super::{reading_time, slugify};
    use crate::json;

    #[test]
    fn it_derives_url_safe_slugs() {
        assert_eq!(slugify("Mahasiswa Hebat! 2024"), "mahasiswa-hebat-2024");
        assert_eq!(slugify("  Berita --- Utama  "), "berita-utama");
        assert_eq!(slugify("Kolom & Opini"), "kolom-opini");
        assert_eq!(slugify("2024"), "2024");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn it_estimates_reading_time() {
        let words = vec!["kata"; 1000].join(" ");
        let content = json!({ "text": words });
        assert_eq!(reading_time(&content), 5);

        let short = json!({ "text": "satu dua tiga" });
        assert_eq!(reading_time(&short), 1);
        assert_eq!(reading_time(&serde_json::Value::Null), 0);
    }
}
