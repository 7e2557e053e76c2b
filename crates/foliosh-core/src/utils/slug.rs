//! URL slug generation for post titles and tag names.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase, ASCII-only, hyphen-separated slug.
///
/// Accents are stripped after NFKD decomposition; runs of anything other
/// than ASCII letters and digits collapse into a single `-`, and leading or
/// trailing hyphens are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_diacritics_removed() {
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("  Rust -- is   fun!!  "), "rust-is-fun");
    }

    #[test]
    fn test_non_latin_dropped() {
        assert_eq!(slugify("日本 2024"), "2024");
        assert_eq!(slugify("???"), "");
    }
}
