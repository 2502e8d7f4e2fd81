use std::borrow::Cow;

/// Query and field normalizer.
///
/// Performs exactly two operations:
/// - Removes leading/trailing whitespace (Unicode `White_Space`)
/// - Converts all characters to lowercase (Unicode-aware, including the
///   word-final sigma rule)
///
/// Interior whitespace and punctuation are left alone; splitting is the
/// tokenizer's job. The normalized form of a raw query is also the alias
/// table key.
///
/// # Examples
///
/// ```
/// use citeseek_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("  Stop Sign "), "stop sign");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity. ASCII input
    /// is lowered byte by byte without allocating.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        let trimmed = input.trim();

        if trimmed.is_ascii() {
            out.reserve(trimmed.len());
            out.extend(trimmed.bytes().map(|b| b.to_ascii_lowercase() as char));
        } else {
            out.push_str(&trimmed.to_lowercase());
        }
    }

    /// Normalizes text, borrowing when the input is already normalized.
    pub fn normalize_cow<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let trimmed = input.trim();
        if !trimmed.bytes().any(|b| b.is_ascii_uppercase()) && trimmed.is_ascii() {
            Cow::Borrowed(trimmed)
        } else {
            let mut out = String::with_capacity(trimmed.len());
            self.normalize_into(trimmed, &mut out);
            Cow::Owned(out)
        }
    }

    /// Normalizes text into a new `String`.
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Trims and lower-cases `text`. Empty input yields an empty string.
#[inline]
pub fn normalize(text: &str) -> String {
    TextNormalizer::new().normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        TextNormalizer::new().normalize(input)
    }

    #[test]
    fn ascii_basic_lowercase() {
        assert_eq!(norm("HELLO"), "hello");
        assert_eq!(norm("Failure To Stop"), "failure to stop");
    }

    #[test]
    fn ascii_punctuation_unchanged() {
        assert_eq!(norm("§ 545.060(a)"), "§ 545.060(a)");
        assert_eq!(norm("no-insurance!"), "no-insurance!");
    }

    #[test]
    fn surrounding_whitespace_removed() {
        assert_eq!(norm("  stop sign "), "stop sign");
        assert_eq!(norm("\t\nstop\r\n"), "stop");
    }

    #[test]
    fn interior_whitespace_preserved() {
        assert_eq!(norm("stop   sign"), "stop   sign");
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(norm(""), "");
        assert_eq!(norm("   \t  "), "");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(norm("ÉCOLE"), "école");
        assert_eq!(norm("\u{00A0}Straße\u{3000}"), "straße");
    }

    #[test]
    fn final_sigma_follows_word_rule() {
        assert_eq!(norm("\u{39f}\u{394}\u{39f}\u{3a3}"), "\u{3bf}\u{3b4}\u{3bf}\u{3c2}");
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let n = TextNormalizer::new();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        n.normalize_into("HELLO", &mut buf);
        assert_eq!(buf, "hello");
        n.normalize_into("World", &mut buf);
        assert_eq!(buf, "world");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn cow_borrows_normalized_input() {
        let n = TextNormalizer::new();
        assert!(matches!(n.normalize_cow("stop sign"), Cow::Borrowed("stop sign")));
        assert!(matches!(n.normalize_cow(" stop "), Cow::Borrowed("stop")));
        assert_eq!(n.normalize_cow("Stop").as_ref(), "stop");
    }

    #[test]
    fn idempotent() {
        for input in ["  Mixed CASE  ", "ÀÉÎ õü", "545.060", ""] {
            let once = norm(input);
            assert_eq!(norm(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn free_function_matches_struct() {
        assert_eq!(normalize(" Weaving "), norm(" Weaving "));
    }
}
