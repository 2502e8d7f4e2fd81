//! Streaming Tokenizer Module
//!
//! Splits normalized text into the alphanumeric tokens used for scoring. It's
//! the second stage of the query pipeline, taking trimmed, lower-cased text
//! and breaking it into comparable units.
//!
//! ## What It Does
//!
//! Given normalized input like `"no-insurance § 601.191"`, it emits each
//! `[a-z0-9]` run as a token with its position in the query:
//!
//! ```ignore
//! ("no", 0)
//! ("insurance", 1)
//! ("601", 2)
//! ("191", 3)
//! ```
//!
//! Every byte outside `[a-z0-9]` is a separator, including all non-ASCII
//! bytes, so tokens are always ASCII.
//!
//! ## Usage
//!
//! ```rust
//! use citeseek_core::analyzer::tokenizer::{tokenize, Tokenizer};
//!
//! // Streaming: tokens are slices of the input, nothing is allocated.
//! let mut n = 0;
//! Tokenizer::new().tokenize("stop sign", |_text, _position| n += 1);
//! assert_eq!(n, 2);
//!
//! // Materialized: normalizes first and keeps the tokens.
//! let tokens = tokenize("  Stop-Sign ");
//! assert_eq!(tokens.iter().collect::<Vec<_>>(), ["stop", "sign"]);
//! ```
//!
//! ## The Input Contract
//!
//! [`Tokenizer::tokenize`] expects **pre-normalized** input. Upper-case ASCII
//! letters are not part of `[a-z0-9]` and would act as separators, which the
//! tokenizer flags in debug builds. [`tokenize`] normalizes for you.

use smallvec::SmallVec;

use crate::analyzer::normalizer::TextNormalizer;

#[inline(always)]
const fn is_token_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9')
}

/// Streaming tokenizer over normalized text.
///
/// A single forward byte scan. Each maximal run of `[a-z0-9]` bytes becomes a
/// token; runs of anything else are skipped, so no empty token is ever
/// emitted.
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes normalized input and emits `(text, position)`.
    ///
    /// Positions count emitted tokens from zero, left to right.
    #[inline]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        debug_assert!(
            !normalized.bytes().any(|b| b.is_ascii_uppercase()),
            "tokenizer: upper-case input, normalizer contract violated"
        );

        let bytes = normalized.as_bytes();
        let mut start: Option<usize> = None;
        let mut pos = 0u32;

        for (i, &b) in bytes.iter().enumerate() {
            match (is_token_byte(b), start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    // Token bounds sit on ASCII bytes, which are always char
                    // boundaries.
                    emit(&normalized[s..i], pos);
                    pos = pos.saturating_add(1);
                    start = None;
                }
                _ => {}
            }
        }

        if let Some(s) = start {
            emit(&normalized[s..], pos);
        }
    }
}

/// Ordered query tokens, owned together with their normalized source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    text: String,
    spans: SmallVec<[(usize, usize); 8]>,
}

impl TokenSet {
    /// Builds a token set from already-normalized text.
    pub fn from_normalized(text: String) -> Self {
        let mut spans = SmallVec::new();
        let base = text.as_ptr() as usize;
        Tokenizer::new().tokenize(&text, |token, _| {
            let start = token.as_ptr() as usize - base;
            spans.push((start, start + token.len()));
        });
        Self { text, spans }
    }

    /// The normalized text the tokens were cut from.
    #[inline]
    pub fn normalized(&self) -> &str {
        &self.text
    }

    /// Number of tokens, including single-character ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Token at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|&(s, e)| &self.text[s..e])
    }

    /// Tokens in query order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(|&(s, e)| &self.text[s..e])
    }
}

/// Normalizes `text` and splits it into tokens. Never fails; empty or
/// whitespace-only input yields an empty set.
pub fn tokenize(text: &str) -> TokenSet {
    TokenSet::from_normalized(TextNormalizer::new().normalize(text))
}
