//! Scoring functions.
//!
//! A cheap substring-containment heuristic: each query token of at least
//! `min_token_len` bytes earns the field weight for every normalized field
//! that contains it, and the whole query earns a flat bonus when each token
//! (short ones included) appears in at least one field.

use citeseek_types::{OffenseRecord, ScoringWeights, SearchConfig};
use memchr::memmem;

use crate::analyzer::normalizer::TextNormalizer;
use crate::analyzer::tokenizer::TokenSet;
use crate::catalog::types::{Catalog, Haystack};

/// Searchable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Field {
    /// Display title - highest weight
    Title = 0,
    /// Keyword text - lowest weight
    Keywords = 1,
    /// Statute citation
    Citation = 2,
}

impl Field {
    /// All fields, in scoring order.
    pub const ALL: [Field; 3] = [Field::Title, Field::Keywords, Field::Citation];

    /// Points a token hit in this field is worth under `weights`.
    #[must_use]
    #[inline(always)]
    pub const fn weight(self, weights: &ScoringWeights) -> u32 {
        match self {
            Field::Title => weights.title,
            Field::Keywords => weights.keywords,
            Field::Citation => weights.citation,
        }
    }
}

impl Haystack {
    /// Normalized text of `field`.
    #[inline(always)]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Keywords => &self.keywords,
            Field::Citation => &self.citation,
        }
    }
}

#[inline(always)]
fn contains(haystack: &str, token: &str) -> bool {
    memmem::find(haystack.as_bytes(), token.as_bytes()).is_some()
}

/// Scores one haystack against a token set.
///
/// An empty token set hits everywhere vacuously and scores the bonus alone.
pub fn score_haystack(tokens: &TokenSet, haystack: &Haystack, config: &SearchConfig) -> u32 {
    let weights = &config.weights;
    let mut score = 0u32;
    let mut all_hit = true;

    for token in tokens.iter() {
        let scores = token.len() >= config.min_token_len;
        let mut hit = false;

        for field in Field::ALL {
            if contains(haystack.field(field), token) {
                hit = true;
                if scores {
                    score = score.saturating_add(field.weight(weights));
                }
            }
        }

        all_hit &= hit;
    }

    if all_hit {
        score = score.saturating_add(weights.all_hit_bonus);
    }
    score
}

/// Scores `record` against `tokens` with the default configuration.
///
/// Normalizes the record's fields on every call; [`Catalog`] caches them
/// instead. Missing fields count as empty text.
pub fn score_offense(tokens: &TokenSet, record: &OffenseRecord) -> u32 {
    score_offense_with(tokens, record, &SearchConfig::default())
}

/// Scores `record` against `tokens` under `config`.
pub fn score_offense_with(tokens: &TokenSet, record: &OffenseRecord, config: &SearchConfig) -> u32 {
    let haystack = Haystack::from_record(record, &TextNormalizer::new());
    score_haystack(tokens, &haystack, config)
}

impl Catalog {
    /// Score of the record at catalog position `pos`, using the cached
    /// haystack. Out-of-range positions score 0.
    #[inline]
    pub fn score_at(&self, tokens: &TokenSet, pos: usize) -> u32 {
        self.haystacks
            .get(pos)
            .map_or(0, |hay| score_haystack(tokens, hay, &self.config))
    }
}
