//! Core types for the citeseek offense lookup engine.
//!
//! This crate provides the data model shared by the matching engine and the
//! command-line front end. Keeping types separate ensures:
//!
//! - **One record shape**: loader, engine and display agree on field names
//! - **Cross-crate compatibility**: core and CLI share the same types
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

/// Unique offense identifier.
pub type OffenseId = u32;

/// Jurisdiction prefix shown when a record carries no `code`.
pub const DEFAULT_CODE: &str = "TTC";

/// Status line shown while the query box is empty.
pub const EMPTY_QUERY_PROMPT: &str =
    "Type a keyword. Example: insurance, weaving, blinker, stop sign, tag.";

/// One offense entry of the catalog.
///
/// Every text field except `title` is optional in the dataset. Fields that
/// are missing, `null`, or numeric are accepted; numbers are kept in their
/// JSON spelling so `"citation": 544.01` still reads as `544.01`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffenseRecord {
    /// Catalog-unique identifier.
    pub id: OffenseId,
    /// Display title.
    #[serde(default, deserialize_with = "lenient_required")]
    pub title: String,
    /// Free-form keyword text used for matching.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub kw: Option<String>,
    /// Statute citation, e.g. `545.060(a)`.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    /// Canonical section id used for deep links, e.g. `545.060`.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub citation_base: Option<String>,
    /// Jurisdiction prefix; see [`DEFAULT_CODE`].
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Offense classification label.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub level_code: Option<String>,
}

impl OffenseRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: OffenseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kw: None,
            citation: None,
            citation_base: None,
            code: None,
            level_code: None,
        }
    }

    /// Sets the keyword text.
    #[must_use]
    pub fn with_keywords(mut self, kw: impl Into<String>) -> Self {
        self.kw = Some(kw.into());
        self
    }

    /// Sets the citation.
    #[must_use]
    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Keyword text, empty when absent.
    #[inline]
    pub fn keywords(&self) -> &str {
        self.kw.as_deref().unwrap_or("")
    }

    /// Citation, empty when absent.
    #[inline]
    pub fn citation(&self) -> &str {
        self.citation.as_deref().unwrap_or("")
    }

    /// Jurisdiction prefix, falling back to [`DEFAULT_CODE`].
    #[inline]
    pub fn code(&self) -> &str {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => DEFAULT_CODE,
        }
    }

    /// Human citation line: `CODE § citation`.
    pub fn cite(&self) -> String {
        format!("{} § {}", self.code(), self.citation())
    }
}

impl fmt::Display for OffenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.cite())?;
        if let Some(level) = self.level_code.as_deref().filter(|l| !l.is_empty()) {
            write!(f, " • {level}")?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl From<LenientText> for String {
    fn from(value: LenientText) -> Self {
        match value {
            LenientText::Text(s) => s,
            LenientText::Integer(n) => n.to_string(),
            LenientText::Float(n) => n.to_string(),
            LenientText::Flag(b) => b.to_string(),
        }
    }
}

fn lenient_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LenientText>::deserialize(deserializer)?.map(String::from))
}

fn lenient_required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional(deserializer)?.unwrap_or_default())
}

/// Alias ids after load; most entries point at one or two records.
pub type AliasIds = SmallVec<[OffenseId; 2]>;

/// Alias entry as it appears in the dataset: one id or a list of ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AliasTarget {
    /// Legacy single-id form.
    One(OffenseId),
    /// List-of-ids form. Order and duplicates are significant.
    Many(Vec<OffenseId>),
}

impl From<AliasTarget> for AliasIds {
    fn from(target: AliasTarget) -> Self {
        match target {
            AliasTarget::One(id) => smallvec::smallvec![id],
            AliasTarget::Many(ids) => AliasIds::from_vec(ids),
        }
    }
}

/// Read-only mapping from a normalized query to offense ids.
///
/// Keys are stored exactly as given. Building a catalog re-keys the table by
/// normalized key (`normalize_aliases` in `citeseek-core`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: FxHashMap<String, AliasIds>,
}

impl AliasTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry, returning the previous ids.
    pub fn insert(&mut self, key: impl Into<String>, target: impl Into<AliasIds>) -> Option<AliasIds> {
        self.entries.insert(key.into(), target.into())
    }

    /// Looks up the ids for an already-normalized key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&[OffenseId]> {
        self.entries.get(key).map(|ids| ids.as_slice())
    }

    /// Returns `true` if `key` has an entry.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of alias keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, ids)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OffenseId])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>, T: Into<AliasIds>> FromIterator<(K, T)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, target) in iter {
            table.insert(key, target);
        }
        table
    }
}

/// A record paired with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMatch<'a> {
    /// Relevance score (higher is better).
    pub score: u32,
    /// The scored record.
    pub record: &'a OffenseRecord,
}

impl<'a> ScoredMatch<'a> {
    /// Creates a new scored match.
    #[inline(always)]
    pub const fn new(score: u32, record: &'a OffenseRecord) -> Self {
        Self { score, record }
    }
}

impl fmt::Display for ScoredMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={} score={}", self.record.id, self.score)
    }
}

/// Points awarded per field hit during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Token found in the title.
    pub title: u32,
    /// Token found in the keyword text.
    pub keywords: u32,
    /// Token found in the citation.
    pub citation: u32,
    /// Every query token found in at least one field.
    pub all_hit_bonus: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title: 4,
            keywords: 2,
            citation: 3,
            all_hit_bonus: 3,
        }
    }
}

/// Search configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Scoring policy table.
    pub weights: ScoringWeights,
    /// Maximum number of related (and top) results.
    /// Default: 10
    pub related_limit: usize,
    /// Shortest token, in bytes, that earns per-field points.
    /// Default: 2
    pub min_token_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            related_limit: 10,
            min_token_len: 2,
        }
    }
}

impl SearchConfig {
    /// Returns a copy with a different related-list cap.
    pub const fn with_related_limit(mut self, related_limit: usize) -> Self {
        self.related_limit = related_limit;
        self
    }

    /// Returns a copy with different scoring weights.
    pub const fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Result of one search call.
///
/// `top` is populated only when `primary` is empty, in which case it holds the
/// same records as `related`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome<'a> {
    /// Records the query resolves to through the alias table.
    pub primary: Vec<&'a OffenseRecord>,
    /// Ranked non-primary matches.
    pub related: Vec<&'a OffenseRecord>,
    /// Ranked matches when there is no primary.
    pub top: Vec<&'a OffenseRecord>,
    /// Prompt for the empty-query state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl<'a> SearchOutcome<'a> {
    /// The empty-query state.
    pub fn prompt() -> Self {
        Self {
            primary: Vec::new(),
            related: Vec::new(),
            top: Vec::new(),
            status: Some(EMPTY_QUERY_PROMPT),
        }
    }

    /// The record shown as the single primary, if any.
    #[inline]
    pub fn designated_primary(&self) -> Option<&'a OffenseRecord> {
        self.primary.first().copied()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.related.is_empty()
    }
}

/// Errors raised while loading or building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A dataset file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A dataset file is not valid JSON of the expected shape.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Two records share an id.
    #[error("duplicate offense id {id}")]
    DuplicateId {
        /// The repeated id.
        id: OffenseId,
    },
}
