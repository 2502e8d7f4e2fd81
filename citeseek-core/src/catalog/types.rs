//! Catalog types and constants.

use citeseek_types::{AliasTable, CatalogError, OffenseId, OffenseRecord, SearchConfig};
use rustc_hash::FxHashMap;

use crate::analyzer::normalizer::TextNormalizer;

/// Normalized copies of the three searchable fields of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Haystack {
    pub title: String,
    pub keywords: String,
    pub citation: String,
}

impl Haystack {
    /// Normalizes the searchable fields of `record`. Missing fields become
    /// empty strings.
    pub fn from_record(record: &OffenseRecord, normalizer: &TextNormalizer) -> Self {
        Self {
            title: normalizer.normalize(&record.title),
            keywords: normalizer.normalize(record.keywords()),
            citation: normalizer.normalize(record.citation()),
        }
    }
}

/// Maps an offense id to its position in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByIdIndex {
    pub(crate) positions: FxHashMap<OffenseId, usize>,
}

impl ByIdIndex {
    /// Position of `id` in the record slice the index was built from.
    #[inline]
    pub fn position(&self, id: OffenseId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Looks `id` up in `records`, which must be the slice the index was
    /// built from.
    #[inline]
    pub fn resolve<'a>(&self, records: &'a [OffenseRecord], id: OffenseId) -> Option<&'a OffenseRecord> {
        self.position(id).and_then(|p| records.get(p))
    }

    /// Returns `true` if `id` is indexed.
    #[inline]
    pub fn contains(&self, id: OffenseId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Number of indexed ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if nothing is indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Immutable, searchable offense catalog.
///
/// Holds the records, their id index, the alias table and one cached
/// [`Haystack`] per record. Every query method takes `&self`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) records: Vec<OffenseRecord>,
    pub(crate) haystacks: Vec<Haystack>,
    pub(crate) by_id: ByIdIndex,
    pub(crate) aliases: AliasTable,
    pub(crate) normalizer: TextNormalizer,
    pub(crate) config: SearchConfig,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog {
    /// Builds a catalog with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records share an id.
    pub fn new(records: Vec<OffenseRecord>, aliases: AliasTable) -> Result<Self, CatalogError> {
        Self::with_config(records, aliases, SearchConfig::default())
    }

    /// Builds a catalog with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records share an id.
    pub fn with_config(
        records: Vec<OffenseRecord>,
        aliases: AliasTable,
        config: SearchConfig,
    ) -> Result<Self, CatalogError> {
        Self::build(records, aliases, config)
    }

    /// A catalog with no records and no aliases.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            haystacks: Vec::new(),
            by_id: ByIdIndex::default(),
            aliases: AliasTable::new(),
            normalizer: TextNormalizer::new(),
            config: SearchConfig::default(),
        }
    }

    /// Returns the number of records.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the catalog has no records.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in catalog order.
    #[inline]
    pub fn records(&self) -> &[OffenseRecord] {
        &self.records
    }

    /// Looks a record up by id.
    #[inline]
    pub fn get(&self, id: OffenseId) -> Option<&OffenseRecord> {
        self.by_id.resolve(&self.records, id)
    }

    /// The id index.
    #[inline]
    pub fn by_id(&self) -> &ByIdIndex {
        &self.by_id
    }

    /// The normalized alias table.
    #[inline]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
