//! Alias-based primary resolution.

use citeseek_types::{AliasTable, OffenseRecord};

use crate::analyzer::normalizer::TextNormalizer;
use crate::catalog::types::{ByIdIndex, Catalog};

/// Resolves `query` to its primary records through the alias table.
///
/// The raw query is normalized (trim + lower-case, no tokenization) and used
/// as an exact key. Ids missing from `index` are skipped. Order and
/// duplicates of the alias entry are kept; the first record is the one to
/// display as *the* primary.
pub fn resolve_primary<'a>(
    query: &str,
    aliases: &AliasTable,
    index: &ByIdIndex,
    records: &'a [OffenseRecord],
) -> Vec<&'a OffenseRecord> {
    let key = TextNormalizer::new().normalize_cow(query);
    resolve_key(&key, aliases, index, records)
}

pub(crate) fn resolve_key<'a>(
    key: &str,
    aliases: &AliasTable,
    index: &ByIdIndex,
    records: &'a [OffenseRecord],
) -> Vec<&'a OffenseRecord> {
    if key.is_empty() {
        return Vec::new();
    }

    aliases.get(key).map_or_else(Vec::new, |ids| {
        ids.iter()
            .filter_map(|&id| index.resolve(records, id))
            .collect()
    })
}

impl Catalog {
    /// Resolves `query` against this catalog's alias table.
    pub fn resolve_primary(&self, query: &str) -> Vec<&OffenseRecord> {
        let key = self.normalizer.normalize_cow(query);
        resolve_key(&key, &self.aliases, &self.by_id, &self.records)
    }
}
