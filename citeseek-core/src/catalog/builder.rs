//! Catalog building logic.

use citeseek_types::{AliasIds, AliasTable, CatalogError, OffenseRecord, SearchConfig};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::analyzer::normalizer::TextNormalizer;
use crate::catalog::types::{ByIdIndex, Catalog, Haystack};

/// Builds the id → position index for `records`.
///
/// # Errors
///
/// Returns `CatalogError::DuplicateId` for the first id seen twice.
pub fn build_index(records: &[OffenseRecord]) -> Result<ByIdIndex, CatalogError> {
    let mut positions = FxHashMap::default();
    positions.reserve(records.len());

    for (pos, record) in records.iter().enumerate() {
        if positions.insert(record.id, pos).is_some() {
            return Err(CatalogError::DuplicateId { id: record.id });
        }
    }

    Ok(ByIdIndex { positions })
}

/// Re-keys alias entries by their normalized form.
///
/// Entries are visited in raw-key order. When two raw keys normalize to the
/// same key, a raw key that is already normalized wins; otherwise the first
/// one wins. Keys that normalize to the empty string are dropped.
pub fn normalize_aliases<I, K, T>(entries: I) -> AliasTable
where
    I: IntoIterator<Item = (K, T)>,
    K: Into<String>,
    T: Into<AliasIds>,
{
    let mut sorted: Vec<(String, AliasIds)> = entries
        .into_iter()
        .map(|(k, t)| (k.into(), t.into()))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let normalizer = TextNormalizer::new();
    let mut table = AliasTable::new();

    for (raw, ids) in sorted {
        let key = normalizer.normalize(&raw);
        if key.is_empty() {
            warn!(raw = %raw, "dropping alias with empty key");
            continue;
        }

        if table.contains_key(&key) {
            if key != raw {
                warn!(raw = %raw, key = %key, "alias key collides after normalization, keeping earlier entry");
                continue;
            }
            warn!(key = %key, "alias key collides after normalization, exact key wins");
        }
        table.insert(key, ids);
    }

    table
}

impl Catalog {
    pub(crate) fn build(
        records: Vec<OffenseRecord>,
        aliases: AliasTable,
        config: SearchConfig,
    ) -> Result<Self, CatalogError> {
        let by_id = build_index(&records)?;
        let normalizer = TextNormalizer::new();

        let haystacks = records
            .iter()
            .map(|r| Haystack::from_record(r, &normalizer))
            .collect();

        let aliases = normalize_aliases(
            aliases
                .iter()
                .map(|(k, ids)| (k.to_owned(), AliasIds::from_slice(ids))),
        );

        let catalog = Self {
            records,
            haystacks,
            by_id,
            aliases,
            normalizer,
            config,
        };

        let stats = catalog.stats();
        if stats.unresolved_targets > 0 {
            warn!(
                unresolved = stats.unresolved_targets,
                "alias table references ids missing from the catalog"
            );
        }
        info!(%stats, "catalog built");
        debug!(?config, "search configuration");

        Ok(catalog)
    }
}
