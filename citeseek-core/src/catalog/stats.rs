//! Statistics and CatalogStats.

use crate::catalog::types::Catalog;

/// A snapshot of catalog statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of records in the catalog.
    pub num_records: usize,
    /// Number of alias keys.
    pub num_aliases: usize,
    /// Total ids referenced by all alias entries, duplicates included.
    pub alias_targets: usize,
    /// Referenced ids that are not in the catalog.
    pub unresolved_targets: usize,
}

impl Catalog {
    /// Returns catalog statistics.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_catalog(self)
    }
}

impl CatalogStats {
    /// Constructs stats from a catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let (alias_targets, unresolved_targets) =
            catalog
                .aliases
                .iter()
                .fold((0, 0), |(total, missing), (_, ids)| {
                    let unresolved = ids.iter().filter(|&&id| !catalog.by_id.contains(id)).count();
                    (total + ids.len(), missing + unresolved)
                });

        Self {
            num_records: catalog.records.len(),
            num_aliases: catalog.aliases.len(),
            alias_targets,
            unresolved_targets,
        }
    }
}

impl core::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} records, {} aliases, {} alias targets",
            self.num_records, self.num_aliases, self.alias_targets
        )?;

        if self.unresolved_targets > 0 {
            write!(f, " ({} unresolved)", self.unresolved_targets)?;
        }

        Ok(())
    }
}
