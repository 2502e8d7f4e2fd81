//! Offense lookup engine.
//!
//! Matches a free-text query against a small, static catalog of offense
//! records: an exact alias lookup picks the primary record(s), and a
//! token-containment score ranks everything else.
//!
//! ```
//! use citeseek_core::Catalog;
//! use citeseek_types::{AliasTable, AliasTarget, OffenseRecord};
//!
//! let records = vec![OffenseRecord::new(1, "Failure to Stop at Stop Sign")
//!     .with_keywords("stop sign intersection")
//!     .with_citation("544.010")];
//! let aliases: AliasTable = [("stop sign", AliasTarget::One(1))].into_iter().collect();
//! let catalog = Catalog::new(records, aliases).unwrap();
//!
//! let hit = catalog.search("  Stop Sign ");
//! assert_eq!(hit.primary[0].id, 1);
//! assert!(hit.top.is_empty());
//!
//! let miss = catalog.search("stop");
//! assert!(miss.primary.is_empty());
//! assert_eq!(miss.top, miss.related);
//! ```

pub mod analyzer;
pub mod catalog;
pub mod cell;
pub mod loader;

pub use analyzer::{normalize, tokenize, TextNormalizer, TokenSet, Tokenizer};
pub use catalog::{
    build_index, rank_related, resolve_primary, score_offense, ByIdIndex, Catalog, CatalogStats,
};
pub use cell::CatalogCell;
pub use loader::{load_catalog, StatuteEntry, StatuteLibrary};
