//! Matching and ranking over an immutable offense catalog.
//!
//! Two passes per query:
//! - **Primary**: the trimmed, lower-cased query is an exact key into the
//!   alias table; its ids resolve through the by-id index.
//! - **Related**: every record is scored by token containment, zero scores
//!   are dropped, the rest are stable-sorted best first with primaries
//!   removed, and the list is capped (10 by default).
//!
//! The catalog is small (low hundreds of records), so a linear scan per
//! keystroke is cheap; there are no posting lists.
//!
//! Threading:
//! - [`Catalog`] is immutable after construction and `Send + Sync`. Swap
//!   whole catalogs through [`crate::CatalogCell`].

mod builder;
mod primary;
mod scoring;
mod search;
mod stats;
mod types;

pub use builder::{build_index, normalize_aliases};
pub use primary::resolve_primary;
pub use scoring::{score_haystack, score_offense, score_offense_with, Field};
pub use search::rank_related;
pub use stats::CatalogStats;
pub use types::{ByIdIndex, Catalog, Haystack};
