//! Search operations.

use citeseek_types::{OffenseId, OffenseRecord, ScoredMatch, SearchConfig, SearchOutcome};
use smallvec::SmallVec;
use tracing::debug;

use crate::analyzer::tokenizer::TokenSet;
use crate::catalog::primary::resolve_key;
use crate::catalog::scoring::score_offense_with;
use crate::catalog::types::Catalog;

/// Keeps positive scores, stable-sorts them descending, drops primaries and
/// truncates to `limit`.
///
/// `sort_by` is stable, so equal scores keep the order `scored` yields them
/// in, which is catalog order.
fn rank_scored<'a, I>(scored: I, primary_ids: &[OffenseId], limit: usize) -> Vec<ScoredMatch<'a>>
where
    I: Iterator<Item = ScoredMatch<'a>>,
{
    let mut matches: Vec<ScoredMatch<'a>> = scored
        .filter(|m| m.score > 0 && !primary_ids.contains(&m.record.id))
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(limit);
    matches
}

/// Ranks `records` against `tokens`, excluding `primary_ids`.
///
/// Returns at most `config.related_limit` records, all with a positive score,
/// best first; ties keep catalog order.
pub fn rank_related<'a>(
    tokens: &TokenSet,
    records: &'a [OffenseRecord],
    primary_ids: &[OffenseId],
    config: &SearchConfig,
) -> Vec<&'a OffenseRecord> {
    let scored = records
        .iter()
        .map(|r| ScoredMatch::new(score_offense_with(tokens, r, config), r));

    rank_scored(scored, primary_ids, config.related_limit)
        .into_iter()
        .map(|m| m.record)
        .collect()
}

impl Catalog {
    /// Scored, ranked non-primary matches for `tokens`.
    pub fn rank_scored(&self, tokens: &TokenSet, primary_ids: &[OffenseId]) -> Vec<ScoredMatch<'_>> {
        let scored = self
            .records
            .iter()
            .enumerate()
            .map(|(pos, r)| ScoredMatch::new(self.score_at(tokens, pos), r));

        rank_scored(scored, primary_ids, self.config.related_limit)
    }

    /// Ranked non-primary matches for `tokens`.
    pub fn rank_related(&self, tokens: &TokenSet, primary_ids: &[OffenseId]) -> Vec<&OffenseRecord> {
        self.rank_scored(tokens, primary_ids)
            .into_iter()
            .map(|m| m.record)
            .collect()
    }

    /// Runs a full search for one query.
    ///
    /// - Empty query (after trimming): nothing matches and `status` carries
    ///   the prompt.
    /// - Alias hit: `primary` holds the resolved records, `related` the
    ///   ranked non-primary matches, `top` is empty.
    /// - No alias hit: `primary` is empty and `top` repeats `related`.
    ///
    /// Pure over `&self`: the same query always yields the same outcome.
    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        let normalized = self.normalizer.normalize(query);
        if normalized.is_empty() {
            debug!("empty query");
            return SearchOutcome::prompt();
        }

        let primary = resolve_key(&normalized, &self.aliases, &self.by_id, &self.records);
        let primary_ids: SmallVec<[OffenseId; 4]> = primary.iter().map(|r| r.id).collect();

        let tokens = TokenSet::from_normalized(normalized);
        let related = self.rank_related(&tokens, &primary_ids);
        let top = if primary.is_empty() {
            related.clone()
        } else {
            Vec::new()
        };

        debug!(
            query = tokens.normalized(),
            tokens = tokens.len(),
            primary = primary.len(),
            related = related.len(),
            "search"
        );

        SearchOutcome {
            primary,
            related,
            top,
            status: None,
        }
    }
}
