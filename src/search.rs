//! Weighted fuzzy matching over the sandbox candidate set.
//!
//! The index is rebuilt for every query; nothing is cached between calls.
//! Fields contribute with fixed relative weights, and candidates scoring
//! below the cutoff are dropped.

use crate::consts::dashboard_consts::search as tuning;
use crate::state::Sandbox;
use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher};

/// Per-query fuzzy index over a fixed set of sandbox fields.
pub struct SearchIndex {
    matcher: Matcher,
}

impl SearchIndex {
    pub fn new() -> Self {
        SearchIndex {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Ranks `candidates` against `query`, best match first. An empty query
    /// matches nothing.
    pub fn search(&mut self, candidates: &[Sandbox], query: &str) -> Vec<Sandbox> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        // The pattern's score against the query itself is the best any field
        // can reach; field scores are normalized against it.
        let perfect = self.raw_score(&pattern, query).unwrap_or(1.0).max(1.0);

        let mut ranked: Vec<(f32, &Sandbox)> = candidates
            .iter()
            .filter_map(|sandbox| {
                let score = self.weighted_score(&pattern, sandbox, perfect);
                (score >= tuning::SCORE_THRESHOLD).then_some((score, sandbox))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked
            .into_iter()
            .map(|(_, sandbox)| sandbox.clone())
            .collect()
    }

    fn weighted_score(&mut self, pattern: &Pattern, sandbox: &Sandbox, perfect: f32) -> f32 {
        let fields = [
            (sandbox.title.as_deref(), tuning::TITLE_WEIGHT),
            (sandbox.description.as_deref(), tuning::DESCRIPTION_WEIGHT),
            (sandbox.alias.as_deref(), tuning::ALIAS_WEIGHT),
            (sandbox.source_template.as_deref(), tuning::TEMPLATE_WEIGHT),
            (Some(sandbox.id.as_str()), tuning::ID_WEIGHT),
        ];
        fields
            .into_iter()
            .map(|(text, weight)| match text.and_then(|t| self.raw_score(pattern, t)) {
                Some(score) => weight * (score / perfect).min(1.0),
                None => 0.0,
            })
            .sum()
    }

    fn raw_score(&mut self, pattern: &Pattern, text: &str) -> Option<f32> {
        pattern
            .match_list(std::iter::once(text), &mut self.matcher)
            .into_iter()
            .next()
            .map(|(_, score)| score as f32)
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        SearchIndex::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox(id: &str, title: &str) -> Sandbox {
        Sandbox {
            id: id.to_string(),
            title: Some(title.to_string()),
            ..Sandbox::default()
        }
    }

    #[test]
    fn test_title_prefix_match_beats_non_match() {
        let candidates = vec![sandbox("s1", "foobar"), sandbox("s2", "bar")];
        let mut index = SearchIndex::new();

        let results = index.search(&candidates, "foo");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "s1");
    }

    #[test]
    fn test_title_outranks_description() {
        let by_description = Sandbox {
            description: Some("metrics".to_string()),
            ..sandbox("s1", "something else")
        };
        let by_title = sandbox("s2", "metrics");
        let candidates = vec![by_description, by_title];
        let mut index = SearchIndex::new();

        let results = index.search(&candidates, "metrics");
        assert_eq!(results[0].id, "s2");
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let candidates = vec![sandbox("s1", "anything")];
        let mut index = SearchIndex::new();
        assert!(index.search(&candidates, "").is_empty());
        assert!(index.search(&candidates, "   ").is_empty());
    }

    #[test]
    fn test_case_is_ignored() {
        let candidates = vec![sandbox("s1", "FooBar")];
        let mut index = SearchIndex::new();
        let results = index.search(&candidates, "foobar");
        assert_eq!(results.len(), 1);
    }
}
