//! Typo-tolerant ranking of catalog names.
//!
//! Ranking runs in three tiers per candidate:
//! - containment: the normalized query is a substring of the candidate (score 1.0)
//! - whole-string Damerau-Levenshtein within the allowed distance
//! - per-token prefix (score 0.95) or per-token edit distance (weighted by 0.8)
//!
//! [`FuzzyRanker::suggest`] layers deduplication and a result limit on top.

use super::edit_distance::damerau_levenshtein_chars;
use super::normalize::{char_len, normalize, tokens};
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

/// Number of suggestions returned when the caller passes a limit of 0.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Score for a candidate that has a token starting with the query.
const PREFIX_TOKEN_SCORE: f64 = 0.95;

/// Weight applied to edit-distance matches against a single token.
const TOKEN_MATCH_WEIGHT: f64 = 0.8;

/// A ranked match produced for one query. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    /// Candidate text exactly as supplied
    pub text: String,

    /// Edit distance that qualified the match (0 for containment and prefix hits)
    pub distance: usize,

    /// Relevance in (0, 1]; 1.0 is a containment match
    pub score: f64,
}

/// How a multi-word candidate is scored when only its tokens match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenScoring {
    /// Evaluate every token and keep the best score.
    #[default]
    BestMatch,

    /// Stop at the first token that qualifies.
    FirstMatch,
}

impl FromStr for TokenScoring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best" | "best_match" => Ok(Self::BestMatch),
            "first" | "first_match" => Ok(Self::FirstMatch),
            other => Err(format!("expected 'best' or 'first', got: {}", other)),
        }
    }
}

/// Maximum edit distance tolerated for a query of `query_len` chars.
///
/// Short queries stay exact; longer, more specific ones get more slack.
pub fn default_max_distance(query_len: usize) -> usize {
    match query_len {
        0..=2 => 0,
        3..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}

/// Scores and orders candidate strings against a query.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyRanker {
    token_scoring: TokenScoring,
}

impl FuzzyRanker {
    /// Create a ranker with the given token scoring policy.
    pub fn new(token_scoring: TokenScoring) -> Self {
        Self { token_scoring }
    }

    /// The token scoring policy in use.
    pub fn token_scoring(&self) -> TokenScoring {
        self.token_scoring
    }

    /// Rank `candidates` against `query`.
    ///
    /// A `max_distance` of 0 derives the tolerance from the query length via
    /// [`default_max_distance`]. Results are sorted by score (highest first),
    /// then by distance (lowest first); equal pairs keep their input order.
    pub fn rank<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        max_distance: usize,
    ) -> Vec<FuzzyMatch> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let query_chars: Vec<char> = query.chars().collect();
        let max_distance = if max_distance == 0 {
            default_max_distance(query_chars.len())
        } else {
            max_distance
        };

        let mut matches: Vec<FuzzyMatch> = candidates
            .iter()
            .filter_map(|candidate| {
                let text = candidate.as_ref();
                self.score_candidate(&query, &query_chars, text, max_distance)
                    .filter(|&(_, score)| score > 0.0)
                    .map(|(distance, score)| FuzzyMatch {
                        text: text.to_string(),
                        distance,
                        score,
                    })
            })
            .collect();

        // sort_by is stable, which keeps equal matches in candidate order.
        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.distance.cmp(&b.distance))
        });

        matches
    }

    /// Distinct suggestions for `query`, most relevant first.
    ///
    /// Duplicates are detected on the normalized text; the first-ranked
    /// spelling wins and is returned as stored. A `limit` of 0 means
    /// [`DEFAULT_SUGGESTION_LIMIT`].
    pub fn suggest<S: AsRef<str>>(&self, query: &str, candidates: &[S], limit: usize) -> Vec<String> {
        let limit = if limit == 0 {
            DEFAULT_SUGGESTION_LIMIT
        } else {
            limit
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut results: Vec<String> = Vec::new();

        for m in self.rank(query, candidates, 0) {
            if seen.insert(normalize(&m.text)) {
                results.push(m.text);
                if results.len() >= limit {
                    break;
                }
            }
        }

        results
    }

    /// Returns `(distance, score)` if the candidate qualifies.
    fn score_candidate(
        &self,
        query: &str,
        query_chars: &[char],
        candidate: &str,
        max_distance: usize,
    ) -> Option<(usize, f64)> {
        let normalized = normalize(candidate);

        if normalized.contains(query) {
            return Some((0, 1.0));
        }

        let candidate_chars: Vec<char> = normalized.chars().collect();
        let distance = damerau_levenshtein_chars(query_chars, &candidate_chars);
        if distance <= max_distance {
            let score = similarity(distance, query_chars.len(), candidate_chars.len());
            return Some((distance, score));
        }

        self.score_tokens(query, query_chars, &normalized, max_distance)
    }

    fn score_tokens(
        &self,
        query: &str,
        query_chars: &[char],
        normalized: &str,
        max_distance: usize,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;

        for token in tokens(normalized) {
            let hit = if token.starts_with(query) {
                Some((0, PREFIX_TOKEN_SCORE))
            } else {
                let token_chars: Vec<char> = token.chars().collect();
                let distance = damerau_levenshtein_chars(query_chars, &token_chars);
                (distance <= max_distance).then(|| {
                    let score = similarity(distance, query_chars.len(), char_len(token));
                    (distance, TOKEN_MATCH_WEIGHT * score)
                })
            };

            // A zero-score token hit does not qualify the candidate
            let Some(hit) = hit.filter(|&(_, score)| score > 0.0) else {
                continue;
            };

            match self.token_scoring {
                TokenScoring::FirstMatch => return Some(hit),
                TokenScoring::BestMatch => {
                    // No edit-distance token match can outscore a prefix hit.
                    if hit.1 >= PREFIX_TOKEN_SCORE {
                        return Some(hit);
                    }
                    if best.map_or(true, |current| is_better(hit, current)) {
                        best = Some(hit);
                    }
                }
            }
        }

        best
    }
}

/// Rank with the default ranker. See [`FuzzyRanker::rank`].
pub fn rank<S: AsRef<str>>(query: &str, candidates: &[S], max_distance: usize) -> Vec<FuzzyMatch> {
    FuzzyRanker::default().rank(query, candidates, max_distance)
}

/// Suggest with the default ranker. See [`FuzzyRanker::suggest`].
pub fn suggest<S: AsRef<str>>(query: &str, candidates: &[S], limit: usize) -> Vec<String> {
    FuzzyRanker::default().suggest(query, candidates, limit)
}

fn similarity(distance: usize, a_len: usize, b_len: usize) -> f64 {
    let longest = a_len.max(b_len).max(1);
    1.0 - distance as f64 / longest as f64
}

fn is_better(candidate: (usize, f64), current: (usize, f64)) -> bool {
    candidate.1 > current.1 || (candidate.1 == current.1 && candidate.0 < current.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(matches: &[FuzzyMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_default_max_distance() {
        assert_eq!(default_max_distance(1), 0);
        assert_eq!(default_max_distance(2), 0);
        assert_eq!(default_max_distance(3), 1);
        assert_eq!(default_max_distance(4), 1);
        assert_eq!(default_max_distance(5), 2);
        assert_eq!(default_max_distance(8), 2);
        assert_eq!(default_max_distance(9), 3);
        assert_eq!(default_max_distance(40), 3);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(rank("", &["Apple"], 0).is_empty());
        assert!(rank("   ", &["Apple"], 0).is_empty());
        assert!(suggest("  ", &["Apple"], 5).is_empty());
    }

    #[test]
    fn test_empty_candidates_return_nothing() {
        let empty: [&str; 0] = [];
        assert!(rank("apple", &empty, 0).is_empty());
    }

    #[test]
    fn test_containment_outranks_everything() {
        let matches = rank("appl", &["Apple", "Banana", "Application"], 0);

        assert_eq!(texts(&matches), vec!["Apple", "Application"]);
        assert!(matches.iter().all(|m| m.score == 1.0 && m.distance == 0));
    }

    #[test]
    fn test_whole_string_typo_match() {
        let matches = rank("aple", &["Apple"], 0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].distance, 1);
        assert!((matches[0].score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_transposed_letters_match() {
        let matches = rank("mlik", &["Milk"], 0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].distance, 1);
    }

    #[test]
    fn test_token_typo_match_is_weighted() {
        let matches = rank("basmti", &["India Gate Basmati Rice"], 0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].distance, 1);
        let expected = 0.8 * (1.0 - 1.0 / 7.0);
        assert!((matches[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_short_query_tolerates_no_typos() {
        // "xi" is two chars, so max distance is 0 and only containment counts.
        let matches = rank("xi", &["Xiaomi Charger", "Kiwi"], 0);
        assert_eq!(texts(&matches), vec!["Xiaomi Charger"]);
    }

    #[test]
    fn test_explicit_max_distance_overrides_default() {
        let strict = rank("sugr", &["Salt"], 0);
        assert!(strict.is_empty());

        let loose = rank("sugr", &["Salt"], 3);
        assert_eq!(texts(&loose), vec!["Salt"]);
        assert!(loose[0].score > 0.0);
    }

    #[test]
    fn test_zero_score_matches_are_dropped() {
        // Distance equals the longer length, which would score 0.
        let matches = rank("ab", &["xyz"], 5);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_sorted_by_score_then_distance() {
        let matches = rank(
            "tomatos",
            &["Potatos Tomatoes", "Tomatoes", "Cherry Tomatos"],
            0,
        );

        assert_eq!(matches[0].text, "Cherry Tomatos");
        assert_eq!(matches[0].score, 1.0);
        assert_eq!(matches[1].text, "Tomatoes");
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_equal_matches_keep_input_order() {
        let matches = rank("rice", &["Rice Flour", "Brown Rice", "Rice"], 0);
        assert_eq!(texts(&matches), vec!["Rice Flour", "Brown Rice", "Rice"]);
    }

    #[test]
    fn test_best_match_prefers_strongest_token() {
        let candidates = ["Potatos Tomatoes"];

        let best = FuzzyRanker::new(TokenScoring::BestMatch).rank("tomatos", &candidates, 0);
        let first = FuzzyRanker::new(TokenScoring::FirstMatch).rank("tomatos", &candidates, 0);

        assert_eq!(best[0].distance, 1);
        assert!((best[0].score - 0.8 * (1.0 - 1.0 / 8.0)).abs() < 1e-9);

        assert_eq!(first[0].distance, 2);
        assert!((first[0].score - 0.8 * (1.0 - 2.0 / 7.0)).abs() < 1e-9);
        assert!(best[0].score > first[0].score);
    }

    #[test]
    fn test_zero_score_token_does_not_end_first_match_scan() {
        let ranker = FuzzyRanker::new(TokenScoring::FirstMatch);
        assert_eq!(ranker.token_scoring(), TokenScoring::FirstMatch);

        // "wxyz" is within distance 4 of "abcd" but scores 0, so "abce" decides.
        let matches = ranker.rank("abcd", &["wxyz abce"], 4);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].distance, 1);
        assert!((matches[0].score - 0.8 * (1.0 - 1.0 / 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_default_ranker_uses_best_match() {
        assert_eq!(FuzzyRanker::default().token_scoring(), TokenScoring::BestMatch);
    }

    #[test]
    fn test_suggest_deduplicates_case_insensitively() {
        let results = suggest("milk", &["Milk", "milk", "MILK 1L"], 10);
        assert_eq!(results, vec!["Milk", "MILK 1L"]);
    }

    #[test]
    fn test_suggest_respects_limit() {
        let candidates: Vec<String> = (0..30).map(|i| format!("Green Tea {}", i)).collect();

        assert_eq!(suggest("tea", &candidates, 5).len(), 5);
        assert_eq!(suggest("tea", &candidates, 0).len(), DEFAULT_SUGGESTION_LIMIT);
    }

    #[test]
    fn test_suggest_preserves_original_text() {
        let results = suggest("RIC", &["  Basmati RICE  "], 10);
        assert_eq!(results, vec!["  Basmati RICE  "]);
    }

    #[test]
    fn test_token_scoring_from_str() {
        assert_eq!("best".parse::<TokenScoring>(), Ok(TokenScoring::BestMatch));
        assert_eq!(" FIRST ".parse::<TokenScoring>(), Ok(TokenScoring::FirstMatch));
        assert!("fuzzy".parse::<TokenScoring>().is_err());
    }

    #[test]
    fn test_fuzzy_match_serializes() {
        let m = FuzzyMatch {
            text: "Rice".to_string(),
            distance: 0,
            score: 1.0,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["text"], "Rice");
        assert_eq!(json["distance"], 0);
        assert_eq!(json["score"], 1.0);
    }
}
