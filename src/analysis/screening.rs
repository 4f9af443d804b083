//! Read-only screening over the loaded records.
//!
//! Every function here borrows the record slice and never reorders it;
//! anything that needs a different order works on a copy.

use crate::models::Record;

/// Thresholds for the recommendation rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendRule {
    /// Exclusive upper bound on P/E.
    pub max_pe: f64,
    /// Exclusive upper bound on EV/EBIT.
    pub max_ev_to_ebit: f64,
}

impl Default for RecommendRule {
    fn default() -> Self {
        Self {
            max_pe: 15.0,
            max_ev_to_ebit: 8.0,
        }
    }
}

impl RecommendRule {
    /// Returns true if the record passes the rule. Non-positive ratios never pass.
    pub fn matches(&self, record: &Record) -> bool {
        record.has_pe()
            && record.pe_ratio < self.max_pe
            && record.has_ev_to_ebit()
            && record.ev_to_ebit < self.max_ev_to_ebit
    }
}

/// Mean P/E over the records where it applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeSummary {
    pub average: f64,
    /// Number of records that contributed.
    pub count: usize,
}

/// A record with its 1-based position in a ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub rank: usize,
    pub record: &'a Record,
}

/// Case-insensitive substring search over symbol and name.
///
/// An empty query matches every record.
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|r| {
            r.symbol.to_lowercase().contains(&needle) || r.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Average P/E over records with a positive P/E.
///
/// Returns `None` when no record has a usable P/E (including the empty case).
pub fn average_pe(records: &[Record]) -> Option<PeSummary> {
    let (sum, count) = records
        .iter()
        .filter(|r| r.has_pe())
        .fold((0.0, 0usize), |(sum, n), r| (sum + r.pe_ratio, n + 1));

    if count == 0 {
        return None;
    }

    Some(PeSummary {
        average: sum / count as f64,
        count,
    })
}

/// The `limit` records with the lowest EV/EBIT, ascending.
///
/// Non-positive EV/EBIT values are not filtered out and sort first.
/// Ties keep load order.
pub fn rank_by_ev_to_ebit(records: &[Record], limit: usize) -> Vec<Ranked<'_>> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| a.ev_to_ebit.total_cmp(&b.ev_to_ebit));
    sorted.truncate(limit);

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, record)| Ranked {
            rank: i + 1,
            record,
        })
        .collect()
}

/// Records passing the recommendation rule, in load order.
pub fn recommend<'a>(records: &'a [Record], rule: &RecommendRule) -> Vec<&'a Record> {
    records.iter().filter(|r| rule.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ratios(symbol: &str, pe: f64, ev: f64) -> Record {
        Record::new(symbol, format!("{} Corp", symbol), 10.0, pe, ev)
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new("AAPL", "Apple Inc", 150.0, 25.4, 12.1),
            Record::new("MSFT", "Microsoft", 310.0, 30.1, 20.0),
            Record::new("KO", "Coca-Cola", 60.5, 12.0, 6.5),
            Record::new("PNAP", "Pineapple Farms", 4.2, -3.0, 2.0),
        ]
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let records = sample();
        assert_eq!(search(&records, "").len(), records.len());
    }

    #[test]
    fn test_search_symbol_case_insensitive() {
        let records = vec![Record::new("AAPL", "Apple Inc", 150.0, 25.4, 12.1)];
        let found = search(&records, "aapl");
        assert_eq!(found, vec![&records[0]]);
    }

    #[test]
    fn test_search_matches_name_substring() {
        let records = sample();
        let found = search(&records, "APPLE");

        let symbols: Vec<_> = found.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "PNAP"]);
    }

    #[test]
    fn test_search_no_match() {
        assert!(search(&sample(), "tesla").is_empty());
        assert!(search(&[], "").is_empty());
    }

    #[test]
    fn test_average_pe_excludes_non_positive() {
        let records = vec![
            with_ratios("A", 10.0, 1.0),
            with_ratios("B", 20.0, 1.0),
            with_ratios("C", -5.0, 1.0),
        ];

        let summary = average_pe(&records).unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.average - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_pe_no_data() {
        assert_eq!(average_pe(&[]), None);

        let records = vec![with_ratios("A", 0.0, 1.0), with_ratios("B", -1.5, 1.0)];
        assert_eq!(average_pe(&records), None);
    }

    #[test]
    fn test_rank_by_ev_to_ebit_takes_lowest_five() {
        let records = vec![
            with_ratios("G", 10.0, 7.0),
            with_ratios("A", 10.0, 1.0),
            with_ratios("F", 10.0, 6.0),
            with_ratios("C", 10.0, 3.0),
            with_ratios("E", 10.0, 5.0),
            with_ratios("B", 10.0, 2.0),
            with_ratios("D", 10.0, 4.0),
        ];

        let ranked = rank_by_ev_to_ebit(&records, 5);

        assert_eq!(ranked.len(), 5);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        let symbols: Vec<_> = ranked.iter().map(|r| r.record.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B", "C", "D", "E"]);

        // Source order untouched
        assert_eq!(records[0].symbol, "G");
    }

    #[test]
    fn test_rank_keeps_non_positive_values_first() {
        let records = vec![
            with_ratios("POS", 10.0, 4.0),
            with_ratios("NEG", 10.0, -2.0),
            with_ratios("ZERO", 10.0, 0.0),
        ];

        let ranked = rank_by_ev_to_ebit(&records, 5);
        let symbols: Vec<_> = ranked.iter().map(|r| r.record.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["NEG", "ZERO", "POS"]);
    }

    #[test]
    fn test_rank_fewer_than_limit_and_stable_ties() {
        let records = vec![with_ratios("X", 1.0, 3.0), with_ratios("Y", 1.0, 3.0)];
        let ranked = rank_by_ev_to_ebit(&records, 5);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].record.symbol, "X");
        assert_eq!(ranked[1].record.symbol, "Y");
        assert!(rank_by_ev_to_ebit(&[], 5).is_empty());
    }

    #[test]
    fn test_recommend_rule_boundaries() {
        let rule = RecommendRule::default();

        assert!(rule.matches(&with_ratios("IN", 10.0, 5.0)));
        assert!(!rule.matches(&with_ratios("HIGHPE", 16.0, 5.0)));
        assert!(!rule.matches(&with_ratios("HIGHEV", 10.0, 9.0)));
        assert!(!rule.matches(&with_ratios("ZEROPE", 0.0, 5.0)));
        assert!(!rule.matches(&with_ratios("NEGEV", 10.0, -1.0)));
        assert!(!rule.matches(&with_ratios("EDGE", 15.0, 8.0)));
    }

    #[test]
    fn test_recommend_keeps_load_order() {
        let records = vec![
            with_ratios("B", 14.0, 7.0),
            with_ratios("SKIP", 30.0, 2.0),
            with_ratios("A", 5.0, 1.0),
        ];

        let picks = recommend(&records, &RecommendRule::default());
        let symbols: Vec<_> = picks.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A"]);
    }

    #[test]
    fn test_recommend_custom_rule() {
        let records = vec![with_ratios("A", 18.0, 9.0)];
        let rule = RecommendRule {
            max_pe: 20.0,
            max_ev_to_ebit: 10.0,
        };
        assert_eq!(recommend(&records, &rule).len(), 1);
        assert!(recommend(&records, &RecommendRule::default()).is_empty());
    }
}
