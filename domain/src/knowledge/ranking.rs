//! Term-overlap relevance ranking for knowledge items.
//!
//! Pure text scoring with no embeddings: the query and each item are
//! tokenized into lowercase terms of three or more characters, and an item
//! scores one point per distinct query term found in its topic, narrative
//! or key points. Topic hits count double.

use super::entities::KnowledgeItem;
use std::collections::HashSet;

const MIN_TERM_LEN: usize = 3;

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .map(|t| t.to_lowercase())
        .collect()
}

/// Relevance of `item` to `query`. Zero means unrelated.
pub fn relevance(query: &str, item: &KnowledgeItem) -> usize {
    let query_terms = terms(query);
    if query_terms.is_empty() {
        return 0;
    }

    let topic_terms = terms(&item.topic);
    let mut body = item.official_narrative.clone();
    for point in &item.key_points {
        body.push(' ');
        body.push_str(point);
    }
    let body_terms = terms(&body);

    query_terms
        .iter()
        .map(|t| {
            let mut score = 0;
            if topic_terms.contains(t) {
                score += 2;
            }
            if body_terms.contains(t) {
                score += 1;
            }
            score
        })
        .sum()
}

/// Rank items by relevance to `query`, most relevant first.
///
/// Items with zero relevance are dropped. Ties keep their input order.
pub fn rank_items<'a, I>(query: &str, items: I) -> Vec<&'a KnowledgeItem>
where
    I: IntoIterator<Item = &'a KnowledgeItem>,
{
    let mut scored: Vec<(usize, &KnowledgeItem)> = items
        .into_iter()
        .map(|item| (relevance(query, item), item))
        .filter(|(score, _)| *score > 0)
        .collect();

    // sort_by is stable, so equal scores keep input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<KnowledgeItem> {
        vec![
            KnowledgeItem::new(
                "Kashmir",
                "Kashmir is a disputed territory.",
                vec!["UN resolutions".to_string()],
            ),
            KnowledgeItem::new(
                "1971 war",
                "The war of 1971 and its aftermath.",
                vec!["Dhaka".to_string(), "ceasefire".to_string()],
            ),
            KnowledgeItem::new("Economy", "Trade figures.", vec![]),
        ]
    }

    #[test]
    fn test_rank_prefers_topic_match() {
        let items = items();
        let ranked = rank_items("Kashmir disputed territory after the war", &items);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].topic, "Kashmir");
        assert_eq!(ranked[1].topic, "1971 war");
    }

    #[test]
    fn test_rank_drops_unrelated() {
        let items = items();
        let ranked = rank_items("weather report for tomorrow", &items);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_relevance_ignores_short_terms_and_case() {
        let items = items();
        assert_eq!(relevance("of an", &items[1]), 0);
        assert_eq!(relevance("DHAKA", &items[1]), 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let a = KnowledgeItem::new("alpha", "shared term", vec![]);
        let b = KnowledgeItem::new("beta", "shared term", vec![]);
        let list = [a, b];
        let ranked = rank_items("shared", &list);
        assert_eq!(ranked[0].topic, "alpha");
        assert_eq!(ranked[1].topic, "beta");
    }
}
