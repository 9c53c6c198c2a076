use std::collections::HashMap;
use tracing::debug;

use crate::models::{FeedbackItem, ThemeCluster};

/// Themes kept in a report
pub const MAX_THEMES: usize = 5;
/// Member texts quoted per theme
pub const EXAMPLES_PER_THEME: usize = 3;

/// Group items by category, in the order each category first appears.
///
/// Every item lands in exactly one group, so the group counts always sum to
/// `items.len()`.
pub fn group_themes(items: &[FeedbackItem]) -> Vec<ThemeCluster> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&FeedbackItem>)> = Vec::new();

    for item in items {
        let slot = *index.entry(item.category.as_str()).or_insert_with(|| {
            groups.push((item.category.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(item);
    }

    groups
        .into_iter()
        .map(|(name, members)| {
            let sum: i64 = members.iter().map(|m| m.sentiment_score as i64).sum();
            ThemeCluster {
                name: name.to_string(),
                count: members.len(),
                sentiment: sum as f64 / members.len() as f64,
                examples: members
                    .iter()
                    .take(EXAMPLES_PER_THEME)
                    .map(|m| m.text.clone())
                    .collect(),
            }
        })
        .collect()
}

/// Rank themes by size and keep the largest `MAX_THEMES`.
///
/// Equal sizes keep their first-seen order (`sort_by` is stable).
pub fn cluster_themes(items: &[FeedbackItem]) -> Vec<ThemeCluster> {
    let mut themes = group_themes(items);
    let distinct = themes.len();

    themes.sort_by(|a, b| b.count.cmp(&a.count));
    themes.truncate(MAX_THEMES);

    debug!(
        "Theme clustering - items={}, categories={}, kept={}",
        items.len(),
        distinct,
        themes.len()
    );
    themes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentLabel;

    fn item(text: &str, category: &str, score: i32) -> FeedbackItem {
        FeedbackItem {
            id: text.to_string(),
            text: text.to_string(),
            sentiment_score: score,
            sentiment_label: SentimentLabel::from_score(score),
            keywords: vec![],
            category: category.to_string(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_themes(&[]).is_empty());
        assert!(group_themes(&[]).is_empty());
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let items = vec![
            item("a", "Features", 0),
            item("b", "Pricing & Value", 2),
            item("c", "Features", 2),
        ];
        let names: Vec<String> = group_themes(&items).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Features", "Pricing & Value"]);
    }

    #[test]
    fn test_mean_sentiment_and_examples() {
        let items = vec![
            item("one", "UX", 2),
            item("two", "UX", -4),
            item("three", "UX", 0),
            item("four", "UX", 4),
        ];
        let themes = cluster_themes(&items);
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].count, 4);
        assert!((themes[0].sentiment - 0.5).abs() < f64::EPSILON);
        assert_eq!(themes[0].examples, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_sorted_by_count_with_stable_ties() {
        let items = vec![
            item("1", "A", 0),
            item("2", "B", 0),
            item("3", "C", 0),
            item("4", "C", 0),
            item("5", "B", 0),
            item("6", "D", 0),
        ];
        let names: Vec<String> = cluster_themes(&items).into_iter().map(|t| t.name).collect();
        // B and C both have two members; B appeared first
        assert_eq!(names, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_truncates_to_five() {
        let categories = ["A", "B", "C", "D", "E", "F", "G"];
        let mut items = Vec::new();
        for (i, cat) in categories.iter().enumerate() {
            items.push(item(&format!("{}-x", cat), cat, 0));
            if i == 6 {
                items.push(item("G-y", cat, 0));
            }
        }

        let all = group_themes(&items);
        assert_eq!(all.iter().map(|t| t.count).sum::<usize>(), items.len());

        let top = cluster_themes(&items);
        assert_eq!(top.len(), MAX_THEMES);
        assert_eq!(top[0].name, "G");
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["G", "A", "B", "C", "D"]);
        assert!(top.iter().map(|t| t.count).sum::<usize>() <= items.len());
    }
}
