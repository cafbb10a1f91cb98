//! Local free-text filtering used when the upstream API cannot filter for us.
//!
//! Matching is a case-insensitive substring test over every populated scalar
//! attribute of an item, identifiers and type tags included. Any field match
//! keeps the item.

use super::pagination::SearchParams;
use super::types::{Breed, Fact, Group, LifeSpan, WeightRange};

/// Exposes an item's scalar attributes as strings for free-text matching.
pub trait Searchable {
    fn searchable_values(&self) -> Vec<String>;

    fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.searchable_values()
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

/// Keeps the items matching the search query; no query keeps everything.
pub fn filter_items<T: Searchable>(items: Vec<T>, search: Option<&SearchParams>) -> Vec<T> {
    match search.and_then(SearchParams::active_query) {
        Some(query) => items
            .into_iter()
            .filter(|item| item.matches_query(query))
            .collect(),
        None => items,
    }
}

fn push_life(values: &mut Vec<String>, life: Option<&LifeSpan>) {
    if let Some(life) = life {
        values.push(life.min().to_string());
        values.push(life.max().to_string());
    }
}

fn push_weight(values: &mut Vec<String>, weight: Option<&WeightRange>) {
    if let Some(weight) = weight {
        values.push(weight.min().to_string());
        values.push(weight.max().to_string());
    }
}

impl Searchable for Breed {
    fn searchable_values(&self) -> Vec<String> {
        let mut values = vec![
            self.id.clone(),
            self.kind.as_str().to_string(),
            self.name.clone(),
        ];
        values.extend(self.description.clone());
        push_life(&mut values, self.life.as_ref());
        push_weight(&mut values, self.male_weight.as_ref());
        push_weight(&mut values, self.female_weight.as_ref());
        values.push(self.hypoallergenic.to_string());
        values.extend(self.group.as_ref().map(|g| g.id.clone()));
        values.extend(self.link.clone());
        values
    }
}

impl Searchable for Group {
    fn searchable_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.kind.as_str().to_string(),
            self.name.clone(),
        ]
    }
}

impl Searchable for Fact {
    fn searchable_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.kind.as_str().to_string(),
            self.body.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breeds() -> Vec<Breed> {
        vec![
            Breed::new("1", "Labrador Retriever").with_description("Outgoing and gentle"),
            Breed::new("2", "Akita").with_description("Loyal guardian from Japan"),
            Breed::new("3", "Beagle").with_group("hound-7"),
        ]
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let found = filter_items(breeds(), Some(&SearchParams::query("lab")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Labrador Retriever");

        let found = filter_items(breeds(), Some(&SearchParams::query("JAPAN")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_query_matches_any_field() {
        let found = filter_items(breeds(), Some(&SearchParams::query("hound")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Beagle");
    }

    #[test]
    fn test_query_matches_identifiers() {
        let found = filter_items(breeds(), Some(&SearchParams::query("3")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Beagle");
    }

    #[test]
    fn test_query_matches_weights_and_link() {
        let mut items = breeds();
        items.push(
            Breed::new("4", "Saluki")
                .with_weights(WeightRange::new(18.0, 27.5).ok(), None)
                .with_link("https://dogapi.dog/api/v2/breeds/4"),
        );

        let found = filter_items(items.clone(), Some(&SearchParams::query("27.5")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Saluki");

        let found = filter_items(items, Some(&SearchParams::query("dogapi.dog")));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "4");
    }

    #[test]
    fn test_missing_or_blank_query_keeps_everything() {
        assert_eq!(filter_items(breeds(), None).len(), 3);
        assert_eq!(filter_items(breeds(), Some(&SearchParams::default())).len(), 3);
        assert_eq!(filter_items(breeds(), Some(&SearchParams::query(" "))).len(), 3);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(filter_items(breeds(), Some(&SearchParams::query("poodle"))).is_empty());
    }

    #[test]
    fn test_group_and_fact_searchable() {
        let groups = vec![
            Group::new("10", "Herding Group"),
            Group::new("11", "Toy Group"),
        ];
        let found = filter_items(groups, Some(&SearchParams::query("herd")));
        assert_eq!(found.len(), 1);

        let facts = vec![Fact::new("f1", "Dogs sweat through their paws.")];
        assert!(facts[0].matches_query("PAWS"));
    }
}
