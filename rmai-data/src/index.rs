//! Characters across all locations, keyed by id.

use std::collections::HashMap;

use rmai_core::{Location, Resident};

/// Every resident of every location, once per id.
///
/// Iteration follows the order ids were first seen. When an id shows up at
/// several locations the last record wins.
#[derive(Debug, Clone, Default)]
pub struct CharacterIndex {
    order: Vec<String>,
    by_id: HashMap<String, Resident>,
}

impl CharacterIndex {
    pub fn from_locations(locations: &[Location]) -> Self {
        let mut index = Self::default();
        for resident in locations.iter().flat_map(|l| l.residents.iter()) {
            if !index.by_id.contains_key(&resident.id) {
                index.order.push(resident.id.clone());
            }
            index.by_id.insert(resident.id.clone(), resident.clone());
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&Resident> {
        self.by_id.get(id)
    }

    /// First character (in index order) with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Resident> {
        self.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resident> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident(id: &str, name: &str, status: &str) -> Resident {
        Resident { id: id.into(), name: name.into(), status: status.into(), ..Default::default() }
    }

    #[test]
    fn dedupes_by_id_keeping_first_order_and_last_record() {
        let locations = vec![
            Location {
                residents: vec![resident("1", "Rick", "Alive"), resident("2", "Morty", "Alive")],
                ..Default::default()
            },
            Location { residents: vec![resident("1", "Rick", "Unknown")], ..Default::default() },
        ];
        let index = CharacterIndex::from_locations(&locations);

        assert_eq!(index.len(), 2);
        let names: Vec<&str> = index.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Rick", "Morty"]);
        assert_eq!(index.get("1").unwrap().status, "Unknown");
        assert_eq!(index.find_by_name("Morty").unwrap().id, "2");
        assert!(index.find_by_name("Jerry").is_none());
    }
}
