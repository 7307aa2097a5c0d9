mod extract;
mod fetch;
mod types;

pub use extract::{absolute_number, extract_from_name, extract_from_path};
pub use fetch::{build_inventory, fetch_inventory};

use std::collections::HashMap;

/// An episode as listed by the media server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    /// Absolute episode number, if one could be extracted
    pub absolute_number: Option<u32>,
    /// Media server item identifier
    pub item_id: String,
}

/// Mapping from absolute episode number to media server item identifier
///
/// Iterates in insertion order. Inserting a number again replaces its
/// identifier but keeps the position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<(u32, String)>,
    positions: HashMap<u32, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `absolute_number` to `item_id`, returning the replaced identifier
    pub fn insert(&mut self, absolute_number: u32, item_id: impl Into<String>) -> Option<String> {
        let item_id = item_id.into();

        match self.positions.get(&absolute_number) {
            Some(&index) => Some(std::mem::replace(&mut self.entries[index].1, item_id)),
            None => {
                self.positions.insert(absolute_number, self.entries.len());
                self.entries.push((absolute_number, item_id));
                None
            }
        }
    }

    pub fn get(&self, absolute_number: u32) -> Option<&str> {
        self.positions
            .get(&absolute_number)
            .map(|&index| self.entries[index].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .map(|(number, item_id)| (*number, item_id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for (absolute_number, item_id) in iter {
            inventory.insert(absolute_number, item_id);
        }
        inventory
    }
}
