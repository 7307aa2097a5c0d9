use crate::filler::FillerSet;
use crate::inventory::Inventory;

/// Item identifiers split by episode classification, in inventory order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub canon: Vec<String>,
    pub filler: Vec<String>,
    pub all: Vec<String>,
}

impl Buckets {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Split the inventory into canon, filler and all episodes
pub fn partition(inventory: &Inventory, filler: &FillerSet) -> Buckets {
    let mut buckets = Buckets::default();

    for (absolute_number, item_id) in inventory.iter() {
        if filler.contains(absolute_number) {
            buckets.filler.push(item_id.to_string());
        } else {
            buckets.canon.push(item_id.to_string());
        }
        buckets.all.push(item_id.to_string());
    }

    buckets
}
