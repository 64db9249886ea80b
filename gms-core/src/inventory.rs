//! Inventory collection and sorting

use tracing::debug;

use crate::error::{CoreError, Result};
use crate::item::{self, Item};

/// Sort order for inventory listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    #[default]
    Sku,
    Name,
}

/// Records in insertion order, unique by SKU
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; a record with the same SKU must not already exist
    pub fn insert(&mut self, item: Item) -> Result<()> {
        if self.find(item.sku()).is_some() {
            return Err(CoreError::validation(
                "sku",
                format!("'{}' already exists", item.sku()),
            ));
        }
        debug!(sku = %item.sku(), kind = %item.kind(), "inserting item");
        self.items.push(item);
        Ok(())
    }

    pub fn find(&self, sku: &str) -> Option<&Item> {
        self.items.iter().find(|item| **item == sku)
    }

    pub fn find_mut(&mut self, sku: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| **item == sku)
    }

    /// Like `find`, but a missing SKU is an error
    pub fn get(&self, sku: &str) -> Result<&Item> {
        self.find(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))
    }

    pub fn get_mut(&mut self, sku: &str) -> Result<&mut Item> {
        self.find_mut(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))
    }

    /// Remove and return the record with this SKU
    pub fn remove(&mut self, sku: &str) -> Result<Item> {
        let index = self
            .items
            .iter()
            .position(|item| *item == sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Records ordered by `sort`; ties keep insertion order
    pub fn sorted(&self, sort: ItemSort) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        match sort {
            ItemSort::Sku => items.sort_by(|a, b| a.sku().cmp(b.sku())),
            ItemSort::Name => items.sort_by(|a, b| a.cmp_by_name(b)),
        }
        items
    }

    /// Value of everything on hand, taxes included
    pub fn total_value(&self) -> f64 {
        item::total_value(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
