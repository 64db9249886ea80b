//! Polymorphic inventory record
//!
//! `Item` is the handle callers work with: it is created empty by one of
//! the factory constructors, populated by `read` or `load`, and emitted by
//! `write` or `store`. Every operation dispatches to the record variant.

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::ops::AddAssign;

use serde::Serialize;

use crate::date::Date;
use crate::error::Result;
use crate::perishable::Perishable;
use crate::product::Product;
use crate::record::{RecordFields, RecordKind};
use crate::scanner::InputScanner;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Standard(Product),
    Perishable(Perishable),
}

impl Item {
    /// Create an empty standard product
    pub fn create_product() -> Self {
        Self::Standard(Product::default())
    }

    /// Create an empty perishable product
    pub fn create_perishable() -> Self {
        Self::Perishable(Perishable::new())
    }

    /// Create the empty record matching a record-type tag
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Standard => Self::create_product(),
            RecordKind::Perishable => Self::create_perishable(),
        }
    }

    /// Parse one full record line, including its type tag
    pub fn from_record(line: &str) -> Result<Self> {
        let mut fields = RecordFields::new(line);
        let mut item = Self::for_kind(fields.next_kind()?);
        item.load(&mut fields)?;
        fields.finish()?;
        Ok(item)
    }

    pub fn kind(&self) -> RecordKind {
        self.product().kind()
    }

    /// The shared product fields
    pub fn product(&self) -> &Product {
        match self {
            Self::Standard(product) => product,
            Self::Perishable(perishable) => perishable.product(),
        }
    }

    pub fn product_mut(&mut self) -> &mut Product {
        match self {
            Self::Standard(product) => product,
            Self::Perishable(perishable) => perishable.product_mut(),
        }
    }

    /// Expiry date for perishable records
    pub fn expiry(&self) -> Option<&Date> {
        match self {
            Self::Standard(_) => None,
            Self::Perishable(perishable) => Some(perishable.expiry()),
        }
    }

    pub fn store<W: Write>(&self, out: &mut W, newline: bool) -> io::Result<()> {
        match self {
            Self::Standard(product) => product.store(out, newline),
            Self::Perishable(perishable) => perishable.store(out, newline),
        }
    }

    /// Load the fields following the type tag
    pub fn load(&mut self, fields: &mut RecordFields<'_>) -> Result<()> {
        match self {
            Self::Standard(product) => product.load(fields),
            Self::Perishable(perishable) => perishable.load(fields),
        }
    }

    pub fn write<W: fmt::Write>(&self, out: &mut W, linear: bool) -> fmt::Result {
        match self {
            Self::Standard(product) => product.write(out, linear),
            Self::Perishable(perishable) => perishable.write(out, linear),
        }
    }

    pub fn read<R: BufRead, W: Write>(
        &mut self,
        input: &mut InputScanner<R>,
        out: &mut W,
    ) -> Result<()> {
        match self {
            Self::Standard(product) => product.read(input, out),
            Self::Perishable(perishable) => perishable.read(input, out),
        }
    }

    pub fn sku(&self) -> &str {
        self.product().sku()
    }

    pub fn name(&self) -> Option<&str> {
        self.product().name()
    }

    pub fn total_cost(&self) -> f64 {
        self.product().total_cost()
    }

    pub fn quantity(&self) -> i32 {
        self.product().quantity()
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.product_mut().set_quantity(quantity);
    }

    pub fn quantity_needed(&self) -> i32 {
        self.product().quantity_needed()
    }

    pub fn add_units(&mut self, units: i32) -> i32 {
        self.product_mut().add_units(units)
    }

    pub fn is_clear(&self) -> bool {
        self.product().is_clear()
    }

    pub fn cmp_by_name(&self, other: &Item) -> Ordering {
        self.product().cmp_by_name(other.product())
    }

    /// True if this record's name sorts after `other`'s
    pub fn is_greater_than(&self, other: &Item) -> bool {
        self.product().is_greater_than(other.product())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, true)
    }
}

impl PartialEq<&str> for Item {
    fn eq(&self, sku: &&str) -> bool {
        self.product() == sku
    }
}

impl AddAssign<i32> for Item {
    fn add_assign(&mut self, units: i32) {
        self.add_units(units);
    }
}

/// Sum of `total_cost` over `items`
pub fn total_value<'a>(items: impl IntoIterator<Item = &'a Item>) -> f64 {
    items.into_iter().map(Item::total_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_start_empty() {
        let product = Item::create_product();
        assert_eq!(product.kind(), RecordKind::Standard);
        assert!(product.product().is_empty());
        assert!(product.expiry().is_none());

        let perishable = Item::create_perishable();
        assert_eq!(perishable.kind(), RecordKind::Perishable);
        assert!(perishable.expiry().is_some_and(Date::is_empty));
    }

    #[test]
    fn test_from_record_dispatches_on_tag() {
        let standard = Item::from_record("N,4321,rice,kg,1,100,2,10\n").unwrap();
        assert!(matches!(standard, Item::Standard(_)));
        assert!(standard == "4321");
        assert!((standard.total_cost() - 226.0).abs() < 1e-9);

        let perishable = Item::from_record("P,1234,water,liter,0,1.5,1,5,2018/03/28").unwrap();
        assert_eq!(perishable.kind(), RecordKind::Perishable);
        assert_eq!(perishable.expiry(), Some(&Date::new(2018, 3, 28)));
    }

    #[test]
    fn test_from_record_rejects_bad_lines() {
        assert!(Item::from_record("X,1234,water,liter,0,1.5,1,5").is_err());
        assert!(Item::from_record("N,1234,water,liter,0,1.5,1,5,2018/03/28").is_err());
        assert!(Item::from_record("P,1234,water,liter,0,1.5,1").is_err());
        assert!(Item::from_record("").is_err());
    }

    #[test]
    fn test_store_then_parse() {
        let line = "P,1234,water,liter,0,1.5,1,5,2018/03/28";
        let item = Item::from_record(line).unwrap();

        let mut out = Vec::new();
        item.store(&mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), line);
    }

    #[test]
    fn test_display_is_linear_view() {
        let item = Item::from_record("P,1234,water,liter,0,1.5,1,5,2018/03/10").unwrap();
        assert_eq!(
            item.to_string(),
            "1234   |water               |   1.50|   1|liter     |   5|2018/03/10"
        );
    }

    #[test]
    fn test_quantity_updates_and_total_value() {
        let mut rice = Item::from_record("N,4321,rice,kg,0,10,2,10").unwrap();
        let mut water = Item::from_record("P,1234,water,liter,0,1.5,4,5,2018/03/28").unwrap();

        rice += 3;
        assert_eq!(rice.quantity(), 5);
        water.set_quantity(2);
        assert_eq!(water.add_units(-1), 2);

        let total = total_value([&rice, &water]);
        assert!((total - 53.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_assign_overflow_sets_message() {
        let mut rice = Item::from_record("N,4321,rice,kg,0,10,2147483646,10").unwrap();

        rice += 5;
        assert_eq!(rice.quantity(), i32::MAX - 1);
        assert!(!rice.is_clear());
        assert_eq!(rice.to_string(), "Quantity on hand out of range");
    }

    #[test]
    fn test_name_ordering() {
        let rice = Item::from_record("N,4321,rice,kg,0,10,2,10").unwrap();
        let apples = Item::from_record("N,1111,apples,kg,0,3,2,10").unwrap();

        assert!(rice.is_greater_than(&apples));
        assert_eq!(apples.cmp_by_name(&rice), Ordering::Less);
    }
}
