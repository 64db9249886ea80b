//! Product record
//!
//! Holds the fields shared by every inventory record and implements the
//! common record format (`store`/`load`), the two display views (`write`)
//! and interactive entry (`read`). Population is all-or-nothing: `read` and
//! `load` build a fresh `Product` and only replace `self` when every field
//! was accepted.

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::ops::AddAssign;

use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, ProductError, Result};
use crate::error_state::ErrorState;
use crate::record::{RecordFields, RecordKind};
use crate::scanner::{prompt, InputScanner};

/// Keep at most `max` characters of `value`
fn truncated(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn has_separator<'a>(fields: impl IntoIterator<Item = &'a str>) -> bool {
    fields.into_iter().any(|field| field.contains(','))
}

fn taxed_answer(answer: char) -> Option<bool> {
    match answer {
        'y' | 'Y' => Some(true),
        'n' | 'N' => Some(false),
        _ => None,
    }
}

/// A stock item: identity, pricing and quantities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    kind: RecordKind,
    sku: String,
    name: Option<String>,
    unit: String,
    quantity_on_hand: i32,
    quantity_needed: i32,
    price: f64,
    taxable: bool,
    #[serde(skip)]
    error: ErrorState,
}

impl Product {
    pub const TAX_RATE: f64 = 0.13;
    pub const MAX_SKU_LENGTH: usize = 7;
    pub const MAX_UNIT_LENGTH: usize = 10;
    pub const MAX_NAME_LENGTH: usize = 75;

    const NAME_WIDTH: usize = 20;
    const COST_WIDTH: usize = 7;
    const QUANTITY_WIDTH: usize = 4;

    /// A product in the safe empty state, tagged with `kind`
    pub fn empty(kind: RecordKind) -> Self {
        Self {
            kind,
            sku: String::new(),
            name: None,
            unit: String::new(),
            quantity_on_hand: 0,
            quantity_needed: 0,
            price: 0.0,
            taxable: true,
            error: ErrorState::new(),
        }
    }

    /// Create a standard product. SKU and unit are truncated to their
    /// maximum lengths; an empty name is stored as absent.
    pub fn new(sku: &str, name: &str, unit: &str) -> Self {
        let mut product = Self::empty(RecordKind::Standard);
        product.sku = truncated(sku, Self::MAX_SKU_LENGTH);
        product.set_name(Some(name));
        product.unit = truncated(unit, Self::MAX_UNIT_LENGTH);
        product
    }

    /// Builder method to set the record kind
    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method to set quantity on hand
    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity_on_hand = quantity;
        self
    }

    /// Builder method to set taxable status
    pub fn with_taxable(mut self, taxable: bool) -> Self {
        self.taxable = taxable;
        self
    }

    /// Builder method to set the unit price before tax
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Builder method to set quantity needed
    pub fn with_quantity_needed(mut self, needed: i32) -> Self {
        self.quantity_needed = needed;
        self
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Product name, `None` when absent or empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Replace the name; `None` or an empty name removes it
    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name
            .filter(|name| !name.is_empty())
            .map(|name| truncated(name, Self::MAX_NAME_LENGTH));
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn taxed(&self) -> bool {
        self.taxable
    }

    /// Unit price before tax
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Unit price including tax when the product is taxable
    pub fn cost(&self) -> f64 {
        if self.taxable {
            self.price * Self::TAX_RATE + self.price
        } else {
            self.price
        }
    }

    /// Cost of everything on hand, taxes included
    pub fn total_cost(&self) -> f64 {
        self.cost() * f64::from(self.quantity_on_hand)
    }

    pub fn quantity(&self) -> i32 {
        self.quantity_on_hand
    }

    /// Reset the number of units on hand
    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity_on_hand = quantity;
    }

    pub fn quantity_needed(&self) -> i32 {
        self.quantity_needed
    }

    /// Add `units` to the quantity on hand if positive; returns the new quantity.
    ///
    /// A sum past `i32::MAX` leaves the quantity unchanged and stores
    /// [`ProductError::QuantityOverflow`] in the error state.
    pub fn add_units(&mut self, units: i32) -> i32 {
        if units > 0 {
            match self.quantity_on_hand.checked_add(units) {
                Some(quantity) => self.quantity_on_hand = quantity,
                None => {
                    let err = ProductError::QuantityOverflow;
                    debug!(sku = %self.sku, units, error = %err, "rejected units");
                    self.error.set(err.to_string());
                }
            }
        }
        self.quantity_on_hand
    }

    pub fn error_state(&self) -> &ErrorState {
        &self.error
    }

    /// Store a validation message on the record
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.error.set(message);
    }

    pub fn is_clear(&self) -> bool {
        self.error.is_clear()
    }

    /// True if the product is in the safe empty state
    pub fn is_empty(&self) -> bool {
        self.kind == RecordKind::Standard
            && self.sku.is_empty()
            && self.unit.is_empty()
            && self.name.is_none()
            && self.quantity_on_hand == 0
            && self.quantity_needed == 0
            && self.price == 0.0
            && self.taxable
    }

    /// Lexicographic SKU comparison
    pub fn sku_greater_than(&self, sku: &str) -> bool {
        self.sku.as_str() > sku
    }

    /// Order by name; an absent name sorts as the empty string
    pub fn cmp_by_name(&self, other: &Product) -> Ordering {
        self.name().unwrap_or("").cmp(other.name().unwrap_or(""))
    }

    /// True if this product's name sorts after `other`'s
    pub fn is_greater_than(&self, other: &Product) -> bool {
        self.cmp_by_name(other) == Ordering::Greater
    }

    /// Write one record: `type,sku,name,unit,taxable,price,qty_on_hand,qty_needed`
    ///
    /// Fails with `InvalidInput`, writing nothing, if a text field holds
    /// the field separator.
    pub fn store<W: Write>(&self, out: &mut W, newline: bool) -> io::Result<()> {
        if has_separator([self.sku.as_str(), self.name().unwrap_or(""), self.unit.as_str()]) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("record '{}' has a ',' in a text field", self.sku),
            ));
        }
        write!(
            out,
            "{},{},{},{},{},{},{},{}",
            self.kind.tag(),
            self.sku,
            self.name().unwrap_or(""),
            self.unit,
            u8::from(self.taxable),
            self.price,
            self.quantity_on_hand,
            self.quantity_needed
        )?;
        if newline {
            writeln!(out)?;
        }
        Ok(())
    }

    /// Parse the fields following the record-type tag
    pub(crate) fn parse_fields(kind: RecordKind, fields: &mut RecordFields<'_>) -> Result<Self> {
        let sku = fields.next_field("sku")?;
        let name = fields.next_field("name")?;
        let unit = fields.next_field("unit")?;
        let taxable = fields.next_flag("taxable")?;
        let price: f64 = fields.next_parsed("price")?;
        let quantity_on_hand: i32 = fields.next_parsed("quantity on hand")?;
        let quantity_needed: i32 = fields.next_parsed("quantity needed")?;

        if sku.is_empty() {
            return Err(CoreError::validation("sku", "must not be empty"));
        }
        if !price.is_finite() {
            return Err(CoreError::validation("price", format!("'{}' is not a number", price)));
        }

        Ok(Self::new(sku, name, unit)
            .with_kind(kind)
            .with_taxable(taxable)
            .with_price(price)
            .with_quantity(quantity_on_hand)
            .with_quantity_needed(quantity_needed))
    }

    /// Replace this product with the record read from `fields`.
    ///
    /// On error the product is left untouched.
    pub fn load(&mut self, fields: &mut RecordFields<'_>) -> Result<()> {
        *self = Self::parse_fields(self.kind, fields)?;
        Ok(())
    }

    /// Render the product, or only its error message when one is set.
    ///
    /// `linear` selects the single-line table row; otherwise one labeled
    /// line per field. Neither view ends with a newline.
    pub fn write<W: fmt::Write>(&self, out: &mut W, linear: bool) -> fmt::Result {
        if !self.error.is_clear() {
            return write!(out, "{}", self.error);
        }

        let name = self.name().unwrap_or("");
        if linear {
            return write!(
                out,
                "{:<sku_w$}|{:<name_w$}|{:>cost_w$.2}|{:>qty_w$}|{:<unit_w$}|{:>qty_w$}|",
                self.sku,
                name,
                self.cost(),
                self.quantity_on_hand,
                self.unit,
                self.quantity_needed,
                sku_w = Self::MAX_SKU_LENGTH,
                name_w = Self::NAME_WIDTH,
                cost_w = Self::COST_WIDTH,
                qty_w = Self::QUANTITY_WIDTH,
                unit_w = Self::MAX_UNIT_LENGTH,
            );
        }

        writeln!(out, " Sku: {}", self.sku)?;
        writeln!(out, " Name (no spaces): {}", name)?;
        writeln!(out, " Price: {:.2}", self.price)?;
        if self.taxable {
            writeln!(out, " Price after tax: {:.2}", self.cost())?;
        } else {
            writeln!(out, " Price after tax: N/A")?;
        }
        writeln!(out, " Quantity on hand: {} {}", self.quantity_on_hand, self.unit)?;
        write!(out, " Quantity needed: {}", self.quantity_needed)
    }

    /// Prompt for and read every field from `input`.
    ///
    /// Validation failures do not return `Err`: the message is stored in
    /// the error state and, for the taxed answer or a `,` in sku, name or
    /// unit, `input` is marked failed.
    /// All other fields stay as they were. On success the product is
    /// replaced and its error state cleared. The rest of the current input
    /// line is discarded either way. `Err` is only returned when writing a
    /// prompt fails.
    pub fn read<R: BufRead, W: Write>(
        &mut self,
        input: &mut InputScanner<R>,
        out: &mut W,
    ) -> Result<()> {
        let outcome = self.read_fields(input, out);
        input.discard_line();

        match outcome? {
            Ok(product) => *self = product,
            Err(err) => {
                debug!(sku = %self.sku, error = %err, "rejected product entry");
                self.error.set(err.to_string());
            }
        }
        Ok(())
    }

    fn read_fields<R: BufRead, W: Write>(
        &self,
        input: &mut InputScanner<R>,
        out: &mut W,
    ) -> Result<std::result::Result<Self, ProductError>> {
        prompt(out, " Sku: ")?;
        let sku = input.read_word();
        prompt(out, " Name (no spaces): ")?;
        let name = input.read_word();
        prompt(out, " Unit: ")?;
        let unit = input.read_word();
        prompt(out, " Taxed? (y/n): ")?;
        let taxable = input.read_char().and_then(taxed_answer);

        let (Some(sku), Some(name), Some(unit), Some(taxable)) = (sku, name, unit, taxable) else {
            input.set_failed();
            return Ok(Err(ProductError::TaxedCharInvalid));
        };
        if has_separator([sku.as_str(), name.as_str(), unit.as_str()]) {
            input.set_failed();
            return Ok(Err(ProductError::FieldSeparator));
        }

        prompt(out, " Price: ")?;
        let Some(price) = input.read_float() else {
            return Ok(Err(ProductError::PriceInvalid));
        };
        prompt(out, " Quantity on hand: ")?;
        let Some(quantity_on_hand) = input.read_int() else {
            return Ok(Err(ProductError::QuantityInvalid));
        };
        prompt(out, " Quantity needed: ")?;
        let Some(quantity_needed) = input.read_int() else {
            return Ok(Err(ProductError::QuantityNeededInvalid));
        };

        Ok(Ok(Self::new(&sku, &name, &unit)
            .with_kind(self.kind)
            .with_taxable(taxable)
            .with_price(price)
            .with_quantity(quantity_on_hand)
            .with_quantity_needed(quantity_needed)))
    }
}

impl Default for Product {
    fn default() -> Self {
        Self::empty(RecordKind::Standard)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, true)
    }
}

impl PartialEq<&str> for Product {
    fn eq(&self, sku: &&str) -> bool {
        self.sku == *sku
    }
}

impl AddAssign<i32> for Product {
    fn add_assign(&mut self, units: i32) {
        self.add_units(units);
    }
}
