//! Perishable record: a product with an expiry date

use std::fmt;
use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::date::Date;
use crate::error::{ProductError, Result};
use crate::product::Product;
use crate::record::{RecordFields, RecordKind};
use crate::scanner::{prompt, InputScanner};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Perishable {
    product: Product,
    expiry: Date,
}

impl Perishable {
    /// An empty perishable record with no expiry date
    pub fn new() -> Self {
        Self {
            product: Product::empty(RecordKind::Perishable),
            expiry: Date::empty(),
        }
    }

    /// Wrap `product` (re-tagged as perishable) with an expiry date
    pub fn from_product(product: Product, expiry: Date) -> Self {
        Self {
            product: product.with_kind(RecordKind::Perishable),
            expiry,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_mut(&mut self) -> &mut Product {
        &mut self.product
    }

    pub fn expiry(&self) -> &Date {
        &self.expiry
    }

    /// Base record, a comma, then the expiry date
    pub fn store<W: Write>(&self, out: &mut W, newline: bool) -> io::Result<()> {
        self.product.store(out, false)?;
        write!(out, ",{}", self.expiry)?;
        if newline {
            writeln!(out)?;
        }
        Ok(())
    }

    /// Load base fields and the expiry date; nothing changes unless both parse.
    ///
    /// An empty expiry field loads the empty date.
    pub fn load(&mut self, fields: &mut RecordFields<'_>) -> Result<()> {
        let product = Product::parse_fields(RecordKind::Perishable, fields)?;
        let raw = fields.next_field("expiry date")?;
        let expiry = if raw.trim().is_empty() {
            Date::empty()
        } else {
            fields.parse_value::<Date>("expiry date", raw)?
        };

        self.product = product;
        self.expiry = expiry;
        Ok(())
    }

    /// Base view followed by the expiry date unless an error is shown
    pub fn write<W: fmt::Write>(&self, out: &mut W, linear: bool) -> fmt::Result {
        self.product.write(out, linear)?;
        if !self.product.is_clear() {
            return Ok(());
        }
        if linear {
            write!(out, "{}", self.expiry)
        } else {
            write!(out, "\n Expiry date: {}", self.expiry)
        }
    }

    /// Read the base fields, then the expiry date.
    ///
    /// A rejected date marks `input` failed and stores the matching message
    /// on the base record; the expiry is only replaced when `input` is still
    /// good afterwards.
    pub fn read<R: BufRead, W: Write>(
        &mut self,
        input: &mut InputScanner<R>,
        out: &mut W,
    ) -> Result<()> {
        self.product.read(input, out)?;
        if input.failed() {
            return Ok(());
        }

        prompt(out, " Expiry date (YYYY/MM/DD): ")?;
        match Date::scan(input) {
            Ok(expiry) => self.expiry = expiry,
            Err(err) => {
                input.set_failed();
                let err = ProductError::from(err);
                debug!(sku = %self.product.sku(), error = %err, "rejected expiry date");
                self.product.set_message(err.to_string());
            }
        }
        Ok(())
    }
}

impl Default for Perishable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Perishable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Perishable {
        let product = Product::new("1234", "water", "liter")
            .with_price(1.5)
            .with_taxable(false)
            .with_quantity(1)
            .with_quantity_needed(5);
        Perishable::from_product(product, Date::new(2018, 3, 28))
    }

    fn render(item: &Perishable, linear: bool) -> String {
        let mut out = String::new();
        item.write(&mut out, linear).unwrap();
        out
    }

    #[test]
    fn test_new_is_tagged_perishable() {
        let item = Perishable::new();
        assert_eq!(item.product().kind(), RecordKind::Perishable);
        assert!(item.expiry().is_empty());
    }

    #[test]
    fn test_store_appends_expiry() {
        let mut out = Vec::new();
        water().store(&mut out, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P,1234,water,liter,0,1.5,1,5,2018/03/28\n"
        );
    }

    #[test]
    fn test_store_load_roundtrip() {
        let original = water();
        let mut out = Vec::new();
        original.store(&mut out, false).unwrap();
        let line = String::from_utf8(out).unwrap();

        let mut fields = RecordFields::new(&line);
        assert_eq!(fields.next_kind().unwrap(), RecordKind::Perishable);
        let mut loaded = Perishable::new();
        loaded.load(&mut fields).unwrap();
        fields.finish().unwrap();

        assert_eq!(*loaded.expiry(), Date::new(2018, 3, 28));
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_empty_expiry() {
        let mut fields = RecordFields::new("1234,water,liter,0,1.5,1,5,");
        let mut loaded = Perishable::new();
        loaded.load(&mut fields).unwrap();
        assert!(loaded.expiry().is_empty());
    }

    #[test]
    fn test_load_bad_expiry_leaves_record() {
        let mut item = water();
        let before = item.clone();

        let mut fields = RecordFields::new("9999,milk,liter,0,2.5,1,5,2018/02/30");
        assert!(item.load(&mut fields).is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn test_write_views() {
        assert_eq!(
            render(&water(), true),
            "1234   |water               |   1.50|   1|liter     |   5|2018/03/28"
        );
        assert!(render(&water(), false).ends_with(" Quantity needed: 5\n Expiry date: 2018/03/28"));
    }

    #[test]
    fn test_write_error_hides_expiry() {
        let mut item = water();
        item.product_mut().set_message("Invalid Day in Date Entry");
        assert_eq!(render(&item, true), "Invalid Day in Date Entry");
    }

    #[test]
    fn test_read_with_expiry() {
        let mut item = Perishable::new();
        let mut input = InputScanner::new("1234 water liter n 1.5 1 5\n2018/03/28\n".as_bytes());
        let mut prompts = Vec::new();

        item.read(&mut input, &mut prompts).unwrap();

        assert!(!input.failed());
        assert_eq!(item, water());
        assert!(String::from_utf8(prompts).unwrap().ends_with(" Expiry date (YYYY/MM/DD): "));
    }

    #[test]
    fn test_read_rejects_bad_dates() {
        let cases = [
            ("soon", "Invalid Date Entry"),
            ("1999/03/28", "Invalid Year in Date Entry"),
            ("2018/13/28", "Invalid Month in Date Entry"),
            ("2018/02/30", "Invalid Day in Date Entry"),
        ];

        for (date, message) in cases {
            let mut item = Perishable::new();
            let text = format!("1234 water liter n 1.5 1 5\n{date}\n");
            let mut input = InputScanner::new(text.as_bytes());
            let mut prompts = Vec::new();

            item.read(&mut input, &mut prompts).unwrap();

            assert!(input.failed(), "date {date:?}");
            assert_eq!(item.product().error_state().message(), message);
            assert!(item.expiry().is_empty());
        }
    }

    #[test]
    fn test_read_base_failure_skips_date_prompt() {
        let mut item = water();
        let mut input = InputScanner::new("9999 milk liter q\n2020/01/01\n".as_bytes());
        let mut prompts = Vec::new();

        item.read(&mut input, &mut prompts).unwrap();

        assert!(input.failed());
        assert_eq!(*item.expiry(), Date::new(2018, 3, 28));
        assert!(!String::from_utf8(prompts).unwrap().contains("Expiry"));
    }
}
