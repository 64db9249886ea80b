//! Comma-separated record plumbing
//!
//! One record per line:
//! - standard:   `N,sku,name,unit,taxable(0|1),price,qty_on_hand,qty_needed`
//! - perishable: `P,sku,name,unit,taxable(0|1),price,qty_on_hand,qty_needed,YYYY/MM/DD`

use std::fmt;
use std::str::{FromStr, Split};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Record-type tag written as the first field of every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordKind {
    #[default]
    Standard,
    Perishable,
}

impl RecordKind {
    pub fn tag(self) -> char {
        match self {
            Self::Standard => 'N',
            Self::Perishable => 'P',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'N' => Some(Self::Standard),
            'P' => Some(Self::Perishable),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Cursor over the comma-separated fields of a single record line
pub struct RecordFields<'a> {
    line: &'a str,
    fields: Split<'a, char>,
}

impl<'a> RecordFields<'a> {
    pub fn new(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        Self {
            line,
            fields: line.split(','),
        }
    }

    /// Take the next raw field
    pub fn next_field(&mut self, name: &str) -> Result<&'a str> {
        self.fields
            .next()
            .ok_or_else(|| {
                CoreError::parse(format!("Missing field '{}' in record: {}", name, self.line))
            })
    }

    /// Take the next field and parse it
    pub fn next_parsed<T>(&mut self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = self.next_field(name)?;
        self.parse_value(name, raw)
    }

    /// Parse an already taken field, reporting errors against this record
    pub fn parse_value<T>(&self, name: &str, raw: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        raw.trim().parse::<T>().map_err(|e| {
            CoreError::parse_with_source(
                format!("Invalid {} '{}' in record: {}", name, raw, self.line),
                e,
            )
        })
    }

    /// Take the next field as a `0`/`1` flag
    pub fn next_flag(&mut self, name: &str) -> Result<bool> {
        match self.next_field(name)?.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(CoreError::parse(format!(
                "Invalid {} '{}' in record: {}",
                name, other, self.line
            ))),
        }
    }

    /// Take the leading record-type tag
    pub fn next_kind(&mut self) -> Result<RecordKind> {
        let raw = self.next_field("type")?.trim();
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(tag), None) => RecordKind::from_tag(tag).ok_or_else(|| {
                CoreError::parse(format!("Unknown record type '{}' in record: {}", tag, self.line))
            }),
            _ => Err(CoreError::parse(format!(
                "Invalid record type '{}' in record: {}",
                raw, self.line
            ))),
        }
    }

    /// Fail if any field is left unconsumed
    pub fn finish(mut self) -> Result<()> {
        match self.fields.next() {
            None => Ok(()),
            Some(_) => Err(CoreError::parse(format!(
                "Unexpected trailing fields in record: {}",
                self.line
            ))),
        }
    }
}
