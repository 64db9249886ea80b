//! GMS Core - inventory records for the grocery management system
//!
//! Record types, their file format and interactive entry. Everything here
//! works on caller-supplied readers and writers; opening files is left to
//! consuming crates.

pub mod date;
pub mod error;
pub mod error_state;
pub mod inventory;
pub mod item;
pub mod perishable;
pub mod product;
pub mod record;
pub mod scanner;

pub use date::Date;
pub use error::{CoreError, DateError, ProductError, Result};
pub use error_state::ErrorState;
pub use inventory::{Inventory, ItemSort};
pub use item::Item;
pub use perishable::Perishable;
pub use product::Product;
pub use record::{RecordFields, RecordKind};
pub use scanner::InputScanner;
