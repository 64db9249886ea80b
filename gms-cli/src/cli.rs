use clap::{Parser, Subcommand, ValueEnum};
use gms_core::ItemSort;

#[derive(Parser)]
#[command(name = "gms")]
#[command(about = "Grocery inventory records: products, perishables and stock counts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortBy {
    Sku,
    Name,
}

impl From<SortBy> for ItemSort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Sku => ItemSort::Sku,
            SortBy::Name => ItemSort::Name,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lists every product in the inventory
    List {
        /// Use the labeled multi-line view
        #[arg(long)]
        detailed: bool,
        /// Sort products by field
        #[arg(long, value_enum, default_value = "sku")]
        sort: SortBy,
        /// Print the inventory as JSON
        #[arg(long)]
        json: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Shows one product in detail
    Show { sku: String },

    /// Adds a product, prompting for each field
    Add {
        /// Add a perishable product with an expiry date
        #[arg(long, short = 'p')]
        perishable: bool,
    },

    /// Adds units to the quantity on hand
    Restock {
        sku: String,
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        units: i32,
    },

    /// Sets the quantity on hand after a stock count
    Count {
        sku: String,
        #[arg(value_parser = clap::value_parser!(i32).range(0..))]
        quantity: i32,
    },

    /// Removes a product
    Remove { sku: String },

    /// Recover the inventory from backup file
    Recover {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
