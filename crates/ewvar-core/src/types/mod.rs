//! Domain types.

mod date;
mod price;
mod ticker;

pub use date::Date;
pub use price::{PriceHistory, PricePoint};
pub use ticker::{Ticker, TickerSet};
