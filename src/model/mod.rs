//! Types that represent the ledger, from the raw cells of a sheet export to canonical
//! `Transaction`s.
mod amount;
mod mapping;
mod period;
mod table;
mod tag;
mod transaction;

pub use amount::{Amount, AmountError};
pub use mapping::{Column, Mapping, SchemaError};
pub use period::{prev_month_year, PeriodError, YearMonth};
pub use table::{Cell, RawTable};
pub use tag::Tag;
pub use transaction::{Direction, Ledger, Transaction};

/// Category of internal money movements between accounts. These rows are neither income nor
/// expense and never reach a `Ledger`.
pub const TRANSFER_CATEGORY: &str = "Transfer";
