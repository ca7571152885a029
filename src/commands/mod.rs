//! Command handlers for the telexpense CLI.
//!
//! This module contains implementations for all CLI subcommands. Handlers that need "now" take
//! `today` as an argument; only `main` reads the clock.

mod breakdown;
mod init;
mod inspect;
mod overview;

use crate::args::{Input, LedgerArgs};
use crate::model::{Amount, Ledger};
use crate::source::{self, DemoSource};
use crate::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use breakdown::breakdown;
pub use init::{init, link, Link};
pub use inspect::inspect;
pub use overview::{month, year};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to stdout.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            match serde_json::to_string_pretty(structure) {
                Ok(json) => println!("{json}"),
                Err(e) => debug!("Unable to serialize command output: {e}"),
            }
        }
    }
}

/// Reads and normalizes the ledger named by `args`.
pub(crate) async fn load_ledger(args: &LedgerArgs) -> Result<Ledger> {
    match args.input() {
        Input::File(path) => {
            debug!("Loading the ledger from {}", path.display());
            let mut source = source::open(&path)?;
            source::load(source.as_mut()).await
        }
        Input::Demo => {
            debug!("Loading the demo ledger");
            source::load(&mut DemoSource::default()).await
        }
    }
}

/// Formats a difference with an explicit sign, e.g. `+950.00` or `-2.56`.
pub(crate) fn signed(delta: Decimal) -> String {
    let sign = if delta > Decimal::ZERO { "+" } else { "" };
    format!("{sign}{}", Amount::new(delta))
}
