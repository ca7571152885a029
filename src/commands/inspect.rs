use crate::args::InspectArgs;
use crate::commands::{load_ledger, Out};
use crate::model::Amount;
use crate::report::{self, Inspection};
use crate::Result;

/// Lists the transactions of one direction, optionally narrowed to a category, a calendar month
/// and a year, largest first.
pub async fn inspect(args: &InspectArgs) -> Result<Out<Inspection>> {
    let ledger = load_ledger(args.ledger()).await?;
    let inspection = report::inspect(
        &ledger,
        args.direction(),
        args.category(),
        args.month(),
        args.year(),
    );
    let label = match args.category() {
        Some(category) => category.to_string(),
        None => inspection.direction.to_string(),
    };
    let message = format!(
        "{} {label} transactions totalling {}",
        inspection.transactions.len(),
        Amount::new(inspection.total),
    );
    Ok(Out::new(message, inspection))
}
