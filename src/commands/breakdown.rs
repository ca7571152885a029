use crate::args::BreakdownArgs;
use crate::commands::{load_ledger, Out};
use crate::model::{Amount, YearMonth};
use crate::report::{self, Breakdown, Scope};
use crate::Result;

/// Breaks the incomes or expenses of a year, or of one calendar month across years, down by
/// category.
pub async fn breakdown(args: &BreakdownArgs) -> Result<Out<Breakdown>> {
    let ledger = load_ledger(args.ledger()).await?;
    let exclusions = args.exclusions();
    let breakdown = report::breakdown(&ledger, args.direction(), args.scope(), &exclusions);

    let period = match breakdown.scope {
        Scope::Year(year) => year.to_string(),
        Scope::Month(month) => YearMonth::new(2000, month)
            .map(|m| format!("every {}", m.month_name()))
            .unwrap_or_else(|_| format!("month {month}")),
    };
    let message = match breakdown.category_totals.last() {
        Some(largest) => format!(
            "{} {} in {period} across {} categories, the largest being {} with {}",
            Amount::new(breakdown.total),
            breakdown.direction,
            breakdown.category_totals.len(),
            largest.category,
            Amount::new(largest.amount),
        ),
        None => format!("No {} in {period}", breakdown.direction),
    };
    Ok(Out::new(message, breakdown))
}
