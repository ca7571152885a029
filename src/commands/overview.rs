use crate::aggregate::Baseline;
use crate::args::{MonthArgs, YearArgs};
use crate::commands::{load_ledger, signed, Out};
use crate::model::{Amount, YearMonth};
use crate::report::{month_overview, year_overview, MonthOverview, YearOverview};
use crate::Result;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Compares a month, by default the month of `today`, to the baseline named in `args`.
pub async fn month(args: &MonthArgs, today: NaiveDate) -> Result<Out<MonthOverview>> {
    let month = args.month().unwrap_or_else(|| today.month());
    let year = args.year().unwrap_or_else(|| today.year());
    let selected = YearMonth::new(year, month)?;
    debug!("Selected month {selected}");

    let ledger = load_ledger(args.ledger()).await?;
    let overview = month_overview(&ledger, selected, args.compare(), args.top());

    let cmp = &overview.comparison;
    let against = match cmp.compared_to {
        Some(previous) => format!("{} {}", previous.month_name(), previous.year()),
        None if cmp.baseline == Baseline::PrevMonthAvg => {
            format!("the monthly average of the rest of {}", selected.year())
        }
        None => cmp.baseline.to_string(),
    };
    let message = format!(
        "{} {}: incomes {} ({}), expenses {} ({}) compared to {against}",
        selected.month_name(),
        selected.year(),
        Amount::new(cmp.incomes.current),
        signed(cmp.incomes.delta),
        Amount::new(cmp.expenses.current),
        signed(cmp.expenses.delta),
    );
    Ok(Out::new(message, overview))
}

/// Compares a year, by default the year of `today`, to the year before it. The month of `today`
/// is left out of the totals unless `args` asks to include it.
pub async fn year(args: &YearArgs, today: NaiveDate) -> Result<Out<YearOverview>> {
    let year = args.year().unwrap_or_else(|| today.year());
    let ledger = load_ledger(args.ledger()).await?;
    let overview = year_overview(
        &ledger,
        year,
        Some(YearMonth::of(today)),
        args.include_current_month(),
    );

    let mut message = format!(
        "{year}: incomes {} ({}), expenses {} ({}) compared to {}",
        Amount::new(overview.incomes.current),
        signed(overview.incomes.delta),
        Amount::new(overview.expenses.current),
        signed(overview.expenses.delta),
        year.saturating_sub(1),
    );
    if let Some(excluded) = overview.excluded_month {
        message.push_str(&format!(", without {}", excluded.month_name()));
    }
    Ok(Out::new(message, overview))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::LedgerArgs;
    use crate::report::DEFAULT_TOP;
    use crate::test::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_month_defaults_to_today() {
        let args = MonthArgs::new(LedgerArgs::demo(), None, None, Baseline::PrevMonth, 2);
        let out = month(&args, date(2024, 1, 15)).await.unwrap();
        let overview = out.structure().unwrap();
        assert_eq!(
            overview.comparison.selected,
            YearMonth::new(2024, 1).unwrap()
        );
        assert_eq!(overview.top_expenses.len(), 2);
        assert_eq!(
            out.message(),
            "January 2024: incomes 3,700.00 (+950.00), expenses 1,269.74 (-2.56) \
            compared to December 2023"
        );
    }

    #[tokio::test]
    async fn test_month_average_message() {
        let args = MonthArgs::new(
            LedgerArgs::demo(),
            Some(3),
            Some(2024),
            Baseline::PrevMonthAvg,
            DEFAULT_TOP,
        );
        let out = month(&args, date(2026, 10, 1)).await.unwrap();
        assert!(out
            .message()
            .ends_with("compared to the monthly average of the rest of 2024"));
    }

    #[tokio::test]
    async fn test_year_leaves_out_running_month() {
        let args = YearArgs::new(LedgerArgs::demo(), None, false);
        let out = year(&args, date(2024, 3, 10)).await.unwrap();
        let overview = out.structure().unwrap();
        assert_eq!(overview.year, 2024);
        assert_eq!(overview.excluded_month, Some(YearMonth::new(2024, 3).unwrap()));
        // January 3700 and February 2500
        assert_eq!(overview.incomes.current, dec("6200"));
        assert!(out.message().ends_with("without March"));
    }

    #[tokio::test]
    async fn test_year_of_past_year() {
        let args = YearArgs::new(LedgerArgs::demo(), Some(2023), false);
        let out = year(&args, date(2024, 3, 10)).await.unwrap();
        let overview = out.structure().unwrap();
        assert_eq!(overview.excluded_month, None);
        assert!(out.message().starts_with("2023: incomes 5,200.00 (+5,200.00)"));
    }
}
