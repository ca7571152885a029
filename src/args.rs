//! These structs provide the CLI interface for the telexpense CLI.

use crate::aggregate::{Baseline, Exclusions};
use crate::model::Direction;
use crate::report::{Scope, DEFAULT_TOP};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, RangeInclusive};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// telexpense: A command-line tool for summarizing a personal finance ledger.
///
/// The ledger is the Transactions tab of a Google Sheet that a Telexpense chat bot fills in: one
/// row per income or expense with a date, category, amount, account and description. Export the
/// tab as CSV (or JSON) and point the summary commands at the file with --file, or try them on
/// built-in data with --demo.
///
/// Every summary is printed as JSON to stdout.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and remember the link to your ledger sheet.
    Init(InitArgs),
    /// Print the remembered sheet link and the link that exports the ledger as CSV.
    Link,
    /// Compare the incomes and expenses of a month to a baseline period.
    Month(MonthArgs),
    /// Compare the incomes and expenses of a year to the previous year.
    Year(YearArgs),
    /// Break the incomes or expenses of a year, or of a calendar month, down by category.
    Breakdown(BreakdownArgs),
    /// List the transactions of a category, largest first.
    Inspect(InspectArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the telexpense configuration is held. Defaults to ~/telexpense
    #[arg(long, env = "TELEXPENSE_HOME", default_value_t = default_telexpense_home())]
    telexpense_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, telexpense_home: PathBuf) -> Self {
        Self {
            log_level,
            telexpense_home: telexpense_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn telexpense_home(&self) -> &DisplayPath {
        &self.telexpense_home
    }
}

/// The years `--year` accepts.
const YEARS: RangeInclusive<i64> = 1..=9999;

/// Args for the `telexpense init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The URL to your ledger Google sheet. It looks like this:
    /// https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX
    #[arg(long)]
    sheet_url: String,

    /// The tab of the sheet that holds the ledger. Defaults to Transactions.
    #[arg(long)]
    sheet_name: Option<String>,
}

impl InitArgs {
    pub fn new(sheet_url: impl Into<String>, sheet_name: Option<String>) -> Self {
        Self {
            sheet_url: sheet_url.into(),
            sheet_name,
        }
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }
}

/// Where the ledger is read from: a sheet export or the built-in demo ledger.
#[derive(Debug, clap::Args, Clone)]
#[group(required = true, multiple = false)]
pub struct LedgerArgs {
    /// A CSV or JSON export of the ledger sheet.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Use the built-in demo ledger instead of a file.
    #[arg(long)]
    demo: bool,
}

/// The two ways to get a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Demo,
}

impl LedgerArgs {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            demo: false,
        }
    }

    pub fn demo() -> Self {
        Self {
            file: None,
            demo: true,
        }
    }

    pub fn input(&self) -> Input {
        match &self.file {
            Some(path) if !self.demo => Input::File(path.clone()),
            _ => Input::Demo,
        }
    }
}

/// Chooses incomes or expenses.
#[derive(Debug, clap::Args, Clone)]
#[group(required = true, multiple = false)]
pub struct DirectionArgs {
    /// Look at expenses.
    #[arg(long)]
    expenses: bool,

    /// Look at incomes.
    #[arg(long)]
    incomes: bool,
}

impl DirectionArgs {
    pub fn new(direction: Direction) -> Self {
        Self {
            expenses: direction.is_expense(),
            incomes: !direction.is_expense(),
        }
    }

    pub fn direction(&self) -> Direction {
        if self.incomes {
            Direction::Income
        } else {
            Direction::Expense
        }
    }
}

/// Args for the `telexpense month` command.
#[derive(Debug, Parser, Clone)]
pub struct MonthArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// The month to look at, 1 to 12. Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// The year of the month to look at. Defaults to the current year.
    #[arg(long, value_parser = clap::value_parser!(i32).range(YEARS))]
    year: Option<i32>,

    /// What to compare the month to.
    #[arg(long, value_enum, default_value_t = Baseline::PrevMonth)]
    compare: Baseline,

    /// How many of the largest incomes and expenses to list.
    #[arg(long, default_value_t = DEFAULT_TOP)]
    top: usize,
}

impl MonthArgs {
    pub fn new(
        ledger: LedgerArgs,
        month: Option<u32>,
        year: Option<i32>,
        compare: Baseline,
        top: usize,
    ) -> Self {
        Self {
            ledger,
            month,
            year,
            compare,
            top,
        }
    }

    pub fn ledger(&self) -> &LedgerArgs {
        &self.ledger
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn compare(&self) -> Baseline {
        self.compare
    }

    pub fn top(&self) -> usize {
        self.top
    }
}

/// Args for the `telexpense year` command.
#[derive(Debug, Parser, Clone)]
pub struct YearArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// The year to look at. Defaults to the current year.
    #[arg(long, value_parser = clap::value_parser!(i32).range(YEARS))]
    year: Option<i32>,

    /// Count the month that is still running in the totals of the current year.
    #[arg(long)]
    include_current_month: bool,
}

impl YearArgs {
    pub fn new(ledger: LedgerArgs, year: Option<i32>, include_current_month: bool) -> Self {
        Self {
            ledger,
            year,
            include_current_month,
        }
    }

    pub fn ledger(&self) -> &LedgerArgs {
        &self.ledger
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn include_current_month(&self) -> bool {
        self.include_current_month
    }
}

/// Chooses the period of a breakdown.
#[derive(Debug, clap::Args, Clone)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    /// Every month of this year, trended per month.
    #[arg(long, value_parser = clap::value_parser!(i32).range(YEARS))]
    year: Option<i32>,

    /// This calendar month (1 to 12) of every year, trended per year.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
}

impl ScopeArgs {
    pub fn new(scope: Scope) -> Self {
        match scope {
            Scope::Year(year) => Self {
                year: Some(year),
                month: None,
            },
            Scope::Month(month) => Self {
                year: None,
                month: Some(month),
            },
        }
    }

    pub fn scope(&self) -> Scope {
        match (self.year, self.month) {
            (_, Some(month)) => Scope::Month(month),
            (Some(year), None) => Scope::Year(year),
            (None, None) => Scope::Month(1),
        }
    }
}

/// Args for the `telexpense breakdown` command.
#[derive(Debug, Parser, Clone)]
pub struct BreakdownArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    direction: DirectionArgs,

    #[command(flatten)]
    scope: ScopeArgs,

    /// Leave out this category. Can be given more than once.
    #[arg(long)]
    exclude_category: Vec<String>,

    /// Leave out this account. Can be given more than once.
    #[arg(long)]
    exclude_account: Vec<String>,

    /// Leave out transactions with this tag, with or without the leading #. Can be given more
    /// than once.
    #[arg(long)]
    exclude_tag: Vec<String>,
}

impl BreakdownArgs {
    pub fn new(
        ledger: LedgerArgs,
        direction: Direction,
        scope: Scope,
        exclusions: (Vec<String>, Vec<String>, Vec<String>),
    ) -> Self {
        let (exclude_category, exclude_account, exclude_tag) = exclusions;
        Self {
            ledger,
            direction: DirectionArgs::new(direction),
            scope: ScopeArgs::new(scope),
            exclude_category,
            exclude_account,
            exclude_tag,
        }
    }

    pub fn ledger(&self) -> &LedgerArgs {
        &self.ledger
    }

    pub fn direction(&self) -> Direction {
        self.direction.direction()
    }

    pub fn scope(&self) -> Scope {
        self.scope.scope()
    }

    pub fn exclusions(&self) -> Exclusions {
        Exclusions::new(
            self.exclude_category.iter().cloned(),
            self.exclude_account.iter().cloned(),
            self.exclude_tag.iter(),
        )
    }
}

/// Args for the `telexpense inspect` command.
#[derive(Debug, Parser, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    #[command(flatten)]
    direction: DirectionArgs,

    /// Only this category.
    #[arg(long)]
    category: Option<String>,

    /// Only this calendar month, 1 to 12.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Only this year.
    #[arg(long, value_parser = clap::value_parser!(i32).range(YEARS))]
    year: Option<i32>,
}

impl InspectArgs {
    pub fn new(
        ledger: LedgerArgs,
        direction: Direction,
        category: Option<String>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Self {
        Self {
            ledger,
            direction: DirectionArgs::new(direction),
            category,
            month,
            year,
        }
    }

    pub fn ledger(&self) -> &LedgerArgs {
        &self.ledger
    }

    pub fn direction(&self) -> Direction {
        self.direction.direction()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

fn default_telexpense_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("telexpense"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --telexpense-home or TELEXPENSE_HOME instead of relying on the \
                default telexpense home directory.",
            );
            PathBuf::from("telexpense")
        }
    })
}

/// A `PathBuf` that can be used as a clap default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
