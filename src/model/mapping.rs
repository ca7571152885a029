use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

/// The columns a ledger sheet must provide. Any other column is ignored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    Category,
    Amount,
    Account,
    Description,
}

serde_plain::derive_display_from_serialize!(Column);
serde_plain::derive_fromstr_from_deserialize!(Column);

impl Column {
    /// All required columns in the order they are listed in the sheet template.
    pub const REQUIRED: [Column; 5] = [
        Column::Date,
        Column::Category,
        Column::Amount,
        Column::Account,
        Column::Description,
    ];

    fn ordinal(self) -> usize {
        match self {
            Column::Date => 0,
            Column::Category => 1,
            Column::Amount => 2,
            Column::Account => 3,
            Column::Description => 4,
        }
    }
}

/// The header row did not satisfy the ledger schema.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct SchemaError {
    missing: Vec<Column>,
    duplicated: Vec<Column>,
}

impl SchemaError {
    pub fn missing(missing: Vec<Column>) -> Self {
        Self {
            missing,
            duplicated: Vec::new(),
        }
    }

    pub fn missing_columns(&self) -> &[Column] {
        &self.missing
    }

    pub fn duplicated_columns(&self) -> &[Column] {
        &self.duplicated
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let list = |columns: &[Column]| {
            columns
                .iter()
                .map(Column::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match (self.missing.is_empty(), self.duplicated.is_empty()) {
            (false, true) => write!(f, "Missing required columns: {}", list(&self.missing)),
            (true, false) => write!(f, "Duplicated columns: {}", list(&self.duplicated)),
            _ => write!(
                f,
                "Missing required columns: {}; duplicated columns: {}",
                list(&self.missing),
                list(&self.duplicated)
            ),
        }
    }
}

impl StdError for SchemaError {}

/// Maps each required `Column` to its index in a sheet's header row. Header matching trims
/// whitespace and ignores case, so `Date`, `date` and ` DATE ` are all the date column.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Mapping {
    indexes: [usize; 5],
}

impl Mapping {
    pub fn new<S, I>(headers: I) -> Result<Self, SchemaError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut found: HashMap<Column, Vec<usize>> = HashMap::new();
        for (idx, header) in headers.into_iter().enumerate() {
            let lowered = header.as_ref().trim().to_lowercase();
            if let Ok(column) = lowered.parse::<Column>() {
                found.entry(column).or_default().push(idx);
            }
        }

        let mut error = SchemaError::default();
        let mut indexes = [0usize; 5];
        for column in Column::REQUIRED {
            match found.get(&column).map(Vec::as_slice) {
                None | Some([]) => error.missing.push(column),
                Some([idx]) => indexes[column.ordinal()] = *idx,
                Some(_) => error.duplicated.push(column),
            }
        }

        if error.missing.is_empty() && error.duplicated.is_empty() {
            Ok(Self { indexes })
        } else {
            Err(error)
        }
    }

    /// The index of `column` in the header row this mapping was built from.
    pub fn index(&self, column: Column) -> usize {
        self.indexes[column.ordinal()]
    }
}
