//! A built-in ledger so that every command can be run without a sheet export.
//!
//! `--demo` runs the whole pipeline against this data.

use crate::model::RawTable;
use crate::source::csv::parse_csv;
use crate::source::LedgerSource;
use crate::Result;

/// A `LedgerSource` that holds a CSV document in memory. By default it is seeded with a small
/// ledger written the way the chat bot writes the sheet: day-first dates, comma decimals, tags in
/// descriptions and transfers between accounts.
#[derive(Debug, Clone)]
pub struct DemoSource {
    data: String,
}

impl DemoSource {
    /// Creates a source that serves `data`, a CSV document whose first row is the header row.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

impl Default for DemoSource {
    /// Uses the seed ledger of this module.
    fn default() -> Self {
        Self::new(SEED_LEDGER)
    }
}

#[async_trait::async_trait]
impl LedgerSource for DemoSource {
    async fn table(&mut self) -> Result<RawTable> {
        parse_csv(&self.data)
    }
}

/// Seed ledger data.
pub(crate) const SEED_LEDGER: &str = r##"Date,Category,Amount,Account,Description
05/01/2023,Salary/Wages,"2450,00",HSBC,january salary
07/01/2023,Housing,"-950,00",HSBC,rent #home
12/01/2023,Food and Groceries,"-84,30",Revolut,supermarket
20/01/2023,Utilities,"-61,75",HSBC,electricity #home
05/12/2023,Salary/Wages,"2450,00",HSBC,december salary
07/12/2023,Housing,"-950,00",HSBC,rent #home
09/12/2023,Food and Groceries,"-112,40",Revolut,supermarket
15/12/2023,Entertainment,"-45,00",Revolut,concert #friends
18/12/2023,Gifts and Bonuses,"300,00",HSBC,christmas bonus
21/12/2023,Transfer,"-500,00",HSBC,to savings
21/12/2023,Transfer,"500,00",Savings,from hsbc
23/12/2023,Personal Care,"-38,90",Cash,barber
28/12/2023,Transportation,"-126,00",Revolut,train home #holiday #xmas
05/01/2024,Salary/Wages,"2500,00",HSBC,january salary
07/01/2024,Housing,"-1.000,00",HSBC,rent #home
10/01/2024,Food and Groceries,"-95,20",Revolut,supermarket
14/01/2024,Food and Groceries,"-23,15",Cash,bakery
18/01/2024,Utilities,"-72,40",HSBC,electricity #home
22/01/2024,Entertainment,"-18,99",Revolut,streaming
26/01/2024,Freelance/Contract Work,"1.200,00",Revolut,logo design #side
31/01/2024,Healthcare,"-60,00",Cash,dentist
05/02/2024,Salary/Wages,"2500,00",HSBC,february salary
07/02/2024,Housing,"-1.000,00",HSBC,rent #home
11/02/2024,Food and Groceries,"-104,80",Revolut,supermarket
14/02/2024,Entertainment,"-86,50",Revolut,dinner #valentine
16/02/2024,Transfer,"-300,00",HSBC,to savings
16/02/2024,Transfer,"300,00",Savings,from hsbc
19/02/2024,Transportation,"-49,90",Revolut,monthly pass
24/02/2024,Education,"-250,00",HSBC,language course #learning
05/03/2024,Salary/Wages,"2500,00",HSBC,march salary
07/03/2024,Housing,"-1.000,00",HSBC,rent #home
09/03/2024,Food and Groceries,"-131,05",Revolut,supermarket
15/03/2024,Investments,"142,37",Savings,dividends
17/03/2024,Utilities,"-68,10",HSBC,electricity #home
22/03/2024,Transportation,"-310,00",Revolut,flight to Lisbon #holiday
23/03/2024,Food and Groceries,"-57,60",Cash,pasteis #holiday
25/03/2024,Entertainment,"-35,00",Cash,museum #holiday #culture
29/03/2024,Side Hustle,"180,00",Cash,sold old bike
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[tokio::test]
    async fn test_demo_source_normalizes() {
        let table = DemoSource::default().table().await.unwrap();
        assert_eq!(table.len(), 38);
        let ledger = normalize(&table).unwrap();
        // four transfer rows are dropped
        assert_eq!(ledger.len(), 34);
        let (incomes, expenses) = ledger.view().split();
        assert!(!incomes.is_empty());
        assert!(!expenses.is_empty());
    }

    #[tokio::test]
    async fn test_demo_source_custom_data() {
        let mut source = DemoSource::new("Date,Category,Amount,Account,Description\n");
        let table = source.table().await.unwrap();
        assert!(table.is_empty());
    }
}
