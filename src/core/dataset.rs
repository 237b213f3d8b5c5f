use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::error::{LoadError, Result};
use super::metrics::{derive_metrics, population_stats};
use super::types::{
    CustomerRecord, DEPOSIT_COLUMN, FUND_COLUMN, INSTALLMENT_SAVINGS_COLUMN,
    MONTHLY_INCOME_COLUMN, NAME_COLUMN, PENSION_COLUMN, PopulationStats, RawInputs,
    SPENDING_CATEGORIES, SPENDING_CATEGORY_COUNT,
};

/// A fully derived customer table. Built once per request and dropped after.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    cells: Vec<Vec<String>>,
    records: Vec<CustomerRecord>,
    has_names: bool,
    has_income: bool,
}

#[derive(Debug)]
struct ColumnIndex {
    name: Option<usize>,
    pension: usize,
    deposit: usize,
    installment_savings: usize,
    fund: usize,
    monthly_income: Option<usize>,
    spending: [usize; SPENDING_CATEGORY_COUNT],
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require =
            |column: &str| find(column).ok_or_else(|| LoadError::MissingColumn(column.to_string()));

        let pension = require(PENSION_COLUMN)?;
        let deposit = require(DEPOSIT_COLUMN)?;
        let installment_savings = require(INSTALLMENT_SAVINGS_COLUMN)?;
        let fund = require(FUND_COLUMN)?;

        let mut spending = [0usize; SPENDING_CATEGORY_COUNT];
        for (slot, category) in spending.iter_mut().zip(SPENDING_CATEGORIES) {
            *slot = require(category)?;
        }

        Ok(Self {
            name: find(NAME_COLUMN),
            pension,
            deposit,
            installment_savings,
            fund,
            monthly_income: find(MONTHLY_INCOME_COLUMN),
            spending,
        })
    }
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut cells = Vec::new();
        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            let inputs = parse_inputs(&record, &columns, &headers)?;
            let name = columns
                .name
                .and_then(|idx| record.get(idx))
                .filter(|s| !is_missing(s))
                .map(str::to_string);
            let derived = derive_metrics(&inputs);

            cells.push(
                (0..headers.len())
                    .map(|idx| record.get(idx).unwrap_or_default().to_string())
                    .collect(),
            );
            records.push(CustomerRecord {
                row,
                name,
                inputs,
                derived,
            });
        }

        Ok(Self {
            headers,
            cells,
            records,
            has_names: columns.name.is_some(),
            has_income: columns.monthly_income.is_some(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw cells as read from the file, padded to the header width.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_names(&self) -> bool {
        self.has_names
    }

    pub fn has_income(&self) -> bool {
        self.has_income
    }

    /// Distinct names in first-appearance order, or `None` without a name column.
    pub fn names(&self) -> Option<Vec<&str>> {
        if !self.has_names {
            return None;
        }
        let mut seen = HashSet::new();
        Some(
            self.records
                .iter()
                .filter_map(|r| r.name.as_deref())
                .filter(|name| seen.insert(*name))
                .collect(),
        )
    }

    /// First row carrying `name`.
    pub fn find(&self, name: &str) -> Option<&CustomerRecord> {
        self.records
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.name.as_deref() == Some(name))
            .count()
    }

    pub fn population_stats(&self) -> PopulationStats {
        population_stats(self.records.iter().map(|r| r.derived.disposable_funds))
    }
}

fn parse_inputs(record: &StringRecord, columns: &ColumnIndex, headers: &[String]) -> Result<RawInputs> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let cell = |idx: usize| parse_cell(record.get(idx), line, &headers[idx]);

    let mut spending = [0.0; SPENDING_CATEGORY_COUNT];
    for (value, &idx) in spending.iter_mut().zip(&columns.spending) {
        *value = cell(idx)?;
    }

    Ok(RawInputs {
        pension: cell(columns.pension)?,
        deposit: cell(columns.deposit)?,
        installment_savings: cell(columns.installment_savings)?,
        fund: cell(columns.fund)?,
        monthly_income: columns.monthly_income.map(cell).transpose()?,
        spending,
    })
}

/// Cell spellings read as a missing value, matching the usual CSV
/// exports of spreadsheet and dataframe tools.
const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

/// Missing cells read as NaN; anything else must parse as a number.
fn parse_cell(raw: Option<&str>, line: u64, column: &str) -> Result<f64> {
    let s = raw.unwrap_or_default().trim();
    if is_missing(s) {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        line,
        column: column.to_string(),
        value: s.to_string(),
    })
}
