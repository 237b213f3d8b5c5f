use std::io::Write;

use csv::Writer;
use serde::Serialize;

use super::error::ExportError;
use super::types::{CategoryDiff, CustomerRecord};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const SUMMARY_LABELS: [&str; 5] = [
    "묶여있는 돈",
    "월수령연금",
    "월지출",
    "여유자금",
    "펀드 평가손익",
];

/// One `(지표, 값)` line of the analysis download. Empty values are NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "지표")]
    pub label: String,
    #[serde(rename = "값")]
    pub value: Option<f64>,
}

impl ExportRow {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value: (!value.is_nan()).then_some(value),
        }
    }
}

/// Summary metrics followed by the per-category differences.
pub fn export_rows(customer: &CustomerRecord, diffs: &[CategoryDiff]) -> Vec<ExportRow> {
    let d = &customer.derived;
    let summary = [
        d.locked_funds,
        d.monthly_pension,
        d.total_spending,
        d.disposable_funds,
        d.fund_profit_loss,
    ];

    SUMMARY_LABELS
        .iter()
        .zip(summary)
        .map(|(label, value)| ExportRow::new(label, value))
        .chain(
            diffs
                .iter()
                .map(|diff| ExportRow::new(diff.category, diff.difference)),
        )
        .collect()
}

pub fn write_export(rows: &[ExportRow], mut writer: impl Write) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_bytes(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_export(rows, &mut buf)?;
    Ok(buf)
}

pub fn export_file_name(name: &str) -> String {
    format!("{name}_분석.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare::compare_spending;
    use crate::core::dataset::Dataset;
    use crate::core::dataset::tests::csv_fixture;
    use crate::core::types::SPENDING_CATEGORIES;

    fn two_row_dataset() -> Dataset {
        let csv = csv_fixture(
            &[
                ("A", 1200.0, 3_000.0, 500.0, -20.0, 0.0),
                ("B", 2400.0, 0.0, 0.0, 0.0, 0.0),
            ],
            None,
        );
        Dataset::from_reader(csv.as_bytes()).expect("valid csv")
    }

    #[test]
    fn export_has_summary_then_categories() {
        let dataset = two_row_dataset();
        let a = dataset.find("A").expect("A present");
        let rows = export_rows(a, &compare_spending(&dataset, a));

        assert_eq!(rows.len(), SUMMARY_LABELS.len() + SPENDING_CATEGORIES.len());
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(&labels[..5], &SUMMARY_LABELS);
        assert_eq!(&labels[5..], &SPENDING_CATEGORIES);

        let values: Vec<Option<f64>> = rows.iter().take(5).map(|r| r.value).collect();
        assert_eq!(
            values,
            vec![Some(3_500.0), Some(100.0), Some(0.0), Some(100.0), Some(-20.0)]
        );
        assert!(rows[5..].iter().all(|r| r.value == Some(0.0)));
    }

    #[test]
    fn written_csv_has_bom_header_and_rows() {
        let dataset = two_row_dataset();
        let a = dataset.find("A").expect("A present");
        let rows = export_rows(a, &compare_spending(&dataset, a));

        let bytes = export_bytes(&rows).expect("export should serialize");
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).expect("utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "지표,값");
        assert_eq!(lines[1], "묶여있는 돈,3500.0");
        assert_eq!(lines[2], "월수령연금,100.0");
        assert_eq!(lines[6], "간편결제/충전,0.0");
        assert_eq!(lines.len(), 1 + 5 + 17);
    }

    #[test]
    fn nan_values_are_written_empty() {
        let rows = vec![ExportRow::new("여유자금", f64::NAN)];
        let bytes = export_bytes(&rows).expect("export should serialize");
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).expect("utf-8");

        assert_eq!(text, "지표,값\n여유자금,\n");
    }

    #[test]
    fn file_name_uses_customer_name() {
        assert_eq!(export_file_name("홍길동"), "홍길동_분석.csv");
    }
}
