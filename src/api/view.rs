//! JSON view models for the dashboard page. Everything the browser draws is
//! decided here; the front-end only lays the numbers out.

use serde::Serialize;
use thiserror::Error;

use crate::core::{
    CategoryDiff, CustomerRecord, DERIVED_COLUMNS, Dataset, DiffColor, PopulationStats,
    Recommendation, compare_spending, export_file_name, format_won, recommend,
    sorted_spending,
};

pub const MISSING_NAME_BANNER: &str = "⚠️ '이름' 컬럼이 없어 고객 선택이 불가합니다.";

const BELOW_MEAN_COLOR: &str = "#F5A9A9";
const ABOVE_MEAN_COLOR: &str = "#81BEF7";
const GAUGE_BAR_COLOR: &str = "green";
const SPENDING_BAR_COLOR: &str = "#636EFA";
const ABOVE_OTHERS_COLOR: &str = "#EF553B";
const NOT_ABOVE_OTHERS_COLOR: &str = "#636EFA";

#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("'이름' column is missing; customer selection is unavailable")]
    NoNameColumn,
    #[error("no customer named '{0}'")]
    UnknownCustomer(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersView {
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeStep {
    pub range: [f64; 2],
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeView {
    pub title: String,
    pub value: f64,
    pub reference: f64,
    pub delta: f64,
    pub axis: [f64; 2],
    pub steps: Vec<GaugeStep>,
    pub bar_color: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<DiffColor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartView {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub name: String,
    pub rows_with_name: usize,
    pub kpis: Vec<Kpi>,
    pub recommendation: Recommendation,
    pub gauge: GaugeView,
    pub spending: BarChartView,
    pub comparison: BarChartView,
    pub export_file_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn build_customers(dataset: &Dataset) -> CustomersView {
    match dataset.names() {
        Some(names) => CustomersView {
            names: Some(names.into_iter().map(str::to_string).collect()),
            error: None,
        },
        None => CustomersView {
            names: None,
            error: Some(MISSING_NAME_BANNER),
        },
    }
}

pub fn select_customer<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a CustomerRecord, ViewError> {
    if !dataset.has_names() {
        return Err(ViewError::NoNameColumn);
    }
    dataset
        .find(name)
        .ok_or_else(|| ViewError::UnknownCustomer(name.to_string()))
}

pub fn build_dashboard(dataset: &Dataset, name: &str) -> Result<DashboardView, ViewError> {
    let customer = select_customer(dataset, name)?;
    let diffs = compare_spending(dataset, customer);

    Ok(DashboardView {
        name: name.to_string(),
        rows_with_name: dataset.count_named(name),
        kpis: build_kpis(customer),
        recommendation: recommend(name, customer.derived.disposable_funds),
        gauge: build_gauge(name, customer, dataset.population_stats()),
        spending: build_spending_chart(customer),
        comparison: build_comparison_chart(&diffs),
        export_file_name: export_file_name(name),
    })
}

fn build_kpis(customer: &CustomerRecord) -> Vec<Kpi> {
    let d = &customer.derived;
    [
        ("💰", "묶여있는 돈", d.locked_funds),
        ("📈", "월수령 연금", d.monthly_pension),
        ("💸", "월지출", d.total_spending),
        ("🪴", "여유자금", d.disposable_funds),
        ("💼", "펀드 평가손익", d.fund_profit_loss),
    ]
    .into_iter()
    .map(|(icon, label, value)| Kpi {
        icon,
        label,
        value,
        display: format_won(value),
    })
    .collect()
}

fn build_gauge(name: &str, customer: &CustomerRecord, stats: PopulationStats) -> GaugeView {
    let value = customer.derived.disposable_funds;
    GaugeView {
        title: format!("{name}님의 여유자금 위치"),
        value,
        reference: stats.mean,
        delta: value - stats.mean,
        axis: [stats.min, stats.max],
        steps: vec![
            GaugeStep {
                range: [stats.min, stats.mean],
                color: BELOW_MEAN_COLOR,
            },
            GaugeStep {
                range: [stats.mean, stats.max],
                color: ABOVE_MEAN_COLOR,
            },
        ],
        bar_color: GAUGE_BAR_COLOR,
    }
}

fn build_spending_chart(customer: &CustomerRecord) -> BarChartView {
    BarChartView {
        title: "카테고리별 소비 비중",
        x_label: "카테고리",
        y_label: "지출",
        bars: sorted_spending(customer)
            .into_iter()
            .map(|(label, value)| Bar {
                label,
                value,
                color: SPENDING_BAR_COLOR,
                group: None,
            })
            .collect(),
    }
}

fn build_comparison_chart(diffs: &[CategoryDiff]) -> BarChartView {
    BarChartView {
        title: "타인 평균 대비 지출 비교",
        x_label: "카테고리",
        y_label: "고객-타인 평균",
        bars: diffs
            .iter()
            .map(|diff| Bar {
                label: diff.category,
                value: diff.difference,
                color: match diff.color {
                    DiffColor::Above => ABOVE_OTHERS_COLOR,
                    DiffColor::NotAbove => NOT_ABOVE_OTHERS_COLOR,
                },
                group: Some(diff.color),
            })
            .collect(),
    }
}

/// Raw cells plus the derived columns appended on the right.
pub fn build_table(dataset: &Dataset) -> TableView {
    let mut headers = dataset.headers().to_vec();
    headers.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

    let rows = dataset
        .cells()
        .iter()
        .zip(dataset.records())
        .map(|(cells, record)| {
            let mut row = cells.clone();
            row.extend(record.derived.columns().iter().map(|v| table_number(*v)));
            row
        })
        .collect();

    TableView { headers, rows }
}

fn table_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
