use serde::Serialize;

pub const NAME_COLUMN: &str = "이름";
pub const PENSION_COLUMN: &str = "연금";
pub const DEPOSIT_COLUMN: &str = "예금";
pub const INSTALLMENT_SAVINGS_COLUMN: &str = "적금";
pub const FUND_COLUMN: &str = "펀드";
pub const MONTHLY_INCOME_COLUMN: &str = "월수입_총액";

pub const MONTHLY_PENSION_COLUMN: &str = "월수령연금";
pub const TOTAL_SPENDING_COLUMN: &str = "월지출_총액";
pub const LOCKED_FUNDS_COLUMN: &str = "묶여있는_돈";
pub const FUND_PROFIT_LOSS_COLUMN: &str = "펀드_평가손익";
pub const DISPOSABLE_FUNDS_COLUMN: &str = "여유자금";

/// Derived columns in the order they are appended to the raw table.
pub const DERIVED_COLUMNS: [&str; 5] = [
    MONTHLY_PENSION_COLUMN,
    TOTAL_SPENDING_COLUMN,
    LOCKED_FUNDS_COLUMN,
    FUND_PROFIT_LOSS_COLUMN,
    DISPOSABLE_FUNDS_COLUMN,
];

pub const SPENDING_CATEGORY_COUNT: usize = 17;

pub const SPENDING_CATEGORIES: [&str; SPENDING_CATEGORY_COUNT] = [
    "간편결제/충전",
    "외식",
    "온라인쇼핑",
    "교육",
    "술/유흥",
    "배달",
    "카페/디저트",
    "교통/자동차",
    "취미/여가",
    "편의점/마트",
    "생활비",
    "쇼핑",
    "건강/뷰티",
    "주거/세금",
    "의료",
    "출금/이체",
    "기타",
];

/// Raw numeric inputs of one row. Empty cells are stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputs {
    pub pension: f64,
    pub deposit: f64,
    pub installment_savings: f64,
    pub fund: f64,
    /// `None` when the income column is absent from the file.
    pub monthly_income: Option<f64>,
    pub spending: [f64; SPENDING_CATEGORY_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub monthly_pension: f64,
    pub total_spending: f64,
    pub locked_funds: f64,
    pub fund_profit_loss: f64,
    pub disposable_funds: f64,
}

impl DerivedMetrics {
    /// Values in [`DERIVED_COLUMNS`] order.
    pub fn columns(&self) -> [f64; 5] {
        [
            self.monthly_pension,
            self.total_spending,
            self.locked_funds,
            self.fund_profit_loss,
            self.disposable_funds,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    /// Position of the row in the file, starting at 0.
    pub row: usize,
    /// `None` when the name column is absent or the cell is empty.
    pub name: Option<String>,
    pub inputs: RawInputs,
    pub derived: DerivedMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationTone {
    Surplus,
    Shortfall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub tone: RecommendationTone,
    pub message: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffColor {
    Above,
    NotAbove,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDiff {
    pub category: &'static str,
    pub customer: f64,
    pub others_mean: f64,
    pub difference: f64,
    pub color: DiffColor,
}
