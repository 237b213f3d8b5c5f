use super::types::{DerivedMetrics, PopulationStats, RawInputs};

pub fn derive_metrics(inputs: &RawInputs) -> DerivedMetrics {
    let monthly_pension = inputs.pension / 12.0;
    let total_spending = nan_sum(inputs.spending.iter().copied());
    let locked_funds = inputs.deposit + inputs.installment_savings;
    let fund_profit_loss = inputs.fund;
    let disposable_funds = match inputs.monthly_income {
        Some(income) => income + monthly_pension - total_spending,
        None => monthly_pension - total_spending,
    };

    DerivedMetrics {
        monthly_pension,
        total_spending,
        locked_funds,
        fund_profit_loss,
        disposable_funds,
    }
}

pub fn population_stats(values: impl IntoIterator<Item = f64> + Clone) -> PopulationStats {
    PopulationStats {
        min: nan_min(values.clone()),
        max: nan_max(values.clone()),
        mean: nan_mean(values),
    }
}

/// Sum that skips NaN; an all-NaN or empty input sums to 0.
pub fn nan_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().filter(|v| !v.is_nan()).sum()
}

/// Mean that skips NaN; NaN when nothing is left.
pub fn nan_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

pub fn nan_min(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::min)
}

pub fn nan_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::max)
}
