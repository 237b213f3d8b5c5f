use super::dataset::Dataset;
use super::metrics::nan_mean;
use super::types::{CategoryDiff, CustomerRecord, DiffColor, SPENDING_CATEGORIES};

/// Per-category spending of `customer` minus the mean over every row whose
/// name differs from the customer's. Rows sharing the name are excluded
/// from the baseline along with the customer.
pub fn compare_spending(dataset: &Dataset, customer: &CustomerRecord) -> Vec<CategoryDiff> {
    let others: Vec<&CustomerRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.name != customer.name)
        .collect();

    SPENDING_CATEGORIES
        .iter()
        .enumerate()
        .map(|(idx, &category)| {
            let own = customer.inputs.spending[idx];
            let others_mean = nan_mean(others.iter().map(|r| r.inputs.spending[idx]));
            let difference = own - others_mean;
            CategoryDiff {
                category,
                customer: own,
                others_mean,
                difference,
                color: diff_color(difference),
            }
        })
        .collect()
}

pub fn diff_color(difference: f64) -> DiffColor {
    if difference > 0.0 {
        DiffColor::Above
    } else {
        DiffColor::NotAbove
    }
}

/// Customer spending per category, largest first, empty cells last.
pub fn sorted_spending(customer: &CustomerRecord) -> Vec<(&'static str, f64)> {
    let mut spend: Vec<(&'static str, f64)> = SPENDING_CATEGORIES
        .iter()
        .copied()
        .zip(customer.inputs.spending)
        .collect();
    spend.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => b.1.total_cmp(&a.1),
    });
    spend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::tests::csv_fixture;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn load(rows: &[(&str, f64, f64, f64, f64, f64)]) -> Dataset {
        Dataset::from_reader(csv_fixture(rows, None).as_bytes()).expect("valid csv")
    }

    #[test]
    fn zero_spender_against_positive_population_is_not_above() {
        let dataset = load(&[
            ("A", 1200.0, 0.0, 0.0, 0.0, 0.0),
            ("B", 2400.0, 0.0, 0.0, 0.0, 30_000.0),
            ("C", 2400.0, 0.0, 0.0, 0.0, 10_000.0),
        ]);
        let a = dataset.find("A").expect("A present");
        let diffs = compare_spending(&dataset, a);

        assert_eq!(diffs.len(), SPENDING_CATEGORIES.len());
        for diff in &diffs {
            assert_approx(diff.others_mean, 20_000.0);
            assert_approx(diff.difference, -20_000.0);
            assert_eq!(diff.color, DiffColor::NotAbove);
        }
    }

    #[test]
    fn equal_spending_is_zero_and_not_above() {
        let dataset = load(&[
            ("A", 1200.0, 0.0, 0.0, 0.0, 0.0),
            ("B", 2400.0, 0.0, 0.0, 0.0, 0.0),
        ]);
        let a = dataset.find("A").expect("A present");

        for diff in compare_spending(&dataset, a) {
            assert_approx(diff.difference, 0.0);
            assert_eq!(diff.color, DiffColor::NotAbove);
        }
    }

    #[test]
    fn heavy_spender_is_above() {
        let dataset = load(&[
            ("A", 0.0, 0.0, 0.0, 0.0, 50_000.0),
            ("B", 0.0, 0.0, 0.0, 0.0, 10_000.0),
        ]);
        let a = dataset.find("A").expect("A present");
        let diffs = compare_spending(&dataset, a);

        assert_approx(diffs[0].difference, 40_000.0);
        assert_eq!(diffs[0].color, DiffColor::Above);
        assert_eq!(diffs[0].category, "간편결제/충전");
    }

    #[test]
    fn same_named_rows_are_left_out_of_the_baseline() {
        let dataset = load(&[
            ("A", 0.0, 0.0, 0.0, 0.0, 10.0),
            ("A", 0.0, 0.0, 0.0, 0.0, 1_000.0),
            ("B", 0.0, 0.0, 0.0, 0.0, 4.0),
        ]);
        let a = dataset.find("A").expect("A present");

        for diff in compare_spending(&dataset, a) {
            assert_approx(diff.others_mean, 4.0);
            assert_approx(diff.difference, 6.0);
        }
    }

    #[test]
    fn lone_customer_has_nan_difference() {
        let dataset = load(&[("A", 0.0, 0.0, 0.0, 0.0, 10.0)]);
        let a = dataset.find("A").expect("A present");

        for diff in compare_spending(&dataset, a) {
            assert!(diff.difference.is_nan());
            assert_eq!(diff.color, DiffColor::NotAbove);
        }
    }

    #[test]
    fn sorted_spending_is_descending_with_nan_last() {
        let dataset = load(&[("A", 0.0, 0.0, 0.0, 0.0, 0.0)]);
        let mut a = dataset.find("A").expect("A present").clone();
        a.inputs.spending[3] = 500.0;
        a.inputs.spending[7] = 900.0;
        a.inputs.spending[0] = f64::NAN;

        let sorted = sorted_spending(&a);
        assert_eq!(sorted[0], ("교통/자동차", 900.0));
        assert_eq!(sorted[1], ("교육", 500.0));
        assert_eq!(sorted.last().map(|s| s.0), Some("간편결제/충전"));
        assert_eq!(sorted.len(), SPENDING_CATEGORIES.len());
    }
}
