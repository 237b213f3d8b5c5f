use super::format::format_amount;
use super::types::{Recommendation, RecommendationTone};

/// Two-way product suggestion split at zero disposable funds. Zero counts as
/// a surplus; NaN fails the `>= 0` test and lands on the shortfall side.
pub fn recommend(name: &str, disposable_funds: f64) -> Recommendation {
    if disposable_funds >= 0.0 {
        Recommendation {
            tone: RecommendationTone::Surplus,
            message: format!(
                "{name}님 여유자금 {}원 양호.\n→ 단·중기 자유적립식 적금, 정기예금 등 자산 증식 상품 제안",
                format_amount(disposable_funds)
            ),
        }
    } else {
        Recommendation {
            tone: RecommendationTone::Shortfall,
            message: format!(
                "{name}님 매월 {}원 부족.\n→ 생활비 안심대출, 자금관리형 상품 권장 및 지출 패턴 점검 상담",
                format_amount(disposable_funds.abs())
            ),
        }
    }
}
