//! 다이싱 공정 파라미터 계산 모듈 모음.
//! 입력값(재질·형상·블레이드)에서 권장 셋포인트, 성능 추정치, 치핑 위험도를 유도한다.
//! 모든 함수는 순수 함수이며 NaN 입력은 결과로 그대로 전파된다.

pub mod geometry;
pub mod inputs;
pub mod metrics;
pub mod risk;
pub mod setpoint;

pub use geometry::*;
pub use inputs::*;
pub use metrics::*;
pub use risk::*;
pub use setpoint::*;

/// `value`가 `min`보다 작으면 `min`을 돌려준다. `f64::max`와 달리 NaN은 그대로 통과시킨다.
pub(crate) fn at_least(value: f64, min: f64) -> f64 {
    if value < min {
        min
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::at_least;

    #[test]
    fn at_least_keeps_nan() {
        assert_eq!(at_least(-1.0, 0.0), 0.0);
        assert_eq!(at_least(2.0, 0.0), 2.0);
        assert!(at_least(f64::NAN, 0.0).is_nan());
    }
}
