use std::f64::consts::PI;

use serde::Serialize;

use crate::units::um_to_mm;

/// 마모에 따른 커프 확장 계수.
pub const KERF_WEAR_COEFF: f64 = 0.12;
/// 권장 주속 하한(m/s)
pub const TIP_SPEED_MIN_MPS: f64 = 30.0;
/// 권장 주속 상한(m/s)
pub const TIP_SPEED_MAX_MPS: f64 = 45.0;

/// 블레이드 외경 주속(m/s)을 계산한다. 범위 밖 값도 그대로 돌려준다.
pub fn tip_speed_mps(blade_diameter_mm: f64, rpm: f64) -> f64 {
    PI * (blade_diameter_mm / 1000.0) * rpm / 60.0
}

/// 마모를 반영한 커프 폭(µm) 추정치.
pub fn kerf_um(blade_thickness_um: f64, wear_factor: f64) -> f64 {
    blade_thickness_um * (1.0 + KERF_WEAR_COEFF * wear_factor)
}

/// 주속이 권장 구간(30~45 m/s) 안에 있는지 분류한다. 경고용이며 오류가 아니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipSpeedStatus {
    Low,
    InRange,
    High,
    /// NaN 등 판단할 수 없는 값
    Unknown,
}

impl TipSpeedStatus {
    pub fn classify(tip_speed_mps: f64) -> Self {
        if tip_speed_mps.is_nan() {
            TipSpeedStatus::Unknown
        } else if tip_speed_mps < TIP_SPEED_MIN_MPS {
            TipSpeedStatus::Low
        } else if tip_speed_mps > TIP_SPEED_MAX_MPS {
            TipSpeedStatus::High
        } else {
            TipSpeedStatus::InRange
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, TipSpeedStatus::InRange)
    }
}

/// 웨이퍼 위 다이 격자 배치 결과.
///
/// 각 개수는 `u32` 범위로 포화된다. 다이 피치에 비해 웨이퍼가 비현실적으로 크면
/// `u32::MAX`가 나올 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DieLayout {
    pub columns: u32,
    pub rows: u32,
    pub usable_dies: u32,
}

impl DieLayout {
    /// 원형 보정 전 사각 격자 다이 수.
    pub fn grid_dies(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

fn circle_area(radius: f64) -> f64 {
    PI * radius * radius
}

/// pitch가 0 이하이거나 NaN이면 0개로 본다.
fn count_along(span_mm: f64, pitch_mm: f64) -> u32 {
    if !(pitch_mm > 0.0) {
        return 0;
    }
    let n = (span_mm / pitch_mm).floor();
    if n > 0.0 {
        // 범위를 넘는 값은 u32::MAX 로 포화된다.
        n as u32
    } else {
        0
    }
}

/// 웨이퍼 직경과 다이 피치(다이 크기 + 스트리트)로 사용 가능한 다이 수를 계산한다.
///
/// 사각 격자 다이 수에 원 면적/격자 면적 비율(0~1)을 곱해 가장자리 손실을 근사한다.
pub fn die_count(
    wafer_diameter_mm: f64,
    die_width_mm: f64,
    die_height_mm: f64,
    street_width_um: f64,
) -> DieLayout {
    let street_mm = um_to_mm(street_width_um);
    let pitch_x = die_width_mm + street_mm;
    let pitch_y = die_height_mm + street_mm;
    let columns = count_along(wafer_diameter_mm, pitch_x);
    let rows = count_along(wafer_diameter_mm, pitch_y);

    let grid = f64::from(columns) * f64::from(rows);
    let grid_area = super::at_least(grid * pitch_x * pitch_y, 1.0);
    let fill = (circle_area(wafer_diameter_mm / 2.0) / grid_area).clamp(0.0, 1.0);
    let usable = (grid * fill).floor();
    let usable_dies = if usable > 0.0 { usable as u32 } else { 0 };

    DieLayout {
        columns,
        rows,
        usable_dies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pitch_gives_empty_layout() {
        let layout = die_count(300.0, 0.0, 5.0, 0.0);
        assert_eq!(layout.columns, 0);
        assert_eq!(layout.usable_dies, 0);
    }

    #[test]
    fn huge_grid_saturates_counts() {
        let layout = die_count(1e12, 1e-9, 1e-9, 0.0);
        assert_eq!(layout.columns, u32::MAX);
        assert_eq!(layout.rows, u32::MAX);
        assert_eq!(layout.usable_dies, u32::MAX);
        assert_eq!(layout.grid_dies(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn negative_pitch_gives_empty_layout() {
        let layout = die_count(300.0, -5.0, -5.0, 60.0);
        assert_eq!(layout, DieLayout::default());
    }

    #[test]
    fn classify_tip_speed_window() {
        assert_eq!(TipSpeedStatus::classify(29.9), TipSpeedStatus::Low);
        assert_eq!(TipSpeedStatus::classify(30.0), TipSpeedStatus::InRange);
        assert_eq!(TipSpeedStatus::classify(45.0), TipSpeedStatus::InRange);
        assert_eq!(TipSpeedStatus::classify(45.1), TipSpeedStatus::High);
        assert_eq!(TipSpeedStatus::classify(f64::NAN), TipSpeedStatus::Unknown);
    }
}
