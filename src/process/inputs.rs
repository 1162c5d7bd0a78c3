use serde::{Deserialize, Serialize};

use crate::material_db::{BladeBond, Material};

use super::geometry::{die_count, DieLayout};

/// 다이싱 셋업 입력값. 길이는 이름에 붙은 단위(mm/µm)를 따른다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessInputs {
    pub material: Material,
    pub wafer_diameter_mm: f64,
    pub wafer_thickness_um: f64,
    pub die_width_mm: f64,
    pub die_height_mm: f64,
    pub street_width_um: f64,
    pub blade_diameter_mm: f64,
    pub blade_thickness_um: f64,
    pub blade_bond: BladeBond,
    pub rpm: f64,
    pub feed_mm_per_s: f64,
    pub coolant_l_per_min: f64,
    /// 블레이드 마모율(0~1)
    pub wear_factor: f64,
}

impl Default for ProcessInputs {
    fn default() -> Self {
        Self {
            material: Material::Si,
            wafer_diameter_mm: 200.0,
            wafer_thickness_um: 725.0,
            die_width_mm: 5.0,
            die_height_mm: 5.0,
            street_width_um: 60.0,
            blade_diameter_mm: 58.0,
            blade_thickness_um: 30.0,
            blade_bond: BladeBond::Resin,
            rpm: 12_500.0,
            feed_mm_per_s: 1.5,
            coolant_l_per_min: 1.5,
            wear_factor: 0.2,
        }
    }
}

impl ProcessInputs {
    /// 마모율을 [0,1]로, 음수 길이를 0으로 보정한 사본을 돌려준다. NaN은 건드리지 않는다.
    pub fn sanitized(&self) -> Self {
        let non_negative = |v: f64| super::at_least(v, 0.0);
        Self {
            wafer_diameter_mm: non_negative(self.wafer_diameter_mm),
            wafer_thickness_um: non_negative(self.wafer_thickness_um),
            die_width_mm: non_negative(self.die_width_mm),
            die_height_mm: non_negative(self.die_height_mm),
            street_width_um: non_negative(self.street_width_um),
            blade_diameter_mm: non_negative(self.blade_diameter_mm),
            blade_thickness_um: non_negative(self.blade_thickness_um),
            wear_factor: self.wear_factor.clamp(0.0, 1.0),
            ..self.clone()
        }
    }

    /// 입력 불변조건 위반 항목을 경고 문구로 돌려준다.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(0.0..=1.0).contains(&self.wear_factor) {
            warnings.push(format!(
                "wear factor {} is outside 0..1",
                self.wear_factor
            ));
        }
        for (label, v) in [
            ("wafer diameter", self.wafer_diameter_mm),
            ("wafer thickness", self.wafer_thickness_um),
            ("die width", self.die_width_mm),
            ("die height", self.die_height_mm),
            ("street width", self.street_width_um),
            ("blade diameter", self.blade_diameter_mm),
            ("blade thickness", self.blade_thickness_um),
        ] {
            if v < 0.0 {
                warnings.push(format!("{label} is negative ({v})"));
            } else if v.is_nan() {
                warnings.push(format!("{label} is not a number"));
            }
        }
        warnings
    }

    /// 현재 웨이퍼·다이 형상으로 다이 배치를 계산한다.
    pub fn die_layout(&self) -> DieLayout {
        die_count(
            self.wafer_diameter_mm,
            self.die_width_mm,
            self.die_height_mm,
            self.street_width_um,
        )
    }
}
