//! 웨이퍼 재질·블레이드 본드별 공정 상수 테이블.
//! 값은 다이싱 셋업 초기값 산정을 위한 경험치이며 실제 조건은 시험 절단으로 검증해야 한다.
use serde::{Deserialize, Serialize};

/// 웨이퍼 재질. 테이블에 없는 재질은 `Other`로 받아 기본 상수를 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Si,
    GaAs,
    SiC,
    Sapphire,
    Glass,
    #[serde(other)]
    Other,
}

/// 블레이드 본드 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BladeBond {
    Resin,
    Metal,
    Hybrid,
    #[serde(other)]
    Other,
}

#[derive(Debug)]
pub struct MaterialData {
    pub material: Material,
    pub code: &'static str,
    pub name: &'static str,
    pub notes: &'static str,
    /// 기준 이송속도(mm/s). 두께 1 mm 기준이며 √t 로 나누어 보정한다.
    pub feed_base_mm_per_s: f64,
    /// 스핀들 동력 계수(kW per mm/s·mm·mm)
    pub power_coeff: f64,
    /// 치핑 위험도 기본 점수
    pub risk_base: f64,
    /// 목표 주속 보정 계수
    pub rpm_factor: f64,
}

/// 테이블에 없는 재질에 적용하는 기본 상수.
pub const DEFAULT_MATERIAL: MaterialData = MaterialData {
    material: Material::Other,
    code: "OTHER",
    name: "Unlisted material",
    notes: "테이블 외 재질; 보수적 기본값",
    feed_base_mm_per_s: 1.0,
    power_coeff: 0.02,
    risk_base: 35.0,
    rpm_factor: 1.0,
};

/// 테이블에 없는 본드에 적용하는 주속 보정 계수.
pub const DEFAULT_BOND_FACTOR: f64 = 1.0;

impl Material {
    pub const ALL: [Material; 5] = [
        Material::Si,
        Material::GaAs,
        Material::SiC,
        Material::Sapphire,
        Material::Glass,
    ];

    /// 재질 상수를 조회한다. `Other`는 기본 상수를 돌려준다.
    pub fn data(&self) -> &'static MaterialData {
        MATERIALS
            .iter()
            .find(|m| m.material == *self)
            .unwrap_or(&DEFAULT_MATERIAL)
    }

    /// 코드 또는 이름(대소문자 무시)으로 재질을 찾는다. 찾지 못하면 `Other`.
    pub fn from_code(code: &str) -> Self {
        find_material(code).map_or(Material::Other, |m| m.material)
    }

    pub fn code(&self) -> &'static str {
        self.data().code
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl BladeBond {
    pub const ALL: [BladeBond; 3] = [BladeBond::Resin, BladeBond::Metal, BladeBond::Hybrid];

    /// 본드별 목표 주속 보정 계수.
    pub fn rpm_factor(&self) -> f64 {
        match self {
            BladeBond::Resin => 1.0,
            BladeBond::Hybrid => 0.95,
            BladeBond::Metal => 0.9,
            BladeBond::Other => DEFAULT_BOND_FACTOR,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "resin" => BladeBond::Resin,
            "metal" | "sintered" => BladeBond::Metal,
            "hybrid" => BladeBond::Hybrid,
            _ => BladeBond::Other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BladeBond::Resin => "Resin",
            BladeBond::Metal => "Metal",
            BladeBond::Hybrid => "Hybrid",
            BladeBond::Other => "Other",
        }
    }
}

impl std::fmt::Display for BladeBond {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

pub fn materials() -> &'static [MaterialData] {
    MATERIALS
}

pub fn find_material(code: &str) -> Option<&'static MaterialData> {
    let code = code.trim();
    MATERIALS
        .iter()
        .find(|m| m.code.eq_ignore_ascii_case(code) || m.name.eq_ignore_ascii_case(code))
}

const MATERIALS: &[MaterialData] = &[
    MaterialData {
        material: Material::Si,
        code: "Si",
        name: "Silicon",
        notes: "단결정 실리콘; 레진 본드 일반",
        feed_base_mm_per_s: 2.0,
        power_coeff: 0.015,
        risk_base: 25.0,
        rpm_factor: 1.0,
    },
    MaterialData {
        material: Material::GaAs,
        code: "GaAs",
        name: "Gallium Arsenide",
        notes: "취성 큼; 저속 이송 권장",
        feed_base_mm_per_s: 1.2,
        power_coeff: 0.02,
        risk_base: 40.0,
        rpm_factor: 0.85,
    },
    MaterialData {
        material: Material::SiC,
        code: "SiC",
        name: "Silicon Carbide",
        notes: "고경도; 메탈/하이브리드 본드 권장",
        feed_base_mm_per_s: 0.7,
        power_coeff: 0.06,
        risk_base: 55.0,
        rpm_factor: 0.8,
    },
    MaterialData {
        material: Material::Sapphire,
        code: "Sapphire",
        name: "Sapphire (Al2O3)",
        notes: "최고 경도; 다단 절단 고려",
        feed_base_mm_per_s: 0.5,
        power_coeff: 0.07,
        risk_base: 60.0,
        rpm_factor: 0.75,
    },
    MaterialData {
        material: Material::Glass,
        code: "Glass",
        name: "Glass",
        notes: "비정질; 냉각수 충분히 확보",
        feed_base_mm_per_s: 0.8,
        power_coeff: 0.018,
        risk_base: 45.0,
        rpm_factor: 0.9,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_material_has_a_row() {
        for m in Material::ALL {
            assert_eq!(m.data().material, m);
        }
    }

    #[test]
    fn lookup_ignores_case_and_falls_back() {
        assert_eq!(Material::from_code("sic"), Material::SiC);
        assert_eq!(Material::from_code("Silicon"), Material::Si);
        assert_eq!(Material::from_code("InP"), Material::Other);
        assert_eq!(Material::Other.data().feed_base_mm_per_s, 1.0);
        assert_eq!(BladeBond::from_code("diamond"), BladeBond::Other);
    }
}
