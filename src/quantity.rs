/// 단위 변환기에서 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Velocity,
    Flow,
    Pressure,
    Power,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 5] = [
        QuantityKind::Length,
        QuantityKind::Velocity,
        QuantityKind::Flow,
        QuantityKind::Pressure,
        QuantityKind::Power,
    ];

    /// CLI 인자로 쓰는 이름(`length`, `velocity` …)을 해석한다.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "length" | "len" => Some(QuantityKind::Length),
            "velocity" | "speed" => Some(QuantityKind::Velocity),
            "flow" | "coolant" => Some(QuantityKind::Flow),
            "pressure" | "vacuum" => Some(QuantityKind::Pressure),
            "power" => Some(QuantityKind::Power),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuantityKind::Length => "length",
            QuantityKind::Velocity => "velocity",
            QuantityKind::Flow => "flow",
            QuantityKind::Pressure => "pressure",
            QuantityKind::Power => "power",
        }
    }
}
