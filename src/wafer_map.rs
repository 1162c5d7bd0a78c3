//! CSV 웨이퍼 맵 파서.
//!
//! 첫 줄은 유효한 헤더인지와 관계없이 항상 헤더로 소비한다. 데이터로 보이는 첫 줄도 버려지므로
//! 헤더 없는 파일은 첫 다이가 집계에서 빠진다.
//! 파서는 실패하지 않으며, 누락·잘못된 필드는 기본값으로 대체한다.

use serde::Serialize;
use tracing::{debug, warn};

/// 다이 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DieStatus {
    Good,
    Bad,
}

impl DieStatus {
    /// 소문자 변환 후 `bad`만 불량으로 본다. 그 외 값은 모두 양품.
    pub fn from_field(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("bad") {
            DieStatus::Bad
        } else {
            DieStatus::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DieStatus::Good => "good",
            DieStatus::Bad => "bad",
        }
    }
}

/// 웨이퍼 맵 한 행. 같은 좌표가 반복되어도 중복 제거하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaferMapRecord {
    pub x: i32,
    pub y: i32,
    pub status: DieStatus,
}

/// 헤더에서 찾은 열 위치.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    x: Option<usize>,
    y: Option<usize>,
    status: Option<usize>,
}

const POSITIONAL: Columns = Columns {
    x: Some(0),
    y: Some(1),
    status: Some(2),
};

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|f| f.trim().trim_matches('"').trim())
        .collect()
}

/// 헤더 줄에서 x/die_x, y/die_y, status 열을 찾는다. 하나도 없으면 0/1/2 열 순서로 가정한다.
fn columns_from_header(header: &str) -> Columns {
    let names: Vec<String> = split_fields(header)
        .into_iter()
        .map(|f| f.to_lowercase())
        .collect();
    let find = |aliases: &[&str]| names.iter().position(|n| aliases.contains(&n.as_str()));
    let cols = Columns {
        x: find(&["x", "die_x"]),
        y: find(&["y", "die_y"]),
        status: find(&["status"]),
    };
    if cols.x.is_none() && cols.y.is_none() && cols.status.is_none() {
        warn!(header = header, "wafer map header not recognised; assuming x,y,status column order");
        POSITIONAL
    } else {
        cols
    }
}

/// 좌표 필드를 정수로 변환한다. 소수는 0 방향으로 버리고, 숫자가 아니면 0.
fn parse_coord(field: Option<&&str>) -> i32 {
    let Some(s) = field else {
        return 0;
    };
    if let Ok(v) = s.parse::<i32>() {
        return v;
    }
    match s.parse::<f64>() {
        // 범위를 넘는 값은 i32 경계로 포화된다.
        Ok(v) if v.is_finite() => v.trunc() as i32,
        _ => {
            if !s.is_empty() {
                debug!(field = *s, "non-numeric wafer map coordinate; using 0");
            }
            0
        }
    }
}

/// CSV 텍스트를 웨이퍼 맵 레코드로 변환한다. 입력 줄 순서를 그대로 유지한다.
///
/// `\n`, `\r\n` 줄바꿈을 모두 허용하며 빈 줄은 건너뛴다.
pub fn parse_wafer_map(text: &str) -> Vec<WaferMapRecord> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let cols = columns_from_header(header);

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields = split_fields(line);
            let status = cols
                .status
                .and_then(|i| fields.get(i))
                .filter(|s| !s.is_empty())
                .map_or(DieStatus::Good, |s| DieStatus::from_field(s));
            WaferMapRecord {
                x: parse_coord(cols.x.and_then(|i| fields.get(i))),
                y: parse_coord(cols.y.and_then(|i| fields.get(i))),
                status,
            }
        })
        .collect()
}

/// 레코드 집계.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaferMapSummary {
    pub total: usize,
    pub good: usize,
    pub bad: usize,
    /// 양품률(%). 레코드가 없으면 NaN.
    pub yield_percent: f64,
}

impl WaferMapSummary {
    pub fn from_records(records: &[WaferMapRecord]) -> Self {
        let total = records.len();
        let bad = records
            .iter()
            .filter(|r| r.status == DieStatus::Bad)
            .count();
        let good = total - bad;
        let yield_percent = if total > 0 {
            good as f64 / total as f64 * 100.0
        } else {
            f64::NAN
        };
        Self {
            total,
            good,
            bad,
            yield_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_aliases_are_case_insensitive() {
        let cols = columns_from_header("Status, DIE_Y ,Die_X");
        assert_eq!(
            cols,
            Columns {
                x: Some(2),
                y: Some(1),
                status: Some(0)
            }
        );
    }

    #[test]
    fn unknown_header_falls_back_to_positional() {
        assert_eq!(columns_from_header("1,2,good"), POSITIONAL);
    }

    #[test]
    fn coords_truncate_and_default() {
        assert_eq!(parse_coord(Some(&"3.9")), 3);
        assert_eq!(parse_coord(Some(&"-2.5")), -2);
        assert_eq!(parse_coord(Some(&"abc")), 0);
        assert_eq!(parse_coord(None), 0);
    }
}
