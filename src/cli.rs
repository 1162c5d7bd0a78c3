//! CLI 인자 정의. 서브커맨드가 없으면 대화형 메뉴를 실행한다.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::material_db::{BladeBond, Material};
use crate::process::ProcessInputs;
use crate::verification::VerificationKey;

#[derive(Debug, Parser)]
#[command(
    name = "wafer_dicing_toolbox_cli",
    version,
    about = "Wafer dicing setup calculator (setpoints, die count, wafer map, verification)"
)]
pub struct Cli {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', global = true)]
    pub lang: Option<String>,

    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 유도 지표(주속, 커프, 동력, 위험도, 권장 셋포인트)를 출력한다
    Derive {
        #[command(flatten)]
        process: ProcessOverrides,
    },
    /// 다이 배치와 사용 가능 다이 수를 출력한다
    Dies {
        #[command(flatten)]
        process: ProcessOverrides,
    },
    /// CSV 웨이퍼 맵을 읽어 양품/불량 수와 수율을 출력한다
    WaferMap {
        /// CSV 파일 경로
        path: PathBuf,
    },
    /// 검증 시트를 출력한다. `--measured key=value`로 측정값을 판정한다
    Verify {
        #[command(flatten)]
        process: ProcessOverrides,
        /// 척 진공도 공칭값 [kPa]
        #[arg(long)]
        vacuum: Option<f64>,
        /// 측정값 (예: kerf=33.5, tip_speed=37)
        #[arg(long = "measured", value_parser = parse_measurement)]
        measured: Vec<(VerificationKey, f64)>,
    },
    /// 입력값과 결과를 CSV(parameter,value,unit)로 저장한다
    Export {
        /// 출력 파일 경로
        path: PathBuf,
        #[command(flatten)]
        process: ProcessOverrides,
    },
    /// SOP 문서를 출력하거나 파일로 저장한다
    Sop {
        /// 출력 파일 경로 (없으면 표준 출력)
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        process: ProcessOverrides,
    },
    /// 단위를 변환한다 (예: convert length 0.03 mm um)
    Convert {
        /// length / velocity / flow / pressure / power
        kind: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
}

/// 설정 파일의 공정 입력을 덮어쓰는 플래그 묶음.
#[derive(Debug, Clone, Default, Args)]
pub struct ProcessOverrides {
    /// Si / GaAs / SiC / Sapphire / Glass
    #[arg(long)]
    pub material: Option<String>,
    /// Resin / Metal / Hybrid
    #[arg(long)]
    pub bond: Option<String>,
    /// 웨이퍼 직경 [mm]
    #[arg(long)]
    pub wafer_diameter: Option<f64>,
    /// 웨이퍼 두께 [µm]
    #[arg(long)]
    pub wafer_thickness: Option<f64>,
    /// 다이 가로 [mm]
    #[arg(long)]
    pub die_width: Option<f64>,
    /// 다이 세로 [mm]
    #[arg(long)]
    pub die_height: Option<f64>,
    /// 스트리트 폭 [µm]
    #[arg(long)]
    pub street: Option<f64>,
    /// 블레이드 외경 [mm]
    #[arg(long)]
    pub blade_diameter: Option<f64>,
    /// 블레이드 두께 [µm]
    #[arg(long)]
    pub blade_thickness: Option<f64>,
    /// 스핀들 회전수 [rpm]
    #[arg(long)]
    pub rpm: Option<f64>,
    /// 이송속도 [mm/s]
    #[arg(long)]
    pub feed: Option<f64>,
    /// 냉각수 유량 [L/min]
    #[arg(long)]
    pub coolant: Option<f64>,
    /// 블레이드 마모율 (0~1)
    #[arg(long)]
    pub wear: Option<f64>,
}

impl ProcessOverrides {
    /// 지정된 플래그만 덮어쓴 입력값을 돌려준다.
    pub fn apply(&self, base: &ProcessInputs) -> ProcessInputs {
        let mut p = base.clone();
        if let Some(m) = &self.material {
            p.material = Material::from_code(m);
        }
        if let Some(b) = &self.bond {
            p.blade_bond = BladeBond::from_code(b);
        }
        let fields: [(Option<f64>, &mut f64); 11] = [
            (self.wafer_diameter, &mut p.wafer_diameter_mm),
            (self.wafer_thickness, &mut p.wafer_thickness_um),
            (self.die_width, &mut p.die_width_mm),
            (self.die_height, &mut p.die_height_mm),
            (self.street, &mut p.street_width_um),
            (self.blade_diameter, &mut p.blade_diameter_mm),
            (self.blade_thickness, &mut p.blade_thickness_um),
            (self.rpm, &mut p.rpm),
            (self.feed, &mut p.feed_mm_per_s),
            (self.coolant, &mut p.coolant_l_per_min),
            (self.wear, &mut p.wear_factor),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        p
    }
}

/// `key=value` 형식의 측정값을 해석한다.
pub fn parse_measurement(s: &str) -> Result<(VerificationKey, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    let key = VerificationKey::from_name(key).ok_or_else(|| {
        let known: Vec<&str> = VerificationKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown key `{key}` (expected one of {})", known.join(", "))
    })?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value `{value}`: {e}"))?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_touch_only_given_fields() {
        let cli = Cli::parse_from([
            "wafer_dicing_toolbox_cli",
            "derive",
            "--material",
            "sapphire",
            "--rpm",
            "20000",
        ]);
        let Some(Command::Derive { process }) = cli.command else {
            panic!("expected derive subcommand");
        };
        let base = ProcessInputs::default();
        let p = process.apply(&base);
        assert_eq!(p.material, Material::Sapphire);
        assert_eq!(p.rpm, 20000.0);
        assert_eq!(p.feed_mm_per_s, base.feed_mm_per_s);
    }

    #[test]
    fn measurements_parse() {
        let cli = Cli::parse_from([
            "wafer_dicing_toolbox_cli",
            "verify",
            "--measured",
            "kerf=33.5",
            "--measured",
            "tip-speed=40",
        ]);
        let Some(Command::Verify { measured, .. }) = cli.command else {
            panic!("expected verify subcommand");
        };
        assert_eq!(
            measured,
            vec![(VerificationKey::Kerf, 33.5), (VerificationKey::TipSpeed, 40.0)]
        );
        assert!(parse_measurement("kerf").is_err());
        assert!(parse_measurement("spindle=1").is_err());
    }

    #[test]
    fn convert_accepts_negative_values() {
        let cli = Cli::parse_from(["x", "convert", "length", "-5", "mm", "um"]);
        assert!(matches!(cli.command, Some(Command::Convert { value, .. }) if value == -5.0));
    }
}
