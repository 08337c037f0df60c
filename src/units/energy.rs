use serde::{Deserialize, Serialize};

/// 에너지 표시 단위. 내부 기준은 kWh이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    KilowattHour,
    MegawattHour,
    Gigajoule,
}

impl EnergyUnit {
    pub const ALL: [EnergyUnit; 3] = [
        EnergyUnit::KilowattHour,
        EnergyUnit::MegawattHour,
        EnergyUnit::Gigajoule,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::MegawattHour => "MWh",
            EnergyUnit::Gigajoule => "GJ",
        }
    }

    /// 표시할 소수 자릿수. kWh는 정수로 충분하다.
    pub fn decimals(self) -> usize {
        match self {
            EnergyUnit::KilowattHour => 0,
            EnergyUnit::MegawattHour => 2,
            EnergyUnit::Gigajoule => 1,
        }
    }
}

// 1 kWh = 3.6 MJ
const KWH_TO_GJ: f64 = 0.0036;

fn to_kwh(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::KilowattHour => value,
        EnergyUnit::MegawattHour => value * 1000.0,
        EnergyUnit::Gigajoule => value / KWH_TO_GJ,
    }
}

fn from_kwh(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::KilowattHour => value,
        EnergyUnit::MegawattHour => value / 1000.0,
        EnergyUnit::Gigajoule => value * KWH_TO_GJ,
    }
}

/// 에너지를 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    let kwh = to_kwh(value, from);
    from_kwh(kwh, to)
}
