//! 결과 표시용 단위 정의 및 변환. 엔진은 항상 kWh, m² 기준으로 계산한다.

pub mod area;
pub mod energy;

pub use area::{convert_area, AreaUnit};
pub use energy::{convert_energy, EnergyUnit};

/// 면적당 생산량 [kWh/m²]을 요청 단위 조합으로 변환한다.
///
/// 분자는 에너지, 분모는 면적이므로 면적은 1 단위 면적이 몇 m²인지로 나눠 준다.
pub fn convert_production_per_area(
    value_kwh_per_m2: f64,
    energy: EnergyUnit,
    area: AreaUnit,
) -> f64 {
    let energy_value = convert_energy(value_kwh_per_m2, EnergyUnit::KilowattHour, energy);
    let m2_per_unit_area = convert_area(1.0, area, AreaUnit::SquareMeter);
    energy_value * m2_per_unit_area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousand_kwh_is_three_point_six_gigajoule() {
        let gj = convert_energy(1000.0, EnergyUnit::KilowattHour, EnergyUnit::Gigajoule);
        assert!((gj - 3.6).abs() < 1e-9);
        let mwh = convert_energy(11862.0, EnergyUnit::KilowattHour, EnergyUnit::MegawattHour);
        assert!((mwh - 11.862).abs() < 1e-9);
    }

    #[test]
    fn per_area_in_square_feet_is_smaller() {
        let v = convert_production_per_area(100.0, EnergyUnit::KilowattHour, AreaUnit::SquareFoot);
        assert!((v - 9.2903).abs() < 1e-6);
    }
}
