// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Decisiones de control del lado del aire (§4.6 "Controllers"): tipo de
//! economizador, elegibilidad de DCV/ERV/luz natural y los puntos de la
//! curva de reset de temperatura de impulsión. Todas son funciones puras:
//! no dependen de ningún estado del modelo, solo de clima y tipo de
//! edificio/sistema, para que `topology` pueda decidir sin necesitar un
//! `&Model` completo.

use crate::common::{BuildingType, ClimateZone, EconomizerType, HvacType};

/// Tipo de economizador por zona climática (§4.6: `DifferentialEnthalpy`
/// para climas húmedos C1/C2/C5, `DifferentialDryBulb` en el resto).
pub fn economizer_type(climate: ClimateZone) -> EconomizerType {
    if climate.is_humid() {
        EconomizerType::DifferentialEnthalpy
    } else {
        EconomizerType::DifferentialDryBulb
    }
}

/// Elegibilidad de ventilación controlada por demanda (§4.6: Office/School/
/// Retail con sistema VAV/RTU; excluida explícitamente para PTAC — ver
/// pregunta abierta §9.1, resuelta aquí a favor de excluir).
pub fn dcv_eligible(building_type: BuildingType, hvac_type: HvacType) -> bool {
    matches!(
        building_type,
        BuildingType::Office | BuildingType::School | BuildingType::Retail
    ) && matches!(hvac_type, HvacType::Vav | HvacType::Rtu)
}

/// Elegibilidad de recuperador de calor aire-aire (§4.6, §8 invariante 7):
/// presente en {C1,C2,C3,C6,C7,C8}, ausente en C4/C5.
pub fn erv_eligible(climate: ClimateZone) -> bool {
    climate.wants_erv()
}

/// Efectividades de ERV sensible/latente al 100 % de caudal de calefacción
/// (§9 pregunta abierta 2: se usan las constantes documentadas en la fuente
/// archivada, sin calibración específica por zona climática).
pub const ERV_SENSIBLE_EFFECTIVENESS: f64 = 0.70;
pub const ERV_LATENT_EFFECTIVENESS: f64 = 0.65;

/// Elegibilidad de control de luz natural (§4.6: tipo de edificio en
/// {Office, School} y la zona tiene ventana exterior).
pub fn daylighting_eligible(building_type: BuildingType, has_exterior_window: bool) -> bool {
    matches!(building_type, BuildingType::Office | BuildingType::School) && has_exterior_window
}

/// Puntos de la curva `SetpointManager:OutdoorAirReset` (temperatura baja
/// exterior, consigna en temperatura baja, temperatura alta exterior,
/// consigna en temperatura alta), en °C. Climas más fríos permiten una
/// consigna de impulsión más baja en el extremo frío de la curva.
pub fn oa_reset_points(climate: ClimateZone) -> (f64, f64, f64, f64) {
    use ClimateZone::*;
    match climate {
        C1 | C2 => (16.7, 12.8, 23.3, 15.6),
        C3 | C4 => (15.6, 12.8, 21.1, 15.6),
        C5 | C6 => (14.4, 12.8, 18.9, 15.6),
        C7 | C8 => (12.8, 12.8, 16.7, 15.6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humid_climates_get_enthalpy_economizer() {
        assert_eq!(economizer_type(ClimateZone::C1), EconomizerType::DifferentialEnthalpy);
        assert_eq!(economizer_type(ClimateZone::C5), EconomizerType::DifferentialEnthalpy);
        assert_eq!(economizer_type(ClimateZone::C4), EconomizerType::DifferentialDryBulb);
    }

    #[test]
    fn dcv_excludes_ptac_building_types() {
        assert!(!dcv_eligible(BuildingType::ResidentialMulti, HvacType::Ptac));
        assert!(dcv_eligible(BuildingType::Office, HvacType::Vav));
        assert!(!dcv_eligible(BuildingType::Hospital, HvacType::ChilledWater));
    }

    #[test]
    fn erv_matches_climate_zone_set() {
        assert!(erv_eligible(ClimateZone::C1));
        assert!(!erv_eligible(ClimateZone::C4));
        assert!(!erv_eligible(ClimateZone::C5));
        assert!(erv_eligible(ClimateZone::C8));
    }

    #[test]
    fn daylighting_requires_eligible_building_type_and_window() {
        assert!(daylighting_eligible(BuildingType::Office, true));
        assert!(!daylighting_eligible(BuildingType::Office, false));
        assert!(!daylighting_eligible(BuildingType::Hospital, true));
    }
}
