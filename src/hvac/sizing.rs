// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Dimensionado por zona (§4.6 "Sizing"): carga de refrigeración y
//! calefacción, y caudal de impulsión, a partir del área de la zona y los
//! factores W/m² de la plantilla de tipo de edificio.

use crate::defaults::BuildingTemplate;

/// Caudal de impulsión por unidad de área, m³/(s·m²) (§4.6 "supply air flow
/// = area × 0.005 m³/s·m²").
const SUPPLY_FLOW_PER_AREA: f64 = 0.005;

/// Resultado del dimensionado de una zona.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSizing {
    pub cooling_load_w: f64,
    pub heating_load_w: f64,
    pub supply_airflow_m3_s: f64,
}

/// Dimensiona una zona de `area_m2` con los factores de la plantilla.
pub fn size_zone(area_m2: f64, template: &BuildingTemplate) -> ZoneSizing {
    ZoneSizing {
        cooling_load_w: area_m2 * template.cooling_w_m2,
        heating_load_w: area_m2 * template.heating_w_m2,
        supply_airflow_m3_s: area_m2 * SUPPLY_FLOW_PER_AREA,
    }
}

/// Suma el dimensionado de un conjunto de zonas (para el caudal de diseño
/// del airloop que las sirve).
pub fn size_airloop<'a>(areas_m2: impl Iterator<Item = &'a f64>, template: &BuildingTemplate) -> ZoneSizing {
    let mut total = ZoneSizing {
        cooling_load_w: 0.0,
        heating_load_w: 0.0,
        supply_airflow_m3_s: 0.0,
    };
    for area in areas_m2 {
        let z = size_zone(*area, template);
        total.cooling_load_w += z.cooling_load_w;
        total.heating_load_w += z.heating_load_w;
        total.supply_airflow_m3_s += z.supply_airflow_m3_s;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BuildingType, HvacType, SpaceType};

    fn office_template() -> BuildingTemplate {
        BuildingTemplate {
            target_hvac: HvacType::Vav,
            lighting_w_m2: 9.0,
            equipment_w_m2: 8.0,
            occupancy_people_m2: 0.05,
            infiltration_ach: 0.4,
            wwr: 0.4,
            space_mix: vec![(SpaceType::OfficeOpen, 1.0)],
            target_cell_size_m2: 80.0,
            cooling_w_m2: 60.0,
            heating_w_m2: 45.0,
        }
    }

    #[test]
    fn zone_sizing_scales_with_area() {
        let t = office_template();
        let s = size_zone(100.0, &t);
        assert!((s.cooling_load_w - 6000.0).abs() < 1e-9);
        assert!((s.heating_load_w - 4500.0).abs() < 1e-9);
        assert!((s.supply_airflow_m3_s - 0.5).abs() < 1e-9);
        let _ = BuildingType::Office;
    }

    #[test]
    fn airloop_sizing_sums_zones() {
        let t = office_template();
        let areas = [100.0, 200.0];
        let total = size_airloop(areas.iter(), &t);
        assert!((total.cooling_load_w - 18000.0).abs() < 1e-6);
    }
}
