// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Motor de construcción de la topología HVAC (C6, §4.6): decide el tipo de
//! sistema, dimensiona, decide controladores y levanta el grafo de nodos de
//! aire hasta `Validated`.
//!
//! Los nombres de nodo son funciones puras del nombre del airloop o de la
//! zona (no hay estado oculto): tanto este módulo, al registrar el grafo,
//! como [`crate::idf::lower`], al emitir los objetos IDF concretos, llaman a
//! las mismas funciones y obtienen los mismos nombres.

use crate::common::{BuildingType, ClimateZone, HvacType};
use crate::defaults::BuildingTemplate;
use crate::error::TopologyError;
use crate::hvac::controllers;
use crate::hvac::graph::{AirLoop, AirLoopState, ZoneEquipmentUnit, ZoneHvacKind};
use crate::model::Model;

const MAIN_AIRLOOP_NAME: &str = "MainAirLoop";

/// Nombre del airloop único que sirve a todo el edificio (§9: un único
/// sistema por edificio, sin mezcla de zonas entre sistemas distintos).
pub fn airloop_name() -> &'static str {
    MAIN_AIRLOOP_NAME
}

pub fn oa_intake_node(airloop: &str) -> String {
    format!("{airloop}_OAIntake")
}
pub fn relief_node(airloop: &str) -> String {
    format!("{airloop}_Relief")
}
pub fn return_node(airloop: &str) -> String {
    format!("{airloop}_Return")
}
pub fn mixed_air_node(airloop: &str) -> String {
    format!("{airloop}_MixedAir")
}
pub fn fan_outlet_node(airloop: &str) -> String {
    format!("{airloop}_FanOutlet")
}
pub fn cooling_coil_outlet_node(airloop: &str) -> String {
    format!("{airloop}_CoolOutlet")
}
pub fn supply_outlet_node(airloop: &str) -> String {
    format!("{airloop}_SupplyOutlet")
}
pub fn hx_supply_outlet_node(airloop: &str) -> String {
    format!("{airloop}_HXSupplyOut")
}
pub fn hx_exhaust_outlet_node(airloop: &str) -> String {
    format!("{airloop}_HXExhaustOut")
}
pub fn splitter_outlet_node(zone: &str) -> String {
    format!("{zone}_SplitterOut")
}
pub fn reheat_outlet_node(zone: &str) -> String {
    format!("{zone}_ReheatOutlet")
}
pub fn cav_outlet_node(zone: &str) -> String {
    format!("{zone}_CAVOutlet")
}
pub fn zone_return_air_node(zone: &str) -> String {
    format!("{zone}_ReturnAir")
}
pub fn zone_air_node(zone: &str) -> String {
    format!("{zone}_ZoneAirNode")
}
pub fn zone_equipment_inlet_node(zone: &str) -> String {
    format!("{zone}_UnitInlet")
}
pub fn zone_equipment_outlet_node(zone: &str) -> String {
    format!("{zone}_UnitOutlet")
}

/// Selecciona el tipo de sistema HVAC (§4.6 "System type selection"): el
/// forzado por el usuario tiene prioridad; si no, el de la plantilla de
/// tipo de edificio.
pub fn select_hvac_type(template: &BuildingTemplate, forced: Option<HvacType>) -> HvacType {
    forced.unwrap_or(template.target_hvac)
}

/// `true` si el tipo de sistema lleva un `AirLoopHVAC` central compartido
/// (Vav/Rtu/ChilledWater); `false` si cada zona lleva su propio equipo
/// autónomo (Ptac/HeatPump/IdealLoads).
pub fn uses_central_airloop(hvac_type: HvacType) -> bool {
    matches!(hvac_type, HvacType::Vav | HvacType::Rtu | HvacType::ChilledWater)
}

fn zone_hvac_kind(hvac_type: HvacType) -> ZoneHvacKind {
    match hvac_type {
        HvacType::Ptac => ZoneHvacKind::Ptac,
        HvacType::HeatPump => ZoneHvacKind::HeatPump,
        HvacType::IdealLoads => ZoneHvacKind::IdealLoads,
        _ => unreachable!("uses_central_airloop debe filtrar estos tipos antes"),
    }
}

/// `true` si alguna superficie exterior de la zona lleva un hueco (§4.6
/// "Daylighting requires an exterior window").
pub(crate) fn zone_has_exterior_window(model: &Model, zone: &str) -> bool {
    let exterior_surfaces: Vec<&str> = model
        .surfaces_of_zone(zone)
        .filter(|s| matches!(s.boundary, crate::common::BoundaryType::Outdoors))
        .map(|s| s.name.as_str())
        .collect();
    model
        .fenestrations
        .iter()
        .any(|f| exterior_surfaces.contains(&f.parent_surface.as_str()))
}

/// Construye la topología HVAC completa del modelo (§4.6): un único sistema
/// por edificio, bien un airloop central con cajas de zona, bien un equipo
/// autónomo por zona. Avanza la máquina de estados de cada airloop hasta
/// `Validated` y deja el grafo de nodos listo para `HvacModel::validate_nodes`.
pub fn build_hvac(
    model: &mut Model,
    template: &BuildingTemplate,
    building_type: BuildingType,
    climate: ClimateZone,
    forced_hvac_type: Option<HvacType>,
) -> Result<(), TopologyError> {
    let hvac_type = select_hvac_type(template, forced_hvac_type);
    let zones: Vec<String> = model.zones.iter().map(|z| z.name.clone()).collect();

    if uses_central_airloop(hvac_type) {
        build_central_airloop(model, &zones, building_type, climate, hvac_type)?;
    } else {
        let kind = zone_hvac_kind(hvac_type);
        for zone in &zones {
            build_zone_equipment(model, zone, kind);
        }
    }

    for zone in &zones {
        if !model.hvac.is_zone_served(zone) {
            return Err(TopologyError::UnconnectedZone { zone: zone.clone() });
        }
    }

    let errors = model.hvac.validate_nodes();
    if let Some(first) = errors.into_iter().next() {
        return Err(first);
    }
    Ok(())
}

fn build_zone_equipment(model: &mut Model, zone: &str, kind: ZoneHvacKind) {
    let inlet = zone_equipment_inlet_node(zone);
    let outlet = zone_equipment_outlet_node(zone);
    model.hvac.graph.mark_terminal(inlet);
    model.hvac.graph.mark_terminal(outlet);
    model.hvac.zone_equipment.push(ZoneEquipmentUnit {
        zone: zone.to_string(),
        kind,
        name: format!("{zone}_{kind:?}"),
    });
}

fn build_central_airloop(
    model: &mut Model,
    zones: &[String],
    building_type: BuildingType,
    climate: ClimateZone,
    hvac_type: HvacType,
) -> Result<(), TopologyError> {
    let name = airloop_name().to_string();
    let mut airloop = AirLoop::new(name.clone(), hvac_type);
    airloop.zones = zones.to_vec();
    airloop.advance(AirLoopState::ComponentsCreated)?;

    let has_erv = controllers::erv_eligible(climate);
    let oa_in = oa_intake_node(&name);
    let relief = relief_node(&name);
    let ret = return_node(&name);
    let mixed = mixed_air_node(&name);

    model.hvac.graph.mark_terminal(oa_in.clone());

    if has_erv {
        let hx_supply_out = hx_supply_outlet_node(&name);
        let hx_exhaust_out = hx_exhaust_outlet_node(&name);
        model.hvac.graph.register_inlet(oa_in.clone());
        model.hvac.graph.register_outlet(hx_supply_out.clone());
        model.hvac.graph.register_outlet(relief.clone());
        model.hvac.graph.register_inlet(relief.clone());
        model.hvac.graph.register_outlet(hx_exhaust_out.clone());
        model.hvac.graph.mark_terminal(hx_exhaust_out);
        model.hvac.graph.register_inlet(hx_supply_out);
        model.hvac.graph.register_outlet(mixed.clone());
    } else {
        model.hvac.graph.register_inlet(oa_in.clone());
        model.hvac.graph.register_outlet(mixed.clone());
        model.hvac.graph.mark_terminal(relief.clone());
        model.hvac.graph.register_outlet(relief.clone());
    }
    model.hvac.graph.register_outlet(ret.clone());
    model.hvac.graph.register_inlet(ret);

    model.hvac.graph.register_inlet(mixed);
    let fan_out = fan_outlet_node(&name);
    model.hvac.graph.register_outlet(fan_out.clone());

    model.hvac.graph.register_inlet(fan_out);
    let cool_out = cooling_coil_outlet_node(&name);
    model.hvac.graph.register_outlet(cool_out.clone());

    model.hvac.graph.register_inlet(cool_out);
    let supply_out = supply_outlet_node(&name);
    model.hvac.graph.register_outlet(supply_out.clone());

    model.hvac.graph.register_inlet(supply_out);

    for zone in zones {
        let splitter_out = splitter_outlet_node(zone);
        model.hvac.graph.register_outlet(splitter_out.clone());
        model.hvac.graph.register_inlet(splitter_out);

        let zone_outlet = if matches!(hvac_type, HvacType::Rtu) {
            let out = cav_outlet_node(zone);
            model.hvac.graph.register_outlet(out.clone());
            out
        } else {
            let out = reheat_outlet_node(zone);
            model.hvac.graph.register_outlet(out.clone());
            out
        };
        model.hvac.graph.mark_terminal(zone_outlet);

        let zone_return = zone_return_air_node(zone);
        model.hvac.graph.mark_terminal(zone_return.clone());
        model.hvac.graph.register_inlet(zone_return);
        model.hvac.graph.mark_terminal(zone_air_node(zone));
    }

    airloop.advance(AirLoopState::NodesWired)?;

    airloop.has_economizer = true;
    airloop.has_dcv = controllers::dcv_eligible(building_type, hvac_type);
    airloop.has_erv = has_erv;
    airloop.advance(AirLoopState::ControllersAttached)?;

    for zone in zones {
        airloop.has_daylighting = airloop.has_daylighting
            || (controllers::daylighting_eligible(building_type, zone_has_exterior_window(model, zone)));
    }
    airloop.advance(AirLoopState::ZonesConnected)?;

    airloop.advance(AirLoopState::Validated)?;
    model.hvac.airloops.push(airloop);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SpaceType;
    use crate::defaults::DefaultsLibrary;
    use crate::geometry::Polygon;
    use crate::model::Zone;
    use nalgebra::point;

    fn square_zone(name: &str) -> Zone {
        let poly: Polygon = vec![
            point![0.0, 0.0],
            point![10.0, 0.0],
            point![10.0, 10.0],
            point![0.0, 10.0],
        ];
        Zone::new(name.into(), 0, poly, SpaceType::OfficeOpen, 3.0)
    }

    fn model_with_zones(n: usize) -> (Model, BuildingTemplate) {
        let params = crate::params::resolve_parameters(
            &Default::default(),
            None,
            &DefaultsLibrary::load(),
        )
        .unwrap();
        let mut model = Model::new(None, params);
        for i in 0..n {
            model.zones.push(square_zone(&format!("Zone{i}")));
        }
        let defaults = DefaultsLibrary::load();
        let template = defaults.building_template(BuildingType::Office);
        (model, template)
    }

    #[test]
    fn vav_building_gets_one_central_airloop_serving_all_zones() {
        let (mut model, template) = model_with_zones(3);
        build_hvac(&mut model, &template, BuildingType::Office, ClimateZone::C4, None).unwrap();
        assert_eq!(model.hvac.airloops.len(), 1);
        assert_eq!(model.hvac.airloops[0].state, AirLoopState::Validated);
        assert_eq!(model.hvac.airloops[0].zones.len(), 3);
        assert!(model.hvac.validate_nodes().is_empty());
    }

    #[test]
    fn ptac_building_gets_per_zone_equipment_no_airloop() {
        let (mut model, mut template) = model_with_zones(2);
        template.target_hvac = HvacType::Ptac;
        build_hvac(&mut model, &template, BuildingType::ResidentialMulti, ClimateZone::C4, None).unwrap();
        assert!(model.hvac.airloops.is_empty());
        assert_eq!(model.hvac.zone_equipment.len(), 2);
        assert!(model.hvac.validate_nodes().is_empty());
    }

    #[test]
    fn forced_hvac_type_overrides_template() {
        let (mut model, template) = model_with_zones(1);
        build_hvac(
            &mut model,
            &template,
            BuildingType::Office,
            ClimateZone::C4,
            Some(HvacType::HeatPump),
        )
        .unwrap();
        assert!(model.hvac.airloops.is_empty());
        assert_eq!(model.hvac.zone_equipment[0].kind, ZoneHvacKind::HeatPump);
    }

    #[test]
    fn humid_climate_gets_erv_on_eligible_building() {
        let (mut model, template) = model_with_zones(1);
        build_hvac(&mut model, &template, BuildingType::Office, ClimateZone::C1, None).unwrap();
        assert!(model.hvac.airloops[0].has_erv);
        assert!(model.hvac.validate_nodes().is_empty());
    }

    #[test]
    fn dry_climate_with_no_erv_still_validates() {
        let (mut model, template) = model_with_zones(1);
        build_hvac(&mut model, &template, BuildingType::Office, ClimateZone::C4, None).unwrap();
        assert!(model.hvac.validate_nodes().is_empty());
    }
}
