// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Validador (C7, §4.7): corre tras poblar el modelo y antes de emitir, en
//! cuatro capas. Sintáctica, referencial y topológica bloquean la emisión;
//! física solo adjunta avisos al informe — nunca bloquea.

use crate::defaults::DefaultsRecord;
use crate::error::{CoreError, FieldError, ReferenceError, TopologyError};
use crate::common::{LoadKind, WarningLevel};
use crate::model::{Construction, InfiltrationParams, Material, Model};
use crate::report::Warning;

/// Nombre del horario sintetizado directamente por `idf::lower`, nunca
/// declarado en `model.schedules`: una referencia a él no es colgante.
const ALWAYS_ON_SCHEDULE: &str = "AlwaysOn";

const ZONE_CEILING_HEIGHT_RANGE_M: (f64, f64) = (2.5, 5.0);
const WWR_RANGE: (f64, f64) = (0.0, 0.95);
const INFILTRATION_ACH_RANGE: (f64, f64) = (0.05, 3.0);
const MATERIAL_CONDUCTIVITY_RANGE: (f64, f64) = (0.01, 5.0);
const MATERIAL_DENSITY_RANGE: (f64, f64) = (1.0, 3000.0);
const MATERIAL_SPECIFIC_HEAT_RANGE: (f64, f64) = (100.0, 3000.0);
/// Banda de plausibilidad de densidad de iluminación/equipos respecto al
/// valor de plantilla (§4.7 "Physical"): 0.1x-5x, aviso y no error.
const LOAD_DENSITY_PLAUSIBLE_LOW_MULT: f64 = 0.1;
const LOAD_DENSITY_PLAUSIBLE_HIGH_MULT: f64 = 5.0;

/// Ejecuta las cuatro capas sobre un modelo ya poblado. Devuelve
/// `(errores bloqueantes, avisos)`; nunca entra en pánico.
pub fn validate(model: &Model, defaults: &DefaultsRecord) -> (Vec<CoreError>, Vec<Warning>) {
    let mut errors: Vec<CoreError> = Vec::new();
    let mut warnings: Vec<Warning> = Vec::new();

    syntactic(model, &mut errors);
    reference(model, &mut errors);
    topological(model, &mut errors);
    physical(model, defaults, &mut warnings);

    (errors, warnings)
}

/// Capa 1: todo campo requerido está presente; campos numéricos en rango.
fn syntactic(model: &Model, errors: &mut Vec<CoreError>) {
    for zone in &model.zones {
        if zone.area <= 0.0 {
            errors.push(
                FieldError::OutOfRange {
                    object: zone.name.clone(),
                    field: "floor_area_m2",
                    value: zone.area,
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into(),
            );
        }
    }
    for surface in &model.surfaces {
        if surface.area <= 0.0 {
            errors.push(
                FieldError::OutOfRange {
                    object: surface.name.clone(),
                    field: "area_m2",
                    value: surface.area,
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into(),
            );
        }
    }
    for construction in model.constructions.values() {
        if let Construction::Opaque { name, layers } = construction {
            if layers.is_empty() {
                errors.push(
                    FieldError::MissingRequired {
                        object: name.clone(),
                        field: "layers",
                    }
                    .into(),
                );
            }
        }
    }
    for schedule in model.schedules.values() {
        if !schedule.covers_full_year() {
            errors.push(
                FieldError::MissingRequired {
                    object: schedule.name.clone(),
                    field: "rules",
                }
                .into(),
            );
        }
    }
}

/// Capa 2: toda referencia de nombre resuelve a un objeto existente del tipo
/// esperado; nada de horarios, construcciones, materiales o zonas colgantes.
fn reference(model: &Model, errors: &mut Vec<CoreError>) {
    for surface in &model.surfaces {
        if !model.constructions.contains_key(&surface.construction) {
            errors.push(dangling("Surface", &surface.name, "Construction", &surface.construction));
        }
        if model.zone_by_name(&surface.zone).is_none() {
            errors.push(dangling("Surface", &surface.name, "Zone", &surface.zone));
        }
    }
    for fen in &model.fenestrations {
        if !model.constructions.contains_key(&fen.construction) {
            errors.push(dangling("Fenestration", &fen.name, "Construction", &fen.construction));
        }
        if model.surface_by_name(&fen.parent_surface).is_none() {
            errors.push(dangling("Fenestration", &fen.name, "Surface", &fen.parent_surface));
        }
    }
    for construction in model.constructions.values() {
        if let Construction::Opaque { name, layers } = construction {
            for layer in layers {
                if !model.materials.contains_key(layer) {
                    errors.push(dangling("Construction", name, "Material", layer));
                }
            }
        }
    }
    for load in &model.loads {
        if model.zone_by_name(&load.zone).is_none() {
            errors.push(dangling("InternalLoad", &load.name, "Zone", &load.zone));
        }
        check_schedule_ref(model, "InternalLoad", &load.name, &load.schedule, errors);
        if let Some(activity) = &load.activity_schedule {
            check_schedule_ref(model, "InternalLoad", &load.name, activity, errors);
        }
    }
    for infiltration in &model.infiltrations {
        if model.zone_by_name(&infiltration.zone).is_none() {
            errors.push(dangling("Infiltration", &infiltration.name, "Zone", &infiltration.zone));
        }
        check_schedule_ref(model, "Infiltration", &infiltration.name, &infiltration.schedule, errors);
    }
    for unit in &model.hvac.zone_equipment {
        if model.zone_by_name(&unit.zone).is_none() {
            errors.push(dangling("ZoneEquipmentUnit", &unit.name, "Zone", &unit.zone));
        }
    }
    for airloop in &model.hvac.airloops {
        for zone in &airloop.zones {
            if model.zone_by_name(zone).is_none() {
                errors.push(dangling("AirLoop", &airloop.name, "Zone", zone));
            }
        }
    }
}

fn dangling(kind: &'static str, name: &str, target_kind: &'static str, target_name: &str) -> CoreError {
    ReferenceError::Dangling {
        kind,
        name: name.to_string(),
        target_kind,
        target_name: target_name.to_string(),
    }
    .into()
}

fn check_schedule_ref(
    model: &Model,
    kind: &'static str,
    owner_name: &str,
    schedule_name: &str,
    errors: &mut Vec<CoreError>,
) {
    if schedule_name == ALWAYS_ON_SCHEDULE {
        return;
    }
    if !model.schedules.contains_key(schedule_name) {
        errors.push(dangling(kind, owner_name, "Schedule", schedule_name));
    }
}

/// Capa 3: adyacencia de nodos HVAC (§4.6), toda zona servida exactamente
/// una vez, toda superficie `Surface:<peer>` con pareja recíproca.
fn topological(model: &Model, errors: &mut Vec<CoreError>) {
    for err in model.hvac.validate_nodes() {
        errors.push(err.into());
    }
    for zone in &model.zones {
        if !model.hvac.is_zone_served(&zone.name) {
            errors.push(
                TopologyError::UnconnectedZone {
                    zone: zone.name.clone(),
                }
                .into(),
            );
        }
    }
    for err in model.check_reciprocal_adjacencies() {
        errors.push(err.into());
    }
}

/// Capa 4: rangos de plausibilidad física. Nunca bloquea; todo lo que
/// encuentra se adjunta como aviso al informe.
fn physical(model: &Model, defaults: &DefaultsRecord, warnings: &mut Vec<Warning>) {
    for zone in &model.zones {
        if !in_range(zone.ceiling_height_m, ZONE_CEILING_HEIGHT_RANGE_M) {
            warnings.push(Warning::new(
                WarningLevel::Warning,
                "CEILING_HEIGHT_OUT_OF_RANGE",
                Some(zone.name.clone()),
                format!(
                    "ceiling height {:.2} m outside plausible range [{}, {}]",
                    zone.ceiling_height_m, ZONE_CEILING_HEIGHT_RANGE_M.0, ZONE_CEILING_HEIGHT_RANGE_M.1
                ),
            ));
        }
    }

    if let Some(params) = &model.params {
        const FACADES: [&str; 4] = ["North", "East", "South", "West"];
        for (i, wwr) in params.wwr.iter().enumerate() {
            if !in_range(*wwr, WWR_RANGE) {
                warnings.push(Warning::new(
                    WarningLevel::Warning,
                    "WWR_OUT_OF_RANGE",
                    Some(format!("Facade_{}", FACADES[i])),
                    format!("window-to-wall ratio {:.2} outside [{}, {}]", wwr, WWR_RANGE.0, WWR_RANGE.1),
                ));
            }
        }
    }

    for infiltration in &model.infiltrations {
        if let InfiltrationParams::DesignFlowRate { flow_per_area_m3_s_m2 } = infiltration.params {
            let ceiling_height = model
                .zone_by_name(&infiltration.zone)
                .map(|z| z.ceiling_height_m)
                .unwrap_or(3.0);
            let ach = flow_per_area_m3_s_m2 * 3600.0 / ceiling_height.max(0.1);
            if !in_range(ach, INFILTRATION_ACH_RANGE) {
                warnings.push(Warning::new(
                    WarningLevel::Warning,
                    "INFILTRATION_ACH_OUT_OF_RANGE",
                    Some(infiltration.name.clone()),
                    format!(
                        "derived infiltration {:.2} ACH outside [{}, {}]",
                        ach, INFILTRATION_ACH_RANGE.0, INFILTRATION_ACH_RANGE.1
                    ),
                ));
            }
        }
    }

    for material in model.materials.values() {
        check_material_range(material, "conductivity", material.conductivity, MATERIAL_CONDUCTIVITY_RANGE, warnings);
        check_material_range(material, "density", material.density, MATERIAL_DENSITY_RANGE, warnings);
        check_material_range(
            material,
            "specific_heat",
            material.specific_heat,
            MATERIAL_SPECIFIC_HEAT_RANGE,
            warnings,
        );
    }

    for load in &model.loads {
        let template_value = match load.kind {
            LoadKind::Lights => Some(defaults.template.lighting_w_m2),
            LoadKind::Equipment => Some(defaults.template.equipment_w_m2),
            LoadKind::People => None,
        };
        let template_value = match template_value {
            Some(v) => v,
            None => continue,
        };
        let low = template_value * LOAD_DENSITY_PLAUSIBLE_LOW_MULT;
        let high = template_value * LOAD_DENSITY_PLAUSIBLE_HIGH_MULT;
        if !in_range(load.design_level, (low, high)) {
            warnings.push(Warning::new(
                WarningLevel::Warning,
                "LOAD_DENSITY_IMPLAUSIBLE",
                Some(load.name.clone()),
                format!(
                    "design level {:.2} W/m2 outside plausible [{:.2}, {:.2}] for template default {:.2}",
                    load.design_level, low, high, template_value
                ),
            ));
        }
    }
}

fn in_range(value: f64, range: (f64, f64)) -> bool {
    value >= range.0 && value <= range.1
}

fn check_material_range(
    material: &Material,
    field: &'static str,
    value: f64,
    range: (f64, f64),
    warnings: &mut Vec<Warning>,
) {
    if !in_range(value, range) {
        warnings.push(Warning::new(
            WarningLevel::Warning,
            "MATERIAL_PROPERTY_IMPLAUSIBLE",
            Some(material.name.clone()),
            format!("{} {:.3} outside plausible range [{}, {}]", field, value, range.0, range.1),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BuildingType, ClimateZone, LeedLevel, SpaceType};
    use crate::defaults::DefaultsLibrary;
    use crate::geometry::Polygon;
    use crate::hvac::topology::build_hvac;
    use crate::loads::build_loads;
    use crate::params::resolve_parameters;
    use crate::schedules::build_schedules;
    use crate::zoning::build_zones;
    use crate::rng::ModelRng;
    use nalgebra::point;

    fn built_model(stories: i32, per_story: f64) -> (Model, DefaultsRecord) {
        let user = crate::params::UserBuildingSpec {
            building_type: Some(BuildingType::Office),
            stories: Some(stories),
            floor_area_per_story: Some(per_story),
            leed_level: Some(LeedLevel::None),
            ..Default::default()
        };
        let defaults_lib = DefaultsLibrary::load();
        let params = resolve_parameters(&user, None, &defaults_lib).unwrap();
        let record = defaults_lib.resolve(params.building_type, ClimateZone::C4, None, None, LeedLevel::None);
        let mut model = Model::new(None, params.clone());
        let mut rng = ModelRng::from_resolved_params(&params);
        build_zones(&mut model, &params, None, &record, &mut rng).unwrap();
        build_schedules(&mut model, &[SpaceType::OfficeOpen, SpaceType::Conference, SpaceType::Storage, SpaceType::Lobby, SpaceType::Mechanical], false).unwrap();
        build_loads(&mut model, &record.template, params.effective_year());
        build_hvac(&mut model, &record.template, params.building_type, ClimateZone::C4, None).unwrap();
        (model, record)
    }

    #[test]
    fn well_formed_model_has_no_blocking_errors() {
        let (model, defaults) = built_model(2, 400.0);
        let (errors, _warnings) = validate(&model, &defaults);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn dangling_construction_reference_is_flagged() {
        let (mut model, defaults) = built_model(1, 300.0);
        model.surfaces[0].construction = "NoSuchConstruction".to_string();
        let (errors, _warnings) = validate(&model, &defaults);
        assert!(errors.iter().any(|e| matches!(e, CoreError::Reference(ReferenceError::Dangling { .. }))));
    }

    #[test]
    fn unconnected_zone_is_flagged_as_topology_error() {
        let (mut model, defaults) = built_model(1, 300.0);
        model.zones.push(orphan_zone());
        let (errors, _warnings) = validate(&model, &defaults);
        assert!(errors.iter().any(|e| matches!(e, CoreError::Topology(TopologyError::UnconnectedZone { .. }))));
    }

    fn orphan_zone() -> crate::model::Zone {
        let poly: Polygon = vec![
            point![0.0, 0.0],
            point![5.0, 0.0],
            point![5.0, 5.0],
            point![0.0, 5.0],
        ];
        crate::model::Zone::new("Orphan_Zone".into(), 0, poly, SpaceType::OfficeOpen, 3.0)
    }

    #[test]
    fn extreme_wwr_is_a_warning_not_an_error() {
        let user = crate::params::UserBuildingSpec {
            building_type: Some(BuildingType::Office),
            stories: Some(1),
            floor_area_per_story: Some(300.0),
            wwr: Some([0.99, 0.4, 0.4, 0.4]),
            leed_level: Some(LeedLevel::None),
            ..Default::default()
        };
        let defaults_lib = DefaultsLibrary::load();
        let params = resolve_parameters(&user, None, &defaults_lib).unwrap();
        let record = defaults_lib.resolve(params.building_type, ClimateZone::C4, None, None, LeedLevel::None);
        let mut model = Model::new(None, params.clone());
        let mut rng = ModelRng::from_resolved_params(&params);
        build_zones(&mut model, &params, None, &record, &mut rng).unwrap();
        build_schedules(&mut model, &[SpaceType::OfficeOpen, SpaceType::Conference, SpaceType::Storage, SpaceType::Lobby, SpaceType::Mechanical], false).unwrap();
        build_loads(&mut model, &record.template, params.effective_year());
        build_hvac(&mut model, &record.template, params.building_type, ClimateZone::C4, None).unwrap();

        let (errors, warnings) = validate(&model, &record);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.code == "WWR_OUT_OF_RANGE"));
    }
}
