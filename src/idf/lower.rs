// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Paso de bajada Modelo → objetos IDF (C1+C6, §4.1, §4.6): construye cada
//! [`IdfObject`] concreto a partir del [`Model`] ya poblado por C3-C6.
//!
//! No valida nada (esa es responsabilidad de C7, §4.7): asume que `model` ya
//! superó `check_reciprocal_adjacencies`/`validate_nodes`. Reutiliza siempre
//! las mismas funciones de nombre de nodo que [`crate::hvac::topology`] usó
//! para levantar el grafo, de modo que la validación de topología y el IDF
//! emitido nunca puedan divergir.

use crate::common::{BoundaryType, BuildingType, ClimateZone, HvacType, LoadKind};
use crate::defaults::DefaultsRecord;
use crate::hvac::controllers;
use crate::hvac::graph::{AirLoop, ZoneEquipmentUnit, ZoneHvacKind};
use crate::hvac::sizing::{size_airloop, size_zone};
use crate::hvac::topology;
use crate::model::{Construction, InfiltrationParams, Model};
use crate::params::BuildingParameters;

use super::objects::*;

/// Horario constante referenciado por infiltración (y, en el airloop
/// central, por los controladores de ventilación) que nunca se declara en
/// `model.schedules`: es un artefacto de bajada, no del modelo de dominio.
const ALWAYS_ON_SCHEDULE: &str = "AlwaysOn";
const IDF_VERSION: &str = "24.2";

/// Baja el modelo completo a la secuencia de objetos IDF que el emisor (C1)
/// serializará, en el orden en que cada subsistema los construye. El orden
/// final de salida lo decide `emit`, no esta función.
pub fn lower(model: &Model, defaults: &DefaultsRecord) -> Vec<IdfObject> {
    let params = model
        .params
        .as_ref()
        .expect("BuildingParameters se resuelve en C3 antes de llegar a C1");
    let climate = model
        .site
        .as_ref()
        .map(|s| s.climate_zone)
        .unwrap_or(ClimateZone::C4);

    let mut out = Vec::new();
    push_header(&mut out, model, params);
    push_schedules(&mut out, model);
    push_materials_and_constructions(&mut out, model);
    push_zones_and_surfaces(&mut out, model);
    push_loads_and_infiltration(&mut out, model);
    push_hvac(&mut out, model, defaults, params.building_type, climate);
    out
}

fn push_header(out: &mut Vec<IdfObject>, model: &Model, params: &BuildingParameters) {
    out.push(IdfObject::Version(Version {
        version_identifier: IDF_VERSION.to_string(),
    }));
    out.push(IdfObject::SimulationControl(SimulationControl {
        do_zone_sizing: true,
        do_system_sizing: true,
        do_plant_sizing: true,
        run_for_sizing_periods: false,
        run_for_run_periods: true,
    }));
    out.push(IdfObject::Building(Building {
        name: format!("{}_Building", params.building_type),
        north_axis_deg: 0.0,
        terrain: "City".to_string(),
        loads_convergence_tolerance: 0.04,
        temperature_convergence_tolerance: 0.4,
        solar_distribution: "FullExterior".to_string(),
        max_warmup_days: 25,
        min_warmup_days: 6,
    }));
    out.push(IdfObject::Timestep(Timestep { timesteps_per_hour: 4 }));

    if let Some(site) = &model.site {
        out.push(IdfObject::SiteLocation(SiteLocation {
            name: format!("{}_Site", params.building_type),
            latitude: site.latitude,
            longitude: site.longitude,
            time_zone: site.time_zone,
            elevation_m: site.elevation_m,
        }));
    }

    out.push(IdfObject::RunPeriod(RunPeriod {
        name: "AnnualRun".to_string(),
        begin_month: 1,
        begin_day: 1,
        end_month: 12,
        end_day: 31,
    }));

    out.push(IdfObject::GlobalGeometryRules(GlobalGeometryRules {
        starting_vertex_position: "UpperLeftCorner".to_string(),
        vertex_entry_direction: "Counterclockwise".to_string(),
        coordinate_system: "Relative".to_string(),
    }));
}

fn schedule_type_limits_name(t: crate::common::ScheduleType) -> &'static str {
    use crate::common::ScheduleType::*;
    match t {
        Fraction => "Fraction",
        Temperature => "Temperature",
        OnOff => "OnOff",
        ActivityLevel => "ActivityLevel",
    }
}

fn schedule_type_limits_def(name: &'static str) -> ScheduleTypeLimits {
    match name {
        "Fraction" => ScheduleTypeLimits {
            name: name.into(),
            lower_limit: Some(0.0),
            upper_limit: Some(1.0),
            numeric_type: "Continuous".into(),
        },
        "Temperature" => ScheduleTypeLimits {
            name: name.into(),
            lower_limit: Some(-60.0),
            upper_limit: Some(200.0),
            numeric_type: "Continuous".into(),
        },
        "OnOff" => ScheduleTypeLimits {
            name: name.into(),
            lower_limit: Some(0.0),
            upper_limit: Some(1.0),
            numeric_type: "Discrete".into(),
        },
        "ActivityLevel" => ScheduleTypeLimits {
            name: name.into(),
            lower_limit: Some(0.0),
            upper_limit: Some(1000.0),
            numeric_type: "Continuous".into(),
        },
        other => unreachable!("tipo de horario desconocido: {other}"),
    }
}

/// Declara `ScheduleTypeLimits` (uno por tipo realmente usado, incluyendo
/// `OnOff` para el horario sintético `AlwaysOn`) y un `Schedule:Compact` por
/// cada entrada de `model.schedules`, más el propio `AlwaysOn`.
fn push_schedules(out: &mut Vec<IdfObject>, model: &Model) {
    let mut limits_seen: Vec<&'static str> = vec!["OnOff"];
    out.push(IdfObject::ScheduleTypeLimits(schedule_type_limits_def("OnOff")));
    out.push(IdfObject::ScheduleCompact(ScheduleCompact {
        name: ALWAYS_ON_SCHEDULE.to_string(),
        schedule_type_limits: "OnOff".to_string(),
        periods: vec![CompactSchedulePeriod {
            through: "12/31".to_string(),
            day_types: vec![("AllDays".to_string(), vec![("24:00".to_string(), 1.0)])],
        }],
    }));

    for schedule in model.schedules.values() {
        let limits_name = schedule_type_limits_name(schedule.schedule_type);
        if !limits_seen.contains(&limits_name) {
            limits_seen.push(limits_name);
            out.push(IdfObject::ScheduleTypeLimits(schedule_type_limits_def(limits_name)));
        }
        out.push(IdfObject::ScheduleCompact(ScheduleCompact {
            name: schedule.name.clone(),
            schedule_type_limits: limits_name.to_string(),
            periods: schedule
                .rules
                .iter()
                .map(|rule| CompactSchedulePeriod {
                    through: day_of_year_to_through(rule.day_of_year_range.1),
                    day_types: vec![(rule.day_type.clone(), hourly_runs(&rule.hourly_values))],
                })
                .collect(),
        }));
    }
}

/// Convierte un día del año (1-365, año no bisiesto) a la cadena "M/D" que
/// exige el campo `Through:` de `Schedule:Compact`.
fn day_of_year_to_through(doy: u32) -> String {
    const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut remaining = doy;
    for (i, len) in MONTH_LENGTHS.iter().enumerate() {
        if remaining <= *len {
            return format!("{}/{}", i + 1, remaining);
        }
        remaining -= len;
    }
    "12/31".to_string()
}

/// Comprime 24 valores horarios en tramos `Until:` contiguos de igual valor.
fn hourly_runs(values: &[f64; 24]) -> Vec<(String, f64)> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    for h in 1..=24usize {
        let same = h < 24 && (values[h] - values[start]).abs() < 1e-9;
        if !same {
            runs.push((format!("{h:02}:00"), values[start]));
            start = h;
        }
    }
    runs
}

fn push_materials_and_constructions(out: &mut Vec<IdfObject>, model: &Model) {
    for material in model.materials.values() {
        out.push(IdfObject::Material(MaterialObj {
            name: material.name.clone(),
            roughness: material.roughness.clone(),
            thickness_m: material.thickness_m,
            conductivity: material.conductivity,
            density: material.density,
            specific_heat: material.specific_heat,
        }));
    }
    for construction in model.constructions.values() {
        match construction {
            Construction::Opaque { name, layers } => {
                out.push(IdfObject::Construction(ConstructionObj {
                    name: name.clone(),
                    layers: layers.clone(),
                }));
            }
            Construction::Glazing { name, glazing } => {
                let glazing_material_name = format!("{name}_Glazing");
                out.push(IdfObject::WindowMaterialSimpleGlazingSystem(SimpleGlazingSystem {
                    name: glazing_material_name.clone(),
                    u_factor: glazing.u_factor,
                    shgc: glazing.shgc,
                    visible_transmittance: glazing.visible_transmittance,
                }));
                out.push(IdfObject::Construction(ConstructionObj {
                    name: name.clone(),
                    layers: vec![glazing_material_name],
                }));
            }
        }
    }
}

fn push_zones_and_surfaces(out: &mut Vec<IdfObject>, model: &Model) {
    for zone in &model.zones {
        out.push(IdfObject::Zone(ZoneObj {
            name: zone.name.clone(),
            direction_of_relative_north_deg: 0.0,
            x_origin: 0.0,
            y_origin: 0.0,
            z_origin: 0.0,
            ceiling_height_m: Num::Value(zone.ceiling_height_m),
            volume_m3: Num::Value(zone.volume_m3),
            floor_area_m2: Num::Value(zone.area),
        }));
    }
    for surface in &model.surfaces {
        let (sun_exposure, wind_exposure) = match surface.boundary {
            BoundaryType::Outdoors => ("SunExposed", "WindExposed"),
            _ => ("NoSun", "NoWind"),
        };
        out.push(IdfObject::BuildingSurfaceDetailed(BuildingSurfaceDetailed {
            name: surface.name.clone(),
            surface_type: surface.kind.to_string(),
            construction: surface.construction.clone(),
            zone: surface.zone.clone(),
            outside_boundary_condition: surface.boundary.idd_token().to_string(),
            outside_boundary_condition_object: surface.boundary.peer().unwrap_or("").to_string(),
            sun_exposure: sun_exposure.to_string(),
            wind_exposure: wind_exposure.to_string(),
            view_factor_to_ground: Num::Blank,
            vertices: surface.polygon.iter().map(|p| (p.x, p.y, p.z)).collect(),
        }));
    }
    for fen in &model.fenestrations {
        out.push(IdfObject::FenestrationSurfaceDetailed(FenestrationSurfaceDetailed {
            name: fen.name.clone(),
            surface_type: "Window".to_string(),
            construction: fen.construction.clone(),
            building_surface: fen.parent_surface.clone(),
            view_factor_to_ground: Num::Blank,
            vertices: fen.polygon.iter().map(|p| (p.x, p.y, p.z)).collect(),
        }));
    }
}

fn push_loads_and_infiltration(out: &mut Vec<IdfObject>, model: &Model) {
    for load in &model.loads {
        match load.kind {
            LoadKind::People => out.push(IdfObject::People(PeopleObj {
                name: load.name.clone(),
                zone: load.zone.clone(),
                occupancy_schedule: load.schedule.clone(),
                number_of_people_calc_method: "People/Area".to_string(),
                number_of_people: Num::Blank,
                people_per_area: Num::Value(load.design_level),
                fraction_radiant: load.radiant_fraction,
                activity_schedule: load.activity_schedule.clone().unwrap_or_default(),
            })),
            LoadKind::Lights => out.push(IdfObject::Lights(LightsObj {
                name: load.name.clone(),
                zone: load.zone.clone(),
                schedule: load.schedule.clone(),
                design_level_calc_method: "Watts/Area".to_string(),
                lighting_level_w: Num::Blank,
                watts_per_area: Num::Value(load.design_level),
                fraction_radiant: load.radiant_fraction,
                fraction_visible: load.visible_fraction,
            })),
            LoadKind::Equipment => out.push(IdfObject::ElectricEquipment(ElectricEquipmentObj {
                name: load.name.clone(),
                zone: load.zone.clone(),
                schedule: load.schedule.clone(),
                design_level_calc_method: "Watts/Area".to_string(),
                design_level_w: Num::Blank,
                watts_per_area: Num::Value(load.design_level),
                fraction_radiant: load.radiant_fraction,
                fraction_latent: load.latent_fraction,
            })),
        }
    }

    for infiltration in &model.infiltrations {
        match infiltration.params {
            InfiltrationParams::DesignFlowRate { flow_per_area_m3_s_m2 } => {
                out.push(IdfObject::ZoneInfiltrationDesignFlowRate(ZoneInfiltrationDesignFlowRate {
                    name: infiltration.name.clone(),
                    zone: infiltration.zone.clone(),
                    schedule: infiltration.schedule.clone(),
                    calc_method: "Flow/Area".to_string(),
                    flow_per_zone_area: flow_per_area_m3_s_m2,
                }));
            }
            InfiltrationParams::EffectiveLeakageArea {
                ela_cm2,
                stack_coeff,
                wind_coeff,
            } => {
                out.push(IdfObject::ZoneInfiltrationEffectiveLeakageArea(
                    ZoneInfiltrationEffectiveLeakageArea {
                        name: infiltration.name.clone(),
                        zone: infiltration.zone.clone(),
                        schedule: infiltration.schedule.clone(),
                        effective_leakage_area_cm2: ela_cm2,
                        stack_coefficient: stack_coeff,
                        wind_coefficient: wind_coeff,
                    },
                ));
            }
        }
    }
}

fn push_hvac(
    out: &mut Vec<IdfObject>,
    model: &Model,
    defaults: &DefaultsRecord,
    building_type: BuildingType,
    climate: ClimateZone,
) {
    for unit in &model.hvac.zone_equipment {
        push_zone_equipment_unit(out, model, defaults, unit);
    }
    for airloop in &model.hvac.airloops {
        push_central_airloop(out, model, defaults, building_type, climate, airloop);
    }
}

fn push_zone_equipment_unit(
    out: &mut Vec<IdfObject>,
    model: &Model,
    defaults: &DefaultsRecord,
    unit: &ZoneEquipmentUnit,
) {
    let zone = model
        .zone_by_name(&unit.zone)
        .expect("toda zona de equipo autónomo existe en model.zones (build_hvac la registró)");
    let sizing = size_zone(zone.area, &defaults.template);
    let inlet = topology::zone_equipment_inlet_node(&unit.zone);
    let outlet = topology::zone_equipment_outlet_node(&unit.zone);

    let equipment_type = match unit.kind {
        ZoneHvacKind::Ptac => "ZoneHVAC:PackagedTerminalAirConditioner",
        ZoneHvacKind::HeatPump => "ZoneHVAC:PackagedTerminalHeatPump",
        ZoneHvacKind::IdealLoads => "ZoneHVAC:IdealLoadsAirSystem",
    };

    match unit.kind {
        ZoneHvacKind::IdealLoads => {
            out.push(IdfObject::ZoneHvacIdealLoadsAirSystem(ZoneHvacIdealLoadsAirSystem {
                name: unit.name.clone(),
                availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                zone_supply_air_node: outlet.clone(),
                zone_exhaust_air_node: inlet.clone(),
                max_heating_supply_air_temp: 50.0,
                min_cooling_supply_air_temp: 13.0,
            }));
        }
        ZoneHvacKind::Ptac | ZoneHvacKind::HeatPump => {
            let fan_out = format!("{}_FanOut", unit.zone);
            let cool_out = format!("{}_CoolOut", unit.zone);
            let fan_name = format!("{}_Fan", unit.name);
            let cool_name = format!("{}_CoolCoil", unit.name);

            out.push(IdfObject::FanConstantVolume(FanConstantVolume {
                name: fan_name.clone(),
                availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                fan_total_efficiency: 0.6,
                pressure_rise_pa: defaults.hvac.fan_pressure_rise_pa,
                max_flow_rate: Num::Value(sizing.supply_airflow_m3_s),
                air_inlet_node: inlet.clone(),
                air_outlet_node: fan_out.clone(),
            }));
            out.push(IdfObject::CoilCoolingDxSingleSpeed(CoilCoolingDxSingleSpeed {
                name: cool_name.clone(),
                availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                rated_cop: defaults.hvac.cooling_cop,
                rated_total_capacity: Num::Value(sizing.cooling_load_w),
                rated_air_flow_rate: Num::Value(sizing.supply_airflow_m3_s),
                air_inlet_node: fan_out.clone(),
                air_outlet_node: cool_out.clone(),
            }));

            match unit.kind {
                ZoneHvacKind::Ptac => {
                    let heat_name = format!("{}_HeatCoil", unit.name);
                    out.push(IdfObject::CoilHeatingElectric(CoilHeatingElectric(CoilElectricFields {
                        name: heat_name.clone(),
                        availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                        efficiency: defaults.hvac.heating_eff,
                        nominal_capacity: Num::Value(sizing.heating_load_w),
                        air_inlet_node: cool_out.clone(),
                        air_outlet_node: outlet.clone(),
                    })));
                    out.push(IdfObject::ZoneHvacPackagedTerminalAirConditioner(
                        ZoneHvacPackagedTerminalAirConditioner {
                            name: unit.name.clone(),
                            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                            air_inlet_node: inlet.clone(),
                            air_outlet_node: outlet.clone(),
                            fan_name,
                            cooling_coil_name: cool_name,
                            heating_coil_name: heat_name,
                            max_air_flow_rate: Num::Value(sizing.supply_airflow_m3_s),
                        },
                    ));
                }
                ZoneHvacKind::HeatPump => {
                    let heat_out = format!("{}_HeatOut", unit.zone);
                    let heat_name = format!("{}_HeatCoil", unit.name);
                    let supp_name = format!("{}_SupplementalHeatCoil", unit.name);
                    out.push(IdfObject::CoilHeatingDxSingleSpeed(CoilHeatingDxSingleSpeed {
                        name: heat_name.clone(),
                        availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                        rated_cop: defaults.hvac.heating_eff * 3.0,
                        rated_total_heating_capacity: Num::Value(sizing.heating_load_w),
                        rated_air_flow_rate: Num::Value(sizing.supply_airflow_m3_s),
                        air_inlet_node: cool_out.clone(),
                        air_outlet_node: heat_out.clone(),
                    }));
                    out.push(IdfObject::CoilHeatingElectric(CoilHeatingElectric(CoilElectricFields {
                        name: supp_name.clone(),
                        availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                        efficiency: 1.0,
                        nominal_capacity: Num::Value(sizing.heating_load_w),
                        air_inlet_node: heat_out.clone(),
                        air_outlet_node: outlet.clone(),
                    })));
                    out.push(IdfObject::ZoneHvacPackagedTerminalHeatPump(
                        ZoneHvacPackagedTerminalHeatPump {
                            name: unit.name.clone(),
                            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                            air_inlet_node: inlet.clone(),
                            air_outlet_node: outlet.clone(),
                            fan_name,
                            heating_coil_name: heat_name,
                            cooling_coil_name: cool_name,
                            supplemental_heating_coil_name: supp_name,
                            max_air_flow_rate: Num::Value(sizing.supply_airflow_m3_s),
                        },
                    ));
                }
                ZoneHvacKind::IdealLoads => unreachable!("filtrado por el match externo"),
            }
        }
    }

    push_zone_equipment_connections(out, &unit.zone, &unit.name, &inlet, &outlet, equipment_type);
}

fn push_zone_equipment_connections(
    out: &mut Vec<IdfObject>,
    zone: &str,
    equipment_name: &str,
    inlet: &str,
    outlet: &str,
    equipment_type: &str,
) {
    let list_name = format!("{zone}_EquipmentList");
    out.push(IdfObject::ZoneHvacEquipmentList(ZoneHvacEquipmentList {
        name: list_name.clone(),
        entries: vec![ZoneHvacEquipmentListEntry {
            equipment_object_type: equipment_type.to_string(),
            equipment_name: equipment_name.to_string(),
            cooling_sequence: 1,
            heating_sequence: 1,
        }],
    }));
    out.push(IdfObject::ZoneHvacEquipmentConnections(ZoneHvacEquipmentConnections {
        zone: zone.to_string(),
        equipment_list: list_name,
        zone_air_inlet_node_list: outlet.to_string(),
        zone_air_exhaust_node_list: String::new(),
        zone_air_node: topology::zone_air_node(zone),
        zone_return_air_node: inlet.to_string(),
    }));
}

/// Construye todos los objetos de un airloop central: sección de aire
/// exterior (mezclador, opcionalmente ERV, controladores), ventilador,
/// baterías, ramas, divisor/mezclador de zona, cajas de zona y gestores de
/// consigna, en ese orden.
fn push_central_airloop(
    out: &mut Vec<IdfObject>,
    model: &Model,
    defaults: &DefaultsRecord,
    building_type: BuildingType,
    climate: ClimateZone,
    airloop: &AirLoop,
) {
    let name = &airloop.name;
    let oa_in = topology::oa_intake_node(name);
    let relief = topology::relief_node(name);
    let ret = topology::return_node(name);
    let mixed = topology::mixed_air_node(name);
    let fan_out = topology::fan_outlet_node(name);
    let cool_out = topology::cooling_coil_outlet_node(name);
    let supply_out = topology::supply_outlet_node(name);

    let sizing_all = size_airloop(
        model
            .zones
            .iter()
            .filter(|z| airloop.zones.contains(&z.name))
            .map(|z| &z.area),
        &defaults.template,
    );

    // --- Sección de aire exterior: mezclador (+ ERV opcional) y controladores. ---
    let mixer_name = format!("{name}_OAMixer");
    let mut oa_components: Vec<(String, String)> = Vec::new();

    if airloop.has_erv {
        let hx_supply_out = topology::hx_supply_outlet_node(name);
        let hx_exhaust_out = topology::hx_exhaust_outlet_node(name);
        let hx_name = format!("{name}_ERV");
        out.push(IdfObject::HeatExchangerAirToAirSensibleAndLatent(
            HeatExchangerAirToAirSensibleAndLatent {
                name: hx_name.clone(),
                availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                nominal_supply_air_flow_rate: Num::Value(sizing_all.supply_airflow_m3_s),
                sensible_effectiveness_100: controllers::ERV_SENSIBLE_EFFECTIVENESS,
                latent_effectiveness_100: controllers::ERV_LATENT_EFFECTIVENESS,
                supply_air_inlet_node: oa_in.clone(),
                supply_air_outlet_node: hx_supply_out.clone(),
                exhaust_air_inlet_node: relief.clone(),
                exhaust_air_outlet_node: hx_exhaust_out,
            },
        ));
        oa_components.push(("HeatExchanger:AirToAir:SensibleAndLatent".to_string(), hx_name));
        out.push(IdfObject::OutdoorAirMixer(OutdoorAirMixer {
            name: mixer_name.clone(),
            mixed_air_node: mixed.clone(),
            outdoor_air_stream_node: hx_supply_out,
            relief_air_stream_node: relief.clone(),
            return_air_stream_node: ret.clone(),
        }));
    } else {
        out.push(IdfObject::OutdoorAirMixer(OutdoorAirMixer {
            name: mixer_name.clone(),
            mixed_air_node: mixed.clone(),
            outdoor_air_stream_node: oa_in.clone(),
            relief_air_stream_node: relief.clone(),
            return_air_stream_node: ret.clone(),
        }));
    }
    oa_components.push(("OutdoorAir:Mixer".to_string(), mixer_name));

    let oa_equipment_list_name = format!("{name}_OAEquipment");
    out.push(IdfObject::OutdoorAirEquipmentList(OutdoorAirEquipmentListObj {
        name: oa_equipment_list_name.clone(),
        components: oa_components,
    }));

    let oa_controller_name = format!("{name}_OAController");
    out.push(IdfObject::ControllerOutdoorAir(ControllerOutdoorAir {
        name: oa_controller_name.clone(),
        relief_air_outlet_node: relief.clone(),
        return_air_node: ret.clone(),
        mixed_air_node: mixed.clone(),
        actuator_node: oa_in.clone(),
        minimum_outdoor_air_flow_rate: Num::Autosize,
        maximum_outdoor_air_flow_rate: Num::Autosize,
        economizer_control_type: controllers::economizer_type(climate).to_string(),
        lockout_type: "LockoutWithHeating".to_string(),
        minimum_limit_type: "FixedMinimum".to_string(),
    }));

    let mut controller_list_entries = vec![("Controller:OutdoorAir".to_string(), oa_controller_name)];
    if airloop.has_dcv {
        let mech_vent_name = format!("{name}_MechVent");
        out.push(IdfObject::ControllerMechanicalVentilation(ControllerMechanicalVentilation {
            name: mech_vent_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            demand_controlled_ventilation: "Yes".to_string(),
            system_outdoor_air_method: "VentilationRateProcedure".to_string(),
        }));
        controller_list_entries.push(("Controller:MechanicalVentilation".to_string(), mech_vent_name));
    }
    let controller_list_name = format!("{name}_ControllerList");
    out.push(IdfObject::ControllerList(ControllerListObj {
        name: controller_list_name.clone(),
        controllers: controller_list_entries,
    }));

    let oa_system_name = format!("{name}_OASystem");
    out.push(IdfObject::AirLoopHVACOutdoorAirSystem(AirLoopHVACOutdoorAirSystem {
        name: oa_system_name.clone(),
        controller_list: controller_list_name.clone(),
        outdoor_air_equipment_list: oa_equipment_list_name,
    }));

    // --- Ventilador y baterías centrales. ---
    let fan_name = format!("{name}_SupplyFan");
    let fan_object_type = if matches!(airloop.hvac_type, HvacType::Vav) {
        out.push(IdfObject::FanVariableVolume(FanVariableVolume {
            name: fan_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            fan_total_efficiency: 0.65,
            pressure_rise_pa: defaults.hvac.fan_pressure_rise_pa,
            max_flow_rate: Num::Value(sizing_all.supply_airflow_m3_s),
            air_inlet_node: mixed.clone(),
            air_outlet_node: fan_out.clone(),
        }));
        "Fan:VariableVolume"
    } else {
        out.push(IdfObject::FanConstantVolume(FanConstantVolume {
            name: fan_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            fan_total_efficiency: 0.65,
            pressure_rise_pa: defaults.hvac.fan_pressure_rise_pa,
            max_flow_rate: Num::Value(sizing_all.supply_airflow_m3_s),
            air_inlet_node: mixed.clone(),
            air_outlet_node: fan_out.clone(),
        }));
        "Fan:ConstantVolume"
    };

    let cool_name = format!("{name}_CoolCoil");
    let heat_name = format!("{name}_HeatCoil");
    let (cool_object_type, heat_object_type) = if matches!(airloop.hvac_type, HvacType::ChilledWater) {
        out.push(IdfObject::CoilCoolingWater(CoilCoolingWater {
            name: cool_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            design_water_flow_rate: Num::Autosize,
            design_air_flow_rate: Num::Value(sizing_all.supply_airflow_m3_s),
            water_inlet_node: format!("{name}_ChwSupplyIn"),
            water_outlet_node: format!("{name}_ChwSupplyOut"),
            air_inlet_node: fan_out.clone(),
            air_outlet_node: cool_out.clone(),
        }));
        out.push(IdfObject::CoilHeatingWater(CoilHeatingWater {
            name: heat_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            u_factor_times_area: Num::Autosize,
            max_water_flow_rate: Num::Autosize,
            water_inlet_node: format!("{name}_HwSupplyIn"),
            water_outlet_node: format!("{name}_HwSupplyOut"),
            air_inlet_node: cool_out.clone(),
            air_outlet_node: supply_out.clone(),
        }));
        ("Coil:Cooling:Water", "Coil:Heating:Water")
    } else {
        out.push(IdfObject::CoilCoolingDxSingleSpeed(CoilCoolingDxSingleSpeed {
            name: cool_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            rated_cop: defaults.hvac.cooling_cop,
            rated_total_capacity: Num::Value(sizing_all.cooling_load_w),
            rated_air_flow_rate: Num::Value(sizing_all.supply_airflow_m3_s),
            air_inlet_node: fan_out.clone(),
            air_outlet_node: cool_out.clone(),
        }));
        out.push(IdfObject::CoilHeatingElectric(CoilHeatingElectric(CoilElectricFields {
            name: heat_name.clone(),
            availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
            efficiency: defaults.hvac.heating_eff,
            nominal_capacity: Num::Value(sizing_all.heating_load_w),
            air_inlet_node: cool_out.clone(),
            air_outlet_node: supply_out.clone(),
        })));
        ("Coil:Cooling:DX:SingleSpeed", "Coil:Heating:Electric")
    };

    let branch_name = format!("{name}_MainBranch");
    out.push(IdfObject::Branch(BranchObj {
        name: branch_name.clone(),
        components: vec![
            BranchComponent {
                object_type: "AirLoopHVAC:OutdoorAirSystem".to_string(),
                object_name: oa_system_name,
                inlet_node: ret.clone(),
                outlet_node: mixed.clone(),
            },
            BranchComponent {
                object_type: fan_object_type.to_string(),
                object_name: fan_name,
                inlet_node: mixed,
                outlet_node: fan_out.clone(),
            },
            BranchComponent {
                object_type: cool_object_type.to_string(),
                object_name: cool_name,
                inlet_node: fan_out,
                outlet_node: cool_out.clone(),
            },
            BranchComponent {
                object_type: heat_object_type.to_string(),
                object_name: heat_name,
                inlet_node: cool_out,
                outlet_node: supply_out.clone(),
            },
        ],
    }));
    let branch_list_name = format!("{name}_BranchList");
    out.push(IdfObject::BranchList(BranchListObj {
        name: branch_list_name.clone(),
        branch_names: vec![branch_name],
    }));

    out.push(IdfObject::AirLoopHVAC(AirLoopHVACObj {
        name: name.clone(),
        controller_list: controller_list_name,
        availability_manager_list: String::new(),
        design_supply_air_flow_rate: Num::Value(sizing_all.supply_airflow_m3_s),
        branch_list: branch_list_name,
        supply_side_inlet_node: ret.clone(),
        demand_side_outlet_node: ret.clone(),
        demand_side_inlet_node_names: supply_out.clone(),
        supply_side_outlet_node_names: supply_out.clone(),
    }));

    // --- Lado de zona: divisor, cajas, mezclador. ---
    let mut splitter_outlets = Vec::new();
    let mut mixer_inlets = Vec::new();

    for zone in &airloop.zones {
        let splitter_out = topology::splitter_outlet_node(zone);
        splitter_outlets.push(splitter_out.clone());

        let zone_return = topology::zone_return_air_node(zone);
        mixer_inlets.push(zone_return.clone());

        let adu_name = format!("{zone}_ADU");
        let (terminal_object_type, terminal_name, adu_outlet) = if matches!(airloop.hvac_type, HvacType::Rtu) {
            let cav_out = topology::cav_outlet_node(zone);
            let terminal_name = format!("{zone}_Terminal");
            out.push(IdfObject::AirTerminalSingleDuctConstantVolumeNoReheat(
                AirTerminalSingleDuctConstantVolumeNoReheat {
                    name: terminal_name.clone(),
                    availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                    air_inlet_node: splitter_out.clone(),
                    air_outlet_node: cav_out.clone(),
                    max_air_flow_rate: Num::Autosize,
                },
            ));
            ("AirTerminal:SingleDuct:ConstantVolume:NoReheat", terminal_name, cav_out)
        } else {
            let damper_out = format!("{zone}_DamperOut");
            let reheat_out = topology::reheat_outlet_node(zone);
            let terminal_name = format!("{zone}_Terminal");
            let reheat_coil_name = format!("{zone}_ReheatCoil");
            out.push(IdfObject::CoilHeatingElectric(CoilHeatingElectric(CoilElectricFields {
                name: reheat_coil_name.clone(),
                availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                efficiency: defaults.hvac.heating_eff,
                nominal_capacity: Num::Autosize,
                air_inlet_node: damper_out.clone(),
                air_outlet_node: reheat_out.clone(),
            })));
            out.push(IdfObject::AirTerminalSingleDuctVavReheat(AirTerminalSingleDuctVavReheat {
                name: terminal_name.clone(),
                availability_schedule: ALWAYS_ON_SCHEDULE.to_string(),
                damper_air_outlet_node: damper_out,
                air_inlet_node: splitter_out.clone(),
                max_air_flow_rate: Num::Autosize,
                reheat_coil_name,
                reheat_coil_air_outlet_node: reheat_out.clone(),
            }));
            ("AirTerminal:SingleDuct:VAV:Reheat", terminal_name, reheat_out)
        };

        out.push(IdfObject::ZoneHvacAirDistributionUnit(ZoneHvacAirDistributionUnit {
            name: adu_name.clone(),
            air_outlet_node: adu_outlet.clone(),
            air_terminal_object_type: terminal_object_type.to_string(),
            air_terminal_name: terminal_name,
        }));

        out.push(IdfObject::Branch(BranchObj {
            name: format!("{zone}_TerminalBranch"),
            components: vec![BranchComponent {
                object_type: "ZoneHVAC:AirDistributionUnit".to_string(),
                object_name: adu_name.clone(),
                inlet_node: splitter_out,
                outlet_node: adu_outlet.clone(),
            }],
        }));

        let zone_equipment_list_name = format!("{zone}_EquipmentList");
        out.push(IdfObject::ZoneHvacEquipmentList(ZoneHvacEquipmentList {
            name: zone_equipment_list_name.clone(),
            entries: vec![ZoneHvacEquipmentListEntry {
                equipment_object_type: "ZoneHVAC:AirDistributionUnit".to_string(),
                equipment_name: adu_name,
                cooling_sequence: 1,
                heating_sequence: 1,
            }],
        }));
        out.push(IdfObject::ZoneHvacEquipmentConnections(ZoneHvacEquipmentConnections {
            zone: zone.clone(),
            equipment_list: zone_equipment_list_name,
            zone_air_inlet_node_list: adu_outlet,
            zone_air_exhaust_node_list: String::new(),
            zone_air_node: topology::zone_air_node(zone),
            zone_return_air_node: zone_return,
        }));

        if airloop.has_daylighting
            && controllers::daylighting_eligible(building_type, topology::zone_has_exterior_window(model, zone))
        {
            let ref_point_name = format!("{zone}_DaylightRefPoint");
            out.push(IdfObject::DaylightingReferencePoint(DaylightingReferencePoint {
                name: ref_point_name.clone(),
                zone: zone.clone(),
                x: 0.0,
                y: 0.0,
                z: 0.8,
            }));
            out.push(IdfObject::DaylightingControls(DaylightingControls {
                name: format!("{zone}_DaylightControls"),
                zone: zone.clone(),
                reference_point_name: ref_point_name,
                fraction_controlled: 1.0,
                illuminance_setpoint_lux: 500.0,
            }));
        }
    }

    out.push(IdfObject::AirLoopHVACZoneSplitter(AirLoopHVACZoneSplitter {
        name: format!("{name}_ZoneSplitter"),
        inlet_node: supply_out.clone(),
        outlet_nodes: splitter_outlets,
    }));
    out.push(IdfObject::AirLoopHVACZoneMixer(AirLoopHVACZoneMixer {
        name: format!("{name}_ZoneMixer"),
        outlet_node: ret,
        inlet_nodes: mixer_inlets,
    }));

    let (sp_at_low, low_temp, sp_at_high, high_temp) = controllers::oa_reset_points(climate);
    out.push(IdfObject::SetpointManagerOutdoorAirReset(SetpointManagerOutdoorAirReset {
        name: format!("{name}_SupplyAirTempReset"),
        control_variable: "Temperature".to_string(),
        setpoint_at_outdoor_low: sp_at_low,
        outdoor_low_temperature: low_temp,
        setpoint_at_outdoor_high: sp_at_high,
        outdoor_high_temperature: high_temp,
        setpoint_node: supply_out.clone(),
    }));
    out.push(IdfObject::SetpointManagerMixedAir(SetpointManagerMixedAir {
        name: format!("{name}_MixedAirReset"),
        control_variable: "Temperature".to_string(),
        reference_setpoint_node: supply_out,
        fan_inlet_node: oa_in,
        fan_outlet_node: fan_out,
        setpoint_node: mixed,
    }));
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

    fn model_with_zones(n: usize) -> (Model, DefaultsRecord) {
        let lib = DefaultsLibrary::load();
        let params = crate::params::resolve_parameters(&Default::default(), None, &lib).unwrap();
        let defaults = lib.resolve(params.building_type, ClimateZone::C4, None, None, params.leed_level);
        let mut model = Model::new(None, params);
        for i in 0..n {
            model.zones.push(square_zone(&format!("Zone{i}")));
        }
        crate::schedules::build_schedules(&mut model, &[SpaceType::OfficeOpen], false).unwrap();
        crate::loads::build_loads(&mut model, &defaults.template, None);
        (model, defaults)
    }

    #[test]
    fn header_objects_appear_exactly_once() {
        let (mut model, defaults) = model_with_zones(1);
        crate::hvac::topology::build_hvac(
            &mut model,
            &defaults.template,
            BuildingType::Office,
            ClimateZone::C4,
            Some(HvacType::IdealLoads),
        )
        .unwrap();
        let objects = lower(&model, &defaults);
        assert_eq!(objects.iter().filter(|o| matches!(o, IdfObject::Version(_))).count(), 1);
        assert_eq!(objects.iter().filter(|o| matches!(o, IdfObject::Timestep(_))).count(), 1);
    }

    #[test]
    fn always_on_schedule_is_synthesized_exactly_once() {
        let (mut model, defaults) = model_with_zones(1);
        crate::hvac::topology::build_hvac(
            &mut model,
            &defaults.template,
            BuildingType::Office,
            ClimateZone::C4,
            Some(HvacType::IdealLoads),
        )
        .unwrap();
        let objects = lower(&model, &defaults);
        let count = objects
            .iter()
            .filter(|o| matches!(o, IdfObject::ScheduleCompact(s) if s.name == ALWAYS_ON_SCHEDULE))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn ideal_loads_zone_has_no_fan_or_coil_objects() {
        let (mut model, defaults) = model_with_zones(1);
        crate::hvac::topology::build_hvac(
            &mut model,
            &defaults.template,
            BuildingType::Office,
            ClimateZone::C4,
            Some(HvacType::IdealLoads),
        )
        .unwrap();
        let objects = lower(&model, &defaults);
        assert!(objects.iter().any(|o| matches!(o, IdfObject::ZoneHvacIdealLoadsAirSystem(_))));
        assert!(!objects.iter().any(|o| matches!(o, IdfObject::FanConstantVolume(_))));
    }

    #[test]
    fn central_vav_airloop_lowers_branch_list_and_zone_splitter() {
        let (mut model, defaults) = model_with_zones(2);
        crate::hvac::topology::build_hvac(
            &mut model,
            &defaults.template,
            BuildingType::Office,
            ClimateZone::C4,
            Some(HvacType::Vav),
        )
        .unwrap();
        let objects = lower(&model, &defaults);
        assert!(objects.iter().any(|o| matches!(o, IdfObject::AirLoopHVAC(_))));
        assert!(objects.iter().any(|o| matches!(o, IdfObject::AirLoopHVACZoneSplitter(_))));
        assert!(objects.iter().any(|o| matches!(o, IdfObject::AirTerminalSingleDuctVavReheat(_))));
        assert!(objects.iter().any(|o| matches!(o, IdfObject::ControllerList(_))));
        assert!(objects.iter().any(|o| matches!(o, IdfObject::OutdoorAirEquipmentList(_))));
    }

    #[test]
    fn humid_climate_central_airloop_gets_heat_exchanger() {
        let (mut model, defaults) = model_with_zones(1);
        crate::hvac::topology::build_hvac(
            &mut model,
            &defaults.template,
            BuildingType::Office,
            ClimateZone::C1,
            Some(HvacType::Vav),
        )
        .unwrap();
        let objects = lower(&model, &defaults);
        assert!(objects
            .iter()
            .any(|o| matches!(o, IdfObject::HeatExchangerAirToAirSensibleAndLatent(_))));
    }
}
