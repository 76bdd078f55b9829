// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Conjunto cerrado de variantes de objeto IDF (§4.1 "Key decisions": "Field
//! order is a compile-time property of each variant... Emitter never
//! reorders"). Cada struct fija sus campos en el orden de la IDD de
//! EnergyPlus 24.2; `fields()` los devuelve ya en ese orden con su
//! comentario `!-` de campo.

use crate::utils::format_idf_number;

/// Un campo de valor único, con su comentario de campo IDD.
#[derive(Debug, Clone)]
pub struct IdfField {
    pub value: String,
    pub comment: &'static str,
}

/// Construye un `Vec<IdfField>` a partir de pares `(valor, comentario)`,
/// evitando repetir `IdfField { .. }` en cada variante.
macro_rules! fields {
    ($(($val:expr, $comment:expr)),* $(,)?) => {
        vec![$(IdfField { value: $val.to_string(), comment: $comment }),*]
    };
}

/// Un valor numérico de campo IDD que puede ser `autosize` (§4.1 "Object
/// kinds may be autosize where IDD permits") o quedar en blanco cuando el
/// campo es opcional y no se aportó valor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Value(f64),
    Autosize,
    Blank,
}

impl Num {
    fn as_field(&self) -> String {
        match self {
            Num::Value(v) => format_idf_number(*v),
            Num::Autosize => "autosize".to_string(),
            Num::Blank => String::new(),
        }
    }
}

impl From<f64> for Num {
    fn from(v: f64) -> Self {
        Num::Value(v)
    }
}

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_field())
    }
}

// ---------- Cabecera / objetos de ámbito de simulación ----------

#[derive(Debug, Clone)]
pub struct Version {
    pub version_identifier: String,
}

#[derive(Debug, Clone)]
pub struct SimulationControl {
    pub do_zone_sizing: bool,
    pub do_system_sizing: bool,
    pub do_plant_sizing: bool,
    pub run_for_sizing_periods: bool,
    pub run_for_run_periods: bool,
}

#[derive(Debug, Clone)]
pub struct Building {
    pub name: String,
    pub north_axis_deg: f64,
    pub terrain: String,
    pub loads_convergence_tolerance: f64,
    pub temperature_convergence_tolerance: f64,
    pub solar_distribution: String,
    pub max_warmup_days: i32,
    pub min_warmup_days: i32,
}

#[derive(Debug, Clone)]
pub struct Timestep {
    pub timesteps_per_hour: i32,
}

#[derive(Debug, Clone)]
pub struct SiteLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: f64,
    pub elevation_m: f64,
}

#[derive(Debug, Clone)]
pub struct RunPeriod {
    pub name: String,
    pub begin_month: i32,
    pub begin_day: i32,
    pub end_month: i32,
    pub end_day: i32,
}

#[derive(Debug, Clone)]
pub struct GlobalGeometryRules {
    pub starting_vertex_position: String,
    pub vertex_entry_direction: String,
    pub coordinate_system: String,
}

// ---------- Horarios ----------

#[derive(Debug, Clone)]
pub struct ScheduleTypeLimits {
    pub name: String,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    pub numeric_type: String,
}

/// Un período compacto `Through/For/Until` dentro de `Schedule:Compact`.
#[derive(Debug, Clone)]
pub struct CompactSchedulePeriod {
    pub through: String,
    pub day_types: Vec<(String, Vec<(String, f64)>)>,
}

#[derive(Debug, Clone)]
pub struct ScheduleCompact {
    pub name: String,
    pub schedule_type_limits: String,
    pub periods: Vec<CompactSchedulePeriod>,
}

// ---------- Materiales y construcciones ----------

#[derive(Debug, Clone)]
pub struct MaterialObj {
    pub name: String,
    pub roughness: String,
    pub thickness_m: f64,
    pub conductivity: f64,
    pub density: f64,
    pub specific_heat: f64,
}

#[derive(Debug, Clone)]
pub struct SimpleGlazingSystem {
    pub name: String,
    pub u_factor: f64,
    pub shgc: f64,
    pub visible_transmittance: f64,
}

#[derive(Debug, Clone)]
pub struct ConstructionObj {
    pub name: String,
    /// Capas exterior a interior, o una única entrada de vidrio simple.
    pub layers: Vec<String>,
}

// ---------- Geometría ----------

#[derive(Debug, Clone)]
pub struct ZoneObj {
    pub name: String,
    pub direction_of_relative_north_deg: f64,
    pub x_origin: f64,
    pub y_origin: f64,
    pub z_origin: f64,
    pub ceiling_height_m: Num,
    pub volume_m3: Num,
    pub floor_area_m2: Num,
}

#[derive(Debug, Clone)]
pub struct BuildingSurfaceDetailed {
    pub name: String,
    pub surface_type: String,
    pub construction: String,
    pub zone: String,
    pub outside_boundary_condition: String,
    pub outside_boundary_condition_object: String,
    pub sun_exposure: String,
    pub wind_exposure: String,
    pub view_factor_to_ground: Num,
    pub vertices: Vec<(f64, f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct FenestrationSurfaceDetailed {
    pub name: String,
    pub surface_type: String,
    pub construction: String,
    pub building_surface: String,
    pub view_factor_to_ground: Num,
    pub vertices: Vec<(f64, f64, f64)>,
}

// ---------- Cargas internas ----------

#[derive(Debug, Clone)]
pub struct PeopleObj {
    pub name: String,
    pub zone: String,
    pub occupancy_schedule: String,
    pub number_of_people_calc_method: String,
    pub number_of_people: Num,
    pub people_per_area: Num,
    pub fraction_radiant: f64,
    pub activity_schedule: String,
}

#[derive(Debug, Clone)]
pub struct LightsObj {
    pub name: String,
    pub zone: String,
    pub schedule: String,
    pub design_level_calc_method: String,
    pub lighting_level_w: Num,
    pub watts_per_area: Num,
    pub fraction_radiant: f64,
    pub fraction_visible: f64,
}

#[derive(Debug, Clone)]
pub struct ElectricEquipmentObj {
    pub name: String,
    pub zone: String,
    pub schedule: String,
    pub design_level_calc_method: String,
    pub design_level_w: Num,
    pub watts_per_area: Num,
    pub fraction_radiant: f64,
    pub fraction_latent: f64,
}

// ---------- Infiltración ----------

#[derive(Debug, Clone)]
pub struct ZoneInfiltrationDesignFlowRate {
    pub name: String,
    pub zone: String,
    pub schedule: String,
    pub calc_method: String,
    pub flow_per_zone_area: f64,
}

#[derive(Debug, Clone)]
pub struct ZoneInfiltrationEffectiveLeakageArea {
    pub name: String,
    pub zone: String,
    pub schedule: String,
    pub effective_leakage_area_cm2: f64,
    pub stack_coefficient: f64,
    pub wind_coefficient: f64,
}

// ---------- HVAC: lado del aire ----------

#[derive(Debug, Clone)]
pub struct AirLoopHVACObj {
    pub name: String,
    pub controller_list: String,
    pub availability_manager_list: String,
    pub design_supply_air_flow_rate: Num,
    pub branch_list: String,
    pub supply_side_inlet_node: String,
    pub demand_side_outlet_node: String,
    pub demand_side_inlet_node_names: String,
    pub supply_side_outlet_node_names: String,
}

#[derive(Debug, Clone)]
pub struct AirLoopHVACOutdoorAirSystem {
    pub name: String,
    pub controller_list: String,
    pub outdoor_air_equipment_list: String,
}

/// Lista de controladores de un `AirLoopHVAC:OutdoorAirSystem`, referenciada
/// por nombre desde este y desde el propio `AirLoopHVAC` (campo "Controller
/// List Name").
#[derive(Debug, Clone)]
pub struct ControllerListObj {
    pub name: String,
    /// Pares (tipo de objeto controlador, nombre).
    pub controllers: Vec<(String, String)>,
}

/// Lista de equipos de la sección de aire exterior de un airloop: típicamente
/// el `OutdoorAir:Mixer` y, si procede, el `HeatExchanger:AirToAir:...`.
#[derive(Debug, Clone)]
pub struct OutdoorAirEquipmentListObj {
    pub name: String,
    /// Pares (tipo de objeto, nombre), en orden de atravesamiento del aire.
    pub components: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ControllerOutdoorAir {
    pub name: String,
    pub relief_air_outlet_node: String,
    pub return_air_node: String,
    pub mixed_air_node: String,
    pub actuator_node: String,
    pub minimum_outdoor_air_flow_rate: Num,
    pub maximum_outdoor_air_flow_rate: Num,
    pub economizer_control_type: String,
    pub lockout_type: String,
    pub minimum_limit_type: String,
}

#[derive(Debug, Clone)]
pub struct ControllerMechanicalVentilation {
    pub name: String,
    pub availability_schedule: String,
    pub demand_controlled_ventilation: String,
    pub system_outdoor_air_method: String,
}

#[derive(Debug, Clone)]
pub struct OutdoorAirMixer {
    pub name: String,
    pub mixed_air_node: String,
    pub outdoor_air_stream_node: String,
    pub relief_air_stream_node: String,
    pub return_air_stream_node: String,
}

#[derive(Debug, Clone)]
pub struct FanVariableVolume {
    pub name: String,
    pub availability_schedule: String,
    pub fan_total_efficiency: f64,
    pub pressure_rise_pa: f64,
    pub max_flow_rate: Num,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct FanConstantVolume {
    pub name: String,
    pub availability_schedule: String,
    pub fan_total_efficiency: f64,
    pub pressure_rise_pa: f64,
    pub max_flow_rate: Num,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct CoilCoolingDxSingleSpeed {
    pub name: String,
    pub availability_schedule: String,
    pub rated_cop: f64,
    pub rated_total_capacity: Num,
    pub rated_air_flow_rate: Num,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct CoilHeatingDxSingleSpeed {
    pub name: String,
    pub availability_schedule: String,
    pub rated_cop: f64,
    pub rated_total_heating_capacity: Num,
    pub rated_air_flow_rate: Num,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct CoilHeatingElectric(pub CoilElectricFields);

#[derive(Debug, Clone)]
pub struct CoilElectricFields {
    pub name: String,
    pub availability_schedule: String,
    pub efficiency: f64,
    pub nominal_capacity: Num,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct CoilCoolingWater {
    pub name: String,
    pub availability_schedule: String,
    pub design_water_flow_rate: Num,
    pub design_air_flow_rate: Num,
    pub water_inlet_node: String,
    pub water_outlet_node: String,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct CoilHeatingWater {
    pub name: String,
    pub availability_schedule: String,
    pub u_factor_times_area: Num,
    pub max_water_flow_rate: Num,
    pub water_inlet_node: String,
    pub water_outlet_node: String,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct AirTerminalSingleDuctVavReheat {
    pub name: String,
    pub availability_schedule: String,
    pub damper_air_outlet_node: String,
    pub air_inlet_node: String,
    pub max_air_flow_rate: Num,
    pub reheat_coil_name: String,
    pub reheat_coil_air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct AirTerminalSingleDuctConstantVolumeNoReheat {
    pub name: String,
    pub availability_schedule: String,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
    pub max_air_flow_rate: Num,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacAirDistributionUnit {
    pub name: String,
    pub air_outlet_node: String,
    pub air_terminal_object_type: String,
    pub air_terminal_name: String,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacEquipmentConnections {
    pub zone: String,
    pub equipment_list: String,
    pub zone_air_inlet_node_list: String,
    pub zone_air_exhaust_node_list: String,
    pub zone_air_node: String,
    pub zone_return_air_node: String,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacEquipmentListEntry {
    pub equipment_object_type: String,
    pub equipment_name: String,
    pub cooling_sequence: i32,
    pub heating_sequence: i32,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacEquipmentList {
    pub name: String,
    pub entries: Vec<ZoneHvacEquipmentListEntry>,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacPackagedTerminalAirConditioner {
    pub name: String,
    pub availability_schedule: String,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
    pub fan_name: String,
    pub cooling_coil_name: String,
    pub heating_coil_name: String,
    pub max_air_flow_rate: Num,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacPackagedTerminalHeatPump {
    pub name: String,
    pub availability_schedule: String,
    pub air_inlet_node: String,
    pub air_outlet_node: String,
    pub fan_name: String,
    pub heating_coil_name: String,
    pub cooling_coil_name: String,
    pub supplemental_heating_coil_name: String,
    pub max_air_flow_rate: Num,
}

#[derive(Debug, Clone)]
pub struct ZoneHvacIdealLoadsAirSystem {
    pub name: String,
    pub availability_schedule: String,
    pub zone_supply_air_node: String,
    pub zone_exhaust_air_node: String,
    pub max_heating_supply_air_temp: f64,
    pub min_cooling_supply_air_temp: f64,
}

#[derive(Debug, Clone)]
pub struct AirLoopHVACZoneSplitter {
    pub name: String,
    pub inlet_node: String,
    pub outlet_nodes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AirLoopHVACZoneMixer {
    pub name: String,
    pub outlet_node: String,
    pub inlet_nodes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BranchComponent {
    pub object_type: String,
    pub object_name: String,
    pub inlet_node: String,
    pub outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct BranchObj {
    pub name: String,
    pub components: Vec<BranchComponent>,
}

#[derive(Debug, Clone)]
pub struct BranchListObj {
    pub name: String,
    pub branch_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NodeListObj {
    pub name: String,
    pub node_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SetpointManagerOutdoorAirReset {
    pub name: String,
    pub control_variable: String,
    pub setpoint_at_outdoor_low: f64,
    pub outdoor_low_temperature: f64,
    pub setpoint_at_outdoor_high: f64,
    pub outdoor_high_temperature: f64,
    pub setpoint_node: String,
}

#[derive(Debug, Clone)]
pub struct SetpointManagerMixedAir {
    pub name: String,
    pub control_variable: String,
    pub reference_setpoint_node: String,
    pub fan_inlet_node: String,
    pub fan_outlet_node: String,
    pub setpoint_node: String,
}

#[derive(Debug, Clone)]
pub struct HeatExchangerAirToAirSensibleAndLatent {
    pub name: String,
    pub availability_schedule: String,
    pub nominal_supply_air_flow_rate: Num,
    pub sensible_effectiveness_100: f64,
    pub latent_effectiveness_100: f64,
    pub supply_air_inlet_node: String,
    pub supply_air_outlet_node: String,
    pub exhaust_air_inlet_node: String,
    pub exhaust_air_outlet_node: String,
}

#[derive(Debug, Clone)]
pub struct DaylightingControls {
    pub name: String,
    pub zone: String,
    pub reference_point_name: String,
    pub fraction_controlled: f64,
    pub illuminance_setpoint_lux: f64,
}

#[derive(Debug, Clone)]
pub struct DaylightingReferencePoint {
    pub name: String,
    pub zone: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone)]
pub struct OutputVariable {
    pub key_value: String,
    pub variable_name: String,
    pub reporting_frequency: String,
}

/// Variante cerrada de objeto IDF. El despacho dinámico queda confinado a
/// este punto (§9 "Dynamic dispatch. Only at the emitter boundary"); los
/// motores internos operan sobre structs concretos.
#[derive(Debug, Clone)]
pub enum IdfObject {
    Version(Version),
    SimulationControl(SimulationControl),
    Building(Building),
    Timestep(Timestep),
    SiteLocation(SiteLocation),
    RunPeriod(RunPeriod),
    GlobalGeometryRules(GlobalGeometryRules),
    ScheduleTypeLimits(ScheduleTypeLimits),
    ScheduleCompact(ScheduleCompact),
    Material(MaterialObj),
    WindowMaterialSimpleGlazingSystem(SimpleGlazingSystem),
    Construction(ConstructionObj),
    Zone(ZoneObj),
    BuildingSurfaceDetailed(BuildingSurfaceDetailed),
    FenestrationSurfaceDetailed(FenestrationSurfaceDetailed),
    People(PeopleObj),
    Lights(LightsObj),
    ElectricEquipment(ElectricEquipmentObj),
    ZoneInfiltrationDesignFlowRate(ZoneInfiltrationDesignFlowRate),
    ZoneInfiltrationEffectiveLeakageArea(ZoneInfiltrationEffectiveLeakageArea),
    AirLoopHVAC(AirLoopHVACObj),
    AirLoopHVACOutdoorAirSystem(AirLoopHVACOutdoorAirSystem),
    ControllerList(ControllerListObj),
    OutdoorAirEquipmentList(OutdoorAirEquipmentListObj),
    ControllerOutdoorAir(ControllerOutdoorAir),
    ControllerMechanicalVentilation(ControllerMechanicalVentilation),
    OutdoorAirMixer(OutdoorAirMixer),
    FanVariableVolume(FanVariableVolume),
    FanConstantVolume(FanConstantVolume),
    CoilCoolingDxSingleSpeed(CoilCoolingDxSingleSpeed),
    CoilHeatingDxSingleSpeed(CoilHeatingDxSingleSpeed),
    CoilHeatingElectric(CoilHeatingElectric),
    CoilCoolingWater(CoilCoolingWater),
    CoilHeatingWater(CoilHeatingWater),
    AirTerminalSingleDuctVavReheat(AirTerminalSingleDuctVavReheat),
    AirTerminalSingleDuctConstantVolumeNoReheat(AirTerminalSingleDuctConstantVolumeNoReheat),
    ZoneHvacAirDistributionUnit(ZoneHvacAirDistributionUnit),
    ZoneHvacEquipmentConnections(ZoneHvacEquipmentConnections),
    ZoneHvacEquipmentList(ZoneHvacEquipmentList),
    ZoneHvacPackagedTerminalAirConditioner(ZoneHvacPackagedTerminalAirConditioner),
    ZoneHvacPackagedTerminalHeatPump(ZoneHvacPackagedTerminalHeatPump),
    ZoneHvacIdealLoadsAirSystem(ZoneHvacIdealLoadsAirSystem),
    AirLoopHVACZoneSplitter(AirLoopHVACZoneSplitter),
    AirLoopHVACZoneMixer(AirLoopHVACZoneMixer),
    Branch(BranchObj),
    BranchList(BranchListObj),
    NodeList(NodeListObj),
    SetpointManagerOutdoorAirReset(SetpointManagerOutdoorAirReset),
    SetpointManagerMixedAir(SetpointManagerMixedAir),
    HeatExchangerAirToAirSensibleAndLatent(HeatExchangerAirToAirSensibleAndLatent),
    DaylightingControls(DaylightingControls),
    DaylightingReferencePoint(DaylightingReferencePoint),
    OutputVariable(OutputVariable),
}

impl IdfObject {
    /// Nombre de objeto IDD, usado como clave de agrupación estable por el
    /// emisor (§4.1 "Output is stable (ordering by object kind, then by
    /// insertion order within kind)").
    pub fn kind(&self) -> &'static str {
        match self {
            IdfObject::Version(_) => "Version",
            IdfObject::SimulationControl(_) => "SimulationControl",
            IdfObject::Building(_) => "Building",
            IdfObject::Timestep(_) => "Timestep",
            IdfObject::SiteLocation(_) => "Site:Location",
            IdfObject::RunPeriod(_) => "RunPeriod",
            IdfObject::GlobalGeometryRules(_) => "GlobalGeometryRules",
            IdfObject::ScheduleTypeLimits(_) => "ScheduleTypeLimits",
            IdfObject::ScheduleCompact(_) => "Schedule:Compact",
            IdfObject::Material(_) => "Material",
            IdfObject::WindowMaterialSimpleGlazingSystem(_) => "WindowMaterial:SimpleGlazingSystem",
            IdfObject::Construction(_) => "Construction",
            IdfObject::Zone(_) => "Zone",
            IdfObject::BuildingSurfaceDetailed(_) => "BuildingSurface:Detailed",
            IdfObject::FenestrationSurfaceDetailed(_) => "FenestrationSurface:Detailed",
            IdfObject::People(_) => "People",
            IdfObject::Lights(_) => "Lights",
            IdfObject::ElectricEquipment(_) => "ElectricEquipment",
            IdfObject::ZoneInfiltrationDesignFlowRate(_) => "ZoneInfiltration:DesignFlowRate",
            IdfObject::ZoneInfiltrationEffectiveLeakageArea(_) => {
                "ZoneInfiltration:EffectiveLeakageArea"
            }
            IdfObject::AirLoopHVAC(_) => "AirLoopHVAC",
            IdfObject::AirLoopHVACOutdoorAirSystem(_) => "AirLoopHVAC:OutdoorAirSystem",
            IdfObject::ControllerList(_) => "AirLoopHVAC:ControllerList",
            IdfObject::OutdoorAirEquipmentList(_) => "OutdoorAir:EquipmentList",
            IdfObject::ControllerOutdoorAir(_) => "Controller:OutdoorAir",
            IdfObject::ControllerMechanicalVentilation(_) => "Controller:MechanicalVentilation",
            IdfObject::OutdoorAirMixer(_) => "OutdoorAir:Mixer",
            IdfObject::FanVariableVolume(_) => "Fan:VariableVolume",
            IdfObject::FanConstantVolume(_) => "Fan:ConstantVolume",
            IdfObject::CoilCoolingDxSingleSpeed(_) => "Coil:Cooling:DX:SingleSpeed",
            IdfObject::CoilHeatingDxSingleSpeed(_) => "Coil:Heating:DX:SingleSpeed",
            IdfObject::CoilHeatingElectric(_) => "Coil:Heating:Electric",
            IdfObject::CoilCoolingWater(_) => "Coil:Cooling:Water",
            IdfObject::CoilHeatingWater(_) => "Coil:Heating:Water",
            IdfObject::AirTerminalSingleDuctVavReheat(_) => "AirTerminal:SingleDuct:VAV:Reheat",
            IdfObject::AirTerminalSingleDuctConstantVolumeNoReheat(_) => {
                "AirTerminal:SingleDuct:ConstantVolume:NoReheat"
            }
            IdfObject::ZoneHvacAirDistributionUnit(_) => "ZoneHVAC:AirDistributionUnit",
            IdfObject::ZoneHvacEquipmentConnections(_) => "ZoneHVAC:EquipmentConnections",
            IdfObject::ZoneHvacEquipmentList(_) => "ZoneHVAC:EquipmentList",
            IdfObject::ZoneHvacPackagedTerminalAirConditioner(_) => {
                "ZoneHVAC:PackagedTerminalAirConditioner"
            }
            IdfObject::ZoneHvacPackagedTerminalHeatPump(_) => "ZoneHVAC:PackagedTerminalHeatPump",
            IdfObject::ZoneHvacIdealLoadsAirSystem(_) => "ZoneHVAC:IdealLoadsAirSystem",
            IdfObject::AirLoopHVACZoneSplitter(_) => "AirLoopHVAC:ZoneSplitter",
            IdfObject::AirLoopHVACZoneMixer(_) => "AirLoopHVAC:ZoneMixer",
            IdfObject::Branch(_) => "Branch",
            IdfObject::BranchList(_) => "BranchList",
            IdfObject::NodeList(_) => "NodeList",
            IdfObject::SetpointManagerOutdoorAirReset(_) => "SetpointManager:OutdoorAirReset",
            IdfObject::SetpointManagerMixedAir(_) => "SetpointManager:MixedAir",
            IdfObject::HeatExchangerAirToAirSensibleAndLatent(_) => {
                "HeatExchanger:AirToAir:SensibleAndLatent"
            }
            IdfObject::DaylightingControls(_) => "Daylighting:Controls",
            IdfObject::DaylightingReferencePoint(_) => "Daylighting:ReferencePoint",
            IdfObject::OutputVariable(_) => "Output:Variable",
        }
    }

    /// Nombre del objeto (campo "Name" o equivalente), cuando aplica; usado
    /// por el validador para mensajes de error legibles.
    pub fn name(&self) -> Option<&str> {
        match self {
            IdfObject::Version(_)
            | IdfObject::SimulationControl(_)
            | IdfObject::Timestep(_)
            | IdfObject::GlobalGeometryRules(_)
            | IdfObject::OutputVariable(_) => None,
            IdfObject::Building(o) => Some(&o.name),
            IdfObject::SiteLocation(o) => Some(&o.name),
            IdfObject::RunPeriod(o) => Some(&o.name),
            IdfObject::ScheduleTypeLimits(o) => Some(&o.name),
            IdfObject::ScheduleCompact(o) => Some(&o.name),
            IdfObject::Material(o) => Some(&o.name),
            IdfObject::WindowMaterialSimpleGlazingSystem(o) => Some(&o.name),
            IdfObject::Construction(o) => Some(&o.name),
            IdfObject::Zone(o) => Some(&o.name),
            IdfObject::BuildingSurfaceDetailed(o) => Some(&o.name),
            IdfObject::FenestrationSurfaceDetailed(o) => Some(&o.name),
            IdfObject::People(o) => Some(&o.name),
            IdfObject::Lights(o) => Some(&o.name),
            IdfObject::ElectricEquipment(o) => Some(&o.name),
            IdfObject::ZoneInfiltrationDesignFlowRate(o) => Some(&o.name),
            IdfObject::ZoneInfiltrationEffectiveLeakageArea(o) => Some(&o.name),
            IdfObject::AirLoopHVAC(o) => Some(&o.name),
            IdfObject::AirLoopHVACOutdoorAirSystem(o) => Some(&o.name),
            IdfObject::ControllerList(o) => Some(&o.name),
            IdfObject::OutdoorAirEquipmentList(o) => Some(&o.name),
            IdfObject::ControllerOutdoorAir(o) => Some(&o.name),
            IdfObject::ControllerMechanicalVentilation(o) => Some(&o.name),
            IdfObject::OutdoorAirMixer(o) => Some(&o.name),
            IdfObject::FanVariableVolume(o) => Some(&o.name),
            IdfObject::FanConstantVolume(o) => Some(&o.name),
            IdfObject::CoilCoolingDxSingleSpeed(o) => Some(&o.name),
            IdfObject::CoilHeatingDxSingleSpeed(o) => Some(&o.name),
            IdfObject::CoilHeatingElectric(o) => Some(&o.0.name),
            IdfObject::CoilCoolingWater(o) => Some(&o.name),
            IdfObject::CoilHeatingWater(o) => Some(&o.name),
            IdfObject::AirTerminalSingleDuctVavReheat(o) => Some(&o.name),
            IdfObject::AirTerminalSingleDuctConstantVolumeNoReheat(o) => Some(&o.name),
            IdfObject::ZoneHvacAirDistributionUnit(o) => Some(&o.name),
            IdfObject::ZoneHvacEquipmentConnections(o) => Some(&o.zone),
            IdfObject::ZoneHvacEquipmentList(o) => Some(&o.name),
            IdfObject::ZoneHvacPackagedTerminalAirConditioner(o) => Some(&o.name),
            IdfObject::ZoneHvacPackagedTerminalHeatPump(o) => Some(&o.name),
            IdfObject::ZoneHvacIdealLoadsAirSystem(o) => Some(&o.name),
            IdfObject::AirLoopHVACZoneSplitter(o) => Some(&o.name),
            IdfObject::AirLoopHVACZoneMixer(o) => Some(&o.name),
            IdfObject::Branch(o) => Some(&o.name),
            IdfObject::BranchList(o) => Some(&o.name),
            IdfObject::NodeList(o) => Some(&o.name),
            IdfObject::SetpointManagerOutdoorAirReset(o) => Some(&o.name),
            IdfObject::SetpointManagerMixedAir(o) => Some(&o.name),
            IdfObject::HeatExchangerAirToAirSensibleAndLatent(o) => Some(&o.name),
            IdfObject::DaylightingControls(o) => Some(&o.name),
            IdfObject::DaylightingReferencePoint(o) => Some(&o.name),
        }
    }

    /// Campos en orden IDD, ya formateados como texto, con su comentario.
    pub fn fields(&self) -> Vec<IdfField> {
        match self {
            IdfObject::Version(o) => fields![(o.version_identifier, "Version Identifier")],
            IdfObject::SimulationControl(o) => fields![
                (yn(o.do_zone_sizing), "Do Zone Sizing Calculation"),
                (yn(o.do_system_sizing), "Do System Sizing Calculation"),
                (yn(o.do_plant_sizing), "Do Plant Sizing Calculation"),
                (yn(o.run_for_sizing_periods), "Run Simulation for Sizing Periods"),
                (yn(o.run_for_run_periods), "Run Simulation for Weather File Run Periods"),
            ],
            IdfObject::Building(o) => fields![
                (o.name, "Name"),
                (format_idf_number(o.north_axis_deg), "North Axis"),
                (o.terrain, "Terrain"),
                (format_idf_number(o.loads_convergence_tolerance), "Loads Convergence Tolerance Value"),
                (format_idf_number(o.temperature_convergence_tolerance), "Temperature Convergence Tolerance Value"),
                (o.solar_distribution, "Solar Distribution"),
                (o.max_warmup_days, "Maximum Number of Warmup Days"),
                (o.min_warmup_days, "Minimum Number of Warmup Days"),
            ],
            IdfObject::Timestep(o) => fields![(o.timesteps_per_hour, "Number of Timesteps per Hour")],
            IdfObject::SiteLocation(o) => fields![
                (o.name, "Name"),
                (format_idf_number(o.latitude), "Latitude"),
                (format_idf_number(o.longitude), "Longitude"),
                (format_idf_number(o.time_zone), "Time Zone"),
                (format_idf_number(o.elevation_m), "Elevation"),
            ],
            IdfObject::RunPeriod(o) => fields![
                (o.name, "Name"),
                (o.begin_month, "Begin Month"),
                (o.begin_day, "Begin Day of Month"),
                (o.end_month, "End Month"),
                (o.end_day, "End Day of Month"),
            ],
            IdfObject::GlobalGeometryRules(o) => fields![
                (o.starting_vertex_position, "Starting Vertex Position"),
                (o.vertex_entry_direction, "Vertex Entry Direction"),
                (o.coordinate_system, "Coordinate System"),
            ],
            IdfObject::ScheduleTypeLimits(o) => fields![
                (o.name, "Name"),
                (o.lower_limit.map(format_idf_number).unwrap_or_default(), "Lower Limit Value"),
                (o.upper_limit.map(format_idf_number).unwrap_or_default(), "Upper Limit Value"),
                (o.numeric_type, "Numeric Type"),
            ],
            IdfObject::ScheduleCompact(o) => {
                let mut f = fields![(o.name, "Name"), (o.schedule_type_limits, "Schedule Type Limits Name")];
                for period in &o.periods {
                    f.push(IdfField {
                        value: format!("Through: {}", period.through),
                        comment: "Field",
                    });
                    for (day_type, hours) in &period.day_types {
                        f.push(IdfField {
                            value: format!("For: {}", day_type),
                            comment: "Field",
                        });
                        for (until, value) in hours {
                            f.push(IdfField {
                                value: format!("Until: {}", until),
                                comment: "Field",
                            });
                            f.push(IdfField {
                                value: format_idf_number(*value),
                                comment: "Field",
                            });
                        }
                    }
                }
                f
            }
            IdfObject::Material(o) => fields![
                (o.name, "Name"),
                (o.roughness, "Roughness"),
                (format_idf_number(o.thickness_m), "Thickness"),
                (format_idf_number(o.conductivity), "Conductivity"),
                (format_idf_number(o.density), "Density"),
                (format_idf_number(o.specific_heat), "Specific Heat"),
            ],
            IdfObject::WindowMaterialSimpleGlazingSystem(o) => fields![
                (o.name, "Name"),
                (format_idf_number(o.u_factor), "U-Factor"),
                (format_idf_number(o.shgc), "Solar Heat Gain Coefficient"),
                (format_idf_number(o.visible_transmittance), "Visible Transmittance"),
            ],
            IdfObject::Construction(o) => {
                let mut f = vec![IdfField { value: o.name.clone(), comment: "Name" }];
                for (i, layer) in o.layers.iter().enumerate() {
                    let comment: &'static str = if i == 0 { "Outside Layer" } else { "Layer" };
                    f.push(IdfField { value: layer.clone(), comment });
                }
                f
            }
            IdfObject::Zone(o) => fields![
                (o.name, "Name"),
                (format_idf_number(o.direction_of_relative_north_deg), "Direction of Relative North"),
                (format_idf_number(o.x_origin), "X Origin"),
                (format_idf_number(o.y_origin), "Y Origin"),
                (format_idf_number(o.z_origin), "Z Origin"),
                (o.ceiling_height_m, "Ceiling Height"),
                (o.volume_m3, "Volume"),
                (o.floor_area_m2, "Floor Area"),
            ],
            IdfObject::BuildingSurfaceDetailed(o) => {
                let mut f = fields![
                    (o.name, "Name"),
                    (o.surface_type, "Surface Type"),
                    (o.construction, "Construction Name"),
                    (o.zone, "Zone Name"),
                    (o.outside_boundary_condition, "Outside Boundary Condition"),
                    (o.outside_boundary_condition_object, "Outside Boundary Condition Object"),
                    (o.sun_exposure, "Sun Exposure"),
                    (o.wind_exposure, "Wind Exposure"),
                    (o.view_factor_to_ground, "View Factor to Ground"),
                    (o.vertices.len(), "Number of Vertices"),
                ];
                push_vertices(&mut f, &o.vertices);
                f
            }
            IdfObject::FenestrationSurfaceDetailed(o) => {
                let mut f = fields![
                    (o.name, "Name"),
                    (o.surface_type, "Surface Type"),
                    (o.construction, "Construction Name"),
                    (o.building_surface, "Building Surface Name"),
                    ("", "Outside Boundary Condition Object"),
                    (o.view_factor_to_ground, "View Factor to Ground"),
                    ("", "Frame and Divider Name"),
                    (1, "Multiplier"),
                    (o.vertices.len(), "Number of Vertices"),
                ];
                push_vertices(&mut f, &o.vertices);
                f
            }
            IdfObject::People(o) => fields![
                (o.name, "Name"),
                (o.zone, "Zone or ZoneList Name"),
                (o.occupancy_schedule, "Number of People Schedule Name"),
                (o.number_of_people_calc_method, "Number of People Calculation Method"),
                (o.number_of_people, "Number of People"),
                (o.people_per_area, "People per Zone Floor Area"),
                ("", "Zone Floor Area per Person"),
                (format_idf_number(o.fraction_radiant), "Fraction Radiant"),
                ("autocalculate", "Sensible Heat Fraction"),
                (o.activity_schedule, "Activity Level Schedule Name"),
            ],
            IdfObject::Lights(o) => fields![
                (o.name, "Name"),
                (o.zone, "Zone or ZoneList Name"),
                (o.schedule, "Schedule Name"),
                (o.design_level_calc_method, "Design Level Calculation Method"),
                (o.lighting_level_w, "Lighting Level"),
                (o.watts_per_area, "Watts per Zone Floor Area"),
                ("", "Watts per Person"),
                (format_idf_number(o.fraction_radiant), "Fraction Radiant"),
                (format_idf_number(o.fraction_visible), "Fraction Visible"),
            ],
            IdfObject::ElectricEquipment(o) => fields![
                (o.name, "Name"),
                (o.zone, "Zone or ZoneList Name"),
                (o.schedule, "Schedule Name"),
                (o.design_level_calc_method, "Design Level Calculation Method"),
                (o.design_level_w, "Design Level"),
                (o.watts_per_area, "Watts per Zone Floor Area"),
                ("", "Watts per Person"),
                (format_idf_number(o.fraction_radiant), "Fraction Radiant"),
                (format_idf_number(o.fraction_latent), "Fraction Latent"),
            ],
            IdfObject::ZoneInfiltrationDesignFlowRate(o) => fields![
                (o.name, "Name"),
                (o.zone, "Zone or ZoneList Name"),
                (o.schedule, "Schedule Name"),
                (o.calc_method, "Design Flow Rate Calculation Method"),
                ("", "Design Flow Rate"),
                (format_idf_number(o.flow_per_zone_area), "Flow per Zone Floor Area"),
            ],
            IdfObject::ZoneInfiltrationEffectiveLeakageArea(o) => fields![
                (o.name, "Name"),
                (o.zone, "Zone Name"),
                (o.schedule, "Schedule Name"),
                (format_idf_number(o.effective_leakage_area_cm2), "Effective Leakage Area"),
                (format_idf_number(o.stack_coefficient), "Stack Coefficient"),
                (format_idf_number(o.wind_coefficient), "Wind Coefficient"),
            ],
            IdfObject::AirLoopHVAC(o) => fields![
                (o.name, "Name"),
                (o.controller_list, "Controller List Name"),
                (o.availability_manager_list, "Availability Manager List Name"),
                (o.design_supply_air_flow_rate, "Design Supply Air Flow Rate"),
                (o.branch_list, "Branch List Name"),
                ("", "Connector List Name"),
                (o.supply_side_inlet_node, "Supply Side Inlet Node Name"),
                (o.demand_side_outlet_node, "Demand Side Outlet Node Name"),
                (o.demand_side_inlet_node_names, "Demand Side Inlet Node Names"),
                (o.supply_side_outlet_node_names, "Supply Side Outlet Node Names"),
            ],
            IdfObject::AirLoopHVACOutdoorAirSystem(o) => fields![
                (o.name, "Name"),
                (o.controller_list, "Controller List Name"),
                (o.outdoor_air_equipment_list, "Outdoor Air Equipment List Name"),
            ],
            IdfObject::ControllerList(o) => {
                let mut f = vec![IdfField { value: o.name.clone(), comment: "Name" }];
                for (object_type, name) in &o.controllers {
                    f.push(IdfField { value: object_type.clone(), comment: "Controller Object Type" });
                    f.push(IdfField { value: name.clone(), comment: "Controller Name" });
                }
                f
            }
            IdfObject::OutdoorAirEquipmentList(o) => {
                let mut f = vec![IdfField { value: o.name.clone(), comment: "Name" }];
                for (object_type, name) in &o.components {
                    f.push(IdfField { value: object_type.clone(), comment: "Component Object Type" });
                    f.push(IdfField { value: name.clone(), comment: "Component Name" });
                }
                f
            }
            IdfObject::ControllerOutdoorAir(o) => fields![
                (o.name, "Name"),
                (o.relief_air_outlet_node, "Relief Air Outlet Node Name"),
                (o.return_air_node, "Return Air Node Name"),
                (o.mixed_air_node, "Mixed Air Node Name"),
                (o.actuator_node, "Actuator Node Name"),
                (o.minimum_outdoor_air_flow_rate, "Minimum Outdoor Air Flow Rate"),
                (o.maximum_outdoor_air_flow_rate, "Maximum Outdoor Air Flow Rate"),
                (o.economizer_control_type, "Economizer Control Type"),
                ("ModulateFlow", "Economizer Control Action Type"),
                (o.lockout_type, "Lockout Type"),
                (o.minimum_limit_type, "Minimum Limit Type"),
            ],
            IdfObject::ControllerMechanicalVentilation(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.demand_controlled_ventilation, "Demand Controlled Ventilation"),
                (o.system_outdoor_air_method, "System Outdoor Air Method"),
                ("", "Zone Maximum Outdoor Air Fraction"),
            ],
            IdfObject::OutdoorAirMixer(o) => fields![
                (o.name, "Name"),
                (o.mixed_air_node, "Mixed Air Node Name"),
                (o.outdoor_air_stream_node, "Outdoor Air Stream Node Name"),
                (o.relief_air_stream_node, "Relief Air Stream Node Name"),
                (o.return_air_stream_node, "Return Air Stream Node Name"),
            ],
            IdfObject::FanVariableVolume(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (format_idf_number(o.fan_total_efficiency), "Fan Total Efficiency"),
                (format_idf_number(o.pressure_rise_pa), "Pressure Rise"),
                (o.max_flow_rate, "Maximum Flow Rate"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::FanConstantVolume(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (format_idf_number(o.fan_total_efficiency), "Fan Total Efficiency"),
                (format_idf_number(o.pressure_rise_pa), "Pressure Rise"),
                (o.max_flow_rate, "Maximum Flow Rate"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::CoilCoolingDxSingleSpeed(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.rated_total_capacity, "Gross Rated Total Cooling Capacity"),
                (format_idf_number(o.rated_cop), "Gross Rated Cooling COP"),
                (o.rated_air_flow_rate, "Rated Air Flow Rate"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::CoilHeatingDxSingleSpeed(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.rated_total_heating_capacity, "Gross Rated Heating Capacity"),
                (format_idf_number(o.rated_cop), "Gross Rated Heating COP"),
                (o.rated_air_flow_rate, "Rated Air Flow Rate"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::CoilHeatingElectric(o) => fields![
                (o.0.name, "Name"),
                (o.0.availability_schedule, "Availability Schedule Name"),
                (format_idf_number(o.0.efficiency), "Efficiency"),
                (o.0.nominal_capacity, "Nominal Capacity"),
                (o.0.air_inlet_node, "Air Inlet Node Name"),
                (o.0.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::CoilCoolingWater(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.design_water_flow_rate, "Design Water Flow Rate"),
                (o.design_air_flow_rate, "Design Air Flow Rate"),
                (o.water_inlet_node, "Water Inlet Node Name"),
                (o.water_outlet_node, "Water Outlet Node Name"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::CoilHeatingWater(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.u_factor_times_area, "U-Factor Times Area Value"),
                (o.max_water_flow_rate, "Maximum Water Flow Rate"),
                (o.water_inlet_node, "Water Inlet Node Name"),
                (o.water_outlet_node, "Water Outlet Node Name"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::AirTerminalSingleDuctVavReheat(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.damper_air_outlet_node, "Damper Air Outlet Node Name"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.max_air_flow_rate, "Maximum Air Flow Rate"),
                ("Coil:Heating:Electric", "Reheat Coil Object Type"),
                (o.reheat_coil_name, "Reheat Coil Name"),
                (o.reheat_coil_air_outlet_node, "Air Outlet Node Name"),
            ],
            IdfObject::AirTerminalSingleDuctConstantVolumeNoReheat(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
                (o.max_air_flow_rate, "Maximum Air Flow Rate"),
            ],
            IdfObject::ZoneHvacAirDistributionUnit(o) => fields![
                (o.name, "Name"),
                (o.air_outlet_node, "Air Distribution Unit Outlet Node Name"),
                (o.air_terminal_object_type, "Air Terminal Object Type"),
                (o.air_terminal_name, "Air Terminal Name"),
            ],
            IdfObject::ZoneHvacEquipmentConnections(o) => fields![
                (o.zone, "Zone Name"),
                (o.equipment_list, "Zone Conditioning Equipment List Name"),
                (o.zone_air_inlet_node_list, "Zone Air Inlet Node or NodeList Name"),
                (o.zone_air_exhaust_node_list, "Zone Air Exhaust Node or NodeList Name"),
                (o.zone_air_node, "Zone Air Node Name"),
                (o.zone_return_air_node, "Zone Return Air Node or NodeList Name"),
            ],
            IdfObject::ZoneHvacEquipmentList(o) => {
                let mut f = vec![
                    IdfField { value: o.name.clone(), comment: "Name" },
                    IdfField { value: "SequentialLoad".to_string(), comment: "Load Distribution Scheme" },
                ];
                for e in &o.entries {
                    f.push(IdfField { value: e.equipment_object_type.clone(), comment: "Zone Equipment Object Type" });
                    f.push(IdfField { value: e.equipment_name.clone(), comment: "Zone Equipment Name" });
                    f.push(IdfField { value: e.cooling_sequence.to_string(), comment: "Zone Equipment Cooling Sequence" });
                    f.push(IdfField { value: e.heating_sequence.to_string(), comment: "Zone Equipment Heating or No-Load Sequence" });
                }
                f
            }
            IdfObject::ZoneHvacPackagedTerminalAirConditioner(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
                (o.max_air_flow_rate, "Supply Air Flow Rate"),
                ("Fan:ConstantVolume", "Supply Air Fan Object Type"),
                (o.fan_name, "Supply Air Fan Name"),
                ("Coil:Heating:Electric", "Heating Coil Object Type"),
                (o.heating_coil_name, "Heating Coil Name"),
                ("Coil:Cooling:DX:SingleSpeed", "Cooling Coil Object Type"),
                (o.cooling_coil_name, "Cooling Coil Name"),
            ],
            IdfObject::ZoneHvacPackagedTerminalHeatPump(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.air_inlet_node, "Air Inlet Node Name"),
                (o.air_outlet_node, "Air Outlet Node Name"),
                (o.max_air_flow_rate, "Supply Air Flow Rate"),
                ("Fan:ConstantVolume", "Supply Air Fan Object Type"),
                (o.fan_name, "Supply Air Fan Name"),
                ("Coil:Heating:DX:SingleSpeed", "Heating Coil Object Type"),
                (o.heating_coil_name, "Heating Coil Name"),
                ("Coil:Cooling:DX:SingleSpeed", "Cooling Coil Object Type"),
                (o.cooling_coil_name, "Cooling Coil Name"),
                (o.supplemental_heating_coil_name, "Supplemental Heating Coil Name"),
            ],
            IdfObject::ZoneHvacIdealLoadsAirSystem(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.zone_supply_air_node, "Zone Supply Air Node Name"),
                (o.zone_exhaust_air_node, "Zone Exhaust Air Node Name"),
                (format_idf_number(o.max_heating_supply_air_temp), "Maximum Heating Supply Air Temperature"),
                (format_idf_number(o.min_cooling_supply_air_temp), "Minimum Cooling Supply Air Temperature"),
            ],
            IdfObject::AirLoopHVACZoneSplitter(o) => {
                let mut f = vec![
                    IdfField { value: o.name.clone(), comment: "Name" },
                    IdfField { value: o.inlet_node.clone(), comment: "Inlet Node Name" },
                ];
                for (i, n) in o.outlet_nodes.iter().enumerate() {
                    let _ = i;
                    f.push(IdfField { value: n.clone(), comment: "Outlet Node Name" });
                }
                f
            }
            IdfObject::AirLoopHVACZoneMixer(o) => {
                let mut f = vec![
                    IdfField { value: o.name.clone(), comment: "Name" },
                    IdfField { value: o.outlet_node.clone(), comment: "Outlet Node Name" },
                ];
                for n in &o.inlet_nodes {
                    f.push(IdfField { value: n.clone(), comment: "Inlet Node Name" });
                }
                f
            }
            IdfObject::Branch(o) => {
                let mut f = vec![IdfField { value: o.name.clone(), comment: "Name" }];
                for c in &o.components {
                    f.push(IdfField { value: c.object_type.clone(), comment: "Component Object Type" });
                    f.push(IdfField { value: c.object_name.clone(), comment: "Component Name" });
                    f.push(IdfField { value: c.inlet_node.clone(), comment: "Component Inlet Node Name" });
                    f.push(IdfField { value: c.outlet_node.clone(), comment: "Component Outlet Node Name" });
                }
                f
            }
            IdfObject::BranchList(o) => {
                let mut f = vec![IdfField { value: o.name.clone(), comment: "Name" }];
                for b in &o.branch_names {
                    f.push(IdfField { value: b.clone(), comment: "Branch Name" });
                }
                f
            }
            IdfObject::NodeList(o) => {
                let mut f = vec![IdfField { value: o.name.clone(), comment: "Name" }];
                for n in &o.node_names {
                    f.push(IdfField { value: n.clone(), comment: "Node Name" });
                }
                f
            }
            IdfObject::SetpointManagerOutdoorAirReset(o) => fields![
                (o.name, "Name"),
                (o.control_variable, "Control Variable"),
                (format_idf_number(o.setpoint_at_outdoor_low), "Setpoint at Outdoor Low Temperature"),
                (format_idf_number(o.outdoor_low_temperature), "Outdoor Low Temperature"),
                (format_idf_number(o.setpoint_at_outdoor_high), "Setpoint at Outdoor High Temperature"),
                (format_idf_number(o.outdoor_high_temperature), "Outdoor High Temperature"),
                (o.setpoint_node, "Setpoint Node or NodeList Name"),
            ],
            IdfObject::SetpointManagerMixedAir(o) => fields![
                (o.name, "Name"),
                (o.control_variable, "Control Variable"),
                (o.reference_setpoint_node, "Reference Setpoint Node Name"),
                (o.fan_inlet_node, "Fan Inlet Node Name"),
                (o.fan_outlet_node, "Fan Outlet Node Name"),
                (o.setpoint_node, "Setpoint Node or NodeList Name"),
            ],
            IdfObject::HeatExchangerAirToAirSensibleAndLatent(o) => fields![
                (o.name, "Name"),
                (o.availability_schedule, "Availability Schedule Name"),
                (o.nominal_supply_air_flow_rate, "Nominal Supply Air Flow Rate"),
                (format_idf_number(o.sensible_effectiveness_100), "Sensible Effectiveness at 100% Heating Air Flow"),
                (format_idf_number(o.latent_effectiveness_100), "Latent Effectiveness at 100% Heating Air Flow"),
                (o.supply_air_inlet_node, "Supply Air Inlet Node Name"),
                (o.supply_air_outlet_node, "Supply Air Outlet Node Name"),
                (o.exhaust_air_inlet_node, "Exhaust Air Inlet Node Name"),
                (o.exhaust_air_outlet_node, "Exhaust Air Outlet Node Name"),
            ],
            IdfObject::DaylightingControls(o) => fields![
                (o.reference_point_name, "Reference Point Name"),
                (format_idf_number(o.fraction_controlled), "Fraction of Zone Controlled by Reference Point"),
                (format_idf_number(o.illuminance_setpoint_lux), "Illuminance Setpoint"),
                (o.name, "Name"),
                (o.zone, "Zone Name"),
            ],
            IdfObject::DaylightingReferencePoint(o) => fields![
                (o.name, "Name"),
                (o.zone, "Zone Name"),
                (format_idf_number(o.x), "X-Coordinate of Reference Point"),
                (format_idf_number(o.y), "Y-Coordinate of Reference Point"),
                (format_idf_number(o.z), "Z-Coordinate of Reference Point"),
            ],
            IdfObject::OutputVariable(o) => fields![
                (o.key_value, "Key Value"),
                (o.variable_name, "Variable Name"),
                (o.reporting_frequency, "Reporting Frequency"),
            ],
        }
    }
}

fn yn(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

fn push_vertices(f: &mut Vec<IdfField>, vertices: &[(f64, f64, f64)]) {
    for (i, (x, y, z)) in vertices.iter().enumerate() {
        f.push(IdfField {
            value: format_idf_number(*x),
            comment: if i == 0 { "X,Y,Z Vertex 1" } else { "Vertex X" },
        });
        f.push(IdfField { value: format_idf_number(*y), comment: "Vertex Y" });
        f.push(IdfField { value: format_idf_number(*z), comment: "Vertex Z" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_fields_are_in_idd_order() {
        let z = ZoneObj {
            name: "Z1".into(),
            direction_of_relative_north_deg: 0.0,
            x_origin: 0.0,
            y_origin: 0.0,
            z_origin: 0.0,
            ceiling_height_m: Num::Value(3.0),
            volume_m3: Num::Autosize,
            floor_area_m2: Num::Blank,
        };
        let obj = IdfObject::Zone(z);
        let f = obj.fields();
        assert_eq!(f[0].value, "Z1");
        assert_eq!(f[5].value, "3.0");
        assert_eq!(f[6].value, "autosize");
        assert_eq!(f[7].value, "");
    }

    #[test]
    fn kind_matches_idd_object_name() {
        let o = IdfObject::AirTerminalSingleDuctVavReheat(AirTerminalSingleDuctVavReheat {
            name: "T1".into(),
            availability_schedule: "".into(),
            damper_air_outlet_node: "n1".into(),
            air_inlet_node: "n2".into(),
            max_air_flow_rate: Num::Autosize,
            reheat_coil_name: "c1".into(),
            reheat_coil_air_outlet_node: "n3".into(),
        });
        assert_eq!(o.kind(), "AirTerminal:SingleDuct:VAV:Reheat");
    }
}
