// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Enumeraciones compartidas por todo el pipeline.
//!
//! Varias de estas enumeraciones se escriben tal cual como campos IDF
//! (tokens de la IDD), por lo que derivan `strum::Display`/`EnumString` en
//! lugar de un `match` manual — el mismo patrón que usa `cteepbd` para sus
//! campos de catálogo.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Zona climática ASHRAE (driving insulation, glazing y selección de HVAC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum ClimateZone {
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
}

impl ClimateZone {
    /// Climas húmedos donde el economizador debe basarse en entalpía.
    pub fn is_humid(&self) -> bool {
        matches!(self, ClimateZone::C1 | ClimateZone::C2 | ClimateZone::C5)
    }

    /// Climas donde un ERV recupera suficiente energía para justificar su coste (§4.6).
    pub fn wants_erv(&self) -> bool {
        matches!(
            self,
            ClimateZone::C1
                | ClimateZone::C2
                | ClimateZone::C3
                | ClimateZone::C6
                | ClimateZone::C7
                | ClimateZone::C8
        )
    }
}

/// Tipo de edificio (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum BuildingType {
    Office,
    Retail,
    School,
    Hospital,
    ResidentialSingle,
    ResidentialMulti,
    Warehouse,
    Hotel,
    Restaurant,
    Other,
}

impl Default for BuildingType {
    fn default() -> Self {
        BuildingType::Office
    }
}

/// Nivel de certificación LEED (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum LeedLevel {
    None,
    Certified,
    Silver,
    Gold,
    Platinum,
}

impl Default for LeedLevel {
    fn default() -> Self {
        LeedLevel::None
    }
}

/// Tipo de sistema HVAC seleccionado por C6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum HvacType {
    Vav,
    Ptac,
    Rtu,
    HeatPump,
    ChilledWater,
    IdealLoads,
}

/// Tipo de economizador de aire exterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum EconomizerType {
    DifferentialDryBulb,
    DifferentialEnthalpy,
    NoEconomizer,
}

/// Condición de contorno de una superficie (§3, `Surface`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryType {
    Outdoors,
    Ground,
    Adiabatic,
    /// Adyacente a otra superficie, identificada por nombre (reciprocidad obligatoria).
    Surface(String),
}

impl BoundaryType {
    /// Token IDD para el campo "Outside Boundary Condition".
    pub fn idd_token(&self) -> &'static str {
        match self {
            BoundaryType::Outdoors => "Outdoors",
            BoundaryType::Ground => "Ground",
            BoundaryType::Adiabatic => "Adiabatic",
            BoundaryType::Surface(_) => "Surface",
        }
    }

    /// Nombre de la superficie adyacente, si aplica.
    pub fn peer(&self) -> Option<&str> {
        match self {
            BoundaryType::Surface(peer) => Some(peer.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.idd_token())
    }
}

/// Tipo de superficie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum SurfaceKind {
    Wall,
    Floor,
    Ceiling,
    Roof,
    InternalMass,
}

/// Inclinación de una superficie, usada para clasificar piso/techo/muro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tilt {
    /// Suelo: inclinación ~0º (normal hacia abajo).
    Bottom,
    /// Muro: inclinación ~90º.
    Side,
    /// Techo/cubierta: inclinación ~180º (normal hacia arriba).
    Top,
}

impl Tilt {
    pub fn degrees(&self) -> f64 {
        match self {
            Tilt::Bottom => 180.0,
            Tilt::Side => 90.0,
            Tilt::Top => 0.0,
        }
    }
}

/// Etiqueta de tipo de espacio (§3, `Zone::space_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum SpaceType {
    OfficeOpen,
    Conference,
    Storage,
    Lobby,
    Kitchen,
    LivingRoom,
    SalesFloor,
    Ward,
    Classroom,
    Mechanical,
}

/// Tipo de horario (§3, `Schedule`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum ScheduleType {
    Fraction,
    Temperature,
    OnOff,
    ActivityLevel,
}

/// Tipo de carga interna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum LoadKind {
    Lights,
    People,
    Equipment,
}

/// Método de infiltración por zona (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum InfiltrationMethod {
    DesignFlowRate,
    EffectiveLeakageArea,
}

/// Nivel de un aviso del validador (distinto de un error: nunca bloquea la emisión).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningLevel {
    Info,
    Warning,
}

impl std::fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            WarningLevel::Info => write!(f, "INFO"),
            WarningLevel::Warning => write!(f, "WARNING"),
        }
    }
}
