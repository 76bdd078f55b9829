// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Taxonomía de errores del pipeline (§7 de la especificación).
//!
//! Cada etapa devuelve su propio tipo de error tipado; el orquestador los
//! agrega en [`CoreError`] y corta en el primero que aparece. Los avisos
//! (`Warning`, ver `report`) son un canal aparte que nunca bloquea la emisión.

use thiserror::Error;

/// Errores de `ParameterResolver` (C3): entradas de usuario inconsistentes
/// o fuera de rango.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ResolveError {
    #[error("stories must be >= 1, got {0}")]
    InvalidStories(i32),
    #[error("floor_area must be > 0, got {0}")]
    InvalidFloorArea(f64),
    #[error("window_to_wall_ratio must be in [0, 0.95], got {0}")]
    InvalidWwr(f64),
    #[error(
        "user total_area ({total}) disagrees with per_story_area * stories ({derived}) by more than 1%"
    )]
    Inconsistent { total: f64, derived: f64 },
    #[error("chp_provides_percent must be in [0, 100], got {0}")]
    InvalidChpPercent(f64),
}

/// Errores de `GeometryEngine` (C4): polígonos degenerados o zonificación
/// imposible.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("footprint polygon needs >= 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("footprint polygon is not closed or is self-intersecting")]
    DegeneratePolygon,
    #[error("zone '{0}' has zero area after clipping")]
    ZeroAreaZone(String),
    #[error("target floor area {target} m2 could not be reached after grid halving (best effort {achieved} m2)")]
    UnreachableTargetArea { target: f64, achieved: f64 },
}

/// Errores de `HvacTopologyEngine` (C6): grafo de nodos incompleto.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum TopologyError {
    #[error("node '{name}' has no matching outlet/inlet pair")]
    DanglingNode { name: String },
    #[error("node '{name}' is used as an outlet by more than one component")]
    DuplicateOutlet { name: String },
    #[error("airloop '{airloop}' reached state {state:?} out of order")]
    InvalidStateTransition { airloop: String, state: String },
    #[error("zone '{zone}' is not connected to any airloop or zone equipment")]
    UnconnectedZone { zone: String },
}

/// Errores de referencias de nombres que no resuelven (`NameTable`).
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ReferenceError {
    #[error("{kind} '{name}' references unknown {target_kind} '{target_name}'")]
    Dangling {
        kind: &'static str,
        name: String,
        target_kind: &'static str,
        target_name: String,
    },
    #[error("duplicate {kind} name '{name}' (first defined by '{first_owner}', redefined by '{second_owner}')")]
    DuplicateName {
        kind: &'static str,
        name: String,
        first_owner: String,
        second_owner: String,
    },
    #[error("surface '{surface}' declares adjacency to '{peer}' but '{peer}' does not point back")]
    NonReciprocalAdjacency { surface: String, peer: String },
}

/// Errores de campos fuera de rango según el IDD.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum FieldError {
    #[error("field '{field}' of object '{object}' out of range [{min}, {max}]: {value}")]
    OutOfRange {
        object: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("required field '{field}' of object '{object}' is missing")]
    MissingRequired { object: String, field: &'static str },
}

/// Errores del emisor (C1). No deberían alcanzarse nunca si el validador
/// (C7) pasó; si aparecen, indican un defecto del pipeline.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum EmitError {
    #[error("missing required field '{field}' on object kind '{kind}'")]
    MissingRequired { kind: &'static str, field: &'static str },
    #[error("field '{field}' on object kind '{kind}' out of range: {value}")]
    FieldOutOfRange {
        kind: &'static str,
        field: &'static str,
        value: String,
    },
}

/// Error agregado devuelto por [`crate::pipeline::Pipeline::run`].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("generation cancelled before emit")]
    Cancelled,
    #[error("validation failed with {0} error(s); see report for details")]
    ValidationFailed(usize),
}
