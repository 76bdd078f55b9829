// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Informe de salida del pipeline (C8, §6): avisos no bloqueantes del
//! validador y estadísticas agregadas del modelo generado.
//!
//! `serde::Serialize` deriva directamente, igual que `bemodel::Model::as_json`
//! serializa el modelo completo: un caller puede volcar el informe a JSON sin
//! que el núcleo tome partido sobre el transporte.

use serde::Serialize;

use crate::common::WarningLevel;

/// Aviso no bloqueante emitido por el validador (C7, capa "Physical") o por
/// el orquestador. Nunca impide la emisión del IDF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub level: WarningLevel,
    pub code: &'static str,
    pub object: Option<String>,
    pub message: String,
}

impl Warning {
    pub fn new(level: WarningLevel, code: &'static str, object: Option<String>, message: impl Into<String>) -> Self {
        Warning {
            level,
            code,
            object,
            message: message.into(),
        }
    }
}

/// Estadísticas del modelo tras poblarse por completo (§6 "Output").
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stats {
    pub n_zones: usize,
    pub n_surfaces: usize,
    pub n_hvac_objects: usize,
    pub total_floor_area_m2: f64,
}

/// Informe estructurado devuelto junto al texto IDF (§6, §4.8). El
/// post-procesador de cogeneración (§4.6 "Cogeneration", no modelada en el
/// grafo IDF) consume `chp_grid_reduction_percent` para ajustar la
/// electricidad de red reportada; el núcleo solo calcula y transporta el
/// porcentaje, nunca reescribe un consumo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub warnings: Vec<Warning>,
    pub stats: Stats,
    pub chp_grid_reduction_percent: Option<f64>,
}
