// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Generación de modelos EnergyPlus IDF completos para simulación energética
//! de edificio completo a partir de una entrada mínima de usuario (dirección
//! postal más parámetros de edificio opcionales).
//!
//! El núcleo del crate es el pipeline de síntesis de IDF (§2 de la
//! especificación): resolución de parámetros (`params`), geometría y
//! zonificación (`zoning`), cargas internas y horarios (`loads`,
//! `schedules`), topología HVAC (`hvac`), validación (`validator`) y
//! emisión del texto IDF (`idf`). `pipeline::Pipeline::run` encadena las seis
//! etapas en una única función pura y determinista; es el único punto de
//! entrada que necesita un llamante externo.

pub mod common;
pub mod defaults;
pub mod error;
pub mod geometry;
pub mod hvac;
pub mod idf;
pub mod loads;
pub mod model;
pub mod params;
pub mod pipeline;
pub mod report;
pub mod rng;
pub mod schedules;
pub mod site;
pub mod utils;
pub mod validator;
pub mod zoning;

pub use error::CoreError;
pub use params::{BuildingParameters, UserBuildingSpec};
pub use pipeline::{CancellationToken, Pipeline};
pub use report::Report;
pub use site::{ResolverError, Site, SiteResolver, WeatherStore};

/// Versión del crate, embebida para incluir en informes o artefactos de
/// depuración junto a la versión de la biblioteca de valores por defecto
/// (§5 "reproducibility and caching").
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Versión de la IDD (Input Data Dictionary) de EnergyPlus que el emisor
/// (C1) reproduce exactamente (§4.1, §6 "IDF format (bit-exact)").
pub const IDD_VERSION: &str = "24.2";
