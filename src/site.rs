// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! El `Site` (§3) y el contrato externo `SiteResolver` (§6).
//!
//! La resolución de direcciones en coordenadas, huella de parcela y zona
//! climática es responsabilidad de un colaborador externo (geocodificación +
//! búsqueda de huella, fuera del alcance del núcleo, §1). El núcleo solo
//! consume el resultado ya resuelto a través de este trait abstracto.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::ClimateZone;
use crate::geometry::Polygon;

/// Temperaturas mensuales del terreno a tres profundidades (§3, `Site`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTemperatures {
    pub shallow_0_5m: [f64; 12],
    pub medium_2m: [f64; 12],
    pub deep_4m: [f64; 12],
}

impl Default for GroundTemperatures {
    fn default() -> Self {
        // Perfil plano de 10°C cuando el resolvedor no aporta datos de terreno;
        // el validador (C7) no rechaza esto, pero es un valor conservador, no físico.
        GroundTemperatures {
            shallow_0_5m: [10.0; 12],
            medium_2m: [10.0; 12],
            deep_4m: [10.0; 12],
        }
    }
}

/// Emplazamiento resuelto del edificio. Construido una vez por el
/// `SiteResolver`, inmutable a partir de entonces (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
    /// Desplazamiento horario respecto a UTC.
    pub time_zone: f64,
    pub climate_zone: ClimateZone,
    /// Nombre de archivo de clima (EPW); el núcleo solo lo referencia, nunca
    /// lo resuelve a una ruta de disco (responsabilidad de `WeatherStore`).
    pub weather_file: String,
    pub ground_temperatures: GroundTemperatures,
    /// Huella de parcela, si el resolvedor externo la aportó. Es solo una de
    /// las fuentes de superficie por planta: el resolvedor de parámetros
    /// (C3) le da prioridad más baja que cualquier área indicada por el
    /// usuario (§4.3, invariante crítico).
    pub footprint: Option<Polygon>,
}

/// Errores que puede devolver un `SiteResolver` (contrato externo, §6).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolverError {
    #[error("address '{0}' could not be geocoded")]
    AddressNotFound(String),
    #[error("no footprint available at resolved coordinates ({lat}, {lon})")]
    NoFootprint { lat: f64, lon: f64 },
    #[error("upstream resolver service error: {0}")]
    ServiceError(String),
}

/// Contrato abstracto para resolver una dirección postal en un `Site` (§6).
///
/// El núcleo no geocodifica direcciones ni descarga archivos de clima;
/// depende de una implementación de este trait inyectada por la capa que lo
/// rodea.
pub trait SiteResolver {
    fn resolve(&self, address: &str) -> Result<Site, ResolverError>;
}

/// Resolvedor trivial que siempre devuelve el mismo `Site` fijo, útil para
/// pruebas de componentes aguas abajo que no ejercitan la resolución de
/// direcciones en sí.
pub struct FixedSiteResolver(pub Site);

impl SiteResolver for FixedSiteResolver {
    fn resolve(&self, _address: &str) -> Result<Site, ResolverError> {
        Ok(self.0.clone())
    }
}

/// Contrato abstracto para resolver el nombre de archivo de clima de un
/// `Site` a una ruta de disco real (§6). El núcleo nunca abre el archivo;
/// solo escribe el nombre en el IDF.
pub trait WeatherStore {
    fn path_for(&self, weather_file: &str) -> Option<std::path::PathBuf>;
}
