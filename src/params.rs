// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! `BuildingParameters` (§3) y el resolvedor de parámetros C3 (§4.3).

use serde::{Deserialize, Serialize};

use crate::common::{BuildingType, HvacType, LeedLevel};
use crate::defaults::DefaultsLibrary;
use crate::error::ResolveError;
use crate::site::Site;

/// Entrada parcial aportada por el llamante antes de resolver (§4.3):
/// cualquier campo puede faltar y se completa por orden de precedencia.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserBuildingSpec {
    pub building_type: Option<BuildingType>,
    pub stories: Option<i32>,
    pub floor_area_total: Option<f64>,
    pub floor_area_per_story: Option<f64>,
    pub wwr: Option<[f64; 4]>,
    pub year_built: Option<i32>,
    pub retrofit_year: Option<i32>,
    pub leed_level: Option<LeedLevel>,
    pub chp_capacity_kw: Option<f64>,
    pub chp_provides_percent: Option<f64>,
    pub forced_hvac_type: Option<HvacType>,
}

/// Registro de parámetros de edificio completamente especificado (§3).
///
/// Orientación por fachada en el orden [N, E, S, W].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingParameters {
    pub building_type: BuildingType,
    pub stories: i32,
    pub floor_area: f64,
    pub floor_area_per_story: Option<f64>,
    pub wwr: [f64; 4],
    pub year_built: Option<i32>,
    pub retrofit_year: Option<i32>,
    pub leed_level: LeedLevel,
    pub chp_capacity_kw: Option<f64>,
    pub chp_provides_percent: Option<f64>,
    pub forced_hvac_type: Option<HvacType>,
}

impl BuildingParameters {
    /// Año efectivo para la tabla de bandas de antigüedad (§4.2):
    /// retrofit_year si existe, si no year_built, si no "moderno".
    pub fn effective_year(&self) -> Option<i32> {
        self.retrofit_year.or(self.year_built)
    }
}

/// Valores de respaldo fijos (§4.3, precedencia 5, "Hard-coded fallback").
const FALLBACK_STORIES: i32 = 3;
const FALLBACK_AREA: f64 = 1000.0;
const FALLBACK_WWR: f64 = 0.4;

/// Resuelve una `BuildingParameters` completa a partir de una entrada
/// parcial de usuario, un `Site` opcional y la biblioteca de valores por
/// defecto, siguiendo el orden de precedencia de §4.3:
///
/// 1. campos explícitos de usuario
/// 2. `floor_area_per_story * stories` de usuario (ignora la huella del sitio)
/// 3. área de huella del sitio (solo si no hay ningún área de usuario)
/// 4. valores por defecto de la plantilla de tipo de edificio
/// 5. respaldo fijo (Office, 3 plantas, 1000 m², WWR 0.4, moderno)
pub fn resolve_parameters(
    user: &UserBuildingSpec,
    site: Option<&Site>,
    defaults: &DefaultsLibrary,
) -> Result<BuildingParameters, ResolveError> {
    let building_type = user.building_type.unwrap_or_default();
    let template = defaults.building_template(building_type);

    let stories = user.stories.unwrap_or(FALLBACK_STORIES);
    if stories < 1 {
        return Err(ResolveError::InvalidStories(stories));
    }

    // --- Área de planta: el invariante crítico de §4.3 vive aquí. ---
    let floor_area_per_story = user.floor_area_per_story;
    let floor_area = if let (Some(total), Some(per_story)) =
        (user.floor_area_total, floor_area_per_story)
    {
        let derived = per_story * stories as f64;
        if (total - derived).abs() > 0.01 * total.max(derived) {
            return Err(ResolveError::Inconsistent { total, derived });
        }
        total
    } else if let Some(total) = user.floor_area_total {
        total
    } else if let Some(per_story) = floor_area_per_story {
        per_story * stories as f64
    } else if let Some(fp) = site.and_then(|s| s.footprint.as_ref()) {
        crate::geometry::HasSurface::area(fp)
    } else {
        FALLBACK_AREA
    };

    if floor_area <= 0.0 {
        return Err(ResolveError::InvalidFloorArea(floor_area));
    }

    let wwr = user.wwr.unwrap_or([template.wwr; 4]);
    for w in wwr {
        if !(0.0..=0.95).contains(&w) {
            return Err(ResolveError::InvalidWwr(w));
        }
    }

    if let Some(pct) = user.chp_provides_percent {
        if !(0.0..=100.0).contains(&pct) {
            return Err(ResolveError::InvalidChpPercent(pct));
        }
    }

    Ok(BuildingParameters {
        building_type,
        stories,
        floor_area,
        floor_area_per_story,
        wwr,
        year_built: user.year_built,
        retrofit_year: user.retrofit_year,
        leed_level: user.leed_level.unwrap_or_default(),
        chp_capacity_kw: user.chp_capacity_kw,
        chp_provides_percent: user.chp_provides_percent,
        forced_hvac_type: user.forced_hvac_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{HasSurface, Polygon};
    use nalgebra::point;

    fn polygon_of_area(area: f64) -> Polygon {
        let side = area.sqrt();
        vec![
            point![0.0, 0.0],
            point![side, 0.0],
            point![side, side],
            point![0.0, side],
        ]
    }

    #[test]
    fn per_story_area_overrides_site_footprint() {
        let defaults = DefaultsLibrary::load();
        let site = Site {
            latitude: 0.0,
            longitude: 0.0,
            elevation_m: 0.0,
            time_zone: 0.0,
            climate_zone: crate::common::ClimateZone::C4,
            weather_file: "x.epw".into(),
            ground_temperatures: Default::default(),
            footprint: Some(polygon_of_area(12_000.0)),
        };
        let user = UserBuildingSpec {
            building_type: Some(BuildingType::Office),
            stories: Some(3),
            floor_area_per_story: Some(500.0),
            ..Default::default()
        };
        let resolved = resolve_parameters(&user, Some(&site), &defaults).unwrap();
        assert!((resolved.floor_area - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn site_footprint_used_only_without_any_user_area() {
        let defaults = DefaultsLibrary::load();
        let site = Site {
            latitude: 0.0,
            longitude: 0.0,
            elevation_m: 0.0,
            time_zone: 0.0,
            climate_zone: crate::common::ClimateZone::C4,
            weather_file: "x.epw".into(),
            ground_temperatures: Default::default(),
            footprint: Some(polygon_of_area(2500.0)),
        };
        let user = UserBuildingSpec {
            stories: Some(2),
            ..Default::default()
        };
        let resolved = resolve_parameters(&user, Some(&site), &defaults).unwrap();
        assert!((resolved.floor_area - 2500.0).abs() < 1.0);
    }

    #[test]
    fn fallback_used_with_no_input_at_all() {
        let defaults = DefaultsLibrary::load();
        let user = UserBuildingSpec::default();
        let resolved = resolve_parameters(&user, None, &defaults).unwrap();
        assert_eq!(resolved.building_type, BuildingType::Office);
        assert_eq!(resolved.stories, FALLBACK_STORIES);
        assert!((resolved.floor_area - FALLBACK_AREA).abs() < 1e-6);
        assert!((resolved.wwr[0] - FALLBACK_WWR).abs() < 1e-6 || resolved.wwr[0] > 0.0);
    }

    #[test]
    fn zero_stories_is_rejected() {
        let defaults = DefaultsLibrary::load();
        let user = UserBuildingSpec {
            stories: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_parameters(&user, None, &defaults),
            Err(ResolveError::InvalidStories(0))
        ));
    }

    #[test]
    fn inconsistent_total_and_per_story_area_is_rejected() {
        let defaults = DefaultsLibrary::load();
        let user = UserBuildingSpec {
            stories: Some(2),
            floor_area_total: Some(100.0),
            floor_area_per_story: Some(500.0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_parameters(&user, None, &defaults),
            Err(ResolveError::Inconsistent { .. })
        ));
    }
}
