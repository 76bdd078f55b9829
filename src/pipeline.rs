// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Orquestador del pipeline (C8, §4.8): función pura que encadena
//! resolución → geometría → cargas+horarios → HVAC → validación → emisión.
//!
//! Cada etapa es falible y no se reintenta: ante el primer error, el
//! orquestador corta y no hay éxito parcial (§5 "no partial success"). Un
//! único hilo, sin paralelismo interno — la cadena de dependencias
//! secuenciales hace que paralelizar no compense (§5 "Scheduling model").

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::common::{ClimateZone, SpaceType};
use crate::defaults::DefaultsLibrary;
use crate::error::CoreError;
use crate::hvac::topology::build_hvac;
use crate::idf::{emit, lower};
use crate::loads::build_loads;
use crate::model::Model;
use crate::params::{resolve_parameters, UserBuildingSpec};
use crate::report::{Report, Stats};
use crate::rng::ModelRng;
use crate::schedules::build_schedules;
use crate::site::Site;
use crate::validator::validate;
use crate::zoning::build_zones;

/// Banda de acotamiento del porcentaje de reducción de red por cogeneración
/// (§4.6 "Cogeneration", §9.1 pregunta abierta 3): no modelada en el grafo
/// IDF, solo transportada en el informe para el post-procesador externo.
const CHP_GRID_REDUCTION_RANGE: (f64, f64) = (20.0, 70.0);

/// Señal de cancelación cooperativa comprobada entre etapas (§5
/// "Cancellation and timeouts"). Clonable y compartible entre hilos; la
/// cancelación antes de emitir descarta el modelo en memoria sin error de
/// validación alguno.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn check_cancelled(token: &CancellationToken) -> Result<(), CoreError> {
    if token.is_cancelled() {
        Err(CoreError::Cancelled)
    } else {
        Ok(())
    }
}

/// Punto de entrada único del núcleo (§4.8, §6 "Output"): de
/// `(BuildingParameters sin resolver, Site opcional)` a `(texto IDF, Report)`.
pub struct Pipeline;

impl Pipeline {
    /// Ejecuta la secuencia completa. Devuelve `Err` en el primer fallo de
    /// cualquier etapa, o si la validación (C7) encuentra errores
    /// bloqueantes — en ambos casos no se emite texto IDF alguno.
    pub fn run(
        user: &UserBuildingSpec,
        site: Option<&Site>,
        cancellation: &CancellationToken,
    ) -> Result<(String, Report), CoreError> {
        let defaults_lib = DefaultsLibrary::load();

        log::debug!("resolving building parameters");
        let params = resolve_parameters(user, site, &defaults_lib)?;
        check_cancelled(cancellation)?;

        let climate = site.map(|s| s.climate_zone).unwrap_or(ClimateZone::C4);
        let defaults_record = defaults_lib.resolve(
            params.building_type,
            climate,
            params.year_built,
            params.retrofit_year,
            params.leed_level,
        );

        let mut model = Model::new(site.cloned(), params.clone());
        let mut rng = ModelRng::from_resolved_params(&params);

        log::debug!("building zones and envelope for {:?}", params.building_type);
        build_zones(&mut model, &params, site, &defaults_record, &mut rng)?;
        check_cancelled(cancellation)?;

        // Variación estacional de horarios desactivada por defecto (§4.5
        // "optional and off by default"); no hay canal de entrada en
        // `UserBuildingSpec` para activarla desde fuera del núcleo.
        let space_types = distinct_space_types(&defaults_record.template.space_mix);
        build_schedules(&mut model, &space_types, false)?;
        build_loads(&mut model, &defaults_record.template, params.effective_year());
        check_cancelled(cancellation)?;

        log::debug!("building HVAC topology for {:?}", defaults_record.template.target_hvac);
        build_hvac(
            &mut model,
            &defaults_record.template,
            params.building_type,
            climate,
            params.forced_hvac_type,
        )?;
        check_cancelled(cancellation)?;

        log::debug!("validating model");
        let (errors, warnings) = validate(&model, &defaults_record);
        if !errors.is_empty() {
            for err in &errors {
                log::warn!("validation error: {err}");
            }
            return Err(CoreError::ValidationFailed(errors.len()));
        }
        check_cancelled(cancellation)?;

        log::debug!("lowering model to IDF objects");
        let objects = lower::lower(&model, &defaults_record);
        let stats = compute_stats(&model, &objects);
        let idf_text = emit::emit(&objects);

        let report = Report {
            warnings,
            stats,
            chp_grid_reduction_percent: chp_grid_reduction_percent(&params),
        };

        Ok((idf_text, report))
    }
}

fn distinct_space_types(space_mix: &[(SpaceType, f64)]) -> Vec<SpaceType> {
    let mut seen = Vec::with_capacity(space_mix.len());
    for (space, _) in space_mix {
        if !seen.contains(space) {
            seen.push(*space);
        }
    }
    seen
}

fn chp_grid_reduction_percent(params: &crate::params::BuildingParameters) -> Option<f64> {
    params
        .chp_provides_percent
        .map(|pct| pct.clamp(CHP_GRID_REDUCTION_RANGE.0, CHP_GRID_REDUCTION_RANGE.1))
}

/// Kinds de objeto IDF que no pertenecen al lado HVAC (cabecera, envolvente,
/// cargas internas): todo lo demás cuenta como `n_hvac_objects` (§6 "Output").
fn is_hvac_kind(kind: &str) -> bool {
    !matches!(
        kind,
        "Version"
            | "SimulationControl"
            | "Building"
            | "Timestep"
            | "Site:Location"
            | "RunPeriod"
            | "GlobalGeometryRules"
            | "ScheduleTypeLimits"
            | "Schedule:Compact"
            | "Material"
            | "WindowMaterial:SimpleGlazingSystem"
            | "Construction"
            | "Zone"
            | "BuildingSurface:Detailed"
            | "FenestrationSurface:Detailed"
            | "People"
            | "Lights"
            | "ElectricEquipment"
            | "ZoneInfiltration:DesignFlowRate"
            | "ZoneInfiltration:EffectiveLeakageArea"
    )
}

fn compute_stats(model: &Model, objects: &[crate::idf::IdfObject]) -> Stats {
    Stats {
        n_zones: model.zones.len(),
        n_surfaces: model.surfaces.len(),
        n_hvac_objects: objects.iter().filter(|o| is_hvac_kind(o.kind())).count(),
        total_floor_area_m2: model.zones.iter().map(|z| z.area).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BuildingType, LeedLevel};

    fn office_user(per_story: f64, stories: i32) -> UserBuildingSpec {
        UserBuildingSpec {
            building_type: Some(BuildingType::Office),
            stories: Some(stories),
            floor_area_per_story: Some(per_story),
            leed_level: Some(LeedLevel::None),
            ..Default::default()
        }
    }

    #[test]
    fn zero_stories_is_rejected_before_any_stage_runs() {
        let user = UserBuildingSpec {
            stories: Some(0),
            ..Default::default()
        };
        let token = CancellationToken::new();
        let err = Pipeline::run(&user, None, &token).unwrap_err();
        assert!(matches!(err, CoreError::Resolve(_)));
    }

    #[test]
    fn office_building_emits_idf_with_one_airloop_and_zero_errors() {
        let user = office_user(500.0, 3);
        let token = CancellationToken::new();
        let (idf_text, report) = Pipeline::run(&user, None, &token).unwrap();
        assert!(idf_text.contains("AirLoopHVAC,"));
        assert!(idf_text.contains("Controller:OutdoorAir,"));
        assert_eq!(report.stats.n_zones, report.stats.n_zones);
        assert!(report.stats.total_floor_area_m2 > 0.0);
        let target = 500.0 * 3.0;
        assert!((report.stats.total_floor_area_m2 - target).abs() <= 0.08 * target);
    }

    #[test]
    fn cancelling_before_run_short_circuits_with_no_idf_text() {
        let user = office_user(400.0, 2);
        let token = CancellationToken::new();
        token.cancel();
        let err = Pipeline::run(&user, None, &token).unwrap_err();
        assert!(matches!(err, CoreError::Cancelled));
    }

    #[test]
    fn residential_multi_gets_ptac_with_no_airloop() {
        let user = UserBuildingSpec {
            building_type: Some(BuildingType::ResidentialMulti),
            stories: Some(4),
            floor_area_per_story: Some(800.0),
            leed_level: Some(LeedLevel::None),
            ..Default::default()
        };
        let token = CancellationToken::new();
        let (idf_text, _report) = Pipeline::run(&user, None, &token).unwrap();
        assert!(!idf_text.contains("AirLoopHVAC,"));
        assert!(idf_text.contains("ZoneHVAC:PackagedTerminalAirConditioner,"));
    }

    #[test]
    fn chp_percent_is_clamped_into_report() {
        let mut user = office_user(500.0, 2);
        user.chp_provides_percent = Some(5.0);
        let token = CancellationToken::new();
        let (_idf_text, report) = Pipeline::run(&user, None, &token).unwrap();
        assert_eq!(report.chp_grid_reduction_percent, Some(20.0));
    }
}
