// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! El modelo de edificio (§3): arena plana de cada tipo de objeto, indexada
//! por nombre, y la `NameTable` que impone unicidad case-insensitive y
//! resuelve referencias antes del emisor (C1 nunca valida referencias, C7 sí).
//!
//! Sin propiedad cíclica: las adyacencias de superficie se declaran con un
//! nombre de par (posible marcador de posición) y se resuelven en una segunda
//! pasada, igual que documenta §9 "Cyclic references".

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::common::{
    BoundaryType, InfiltrationMethod, LoadKind, ScheduleType, SpaceType, SurfaceKind,
};
use crate::error::ReferenceError;
use crate::geometry::{HasSurface, Point3, Polygon};
use crate::params::BuildingParameters;
use crate::site::Site;

/// Material de una capa de construcción (§3, `Material`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Conductividad, W/(m·K), rango físico [0.01, 400].
    pub conductivity: f64,
    /// Densidad, kg/m³, rango físico [10, 10000].
    pub density: f64,
    /// Calor específico, J/(kg·K), rango físico [100, 5000].
    pub specific_heat: f64,
    pub thickness_m: f64,
    pub roughness: String,
}

/// Vidrio simple (U, SHGC, transmitancia visible) para construcciones de huecos.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleGlazing {
    pub u_factor: f64,
    pub shgc: f64,
    pub visible_transmittance: f64,
}

/// Construcción: lista ordenada de capas (exterior a interior) o vidrio simple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Construction {
    Opaque { name: String, layers: Vec<String> },
    Glazing { name: String, glazing: SimpleGlazing },
}

impl Construction {
    pub fn name(&self) -> &str {
        match self {
            Construction::Opaque { name, .. } => name,
            Construction::Glazing { name, .. } => name,
        }
    }
}

/// Una regla de horario: válida para un rango de día del año y un tipo de
/// día, con un valor por hora (0-23).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRule {
    /// Día del año (1-365) de inicio y fin (inclusive) para esta regla.
    pub day_of_year_range: (u32, u32),
    pub day_type: String,
    pub hourly_values: [f64; 24],
}

/// Horario (§3, `Schedule`): debe cubrir el año completo sin huecos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub schedule_type: ScheduleType,
    pub rules: Vec<ScheduleRule>,
}

impl Schedule {
    /// Comprueba que las reglas cubren 1..=365 sin huecos ni solapes,
    /// ordenadas por inicio (invariante de §3, "Must cover the full year
    /// with no gaps").
    pub fn covers_full_year(&self) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let mut ranges: Vec<(u32, u32)> = self.rules.iter().map(|r| r.day_of_year_range).collect();
        ranges.sort_by_key(|r| r.0);
        if ranges[0].0 != 1 {
            return false;
        }
        for w in ranges.windows(2) {
            if w[1].0 != w[0].1 + 1 {
                return false;
            }
        }
        ranges.last().unwrap().1 == 365
    }
}

/// Carga interna (§3, `InternalLoad`): Lights/People/Equipment referenciando
/// una zona y un horario, con nivel de diseño y fracciones radiante/visible/latente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalLoad {
    pub name: String,
    pub kind: LoadKind,
    pub zone: String,
    pub schedule: String,
    pub activity_schedule: Option<String>,
    /// Nivel de diseño: vatios totales, W/m², o personas/m² según `kind`.
    pub design_level: f64,
    pub radiant_fraction: f64,
    pub visible_fraction: f64,
    pub latent_fraction: f64,
}

/// Parámetros de infiltración dependientes del método (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InfiltrationParams {
    DesignFlowRate { flow_per_area_m3_s_m2: f64 },
    /// Exactamente los campos que exige §4.5: área efectiva de fuga,
    /// coeficiente de viento, coeficiente de tiro.
    EffectiveLeakageArea {
        ela_cm2: f64,
        stack_coeff: f64,
        wind_coeff: f64,
    },
}

/// Infiltración por zona (§3, §4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infiltration {
    pub name: String,
    pub zone: String,
    pub method: InfiltrationMethod,
    pub schedule: String,
    pub params: InfiltrationParams,
}

/// Superficie de un hueco o puerta (§3, `Fenestration`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fenestration {
    pub name: String,
    pub parent_surface: String,
    pub construction: String,
    /// Polígono 3D del hueco, coplanar con la superficie padre.
    pub polygon: Vec<Point3>,
    pub area: f64,
}

/// Superficie (§3, `Surface`): muro, suelo, techo/cubierta o masa interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    pub kind: SurfaceKind,
    pub zone: String,
    pub boundary: BoundaryType,
    pub construction: String,
    pub polygon: Vec<Point3>,
    pub tilt_deg: f64,
    pub azimuth_deg: f64,
    pub area: f64,
}

/// Zona térmica (§3, `Zone`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub floor_index: u32,
    pub polygon: Polygon,
    pub area: f64,
    pub ceiling_height_m: f64,
    pub volume_m3: f64,
    pub space_type: SpaceType,
}

impl Zone {
    pub fn new(name: String, floor_index: u32, polygon: Polygon, space_type: SpaceType, ceiling_height_m: f64) -> Self {
        let area = polygon.area();
        let volume_m3 = area * ceiling_height_m;
        Zone {
            name,
            floor_index,
            polygon,
            area,
            ceiling_height_m,
            volume_m3,
            space_type,
        }
    }
}

/// Tabla de nombres: única por modelo, case-insensitive, por tipo de objeto
/// (§3, `NameTable`). No almacena los objetos en sí, solo detecta colisiones
/// y deja trazabilidad de quién definió cada nombre primero (supplemento de
/// diagnóstico de §3 de SPEC_FULL.md, ya que un "nombre duplicado" desnudo no
/// es accionable para quien depura un modelo generado).
#[derive(Debug, Default)]
pub struct NameTable {
    owners: IndexMap<(&'static str, String), String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `name` bajo `kind`, atribuido a `owner`. Error si ya existe
    /// (comparación case-insensitive) bajo el mismo `kind`.
    pub fn declare(
        &mut self,
        kind: &'static str,
        name: &str,
        owner: &str,
    ) -> Result<(), ReferenceError> {
        let key = (kind, name.to_ascii_lowercase());
        if let Some(first_owner) = self.owners.get(&key) {
            return Err(ReferenceError::DuplicateName {
                kind,
                name: name.to_string(),
                first_owner: first_owner.clone(),
                second_owner: owner.to_string(),
            });
        }
        self.owners.insert(key, owner.to_string());
        Ok(())
    }

    pub fn contains(&self, kind: &'static str, name: &str) -> bool {
        self.owners.contains_key(&(kind, name.to_ascii_lowercase()))
    }
}

/// Arena completa del modelo para una invocación (§3, §5 "per-invocation,
/// never shared"). Propietario único de cada tipo de objeto; las referencias
/// cruzadas son identificadores de nombre opacos resueltos contra
/// `name_table`.
#[derive(Debug, Default)]
pub struct Model {
    pub site: Option<Site>,
    pub params: Option<BuildingParameters>,
    pub zones: Vec<Zone>,
    pub surfaces: Vec<Surface>,
    pub fenestrations: Vec<Fenestration>,
    pub materials: IndexMap<String, Material>,
    pub constructions: IndexMap<String, Construction>,
    pub schedules: IndexMap<String, Schedule>,
    pub loads: Vec<InternalLoad>,
    pub infiltrations: Vec<Infiltration>,
    pub hvac: crate::hvac::graph::HvacModel,
    pub name_table: NameTable,
}

impl Model {
    pub fn new(site: Option<Site>, params: BuildingParameters) -> Self {
        Model {
            site,
            params: Some(params),
            ..Default::default()
        }
    }

    pub fn zone_by_name(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn surface_by_name(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    pub fn surfaces_of_zone<'a>(&'a self, zone: &'a str) -> impl Iterator<Item = &'a Surface> {
        self.surfaces.iter().filter(move |s| s.zone == zone)
    }

    /// Segunda pasada (§9 "Cyclic references"): para cada superficie con
    /// contorno `Surface:<peer>`, comprueba que `peer` apunte de vuelta a
    /// ella. No repara nada; solo reporta. La reparación (cuando procede) la
    /// hace C4 en el momento de construir los pares de pared compartida.
    pub fn check_reciprocal_adjacencies(&self) -> Vec<ReferenceError> {
        let mut errors = Vec::new();
        for surface in &self.surfaces {
            if let Some(peer_name) = surface.boundary.peer() {
                match self.surface_by_name(peer_name) {
                    Some(peer) if peer.boundary.peer() == Some(surface.name.as_str()) => {}
                    _ => errors.push(ReferenceError::NonReciprocalAdjacency {
                        surface: surface.name.clone(),
                        peer: peer_name.to_string(),
                    }),
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn name_table_rejects_case_insensitive_duplicate() {
        let mut table = NameTable::new();
        table.declare("Zone", "Office_0_0_0", "zone-builder").unwrap();
        let err = table.declare("Zone", "office_0_0_0", "zone-builder-2").unwrap_err();
        assert!(matches!(err, ReferenceError::DuplicateName { .. }));
    }

    #[test]
    fn name_table_allows_same_name_in_different_kinds() {
        let mut table = NameTable::new();
        table.declare("Zone", "Mechanical", "a").unwrap();
        assert!(table.declare("Schedule", "Mechanical", "b").is_ok());
    }

    #[test]
    fn zone_volume_is_area_times_height() {
        let poly = vec![
            point![0.0, 0.0],
            point![10.0, 0.0],
            point![10.0, 10.0],
            point![0.0, 10.0],
        ];
        let zone = Zone::new("Z1".into(), 0, poly, SpaceType::OfficeOpen, 3.0);
        assert!((zone.volume_m3 - 300.0).abs() < 1e-9);
    }

    #[test]
    fn reciprocal_adjacency_detects_missing_peer() {
        let mut model = Model::new(None, crate::params::resolve_parameters(
            &Default::default(), None, &crate::defaults::DefaultsLibrary::load(),
        ).unwrap());
        model.surfaces.push(Surface {
            name: "WallA".into(),
            kind: SurfaceKind::Wall,
            zone: "Z1".into(),
            boundary: BoundaryType::Surface("WallB".into()),
            construction: "Cons".into(),
            polygon: vec![],
            tilt_deg: 90.0,
            azimuth_deg: 0.0,
            area: 10.0,
        });
        let errors = model.check_reciprocal_adjacencies();
        assert_eq!(errors.len(), 1);
    }
}
