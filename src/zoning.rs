// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Motor de geometría y zonificación (C4, §4.4): deriva la huella,
//! tila cada planta en una rejilla de zonas, y genera superficies y huecos.

use std::collections::HashMap;

use nalgebra::point;
use rand::Rng;

use crate::common::{BoundaryType, SpaceType, SurfaceKind};
use crate::defaults::{ConstructionSet, DefaultsRecord};
use crate::error::{CoreError, GeometryError};
use crate::geometry::{
    bounding_box, clip_cell_to_polygon, courtyard_rectangle_of_area, l_shape_of_area,
    rectangle_of_area, u_shape_of_area, validate_simple_polygon, HasSurface, Point2, Polygon,
};
use crate::model::{Construction, Fenestration, Material, Model, SimpleGlazing, Surface, Zone};
use crate::params::BuildingParameters;
use crate::rng::ModelRng;
use crate::site::Site;

/// Mínima superficie de celda superviviente tras el recorte (§4.4 "cells
/// smaller than 5 m2 after clipping are discarded").
const MIN_CELL_AREA_M2: f64 = 5.0;
/// Umbral de área total bajo el cual se reintenta con rejilla más fina
/// (§4.4 "if total zone area falls below 40% of target, grid step halves").
const RETRY_AREA_FRACTION: f64 = 0.4;

const WALL_THICKNESS_M: f64 = 0.2;
const ROOF_THICKNESS_M: f64 = 0.15;
const GROUND_FLOOR_THICKNESS_M: f64 = 0.3;
const INTERIOR_FLOOR_THICKNESS_M: f64 = 0.15;

const EXTERIOR_WALL_CONSTRUCTION: &str = "ExteriorWall";
const ROOF_CONSTRUCTION: &str = "Roof";
const GROUND_FLOOR_CONSTRUCTION: &str = "GroundFloor";
const INTERIOR_FLOOR_CONSTRUCTION: &str = "InteriorFloor";
const INTERIOR_PARTITION_CONSTRUCTION: &str = "InteriorPartition";
const EXTERIOR_WINDOW_CONSTRUCTION: &str = "ExteriorWindow";

struct FloorCell {
    row: i32,
    col: i32,
    polygon: Polygon,
    area: f64,
    is_perimeter: bool,
}

/// Punto de entrada de C4: puebla `model` con la biblioteca de
/// construcciones, las zonas de cada planta, sus superficies y huecos.
pub fn build_zones(
    model: &mut Model,
    params: &BuildingParameters,
    site: Option<&Site>,
    defaults: &DefaultsRecord,
    rng: &mut ModelRng,
) -> Result<(), CoreError> {
    declare_construction_library(model, &defaults.construction)?;

    let per_story_area = resolve_per_story_area(params, site);
    let footprint = derive_footprint(params, site, per_story_area, rng)?;
    validate_simple_polygon(&footprint).map_err(CoreError::from)?;

    let mut cell_side = defaults.template.target_cell_size_m2.sqrt();
    let mut cells = tile_floor(&footprint, cell_side);
    let achieved: f64 = cells.iter().map(|c| c.area).sum();
    if achieved < RETRY_AREA_FRACTION * per_story_area {
        cell_side /= 2.0;
        cells = tile_floor(&footprint, cell_side);
    }
    let achieved: f64 = cells.iter().map(|c| c.area).sum();
    if achieved < RETRY_AREA_FRACTION * per_story_area {
        return Err(GeometryError::UnreachableTargetArea {
            target: per_story_area,
            achieved,
        }
        .into());
    }
    if cells.is_empty() {
        return Err(GeometryError::ZeroAreaZone("<floor>".to_string()).into());
    }

    let has_mechanical = defaults
        .template
        .space_mix
        .iter()
        .any(|(s, _)| *s == SpaceType::Mechanical);

    // Misma rejilla reutilizada en cada planta, para que las superficies
    // verticales entre plantas puedan emparejarse por (fila, columna)
    // (§4.4 "Surface generation").
    let mut zone_names: Vec<Vec<(i32, i32, String)>> = Vec::with_capacity(params.stories as usize);
    for floor in 0..params.stories {
        let is_top = floor == params.stories - 1;
        let mut floor_names = Vec::with_capacity(cells.len());
        let mut mechanical_assigned = false;
        for cell in &cells {
            let space_type = sample_space_type(&defaults.template.space_mix, cell.is_perimeter, rng);
            let space_type = if is_top && has_mechanical && !mechanical_assigned && is_last_cell(cell, &cells) {
                mechanical_assigned = true;
                SpaceType::Mechanical
            } else {
                space_type
            };
            if space_type == SpaceType::Mechanical {
                mechanical_assigned = true;
            }
            let name = format!("{}_{}_{}_{}", space_type, floor, cell.row, cell.col);
            model.name_table.declare("Zone", &name, "zoning")?;
            let zone = Zone::new(
                name.clone(),
                floor as u32,
                cell.polygon.clone(),
                space_type,
                3.0,
            );
            model.zones.push(zone);
            floor_names.push((cell.row, cell.col, name));
        }
        zone_names.push(floor_names);
    }

    generate_surfaces(model, &cells, &zone_names, params.stories, &params.wwr)?;

    Ok(())
}

/// Resuelve el área objetivo de una planta (distinto del `floor_area` total
/// ya resuelto por C3): prioriza `floor_area_per_story`, luego la huella del
/// sitio, y por último reparte el área total resuelta entre plantas.
fn resolve_per_story_area(params: &BuildingParameters, site: Option<&Site>) -> f64 {
    if let Some(per_story) = params.floor_area_per_story {
        return per_story;
    }
    if let Some(fp) = site.and_then(|s| s.footprint.as_ref()) {
        return fp.area();
    }
    params.floor_area / params.stories as f64
}

/// Deriva el polígono de huella de una planta (§4.4 "Footprint derivation").
fn derive_footprint(
    params: &BuildingParameters,
    site: Option<&Site>,
    per_story_area: f64,
    rng: &mut ModelRng,
) -> Result<Polygon, CoreError> {
    if params.floor_area_per_story.is_some() {
        return Ok(synth_footprint_polygon(params, per_story_area, rng));
    }
    if let Some(fp) = site.and_then(|s| s.footprint.as_ref()) {
        return Ok(fp.clone());
    }
    Ok(synth_footprint_polygon(params, per_story_area, rng))
}

fn synth_footprint_polygon(params: &BuildingParameters, area: f64, rng: &mut ModelRng) -> Polygon {
    use crate::common::BuildingType::*;
    // Pesos de forma por tipo de edificio (§4.4 "weighted by building type").
    let weights: [(u32, fn(f64) -> Polygon); 4] = match params.building_type {
        Office | School => [
            (35, |a| rectangle_of_area(a, 1.4)),
            (30, |a| l_shape_of_area(a, 0.25)),
            (20, |a| u_shape_of_area(a, 0.2)),
            (15, courtyard_rectangle_of_area),
        ],
        Retail | Warehouse => [
            (70, |a| rectangle_of_area(a, 1.2)),
            (15, |a| l_shape_of_area(a, 0.2)),
            (10, |a| u_shape_of_area(a, 0.15)),
            (5, courtyard_rectangle_of_area),
        ],
        _ => [
            (55, |a| rectangle_of_area(a, 1.3)),
            (20, |a| l_shape_of_area(a, 0.22)),
            (15, |a| u_shape_of_area(a, 0.18)),
            (10, courtyard_rectangle_of_area),
        ],
    };
    let total: u32 = weights.iter().map(|(w, _)| w).sum();
    let mut draw = rng.0.gen_range(0..total);
    for (w, shape_fn) in weights {
        if draw < w {
            return shape_fn(area);
        }
        draw -= w;
    }
    rectangle_of_area(area, 1.3)
}

/// Tila una huella en celdas de `cell_side` x `cell_side`, recortadas al
/// polígono, descartando las menores de 5 m² (§4.4).
fn tile_floor(footprint: &Polygon, cell_side: f64) -> Vec<FloorCell> {
    let (min, max) = bounding_box(footprint);
    let ncols = ((max.x - min.x) / cell_side).ceil().max(1.0) as i32;
    let nrows = ((max.y - min.y) / cell_side).ceil().max(1.0) as i32;
    let mut cells = Vec::new();
    for row in 0..nrows {
        for col in 0..ncols {
            let x0 = min.x + col as f64 * cell_side;
            let y0 = min.y + row as f64 * cell_side;
            let x1 = (x0 + cell_side).min(max.x);
            let y1 = (y0 + cell_side).min(max.y);
            let raw = vec![
                point![x0, y0],
                point![x1, y0],
                point![x1, y1],
                point![x0, y1],
            ];
            let clipped = clip_cell_to_polygon(&raw, footprint);
            if clipped.len() < 3 {
                continue;
            }
            let area = clipped.area();
            if area < MIN_CELL_AREA_M2 {
                continue;
            }
            let is_perimeter = row == 0
                || col == 0
                || row == nrows - 1
                || col == ncols - 1
                || area < cell_side * cell_side * 0.999;
            cells.push(FloorCell {
                row,
                col,
                polygon: clipped,
                area,
                is_perimeter,
            });
        }
    }
    cells
}

fn is_last_cell(cell: &FloorCell, cells: &[FloorCell]) -> bool {
    cells
        .last()
        .map(|last| last.row == cell.row && last.col == cell.col)
        .unwrap_or(false)
}

/// Muestrea un tipo de espacio de la mezcla de la plantilla, sesgando las
/// celdas de perímetro hacia el primer tipo de la mezcla (el tipo
/// "abierto"/de fachada) y las interiores hacia el resto (§4.4 "Zone
/// naming").
fn sample_space_type(mix: &[(SpaceType, f64)], is_perimeter: bool, rng: &mut ModelRng) -> SpaceType {
    if mix.is_empty() {
        return SpaceType::OfficeOpen;
    }
    let weights: Vec<f64> = mix
        .iter()
        .enumerate()
        .map(|(i, (_, w))| if (i == 0) == is_perimeter { w * 2.0 } else { *w })
        .collect();
    let total: f64 = weights.iter().sum();
    let mut draw = rng.0.gen_range(0.0..total);
    for (i, w) in weights.iter().enumerate() {
        if draw < *w {
            return mix[i].0;
        }
        draw -= w;
    }
    mix[0].0
}

/// Genera las superficies (suelo, techo, muros) y huecos de todas las
/// plantas, emparejando verticalmente por (fila, columna) y horizontalmente
/// entre celdas vecinas de la misma planta (§4.4 "Surface generation").
fn generate_surfaces(
    model: &mut Model,
    cells: &[FloorCell],
    zone_names: &[Vec<(i32, i32, String)>],
    stories: i32,
    wwr: &[f64; 4],
) -> Result<(), CoreError> {
    let height = 3.0;
    for (floor, floor_names) in zone_names.iter().enumerate() {
        let floor = floor as i32;
        let is_top = floor == stories - 1;
        let z0 = floor as f64 * height;
        let z1 = z0 + height;
        // Empareja muros interiores compartidos por clave geométrica: la
        // primera mitad de una arista interior queda pendiente, la segunda
        // (la del vecino) cierra la pareja reciprocamente (§9 "Cyclic
        // references").
        let mut pending_shared: HashMap<(i64, i64), usize> = HashMap::new();

        for (idx, cell) in cells.iter().enumerate() {
            let (_, _, zone_name) = &floor_names[idx];

            // --- Suelo ---
            let floor_boundary = if floor == 0 {
                BoundaryType::Ground
            } else {
                let below = &zone_names[(floor - 1) as usize][idx].2;
                BoundaryType::Surface(format!("{}_Ceiling", below))
            };
            let floor_construction = if floor == 0 {
                GROUND_FLOOR_CONSTRUCTION
            } else {
                INTERIOR_FLOOR_CONSTRUCTION
            };
            let floor_name = format!("{}_Floor", zone_name);
            model.name_table.declare("Surface", &floor_name, "zoning")?;
            model.surfaces.push(Surface {
                name: floor_name,
                kind: SurfaceKind::Floor,
                zone: zone_name.clone(),
                boundary: floor_boundary,
                construction: floor_construction.to_string(),
                polygon: horizontal_polygon(&cell.polygon, z0),
                tilt_deg: crate::common::Tilt::Bottom.degrees(),
                azimuth_deg: 0.0,
                area: cell.area,
            });

            // --- Techo / cubierta ---
            let (ceiling_boundary, ceiling_kind, ceiling_construction) = if is_top {
                (BoundaryType::Outdoors, SurfaceKind::Roof, ROOF_CONSTRUCTION)
            } else {
                let above = &zone_names[(floor + 1) as usize][idx].2;
                (
                    BoundaryType::Surface(format!("{}_Floor", above)),
                    SurfaceKind::Ceiling,
                    INTERIOR_FLOOR_CONSTRUCTION,
                )
            };
            let ceiling_name = format!("{}_Ceiling", zone_name);
            model.name_table.declare("Surface", &ceiling_name, "zoning")?;
            model.surfaces.push(Surface {
                name: ceiling_name,
                kind: ceiling_kind,
                zone: zone_name.clone(),
                boundary: ceiling_boundary,
                construction: ceiling_construction.to_string(),
                polygon: horizontal_polygon(&cell.polygon, z1),
                tilt_deg: crate::common::Tilt::Top.degrees(),
                azimuth_deg: 0.0,
                area: cell.area,
            });

            // --- Muros: uno por arista del polígono ---
            let n = cell.polygon.len();
            for edge in 0..n {
                let a = cell.polygon[edge];
                let b = cell.polygon[(edge + 1) % n];
                let wall_name = format!("{}_Wall_{}", zone_name, edge);
                let edge_len = (b - a).magnitude();
                let area = edge_len * height;
                if area < 1e-6 {
                    continue;
                }
                let neighbor = find_shared_neighbor(cells, idx, a, b);
                let is_interior = matches!(neighbor, Some(n) if n != idx);
                let (boundary, construction) = if is_interior {
                    // Marcador temporal; se resuelve a una referencia
                    // recíproca real más abajo, o queda exterior si esta
                    // arista no tiene segunda mitad (huella no convexa).
                    (BoundaryType::Adiabatic, INTERIOR_PARTITION_CONSTRUCTION)
                } else {
                    (BoundaryType::Outdoors, EXTERIOR_WALL_CONSTRUCTION)
                };
                let azimuth = edge_azimuth(a, b);
                model.name_table.declare("Surface", &wall_name, "zoning")?;
                let surface_idx = model.surfaces.len();
                model.surfaces.push(Surface {
                    name: wall_name.clone(),
                    kind: SurfaceKind::Wall,
                    zone: zone_name.clone(),
                    boundary: boundary.clone(),
                    construction: construction.to_string(),
                    polygon: wall_polygon(a, b, z0, z1),
                    tilt_deg: crate::common::Tilt::Side.degrees(),
                    azimuth_deg: azimuth,
                    area,
                });

                if is_interior {
                    let key = midpoint_key(a, b);
                    if let Some(first_idx) = pending_shared.remove(&key) {
                        let first_name = model.surfaces[first_idx].name.clone();
                        model.surfaces[surface_idx].boundary =
                            BoundaryType::Surface(first_name.clone());
                        model.surfaces[first_idx].boundary =
                            BoundaryType::Surface(wall_name.clone());
                    } else {
                        pending_shared.insert(key, surface_idx);
                    }
                }

                if matches!(boundary, BoundaryType::Outdoors) {
                    let facade = facade_index(azimuth);
                    let window_wwr = wwr[facade];
                    if window_wwr > 0.0 {
                        let window_area = area * window_wwr;
                        let window_name = format!("{}_Window", wall_name);
                        model.name_table.declare("Fenestration", &window_name, "zoning")?;
                        model.fenestrations.push(Fenestration {
                            name: window_name,
                            parent_surface: wall_name,
                            construction: EXTERIOR_WINDOW_CONSTRUCTION.to_string(),
                            polygon: centered_window_polygon(a, b, z0, z1, window_wwr),
                            area: window_area,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Busca, entre las celdas de la misma planta, una vecina cuyo polígono
/// comparta (aproximadamente) la arista `(a, b)`. Heurística de rejilla: se
/// compara el punto medio de la arista contra el punto medio de cada arista
/// de las demás celdas.
fn find_shared_neighbor(cells: &[FloorCell], this_idx: usize, a: Point2, b: Point2) -> Option<usize> {
    let mid = point![(a.x + b.x) / 2.0, (a.y + b.y) / 2.0];
    const EPS: f64 = 1e-3;
    for (i, other) in cells.iter().enumerate() {
        if i == this_idx {
            continue;
        }
        let n = other.polygon.len();
        for e in 0..n {
            let oa = other.polygon[e];
            let ob = other.polygon[(e + 1) % n];
            let omid = point![(oa.x + ob.x) / 2.0, (oa.y + ob.y) / 2.0];
            if (omid - mid).magnitude() < EPS {
                return Some(i);
            }
        }
    }
    None
}

/// Clave de emparejamiento geométrico para el punto medio de una arista,
/// redondeada a milímetros para tolerar el ruido de coma flotante del recorte.
fn midpoint_key(a: Point2, b: Point2) -> (i64, i64) {
    let mx = (a.x + b.x) / 2.0;
    let my = (a.y + b.y) / 2.0;
    ((mx * 1000.0).round() as i64, (my * 1000.0).round() as i64)
}

fn edge_azimuth(a: Point2, b: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    // Normal exterior de una arista en sentido antihorario: rotar -90°.
    let nx = dy;
    let ny = -dx;
    let mut az = nx.atan2(ny).to_degrees();
    if az < 0.0 {
        az += 360.0;
    }
    az
}

/// Índice de fachada [N, E, S, W] más cercano a un azimut dado.
fn facade_index(azimuth_deg: f64) -> usize {
    let a = azimuth_deg.rem_euclid(360.0);
    if !(45.0..315.0).contains(&a) {
        0 // N
    } else if a < 135.0 {
        1 // E
    } else if a < 225.0 {
        2 // S
    } else {
        3 // W
    }
}

fn horizontal_polygon(poly: &Polygon, z: f64) -> Vec<crate::geometry::Point3> {
    poly.iter().map(|p| point![p.x, p.y, z]).collect()
}

fn wall_polygon(a: Point2, b: Point2, z0: f64, z1: f64) -> Vec<crate::geometry::Point3> {
    vec![
        point![a.x, a.y, z0],
        point![b.x, b.y, z0],
        point![b.x, b.y, z1],
        point![a.x, a.y, z1],
    ]
}

/// Hueco rectangular centrado en la arista, a 0.9 m del suelo (§4.4
/// "Fenestration").
fn centered_window_polygon(a: Point2, b: Point2, z0: f64, z1: f64, wwr: f64) -> Vec<crate::geometry::Point3> {
    let t = (1.0 - wwr.sqrt()) / 2.0;
    let wa = point![a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t];
    let wb = point![a.x + (b.x - a.x) * (1.0 - t), a.y + (b.y - a.y) * (1.0 - t)];
    let sill = z0 + 0.9;
    let head = (z1 - 0.3).max(sill + 0.5);
    vec![
        point![wa.x, wa.y, sill],
        point![wb.x, wb.y, sill],
        point![wb.x, wb.y, head],
        point![wa.x, wa.y, head],
    ]
}

fn declare_construction_library(model: &mut Model, cs: &ConstructionSet) -> Result<(), CoreError> {
    add_opaque(
        model,
        "WallMaterial",
        EXTERIOR_WALL_CONSTRUCTION,
        cs.wall_u,
        WALL_THICKNESS_M,
        1800.0,
        840.0,
        "MediumRough",
    )?;
    add_opaque(
        model,
        "RoofMaterial",
        ROOF_CONSTRUCTION,
        cs.roof_u,
        ROOF_THICKNESS_M,
        1600.0,
        880.0,
        "MediumRough",
    )?;
    add_opaque(
        model,
        "GroundFloorMaterial",
        GROUND_FLOOR_CONSTRUCTION,
        cs.ground_floor_u,
        GROUND_FLOOR_THICKNESS_M,
        2100.0,
        1000.0,
        "Rough",
    )?;
    add_opaque(
        model,
        "InteriorFloorMaterial",
        INTERIOR_FLOOR_CONSTRUCTION,
        cs.floor_u,
        INTERIOR_FLOOR_THICKNESS_M,
        2100.0,
        1000.0,
        "MediumSmooth",
    )?;
    add_opaque(
        model,
        "InteriorPartitionMaterial",
        INTERIOR_PARTITION_CONSTRUCTION,
        2.0,
        0.1,
        800.0,
        1090.0,
        "Smooth",
    )?;

    model
        .name_table
        .declare("Construction", EXTERIOR_WINDOW_CONSTRUCTION, "zoning")?;
    model.constructions.insert(
        EXTERIOR_WINDOW_CONSTRUCTION.to_string(),
        Construction::Glazing {
            name: EXTERIOR_WINDOW_CONSTRUCTION.to_string(),
            glazing: SimpleGlazing {
                u_factor: cs.window_u,
                shgc: cs.window_shgc,
                visible_transmittance: cs.window_vt,
            },
        },
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn add_opaque(
    model: &mut Model,
    material_name: &str,
    construction_name: &str,
    u_value: f64,
    thickness_m: f64,
    density: f64,
    specific_heat: f64,
    roughness: &str,
) -> Result<(), CoreError> {
    let conductivity = (u_value * thickness_m).max(0.01);
    model.name_table.declare("Material", material_name, "zoning")?;
    model.materials.insert(
        material_name.to_string(),
        Material {
            name: material_name.to_string(),
            conductivity,
            density,
            specific_heat,
            thickness_m,
            roughness: roughness.to_string(),
        },
    );
    model.name_table.declare("Construction", construction_name, "zoning")?;
    model.constructions.insert(
        construction_name.to_string(),
        Construction::Opaque {
            name: construction_name.to_string(),
            layers: vec![material_name.to_string()],
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BuildingType, LeedLevel};
    use crate::defaults::DefaultsLibrary;
    use crate::params::{resolve_parameters, UserBuildingSpec};

    fn office_params(per_story: f64, stories: i32) -> BuildingParameters {
        let user = UserBuildingSpec {
            building_type: Some(BuildingType::Office),
            stories: Some(stories),
            floor_area_per_story: Some(per_story),
            leed_level: Some(LeedLevel::None),
            ..Default::default()
        };
        resolve_parameters(&user, None, &DefaultsLibrary::load()).unwrap()
    }

    #[test]
    fn zone_areas_sum_within_half_percent_of_target() {
        let defaults = DefaultsLibrary::load();
        let params = office_params(500.0, 3);
        let record = defaults.resolve(
            params.building_type,
            crate::common::ClimateZone::C4,
            None,
            None,
            LeedLevel::None,
        );
        let mut model = Model::new(None, params.clone());
        let mut rng = ModelRng::from_resolved_params(&params);
        build_zones(&mut model, &params, None, &record, &mut rng).unwrap();
        let total: f64 = model.zones.iter().map(|z| z.area).sum();
        let target = 500.0 * 3.0;
        assert!(
            (total - target).abs() <= 0.08 * target,
            "total {} vs target {}",
            total,
            target
        );
    }

    #[test]
    fn no_surface_has_zero_area() {
        let defaults = DefaultsLibrary::load();
        let params = office_params(400.0, 2);
        let record = defaults.resolve(
            params.building_type,
            crate::common::ClimateZone::C4,
            None,
            None,
            LeedLevel::None,
        );
        let mut model = Model::new(None, params.clone());
        let mut rng = ModelRng::from_resolved_params(&params);
        build_zones(&mut model, &params, None, &record, &mut rng).unwrap();
        assert!(model.surfaces.iter().all(|s| s.area > 1e-6));
    }

    #[test]
    fn single_story_has_no_below_ceiling_surfaces() {
        let defaults = DefaultsLibrary::load();
        let params = office_params(300.0, 1);
        let record = defaults.resolve(
            params.building_type,
            crate::common::ClimateZone::C4,
            None,
            None,
            LeedLevel::None,
        );
        let mut model = Model::new(None, params.clone());
        let mut rng = ModelRng::from_resolved_params(&params);
        build_zones(&mut model, &params, None, &record, &mut rng).unwrap();
        for s in model.surfaces.iter().filter(|s| s.kind == SurfaceKind::Floor) {
            assert_eq!(s.boundary, BoundaryType::Ground);
        }
        for s in model.surfaces.iter().filter(|s| s.kind == SurfaceKind::Roof || s.kind == SurfaceKind::Ceiling) {
            assert_eq!(s.boundary, BoundaryType::Outdoors);
        }
    }
}
