// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Tipos y operaciones geométricas: puntos, vectores y polígonos 2D/3D.
//!
//! Modelado sobre `bemodel::types::geometry` (área por la fórmula del
//! polígono de Gauss, perímetro por suma de magnitudes, normal por producto
//! vectorial), generalizado con inset/clip para la rejilla de zonificación
//! que necesita C4.

use nalgebra::{point, vector};

use crate::error::GeometryError;

pub type Point2 = nalgebra::Point2<f64>;
pub type Point3 = nalgebra::Point3<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// Polígono simple, cerrado implícitamente (el último vértice conecta con el primero).
pub type Polygon = Vec<Point2>;

pub trait HasSurface {
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;
    fn centroid(&self) -> Point2;
}

impl HasSurface for Polygon {
    /// Área con signo por la fórmula del polígono (shoelace), en valor absoluto.
    fn area(&self) -> f64 {
        let area: f64 = match self.len() {
            0 | 1 | 2 => 0.0,
            n => self
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let w = self[(i + 1) % n];
                    v.x * w.y - v.y * w.x
                })
                .sum(),
        };
        f64::abs(0.5 * area)
    }

    fn perimeter(&self) -> f64 {
        match self.len() {
            0 | 1 => 0.0,
            n => self
                .iter()
                .enumerate()
                .map(|(i, v)| (v - self[(i + 1) % n]).magnitude())
                .sum(),
        }
    }

    fn centroid(&self) -> Point2 {
        if self.is_empty() {
            return point![0.0, 0.0];
        }
        let n = self.len() as f64;
        let sum = self
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / n)
    }
}

/// Verifica que un polígono sea simple: >= 3 vértices, no degenerado (área > 0).
/// La comprobación de auto-intersección es una heurística O(n²) de intersección
/// de segmentos, suficiente para los polígonos de huella que produce C4.
pub fn validate_simple_polygon(poly: &Polygon) -> Result<(), GeometryError> {
    if poly.len() < 3 {
        return Err(GeometryError::TooFewVertices(poly.len()));
    }
    if poly.area() <= 1e-6 {
        return Err(GeometryError::DegeneratePolygon);
    }
    let n = poly.len();
    for i in 0..n {
        let a1 = poly[i];
        let a2 = poly[(i + 1) % n];
        for j in (i + 1)..n {
            // Segmentos adyacentes comparten un vértice por construcción; se saltan.
            if j == i || (j + 1) % n == i {
                continue;
            }
            let b1 = poly[j];
            let b2 = poly[(j + 1) % n];
            if segments_intersect(a1, a2, b1, b2) {
                return Err(GeometryError::DegeneratePolygon);
            }
        }
    }
    Ok(())
}

fn orientation(a: Point2, b: Point2, c: Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn segments_intersect(a1: Point2, a2: Point2, b1: Point2, b2: Point2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);
    (o1 * o2 < 0.0) && (o3 * o4 < 0.0)
}

/// Devuelve el rectángulo delimitador (min, max) de un polígono.
pub fn bounding_box(poly: &Polygon) -> (Point2, Point2) {
    let mut min = point![f64::INFINITY, f64::INFINITY];
    let mut max = point![f64::NEG_INFINITY, f64::NEG_INFINITY];
    for p in poly {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Normal unitaria (en planta, Z=0) de un polígono orientado en sentido antihorario.
pub fn planar_normal(poly: &Polygon) -> Option<Vector3> {
    if poly.len() < 3 {
        return None;
    }
    let v0 = poly[1] - poly[0];
    let v1 = poly[2] - poly[0];
    Some(vector![v0.x, v0.y, 0.0].cross(&vector![v1.x, v1.y, 0.0]).normalize())
}

/// Construye un rectángulo de área dada con una relación de aspecto fija, centrado en el origen.
pub fn rectangle_of_area(area: f64, aspect: f64) -> Polygon {
    let h = (area / aspect).sqrt();
    let w = area / h;
    vec![
        point![0.0, 0.0],
        point![w, 0.0],
        point![w, h],
        point![0.0, h],
    ]
}

/// Construye una "L" de área dada: un rectángulo mayor con una esquina recortada.
/// El recorte retira `notch_frac` de la superficie total.
pub fn l_shape_of_area(area: f64, notch_frac: f64) -> Polygon {
    let full_area = area / (1.0 - notch_frac);
    let aspect = 1.3;
    let h = (full_area / aspect).sqrt();
    let w = full_area / h;
    let nx = w * notch_frac.sqrt();
    let ny = h * notch_frac.sqrt();
    vec![
        point![0.0, 0.0],
        point![w, 0.0],
        point![w, h - ny],
        point![w - nx, h - ny],
        point![w - nx, h],
        point![0.0, h],
    ]
}

/// Construye una "U" de área dada: un rectángulo con una muesca central en un lado largo.
pub fn u_shape_of_area(area: f64, notch_frac: f64) -> Polygon {
    let full_area = area / (1.0 - notch_frac);
    let aspect = 1.6;
    let h = (full_area / aspect).sqrt();
    let w = full_area / h;
    let notch_w = w * notch_frac;
    let notch_h = h * 0.5;
    let left = (w - notch_w) / 2.0;
    let right = left + notch_w;
    vec![
        point![0.0, 0.0],
        point![w, 0.0],
        point![w, h],
        point![right, h],
        point![right, h - notch_h],
        point![left, h - notch_h],
        point![left, h],
        point![0.0, h],
    ]
}

/// Construye un rectángulo con patio interior (courtyard) de área dada.
/// Devuelve únicamente el contorno exterior; el recorte del patio se aplica
/// al tilar la planta (las celdas que caen dentro del patio se descartan).
pub fn courtyard_rectangle_of_area(gross_area: f64) -> Polygon {
    rectangle_of_area(gross_area, 1.1)
}

/// Recorta un rectángulo de rejilla (`cell`) contra un polígono convexo/simple
/// mediante Sutherland–Hodgman. Usado por C4 para tilar la huella en celdas.
pub fn clip_cell_to_polygon(cell: &Polygon, subject: &Polygon) -> Polygon {
    let mut output = cell.clone();
    let n = subject.len();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let edge_a = subject[i];
        let edge_b = subject[(i + 1) % n];
        let input = output;
        output = Vec::with_capacity(input.len());
        for j in 0..input.len() {
            let cur = input[j];
            let prev = input[(j + input.len() - 1) % input.len()];
            let cur_inside = orientation(edge_a, edge_b, cur) >= 0.0;
            let prev_inside = orientation(edge_a, edge_b, prev) >= 0.0;
            if cur_inside {
                if !prev_inside {
                    if let Some(p) = line_intersection(prev, cur, edge_a, edge_b) {
                        output.push(p);
                    }
                }
                output.push(cur);
            } else if prev_inside {
                if let Some(p) = line_intersection(prev, cur, edge_a, edge_b) {
                    output.push(p);
                }
            }
        }
    }
    output
}

fn line_intersection(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = ((p3.x - p1.x) * d2.y - (p3.y - p1.y) * d2.x) / denom;
    Some(p1 + d1 * t)
}

/// Inset (offset hacia dentro) de un polígono convexo una distancia `dist`,
/// usado para derivar la zona perimetral de huellas cóncavas (§4.4 "Edge cases").
/// Implementación simplificada: desplaza cada arista a lo largo de su normal
/// interior y recalcula las intersecciones consecutivas.
pub fn inset_polygon(poly: &Polygon, dist: f64) -> Option<Polygon> {
    let n = poly.len();
    if n < 3 || dist <= 0.0 {
        return None;
    }
    let ccw = signed_area(poly) > 0.0;
    let mut offset_edges = Vec::with_capacity(n);
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let edge = b - a;
        let mut normal = vector![-edge.y, edge.x].normalize();
        if !ccw {
            normal = -normal;
        }
        let shift = normal * dist;
        offset_edges.push((a + shift, b + shift));
    }
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let (a1, a2) = offset_edges[(i + n - 1) % n];
        let (b1, b2) = offset_edges[i];
        match line_intersection(a1, a2, b1, b2) {
            Some(p) => result.push(p),
            None => return None,
        }
    }
    if result.area() <= 1e-6 {
        None
    } else {
        Some(result)
    }
}

fn signed_area(poly: &Polygon) -> f64 {
    let n = poly.len();
    poly.iter()
        .enumerate()
        .map(|(i, v)| {
            let w = poly[(i + 1) % n];
            v.x * w.y - v.y * w.x
        })
        .sum::<f64>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_area_and_perimeter() {
        let poly = rectangle_of_area(100.0, 1.0);
        assert!((poly.area() - 100.0).abs() < 1e-6);
        assert!((poly.perimeter() - 40.0).abs() < 1e-6);
    }

    #[test]
    fn l_shape_reaches_target_area() {
        let poly = l_shape_of_area(500.0, 0.3);
        assert!((poly.area() - 500.0).abs() < 1.0);
    }

    #[test]
    fn validate_rejects_too_few_vertices() {
        let poly = vec![point![0.0, 0.0], point![1.0, 0.0]];
        assert!(validate_simple_polygon(&poly).is_err());
    }

    #[test]
    fn validate_accepts_simple_rectangle() {
        let poly = rectangle_of_area(200.0, 2.0);
        assert!(validate_simple_polygon(&poly).is_ok());
    }

    #[test]
    fn clip_cell_inside_polygon_is_unchanged_area() {
        let subject = rectangle_of_area(400.0, 1.0);
        let cell = vec![
            point![5.0, 5.0],
            point![10.0, 5.0],
            point![10.0, 10.0],
            point![5.0, 10.0],
        ];
        let clipped = clip_cell_to_polygon(&cell, &subject);
        assert!((clipped.area() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn inset_shrinks_area() {
        let poly = rectangle_of_area(400.0, 1.0);
        let inset = inset_polygon(&poly, 2.0).unwrap();
        assert!(inset.area() < poly.area());
    }
}
