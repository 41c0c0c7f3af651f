/*
This file is part of the Building Aggregration Tool
Copyright (C) 2022 Novel-T

The Building Aggregration Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::convert::TryFrom;

use geo::{Area, ConvexHull, Contains, Coord, Geometry, InteriorPoint, LineString, MultiLineString, MultiPoint, Polygon};
use geos::{CoordSeq, GResult, Geom, Geometry as GGeometry};
use log::debug;

use crate::error::Result;

/// Geometry operations delegated to a geometry engine
pub trait GeometryOps {
    /// Voronoi ridges of the points; unbounded ridges are cut somewhere outside the points' envelope
    fn voronoi_edges(&self, points: &[Coord<f64>]) -> Result<MultiLineString<f64>>;

    /// Closed faces formed by the (noded) lines, dangling lines are dropped
    fn polygonize(&self, lines: &MultiLineString<f64>) -> Result<Vec<Polygon<f64>>>;
}

/// GEOS backed [`GeometryOps`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GeosOps;

fn to_geos_multipoint(points: &[Coord<f64>]) -> GResult<GGeometry<'static>> {
    let geoms = points.iter()
        .map(|c| CoordSeq::new_from_vec(&[[c.x, c.y]]).and_then(GGeometry::create_point))
        .collect::<GResult<Vec<_>>>()?;
    GGeometry::create_multipoint(geoms)
}

fn to_geos_multiline(lines: &MultiLineString<f64>) -> GResult<GGeometry<'static>> {
    let geoms = lines.0.iter()
        .filter(|ls| ls.0.len() >= 2)
        .map(|ls| {
            let coords: Vec<[f64; 2]> = ls.coords().map(|c| [c.x, c.y]).collect();
            CoordSeq::new_from_vec(&coords).and_then(GGeometry::create_line_string)
        })
        .collect::<GResult<Vec<_>>>()?;
    GGeometry::create_multiline_string(geoms)
}

fn collect_lines(geometry: Geometry<f64>, lines: &mut Vec<LineString<f64>>) {
    match geometry {
        Geometry::LineString(ls) => lines.push(ls),
        Geometry::Line(l) => lines.push(LineString::from(vec![l.start, l.end])),
        Geometry::MultiLineString(mls) => lines.extend(mls.0),
        Geometry::GeometryCollection(gc) => {
            for g in gc.0 {
                collect_lines(g, lines);
            }
        }
        _ => {}
    }
}

fn collect_polygons(geometry: Geometry<f64>, polygons: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(p) => polygons.push(p),
        Geometry::MultiPolygon(mp) => polygons.extend(mp.0),
        Geometry::GeometryCollection(gc) => {
            for g in gc.0 {
                collect_polygons(g, polygons);
            }
        }
        _ => {}
    }
}

impl GeometryOps for GeosOps {
    fn voronoi_edges(&self, points: &[Coord<f64>]) -> Result<MultiLineString<f64>> {
        let sites = to_geos_multipoint(points)?;
        let edges = sites.voronoi(None::<&GGeometry>, 0.0, true)?;

        let mut lines = Vec::new();
        if !edges.is_empty()? {
            collect_lines(Geometry::try_from(&edges)?, &mut lines);
        }

        Ok(MultiLineString(lines))
    }

    fn polygonize(&self, lines: &MultiLineString<f64>) -> Result<Vec<Polygon<f64>>> {
        let mut polygons = Vec::new();
        if lines.0.is_empty() {
            return Ok(polygons);
        }

        //polygonize needs lines split at every crossing
        let noded = to_geos_multiline(lines)?.unary_union()?;
        let faces = GGeometry::polygonize(&[noded])?;

        if !faces.is_empty()? {
            collect_polygons(Geometry::try_from(&faces)?, &mut polygons);
        }

        Ok(polygons)
    }
}

/// Voronoi cells of `points` clipped to the points' convex hull.
///
/// The ridges are polygonized together with the hull boundary, so points on the hull
/// get a cell too and cells reaching past the hull are trimmed to it.  Polygonizing
/// the ridges alone would only give the unclipped bounded cells of interior points.
/// Fewer than 3 non collinear points have no hull area and give no polygons.  The
/// order of the returned polygons is unspecified.
pub fn voronoi_polygons<O: GeometryOps + ?Sized>(ops: &O, points: &[Coord<f64>]) -> Result<Vec<Polygon<f64>>> {
    if points.len() < 3 {
        return Ok(Vec::new());
    }

    let hull = MultiPoint::from(points.to_vec()).convex_hull();
    if hull.unsigned_area() <= 0.0 {
        debug!("{} points have no hull area, no voronoi polygons", points.len());
        return Ok(Vec::new());
    }

    let mut lines = ops.voronoi_edges(points)?;
    if lines.0.is_empty() {
        return Ok(Vec::new());
    }
    lines.0.push(hull.exterior().clone());

    let faces = ops.polygonize(&lines)?;
    let num_faces = faces.len();

    let polygons: Vec<Polygon<f64>> = faces.into_iter()
        .filter(|f| f.unsigned_area() > 0.0)
        .filter(|f| f.interior_point().map_or(false, |p| hull.contains(&p)))
        .collect();

    debug!("{} voronoi polygons from {} points ({} faces)", polygons.len(), points.len(), num_faces);

    Ok(polygons)
}

/// Voronoi polygons computed with GEOS
pub fn create_voronoi_polygons(points: &[Coord<f64>]) -> Result<Vec<Polygon<f64>>> {
    voronoi_polygons(&GeosOps, points)
}
