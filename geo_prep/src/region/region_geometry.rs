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
use geo::{Coord, Geometry, Intersects, MultiPolygon, Polygon};
use geo::algorithm::bounding_rect::BoundingRect;

use crate::error::{PrepError, Result};
use crate::georef::BoundingBox;

/// A region of interest flattened to its simple polygons
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    polygons: Vec<Polygon<f64>>,
}

impl RegionGeometry {
    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.polygons
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mp = MultiPolygon(self.polygons.clone());
        //never empty, checked on construction
        BoundingBox::of_geometry(&Geometry::MultiPolygon(mp)).unwrap_or_default()
    }

    /// True when the point lies inside or on the boundary of any polygon
    pub fn covers(&self, x: f64, y: f64) -> bool {
        let c = Coord { x, y };
        self.polygons.iter().any(|p| {
            match p.bounding_rect() {
                Some(r) if c.x < r.min().x || c.x > r.max().x || c.y < r.min().y || c.y > r.max().y => false,
                _ => p.intersects(&c),
            }
        })
    }
}

impl TryFrom<Vec<Polygon<f64>>> for RegionGeometry {
    type Error = PrepError;

    fn try_from(polygons: Vec<Polygon<f64>>) -> Result<Self> {
        if polygons.is_empty() {
            return Err(PrepError::Geometry("region has no polygons".to_string()));
        }

        if let Some(idx) = polygons.iter().position(|p| p.exterior().0.is_empty()) {
            return Err(PrepError::Geometry(format!("polygon {} has no coordinates", idx)));
        }

        if polygons.iter().flat_map(|p| p.exterior().coords()).any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(PrepError::Geometry("region has non finite coordinates".to_string()));
        }

        Ok(RegionGeometry { polygons })
    }
}

impl TryFrom<Polygon<f64>> for RegionGeometry {
    type Error = PrepError;

    fn try_from(polygon: Polygon<f64>) -> Result<Self> {
        RegionGeometry::try_from(vec![polygon])
    }
}

impl TryFrom<MultiPolygon<f64>> for RegionGeometry {
    type Error = PrepError;

    fn try_from(mp: MultiPolygon<f64>) -> Result<Self> {
        RegionGeometry::try_from(mp.0)
    }
}

impl TryFrom<Geometry<f64>> for RegionGeometry {
    type Error = PrepError;

    fn try_from(geometry: Geometry<f64>) -> Result<Self> {
        match geometry {
            Geometry::Polygon(p) => RegionGeometry::try_from(p),
            Geometry::MultiPolygon(mp) => RegionGeometry::try_from(mp),
            Geometry::Rect(r) => RegionGeometry::try_from(r.to_polygon()),
            Geometry::GeometryCollection(gc) => {
                let mut polygons = Vec::new();
                for g in gc.0 {
                    polygons.extend(RegionGeometry::try_from(g)?.polygons);
                }
                RegionGeometry::try_from(polygons)
            }
            other => Err(PrepError::Geometry(format!("unsupported region geometry {:?}", other))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{polygon, Rect, coord, Point};

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Rect::new(coord! { x: x, y: y }, coord! { x: x + size, y: y + size }).to_polygon()
    }

    #[test]
    fn test_single_polygon_is_wrapped() {
        let rg = RegionGeometry::try_from(Geometry::Polygon(square(0.0, 0.0, 1.0))).unwrap();
        assert_eq!(rg.polygons().len(), 1);
    }

    #[test]
    fn test_multi_polygon_is_split() {
        let mp = MultiPolygon(vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 2.0)]);
        let rg = RegionGeometry::try_from(Geometry::MultiPolygon(mp)).unwrap();

        assert_eq!(rg.polygons().len(), 2);
        assert_eq!(rg.bounding_box(), BoundingBox::new(7.0, 0.0, 0.0, 7.0));
    }

    #[test]
    fn test_empty_geometries() {
        let err = RegionGeometry::try_from(Geometry::MultiPolygon(MultiPolygon::<f64>(vec![]))).unwrap_err();
        assert!(matches!(err, PrepError::Geometry(_)));

        let empty_poly: Polygon<f64> = Polygon::new(geo::LineString(vec![]), vec![]);
        assert!(RegionGeometry::try_from(empty_poly).is_err());

        assert!(RegionGeometry::try_from(Geometry::Point(Point::new(1.0, 1.0))).is_err());
    }

    #[test]
    fn test_covers() {
        let tri = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 0.0, y: 4.0), (x: 0.0, y: 0.0)];
        let rg = RegionGeometry::try_from(tri).unwrap();

        assert!(rg.covers(1.0, 1.0));
        //on the boundary
        assert!(rg.covers(2.0, 2.0));
        assert!(rg.covers(0.0, 3.0));
        assert!(!rg.covers(3.0, 3.0));
        assert!(!rg.covers(-0.5, 1.0));
    }
}
