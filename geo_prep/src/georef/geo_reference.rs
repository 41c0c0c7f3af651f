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
use core::fmt;
use crate::georef::{BoundingBox, GridTransform, Resolution};

/// Georeferencing parameters for GeoTIFF creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoReference {
    /// West, north corner
    pub raster_origin: [f64; 2],
    /// West, south corner, used by writers storing rows south to north
    pub raster_origin_alt: [f64; 2],
    pub pixel_width: f64,
    /// Always negative, rows increase southward
    pub pixel_height: f64,
}

/// Builds the georeference of an extent at a given resolution
pub fn calc_geo_reference(bbox: &BoundingBox, res: &Resolution) -> GeoReference {
    GeoReference {
        raster_origin: [bbox.west, bbox.north],
        raster_origin_alt: [bbox.west, bbox.south],
        pixel_width: res.width,
        pixel_height: -res.height,
    }
}

impl GeoReference {
    /// North up transform anchored at `raster_origin`
    pub fn transform(&self) -> GridTransform {
        GridTransform::new(self.raster_origin[0], self.raster_origin[1],
                           self.pixel_width, self.pixel_height)
    }

    /// South up transform anchored at `raster_origin_alt`
    pub fn transform_alt(&self) -> GridTransform {
        GridTransform::new(self.raster_origin_alt[0], self.raster_origin_alt[1],
                           self.pixel_width, -self.pixel_height)
    }
}

impl fmt::Display for GeoReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RasterOrigin: {:?} RasterOrigin_alt: {:?} pixelWidth: {} pixelHeight: {}",
               self.raster_origin, self.raster_origin_alt, self.pixel_width, self.pixel_height)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_calc_geo_reference() {
        let bbox = BoundingBox::new(10.0, 0.0, 0.0, 10.0);
        let res = Resolution::new(1.0, 1.0);

        let georef = calc_geo_reference(&bbox, &res);

        assert_eq!(georef.raster_origin, [0.0, 10.0]);
        assert_eq!(georef.raster_origin_alt, [0.0, 0.0]);
        assert_eq!(georef.pixel_width, 1.0);
        assert_eq!(georef.pixel_height, -1.0);
    }

    #[test]
    fn test_non_square_pixels() {
        let bbox = BoundingBox::new(48.0, 5.0, 45.0, 11.0);
        let res = Resolution::new(0.25, 0.5);

        let georef = calc_geo_reference(&bbox, &res);

        assert_eq!(georef.pixel_width, 0.5);
        assert_eq!(georef.pixel_height, -0.25);

        let t = georef.transform();
        assert_eq!(t.bounding_box(12, 12), bbox);

        let alt = georef.transform_alt();
        assert_eq!(alt.origin_y, 45.0);
        assert_eq!(alt.y_coord(12), 48.0);
    }
}
