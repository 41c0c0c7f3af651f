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
use crate::georef::BoundingBox;

/// North up (or south up) affine transform between pixel and projected coordinates.
///
/// Rotation terms are not supported.  With the usual GDAL convention the origin is the
/// top left corner and `pixel_height` is negative; a positive `pixel_height` means row 0
/// is the southernmost row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GridTransform {
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        GridTransform {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    pub fn from_geo_transform(geo_transform: &[f64; 6]) -> Self {
        GridTransform {
            origin_x: geo_transform[0],
            pixel_width: geo_transform[1],
            origin_y: geo_transform[3],
            pixel_height: geo_transform[5],
        }
    }

    pub fn to_geo_transform(&self) -> [f64; 6] {
        [self.origin_x, self.pixel_width, 0.0, self.origin_y, 0.0, self.pixel_height]
    }

    /// Projected x coordinate of the left side of column `col`
    pub fn x_coord(&self, col: usize) -> f64 {
        self.origin_x + self.pixel_width * col as f64
    }

    /// Projected y coordinate of the origin side of row `row`
    pub fn y_coord(&self, row: usize) -> f64 {
        self.origin_y + self.pixel_height * row as f64
    }

    /// Representative point of a pixel
    pub fn pixel_center(&self, col: usize, row: usize) -> [f64; 2] {
        [self.origin_x + self.pixel_width * (col as f64 + 0.5),
         self.origin_y + self.pixel_height * (row as f64 + 0.5)]
    }

    /// Converts projected x to a column, may be negative or past the last column
    pub fn col_of(&self, x_coord: f64) -> i64 {
        ((x_coord - self.origin_x) / self.pixel_width).floor() as _
    }

    pub fn row_of(&self, y_coord: f64) -> i64 {
        ((y_coord - self.origin_y) / self.pixel_height).floor() as _
    }

    /// Extent covered by a grid of `num_cols` x `num_rows` pixels.
    ///
    /// Plain signed arithmetic, so a south up transform yields south > north.
    pub fn bounding_box(&self, num_cols: usize, num_rows: usize) -> BoundingBox {
        BoundingBox {
            north: self.origin_y,
            west: self.origin_x,
            south: self.y_coord(num_rows),
            east: self.x_coord(num_cols),
        }
    }
}

impl fmt::Display for GridTransform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Origin X,Y: {}, {} Pixel Width/Height: {},{}",
               self.origin_x, self.origin_y, self.pixel_width, self.pixel_height)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_north_up() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);

        assert_eq!(t.pixel_center(0, 0), [0.5, 9.5]);
        assert_eq!(t.pixel_center(9, 9), [9.5, 0.5]);
        assert_eq!(t.col_of(0.5), 0);
        assert_eq!(t.row_of(9.5), 0);
        assert_eq!(t.row_of(0.5), 9);
        assert_eq!(t.col_of(-0.5), -1);

        let bbox = t.bounding_box(10, 10);
        assert_eq!(bbox, BoundingBox::new(10.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn test_south_up() {
        let t = GridTransform::new(0.0, 5.0, 0.5, 0.5);

        assert_eq!(t.pixel_center(0, 0), [0.25, 5.25]);
        assert_eq!(t.row_of(5.3), 0);
        assert!(approx_eq!(f64, t.y_coord(4), 7.0, ulps = 2));
    }

    #[test]
    fn test_geo_transform_round_trip() {
        let gt = [7.5, 0.25, 0.0, 47.0, 0.0, -0.25];
        let t = GridTransform::from_geo_transform(&gt);
        assert_eq!(t.origin_x, 7.5);
        assert_eq!(t.pixel_height, -0.25);
        assert_eq!(t.to_geo_transform(), gt);
    }
}
