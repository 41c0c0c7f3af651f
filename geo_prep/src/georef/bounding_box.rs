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
use geo::{coord, BoundingRect, Geometry, Polygon, Rect};

/// Extent of a raster or region, in the CRS of the inputs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(north: f64, west: f64, south: f64, east: f64) -> Self {
        BoundingBox { north, west, south, east }
    }

    /// Envelope of a geometry, None if it has no coordinates
    pub fn of_geometry(geometry: &Geometry<f64>) -> Option<Self> {
        geometry.bounding_rect().map(|r| BoundingBox {
            north: r.max().y,
            west: r.min().x,
            south: r.min().y,
            east: r.max().x,
        })
    }

    pub fn height(&self) -> f64 {
        (self.north - self.south).abs()
    }

    pub fn width(&self) -> f64 {
        (self.east - self.west).abs()
    }

    /// north > south and east > west, i.e. what a north up raster produces
    pub fn is_north_up(&self) -> bool {
        self.north > self.south && self.east > self.west
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        ).to_polygon()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "N: {} W: {} S: {} E: {}", self.north, self.west, self.south, self.east)
    }
}

/// Pixel size magnitudes, always positive; the sign lives in the transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    pub height: f64,
    pub width: f64,
}

impl Resolution {
    pub fn new(height: f64, width: f64) -> Self {
        Resolution { height: height.abs(), width: width.abs() }
    }

    pub fn from_pixel_size(pixel_width: f64, pixel_height: f64) -> Self {
        Resolution::new(pixel_height, pixel_width)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} x {}", self.height, self.width)
    }
}
