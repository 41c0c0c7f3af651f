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
use log::debug;
use ndarray::Array2;

use crate::error::{PrepError, Result};
use crate::georef::{BoundingBox, GeoReference, GridTransform, Resolution};
use crate::region::RegionGeometry;

/// 1 inside the region, 0 outside.
///
/// Row 0 is the southernmost row: `transform` is anchored at the region's south west
/// corner with a positive pixel height, which is what [`crate::raster::array2raster`] expects.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskRaster {
    pub grid: Array2<f64>,
    pub transform: GridTransform,
}

impl MaskRaster {
    pub fn num_rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn num_cols(&self) -> usize {
        self.grid.ncols()
    }

    /// Region smaller than a pixel in at least one direction
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn count_inside(&self) -> usize {
        self.grid.iter().filter(|v| **v != 0.0).count()
    }
}

/// Number of whole pixels of size `res` along `extent`, rounded down
const PIXEL_EPSILON: f64 = 1e-9;

//whole pixels only, snapped extents may be a hair short of an exact multiple
fn pixel_count(extent: f64, res: f64) -> usize {
    (extent.abs() / res + PIXEL_EPSILON).floor() as usize
}

/// Rasterizes a region on its own local grid.
///
/// A pixel is 1 when its center is inside or on the boundary of any of the region's
/// polygons, partially covered pixels whose center falls outside are 0.
/// Regions smaller than one pixel give a zero sized grid, not an error.
pub fn build_region_mask(region: &RegionGeometry, region_bbox: &BoundingBox,
                         resolution: &Resolution, georef: &GeoReference) -> Result<MaskRaster> {
    if !(resolution.height > 0.0 && resolution.width > 0.0) {
        return Err(PrepError::Geometry(format!("invalid resolution {}", resolution)));
    }

    let num_rows = pixel_count(region_bbox.north - region_bbox.south, resolution.height);
    let num_cols = pixel_count(region_bbox.east - region_bbox.west, resolution.width);

    let transform = GridTransform::new(
        region_bbox.west, region_bbox.south,
        georef.pixel_width, -georef.pixel_height);

    debug!("Region mask {} rows {} cols, {}", num_rows, num_cols, transform);

    let grid = Array2::from_shape_fn((num_rows, num_cols), |(row, col)| {
        let [x, y] = transform.pixel_center(col, row);
        if region.covers(x, y) { 1.0 } else { 0.0 }
    });

    Ok(MaskRaster { grid, transform })
}
