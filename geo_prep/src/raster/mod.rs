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
use std::path::Path;
use gdal::Dataset;

use crate::error::Result;
use crate::georef::{BoundingBox, GridTransform};

mod store;
mod convert;
mod polygonize;

#[cfg(test)]
mod test_util;

pub use store::*;
pub use convert::*;
pub use polygonize::*;
#[cfg(test)]
pub use test_util::*;

pub const GTIFF_DRIVER: &str = "GTiff";

/// Georeferencing and size of a single band raster
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterMeta {
    pub transform: GridTransform,
    pub num_cols: usize,
    pub num_rows: usize,

    //WKT projection string
    pub projection: String,
}

impl RasterMeta {
    pub fn new(dataset: &Dataset) -> Result<Self> {
        let geo_transform = dataset.geo_transform()?;
        let (num_cols, num_rows) = dataset.raster_size();

        Ok(RasterMeta {
            transform: GridTransform::from_geo_transform(&geo_transform),
            num_cols,
            num_rows,
            projection: dataset.projection(),
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let dataset = Dataset::open(path)?;
        RasterMeta::new(&dataset)
    }

    /// north = origin y, south = origin y + pixel height * rows, and likewise for x
    pub fn bounding_box(&self) -> BoundingBox {
        self.transform.bounding_box(self.num_cols, self.num_rows)
    }
}

impl fmt::Display for RasterMeta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\nRows: {} Cols: {}\nExtent: {}\nProjection: {}",
               self.transform,
               self.num_rows,
               self.num_cols,
               self.bounding_box(),
               &self.projection
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bounding_box_from_meta() {
        let meta = RasterMeta {
            transform: GridTransform::new(-10.0, 60.0, 0.5, -0.5),
            num_cols: 40,
            num_rows: 20,
            projection: String::new(),
        };

        assert_eq!(meta.bounding_box(), BoundingBox::new(60.0, -10.0, 50.0, 10.0));
    }
}
