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
use std::convert::TryFrom;

use gdal::Dataset;
use gdal::vector::LayerAccess;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::georef::BoundingBox;
use crate::region::RegionGeometry;

/// OGR layer holding one feature per region
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegionSource {
    pub ogr_conn_str: String,

    //if empty the first layer is used, fine for shapefiles
    #[serde(default)]
    pub layer_name: String,
}

impl fmt::Display for RegionSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Layer: {:?} ogr conn: {}", self.layer_name, self.ogr_conn_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: u64,
    pub geometry: RegionGeometry,
    pub bbox: BoundingBox,
}

impl Region {
    pub fn new(id: u64, geometry: RegionGeometry) -> Self {
        let bbox = geometry.bounding_box();
        Region { id, geometry, bbox }
    }
}

fn geometry_to_region(id: u64, geometry: &gdal::vector::Geometry) -> Result<Region> {
    let geo_geometry = geometry.to_geo()
        .map_err(|e| PrepError::Geometry(format!("unreadable geometry: {}", e)))?;
    Ok(Region::new(id, RegionGeometry::try_from(geo_geometry)?))
}

/// Reads every feature of the layer as a region, paired with its feature id.
///
/// A feature without usable polygon geometry gives a `Geometry` error in its slot, the
/// caller decides whether to skip it or stop.
pub fn read_regions(source: &RegionSource) -> Result<Vec<(u64, Result<Region>)>> {
    let dataset = Dataset::open(&source.ogr_conn_str)?;

    let mut layer = if source.layer_name.is_empty() {
        dataset.layer(0)?
    } else {
        dataset.layer_by_name(&source.layer_name)?
    };

    let mut regions = Vec::new();

    for (f_idx, feature) in layer.features().enumerate() {
        let id = feature.fid().unwrap_or(f_idx as u64);

        let region = feature.geometry_by_index(0)
            .map_err(|e| PrepError::Geometry(format!("no geometry: {}", e)))
            .and_then(|g| geometry_to_region(id, g));

        if let Ok(r) = &region {
            debug!("Region {} with {} polygons, {}", id, r.geometry.polygons().len(), r.bbox);
        }

        regions.push((id, region));
    }

    Ok(regions)
}
