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
use std::path::Path;

use gdal::{DriverManager, LayerOptions};
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{FieldValue, LayerAccess, OGRFieldType, OGRwkbGeometryType, ToGdal};
use geo::Polygon;
use log::debug;

use crate::error::Result;
use crate::raster::{delete_vector_dataset, layer_name_for, SHAPEFILE_DRIVER};

/// Writes polygons to a new shapefile, numbering them 0.. in the integer field `id_field`.
/// An existing shapefile is replaced.
pub fn write_polygons(output_shapefile: &Path, polygons: &[Polygon<f64>], srs: Option<&SpatialRef>, id_field: &str) -> Result<()> {
    let driver = DriverManager::get_driver_by_name(SHAPEFILE_DRIVER)?;
    if output_shapefile.exists() {
        delete_vector_dataset(&driver, output_shapefile)?;
    }

    let mut ds = driver.create_vector_only(output_shapefile)?;
    let layer_name = layer_name_for(output_shapefile);
    let mut lyr = ds.create_layer(LayerOptions {
        name: &layer_name,
        srs,
        ty: OGRwkbGeometryType::wkbPolygon,
        ..Default::default()
    })?;
    lyr.create_defn_fields(&[(id_field, OGRFieldType::OFTInteger)])?;

    for (idx, polygon) in polygons.iter().enumerate() {
        lyr.create_feature_fields(
            polygon.to_gdal()?,
            &[id_field],
            &[FieldValue::IntegerValue(idx as i32)],
        )?;
    }

    debug!("Wrote {} polygons to {:?}", polygons.len(), output_shapefile);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use gdal::Dataset;
    use geo::{coord, Rect};
    use tempfile::tempdir;

    #[test]
    fn test_write_polygons() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cells.shp");
        let polygons: Vec<Polygon<f64>> = (0..3)
            .map(|i| Rect::new(coord! { x: i as f64, y: 0.0 }, coord! { x: i as f64 + 1.0, y: 1.0 }).to_polygon())
            .collect();
        let srs = SpatialRef::from_epsg(4326).unwrap();

        write_polygons(&path, &polygons, Some(&srs), "id").unwrap();
        //second write replaces the first
        write_polygons(&path, &polygons[..2], Some(&srs), "id").unwrap();

        let ds = Dataset::open(&path).unwrap();
        let mut lyr = ds.layer(0).unwrap();
        assert_eq!(lyr.feature_count(), 2);

        let ids: Vec<_> = lyr.features().map(|f| f.field("id").unwrap()).collect();
        assert_eq!(ids, vec![Some(FieldValue::IntegerValue(0)), Some(FieldValue::IntegerValue(1))]);
    }
}
