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
use std::ffi::CString;
use std::path::Path;
use std::ptr::null_mut;

use gdal::{Dataset, Driver, DriverManager, LayerOptions};
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{LayerAccess, OGRFieldType, OGRwkbGeometryType};
use gdal_sys::CPLErr;
use log::debug;

use crate::error::{PrepError, Result};

pub const SHAPEFILE_DRIVER: &str = "ESRI Shapefile";

/// Deletes a vector dataset together with its side car files
pub fn delete_vector_dataset(driver: &Driver, path: &Path) -> Result<()> {
    let c_path = CString::new(path.to_string_lossy().as_bytes())
        .map_err(|e| PrepError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;

    let rv = unsafe { gdal_sys::GDALDeleteDataset(driver.c_driver(), c_path.as_ptr()) };
    if rv != CPLErr::CE_None {
        return Err(PrepError::Io(std::io::Error::new(
            std::io::ErrorKind::Other, format!("Could not delete {:?}", path))));
    }

    Ok(())
}

/// Name used for a layer created inside `path`
pub fn layer_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "layer".to_string())
}

/// Turns band 1 of `input_file` into polygons of connected equal values.  Each polygon
/// carries its raster value in the integer field `column_name`.
///
/// An existing shapefile at `output_shapefile` is replaced.
pub fn polygonize_raster(input_file: &Path, output_shapefile: &Path, column_name: &str) -> Result<()> {
    let source_raster = Dataset::open(input_file)?;
    let band = source_raster.rasterband(1)?;

    let driver = DriverManager::get_driver_by_name(SHAPEFILE_DRIVER)?;
    if output_shapefile.exists() {
        debug!("Removing existing {:?}", output_shapefile);
        delete_vector_dataset(&driver, output_shapefile)?;
    }

    let mut out_data_source = driver.create_vector_only(output_shapefile)?;

    let projection = source_raster.projection();
    let srs = if projection.is_empty() {
        None
    } else {
        Some(SpatialRef::from_wkt(&projection)?)
    };

    let layer_name = layer_name_for(output_shapefile);
    let out_layer = out_data_source.create_layer(LayerOptions {
        name: &layer_name,
        srs: srs.as_ref(),
        ty: OGRwkbGeometryType::wkbPolygon,
        ..Default::default()
    })?;
    out_layer.create_defn_fields(&[(column_name, OGRFieldType::OFTInteger)])?;

    let rv = unsafe {
        gdal_sys::GDALPolygonize(
            band.c_rasterband(),
            null_mut(),
            out_layer.c_layer(),
            0,
            null_mut(),
            None,
            null_mut(),
        )
    };

    if rv != CPLErr::CE_None {
        return Err(PrepError::Polygonize {
            path: input_file.to_path_buf(),
            msg: format!("GDALPolygonize returned {:?}", rv),
        });
    }

    debug!("Polygonized {:?} into {:?}", input_file, output_shapefile);

    Ok(())
}
