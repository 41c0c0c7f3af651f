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
use std::fs::create_dir_all;
use std::path::Path;

use gdal::{Dataset, DriverManager};
use gdal::raster::{Buffer, GdalType, RasterCreationOption};
use gdal::spatial_ref::SpatialRef;
use log::debug;
use ndarray::Array2;

use crate::error::{PrepError, Result};
use crate::georef::GridTransform;
use crate::raster::{RasterMeta, GTIFF_DRIVER};

/// Coordinate reference system stamped on an output raster
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCrs {
    Wkt(String),
    Epsg(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Float32,
    Float64,
}

/// Everything besides the values needed to write a grid
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTarget {
    pub transform: GridTransform,
    pub crs: RasterCrs,
    pub cell_type: CellType,
    /// GTiff COMPRESS creation option
    pub compression: Option<String>,
}

/// Raster I/O used by validation and the array writers.
///
/// Grids are (rows, cols), row 0 is the first row of the file.
pub trait RasterStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_meta(&self, path: &Path) -> Result<RasterMeta>;

    /// Band 1 as f64
    fn read_grid(&self, path: &Path) -> Result<Array2<f64>>;

    /// Creates or overwrites a single band raster at `path`
    fn write_grid(&self, path: &Path, grid: &Array2<f64>, target: &RasterTarget) -> Result<()>;
}

/// GeoTIFF files through GDAL
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalRasterStore;

fn write_band<T: GdalType + Copy>(dataset: &Dataset, grid: &Array2<f64>, convert: impl Fn(f64) -> T) -> Result<()> {
    let (num_rows, num_cols) = grid.dim();
    let data: Vec<T> = grid.iter().map(|v| convert(*v)).collect();

    let mut band = dataset.rasterband(1)?;
    band.write((0, 0), (num_cols, num_rows), &Buffer::new((num_cols, num_rows), data))?;

    Ok(())
}

impl RasterStore for GdalRasterStore {
    fn read_meta(&self, path: &Path) -> Result<RasterMeta> {
        RasterMeta::read(path)
    }

    fn read_grid(&self, path: &Path) -> Result<Array2<f64>> {
        let dataset = Dataset::open(path)?;
        let (num_cols, num_rows) = dataset.raster_size();
        let band = dataset.rasterband(1)?;

        let buffer = band.read_as::<f64>((0, 0), (num_cols, num_rows), (num_cols, num_rows), None)?;

        Ok(Array2::from_shape_vec((num_rows, num_cols), buffer.data)?)
    }

    fn write_grid(&self, path: &Path, grid: &Array2<f64>, target: &RasterTarget) -> Result<()> {
        let (num_rows, num_cols) = grid.dim();
        if num_rows == 0 || num_cols == 0 {
            return Err(PrepError::EmptyGrid(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_dir_all(parent)?;
            }
        }

        debug!("Creating output tif {:?} with {} rows and {} cols", path, num_rows, num_cols);

        let drv = DriverManager::get_driver_by_name(GTIFF_DRIVER)?;

        let options: Vec<RasterCreationOption> = target.compression.iter()
            .map(|c| RasterCreationOption { key: "COMPRESS", value: c.as_str() })
            .collect();

        let mut ds = match target.cell_type {
            CellType::Float32 => drv.create_with_band_type_with_options::<f32, _>(
                path, num_cols as isize, num_rows as isize, 1, &options)?,
            CellType::Float64 => drv.create_with_band_type_with_options::<f64, _>(
                path, num_cols as isize, num_rows as isize, 1, &options)?,
        };

        ds.set_geo_transform(&target.transform.to_geo_transform())?;

        match &target.crs {
            RasterCrs::Wkt(wkt) => {
                if !wkt.is_empty() {
                    ds.set_projection(wkt)?;
                }
            }
            RasterCrs::Epsg(code) => {
                ds.set_spatial_ref(&SpatialRef::from_epsg(*code)?)?;
            }
        }

        match target.cell_type {
            CellType::Float32 => write_band(&ds, grid, |v| v as f32)?,
            CellType::Float64 => write_band(&ds, grid, |v| v)?,
        }

        debug!("Wrote {:?}", path);

        Ok(())
    }
}
