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
use std::path::{Path, PathBuf};
use log::debug;
use ndarray::{s, Array2};

use crate::error::{PrepError, Result};
use crate::georef::{GeoReference, GridTransform};
use crate::raster::{CellType, RasterCrs, RasterStore, RasterTarget};

/// CRS of rasters written from explicit origin parameters
pub const GEOGRAPHIC_EPSG: u32 = 4326;

pub const PACKBITS_COMPRESSION: &str = "PACKBITS";

/// Where an output raster takes its georeferencing from
#[derive(Debug, Clone, PartialEq)]
pub enum GeorefSource {
    /// Size, transform and projection of an existing raster
    ReferenceRaster(PathBuf),
    /// North west origin and signed pixel sizes in EPSG:4326; the grid is stored south to north
    Explicit {
        raster_origin: [f64; 2],
        pixel_width: f64,
        pixel_height: f64,
    },
}

impl GeorefSource {
    pub fn from_geo_reference(georef: &GeoReference) -> Self {
        GeorefSource::Explicit {
            raster_origin: georef.raster_origin,
            pixel_width: georef.pixel_width,
            pixel_height: georef.pixel_height,
        }
    }
}

pub fn write_raster<S: RasterStore + ?Sized>(store: &S, grid: &Array2<f64>, destination: &Path, source: &GeorefSource) -> Result<()> {
    match source {
        GeorefSource::ReferenceRaster(input_raster) =>
            array_to_raster(store, grid, destination, input_raster),
        GeorefSource::Explicit { raster_origin, pixel_width, pixel_height } =>
            array2raster(store, destination, *raster_origin, *pixel_width, *pixel_height, grid),
    }
}

/// Writes a grid (typically the clustering output) back as a Float32 raster with the
/// geotransform and projection of `input_raster`.  The grid must have the same size.
pub fn array_to_raster<S: RasterStore + ?Sized>(store: &S, grid: &Array2<f64>, destination: &Path, input_raster: &Path) -> Result<()> {
    let source = store.read_meta(input_raster)?;

    let expected = (source.num_rows, source.num_cols);
    if grid.dim() != expected {
        return Err(PrepError::GridShape {
            path: destination.to_path_buf(),
            expected,
            actual: grid.dim(),
        });
    }

    debug!("Writing {:?} using georeference of {:?}", destination, input_raster);

    let target = RasterTarget {
        transform: source.transform,
        crs: RasterCrs::Wkt(source.projection),
        cell_type: CellType::Float32,
        compression: None,
    };

    store.write_grid(destination, grid, &target)
}

/// Saves a grid as a PACKBITS compressed Float64 GeoTIFF in EPSG:4326.
///
/// Row 0 of `grid` is the southernmost row, so rows are flipped before writing under
/// the north west `raster_origin`.
pub fn array2raster<S: RasterStore + ?Sized>(store: &S, destination: &Path, raster_origin: [f64; 2],
                                             pixel_width: f64, pixel_height: f64,
                                             grid: &Array2<f64>) -> Result<()> {
    if grid.is_empty() {
        return Err(PrepError::EmptyGrid(destination.to_path_buf()));
    }

    let flipped = grid.slice(s![..;-1, ..]).to_owned();

    let target = RasterTarget {
        transform: GridTransform::new(raster_origin[0], raster_origin[1], pixel_width, pixel_height),
        crs: RasterCrs::Epsg(GEOGRAPHIC_EPSG),
        cell_type: CellType::Float64,
        compression: Some(PACKBITS_COMPRESSION.to_string()),
    };

    store.write_grid(destination, &flipped, &target)
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::approx_eq;
    use ndarray::array;
    use tempfile::tempdir;
    use crate::raster::{GdalRasterStore, MemoryRasterStore};

    #[test]
    fn test_array2raster_flips_rows() {
        let store = MemoryRasterStore::default();
        let dest = PathBuf::from("out.tif");

        let grid = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        array2raster(&store, &dest, [10.0, 50.0], 0.5, -0.5, &grid).unwrap();

        let (written, target) = store.written(&dest).unwrap();
        assert_eq!(written, array![[5.0, 6.0], [3.0, 4.0], [1.0, 2.0]]);
        assert_eq!(target.transform, GridTransform::new(10.0, 50.0, 0.5, -0.5));
        assert_eq!(target.crs, RasterCrs::Epsg(4326));
        assert_eq!(target.cell_type, CellType::Float64);
        assert_eq!(target.compression.as_deref(), Some("PACKBITS"));
    }

    #[test]
    fn test_array_to_raster_copies_reference() {
        let mut store = MemoryRasterStore::default();
        let t = GridTransform::new(600000.0, 5200000.0, 100.0, -100.0);
        store.add_meta("ref.tif", t, 3, 2);

        let grid = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let dest = PathBuf::from("clusters.tif");
        write_raster(&store, &grid, &dest, &GeorefSource::ReferenceRaster(PathBuf::from("ref.tif"))).unwrap();

        let (written, target) = store.written(&dest).unwrap();
        assert_eq!(written, grid);
        assert_eq!(target.transform, t);
        assert_eq!(target.cell_type, CellType::Float32);
        assert_eq!(target.compression, None);
        assert_eq!(target.crs, RasterCrs::Wkt("LOCAL_CS[\"test\"]".to_string()));
    }

    #[test]
    fn test_array_to_raster_size_mismatch() {
        let mut store = MemoryRasterStore::default();
        store.add_meta("ref.tif", GridTransform::new(0.0, 2.0, 1.0, -1.0), 2, 2);

        let err = array_to_raster(&store, &array![[1.0, 2.0, 3.0]], Path::new("x.tif"), Path::new("ref.tif"))
            .unwrap_err();
        assert!(matches!(err, PrepError::GridShape { expected: (2, 2), actual: (1, 3), .. }));
        assert!(store.written(Path::new("x.tif")).is_none());
    }

    #[test]
    fn test_explicit_round_trip_gdal() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("region.tif");
        let store = GdalRasterStore;

        let georef = GeoReference {
            raster_origin: [5.9, 47.8],
            raster_origin_alt: [5.9, 45.8],
            pixel_width: 0.1,
            pixel_height: -0.1,
        };
        let grid = Array2::from_shape_fn((20, 30), |(r, c)| (r * 30 + c) as f64);

        write_raster(&store, &grid, &dest, &GeorefSource::from_geo_reference(&georef)).unwrap();

        let meta = store.read_meta(&dest).unwrap();
        assert!(approx_eq!(f64, meta.transform.origin_x, 5.9, epsilon = 1e-12));
        assert!(approx_eq!(f64, meta.transform.origin_y, 47.8, epsilon = 1e-12));
        assert!(approx_eq!(f64, meta.transform.pixel_width, 0.1, epsilon = 1e-12));
        assert!(approx_eq!(f64, meta.transform.pixel_height, -0.1, epsilon = 1e-12));
        assert_eq!((meta.num_rows, meta.num_cols), (20, 30));
        assert!(meta.projection.contains("4326"));

        let read_back = store.read_grid(&dest).unwrap();
        assert_eq!(read_back[[0, 0]], grid[[19, 0]]);
        assert_eq!(read_back[[19, 29]], grid[[0, 29]]);
    }

    #[test]
    fn test_reference_round_trip_gdal() {
        let dir = tempdir().unwrap();
        let reference = dir.path().join("ref.tif");
        let dest = dir.path().join("out.tif");
        let store = GdalRasterStore;

        array2raster(&store, &reference, [0.0, 10.0], 1.0, -1.0, &Array2::ones((10, 10))).unwrap();

        let grid = Array2::from_shape_fn((10, 10), |(r, c)| if r == c { 2.0 } else { 0.0 });
        array_to_raster(&store, &grid, &dest, &reference).unwrap();

        let meta = store.read_meta(&dest).unwrap();
        assert_eq!(meta.transform, GridTransform::new(0.0, 10.0, 1.0, -1.0));
        assert_eq!(store.read_grid(&dest).unwrap(), grid);
    }
}
