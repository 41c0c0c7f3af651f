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
use log::{debug, info};

use crate::error::{PrepError, Result};
use crate::georef::{BoundingBox, GeoReference, Resolution, calc_geo_reference};
use crate::raster::{RasterMeta, RasterStore};

/// Inputs must be GeoTIFFs with exactly this extension
pub const RASTER_EXTENSION: &str = "tif";

/// Extent, resolution and georeference shared by every input of a run.
///
/// Only [`validate_and_build_georef`] creates one, consumers borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    bbox: BoundingBox,
    resolution: Resolution,
    georef: GeoReference,
}

impl RunContext {
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn georef(&self) -> &GeoReference {
        &self.georef
    }

    /// Output raster columns / rows covering the whole extent
    pub fn grid_size(&self) -> (usize, usize) {
        ((self.bbox.width() / self.resolution.width).round() as usize,
         (self.bbox.height() / self.resolution.height).round() as usize)
    }

    /// Expands `bbox` outward to the pixel grid of the run and clips it to the run extent
    pub fn snap_bbox(&self, bbox: &BoundingBox) -> BoundingBox {
        let t = self.georef.transform();
        let extent = &self.bbox;

        let top = snap_index((bbox.north - t.origin_y) / t.pixel_height, f64::floor);
        let bottom = snap_index((bbox.south - t.origin_y) / t.pixel_height, f64::ceil);
        let left = snap_index((bbox.west - t.origin_x) / t.pixel_width, f64::floor);
        let right = snap_index((bbox.east - t.origin_x) / t.pixel_width, f64::ceil);

        //a box outside the extent collapses to zero size instead of inverting
        let north = (t.origin_y + top * t.pixel_height).min(extent.north);
        let south = (t.origin_y + bottom * t.pixel_height).max(extent.south).min(north);
        let west = (t.origin_x + left * t.pixel_width).max(extent.west);
        let east = (t.origin_x + right * t.pixel_width).min(extent.east).max(west);

        BoundingBox { north, west, south, east }
    }
}

fn snap_index(v: f64, outward: fn(f64) -> f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < 1e-9 {
        r
    } else {
        outward(v)
    }
}

//an input that GDAL cannot open is not a raster
fn read_input_meta<S: RasterStore + ?Sized>(store: &S, input: &Path) -> Result<RasterMeta> {
    store.read_meta(input).map_err(|e| {
        debug!("Reading {:?} failed: {}", input, e);
        PrepError::InputFormat(input.to_path_buf())
    })
}

fn has_raster_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(RASTER_EXTENSION)
}

/// Fails on the first input that is missing or is not a GeoTIFF
pub fn check_input_files<S: RasterStore + ?Sized>(store: &S, inputs: &[PathBuf]) -> Result<()> {
    if inputs.is_empty() {
        return Err(PrepError::Configuration);
    }

    for input in inputs {
        if !store.exists(input) {
            return Err(PrepError::InputNotFound(input.clone()));
        }
        if !has_raster_extension(input) {
            return Err(PrepError::InputFormat(input.clone()));
        }
    }

    Ok(())
}

/// Checks that all inputs share the scope and resolution of the first one and derives
/// the georeference from it.
///
/// Bounding boxes and signed pixel sizes must be exactly equal.
pub fn validate_and_build_georef<S: RasterStore + ?Sized>(store: &S, inputs: &[PathBuf]) -> Result<RunContext> {
    check_input_files(store, inputs)?;

    let reference_path = &inputs[0];
    let reference = read_input_meta(store, reference_path)?;
    let reference_bbox = reference.bounding_box();

    debug!("Reference input {:?}: {} {}", reference_path, reference_bbox, reference.transform);

    for input in &inputs[1..] {
        let meta = read_input_meta(store, input)?;
        let bbox = meta.bounding_box();

        debug!("Input {:?}: {}", input, bbox);

        if bbox != reference_bbox
            || meta.transform.pixel_width != reference.transform.pixel_width
            || meta.transform.pixel_height != reference.transform.pixel_height {
            return Err(PrepError::ExtentMismatch {
                reference: reference_path.clone(),
                path: input.clone(),
            });
        }
    }

    let resolution = Resolution::from_pixel_size(
        reference.transform.pixel_width, reference.transform.pixel_height);
    let georef = calc_geo_reference(&reference_bbox, &resolution);

    info!("{} inputs share extent {} at resolution {}", inputs.len(), reference_bbox, resolution);

    Ok(RunContext {
        bbox: reference_bbox,
        resolution,
        georef,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::georef::GridTransform;
    use crate::raster::MemoryRasterStore;

    fn store_with(inputs: &[(&str, GridTransform, usize, usize)]) -> MemoryRasterStore {
        let mut store = MemoryRasterStore::default();
        for (name, transform, cols, rows) in inputs {
            store.add_meta(name, *transform, *cols, *rows);
        }
        store
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_matching_inputs() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let store = store_with(&[("a.tif", t, 10, 10), ("b.tif", t, 10, 10)]);

        let ctx = validate_and_build_georef(&store, &paths(&["a.tif", "b.tif"])).unwrap();

        assert_eq!(*ctx.bbox(), BoundingBox::new(10.0, 0.0, 0.0, 10.0));
        assert_eq!(*ctx.resolution(), Resolution::new(1.0, 1.0));
        assert_eq!(ctx.georef().raster_origin, [0.0, 10.0]);
        assert_eq!(ctx.georef().pixel_width, 1.0);
        assert_eq!(ctx.georef().pixel_height, -1.0);
        assert_eq!(ctx.grid_size(), (10, 10));
    }

    #[test]
    fn test_pixel_sizes_follow_resolution() {
        let t = GridTransform::new(5.0, 48.0, 0.5, -0.25);
        let store = store_with(&[("a.tif", t, 12, 12)]);

        let ctx = validate_and_build_georef(&store, &paths(&["a.tif"])).unwrap();

        assert_eq!(ctx.georef().pixel_height, -ctx.resolution().height);
        assert_eq!(ctx.georef().pixel_width, ctx.resolution().width);
        assert_eq!(ctx.resolution().height, 0.25);
        assert_eq!(ctx.grid_size(), (12, 12));
    }

    #[test]
    fn test_mismatched_extent() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let shifted = GridTransform::new(1.0, 10.0, 1.0, -1.0);
        let store = store_with(&[("a.tif", t, 10, 10), ("b.tif", shifted, 10, 10)]);

        let err = validate_and_build_georef(&store, &paths(&["a.tif", "b.tif"])).unwrap_err();
        match err {
            PrepError::ExtentMismatch { reference, path } => {
                assert_eq!(reference, PathBuf::from("a.tif"));
                assert_eq!(path, PathBuf::from("b.tif"));
            }
            e => panic!("unexpected error {}", e)
        }
    }

    #[test]
    fn test_mismatched_resolution_same_extent() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let finer = GridTransform::new(0.0, 10.0, 0.5, -0.5);
        let store = store_with(&[("a.tif", t, 10, 10), ("b.tif", finer, 20, 20)]);

        let err = validate_and_build_georef(&store, &paths(&["a.tif", "b.tif"])).unwrap_err();
        assert!(matches!(err, PrepError::ExtentMismatch { .. }));
    }

    #[test]
    fn test_unreadable_input_is_fatal() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let mut store = store_with(&[("a.tif", t, 10, 10)]);
        store.add_unreadable("broken.tif");

        let err = validate_and_build_georef(&store, &paths(&["a.tif", "broken.tif"])).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, PrepError::InputFormat(p) if p == PathBuf::from("broken.tif")));
    }

    #[test]
    fn test_snap_bbox_outward() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let store = store_with(&[("a.tif", t, 10, 10)]);
        let ctx = validate_and_build_georef(&store, &paths(&["a.tif"])).unwrap();

        let snapped = ctx.snap_bbox(&BoundingBox::new(7.3, 1.2, 2.2, 4.5));
        assert_eq!(snapped, BoundingBox::new(8.0, 1.0, 2.0, 5.0));

        let on_grid = ctx.snap_bbox(&BoundingBox::new(8.0, 1.0, 2.0, 5.0));
        assert_eq!(on_grid, BoundingBox::new(8.0, 1.0, 2.0, 5.0));

        let clipped = ctx.snap_bbox(&BoundingBox::new(12.5, -3.0, 2.0, 5.0));
        assert_eq!(clipped, BoundingBox::new(10.0, 0.0, 2.0, 5.0));

        let outside = ctx.snap_bbox(&BoundingBox::new(20.5, 20.0, 20.0, 20.5));
        assert_eq!(outside.height(), 0.0);
        assert_eq!(outside.width(), 0.0);
    }

    #[test]
    fn test_no_inputs() {
        let store = MemoryRasterStore::default();
        let err = validate_and_build_georef(&store, &[]).unwrap_err();
        assert!(matches!(err, PrepError::Configuration));
    }

    #[test]
    fn test_missing_input() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let store = store_with(&[("a.tif", t, 10, 10)]);

        let err = validate_and_build_georef(&store, &paths(&["a.tif", "missing.tif"])).unwrap_err();
        assert!(matches!(err, PrepError::InputNotFound(p) if p == PathBuf::from("missing.tif")));
    }

    #[test]
    fn test_wrong_extension() {
        let t = GridTransform::new(0.0, 10.0, 1.0, -1.0);
        let store = store_with(&[("a.tif", t, 10, 10), ("b.TIF", t, 10, 10), ("c.png", t, 10, 10)]);

        let err = check_input_files(&store, &paths(&["a.tif", "b.TIF"])).unwrap_err();
        assert!(matches!(err, PrepError::InputFormat(p) if p == PathBuf::from("b.TIF")));

        let err = check_input_files(&store, &paths(&["c.png"])).unwrap_err();
        assert!(matches!(err, PrepError::InputFormat(_)));
    }
}
