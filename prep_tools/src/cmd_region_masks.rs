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
use std::path::{Path, PathBuf};
use std::time::Instant;
use anyhow::{anyhow, Result};
use geo_prep::PrepError;
use geo_prep::georef::{validate_and_build_georef, RunContext};
use geo_prep::raster::{array2raster, GdalRasterStore, RasterStore};
use geo_prep::region::{build_region_mask, read_regions, Region, RegionSource};
use geo_prep::util::log_elapsed;
use log::{debug, info, warn};
use structopt::StructOpt;

use crate::input_args::InputArgs;

#[derive(StructOpt)]
pub struct RegionMasksArgs {
    #[structopt(flatten)]
    input: InputArgs,

    #[structopt(long, help="Vector source of the regions, replaces the regions of the config")]
    ogr_conn_str: Option<String>,

    #[structopt(long)]
    layer_name: Option<String>,

    #[structopt(parse(from_os_str), long)]
    output_dir: Option<PathBuf>,
}

pub fn mask_file_name(output_dir: &Path, region: &Region) -> PathBuf {
    output_dir.join(format!("region_{}.tif", region.id))
}

/// Writes the mask of one region, returns false when the region has nothing to write
pub fn write_region_mask<S: RasterStore + ?Sized>(store: &S, ctx: &RunContext, region: &Region, output_dir: &Path) -> geo_prep::Result<bool> {
    let snapped = ctx.snap_bbox(&region.bbox);
    let mask = build_region_mask(&region.geometry, &snapped, ctx.resolution(), ctx.georef())?;

    if mask.is_empty() {
        warn!("Region {} is smaller than a pixel, skipped", region.id);
        return Ok(false);
    }

    let output_file = mask_file_name(output_dir, region);
    debug!("Region {}: {} of {} pixels inside, writing {:?}",
        region.id, mask.count_inside(), mask.num_rows() * mask.num_cols(), &output_file);

    let georef = ctx.georef();
    array2raster(store, &output_file, [snapped.west, snapped.north],
                 georef.pixel_width, georef.pixel_height, &mask.grid)?;

    Ok(true)
}

/// Writes every region mask and returns how many were written.
///
/// Regions with bad geometry are logged and skipped, any other error stops the run.
pub fn write_region_masks<S: RasterStore + ?Sized>(store: &S, ctx: &RunContext,
                                                   regions: Vec<(u64, geo_prep::Result<Region>)>,
                                                   output_dir: &Path) -> geo_prep::Result<usize> {
    let mut num_written = 0;

    for (id, region) in regions {
        let written = region.and_then(|r| write_region_mask(store, ctx, &r, output_dir));

        match written {
            Ok(true) => num_written += 1,
            Ok(false) => {}
            Err(PrepError::Geometry(msg)) => warn!("Region {} skipped: {}", id, msg),
            Err(e) => return Err(e),
        }
    }

    Ok(num_written)
}

pub fn region_masks(args: &RegionMasksArgs) -> Result<()> {
    let now = Instant::now();
    let config = args.input.load()?;

    let source = match (&args.ogr_conn_str, &config.regions) {
        (Some(conn), _) => RegionSource {
            ogr_conn_str: conn.clone(),
            layer_name: args.layer_name.clone().unwrap_or_default(),
        },
        (None, Some(source)) => source.clone(),
        (None, None) => return Err(anyhow!("No regions given, use --ogr-conn-str or a config with [regions]")),
    };

    let output_dir = args.output_dir.clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let ctx = validate_and_build_georef(&GdalRasterStore, &config.inputs)?;
    info!("Georeference {}", ctx.georef().transform());

    let regions = read_regions(&source)?;
    let num_regions = regions.len();
    info!("Read {} regions from {}", num_regions, source);

    create_dir_all(&output_dir)?;

    let num_written = write_region_masks(&GdalRasterStore, &ctx, regions, &output_dir)?;

    info!("Wrote {} of {} region masks to {:?}", num_written, num_regions, &output_dir);
    log_elapsed("Region masks", &now);

    Ok(())
}
