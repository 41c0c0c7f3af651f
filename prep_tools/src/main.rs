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
use anyhow::Result;
use geo_prep::PrepError;
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use structopt::StructOpt;

use crate::cmd_check_inputs::{check_inputs, CheckInputsArgs};
use crate::cmd_region_masks::{region_masks, RegionMasksArgs};
use crate::cmd_polygonize::{polygonize, PolygonizeArgs};
use crate::cmd_voronoi::{voronoi, VoronoiArgs};

mod input_args;
mod cmd_check_inputs;
mod cmd_region_masks;
mod cmd_polygonize;
mod cmd_voronoi;

#[derive(StructOpt)]
struct Cli {

    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    cmd: Command
}

#[derive(StructOpt)]
enum Command {
    #[structopt(help="Checks that all input rasters share extent and resolution, creates the input stats table")]
    CheckInputs(CheckInputsArgs),

    #[structopt(help="Writes one mask GeoTIFF per region on the grid of the inputs")]
    RegionMasks(RegionMasksArgs),

    #[structopt(help="Converts band 1 of a raster to polygons in a shapefile")]
    Polygonize(PolygonizeArgs),

    #[structopt(help="Voronoi polygons of points read from a x,y csv, clipped to their convex hull")]
    Voronoi(VoronoiArgs),
}

fn run() -> Result<()> {
    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init()?;

    match &args.cmd {
        Command::CheckInputs(r) => {
            check_inputs(r)?;
        }
        Command::RegionMasks(r) => {
            region_masks(r)?;
        }
        Command::Polygonize(r) => {
            polygonize(r)?;
        }
        Command::Voronoi(r) => {
            voronoi(r)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<PrepError>() {
            Some(pe) if pe.is_fatal() => error!("Validation failed: {}", pe),
            _ => error!("{:#}", e),
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
