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
use std::time::Instant;
use anyhow::Result;
use geo_prep::georef::{validate_and_build_georef, RunContext};
use geo_prep::raster::GdalRasterStore;
use geo_prep::stats::init_input_stats;
use geo_prep::util::log_elapsed;
use log::info;
use structopt::StructOpt;

use crate::input_args::InputArgs;

#[derive(StructOpt)]
pub struct CheckInputsArgs {
    #[structopt(flatten)]
    input: InputArgs,
}

pub fn print_run_context(ctx: &RunContext) {
    let (num_cols, num_rows) = ctx.grid_size();

    println!("Extent: {}", ctx.bbox());
    println!("Resolution: {}", ctx.resolution());
    println!("{}", ctx.georef());
    println!("Columns: {} Rows: {}", num_cols, num_rows);
}

pub fn check_inputs(args: &CheckInputsArgs) -> Result<()> {
    let now = Instant::now();
    let config = args.input.load()?;

    info!("Checking {} inputs", config.inputs.len());

    let ctx = validate_and_build_georef(&GdalRasterStore, &config.inputs)?;

    print_run_context(&ctx);

    if let Some(parent) = config.input_stats.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    if init_input_stats(&config.input_stats)? {
        info!("Created input stats {:?}", &config.input_stats);
    } else {
        info!("Input stats {:?} already exists, left as is", &config.input_stats);
    }

    log_elapsed("Input check", &now);

    Ok(())
}
