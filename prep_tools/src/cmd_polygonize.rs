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
use std::path::PathBuf;
use std::time::Instant;
use anyhow::Result;
use geo_prep::raster::polygonize_raster;
use geo_prep::util::log_elapsed;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct PolygonizeArgs {
    #[structopt(parse(from_os_str), long)]
    input_raster: PathBuf,

    #[structopt(parse(from_os_str), long)]
    output_shapefile: PathBuf,

    #[structopt(long, default_value = "value")]
    column_name: String,
}

pub fn polygonize(args: &PolygonizeArgs) -> Result<()> {
    let now = Instant::now();

    polygonize_raster(&args.input_raster, &args.output_shapefile, &args.column_name)?;

    log_elapsed("Polygonize", &now);

    Ok(())
}
