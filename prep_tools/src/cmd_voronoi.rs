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
use std::time::Instant;
use anyhow::Result;
use gdal::spatial_ref::SpatialRef;
use geo::{coord, Coord};
use geo_prep::util::log_elapsed;
use geo_prep::vector::{create_voronoi_polygons, write_polygons};
use log::info;
use serde::Deserialize;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct VoronoiArgs {
    #[structopt(parse(from_os_str), long, help="csv with x and y columns")]
    points: PathBuf,

    #[structopt(parse(from_os_str), long)]
    output_shapefile: PathBuf,

    #[structopt(long, help="EPSG code written to the output, none if not given")]
    epsg: Option<u32>,

    #[structopt(long, default_value = "id")]
    id_field: String,
}

#[derive(Deserialize)]
struct PointRecord {
    x: f64,
    y: f64,
}

pub fn read_points(path: &Path) -> Result<Vec<Coord<f64>>> {
    let mut rdr = csv::Reader::from_path(path)?;

    let mut points = Vec::new();
    for rec in rdr.deserialize() {
        let rec: PointRecord = rec?;
        points.push(coord! { x: rec.x, y: rec.y });
    }

    Ok(points)
}

pub fn voronoi(args: &VoronoiArgs) -> Result<()> {
    let now = Instant::now();

    let points = read_points(&args.points)?;
    let polygons = create_voronoi_polygons(&points)?;

    info!("{} points gave {} voronoi polygons", points.len(), polygons.len());

    let srs = match args.epsg {
        Some(code) => Some(SpatialRef::from_epsg(code)?),
        None => None,
    };
    write_polygons(&args.output_shapefile, &polygons, srs.as_ref(), &args.id_field)?;

    log_elapsed("Voronoi", &now);

    Ok(())
}
