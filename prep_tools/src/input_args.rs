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
use anyhow::Result;
use geo_prep::config::PrepConfig;
use log::debug;
use structopt::StructOpt;

pub const DEFAULT_INPUT_STATS: &str = "input_stats.csv";

/// Input rasters, given directly or through a config file
#[derive(StructOpt, Debug, Default)]
pub struct InputArgs {
    #[structopt(parse(from_os_str), long)]
    pub config: Option<PathBuf>,

    #[structopt(parse(from_os_str), long = "input", help="Input raster, repeat for each input.  Replaces the inputs of the config")]
    pub inputs: Vec<PathBuf>,

    #[structopt(parse(from_os_str), long)]
    pub input_stats: Option<PathBuf>,
}

impl InputArgs {
    pub fn load(&self) -> Result<PrepConfig> {
        let mut config = match &self.config {
            Some(path) => {
                debug!("Reading config {:?}", path);
                PrepConfig::read(path)?.with_inputs(&self.inputs)
            }
            None => PrepConfig {
                inputs: self.inputs.clone(),
                input_stats: PathBuf::from(DEFAULT_INPUT_STATS),
                regions: None,
                output_dir: None,
            },
        };

        if let Some(input_stats) = &self.input_stats {
            config.input_stats = input_stats.clone();
        }

        Ok(config)
    }
}
