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
use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;

use crate::error::Result;
use crate::region::RegionSource;

/// Run configuration read from a TOML file
///
/// ```toml
/// inputs = ["population.tif", "settlements.tif"]
/// input_stats = "out/input_stats.csv"
/// output_dir = "out/masks"
///
/// [regions]
/// ogr_conn_str = "regions.shp"
/// layer_name = "regions"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrepConfig {
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    pub input_stats: PathBuf,
    #[serde(default)]
    pub regions: Option<RegionSource>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl PrepConfig {
    pub fn read(path: &Path) -> Result<PrepConfig> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<PrepConfig> {
        Ok(toml::from_str(text)?)
    }

    /// Explicit inputs replace the configured list when given
    pub fn with_inputs(mut self, inputs: &[PathBuf]) -> Self {
        if !inputs.is_empty() {
            self.inputs = inputs.to_vec();
        }
        self
    }
}
