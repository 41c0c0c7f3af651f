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
//! Prepares raster inputs for the clustering step: checks that every input shares one
//! extent and resolution, derives the shared georeference, builds per region masks
//! and converts between grids, GeoTIFFs and polygons.

pub mod error;
pub mod georef;
pub mod raster;
pub mod region;
pub mod vector;
pub mod stats;
pub mod config;
pub mod util;

pub use error::{PrepError, Result};
