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
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("No input file given!")]
    Configuration,

    #[error("File does not exist: {0:?}")]
    InputNotFound(PathBuf),

    #[error("File is not raster: {0:?}")]
    InputFormat(PathBuf),

    #[error("Not the same scope / resolution! {path:?} differs from {reference:?}")]
    ExtentMismatch {
        reference: PathBuf,
        path: PathBuf,
    },

    #[error("Invalid region geometry: {0}")]
    Geometry(String),

    #[error("Polygonize of {path:?} failed: {msg}")]
    Polygonize {
        path: PathBuf,
        msg: String,
    },

    #[error("Grid for {path:?} is {actual:?} (rows, cols) but {expected:?} is required")]
    GridShape {
        path: PathBuf,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Refusing to write empty grid to {0:?}")]
    EmptyGrid(PathBuf),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Gdal(#[from] gdal::errors::GdalError),

    #[error(transparent)]
    Geos(#[from] geos::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl PrepError {
    /// Validation failures abort the whole run, everything else is up to the caller
    pub fn is_fatal(&self) -> bool {
        matches!(self,
            PrepError::Configuration
            | PrepError::InputNotFound(_)
            | PrepError::InputFormat(_)
            | PrepError::ExtentMismatch { .. }
        )
    }
}
