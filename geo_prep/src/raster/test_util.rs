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
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use ndarray::Array2;

use crate::error::{PrepError, Result};
use crate::georef::GridTransform;
use crate::raster::{RasterCrs, RasterMeta, RasterStore, RasterTarget};

/// In memory stand in for GDAL, files only exist once added or written
#[derive(Default)]
pub struct MemoryRasterStore {
    metas: HashMap<PathBuf, RasterMeta>,
    //exist on disk but do not open
    unreadable: HashSet<PathBuf>,
    written: RefCell<HashMap<PathBuf, (Array2<f64>, RasterTarget)>>,
}

impl MemoryRasterStore {
    pub fn add_meta(&mut self, name: &str, transform: GridTransform, num_cols: usize, num_rows: usize) {
        self.metas.insert(PathBuf::from(name), RasterMeta {
            transform,
            num_cols,
            num_rows,
            projection: "LOCAL_CS[\"test\"]".to_string(),
        });
    }

    pub fn add_unreadable(&mut self, name: &str) {
        self.unreadable.insert(PathBuf::from(name));
    }

    pub fn written(&self, path: &Path) -> Option<(Array2<f64>, RasterTarget)> {
        self.written.borrow().get(path).cloned()
    }
}

impl RasterStore for MemoryRasterStore {
    fn exists(&self, path: &Path) -> bool {
        self.metas.contains_key(path) || self.unreadable.contains(path) || self.written.borrow().contains_key(path)
    }

    fn read_meta(&self, path: &Path) -> Result<RasterMeta> {
        if self.unreadable.contains(path) {
            return Err(PrepError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, "not a raster")));
        }
        if let Some(meta) = self.metas.get(path) {
            return Ok(meta.clone());
        }

        let written = self.written.borrow();
        let (grid, target) = written.get(path)
            .ok_or_else(|| PrepError::InputNotFound(path.to_path_buf()))?;

        Ok(RasterMeta {
            transform: target.transform,
            num_cols: grid.ncols(),
            num_rows: grid.nrows(),
            projection: match &target.crs {
                RasterCrs::Wkt(wkt) => wkt.clone(),
                RasterCrs::Epsg(code) => format!("EPSG:{}", code),
            },
        })
    }

    fn read_grid(&self, path: &Path) -> Result<Array2<f64>> {
        if let Some((grid, _)) = self.written.borrow().get(path) {
            return Ok(grid.clone());
        }

        let meta = self.metas.get(path)
            .ok_or_else(|| PrepError::InputNotFound(path.to_path_buf()))?;
        Ok(Array2::zeros((meta.num_rows, meta.num_cols)))
    }

    fn write_grid(&self, path: &Path, grid: &Array2<f64>, target: &RasterTarget) -> Result<()> {
        if grid.is_empty() {
            return Err(PrepError::EmptyGrid(path.to_path_buf()));
        }
        self.written.borrow_mut().insert(path.to_path_buf(), (grid.clone(), target.clone()));
        Ok(())
    }
}
