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
use std::path::Path;
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;

use crate::error::Result;

/// Row labels of the input stats table, filled in by later steps
pub const INPUT_STATS_ROWS: [&str; 8] = [
    "map_parts_total",
    "output_raster_columns",
    "output_raster_rows",
    "ref_part_name",
    "size_max",
    "std_max",
    "max_no_of_cl_ref",
    "max_no_of_cl_total",
];

pub const INPUT_STATS_COLUMN: &str = "value";

const DELIMITER: u8 = b';';

/// Numbers are stored with a decimal comma
pub fn format_decimal(v: f64) -> String {
    v.to_string().replace('.', ",")
}

pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse().ok()
}

/// Creates the empty input stats table unless a file already exists at `path`.
/// Returns true when the file was created.
pub fn init_input_stats(path: &Path) -> Result<bool> {
    if path.exists() {
        debug!("Input stats {:?} already exists", path);
        return Ok(false);
    }

    let rows: Vec<(&str, String)> = INPUT_STATS_ROWS.iter().map(|r| (*r, String::new())).collect();
    write_input_stats(path, &rows)?;

    debug!("Created input stats {:?}", path);

    Ok(true)
}

pub fn write_input_stats<S: AsRef<str>>(path: &Path, rows: &[(S, String)]) -> Result<()> {
    let mut csv_f = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)?;

    csv_f.write_record(&["", INPUT_STATS_COLUMN])?;
    for (label, value) in rows {
        csv_f.write_record(&[label.as_ref(), value.as_str()])?;
    }
    csv_f.flush()?;

    Ok(())
}

/// (label, value) pairs in file order, values as written
pub fn read_input_stats(path: &Path) -> Result<Vec<(String, String)>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let label = record.get(0).unwrap_or_default().to_string();
        let value = record.get(1).unwrap_or_default().to_string();
        rows.push((label, value));
    }

    Ok(rows)
}

/// Sets one value of an existing table, adding the row if needed
pub fn set_input_stat(path: &Path, label: &str, value: &str) -> Result<()> {
    let mut rows = read_input_stats(path)?;

    match rows.iter_mut().find(|(l, _)| l == label) {
        Some(row) => row.1 = value.to_string(),
        None => rows.push((label.to_string(), value.to_string())),
    }

    write_input_stats(path, &rows)
}
