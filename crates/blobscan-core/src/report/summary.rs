use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scene::SceneClass;

/// Per-image record in the aggregate summary table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub filename: String,
    /// Dark pixels as a percentage of the whole image.
    pub dark_percentage: f64,
    pub object_count: usize,
    pub scene_class: SceneClass,
    /// Annotated image written for this input.
    pub output_path: String,
}

/// Appends summary rows to a CSV file, writing the header only when the file
/// is new or empty. Each row is flushed as soon as it is written.
pub struct SummaryWriter {
    path: PathBuf,
    wtr: csv::Writer<File>,
    rows_written: usize,
}

impl SummaryWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let needs_header = std::fs::metadata(path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let wtr = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        Ok(Self {
            path: path.to_path_buf(),
            wtr,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, row: &SummaryRow) -> Result<()> {
        self.wtr.serialize(row)?;
        self.wtr.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended through this writer (not counting earlier runs).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

/// Read every row of a summary table.
pub fn read_summary(path: &Path) -> Result<Vec<SummaryRow>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
