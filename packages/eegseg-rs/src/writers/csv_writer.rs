/// Segment CSV writer
///
/// One row per channel, one column per sample, values printed with a fixed
/// number of decimals. No header row and no index column.
use crate::error::{EegSegError, Result};
use crate::segment::SegmentSet;
use ndarray::{Array2, ArrayView2};
use std::path::Path;

pub fn write_segment_csv(path: &Path, window: ArrayView2<'_, f64>, precision: usize) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    for row in window.rows() {
        writer.write_record(row.iter().map(|v| format!("{:.*}", precision, v)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every window of `set` into `dir` as `1.csv`, `2.csv`, ...
///
/// `dir` must already exist. Returns the number of files written.
pub fn write_segment_folder(dir: &Path, set: &SegmentSet, precision: usize) -> Result<usize> {
    for i in 0..set.num_segments() {
        let path = dir.join(format!("{}.csv", i + 1));
        write_segment_csv(&path, set.segment(i), precision)?;
    }
    Ok(set.num_segments())
}

/// Load a segment table written by [`write_segment_csv`] back into a channel × sample array.
pub fn read_segment_csv(path: &Path) -> Result<Array2<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut values = Vec::new();
    let mut rows = 0;
    let mut cols = None;
    for record in reader.records() {
        let record = record?;
        match cols {
            None => cols = Some(record.len()),
            Some(n) if n != record.len() => {
                return Err(EegSegError::InvalidData(format!(
                    "{}: row {} has {} columns, expected {}",
                    path.display(),
                    rows + 1,
                    record.len(),
                    n
                )))
            }
            Some(_) => {}
        }
        for field in record.iter() {
            let value = field.trim().parse::<f64>().map_err(|_| {
                EegSegError::InvalidData(format!("{}: '{}' is not a number", path.display(), field))
            })?;
            values.push(value);
        }
        rows += 1;
    }

    Array2::from_shape_vec((rows, cols.unwrap_or(0)), values)
        .map_err(|e| EegSegError::InvalidData(e.to_string()))
}
