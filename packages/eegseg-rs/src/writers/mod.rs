/// Output writers for exported segments.
///
/// A recording's segment stack goes to a single MAT file; each window also
/// goes to its own headerless CSV table.
pub mod csv_writer;
pub mod mat_writer;

pub use csv_writer::{read_segment_csv, write_segment_csv, write_segment_folder};
pub use mat_writer::{sanitize_variable_name, MatArray, MatWriter};
