pub mod objects;
pub mod summary;

pub use objects::{read_object_records, write_detections_csv, ObjectRecord, OBJECT_COLUMNS};
pub use summary::{read_summary, SummaryRow, SummaryWriter};
