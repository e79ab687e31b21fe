use tempfile::TempDir;

use blobscan_core::detection::{BoundingBox, Detection};
use blobscan_core::report::{
    read_object_records, read_summary, write_detections_csv, ObjectRecord, SummaryRow,
    SummaryWriter, OBJECT_COLUMNS,
};
use blobscan_core::scene::SceneClass;

fn detection(x1: usize, y1: usize, x2: usize, y2: usize, area: usize) -> Detection {
    Detection {
        bbox: BoundingBox::new(x1, y1, x2, y2),
        area,
        mean_intensity: 0.75,
        aspect_ratio: 1.25,
        compactness: 0.8,
    }
}

fn row(name: &str, objects: usize) -> SummaryRow {
    SummaryRow {
        filename: name.to_string(),
        dark_percentage: 42.5,
        object_count: objects,
        scene_class: SceneClass::Mixed,
        output_path: format!("out/{name}_detected.png"),
    }
}

// ---------------------------------------------------------------------------
// Bounding-box tables
// ---------------------------------------------------------------------------

#[test]
fn test_detections_csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a_boxes.csv");
    let dets = vec![detection(10, 20, 19, 27, 64), detection(0, 0, 4, 4, 25)];

    write_detections_csv(&path, "a.png", SceneClass::Urban, &dets).unwrap();
    let records = read_object_records(&path).unwrap();

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.image, "a.png");
    assert_eq!(first.bbox(), BoundingBox::new(10, 20, 19, 27));
    assert_eq!((first.width, first.height), (10, 8));
    assert_eq!(first.area, 64);
    assert_eq!(first.scene_class, SceneClass::Urban);
    approx::assert_abs_diff_eq!(first.mean_intensity, 0.75, epsilon = 1e-6);

    assert_eq!(
        records[1],
        ObjectRecord::from_detection("a.png", SceneClass::Urban, &dets[1])
    );
}

#[test]
fn test_detections_csv_header_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("b_boxes.csv");
    write_detections_csv(&path, "b.png", SceneClass::WaterHeavy, &[detection(1, 2, 3, 4, 9)])
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "image,x1,y1,x2,y2,width,height,area,mean_intensity,aspect_ratio,compactness,scene_class"
    );
    assert!(lines.next().unwrap().ends_with(",water-heavy"));
}

#[test]
fn test_empty_detections_still_write_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty_boxes.csv");
    write_detections_csv(&path, "empty.png", SceneClass::Mixed, &[]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("image,x1,y1"));
    assert!(read_object_records(&path).unwrap().is_empty());
}

#[test]
fn test_object_columns_match_record_fields() {
    let record = ObjectRecord::from_detection(
        "c.png",
        SceneClass::Urban,
        &detection(0, 0, 4, 4, 20),
    );
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.serialize(&record).unwrap();
    let bytes = wtr.into_inner().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().next().unwrap(), OBJECT_COLUMNS.join(","));
}

#[test]
fn test_empty_and_filled_tables_share_header() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty_boxes.csv");
    let filled = dir.path().join("filled_boxes.csv");
    write_detections_csv(&empty, "e.png", SceneClass::Mixed, &[]).unwrap();
    write_detections_csv(&filled, "f.png", SceneClass::Mixed, &[detection(1, 1, 5, 5, 25)])
        .unwrap();

    let first_line = |p: &std::path::Path| {
        std::fs::read_to_string(p).unwrap().lines().next().unwrap().to_string()
    };
    assert_eq!(first_line(&empty), first_line(&filled));
    assert_eq!(read_object_records(&filled).unwrap().len(), 1);
}

#[test]
fn test_read_missing_table_fails() {
    let dir = TempDir::new().unwrap();
    assert!(read_object_records(&dir.path().join("nope.csv")).is_err());
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

#[test]
fn test_summary_writer_creates_file_with_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");

    let mut writer = SummaryWriter::open(&path).unwrap();
    writer.append(&row("a.png", 3)).unwrap();
    writer.append(&row("b.png", 0)).unwrap();
    assert_eq!(writer.rows_written(), 2);
    assert_eq!(writer.path(), path.as_path());

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text.lines().next().unwrap(),
        "filename,dark_percentage,object_count,scene_class,output_path"
    );

    let rows = read_summary(&path).unwrap();
    assert_eq!(rows, vec![row("a.png", 3), row("b.png", 0)]);
}

#[test]
fn test_summary_rows_visible_before_writer_is_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");

    let mut writer = SummaryWriter::open(&path).unwrap();
    writer.append(&row("a.png", 1)).unwrap();
    assert_eq!(read_summary(&path).unwrap().len(), 1);
}

#[test]
fn test_summary_reopen_appends_without_second_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");

    {
        let mut writer = SummaryWriter::open(&path).unwrap();
        writer.append(&row("a.png", 1)).unwrap();
    }
    {
        let mut writer = SummaryWriter::open(&path).unwrap();
        writer.append(&row("b.png", 2)).unwrap();
        assert_eq!(writer.rows_written(), 1);
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("filename,").count(), 1);

    let rows = read_summary(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].filename, "a.png");
    assert_eq!(rows[1].filename, "b.png");
}

#[test]
fn test_summary_empty_file_gets_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.csv");
    std::fs::write(&path, "").unwrap();

    let mut writer = SummaryWriter::open(&path).unwrap();
    writer.append(&row("a.png", 1)).unwrap();
    assert_eq!(read_summary(&path).unwrap(), vec![row("a.png", 1)]);
}
