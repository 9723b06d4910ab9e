//! Integration tests for label record generation.

use std::fs;
use std::path::Path;

use trajlabel::labelfile::{
    JsonLabelFileWriter, LabelFileWriter, LabelRecord, MemoryLabelFileWriter,
};
use trajlabel::traj::{DataRow, ImageSize, TrajectoryStore};
use trajlabel::TrajlabelError;

mod common;

const SAMPLE: &str = "Frame,Visibility,X,Y,W,H\n\
                      0,1,100,50,10,10\n\
                      1,0,0,0,0,0\n\
                      2,1,30,40,0,0\n";

#[test]
fn record_points_at_frame_image_with_cached_size() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");
    assert_eq!(store.image_size(), None);

    let mut writer = MemoryLabelFileWriter::default();
    let path = store
        .generate_label_file(&store.points()[0], &mut writer)
        .expect("generate");

    assert!(path.ends_with("labelme/rally1/0.json"));
    assert!(fixture.labelme_dir().is_dir());

    let (written_path, record) = &writer.records[0];
    assert_eq!(written_path, &path);
    assert_eq!(record.image_path, "../../frame/rally1/0.bmp");
    assert_eq!(record.image_data, None);
    assert_eq!((record.image_width, record.image_height), (64, 48));
    assert!(record.flags.is_empty());
    assert!(record.other_data.is_empty());
    assert_eq!(record.shapes.len(), 1);
    assert_eq!(record.shapes[0].points, vec![[95.0, 45.0], [105.0, 55.0]]);

    assert_eq!(
        store.image_size(),
        Some(ImageSize {
            width: 64,
            height: 48
        })
    );
}

#[test]
fn empty_and_point_rows_produce_records_without_shapes() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");

    let mut writer = MemoryLabelFileWriter::default();
    store.generate_label_file(&store.points()[1], &mut writer).expect("generate empty");
    store.generate_label_file(&store.points()[2], &mut writer).expect("generate point");

    assert!(writer.records.iter().all(|(_, record)| record.shapes.is_empty()));
    assert_eq!(writer.records[1].1.image_path, "../../frame/rally1/2.bmp");
}

#[test]
fn image_size_is_read_once_per_scan() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let mut store = TrajectoryStore::open(&fixture.csv_path).expect("open store");
    let mut writer = MemoryLabelFileWriter::default();
    store.generate_label_file(&store.points()[0], &mut writer).expect("generate");

    // Later frames of a different size do not change the cached value...
    common::write_bmp(&fixture.frame_dir().join("2.bmp"), 10, 10);
    store.generate_label_file(&store.points()[2], &mut writer).expect("generate");
    assert_eq!(writer.records[1].1.image_width, 64);

    // ...until the directory is rescanned.
    store.refresh_images().expect("refresh");
    assert_eq!(store.image_size(), None);
    store.generate_label_file(&store.points()[2], &mut writer).expect("generate");
    assert_eq!(writer.records[2].1.image_width, 10);
}

#[test]
fn image_is_chosen_by_sorted_position() {
    let fixture = common::trajectory_fixture(SAMPLE, 0, 1, 1);
    for name in ["10.bmp", "9.bmp", "100.bmp"] {
        common::write_bmp(&fixture.frame_dir().join(name), 8, 8);
    }
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");
    assert_eq!(store.images(), ["9.bmp", "10.bmp", "100.bmp"]);

    let mut writer = MemoryLabelFileWriter::default();
    store.generate_label_file(&store.points()[1], &mut writer).expect("generate");
    assert_eq!(writer.records[0].1.image_path, "../../frame/rally1/10.bmp");
}

#[test]
fn missing_frame_image_is_reported() {
    let fixture = common::trajectory_fixture(SAMPLE, 2, 64, 48);
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");

    let mut writer = MemoryLabelFileWriter::default();
    let err = store
        .generate_label_file(&store.points()[2], &mut writer)
        .unwrap_err();
    assert!(matches!(
        err,
        TrajlabelError::ImageNotFound {
            frame: 2,
            available: 2
        }
    ));
}

#[test]
fn generate_by_image_path_resolves_frame_number() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");
    let mut writer = MemoryLabelFileWriter::default();

    let path = store
        .generate_label_file_by_image_path(fixture.frame_dir().join("0.bmp"), &mut writer)
        .expect("generate by image");
    assert!(path.ends_with("labelme/rally1/0.json"));

    let err = store
        .generate_label_file_by_image_path("frame.0.bmp", &mut writer)
        .unwrap_err();
    assert!(matches!(err, TrajlabelError::InvalidImageName { .. }));

    let err = store
        .generate_label_file_by_image_path("7.bmp", &mut writer)
        .unwrap_err();
    assert!(matches!(err, TrajlabelError::FrameOutOfRange { frame: 7, len: 3 }));
}

#[test]
fn json_writer_produces_labelme_files_for_every_frame() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");

    let mut writer = JsonLabelFileWriter::default();
    let count = store.generate_label_files(&mut writer).expect("generate all");
    assert_eq!(count, 3);

    for frame in 0..3 {
        let path = fixture.labelme_dir().join(format!("{frame}.json"));
        let text = fs::read_to_string(&path).expect("read label file");
        let value: serde_json::Value = serde_json::from_str(&text).expect("parse label file");

        assert_eq!(value["imagePath"], format!("../../frame/rally1/{frame}.bmp"));
        assert_eq!(value["imageWidth"], 64);
        assert_eq!(value["imageHeight"], 48);
        assert!(value["imageData"].is_null());
    }

    let first: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(fixture.labelme_dir().join("0.json")).expect("read"),
    )
    .expect("parse");
    assert_eq!(first["shapes"][0]["label"], "ball");
    assert_eq!(first["shapes"][0]["shape_type"], "rectangle");
    assert!(first["shapes"][0]["group_id"].is_null());
}

/// A writer that refuses every record.
struct FailingWriter;

impl LabelFileWriter for FailingWriter {
    fn write(&mut self, path: &Path, _record: &LabelRecord) -> Result<(), TrajlabelError> {
        Err(TrajlabelError::Io(std::io::Error::other(format!(
            "refusing {}",
            path.display()
        ))))
    }
}

#[test]
fn writer_errors_propagate() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let store = TrajectoryStore::open(&fixture.csv_path).expect("open store");

    let err = store.generate_label_files(&mut FailingWriter).unwrap_err();
    assert!(matches!(err, TrajlabelError::Io(_)));
}

#[test]
fn edited_row_is_reflected_in_next_record() {
    let fixture = common::trajectory_fixture(SAMPLE, 3, 64, 48);
    let mut store = TrajectoryStore::open(&fixture.csv_path).expect("open store");

    store
        .change_point(DataRow::from_shape("rectangle", 1, &[[0.0, 0.0], [4.0, 6.0]]).expect("row"))
        .expect("change point");

    let mut writer = MemoryLabelFileWriter::default();
    store.generate_label_file(&store.points()[1], &mut writer).expect("generate");
    assert_eq!(writer.records[0].1.shapes[0].points, vec![[0.0, 0.0], [4.0, 6.0]]);
}
