use std::fs::File;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use flate2::{write::GzEncoder, Compression};
use ndarray::array;
use rankframe::io::{read_path, read_tsv, write_tar_gz, write_tsv};
use rankframe::{Error, Frame};

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("rankframe_{}_{}", std::process::id(), name));
    path
}

fn sample() -> Frame<String, String> {
    Frame::new(
        vec!["g1".to_string(), "g2".to_string()],
        vec!["s1".to_string(), "s2".to_string(), "s3".to_string()],
        array![[1.5, f64::NAN, -3.0], [0.0, 2.0, 2.0]],
    )
    .unwrap()
}

fn assert_same(lhs: &Frame<String, String>, rhs: &Frame<String, String>) {
    assert_eq!(lhs.row_keys(), rhs.row_keys());
    assert_eq!(lhs.col_keys(), rhs.col_keys());
    for (a, b) in lhs.values().iter().zip(rhs.values().iter()) {
        assert!((a.is_nan() && b.is_nan()) || a == b, "{} != {}", a, b);
    }
}

#[test]
fn tsv_round_trip_keeps_order_and_nan() {
    let frame = sample();
    let mut buf = Vec::new();
    write_tsv(&frame, &mut buf).unwrap();
    let back = read_tsv(Cursor::new(buf)).unwrap();
    assert_same(&frame, &back);
}

#[test]
fn unparsable_cells_become_nan() {
    let text = "id\ta\tb\nr2\t3\tNA\nr1\t\t1e2\n";
    let frame = read_tsv(text.as_bytes()).unwrap();
    assert_eq!(frame.row_keys(), ["r2".to_string(), "r1".to_string()]);
    assert_eq!(frame.get(&"r2".to_string(), &"a".to_string()).unwrap(), 3.0);
    assert!(frame.get(&"r2".to_string(), &"b".to_string()).unwrap().is_nan());
    assert!(frame.get(&"r1".to_string(), &"a".to_string()).unwrap().is_nan());
    assert_eq!(frame.get(&"r1".to_string(), &"b".to_string()).unwrap(), 100.0);
}

#[test]
fn malformed_tables_report_the_line() {
    let dup = "id\ta\tb\nr1\t1\t2\nr1\t3\t4\n";
    assert!(matches!(read_tsv(dup.as_bytes()), Err(Error::Format { line: 3, .. })));

    let empty_id = "id\ta\n\t1\n";
    assert!(matches!(read_tsv(empty_id.as_bytes()), Err(Error::Format { line: 2, .. })));

    let ragged = "id\ta\tb\nr1\t1\n";
    assert!(matches!(read_tsv(ragged.as_bytes()), Err(Error::Format { line: 2, .. })));

    let no_values = "id\nr1\n";
    assert!(matches!(read_tsv(no_values.as_bytes()), Err(Error::Format { line: 1, .. })));

    let dup_col = "id\ta\ta\nr1\t1\t2\n";
    assert!(matches!(read_tsv(dup_col.as_bytes()), Err(Error::DuplicateKey { .. })));
}

#[test]
fn gzip_and_tar_gz_inputs() {
    let frame = sample();

    let gz_path = temp_path("input.tsv.gz");
    {
        let mut enc = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
        let mut buf = Vec::new();
        write_tsv(&frame, &mut buf).unwrap();
        enc.write_all(&buf).unwrap();
        enc.finish().unwrap();
    }
    assert_same(&frame, &read_path(&gz_path).unwrap());

    let tar_path = temp_path("ranks.tar.gz");
    let ranks = frame.rank_rows();
    write_tar_gz(&ranks, &tar_path, "ranks.tsv").unwrap();
    let back = read_path(&tar_path).unwrap();
    assert_same(&ranks, &back);
    assert_eq!(back.values().row(1).to_vec(), vec![1.0, 2.5, 2.5]);

    std::fs::remove_file(gz_path).ok();
    std::fs::remove_file(tar_path).ok();
}
