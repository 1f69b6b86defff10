mod common;

use std::fs;

use common::optdigits_line;
use lib_pink::{BuiltinDigits, CsvDigits, DatasetError, DatasetSource};

#[test]
fn test_builtin_digits_shape() {
    let digits = BuiltinDigits::default().load().unwrap();

    assert_eq!(digits.shape(), (1797, 64));
    assert_eq!(digits.image_width(), 8);
    assert_eq!(digits.image_height(), 8);
    assert!(digits.data().iter().all(|&v| (0.0..=16.0).contains(&v)));
    assert!(digits.data().iter().all(|&v| v.fract() == 0.0));
    for (index, &label) in digits.targets().iter().enumerate() {
        assert_eq!(label as usize, index % 10);
    }
}

#[test]
fn test_builtin_digits_are_deterministic() {
    let first = BuiltinDigits::with_seed(42).load().unwrap();
    let second = BuiltinDigits::with_seed(42).load().unwrap();
    let other = BuiltinDigits::with_seed(43).load().unwrap();

    assert_eq!(first, second);
    assert_ne!(first.data(), other.data());
}

#[test]
fn test_builtin_digits_have_ink() {
    let digits = BuiltinDigits::default().load().unwrap();
    for index in 0..20 {
        let image = digits.image(index).unwrap();
        assert!(image.iter().filter(|&&v| v >= 12.0).count() >= 8);
    }
}

#[test]
fn test_take_truncates() {
    let digits = BuiltinDigits::default().load().unwrap();
    let head = digits.take(1000);

    assert_eq!(head.len(), 1000);
    assert_eq!(head.image(999), digits.image(999));
    assert!(head.image(1000).is_none());
    assert_eq!(digits.take(5000).len(), 1797);
}

#[test]
fn test_csv_digits_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("optdigits.tra");
    let mut text = String::new();
    text.push_str(&optdigits_line(3, 7));
    text.push('\n');
    text.push_str(&optdigits_line(16, 1));
    text.push('\n');
    fs::write(&path, text).unwrap();

    let digits = CsvDigits::new(&path).load().unwrap();
    assert_eq!(digits.shape(), (2, 64));
    assert_eq!(digits.targets(), &[7, 1]);
    assert!(digits.image(0).unwrap().iter().all(|&v| v == 3.0));
    assert!(digits.image(1).unwrap().iter().all(|&v| v == 16.0));
}

#[test]
fn test_csv_digits_without_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unlabelled.csv");
    let line = vec!["1"; 64].join(",");
    fs::write(&path, format!("{}\n", line)).unwrap();

    let digits = CsvDigits::new(&path).load().unwrap();
    assert_eq!(digits.len(), 1);
    assert_eq!(digits.targets(), &[0]);
}

#[test]
fn test_csv_digits_bad_rows() {
    let dir = tempfile::tempdir().unwrap();

    let short = dir.path().join("short.csv");
    fs::write(&short, format!("{}\n1,2,3\n", optdigits_line(0, 0))).unwrap();
    assert!(matches!(
        CsvDigits::new(&short).load(),
        Err(DatasetError::RowLength {
            row: 1,
            found: 3,
            ..
        })
    ));

    let garbage = dir.path().join("garbage.csv");
    fs::write(&garbage, optdigits_line(0, 0).replacen("0", "x", 1)).unwrap();
    assert!(matches!(
        CsvDigits::new(&garbage).load(),
        Err(DatasetError::InvalidValue {
            row: 0,
            column: 0,
            ..
        })
    ));

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "").unwrap();
    assert!(matches!(
        CsvDigits::new(&empty).load(),
        Err(DatasetError::Empty(_))
    ));
}
