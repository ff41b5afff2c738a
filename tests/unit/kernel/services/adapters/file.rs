use super::*;
use tempfile::tempdir;

#[test]
fn test_read_write_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("test.txt");

    let files = LocalFiles::new();

    files.write(&file_path, "Hello, World!\n• item").unwrap();
    let content = files.read_to_string(&file_path).unwrap();
    assert_eq!(content, "Hello, World!\n• item");
}

#[test]
fn test_read_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let err = LocalFiles::new().read_to_string(&missing).unwrap_err();
    assert!(matches!(err, FileError::NotFound(ref p) if p == &missing));
}

#[test]
fn test_read_directory_is_not_a_file() {
    let dir = tempdir().unwrap();

    let err = LocalFiles::new().read_to_string(dir.path()).unwrap_err();
    assert!(matches!(err, FileError::NotAFile(_)));
}

#[test]
fn test_read_non_utf8_reports_encoding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.bin");
    fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let err = LocalFiles::new().read_to_string(&path).unwrap_err();
    assert!(matches!(err, FileError::InvalidEncoding(_)));
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("a.txt");

    let err = LocalFiles::new().write(&path, "x").unwrap_err();
    assert!(err.to_string().contains("no_such_dir"));
}
