//! Stream round-trip tests
//!
//! Writes matrices through one handle and reads them back through another,
//! covering every element type, sequential order, name accumulation and
//! the end-of-stream, mismatch and reset paths.

use matstream::{DataType, DenseMatrix, FormatError, MatElement, MatError, MatStream, MatrixRef};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tempfile::{tempdir, NamedTempFile};

/// Helper: Random `height x width` matrix from a seeded generator
fn random_matrix<T>(rng: &mut StdRng, height: usize, width: usize) -> DenseMatrix<T>
where
    T: MatElement,
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    let data = (0..height * width).map(|_| rng.gen::<T>()).collect();
    DenseMatrix::from_column_major(height, width, data).unwrap()
}

fn round_trip<T>(rng: &mut StdRng, name: &str)
where
    T: MatElement,
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    let file = NamedTempFile::new().unwrap();
    let matrix = random_matrix::<T>(rng, 7, 5);

    let mut writer = MatStream::new(file.path());
    writer.append(name).unwrap().append(&matrix).unwrap();

    let mut reader = MatStream::new(file.path());
    let (loaded_name, loaded) = reader.load::<T>().unwrap();
    assert_eq!(loaded_name, name);
    assert_eq!(loaded, matrix);
    assert_eq!(reader.cursor(), writer.cursor());
}

#[test]
fn test_round_trip_every_element_type() {
    let mut rng = StdRng::seed_from_u64(0x4d41_5434);
    round_trip::<f64>(&mut rng, "doubles");
    round_trip::<f32>(&mut rng, "singles");
    round_trip::<i32>(&mut rng, "int32");
    round_trip::<i16>(&mut rng, "int16");
    round_trip::<u16>(&mut rng, "uint16");
    round_trip::<u8>(&mut rng, "uint8");
}

#[test]
fn test_sequential_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sequence.mat");
    let mut rng = StdRng::seed_from_u64(7);

    let a = random_matrix::<f64>(&mut rng, 3, 4);
    let b = random_matrix::<i16>(&mut rng, 1, 9);
    let c = random_matrix::<u8>(&mut rng, 6, 2);

    let mut writer = MatStream::new(&path);
    writer.write("a", &a).unwrap();
    writer.write("b", &b).unwrap();
    writer.write("c", &c).unwrap();

    let mut reader = MatStream::new(&path);
    assert_eq!(reader.load::<f64>().unwrap(), ("a".to_string(), a));
    assert_eq!(reader.load::<i16>().unwrap(), ("b".to_string(), b));
    assert_eq!(reader.load::<u8>().unwrap(), ("c".to_string(), c));
    assert_eq!(reader.cursor(), std::fs::metadata(&path).unwrap().len());
}

#[test]
fn test_name_accumulation() {
    let file = NamedTempFile::new().unwrap();
    let m = DenseMatrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]).unwrap();

    let mut writer = MatStream::new(file.path());
    writer.append("matrix").unwrap().append(3).unwrap().append(&m).unwrap();
    assert_eq!(writer.pending_name(), "");

    // The next matrix starts with an empty name
    writer.append(&m).unwrap();

    let mut reader = MatStream::new(file.path());
    assert_eq!(reader.load::<f64>().unwrap().0, "matrix3");
    assert_eq!(reader.load::<f64>().unwrap().0, "");
}

#[test]
fn test_end_of_stream() {
    let file = NamedTempFile::new().unwrap();
    let mut writer = MatStream::new(file.path());
    writer.write("only", &DenseMatrix::<i32>::zeros(2, 2)).unwrap();

    let mut reader = MatStream::new(file.path());
    reader.load::<i32>().unwrap();
    let end = reader.cursor();

    match reader.load::<i32>() {
        Err(MatError::NoHeader { offset, .. }) => assert_eq!(offset, end),
        other => panic!("expected NoHeader, got {other:?}"),
    }
    assert_eq!(reader.cursor(), end);
}

#[test]
fn test_type_mismatch_leaves_cursor() {
    let file = NamedTempFile::new().unwrap();
    MatStream::new(file.path())
        .write("d", &DenseMatrix::from_rows(&[[1.0f64]]).unwrap())
        .unwrap();

    let mut reader = MatStream::new(file.path());
    let err = reader.load::<i32>().unwrap_err();
    assert!(matches!(
        err,
        MatError::TypeMismatch {
            expected: DataType::I32,
            found: DataType::F64,
        }
    ));
    assert_eq!(reader.cursor(), 0);
}

#[test]
fn test_reset_then_load() {
    let file = NamedTempFile::new().unwrap();
    let mut stream = MatStream::new(file.path());
    stream.write("gone", &DenseMatrix::<u16>::zeros(3, 3)).unwrap();

    stream.reset().unwrap();
    assert_eq!(stream.cursor(), 0);
    assert!(stream.load::<u16>().unwrap_err().is_no_header());
    assert_eq!(stream.cursor(), 0);

    // The file is usable again after a reset
    stream.write("back", &DenseMatrix::<u16>::zeros(1, 1)).unwrap();
    stream.rewind();
    assert_eq!(stream.load::<u16>().unwrap().0, "back");
}

#[test]
fn test_load_from_missing_file() {
    let dir = tempdir().unwrap();
    let mut reader = MatStream::new(dir.path().join("never-written.mat"));
    assert!(matches!(reader.load::<f64>(), Err(MatError::Open { .. })));
}

#[test]
fn test_append_to_uncreatable_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.mat");
    let mut writer = MatStream::new(&path);

    writer.append("lost").unwrap();
    let err = writer.append(&DenseMatrix::<f64>::zeros(2, 2)).unwrap_err();
    assert!(matches!(err, MatError::Open { .. }));

    // The pending name went into the failed header
    assert_eq!(writer.pending_name(), "");
    assert_eq!(writer.cursor(), 0);
    assert!(!path.exists());
}

#[test]
fn test_name_with_null_byte_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nul.mat");
    let mut writer = MatStream::new(&path);

    let err = writer
        .write("a\0b", &DenseMatrix::<u8>::zeros(1, 1))
        .unwrap_err();
    assert!(matches!(
        err,
        MatError::Format(FormatError::NameContainsTerminator)
    ));
    assert!(!path.exists());
}

#[test]
fn test_empty_matrices() {
    let file = NamedTempFile::new().unwrap();
    let mut writer = MatStream::new(file.path());
    writer.write("none", &DenseMatrix::<f32>::zeros(0, 0)).unwrap();
    writer.write("tall", &DenseMatrix::<f32>::zeros(4, 0)).unwrap();

    let mut reader = MatStream::new(file.path());
    let (_, none) = reader.load::<f32>().unwrap();
    let (_, tall) = reader.load::<f32>().unwrap();
    assert!(none.is_empty());
    assert_eq!(tall.dimensions(), (4, 0));
}

#[cfg(feature = "mmap")]
#[test]
fn test_index_agrees_with_loads() {
    use matstream::MatIndex;

    let file = NamedTempFile::new().unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = MatStream::new(file.path());
    for i in 0..5 {
        let m = random_matrix::<f64>(&mut rng, i + 1, 3);
        writer.append("m").unwrap().append(i).unwrap().append(&m).unwrap();
    }

    let index = MatIndex::open(file.path()).unwrap();
    assert_eq!(index.len(), 5);
    assert_eq!(index.trailing_bytes(), 0);

    let mut reader = MatStream::new(file.path());
    for (i, entry) in index.records().iter().enumerate() {
        assert_eq!(reader.cursor(), entry.offset);
        let (name, loaded) = reader.load::<f64>().unwrap();
        assert_eq!(name, entry.header.name);
        assert_eq!(index.matrix::<f64>(i).unwrap(), Some(loaded));
        assert_eq!(reader.cursor(), entry.end());
    }
}
