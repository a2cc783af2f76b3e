//! Write a handful of matrices of different element types to a MAT file

use matstream::{DenseMatrix, MatStream};
use std::time::Instant;

fn main() -> matstream::Result<()> {
    let filename = "example_matrices.mat";
    println!("Writing matrices to '{filename}'...");

    let mut stream = MatStream::new(filename);
    stream.reset()?;

    // Small matrix whose column-major layout is easy to inspect with a hex dump
    let small = DenseMatrix::from_rows(&[[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
    stream.append("small")?.append(&small)?;

    // Names can be assembled from several fragments
    for run in 1..=3 {
        let counts = DenseMatrix::from_rows(&[[run as u16; 4]; 2])?;
        stream.append("counts_run")?.append(run)?.append(&counts)?;
    }

    let side = 512;
    let start = Instant::now();
    let data = (0..side * side).map(|i| (i % 251) as f32 * 0.5).collect();
    let large = DenseMatrix::from_column_major(side, side, data)?;
    stream.write("large", &large)?;
    let write_time = start.elapsed();

    println!("{side} x {side} f32 matrix written in {write_time:?}");
    println!("File size: {} bytes", stream.cursor());
    println!("\nRun 'cargo run --example read_matrices' to read them back!");
    Ok(())
}
