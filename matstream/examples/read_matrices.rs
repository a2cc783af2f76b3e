//! List and read the matrices written by the `write_matrices` example

use matstream::{DataType, MatIndex, MatStream};
use std::time::Instant;

fn main() -> matstream::Result<()> {
    let filename = "example_matrices.mat";

    if !std::path::Path::new(filename).exists() {
        println!("File '{filename}' not found!");
        println!("   Run 'cargo run --example write_matrices' first");
        return Ok(());
    }

    // Time the index walk
    let start = Instant::now();
    let index = MatIndex::open(filename)?;
    println!(
        "Indexed {} records in {:.3}ms",
        index.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    println!("\nRecords:");
    for entry in index.records() {
        let header = &entry.header;
        println!(
            "   {:<12} {:>4} x {:<4} {:<6} at offset {}",
            header.name, header.height, header.width, header.data_type, entry.offset
        );
    }
    if index.trailing_bytes() > 0 {
        println!("   ({} trailing bytes ignored)", index.trailing_bytes());
    }

    if let Some(small) = index.matrix_by_name::<f64>("small")? {
        println!("\nsmall[1, 2] = {}", small[(1, 2)]);
    }

    // Sequential pass with the stream cursor
    println!("\nSequential pass:");
    let mut stream = MatStream::new(filename);
    loop {
        let header = match stream.peek_header() {
            Ok(header) => header,
            Err(e) if e.is_no_header() => break,
            Err(e) => return Err(e),
        };

        let start = Instant::now();
        match header.data_type {
            DataType::F64 => {
                stream.load::<f64>()?;
            }
            DataType::F32 => {
                stream.load::<f32>()?;
            }
            DataType::U16 => {
                stream.load::<u16>()?;
            }
            _ => {
                stream.skip()?;
                println!("   {} skipped", header.name);
                continue;
            }
        }
        println!(
            "   {} loaded in {:.3}ms",
            header.name,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok(())
}
