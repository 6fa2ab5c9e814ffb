use std::io::{Read, Write};

use log::debug;

use crate::{
    error::FormatError,
    factory::TabulatedFunctionFactory,
    point::Point,
    tabulated::{Tabulated, TabulatedFunction},
};

/// Most points preallocated before any of them has been read.
const MAX_INITIAL_CAPACITY: usize = 1024;

/// Writes `function` as a big-endian `i32` count followed by `(x, y)` pairs
/// of big-endian `f64`s.
///
/// # Errors
/// `Malformed` if the count does not fit an `i32`; `Io` if the writer fails.
pub fn write_binary(function: &dyn TabulatedFunction, mut writer: impl Write) -> Result<(), FormatError> {
    let count = i32::try_from(function.count()).map_err(|_| {
        FormatError::Malformed(format!(
            "{} points do not fit the binary count field",
            function.count()
        ))
    })?;

    writer.write_all(&count.to_be_bytes())?;
    for point in function.points() {
        writer.write_all(&point.x().to_be_bytes())?;
        writer.write_all(&point.y().to_be_bytes())?;
    }
    writer.flush()?;

    debug!("wrote {} points in binary format", count);
    Ok(())
}

/// Reads the format written by [`write_binary`] and builds the result with
/// `factory`.
///
/// # Errors
/// `Malformed` for a negative count; `Io` when the stream ends before all
/// announced points are read; `Function` when the points do not form a valid
/// tabulated function.
pub fn read_binary(
    factory: &dyn TabulatedFunctionFactory,
    mut reader: impl Read,
) -> Result<Tabulated, FormatError> {
    let count = read_i32(&mut reader)?;
    let count = usize::try_from(count)
        .map_err(|_| FormatError::Malformed(format!("negative point count {}", count)))?;

    let mut points = Vec::with_capacity(count.min(MAX_INITIAL_CAPACITY));
    for _ in 0..count {
        let x = read_f64(&mut reader)?;
        let y = read_f64(&mut reader)?;
        points.push(Point::new(x, y));
    }

    debug!("read {} points in binary format", count);
    Ok(factory.create_from_points(&points)?)
}

fn read_i32(reader: &mut impl Read) -> Result<i32, FormatError> {
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_be_bytes(bytes))
}

fn read_f64(reader: &mut impl Read) -> Result<f64, FormatError> {
    let mut bytes = [0; 8];
    reader.read_exact(&mut bytes)?;
    Ok(f64::from_be_bytes(bytes))
}
