use std::io::{Read, Write};

use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{digit1, multispace0, multispace1},
    combinator::{all_consuming, map_res, value},
    multi::count,
    number::complete::double,
    sequence::{delimited, separated_pair},
};

use crate::{
    error::FormatError,
    factory::TabulatedFunctionFactory,
    point::Point,
    tabulated::{Tabulated, TabulatedFunction},
};

/// Writes the point count on one line, then one `x y` line per point.
///
/// Values use the shortest decimal form that reads back to the same `f64`.
pub fn write_text(function: &dyn TabulatedFunction, mut writer: impl Write) -> Result<(), FormatError> {
    writeln!(writer, "{}", function.count())?;
    for point in function.points() {
        writeln!(writer, "{} {}", point.x(), point.y())?;
    }
    writer.flush()?;

    debug!("wrote {} points in text format", function.count());
    Ok(())
}

/// Reads the format written by [`write_text`] and builds the result with
/// `factory`.
///
/// Tokens may be separated by any whitespace, line breaks included. Nothing
/// but whitespace may follow the last point.
///
/// # Errors
/// `Malformed` for an unreadable count or number, or a stream with fewer or
/// more numbers than announced; `Io` if the reader fails or is not UTF-8;
/// `Function` when the points do not form a valid tabulated function.
pub fn read_text(
    factory: &dyn TabulatedFunctionFactory,
    mut reader: impl Read,
) -> Result<Tabulated, FormatError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let points = parse_points(&input)?;
    debug!("read {} points in text format", points.len());
    Ok(factory.create_from_points(&points)?)
}

/// `inner` with optional whitespace, line breaks included, on both sides.
fn ws<'a, P, O>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn point_count(input: &str) -> IResult<&str, usize> {
    map_res(ws(digit1), str::parse::<usize>).parse(input)
}

/// A decimal number, `NaN`, or a signed or unsigned infinity.
fn number(input: &str) -> IResult<&str, f64> {
    alt((
        value(f64::NEG_INFINITY, tag_no_case("-infinity")),
        value(f64::NEG_INFINITY, tag_no_case("-inf")),
        double,
    ))
    .parse(input)
}

fn point(input: &str) -> IResult<&str, Point> {
    ws(separated_pair(number, multispace1, number))
        .map(|(x, y)| Point::new(x, y))
        .parse(input)
}

fn parse_points(input: &str) -> Result<Vec<Point>, FormatError> {
    let (rest, n) = point_count(input).map_err(|err| malformed(input, "point count", err))?;
    let (_, points) = all_consuming(count(point, n))
        .parse(rest)
        .map_err(|err| malformed(input, "point data", err))?;
    Ok(points)
}

fn malformed(input: &str, what: &str, err: nom::Err<nom::error::Error<&str>>) -> FormatError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => FormatError::Malformed(format!(
            "invalid {} at byte {}",
            what,
            input.len() - e.input.len()
        )),
        nom::Err::Incomplete(_) => FormatError::Malformed(format!("incomplete {}", what)),
    }
}
