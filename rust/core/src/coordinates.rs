// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GML coordinate string parser using nom
//!
//! Two encodings are supported:
//!
//! - GML2 `gml:coordinates`: tuples separated by whitespace, components by
//!   commas (`x,y,z x,y,z ...`)
//! - GML3 `gml:posList`: a flat whitespace-separated list read in triples

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0, multispace1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, tuple},
    IResult,
};

use crate::error::{Error, Result};

/// Parse a decimal number: 12, -3.5, .5, 4., 1.2e-3
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| fast_float::parse::<f64, _>(s),
    )(input)
}

/// Comma-separated components of one tuple
fn coordinate_tuple(input: &str) -> IResult<&str, Vec<f64>> {
    separated_list1(char(','), number)(input)
}

fn to_error(text: &str, err: nom::Err<nom::error::Error<&str>>) -> Error {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => Error::parse(
            text.len() - e.input.len(),
            format!("unexpected input near {:?}", e.input.chars().take(16).collect::<String>()),
        ),
        nom::Err::Incomplete(_) => Error::parse(text.len(), "incomplete input"),
    }
}

/// Parse a GML2 coordinate string into `[x, y, z]` triples.
///
/// Tuples with fewer than 3 components fail with
/// [`Error::MissingElevation`] so callers can skip 2D polygons.
pub fn parse_coordinates(text: &str) -> Result<Vec<[f64; 3]>> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let (_, tuples) = all_consuming(delimited(
        multispace0,
        separated_list1(multispace1, coordinate_tuple),
        multispace0,
    ))(text)
    .map_err(|e| to_error(text, e))?;

    tuples
        .into_iter()
        .enumerate()
        .map(|(i, t)| match t.len() {
            3 => Ok([t[0], t[1], t[2]]),
            0..=2 => Err(Error::MissingElevation { tuple: i }),
            found => Err(Error::InvalidCoordinate { tuple: i, found }),
        })
        .collect()
}

/// Parse a GML3 `posList` (three values per point) into `[x, y, z]` triples.
pub fn parse_pos_list(text: &str) -> Result<Vec<[f64; 3]>> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let (_, values) = all_consuming(delimited(
        multispace0,
        separated_list1(multispace1, number),
        multispace0,
    ))(text)
    .map_err(|e| to_error(text, e))?;

    if values.len() % 3 != 0 {
        return Err(Error::InvalidCoordinate {
            tuple: values.len() / 3,
            found: values.len() % 3,
        });
    }

    Ok(values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(number("42"), Ok(("", 42.0)));
        assert_eq!(number("-3.25,"), Ok((",", -3.25)));
        assert_eq!(number(".5"), Ok(("", 0.5)));
        assert_eq!(number("4."), Ok(("", 4.0)));
        assert_eq!(number("1.5E-3"), Ok(("", 0.0015)));
        assert!(number("abc").is_err());
    }

    #[test]
    fn test_parse_coordinates() {
        let text = "24.9384,60.1699,12.5 24.9390,60.1699,12.5\n\t24.9390,60.1702,18.0 ";
        let coords = parse_coordinates(text).unwrap();

        assert_eq!(coords.len(), 3);
        assert_eq!(coords[0], [24.9384, 60.1699, 12.5]);
        assert_eq!(coords[2], [24.9390, 60.1702, 18.0]);
    }

    #[test]
    fn test_two_dimensional_tuples() {
        let err = parse_coordinates("1,2 3,4 5,6").unwrap_err();
        assert_eq!(err, Error::MissingElevation { tuple: 0 });
    }

    #[test]
    fn test_too_many_components() {
        let err = parse_coordinates("1,2,3 4,5,6,7").unwrap_err();
        assert_eq!(err, Error::InvalidCoordinate { tuple: 1, found: 4 });
    }

    #[test]
    fn test_garbage_reports_position() {
        match parse_coordinates("1,2,3 4,x,6") {
            Err(Error::Parse { position, .. }) => assert!(position >= 5),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_coordinates("   "), Err(Error::EmptyInput));
        assert_eq!(parse_pos_list(""), Err(Error::EmptyInput));
    }

    #[test]
    fn test_parse_pos_list() {
        let coords = parse_pos_list("0 0 0 1 0 0\n1 1 0.5").unwrap();
        assert_eq!(coords, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.5]]);

        assert!(parse_pos_list("0 0 0 1 0").is_err());
    }
}
