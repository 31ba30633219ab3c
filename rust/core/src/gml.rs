// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CityGML polygon extraction
//!
//! Streams a GML document with quick-xml and collects the outer boundary of
//! every `gml:Polygon`:
//!
//! - GML2: `outerBoundaryIs/LinearRing/coordinates`
//! - GML3: `exterior/LinearRing/posList`
//!
//! Polygons with interior boundaries (holes) are skipped. Elements are
//! matched by local name, so the namespace prefix does not matter.
//! `posList` values are read in the same `x y z` order as `coordinates`
//! tuples; no axis swapping is done for the declared `srsName`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::coordinates::{parse_coordinates, parse_pos_list};
use crate::error::{Error, Result};

/// Outer boundary of one polygon, parsed or failed
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing {
    /// 0-based polygon index in document order, counting skipped polygons
    pub polygon: usize,
    pub coordinates: Result<Vec<[f64; 3]>>,
}

/// All outer rings found in a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GmlRings {
    pub rings: Vec<PolygonRing>,
    /// Polygons dropped because they have holes
    pub skipped_with_holes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Coordinates,
    PosList { dimension: Option<usize> },
}

#[derive(Debug, Default)]
struct PolygonState {
    has_holes: bool,
    in_exterior: bool,
    rings: Vec<Result<Vec<[f64; 3]>>>,
}

#[inline]
fn is_exterior(name: &[u8]) -> bool {
    matches!(name, b"outerBoundaryIs" | b"exterior")
}

#[inline]
fn is_interior(name: &[u8]) -> bool {
    matches!(name, b"innerBoundaryIs" | b"interior")
}

/// `srsDimension` attribute of a `posList`, if present
fn srs_dimension(e: &BytesStart) -> Option<usize> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"srsDimension")
        .and_then(|a| std::str::from_utf8(&a.value).ok()?.trim().parse().ok())
}

fn parse_ring(encoding: Encoding, text: &str) -> Result<Vec<[f64; 3]>> {
    match encoding {
        Encoding::Coordinates => parse_coordinates(text),
        Encoding::PosList { dimension: Some(d) } if d < 3 => {
            Err(Error::MissingElevation { tuple: 0 })
        }
        Encoding::PosList { dimension: Some(d) } if d > 3 => {
            Err(Error::InvalidCoordinate { tuple: 0, found: d })
        }
        Encoding::PosList { .. } => parse_pos_list(text),
    }
}

fn xml_error(position: usize, message: impl ToString) -> Error {
    Error::Xml {
        position,
        message: message.to_string(),
    }
}

/// Collect the outer ring of every polygon in a GML document.
///
/// Only malformed XML is an error; a ring whose coordinate text does not
/// parse is returned with its error so the caller can count and skip it.
pub fn extract_rings(xml: &str) -> Result<GmlRings> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut out = GmlRings::default();
    let mut polygon_count = 0usize;
    let mut polygon: Option<PolygonState> = None;
    // Coordinate text being collected and how to read it
    let mut capture: Option<(Encoding, String)> = None;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local_name = e.local_name();
                let in_exterior = polygon.as_ref().is_some_and(|p| p.in_exterior);
                match local_name.as_ref() {
                    b"Polygon" => polygon = Some(PolygonState::default()),
                    name if is_interior(name) => {
                        if let Some(p) = polygon.as_mut() {
                            p.has_holes = true;
                        }
                    }
                    name if is_exterior(name) => {
                        if let Some(p) = polygon.as_mut() {
                            p.in_exterior = true;
                        }
                    }
                    b"coordinates" if in_exterior => {
                        capture = Some((Encoding::Coordinates, String::new()));
                    }
                    b"posList" if in_exterior => {
                        let dimension = srs_dimension(e);
                        capture = Some((Encoding::PosList { dimension }, String::new()));
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                if is_interior(e.local_name().as_ref()) {
                    if let Some(p) = polygon.as_mut() {
                        p.has_holes = true;
                    }
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some((_, text)) = capture.as_mut() {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| xml_error(reader.buffer_position() as usize, e))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(ref c)) => {
                if let Some((_, text)) = capture.as_mut() {
                    let raw = std::str::from_utf8(c)
                        .map_err(|e| xml_error(reader.buffer_position() as usize, e))?;
                    text.push_str(raw);
                }
            }
            Ok(Event::End(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"coordinates" | b"posList" => {
                        if let (Some((encoding, text)), Some(p)) = (capture.take(), polygon.as_mut())
                        {
                            p.rings.push(parse_ring(encoding, &text));
                        }
                    }
                    name if is_exterior(name) => {
                        if let Some(p) = polygon.as_mut() {
                            p.in_exterior = false;
                        }
                    }
                    b"Polygon" => {
                        if let Some(p) = polygon.take() {
                            let index = polygon_count;
                            polygon_count += 1;
                            if p.has_holes {
                                out.skipped_with_holes += 1;
                            } else {
                                out.rings.extend(p.rings.into_iter().map(|coordinates| {
                                    PolygonRing {
                                        polygon: index,
                                        coordinates,
                                    }
                                }));
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(reader.buffer_position() as usize, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
