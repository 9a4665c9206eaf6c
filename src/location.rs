//! Decoding of the `+CLBS:` base station location response.

use core::fmt;

use heapless::String;

use crate::command::location::LOCATION_MARKER;

/// A coordinate as reported by the module, e.g. `121.054590`.
pub type Coordinate = String<16>;

const UNKNOWN: &str = "unknown";

/// Outcome of a location lookup
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LocationResult {
    /// Both coordinates were present in the response.
    Fix {
        latitude: Coordinate,
        longitude: Coordinate,
    },
    /// No coordinates; carries the location code following the marker, or
    /// `"unknown"` when the frame did not contain one.
    ErrorCode(String<8>),
}

impl LocationResult {
    pub fn unknown() -> Self {
        let mut code = String::new();
        // "unknown" always fits
        let _ = code.push_str(UNKNOWN);
        Self::ErrorCode(code)
    }

    pub fn is_fix(&self) -> bool {
        matches!(self, Self::Fix { .. })
    }
}

impl fmt::Display for LocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fix {
                latitude,
                longitude,
            } => write!(f, "{},{}", latitude, longitude),
            Self::ErrorCode(code) if code.as_str() == UNKNOWN => f.write_str(UNKNOWN),
            Self::ErrorCode(code) => write!(f, "{}: {}", UNKNOWN, code),
        }
    }
}

/// Decode the text of a single receive frame carrying a `+CLBS:` response.
///
/// The first three decimal tokens after the marker are the location code,
/// the longitude and the latitude, in that order. Anything short of both
/// coordinates is reported as an error code. Frames split across two reads
/// are not reassembled.
pub fn decode(text: &str) -> LocationResult {
    let Some(start) = text.find(LOCATION_MARKER) else {
        return LocationResult::unknown();
    };
    let body = &text[start + LOCATION_MARKER.len()..];

    let mut numbers = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| is_decimal(token));

    let _code = numbers.next();
    let longitude = numbers.next().and_then(coordinate);
    let latitude = numbers.next().and_then(coordinate);

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => LocationResult::Fix {
            latitude,
            longitude,
        },
        _ => error_code(body),
    }
}

fn coordinate(token: &str) -> Option<Coordinate> {
    match Coordinate::try_from(token) {
        Ok(coordinate) => Some(coordinate),
        Err(_) => {
            warn!("Dropping coordinate of {} characters", token.len());
            None
        }
    }
}

fn error_code(body: &str) -> LocationResult {
    match body.trim_start().chars().next() {
        Some(digit) if digit.is_ascii_digit() => {
            let mut code = String::new();
            let _ = code.push(digit);
            LocationResult::ErrorCode(code)
        }
        _ => LocationResult::unknown(),
    }
}

fn is_decimal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    digits.bytes().any(|b| b.is_ascii_digit())
        && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}
