//! Classification of raw receive frames.
//!
//! A frame is whatever one read of the receive half produced. It may hold the
//! command echo, intermediate `+TAG:` lines and the final result code, or any
//! subset of those, so every line is tokenized before deciding what the frame
//! means for the outstanding command.

use heapless::String;

use crate::command::location::LOCATION_MARKER;
use crate::location::{self, LocationResult};

/// Longest frame preview kept for an [`ClassifiedResponse::Unrecognized`] frame.
pub const PREVIEW_LEN: usize = 64;

/// Error result codes reported by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Plain `ERROR`
    Error,
    /// `+CME ERROR: <n>`
    Equipment(Option<u16>),
    /// `+CMS ERROR: <n>`
    Network(Option<u16>),
    /// The frame was not valid UTF-8
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClassifiedResponse {
    Ack,
    ProtocolError(ProtocolError),
    Location(LocationResult),
    Unrecognized(String<PREVIEW_LEN>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Echo,
    Ok,
    Error(ProtocolError),
    Location,
    Unsolicited { tag: &'a str },
    Prompt,
    Text,
}

fn tokenize(line: &str) -> Line<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Line::Blank;
    }
    if line == "OK" {
        return Line::Ok;
    }
    if let Some(code) = line.strip_prefix("+CME ERROR:") {
        return Line::Error(ProtocolError::Equipment(code.trim().parse().ok()));
    }
    if let Some(code) = line.strip_prefix("+CMS ERROR:") {
        return Line::Error(ProtocolError::Network(code.trim().parse().ok()));
    }
    // `ERROR` anywhere in a line fails it, whatever else the line carries
    if line.contains("ERROR") {
        return Line::Error(ProtocolError::Error);
    }
    if line.starts_with(LOCATION_MARKER) {
        return Line::Location;
    }
    if line.starts_with('>') {
        return Line::Prompt;
    }
    if line
        .as_bytes()
        .get(..2)
        .is_some_and(|p| p.eq_ignore_ascii_case(b"AT"))
    {
        return Line::Echo;
    }
    match line.strip_prefix('+').and_then(|rest| rest.split_once(':')) {
        Some((tag, _)) => Line::Unsolicited { tag: tag.trim() },
        None => Line::Text,
    }
}

/// Classify one receive frame.
///
/// An error line anywhere in the frame wins over every other marker. Frames
/// holding nothing but blank lines and the command echo are `Unrecognized`
/// and leave the stage outcome untouched.
pub fn classify(frame: &[u8]) -> ClassifiedResponse {
    let Ok(text) = core::str::from_utf8(frame) else {
        return ClassifiedResponse::ProtocolError(ProtocolError::Decode);
    };

    let mut error = None;
    let mut location = false;
    let mut content = false;

    for line in text.split(['\r', '\n']) {
        match tokenize(line) {
            Line::Blank | Line::Echo => {}
            Line::Error(e) => {
                error.get_or_insert(e);
            }
            Line::Location => location = true,
            Line::Unsolicited { tag } => {
                trace!("+{}", tag);
                content = true;
            }
            Line::Ok | Line::Prompt | Line::Text => content = true,
        }
    }

    if let Some(e) = error {
        ClassifiedResponse::ProtocolError(e)
    } else if location {
        ClassifiedResponse::Location(location::decode(text))
    } else if content {
        ClassifiedResponse::Ack
    } else {
        ClassifiedResponse::Unrecognized(preview(text))
    }
}

fn preview(text: &str) -> String<PREVIEW_LEN> {
    let mut out = String::new();
    for c in text.trim().chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinate;

    #[test]
    fn final_ok_is_ack() {
        assert_eq!(
            classify(b"AT+CSQ\r\r\n+CSQ: 21,99\r\n\r\nOK\r\n"),
            ClassifiedResponse::Ack
        );
        assert_eq!(classify(b"\r\nOK\r\n"), ClassifiedResponse::Ack);
    }

    #[test]
    fn permissive_default_for_other_content() {
        assert_eq!(
            classify(b"+CNACT: 0,1,\"10.0.0.2\"\r\n"),
            ClassifiedResponse::Ack
        );
        assert_eq!(classify(b"\r\n> "), ClassifiedResponse::Ack);
        assert_eq!(classify(b"SMS Ready\r\n"), ClassifiedResponse::Ack);
    }

    #[test]
    fn error_codes() {
        assert_eq!(
            classify(b"\r\nERROR\r\n"),
            ClassifiedResponse::ProtocolError(ProtocolError::Error)
        );
        assert_eq!(
            classify(b"\r\n+CME ERROR: 3\r\n"),
            ClassifiedResponse::ProtocolError(ProtocolError::Equipment(Some(3)))
        );
        assert_eq!(
            classify(b"\r\n+CMS ERROR: SIM busy\r\n"),
            ClassifiedResponse::ProtocolError(ProtocolError::Network(None))
        );
        assert_eq!(
            classify(b"\r\nSEND ERROR\r\n"),
            ClassifiedResponse::ProtocolError(ProtocolError::Error)
        );
    }

    #[test]
    fn error_takes_precedence_over_location_and_ok() {
        assert_eq!(
            classify(b"+CLBS: 0,121.054590,14.554730\r\nERROR\r\n"),
            ClassifiedResponse::ProtocolError(ProtocolError::Error)
        );
        assert_eq!(
            classify(b"OK\r\n+CME ERROR: 50\r\n"),
            ClassifiedResponse::ProtocolError(ProtocolError::Equipment(Some(50)))
        );
        for frame in [
            &b"+CLBS: 0,ERROR\r\n"[..],
            b"ERROR: 3\r\n",
            b"+SMCONN: ERROR,1\r\n",
            b"OK\r\nERRORS\r\n",
            b"AT+SMCONN\r\r\nERROR\r\n",
        ] {
            assert_eq!(
                classify(frame),
                ClassifiedResponse::ProtocolError(ProtocolError::Error),
                "{:?}",
                core::str::from_utf8(frame)
            );
        }
    }

    #[test]
    fn location_frame() {
        let response =
            classify(b"\r\n+CLBS: 0,121.054590,14.554730,550\r\n\r\nOK\r\n");
        assert_eq!(
            response,
            ClassifiedResponse::Location(LocationResult::Fix {
                latitude: Coordinate::try_from("14.554730").unwrap(),
                longitude: Coordinate::try_from("121.054590").unwrap(),
            })
        );

        let response = classify(b"+CLBS: 1\r\n");
        assert_eq!(
            response,
            ClassifiedResponse::Location(LocationResult::ErrorCode(
                String::try_from("1").unwrap()
            ))
        );
    }

    #[test]
    fn location_config_is_not_a_location() {
        assert_eq!(
            classify(b"+CLBSCFG: 0,3,\"lbs-simcom.com:3002\"\r\nOK\r\n"),
            ClassifiedResponse::Ack
        );
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        assert_eq!(
            classify(&[0x4f, 0x4b, 0xff, 0xfe, 0x0d, 0x0a]),
            ClassifiedResponse::ProtocolError(ProtocolError::Decode)
        );
    }

    #[test]
    fn echo_only_is_unrecognized() {
        assert_eq!(
            classify(b"AT+SMSUB=\"t\",1\r\r\n"),
            ClassifiedResponse::Unrecognized(
                String::try_from("AT+SMSUB=\"t\",1").unwrap()
            )
        );
        assert_eq!(
            classify(b"\r\n\r\n"),
            ClassifiedResponse::Unrecognized(String::new())
        );
    }

    #[test]
    fn long_unrecognized_frame_is_truncated() {
        let mut frame = std::vec::Vec::from(&b"AT"[..]);
        frame.extend(core::iter::repeat(b'x').take(200));
        let ClassifiedResponse::Unrecognized(preview) = classify(&frame) else {
            panic!("expected unrecognized");
        };
        assert_eq!(preview.len(), PREVIEW_LEN);
    }
}
