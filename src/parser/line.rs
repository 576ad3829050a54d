use crate::error::ParseError;
use crate::types::{CanFrame, MAX_EXTENDED_ID, MAX_STANDARD_ID};

/// Hex digits candump uses for a standard identifier; longer IDs are extended
const STANDARD_ID_DIGITS: usize = 3;

/// Parse one candump line of the form `(<timestamp>) <interface> <id>#<payload>`.
///
/// The line is expected to be trimmed and non-empty. Tokens after the third
/// (direction flags written by some candump versions) are ignored.
pub fn parse_line(line: &str) -> Result<CanFrame, ParseError> {
    let mut tokens = line.split_whitespace();
    let (timestamp, interface, message_part) = match (tokens.next(), tokens.next(), tokens.next())
    {
        (Some(ts), Some(iface), Some(msg)) => (ts, iface, msg),
        _ => {
            return Err(ParseError::MalformedLine(format!(
                "expected '(<timestamp>) <interface> <id>#<payload>', got '{line}'"
            )))
        }
    };

    let timestamp = timestamp.trim_start_matches('(').trim_end_matches(')');

    let (id_str, payload_str) = message_part.split_once('#').ok_or_else(|| {
        ParseError::MalformedLine(format!("message part does not contain '#': {message_part}"))
    })?;
    if payload_str.contains('#') {
        return Err(ParseError::MalformedLine(format!(
            "message part contains more than one '#': {message_part}"
        )));
    }

    let (id, is_extended) = parse_frame_id(id_str)?;
    let payload = parse_payload(payload_str)?;

    Ok(CanFrame {
        timestamp: timestamp.to_string(),
        interface: interface.to_string(),
        id,
        is_extended,
        payload,
    })
}

fn parse_frame_id(id_str: &str) -> Result<(u32, bool), ParseError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::MalformedLine(format!(
            "frame id is not hexadecimal: '{id_str}'"
        )));
    }

    let id = u32::from_str_radix(id_str, 16)
        .ok()
        .filter(|id| *id <= MAX_EXTENDED_ID)
        .ok_or_else(|| {
            ParseError::MalformedLine(format!("frame id exceeds 29 bits: '{id_str}'"))
        })?;

    let is_extended = id_str.len() > STANDARD_ID_DIGITS || id > MAX_STANDARD_ID;
    Ok((id, is_extended))
}

/// Decode a run of hex digit pairs into bytes
pub fn parse_payload(payload_str: &str) -> Result<Vec<u8>, ParseError> {
    if payload_str.len() % 2 != 0 {
        return Err(ParseError::MalformedPayload(format!(
            "odd number of hex digits: '{payload_str}'"
        )));
    }
    if !payload_str.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::MalformedPayload(format!(
            "non-hex characters: '{payload_str}'"
        )));
    }

    payload_str
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let digits = std::str::from_utf8(pair).map_err(|e| {
                ParseError::MalformedPayload(format!("invalid payload '{payload_str}': {e}"))
            })?;
            u8::from_str_radix(digits, 16).map_err(|e| {
                ParseError::MalformedPayload(format!("invalid payload '{payload_str}': {e}"))
            })
        })
        .collect()
}
