use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const HEAD_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("request line is not terminated by CRLF")]
    MissingRequestLine,
    #[error("request line needs a method and a target")]
    InvalidRequestLine,
    #[error("invalid method token")]
    InvalidMethod,
    #[error("request line is not valid UTF-8")]
    InvalidEncoding,
    #[error("body is shorter than Content-Length")]
    Incomplete,
}

/// Parses one request out of `buf`.
///
/// Returns the request and the number of bytes it occupied. The only
/// recoverable error is [`ParseError::Incomplete`], raised when a declared
/// `Content-Length` asks for more bytes than are buffered.
///
/// A head without the blank-line terminator is accepted as a request with no
/// body. Header trouble never rejects a request: lines without a colon are
/// skipped, values are decoded lossily, and a non-numeric `Content-Length`
/// is ignored so the body is the rest of the buffer.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let line_end = find(buf, CRLF).ok_or(ParseError::MissingRequestLine)?;
    let request_line =
        std::str::from_utf8(&buf[..line_end]).map_err(|_| ParseError::InvalidEncoding)?;

    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let path = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let version = parts.next().unwrap_or("HTTP/1.1");

    let method = Method::parse(method_str).ok_or(ParseError::InvalidMethod)?;

    // The blank line may directly follow the request line, so search from its CRLF.
    let headers_start = line_end + CRLF.len();
    let (header_bytes, body_start) = match find(&buf[line_end..], HEAD_END) {
        Some(pos) => {
            let marker = line_end + pos;
            (&buf[headers_start..marker + CRLF.len()], marker + HEAD_END.len())
        }
        None => (&buf[headers_start..], buf.len()),
    };

    let headers = parse_headers(header_bytes);

    let body_bytes = &buf[body_start..];
    let content_length = headers
        .get("Content-Length")
        .and_then(|v| v.trim().parse::<usize>().ok());

    let (body, consumed) = match content_length {
        Some(len) if body_bytes.len() < len => return Err(ParseError::Incomplete),
        Some(len) => (body_bytes[..len].to_vec(), body_start + len),
        None => (body_bytes.to_vec(), buf.len()),
    };

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    Ok((request, consumed))
}

/// Splits `Name: value` lines. The name is kept verbatim and only the one
/// space after the colon is dropped, so `Name : x` never matches `Name`.
fn parse_headers(block: &[u8]) -> HashMap<String, String> {
    let block = String::from_utf8_lossy(block);

    let mut headers = HashMap::new();
    for line in block.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let value = value.strip_prefix(' ').unwrap_or(value);
        headers
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }

    headers
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}
