//! HTTP request parsing and representation.

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Terminator of the header block.
pub(crate) const HEADER_END: &[u8] = b"\r\n\r\n";

/// A single request header, kept exactly as received (after trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A parsed HTTP request.
///
/// Built once per connection by [`parse_request`] and never mutated
/// afterwards. Headers keep their arrival order and duplicates are allowed.
#[derive(Debug, Clone)]
pub struct RequestMessage {
    /// The HTTP method, or [`Method::UNKNOWN`]
    pub method: Method,
    /// The percent-decoded request target, query string included
    pub target: String,
    /// The target up to (not including) the first `?`
    pub base_path: String,
    /// Everything after the first `?`, empty when there is none
    pub query_string: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The headers in arrival order
    pub headers: Vec<Header>,
    /// The request body, NUL padding removed
    pub body: String,
}

impl RequestMessage {
    /// Get the first value of a header, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Get every value of a header, in arrival order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Check if the request declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.header("Content-Type")
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false)
    }
}

/// Parse an HTTP request from a byte slice.
///
/// The request line must carry three space-separated tokens and be valid
/// UTF-8. The target is percent-decoded (`+` reads as a space) before being
/// split on the first `?`. Header lines are split on their first `:`; a line
/// without one becomes a header with an empty value. Everything after the
/// first blank line is the body. Headers, body and decoded target bytes that
/// are not UTF-8 are replaced with U+FFFD rather than rejected.
pub fn parse_request(input: &[u8]) -> Result<RequestMessage, Error> {
    // Fixed-size read buffers leave NUL padding behind the message
    let end = input.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
    let input = &input[..end];
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let (head, body) = match find_header_end(input) {
        Some(body_start) => (&input[..body_start - HEADER_END.len()], &input[body_start..]),
        None => (input, &[][..]),
    };

    let (request_line, header_block) = match head.windows(2).position(|w| w == b"\r\n") {
        Some(pos) => (&head[..pos], &head[pos + 2..]),
        None => (head, &[][..]),
    };

    let request_line = std::str::from_utf8(request_line)
        .map_err(|_| Error::MalformedRequestLine("Invalid UTF-8".to_string()))?;

    let tokens: Vec<&str> = request_line.split(' ').collect();
    if tokens.len() < 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_token(tokens[0]);
    let target = decode_target(tokens[1]);
    let version = HttpVersion::from_token(tokens[2]);

    let (base_path, query_string) = match target.split_once('?') {
        Some((base, query)) => (base.to_string(), query.to_string()),
        None => (target.clone(), String::new()),
    };

    let headers = String::from_utf8_lossy(header_block)
        .split("\r\n")
        .take_while(|line| !line.is_empty())
        .map(parse_header_line)
        .collect();

    Ok(RequestMessage {
        method,
        target,
        base_path,
        query_string,
        version,
        headers,
        body: String::from_utf8_lossy(body).replace('\0', ""),
    })
}

fn parse_header_line(line: &str) -> Header {
    match line.split_once(':') {
        Some((name, value)) => Header::new(name.trim(), value.trim()),
        None => Header::new(line.trim(), ""),
    }
}

fn decode_target(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Locate the end of the header block, returning the offset of the first body byte.
pub(crate) fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_END.len())
        .position(|w| w == HEADER_END)
        .map(|pos| pos + HEADER_END.len())
}

/// Read the Content-Length declared in a raw header block, if any.
pub(crate) fn declared_content_length(head: &[u8]) -> Result<Option<usize>, Error> {
    let head = String::from_utf8_lossy(head);
    for line in head.split("\r\n").skip(1) {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("Content-Length") {
                let value = value.trim();
                return value
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|_| Error::InvalidContentLength(value.to_string()));
            }
        }
    }
    Ok(None)
}
