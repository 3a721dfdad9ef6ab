use crate::http::request::{HeaderField, Request};
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Longest accepted request or header line, in bytes, not counting the line
/// terminator. Lines beyond this are a fatal parse error, never silently
/// split.
pub const MAX_LINE_LENGTH: usize = 4096;

/// Default upper bound on an entity body announced via `Content-Length`.
pub const MAX_REQUEST_BODY_LENGTH: u64 = 1024 * 1024;

const PROTOCOL_PREFIX: &str = "HTTP/1.";

/// Why a request could not be parsed. Any of these ends the connection.
#[derive(Debug)]
pub enum ParseError {
    /// The stream ended before a request line arrived.
    MissingRequestLine,
    /// A request or header line exceeded [`MAX_LINE_LENGTH`].
    LineTooLong,
    /// The request line did not contain its two space separators.
    MalformedRequestLine(String),
    /// The protocol token did not start with `HTTP/1.`.
    UnsupportedProtocol(String),
    /// A header line had no `:` separator.
    MalformedHeaderField(String),
    /// The stream ended inside the header block, before the blank line.
    TruncatedHeaders,
    /// The request head contained bytes that are not valid UTF-8.
    InvalidEncoding,
    /// The client announced a negative `Content-Length`.
    NegativeContentLength(i64),
    /// The announced `Content-Length` exceeds the configured maximum.
    BodyTooLong(u64),
    /// The stream ended before `Content-Length` bytes of body arrived.
    TruncatedBody,
    /// Transport error while reading the request.
    Io(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingRequestLine => write!(f, "no request line"),
            ParseError::LineTooLong => write!(f, "line too long"),
            ParseError::MalformedRequestLine(line) => {
                write!(f, "parse error on request line: {line:?}")
            }
            ParseError::UnsupportedProtocol(protocol) => {
                write!(f, "unsupported protocol prefix: {protocol:?}")
            }
            ParseError::MalformedHeaderField(line) => {
                write!(f, "parse error on request header field: {line:?}")
            }
            ParseError::TruncatedHeaders => write!(f, "failed to read request header field"),
            ParseError::InvalidEncoding => write!(f, "invalid utf-8 in request head"),
            ParseError::NegativeContentLength(length) => {
                write!(f, "negative Content-Length value: {length}")
            }
            ParseError::BodyTooLong(length) => {
                write!(f, "request body too long: {length} bytes")
            }
            ParseError::TruncatedBody => write!(f, "failed to read request body"),
            ParseError::Io(err) => write!(f, "failed to read request: {err}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err)
    }
}

/// Reads one complete request from `input`: request line, header block and,
/// when a `Content-Length` field announces one, the entity body.
///
/// The parser is strict about structure but deliberately loose about header
/// content: unknown methods and unknown header names pass through untouched
/// so the dispatch layer can answer 501 with the method named in the page.
/// Bodies larger than `max_body_length` are rejected before any allocation.
pub async fn read_request<R>(input: &mut R, max_body_length: u64) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let request_line = read_line(input)
        .await?
        .ok_or(ParseError::MissingRequestLine)?;
    let (method, path, protocol_minor_version) = parse_request_line(&request_line)?;

    let mut headers = Vec::new();
    loop {
        let line = read_line(input).await?.ok_or(ParseError::TruncatedHeaders)?;
        if line.is_empty() {
            break;
        }
        headers.push(parse_header_field(&line)?);
    }

    let mut request = Request {
        protocol_minor_version,
        method,
        path,
        headers,
        body: Vec::new(),
    };

    let length = body_length(&request)?;
    if length > max_body_length {
        return Err(ParseError::BodyTooLong(length));
    }
    if length > 0 {
        let mut body = vec![0u8; length as usize];
        input
            .read_exact(&mut body)
            .await
            .map_err(|_| ParseError::TruncatedBody)?;
        request.body = body;
    }

    Ok(request)
}

/// Reads one `\n`-terminated line, tolerating both `\r\n` and bare `\n`.
///
/// Returns `Ok(None)` on a clean end of stream. A stream that ends in the
/// middle of a line yields the partial line; the caller decides whether
/// that is acceptable where it is.
async fn read_line<R>(input: &mut R) -> Result<Option<String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line: Vec<u8> = Vec::new();
    loop {
        let (done, used) = {
            let available = input.fill_buf().await?;
            if available.is_empty() {
                if line.is_empty() {
                    return Ok(None);
                }
                (true, 0)
            } else {
                match available.iter().position(|&byte| byte == b'\n') {
                    Some(position) => {
                        line.extend_from_slice(&available[..position]);
                        (true, position + 1)
                    }
                    None => {
                        line.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            }
        };
        input.consume(used);
        if done {
            break;
        }
        // One byte of slack for a trailing \r the strip below removes.
        if line.len() > MAX_LINE_LENGTH + 1 {
            return Err(ParseError::LineTooLong);
        }
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    if line.len() > MAX_LINE_LENGTH {
        return Err(ParseError::LineTooLong);
    }
    match String::from_utf8(line) {
        Ok(text) => Ok(Some(text)),
        Err(_) => Err(ParseError::InvalidEncoding),
    }
}

/// Splits `METHOD path HTTP/1.x` on its two spaces.
///
/// The method is uppercased; the path is kept verbatim, with no decoding or
/// normalization. The protocol token is matched case-insensitively against
/// `HTTP/1.` and whatever decimal digits follow become the minor version.
fn parse_request_line(line: &str) -> Result<(String, String, u32), ParseError> {
    let (method, rest) = line
        .split_once(' ')
        .ok_or_else(|| ParseError::MalformedRequestLine(line.to_string()))?;
    let (path, protocol) = rest
        .split_once(' ')
        .ok_or_else(|| ParseError::MalformedRequestLine(line.to_string()))?;

    let prefix = protocol
        .get(..PROTOCOL_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(PROTOCOL_PREFIX))
        .ok_or_else(|| ParseError::UnsupportedProtocol(protocol.to_string()))?;
    let minor = atoi_prefix(&protocol[prefix.len()..]).clamp(0, i64::from(u32::MAX)) as u32;

    Ok((method.to_ascii_uppercase(), path.to_string(), minor))
}

/// Splits a header line on the first `:`. The name keeps its exact spelling;
/// the value loses any leading spaces and tabs.
fn parse_header_field(line: &str) -> Result<HeaderField, ParseError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MalformedHeaderField(line.to_string()))?;
    Ok(HeaderField {
        name: name.to_string(),
        value: value.trim_start_matches([' ', '\t']).to_string(),
    })
}

/// Body length announced by the request, or 0 when no `Content-Length` field
/// is present. A negative value is fatal; a non-numeric one reads as 0.
fn body_length(request: &Request) -> Result<u64, ParseError> {
    let Some(value) = request.header("Content-Length") else {
        return Ok(0);
    };
    let length = atoi_prefix(value);
    if length < 0 {
        return Err(ParseError::NegativeContentLength(length));
    }
    Ok(length as u64)
}

/// Integer parse with `atoi` semantics: optional sign, then a run of digits;
/// trailing garbage is ignored and no digits at all read as 0. Saturates
/// instead of overflowing.
fn atoi_prefix(text: &str) -> i64 {
    let mut bytes = text.bytes().peekable();
    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    while let Some(&byte) = bytes.peek() {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
        bytes.next();
    }
    if negative { -value } else { value }
}
