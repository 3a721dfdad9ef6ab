/// A single HTTP header field.
///
/// The name is matched case-insensitively on lookup; the value has had its
/// leading spaces/tabs and trailing line terminator stripped by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

/// A parsed HTTP request.
///
/// Built once per connection by [`crate::http::parser::read_request`] and
/// dropped when the connection's service completes. Nothing in here is
/// shared between connections.
#[derive(Debug, Clone)]
pub struct Request {
    /// Minor version from the `HTTP/1.x` token of the request line (0 or 1
    /// for well-behaved clients).
    pub protocol_minor_version: u32,
    /// Request method, uppercased (`GET`, `HEAD`, `POST`, ...). Unrecognized
    /// methods are kept verbatim so the 501 page can name them.
    pub method: String,
    /// Request path exactly as sent: no percent-decoding, no normalization.
    pub path: String,
    /// Header fields in wire order.
    pub headers: Vec<HeaderField>,
    /// Entity body; empty unless the client sent a `Content-Length`.
    pub body: Vec<u8>,
}

impl Request {
    /// Looks up a header value by name, case-insensitively.
    ///
    /// Fields are stored in wire order and the first match wins, so when a
    /// client sends duplicate headers the earliest one is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use littlehttpd::http::request::{HeaderField, Request};
    /// let req = Request {
    ///     protocol_minor_version: 0,
    ///     method: "GET".to_string(),
    ///     path: "/".to_string(),
    ///     headers: vec![HeaderField {
    ///         name: "Host".to_string(),
    ///         value: "example.com".to_string(),
    ///     }],
    ///     body: Vec::new(),
    /// };
    /// assert_eq!(req.header("host"), Some("example.com"));
    /// assert_eq!(req.header("Accept"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
            .map(|field| field.value.as_str())
    }

    /// True for `HEAD` requests, which must never carry a response body.
    pub fn is_head(&self) -> bool {
        self.method == "HEAD"
    }
}
