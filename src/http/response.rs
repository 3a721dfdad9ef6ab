use std::path::PathBuf;

/// HTTP status codes the server can answer with.
///
/// The dispatch table is deliberately small:
/// - `Ok` (200): regular file served
/// - `NotFound` (404): path did not resolve to a servable file
/// - `MethodNotAllowed` (405): recognized method the server refuses
/// - `NotImplemented` (501): method the server does not know at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use littlehttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use littlehttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// What follows the header block on the wire.
#[derive(Debug)]
pub enum Body {
    /// In-memory entity; the error pages live here.
    Bytes(Vec<u8>),
    /// A regular file streamed from disk at write time. `length` is the size
    /// reported by the stat that resolved the path and is what the
    /// `Content-Length` header promised.
    File { path: PathBuf, length: u64 },
}

/// A complete response, ready for the wire.
///
/// `headers` carries only the response-specific fields; the block every
/// response shares (status line, `Date`, `Server`, `Connection: close`) is
/// produced by the writer so its order on the wire never varies.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Response-specific header fields, written in this order after the
    /// common block.
    pub headers: Vec<(String, String)>,
    /// The entity body, if any.
    pub body: Body,
}

impl Response {
    /// 200 response streaming a regular file of known size.
    pub fn file(path: PathBuf, length: u64, content_type: &str) -> Self {
        Self {
            status: StatusCode::Ok,
            headers: vec![
                ("Content-Length".to_string(), length.to_string()),
                ("Content-Type".to_string(), content_type.to_string()),
            ],
            body: Body::File { path, length },
        }
    }

    /// 404 response with the fixed "File not found" page.
    pub fn not_found() -> Self {
        let page = "<html>\r\n\
                    <head><title>Not Found</title></head>\r\n\
                    <body><p>File not found</p></body>\r\n\
                    </html>\r\n";
        Self::error_page(StatusCode::NotFound, page.into())
    }

    /// 405 response naming the rejected method.
    pub fn method_not_allowed(method: &str) -> Self {
        let page = format!(
            "<html>\r\n\
             <head>\r\n<title>405 Method Not Allowed</title>\r\n</head>\r\n\
             <body>\r\n<p>The request method {method} is not allowed</p>\r\n</body>\r\n\
             </html>\r\n"
        );
        Self::error_page(StatusCode::MethodNotAllowed, page)
    }

    /// 501 response naming the method the server does not know.
    pub fn not_implemented(method: &str) -> Self {
        let page = format!(
            "<html>\r\n\
             <head>\r\n<title>501 Not Implemented</title>\r\n</head>\r\n\
             <body>\r\n<p>The request method {method} is not implemented</p>\r\n</body>\r\n\
             </html>\r\n"
        );
        Self::error_page(StatusCode::NotImplemented, page)
    }

    /// An error page is `text/html` with no `Content-Length`; closing the
    /// connection delimits it.
    fn error_page(status: StatusCode, page: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            body: Body::Bytes(page.into_bytes()),
        }
    }
}
