use littlehttpd::http::parser::{MAX_REQUEST_BODY_LENGTH, ParseError, read_request};

#[tokio::test]
async fn test_parse_simple_get_request() {
    let mut input: &[u8] = b"GET /index.html HTTP/1.0\r\n\r\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.path, "/index.html");
    assert_eq!(parsed.protocol_minor_version, 0);
    assert!(parsed.headers.is_empty());
    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_minor_version_one() {
    let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.protocol_minor_version, 1);
}

#[tokio::test]
async fn test_parse_lowercase_method_is_uppercased() {
    let mut input: &[u8] = b"get / HTTP/1.0\r\n\r\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.method, "GET");
}

#[tokio::test]
async fn test_parse_unrecognized_method_passes_through() {
    // Dispatch answers 501 for these; the parser itself must not reject them.
    let mut input: &[u8] = b"BREW /pot HTTP/1.0\r\n\r\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.method, "BREW");
}

#[tokio::test]
async fn test_parse_headers_in_wire_order() {
    let mut input: &[u8] =
        b"GET / HTTP/1.0\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    let names: Vec<&str> = parsed.headers.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Host", "User-Agent", "Accept"]);
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
}

#[tokio::test]
async fn test_parse_body_with_content_length() {
    let mut input: &[u8] = b"POST /api HTTP/1.0\r\nContent-Length: 5\r\n\r\nHELLO";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.body, b"HELLO");
}

#[tokio::test]
async fn test_parse_consumes_exactly_declared_body() {
    let mut input: &[u8] = b"POST /api HTTP/1.0\r\nContent-Length: 5\r\n\r\nHELLOEXTRA";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.body, b"HELLO");
    assert_eq!(input, b"EXTRA");
}

#[tokio::test]
async fn test_parse_bare_lf_line_endings() {
    let mut input: &[u8] = b"GET / HTTP/1.0\nHost: example.com\n\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
}

#[tokio::test]
async fn test_parse_empty_stream() {
    let mut input: &[u8] = b"";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::MissingRequestLine)));
}

#[tokio::test]
async fn test_parse_malformed_request_line() {
    let mut input: &[u8] = b"GARBAGE\r\n\r\n";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[tokio::test]
async fn test_parse_unsupported_protocol() {
    let mut input: &[u8] = b"GET / FTP/1.0\r\n\r\n";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::UnsupportedProtocol(_))));
}

#[tokio::test]
async fn test_parse_malformed_header_field() {
    let mut input: &[u8] = b"GET / HTTP/1.0\r\nBrokenHeader\r\n\r\n";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::MalformedHeaderField(_))));
}

#[tokio::test]
async fn test_parse_eof_inside_header_block() {
    let mut input: &[u8] = b"GET / HTTP/1.0\r\nHost: example.com\r\n";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::TruncatedHeaders)));
}

#[tokio::test]
async fn test_parse_line_too_long() {
    let mut request = b"GET /".to_vec();
    request.extend(std::iter::repeat_n(b'a', 5000));
    request.extend_from_slice(b" HTTP/1.0\r\n\r\n");

    let mut input: &[u8] = &request;
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::LineTooLong)));
}

#[tokio::test]
async fn test_parse_full_length_line_with_crlf() {
    // 4096 bytes of line content; the \r\n terminator does not count
    // against the limit.
    let mut request = b"GET /".to_vec();
    request.extend(std::iter::repeat_n(b'a', 4082));
    request.extend_from_slice(b" HTTP/1.0\r\n\r\n");

    let mut input: &[u8] = &request;
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert_eq!(parsed.path.len(), 4083);
}

#[tokio::test]
async fn test_parse_line_over_limit_with_bare_lf() {
    // One byte past the limit is rejected no matter how the line ends.
    let mut request = b"GET /".to_vec();
    request.extend(std::iter::repeat_n(b'a', 4083));
    request.extend_from_slice(b" HTTP/1.0\n\n");

    let mut input: &[u8] = &request;
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::LineTooLong)));
}

#[tokio::test]
async fn test_parse_negative_content_length() {
    let mut input: &[u8] = b"POST /api HTTP/1.0\r\nContent-Length: -1\r\n\r\n";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::NegativeContentLength(-1))));
}

#[tokio::test]
async fn test_parse_oversized_body_rejected_before_read() {
    // No body bytes follow the blank line: the length check has to fire
    // before any read or allocation, or this would report a truncated body.
    let mut input: &[u8] = b"POST /api HTTP/1.0\r\nContent-Length: 17\r\n\r\n";
    let result = read_request(&mut input, 16).await;

    assert!(matches!(result, Err(ParseError::BodyTooLong(17))));
}

#[tokio::test]
async fn test_parse_truncated_body() {
    let mut input: &[u8] = b"POST /api HTTP/1.0\r\nContent-Length: 10\r\n\r\nHELLO";
    let result = read_request(&mut input, MAX_REQUEST_BODY_LENGTH).await;

    assert!(matches!(result, Err(ParseError::TruncatedBody)));
}

#[tokio::test]
async fn test_parse_non_numeric_content_length_reads_as_zero() {
    let mut input: &[u8] = b"POST /api HTTP/1.0\r\nContent-Length: soon\r\n\r\n";
    let parsed = read_request(&mut input, MAX_REQUEST_BODY_LENGTH)
        .await
        .unwrap();

    assert!(parsed.body.is_empty());
}
