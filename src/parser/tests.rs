//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::parser::{HttpRequest, Method, HttpVersion, Error, parse_request};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/index.html");
        assert_eq!(result.target, "/index.html");
        assert_eq!(result.query, None);
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
    }

    #[test]
    fn test_parse_root_path() {
        let request = b"GET / HTTP/1.1\r\nHost: localhost:1688\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/");
    }

    #[test]
    fn test_percent_encoded_drive_path_is_decoded() {
        let request = b"GET /C:%5C/Program%20Files HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/C:\\/Program Files");
        assert_eq!(result.target, "/C:%5C/Program%20Files");
    }

    #[test]
    fn test_utf8_path_is_decoded() {
        let request = b"GET /home/%E6%96%87%E4%BB%B6 HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/home/\u{6587}\u{4ef6}");
    }

    #[test]
    fn test_query_string_is_split_off() {
        let request = b"GET /download/tmp/a.txt?x=1&y HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/download/tmp/a.txt");
        assert_eq!(result.query.as_deref(), Some("x=1&y"));
    }

    #[test]
    fn test_path_decoding_to_invalid_utf8() {
        let request = b"GET /bad%FF HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidPath(ref p)) if p == "/bad%FF"));
    }

    #[test]
    fn test_absolute_form_target_is_rejected() {
        let request = b"GET http://example.com/ HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_case_insensitive_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.has_header("host"));
        assert!(result.has_header("HOST"));
        assert!(result.has_header("Host"));
        assert!(!result.has_header("Accept"));
    }

    #[test]
    fn test_lowercase_host_header_satisfies_http11() {
        let request = b"GET / HTTP/1.1\r\nhost: example.com\r\n\r\n";
        assert!(parse_request(request).is_ok());
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /index.html HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_invalid_method() {
        let request = b"INVALID /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "INVALID"));
    }

    #[test]
    fn test_unsupported_http_versions() {
        for version in ["HTTP/9.9", "HTTP/2", "HTTP/0.9"] {
            let request = format!("GET / {version}\r\nHost: example.com\r\n\r\n");
            let result = parse_request(request.as_bytes());
            assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == version));
        }
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /index.html HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidHeaderFormat(ref l)) if l == "InvalidHeader"));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
        assert!(matches!(parse_request(b"\r\n\r\n"), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let request = b"GET\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_all_methods() {
        let methods = [
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
            Method::CONNECT,
            Method::TRACE,
        ];

        for expected in methods {
            let request = format!("{expected} / HTTP/1.1\r\nHost: example.com\r\n\r\n");
            let result = parse_request(request.as_bytes()).unwrap();
            assert_eq!(result.method, expected);
        }
    }

    #[test]
    fn test_only_head_omits_body() {
        assert!(!Method::HEAD.expects_body());
        assert!(Method::GET.expects_body());
    }

    #[test]
    fn test_headers_with_multiple_colons() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com:1688\r\nX-Test: value:with:colons\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com:1688");
        assert_eq!(result.headers.get("X-Test").unwrap(), "value:with:colons");
    }

    #[test]
    fn test_http10_without_host() {
        // HTTP/1.0 doesn't require a Host header
        let request = b"GET /index.html HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_binary_body_does_not_break_parsing() {
        let request = b"POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\n\r\n\xFF\xFE\xFD";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.path, "/upload");
    }

    #[test]
    fn test_malformed_utf8_in_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\xFF\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref s)) if s == "Invalid UTF-8"));
    }

    #[test]
    fn test_new_request_lookup() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());

        let request = HttpRequest::new(Method::GET, "/a%20b?c", HttpVersion::Http11, headers).unwrap();
        assert_eq!(request.path, "/a b");
        assert_eq!(request.query.as_deref(), Some("c"));
        assert_eq!(request.get_header("HOST").unwrap(), "example.com");
        assert!(request.get_header("X-Test").is_none());
    }
}
