//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use crate::parser::{Error, Header, HttpVersion, Method, parse_request};
    use crate::parser::{declared_content_length, find_header_end};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /foo/bar?x=1 HTTP/1.1\r\nHost: h\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.target, "/foo/bar?x=1");
        assert_eq!(result.base_path, "/foo/bar");
        assert_eq!(result.query_string, "x=1");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers, vec![Header::new("Host", "h")]);
        assert_eq!(result.body, "");
    }

    #[test]
    fn test_target_without_query() {
        let request = b"GET /users/profile HTTP/1.1\r\nHost: h\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.base_path, "/users/profile");
        assert_eq!(result.target, "/users/profile");
        assert!(result.query_string.is_empty());
    }

    #[test]
    fn test_query_split_on_first_question_mark() {
        let request = b"GET /a?b=1?c=2 HTTP/1.1\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.base_path, "/a");
        assert_eq!(result.query_string, "b=1?c=2");
    }

    #[test]
    fn test_target_is_percent_decoded() {
        let request = b"GET /search?q=hello%20world&name=a+b HTTP/1.1\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.target, "/search?q=hello world&name=a b");
        assert_eq!(result.query_string, "q=hello world&name=a b");
    }

    #[test]
    fn test_non_utf8_percent_escape_is_replaced() {
        let request = b"GET /users/profile?name=%FF&id=3 HTTP/1.1\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.base_path, "/users/profile");
        assert_eq!(result.query_string, "name=\u{FFFD}&id=3");

        // A stray '%' is kept as-is
        let result = parse_request(b"GET /a?x=100% HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.query_string, "x=100%");
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let request = b"post /items HTTP/1.1\r\n\r\n";
        assert_eq!(parse_request(request).unwrap().method, Method::POST);

        let request = b"Delete /items HTTP/1.1\r\n\r\n";
        assert_eq!(parse_request(request).unwrap().method, Method::DELETE);
    }

    #[test]
    fn test_unknown_method_is_sentinel() {
        let request = b"BREW /coffee HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::UNKNOWN);
        assert_eq!(result.base_path, "/coffee");
    }

    #[test]
    fn test_all_methods() {
        for method in Method::KNOWN {
            let request = format!("{method} /index HTTP/1.1\r\n\r\n");
            assert_eq!(parse_request(request.as_bytes()).unwrap().method, method);
        }
    }

    #[test]
    fn test_headers_keep_order_and_duplicates() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\nAccept: text/html\r\nAccept: */*\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.len(), 3);
        assert_eq!(result.headers[1], Header::new("Accept", "text/html"));
        assert_eq!(result.headers[2], Header::new("Accept", "*/*"));
        assert_eq!(result.header("accept"), Some("text/html"));
        let all: Vec<&str> = result.header_values("ACCEPT").collect();
        assert_eq!(all, vec!["text/html", "*/*"]);
    }

    #[test]
    fn test_case_insensitive_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.has_header("host"));
        assert!(result.has_header("HOST"));
        assert!(!result.has_header("Accept"));
    }

    #[test]
    fn test_headers_with_multiple_colons_and_whitespace() {
        let request = b"GET / HTTP/1.1\r\n  X-Test :  value:with:colons  \r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers[0], Header::new("X-Test", "value:with:colons"));
    }

    #[test]
    fn test_header_without_colon_has_empty_value() {
        let request = b"GET / HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers, vec![Header::new("InvalidHeader", "")]);
    }

    #[test]
    fn test_body_after_blank_line() {
        let request = b"POST /items HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"a\":1}\r\nsecond line";
        let result = parse_request(request).unwrap();
        assert!(result.is_json());
        assert_eq!(result.body, "{\"a\":1}\r\nsecond line");
    }

    #[test]
    fn test_nul_padding_is_stripped() {
        let mut request = b"POST /items HTTP/1.1\r\nHost: h\r\n\r\nhello".to_vec();
        request.resize(1024, 0);
        let result = parse_request(&request).unwrap();
        assert_eq!(result.body, "hello");

        let mut no_body = b"GET /items HTTP/1.1".to_vec();
        no_body.resize(64, 0);
        let result = parse_request(&no_body).unwrap();
        assert_eq!(result.version, HttpVersion::Http11);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
        assert!(matches!(parse_request(&[0u8; 16]), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        assert!(matches!(parse_request(b"GET\r\n"), Err(Error::MalformedRequestLine(_))));
        assert!(matches!(parse_request(b"GET /index\r\n\r\n"), Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_invalid_utf8_request_line() {
        let request = b"GET /\xff\xfe HTTP/1.1\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::MalformedRequestLine(ref m)) if m == "Invalid UTF-8"));
    }

    #[test]
    fn test_latin1_body_and_header_are_decoded_lossily() {
        let request = b"POST /users/create HTTP/1.1\r\nX-Name: Jos\xe9\r\nContent-Length: 2\r\n\r\n\xe9\xff";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.base_path, "/users/create");
        assert_eq!(result.header("X-Name"), Some("Jos\u{FFFD}"));
        assert_eq!(result.body, "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_unrecognised_http_version_is_kept() {
        let request = b"GET /index.html HTTP/3\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Other("HTTP/3".to_string()));
        assert_eq!(result.version.to_string(), "HTTP/3");
        assert_eq!(result.base_path, "/index.html");

        let result = parse_request(b"GET / HTTP/0.9\r\n\r\n").unwrap();
        assert_eq!(result.version.as_str(), "HTTP/0.9");
    }

    #[test]
    fn test_http10_and_http2_versions() {
        let result = parse_request(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        let result = parse_request(b"GET / HTTP/2\r\n\r\n").unwrap();
        assert_eq!(result.version, HttpVersion::Http20);
        let result = parse_request(b"GET / http/1.1\r\n\r\n").unwrap();
        assert_eq!(result.version, HttpVersion::default());
        assert_eq!(HttpVersion::Http20.to_string(), "HTTP/2");
    }

    #[test]
    fn test_find_header_end() {
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(18));
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\nHost: h\r\n"), None);
    }

    #[test]
    fn test_declared_content_length() {
        let head = b"POST / HTTP/1.1\r\ncontent-length: 12\r\n\r\n";
        assert_eq!(declared_content_length(head).unwrap(), Some(12));
        assert_eq!(declared_content_length(b"GET / HTTP/1.1\r\n\r\n").unwrap(), None);
        let bad = b"POST / HTTP/1.1\r\nContent-Length: many\r\n\r\n";
        assert!(matches!(declared_content_length(bad), Err(Error::InvalidContentLength(ref v)) if v == "many"));
    }

    #[test]
    fn test_method_deserializes_from_settings() {
        let methods: Vec<Method> = serde_json::from_str(r#"["get", "POST"]"#).unwrap();
        assert_eq!(methods, vec![Method::GET, Method::POST]);
        assert!(serde_json::from_str::<Method>(r#""BREW""#).is_err());
    }
}
