//! HTTP response headers for the outer web layer.
//!
//! The feed is served CGI-style: header lines, a blank line, then the body.
//! The header order is fixed; the far-past dates force revalidation, with
//! the ETag carrying the content fingerprint.

use crate::config::OutputConfig;

/// Fixed past date for the Expires and Last-Modified headers.
const EXPIRED_DATE: &str = "Sat, 29 Sep 1984 15:00:00 GMT";

/// Header lines in their fixed emission order.
pub fn response_headers(output: &OutputConfig, etag: &str) -> Vec<String> {
    vec![
        format!(
            "Content-Type: {}; charset={}",
            output.content_type, output.charset
        ),
        "Cache-Control: no-cache, must-revalidate".to_string(),
        format!("Expires: {EXPIRED_DATE}"),
        format!("Last-Modified: {EXPIRED_DATE}"),
        format!("ETag: \"{etag}\""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_come_in_the_fixed_order() {
        let headers = response_headers(&OutputConfig::default(), "d41d8cd9");
        assert_eq!(
            headers,
            [
                "Content-Type: text/calendar; charset=utf-8",
                "Cache-Control: no-cache, must-revalidate",
                "Expires: Sat, 29 Sep 1984 15:00:00 GMT",
                "Last-Modified: Sat, 29 Sep 1984 15:00:00 GMT",
                "ETag: \"d41d8cd9\"",
            ]
        );
    }

    #[test]
    fn content_type_and_charset_come_from_the_config() {
        let output = OutputConfig {
            content_type: "text/plain".to_string(),
            charset: "iso-8859-1".to_string(),
            ..OutputConfig::default()
        };
        let headers = response_headers(&output, "etag");
        assert_eq!(headers[0], "Content-Type: text/plain; charset=iso-8859-1");
    }
}
