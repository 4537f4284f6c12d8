//! Console reporting for exchanges and check results.
//!
//! Console text is the harness's only report, so everything here goes to
//! stdout. Formatting lives in plain functions so it can be tested without
//! capturing the process output.

use std::collections::BTreeMap;

use crate::exchange::Exchange;

const RULE_WIDTH: usize = 60;

/// Prints banners, exchanges and pass/fail lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    quiet: bool,
}

impl Console {
    /// Creates a console. With `quiet` set, exchange dumps are skipped but
    /// banners and check results are still printed.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Prints a section banner.
    pub fn banner(&self, title: &str) {
        println!("{}", format_banner(title));
    }

    /// Prints the request and response details of an exchange.
    pub fn exchange(&self, exchange: &Exchange) {
        if !self.quiet {
            println!("{}", format_exchange(exchange));
        }
    }

    /// Prints a plain informational line.
    pub fn info(&self, message: impl AsRef<str>) {
        println!("{}", message.as_ref());
    }

    pub fn pass(&self, message: impl AsRef<str>) {
        println!("{}", format_pass(message.as_ref()));
    }

    pub fn fail(&self, message: impl AsRef<str>) {
        println!("{}", format_fail(message.as_ref()));
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Formats a section banner framed by rules.
pub fn format_banner(title: &str) -> String {
    format!("\n{}\n{}\n{}", rule(), title, rule())
}

pub fn format_pass(message: &str) -> String {
    format!("✓ {}", message)
}

pub fn format_fail(message: &str) -> String {
    format!("✗ {}", message)
}

/// Formats an exchange: request line, payload, status, headers and body.
///
/// JSON bodies are pretty-printed; anything else is shown as text.
pub fn format_exchange(exchange: &Exchange) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule());
    out.push('\n');
    out.push_str(&format!("REQUEST: {} {}\n", exchange.method, exchange.url));
    if let Some(payload) = &exchange.payload {
        out.push_str(&format!("PAYLOAD: {}\n", pretty_json(payload)));
    }
    out.push_str(&format!("RESPONSE STATUS: {}\n", exchange.status.as_u16()));
    out.push_str(&format!("RESPONSE HEADERS: {}\n", format_headers(exchange)));
    out.push_str(&format!("RESPONSE BODY: {}\n", format_body(exchange)));
    out.push_str(&rule());
    out.push('\n');
    out
}

fn format_headers(exchange: &Exchange) -> String {
    let headers: BTreeMap<&str, String> = exchange
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    format!("{:?}", headers)
}

fn format_body(exchange: &Exchange) -> String {
    match serde_json::from_slice::<serde_json::Value>(&exchange.body) {
        Ok(value) => pretty_json(&value),
        Err(_) => exchange.body_text().into_owned(),
    }
}

fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use reqwest::{Method, StatusCode};
    use serde_json::json;
    use std::time::Duration;

    fn exchange(body: &[u8], payload: Option<serde_json::Value>) -> Exchange {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Exchange {
            method: Method::POST,
            url: "http://localhost:8080/api/users".to_string(),
            payload,
            status: StatusCode::CREATED,
            headers,
            body: body.to_vec(),
            elapsed: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_format_exchange_pretty_prints_json() {
        let text = format_exchange(&exchange(
            br#"{"id":1,"name":"A"}"#,
            Some(json!({"name": "A"})),
        ));
        assert!(text.contains("REQUEST: POST http://localhost:8080/api/users"));
        assert!(text.contains("PAYLOAD: {\n  \"name\": \"A\"\n}"));
        assert!(text.contains("RESPONSE STATUS: 201"));
        assert!(text.contains("\"content-type\": \"application/json\""));
        assert!(text.contains("\"id\": 1"));
    }

    #[test]
    fn test_format_exchange_falls_back_to_text() {
        let text = format_exchange(&exchange(b"Internal Server Error", None));
        assert!(!text.contains("PAYLOAD:"));
        assert!(text.contains("RESPONSE BODY: Internal Server Error"));
    }

    #[test]
    fn test_banner_and_marks() {
        let banner = format_banner("CREATE TESTS");
        assert_eq!(banner.lines().filter(|l| *l == "=".repeat(60)).count(), 2);
        assert!(banner.contains("CREATE TESTS"));
        assert_eq!(format_pass("ok"), "✓ ok");
        assert_eq!(format_fail("bad"), "✗ bad");
    }
}
