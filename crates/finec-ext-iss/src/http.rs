//! Live G-curve parameters from the MOEX ISS.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde_json::Value;

use finec_config::IssConfig;
use finec_curves::source::DATE_FORMAT;
use finec_curves::{CurveError, CurveParameterSource, CurveParameters, CurveResult};

use crate::payload::{parse_zcyc_value, PARAMS_BLOCK};

/// Path of the zero-coupon yield curve history endpoint.
pub const ZCYC_ENDPOINT: &str = "/iss/history/engines/stock/zcyc.json";

/// Curve parameter source backed by the ISS `zcyc` endpoint.
///
/// One blocking HTTP client is built up front and reused for every request.
///
/// ```rust,no_run
/// use finec_config::IssConfig;
/// use finec_curves::yield_curve;
/// use finec_ext_iss::IssCurveSource;
///
/// let source = IssCurveSource::new(&IssConfig::default()).unwrap();
/// let one_year = yield_curve(&source, "2022-09-28", 1.0).unwrap();
/// println!("{one_year:.2} bp");
/// ```
#[derive(Debug, Clone)]
pub struct IssCurveSource {
    client: Client,
    base_url: String,
}

impl IssCurveSource {
    /// Builds a source from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SourceUnavailable`] if the HTTP client cannot be
    /// constructed (for instance when no TLS backend is available).
    pub fn new(config: &IssConfig) -> CurveResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CurveError::source_unavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the endpoint, without the query string.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, ZCYC_ENDPOINT)
    }

    fn request(&self, date: NaiveDate) -> CurveResult<Value> {
        let url = self.endpoint_url();
        let date = date.format(DATE_FORMAT).to_string();
        log::debug!("GET {url}?date={date}");

        let response = self
            .client
            .get(&url)
            .query(&query(&date))
            .send()
            .map_err(|e| CurveError::source_unavailable(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CurveError::source_unavailable(format!(
                "{url} answered {status}"
            )));
        }

        response
            .json::<Value>()
            .map_err(|e| CurveError::source_unavailable(format!("malformed ISS payload: {e}")))
    }
}

fn query(date: &str) -> [(&'static str, &str); 3] {
    [
        ("date", date),
        ("iss.meta", "off"),
        ("iss.only", PARAMS_BLOCK),
    ]
}

impl CurveParameterSource for IssCurveSource {
    fn fetch(&self, date: NaiveDate) -> CurveResult<Vec<CurveParameters>> {
        let payload = self.request(date)?;
        parse_zcyc_value(&payload, date)
    }

    fn describe(&self) -> String {
        format!("ISS {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finec_curves::YieldCurveEvaluator;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const SAVED_RESPONSE: &str = include_str!("../tests/data/zcyc_2022-09-28.json");

    /// Serves one canned HTTP response on loopback and hands back the
    /// request line it received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            request_line.trim_end().to_string()
        });

        (base_url, handle)
    }

    fn source_for(base_url: &str) -> IssCurveSource {
        IssCurveSource::new(&IssConfig::default().with_base_url(base_url).with_timeout_secs(5))
            .unwrap()
    }

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 9, 28).unwrap()
    }

    #[test]
    fn test_fetch_over_http() {
        let (base_url, server) = serve_once("200 OK", SAVED_RESPONSE);
        let source = source_for(&base_url);

        let curve = YieldCurveEvaluator::fetch(&source, "2022-09-28").unwrap();
        assert_eq!((curve.rate(1.0).unwrap() * 100.0).round() / 100.0, 830.24);

        let request_line = server.join().unwrap();
        assert_eq!(
            request_line,
            "GET /iss/history/engines/stock/zcyc.json?date=2022-09-28&iss.meta=off&iss.only=params HTTP/1.1"
        );
    }

    #[test]
    fn test_error_status_is_source_unavailable() {
        let (base_url, server) = serve_once("502 Bad Gateway", "");
        let source = source_for(&base_url);

        let err = source.fetch(reference_date()).unwrap_err();
        assert!(matches!(err, CurveError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("502"));
        server.join().unwrap();
    }

    #[test]
    fn test_undecodable_body_is_source_unavailable() {
        let (base_url, server) = serve_once("200 OK", "<html>maintenance</html>");
        let source = source_for(&base_url);

        let err = source.fetch(reference_date()).unwrap_err();
        assert!(matches!(err, CurveError::SourceUnavailable { .. }));
        server.join().unwrap();
    }

    #[test]
    fn test_endpoint_url() {
        let config = IssConfig::default().with_base_url("http://localhost:8080");
        let source = IssCurveSource::new(&config).unwrap();
        assert_eq!(
            source.endpoint_url(),
            "http://localhost:8080/iss/history/engines/stock/zcyc.json"
        );
        assert_eq!(source.describe(), "ISS http://localhost:8080");
    }

    #[test]
    fn test_query_parameters() {
        let q = query("2022-09-28");
        assert_eq!(q[0], ("date", "2022-09-28"));
        assert!(q.contains(&("iss.meta", "off")));
        assert!(q.contains(&("iss.only", "params")));
    }

    #[test]
    fn test_unreachable_host_is_source_unavailable() {
        // Port 9 (discard) on loopback: nothing listens there in CI.
        let config = IssConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout_secs(2);
        let source = IssCurveSource::new(&config).unwrap();
        let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();

        let err = source.fetch(date).unwrap_err();
        assert!(matches!(err, CurveError::SourceUnavailable { .. }));
    }

    #[test]
    #[ignore = "requires network access to iss.moex.com"]
    fn test_live_reference_date() {
        let source = IssCurveSource::new(&IssConfig::default().with_timeout_secs(30)).unwrap();
        let curve = YieldCurveEvaluator::fetch(&source, "2022-09-28").unwrap();
        let y = curve.rate(1.0).unwrap();
        assert_eq!((y * 100.0).round() / 100.0, 830.24);
    }
}
