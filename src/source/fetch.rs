use crate::error::{DomHashError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("domhash/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Download the raw HTML served at `url`; no scripts run, so no computed style
pub fn fetch_html(url: &str) -> Result<String> {
    let fetch_error = |source| DomHashError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_error)?;

    log::info!("Fetching {}", url);
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?;
    log::debug!("{} answered {}", url, response.status());

    response.text().map_err(fetch_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer one request on a local port with `status` and `body`
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/page.html", addr)
    }

    #[test]
    fn test_fetch_html() {
        let url = serve_once("200 OK", "<html><body><main></main></body></html>");
        assert_eq!(fetch_html(&url).unwrap(), "<html><body><main></main></body></html>");
    }

    #[test]
    fn test_fetch_error_status() {
        let url = serve_once("404 Not Found", "missing");
        let err = fetch_html(&url).unwrap_err();
        assert!(matches!(err, DomHashError::Fetch { .. }));
    }
}
