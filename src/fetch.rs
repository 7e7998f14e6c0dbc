use std::fmt;

use reqwest::Client;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::FetchError;
use crate::utils::copy::copy_body;

const HTTP_PREFIX: &str = "http://";

/// Prepends `http://` unless the argument already starts with it.
///
/// Only the `http://` prefix is recognized; `https://example.com` comes out as
/// `http://https://example.com`.
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with(HTTP_PREFIX) {
        raw.to_string()
    } else {
        format!("{}{}", HTTP_PREFIX, raw)
    }
}

/// Status metadata reported once a body has been copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub code: u16,
    pub status: String,
    pub proto: String,
}

impl StatusReport {
    fn from_response(response: &reqwest::Response) -> Self {
        let status = response.status();
        Self {
            code: status.as_u16(),
            status: status.to_string(),
            proto: format!("{:?}", response.version()),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StatusCode: {}", self.code)?;
        writeln!(f, "Status {}", self.status)?;
        writeln!(f, "Proto {}", self.proto)
    }
}

/// GETs `url` and streams its body into `out`.
pub async fn fetch<W>(client: &Client, url: &str, out: &mut W) -> Result<StatusReport, FetchError>
where
    W: AsyncWrite + Unpin,
{
    let mut response = client.get(url).send().await.map_err(FetchError::Request)?;
    let report = StatusReport::from_response(&response);

    let written = copy_body(&mut response, url, "stdout", out).await?;
    debug!(url, written, code = report.code, "body copied");

    Ok(report)
}

/// Fetches each URL in order, bodies to `out` and status blocks to `err`.
///
/// Stops at the first failure; later URLs are never requested.
pub async fn run<O, E>(
    client: &Client,
    urls: &[String],
    out: &mut O,
    err: &mut E,
) -> Result<(), FetchError>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    for raw in urls {
        let url = normalize_url(raw);
        let report = fetch(client, &url, out).await?;

        let write_err = |source| FetchError::Write {
            url: url.clone(),
            target: "stderr".to_string(),
            source,
        };
        err.write_all(report.to_string().as_bytes())
            .await
            .map_err(write_err)?;
        err.flush().await.map_err(write_err)?;
    }
    Ok(())
}
