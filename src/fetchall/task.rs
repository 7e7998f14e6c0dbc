use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::utils::copy::copy_body;

pub fn file_name(index: usize) -> String {
    format!("file{}", index)
}

#[derive(Clone)]
pub struct FetchContext {
    client: Client,
    output_dir: PathBuf,
    sink: mpsc::Sender<String>,
    started: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    pub elapsed: Duration,
    pub bytes: u64,
    pub file_name: String,
    pub url: String,
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}s {:>7} {} {}",
            self.elapsed.as_secs_f64(),
            self.bytes,
            self.file_name,
            self.url
        )
    }
}

impl FetchContext {
    pub fn new(
        client: Client,
        output_dir: PathBuf,
        sink: mpsc::Sender<String>,
        started: Instant,
    ) -> Self {
        Self {
            client,
            output_dir,
            sink,
            started,
        }
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    /// Sends exactly one line to the sink, success or not.
    pub async fn fetch_one(&self, url: String, index: usize) {
        let line = match self.try_fetch(&url, index).await {
            Ok(report) => {
                info!(url = %report.url, bytes = report.bytes, file = %report.file_name, "fetched");
                report.to_string()
            }
            Err(err) => {
                info!(%url, index, error = %err, "fetch failed");
                err.to_string()
            }
        };

        if self.sink.send(line).await.is_err() {
            debug!(%url, "result channel closed before send");
        }
    }

    async fn try_fetch(&self, url: &str, index: usize) -> Result<FetchReport, FetchError> {
        let start = Instant::now();
        debug!(url, index, since_run_start = ?start.duration_since(self.started), "request");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let name = file_name(index);
        let path = self.output_dir.join(&name);
        let mut file = match File::create(&path).await {
            Ok(file) => file,
            Err(source) => return Err(FetchError::CreateFile { path, source }),
        };

        let bytes = copy_body(&mut response, url, &name, &mut file).await?;
        drop(response);
        drop(file);

        Ok(FetchReport {
            elapsed: start.elapsed(),
            bytes,
            file_name: name,
            url: url.to_string(),
        })
    }
}
