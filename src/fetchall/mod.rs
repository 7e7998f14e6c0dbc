mod collector;
mod task;

use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use reqwest::Client;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::error;

use crate::fetch::normalize_url;
use crate::utils::task_group::TaskGroup;

pub use collector::collect;
pub use task::{FetchContext, FetchReport, file_name};

#[derive(Debug, Clone)]
pub struct FetchAllConfig {
    pub output_dir: PathBuf,
    pub max_concurrent: Option<NonZeroUsize>,
}

impl Default for FetchAllConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            max_concurrent: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub launched: usize,
    pub received: usize,
}

/// Fetch failures come out as result lines; only a failed write to `out` is an `Err`.
pub async fn fetch_all<W: AsyncWrite + Unpin>(
    client: Client,
    urls: &[String],
    config: &FetchAllConfig,
    out: &mut W,
) -> io::Result<Summary> {
    let (tx, mut rx) = mpsc::channel(1);
    let ctx = FetchContext::new(client, config.output_dir.clone(), tx, Instant::now());

    let mut group = TaskGroup::new(config.max_concurrent);
    for (i, raw) in urls.iter().enumerate() {
        let ctx = ctx.clone();
        let url = normalize_url(raw);
        group.spawn(async move { ctx.fetch_one(url, i + 1).await });
    }
    let started = ctx.started();
    // Only the tasks hold senders now, so the channel closes if they all die.
    drop(ctx);

    let launched = group.len();
    let received = collect(&mut rx, launched, out).await?;

    for (i, result) in group.join().await.into_iter().enumerate() {
        if let Err(err) = result {
            error!(url = %urls[i], index = i + 1, %err, "fetch task did not finish");
        }
    }

    let elapsed = format!("{:.2}s elapsed\n", started.elapsed().as_secs_f64());
    out.write_all(elapsed.as_bytes()).await?;
    out.flush().await?;

    Ok(Summary { launched, received })
}
