use reqwest::Response;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::FetchError;

/// Streams the response body into `out` chunk by chunk and returns the number
/// of bytes written. `target` names the destination in write errors.
pub async fn copy_body<W>(
    response: &mut Response,
    url: &str,
    target: &str,
    out: &mut W,
) -> Result<u64, FetchError>
where
    W: AsyncWrite + Unpin,
{
    let mut written: u64 = 0;
    loop {
        let chunk = response
            .chunk()
            .await
            .map_err(|source| FetchError::Read {
                url: url.to_string(),
                source,
            })?;
        let Some(chunk) = chunk else { break };

        out.write_all(&chunk)
            .await
            .map_err(|source| FetchError::Write {
                url: url.to_string(),
                target: target.to_string(),
                source,
            })?;
        written += chunk.len() as u64;
    }

    out.flush().await.map_err(|source| FetchError::Write {
        url: url.to_string(),
        target: target.to_string(),
        source,
    })?;

    Ok(written)
}
