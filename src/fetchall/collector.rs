use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::warn;

/// Prints result lines to `out` as they arrive until `expected` lines have
/// been received. Returns how many were received, which is less than
/// `expected` only if every sender went away first.
pub async fn collect<W: AsyncWrite + Unpin>(
    rx: &mut mpsc::Receiver<String>,
    expected: usize,
    out: &mut W,
) -> io::Result<usize> {
    let mut received = 0;
    while received < expected {
        match rx.recv().await {
            Some(line) => {
                out.write_all(format!("{}\n", line).as_bytes()).await?;
                out.flush().await?;
                received += 1;
            }
            None => {
                warn!(expected, received, "result channel closed early");
                break;
            }
        }
    }
    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_prints_in_arrival_order() {
        let (tx, mut rx) = mpsc::channel(1);
        tokio::spawn(async move {
            for line in ["third", "first", "second"] {
                tx.send(line.to_string()).await.unwrap();
            }
        });

        let mut out = Vec::new();
        let received = collect(&mut rx, 3, &mut out).await.unwrap();

        assert_eq!(received, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "third\nfirst\nsecond\n");
    }

    #[tokio::test]
    async fn test_collect_stops_at_expected() {
        let (tx, mut rx) = mpsc::channel(4);
        for i in 0..4 {
            tx.send(format!("line{}", i)).await.unwrap();
        }

        let mut out = Vec::new();
        let received = collect(&mut rx, 2, &mut out).await.unwrap();

        assert_eq!(received, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "line0\nline1\n");
        // Sender still alive: the remaining lines are left in the channel.
        assert_eq!(rx.recv().await.unwrap(), "line2");
        drop(tx);
    }

    #[tokio::test]
    async fn test_collect_closed_early() {
        let (tx, mut rx) = mpsc::channel(1);
        tokio::spawn(async move {
            tx.send("only".to_string()).await.unwrap();
        });

        let mut out = Vec::new();
        let received = collect(&mut rx, 3, &mut out).await.unwrap();

        assert_eq!(received, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "only\n");
    }

    #[tokio::test]
    async fn test_collect_nothing_expected() {
        let (_tx, mut rx) = mpsc::channel::<String>(1);

        let mut out = Vec::new();
        let received = collect(&mut rx, 0, &mut out).await.unwrap();

        assert_eq!(received, 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_collect_streams_each_line_to_async_writer() {
        use tokio::io::AsyncReadExt;

        let (tx, mut rx) = mpsc::channel(1);
        let (mut writer, mut reader) = tokio::io::duplex(64);
        let collector = tokio::spawn(async move { collect(&mut rx, 2, &mut writer).await });

        tx.send("first".to_string()).await.unwrap();
        let mut buf = [0u8; 6];
        reader.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"first\n");

        // The first line is out before the second result exists.
        tx.send("second".to_string()).await.unwrap();
        let mut buf = [0u8; 7];
        reader.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"second\n");

        assert_eq!(collector.await.unwrap().unwrap(), 2);
    }
}
