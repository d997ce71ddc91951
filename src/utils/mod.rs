//! utitlity module
use chrono::{DateTime, Local};
use std::future::Future;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{warn, Level};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Spawns `stream_producer` on `handle` and returns the receiving half of the
/// channel it writes into, plus the producer's task handle.
pub fn create_stream<T, F, Fut>(
    handle: &Handle,
    buffer_size: usize,
    stream_producer: F,
) -> (ReceiverStream<T>, JoinHandle<()>)
where
    T: Send + 'static,
    F: FnOnce(mpsc::Sender<T>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>(buffer_size);

    let task = handle.spawn(async move {
        stream_producer(tx).await;
    });
    (ReceiverStream::new(rx), task)
}

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct AbortOnDrop<T>(pub JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Parses an RFC 3339 instant into local time. Unparseable input falls back to now.
pub fn parse_timestamp(value: &str) -> DateTime<Local> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(instant) => instant.with_timezone(&Local),
        Err(err) => {
            warn!(value, error = %err, "Unparseable timestamp, using current time.");
            Local::now()
        }
    }
}

/// Installs the global subscriber for the command line: `RUST_LOG` wins,
/// otherwise `level`. Spans are drawn as progress spinners on stderr.
pub fn init_cli_logger(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let indicatif_layer = IndicatifLayer::new();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer())
                .compact(),
        )
        .with(indicatif_layer)
        .try_init();
}

///Intialize a logger for my tests.
/// # Arguements:
/// * level :This is the log level.
pub fn test_logger_init(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into()) // default = warn
        .from_env_lossy(); // respects RUST_LOG if user set it

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(true) // colors in terminal
                .with_target(false) // cleaner output
                .with_file(false)
                .with_line_number(false)
                .with_test_writer()
                .compact(),
        ) // one-line format, perfect for CLIs
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Utc};
    use futures::StreamExt;

    #[test]
    fn parses_rfc3339_and_falls_back_to_now() {
        let parsed = parse_timestamp("2024-03-01T10:00:00Z");
        assert_eq!(parsed.with_timezone(&Utc).year(), 2024);

        let before = Local::now();
        let fallback = parse_timestamp("yesterday-ish");
        assert!(fallback >= before);
    }

    #[tokio::test]
    async fn created_stream_yields_everything_the_producer_sends() {
        let (stream, task) = create_stream(&Handle::current(), 2, |tx| async move {
            for i in 0..5 {
                if tx.send(i).await.is_err() {
                    break;
                }
            }
        });
        let items: Vec<i32> = stream.collect().await;
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
        assert!(task.await.is_ok());
    }
}
