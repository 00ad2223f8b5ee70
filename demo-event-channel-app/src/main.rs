use futures::StreamExt;
use queuing_event_sink_channel::{DynamicChannelType, EventChannel};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct VolumeChange {
    level: f32,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let channel: EventChannel<VolumeChange> = EventChannel::new(DynamicChannelType::Unbounded);
    let sink = channel.sink();

    // Produced before anyone listens; replayed on `listen`
    sink.success(VolumeChange { level: 0.25 });
    sink.success(VolumeChange { level: 0.5 });
    tracing::info!(pending = sink.pending_len(), "Queued events before first listener");

    let mut receiver = channel.listen();

    let producer = tokio::spawn({
        let sink = sink.clone();
        async move {
            for step in 1..=3 {
                tokio::time::sleep(Duration::from_millis(50)).await;
                sink.success(VolumeChange {
                    level: 0.5 + step as f32 * 0.1,
                });
            }
            sink.error("MUTED", Some("output device muted"), None);
        }
    });

    for _ in 0..6 {
        match receiver.next().await {
            Some(Ok(change)) => tracing::info!(level = change.level, "Volume changed"),
            Some(Err(err)) => tracing::warn!(%err, "Volume listener received an error"),
            None => break,
        }
    }

    if let Err(err) = producer.await {
        tracing::error!(?err, "Producer task failed");
    }

    // Listener unsubscribes; later events wait for the next one
    channel.cancel();
    sink.success(VolumeChange { level: 1.0 });
    sink.end_of_stream();
    tracing::info!(
        pending = sink.pending_len(),
        closed = sink.is_closed(),
        "Listener cancelled"
    );

    let late_receiver = channel.listen();
    let late_items: Vec<_> = late_receiver.collect().await;
    tracing::info!(count = late_items.len(), "Late listener drained backlog");
}
