//! Live capture of the tag topic.

use std::io::{self, Write};
use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Outgoing, Packet, QoS};
use tagflow_core::{ListenerConfig, CONNECTION_ACCEPTED, POSITIONING_PREFIX, SUBSCRIBED};
use tracing::{debug, info};

use crate::cli::ListenArgs;
use crate::error::CliError;

const REQUEST_CAPACITY: usize = 10;
const DISCONNECT_GRACE: Duration = Duration::from_secs(1);

pub async fn run(args: &ListenArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let received = listen(&config, args.annotate, &mut out).await?;
    info!(received, "listener finished");
    Ok(())
}

/// Defaults, then the optional TOML file, then individual flags.
fn resolve_config(args: &ListenArgs) -> Result<ListenerConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => ListenerConfig::load(path)?,
        None => ListenerConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(topic) = &args.topic {
        config.topic = topic.clone();
    }
    if let Some(secs) = args.duration_secs {
        config.duration = Duration::from_secs(secs);
    }
    if let Some(client_id) = &args.client_id {
        config.client_id = client_id.clone();
    }

    Ok(config)
}

/// Print payloads published on `config.topic` until `config.duration` elapses.
///
/// Returns the number of payloads written.
pub async fn listen<W: Write>(
    config: &ListenerConfig,
    annotate: bool,
    out: &mut W,
) -> Result<usize, CliError> {
    let mut options = MqttOptions::new(config.client_id.as_str(), config.host.as_str(), config.port);
    options.set_keep_alive(config.keep_alive);

    let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
    client.subscribe(config.topic.as_str(), QoS::AtMostOnce).await?;
    info!(
        host = %config.host,
        port = config.port,
        topic = %config.topic,
        duration_secs = config.duration.as_secs(),
        "listening"
    );

    let deadline = tokio::time::sleep(config.duration);
    tokio::pin!(deadline);

    let mut received = 0usize;
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            event = eventloop.poll() => {
                if write_event(&event?, annotate, out)? {
                    received += 1;
                }
            }
        }
    }

    client.disconnect().await?;
    // the disconnect packet only leaves once the event loop is polled again
    let _ = tokio::time::timeout(DISCONNECT_GRACE, async {
        loop {
            match eventloop.poll().await {
                Ok(Event::Outgoing(Outgoing::Disconnect)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    })
    .await;

    Ok(received)
}

/// Write what an event contributes to the capture. `true` for a payload.
fn write_event<W: Write>(event: &Event, annotate: bool, out: &mut W) -> io::Result<bool> {
    match event {
        Event::Incoming(Packet::ConnAck(_)) => {
            debug!("connection accepted");
            if annotate {
                writeln!(out, "{CONNECTION_ACCEPTED}")?;
            }
            Ok(false)
        }
        Event::Incoming(Packet::SubAck(_)) => {
            debug!("subscription acknowledged");
            if annotate {
                writeln!(out, "{SUBSCRIBED}")?;
            }
            Ok(false)
        }
        Event::Incoming(Packet::Publish(publish)) => {
            let payload = String::from_utf8_lossy(&publish.payload);
            if annotate {
                write!(out, "{POSITIONING_PREFIX}")?;
            }
            writeln!(out, "{payload}")?;
            out.flush()?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
