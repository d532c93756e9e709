// crates/presence-client/src/network.rs

use anyhow::{Context, Result};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use presence_core::{InputMessage, OutputMessage};
use presence_protocol::{decode_output, encode_input};
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Live WebSocket connection to the presence server.
///
/// Decoded server messages are forwarded to the channel given to
/// [`PresenceConnection::connect`]; the channel closes when the server
/// goes away.
pub struct PresenceConnection {
    sink: SplitSink<WsStream, Message>,
    reader: JoinHandle<()>,
}

impl PresenceConnection {
    pub async fn connect(url: &str, tx: UnboundedSender<OutputMessage>) -> Result<Self> {
        info!("Connecting to {}...", url);

        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to {}", url))?;
        info!("Connected successfully");

        let (sink, mut stream) = ws.split();

        let reader = tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => match decode_output(text.as_str()) {
                        Ok(msg) => {
                            if tx.send(msg).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Undecodable server frame: {}", e),
                    },
                    Ok(Message::Close(_)) => {
                        info!("Server closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Connection error: {}", e);
                        break;
                    }
                }
            }
            debug!("Reader finished");
        });

        Ok(Self { sink, reader })
    }

    pub async fn send(&mut self, msg: &InputMessage) -> Result<()> {
        let frame = encode_input(msg)?;
        self.sink.send(Message::Text(frame.into())).await?;
        Ok(())
    }

    /// Close the socket and wait for the reader to finish.
    pub async fn close(mut self) -> Result<()> {
        self.sink.close().await?;
        let _ = self.reader.await;
        Ok(())
    }
}
