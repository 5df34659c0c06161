// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Buffer, Frame, InboundMessage, OutboundMessage, StdMutex, TransportError,
            json_serde, line_io};
use miette::IntoDiagnostic;
use std::{sync::Arc, time::Duration};
use strum_macros::Display;
use tokio::{io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter},
            net::{TcpStream, ToSocketAddrs},
            sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
            task::JoinHandle};

pub type InboundSender = UnboundedSender<InboundMessage>;
pub type InboundReceiver = UnboundedReceiver<InboundMessage>;

pub type SafeReadyState = Arc<StdMutex<ReadyState>>;

/// Connection state, with the same four phases a browser socket goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReadyState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// How long the binary waits for the peer before it runs disconnected.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// The outbound half of the bridge to the peer. Inbound messages arrive separately, on
/// the [`InboundReceiver`] handed out when the transport is created.
pub trait Transport {
    fn ready_state(&self) -> ReadyState;

    /// Queue a message for the peer. This does not wait for the bytes to hit the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is not [`ReadyState::Open`], the message can't
    /// be serialized, or the writer task is gone.
    fn send(&mut self, message: &OutboundMessage) -> Result<(), TransportError>;
}

/// Newline delimited JSON over any byte stream, usually a [`TcpStream`].
///
/// There is one writer task, which drains an unbounded channel of encoded frames, and
/// one reader task, which decodes frames into [`InboundMessage`]s. Either task moves the
/// state to [`ReadyState::Closed`] when its half of the stream ends or fails.
#[derive(Debug)]
pub struct ChannelTransport {
    ready_state: SafeReadyState,
    outbound_sender: Option<UnboundedSender<Buffer>>,
    reader_task: Option<JoinHandle<()>>,
}

impl ChannelTransport {
    /// Start the reader and writer tasks on an already connected stream.
    pub fn spawn<R, W>(read_half: R, write_half: W) -> (Self, InboundReceiver)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let ready_state: SafeReadyState = Arc::new(StdMutex::new(ReadyState::Open));
        let (outbound_sender, outbound_receiver) = unbounded_channel::<Buffer>();
        let (inbound_sender, inbound_receiver) = unbounded_channel::<InboundMessage>();

        tokio::spawn(run_writer_task(
            write_half,
            outbound_receiver,
            ready_state.clone(),
        ));
        let reader_task = tokio::spawn(run_reader_task(
            read_half,
            inbound_sender,
            ready_state.clone(),
        ));

        (
            Self {
                ready_state,
                outbound_sender: Some(outbound_sender),
                reader_task: Some(reader_task),
            },
            inbound_receiver,
        )
    }

    /// Connect over TCP, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection can't be made, or isn't made in time.
    pub async fn try_connect(
        addr: impl ToSocketAddrs,
        timeout: Duration,
    ) -> miette::Result<(Self, InboundReceiver)> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| miette::miette!("connect timed out after {timeout:?}"))?
            .into_diagnostic()?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self::spawn(read_half, write_half))
    }

    /// A transport that is, and stays, [`ReadyState::Closed`]. Committed lines are
    /// dropped and nothing ever arrives.
    #[must_use]
    pub fn disconnected() -> (Self, InboundReceiver) {
        let (_inbound_sender, inbound_receiver) = unbounded_channel::<InboundMessage>();
        (
            Self {
                ready_state: Arc::new(StdMutex::new(ReadyState::Closed)),
                outbound_sender: None,
                reader_task: None,
            },
            inbound_receiver,
        )
    }
}

impl Transport for ChannelTransport {
    fn ready_state(&self) -> ReadyState { read_state(&self.ready_state) }

    fn send(&mut self, message: &OutboundMessage) -> Result<(), TransportError> {
        let state = self.ready_state();
        if state != ReadyState::Open {
            return Err(TransportError::NotOpen(state));
        }

        let payload_buffer = json_serde::try_serialize(message)
            .map_err(|report| TransportError::Serialize(report.to_string()))?;

        let Some(sender) = &self.outbound_sender else {
            return Err(TransportError::ChannelClosed);
        };
        sender
            .send(payload_buffer)
            .map_err(|_| TransportError::ChannelClosed)
    }
}

impl Drop for ChannelTransport {
    fn drop(&mut self) {
        // Closing the channel lets the writer task flush and shut down on its own.
        self.outbound_sender = None;
        if let Some(reader_task) = self.reader_task.take() {
            reader_task.abort();
        }
    }
}

fn read_state(ready_state: &SafeReadyState) -> ReadyState {
    ready_state
        .lock()
        .map_or(ReadyState::Closed, |guard| *guard)
}

fn set_state(ready_state: &SafeReadyState, new_state: ReadyState) {
    if let Ok(mut guard) = ready_state.lock() {
        tracing::debug!(message = "transport state", from = %*guard, to = %new_state);
        *guard = new_state;
    }
}

async fn run_writer_task<W: AsyncWrite + Unpin>(
    write_half: W,
    mut outbound_receiver: UnboundedReceiver<Buffer>,
    ready_state: SafeReadyState,
) {
    let mut buf_writer = BufWriter::new(write_half);

    while let Some(payload_buffer) = outbound_receiver.recv().await {
        if let Err(report) = line_io::try_write_frame(&mut buf_writer, &payload_buffer).await
        {
            tracing::warn!(message = "could not write to peer", error = %report);
            set_state(&ready_state, ReadyState::Closed);
            return;
        }
    }

    set_state(&ready_state, ReadyState::Closing);
    if let Err(err) = buf_writer.shutdown().await {
        tracing::debug!(message = "shutdown of write half failed", error = %err);
    }
    set_state(&ready_state, ReadyState::Closed);
}

async fn run_reader_task<R: AsyncRead + Unpin>(
    read_half: R,
    inbound_sender: InboundSender,
    ready_state: SafeReadyState,
) {
    let mut buf_reader = BufReader::new(read_half);

    loop {
        match line_io::try_read_frame(&mut buf_reader).await {
            Ok(Some(Frame::Line(payload_buffer))) => {
                if payload_buffer.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                match json_serde::try_deserialize::<InboundMessage>(&payload_buffer) {
                    Ok(message) => {
                        if inbound_sender.send(message).is_err() {
                            // Nobody is listening anymore.
                            return;
                        }
                    }
                    Err(report) => {
                        tracing::warn!(
                            message = "dropping malformed inbound message",
                            error = %report,
                            payload = %String::from_utf8_lossy(&payload_buffer),
                        );
                    }
                }
            }
            Ok(Some(Frame::Oversized(size))) => {
                tracing::warn!(message = "dropping oversized inbound frame", size);
            }
            Ok(None) => {
                tracing::debug!(message = "peer closed the connection");
                break;
            }
            Err(report) => {
                tracing::warn!(message = "could not read from peer", error = %report);
                break;
            }
        }
    }

    set_state(&ready_state, ReadyState::Closed);
}
