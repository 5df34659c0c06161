// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Newline delimited JSON. Each frame is one compact JSON document followed by `\n`.
//! Compact `serde_json` output never contains a raw newline, so no escaping is needed.

use crate::{Buffer, json_serde, ok};
use miette::IntoDiagnostic;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt,
                BufReader, BufWriter};

pub mod protocol_constants {
    pub const FRAME_DELIMITER: u8 = b'\n';
    pub const MAX_FRAME_SIZE: u64 = 1_000_000;
}

/// One read from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// The bytes between two delimiters, delimiter (and a trailing `\r`) removed.
    Line(Buffer),
    /// A frame longer than [`protocol_constants::MAX_FRAME_SIZE`]. It was read and
    /// thrown away, up to and including its delimiter.
    Oversized(usize),
}

pub mod line_io {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    /// Serialize `data` and write it as one frame, then flush.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Serialization of the data fails
    /// - Writing to the buffer fails
    /// - Flushing the buffer fails
    pub async fn try_write<W: AsyncWrite + Unpin, T: Serialize>(
        buf_writer: &mut BufWriter<W>,
        data: &T,
    ) -> miette::Result<()> {
        let payload_buffer = json_serde::try_serialize(data)?;
        try_write_frame(buf_writer, &payload_buffer).await
    }

    /// Write already serialized bytes as one frame, then flush.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub async fn try_write_frame<W: AsyncWrite + Unpin>(
        buf_writer: &mut BufWriter<W>,
        payload_buffer: &[u8],
    ) -> miette::Result<()> {
        buf_writer
            .write_all(payload_buffer)
            .await
            .into_diagnostic()?;
        buf_writer
            .write_u8(protocol_constants::FRAME_DELIMITER)
            .await
            .into_diagnostic()?;
        buf_writer.flush().await.into_diagnostic()?;
        ok!()
    }

    /// Read the next frame. Returns [`None`] at end of stream. A final frame without a
    /// trailing delimiter is still returned.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the stream fails.
    pub async fn try_read_frame<R: AsyncRead + Unpin>(
        buf_reader: &mut BufReader<R>,
    ) -> miette::Result<Option<Frame>> {
        let mut acc = Buffer::new();

        // Read at most one byte past the limit, so an oversized frame is detectable.
        let bytes_read = (&mut *buf_reader)
            .take(protocol_constants::MAX_FRAME_SIZE + 1)
            .read_until(protocol_constants::FRAME_DELIMITER, &mut acc)
            .await
            .into_diagnostic()?;

        if bytes_read == 0 {
            return ok!(None);
        }

        let ends_with_delimiter = acc.last() == Some(&protocol_constants::FRAME_DELIMITER);
        let is_within_limit =
            u64::try_from(acc.len()).is_ok_and(|len| len <= protocol_constants::MAX_FRAME_SIZE);

        if ends_with_delimiter || is_within_limit {
            if ends_with_delimiter {
                acc.pop();
            }
            if acc.last() == Some(&b'\r') {
                acc.pop();
            }
            return ok!(Some(Frame::Line(acc)));
        }

        // Oversized. Discard the rest of this frame.
        let mut skipped = acc.len();
        loop {
            let chunk = buf_reader.fill_buf().await.into_diagnostic()?;
            if chunk.is_empty() {
                break;
            }
            match chunk
                .iter()
                .position(|it| *it == protocol_constants::FRAME_DELIMITER)
            {
                Some(index) => {
                    buf_reader.consume(index + 1);
                    skipped += index + 1;
                    break;
                }
                None => {
                    let len = chunk.len();
                    buf_reader.consume(len);
                    skipped += len;
                }
            }
        }

        ok!(Some(Frame::Oversized(skipped)))
    }
}
