use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::net::errors::ChannelError;

const RECV_SIZE: usize = 4096;

/// Newline framing over a TCP stream. No JSON knowledge.
///
/// Received bytes accumulate in an internal buffer that persists across
/// calls, so a line that arrives split over several TCP segments is
/// reassembled correctly.
pub struct LineChannel {
    stream: TcpStream,
    buf: Vec<u8>,
    read_timeout: Option<Duration>,
}

impl LineChannel {
    /// Opens a stream socket, failing on refusal or after `timeout`.
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self, ChannelError> {
        match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(Self::from_stream(stream, Some(timeout))),
            Ok(Err(source)) => Err(ChannelError::Connect {
                addr: addr.to_string(),
                source,
            }),
            Err(_) => Err(ChannelError::ConnectTimeout {
                addr: addr.to_string(),
                timeout,
            }),
        }
    }

    /// Wraps an already-accepted stream. `read_timeout: None` blocks
    /// indefinitely, which is what the server side wants.
    pub fn from_stream(stream: TcpStream, read_timeout: Option<Duration>) -> Self {
        Self {
            stream,
            buf: Vec::new(),
            read_timeout,
        }
    }

    pub fn peer_addr(&self) -> std::io::Result<SocketAddr> {
        self.stream.peer_addr()
    }

    /// Reads until a newline is buffered and returns the line without it.
    ///
    /// `Ok(None)` means the peer closed cleanly with no complete line
    /// pending; transport faults (reset, broken pipe, timeout) are errors.
    pub async fn read_line(&mut self) -> Result<Option<String>, ChannelError> {
        loop {
            if let Some(idx) = self.buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.buf.drain(..=idx).collect();
                let mut end = line.len() - 1;
                if end > 0 && line[end - 1] == b'\r' {
                    end -= 1;
                }
                return Ok(Some(String::from_utf8_lossy(&line[..end]).into_owned()));
            }

            let mut chunk = [0u8; RECV_SIZE];
            let n = match self.read_timeout {
                Some(timeout) => {
                    match tokio::time::timeout(timeout, self.stream.read(&mut chunk)).await {
                        Ok(result) => result?,
                        Err(_) => return Err(ChannelError::ReadTimeout(timeout)),
                    }
                }
                None => self.stream.read(&mut chunk).await?,
            };
            if n == 0 {
                return Ok(None);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Writes `text` plus `\n` as one combined buffer, never as separate
    /// writes, so the peer cannot observe a partial line boundary.
    pub async fn write_line(&mut self, text: &str) -> Result<(), ChannelError> {
        let mut frame = Vec::with_capacity(text.len() + 1);
        frame.extend_from_slice(text.as_bytes());
        frame.push(b'\n');
        self.stream.write_all(&frame).await?;
        Ok(())
    }
}
