//! Transport channel
//!
//! One framed request/response exchange over one TCP connection. The DUT's
//! debug interface has no end-of-message delimiter, so every message is
//! prefixed with its own ASCII decimal byte length and a single space.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::context::HostContext;
use crate::error::{GdtError, Result};

/// Fixed header region read before parsing the declared length
///
/// Inherited from the protocol's reference client: the length digits plus
/// the space separator must fit in this region, so declared lengths above
/// 999999 bytes are unrepresentable. The real device limit is unconfirmed;
/// widen only against the protocol definition.
pub const HEADER_LEN: usize = 7;

/// A one-shot framed exchange with the DUT
///
/// Opened per call, never reused. The socket is released on every exit path
/// when the channel drops.
pub struct TransportChannel {
    stream: TcpStream,
    block_len: usize,
    pacing_delay: Duration,
    peer: String,
}

impl TransportChannel {
    /// Connect to the DUT debug interface
    pub fn open(config: &Config) -> Result<Self> {
        let peer = format!("{}:{}", config.host, config.port);

        let addr = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| GdtError::Connection(format!("{peer}: {e}")))?
            .next()
            .ok_or_else(|| GdtError::Connection(format!("{peer}: no usable address")))?;

        let stream = TcpStream::connect_timeout(&addr, config.connect_timeout)
            .map_err(|e| GdtError::Connection(format!("{peer}: {e}")))?;

        stream.set_write_timeout(Some(config.send_timeout))?;
        // No read timeout: a receive stalled mid-block blocks until the peer
        // closes. Known gap in the protocol's reference client, kept as-is.

        tracing::debug!(peer = %peer, "connected to DUT");

        Ok(Self {
            stream,
            block_len: config.block_len,
            pacing_delay: config.pacing_delay,
            peer,
        })
    }

    /// Send one framed message as a single logical write
    pub fn send_framed(&mut self, payload: &[u8]) -> Result<()> {
        tracing::trace!(peer = %self.peer, len = payload.len(), "sending framed message");
        write_frame(&mut self.stream, payload)
    }

    /// Receive one framed message, consuming the channel
    ///
    /// Payloads are read in `block_len` chunks with the pacing delay between
    /// reads so the DUT's send buffer is not overrun. Consuming `self`
    /// enforces the single-exchange-per-socket contract.
    pub fn receive_framed(mut self, ctx: &dyn HostContext) -> Result<Vec<u8>> {
        let pacing = self.pacing_delay;
        let payload = read_frame(&mut self.stream, self.block_len, || ctx.delay(pacing))?;
        tracing::debug!(peer = %self.peer, len = payload.len(), "received framed message");
        Ok(payload)
    }
}

// =============================================================================
// Stream-based Framing Helpers
// =============================================================================

/// Write `payload` with its length prefix as one buffered write
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let mut frame = Vec::with_capacity(payload.len() + 12);
    frame.extend_from_slice(payload.len().to_string().as_bytes());
    frame.push(b' ');
    frame.extend_from_slice(payload);

    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Read one framed payload, pacing between block reads
///
/// Reads the fixed [`HEADER_LEN`] header region, parses the digits up to the
/// first space as the declared payload length, then reads full blocks plus a
/// final remainder read. `pace` runs after every full block and once more
/// before the remainder read, so the device is never hit with back-to-back
/// reads. Header bytes past the separator already belong to the payload and
/// are kept. Returns exactly the declared byte count.
pub fn read_frame<R: Read>(
    reader: &mut R,
    block_len: usize,
    mut pace: impl FnMut(),
) -> Result<Vec<u8>> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header)?;

    let sep = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| header_error("no length separator in frame header"))?;
    let declared: usize = std::str::from_utf8(&header[..sep])
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| header_error("unparseable length prefix in frame header"))?;

    let mut payload = Vec::with_capacity(declared);
    payload.extend_from_slice(&header[sep + 1..]);

    let remaining = declared.saturating_sub(payload.len());
    let full_blocks = remaining / block_len;
    let remainder = remaining % block_len;
    tracing::debug!(declared, full_blocks, remainder, "reading framed payload");

    let mut block = vec![0u8; block_len];
    for _ in 0..full_blocks {
        reader.read_exact(&mut block)?;
        payload.extend_from_slice(&block);
        pace();
    }
    if remainder > 0 {
        pace();
        reader.read_exact(&mut block[..remainder])?;
        payload.extend_from_slice(&block[..remainder]);
    }

    Ok(payload)
}

fn header_error(message: &str) -> GdtError {
    GdtError::Io(io::Error::new(io::ErrorKind::InvalidData, message))
}
