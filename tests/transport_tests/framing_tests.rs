//! Tests for length-prefixed framing
//!
//! These tests verify:
//! - The ASCII length + space + payload wire layout
//! - Chunked, paced reassembly of declared payload lengths
//! - Header parse failures surface as IO errors
//! - Connection failures surface as connection errors

use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use gdtlink::transport::{read_frame, write_frame, TransportChannel};
use gdtlink::{Config, GdtError, StdContext};

// =============================================================================
// Helper Functions
// =============================================================================

fn framed(payload: &[u8]) -> Vec<u8> {
    let mut frame = payload.len().to_string().into_bytes();
    frame.push(b' ');
    frame.extend_from_slice(payload);
    frame
}

// =============================================================================
// Wire Layout Tests
// =============================================================================

#[test]
fn write_frame_prefixes_ascii_length_and_space() {
    let mut buffer = Vec::new();
    write_frame(&mut buffer, b"hello").unwrap();
    assert_eq!(buffer, b"5 hello");
}

#[test]
fn write_frame_handles_empty_payload() {
    let mut buffer = Vec::new();
    write_frame(&mut buffer, b"").unwrap();
    assert_eq!(buffer, b"0 ");
}

#[test]
fn frame_round_trips_through_memory() {
    let payload: Vec<u8> = (0..=255).cycle().take(3000).map(|b| b as u8).collect();

    let mut buffer = Vec::new();
    write_frame(&mut buffer, &payload).unwrap();

    let mut cursor = Cursor::new(buffer);
    let read_back = read_frame(&mut cursor, 1024, || {}).unwrap();
    assert_eq!(read_back, payload);
}

// =============================================================================
// Chunked Reassembly Tests
// =============================================================================

#[test]
fn declared_2050_bytes_reassemble_exactly() {
    // Two full 1024-byte blocks plus a 2-byte remainder.
    let payload: Vec<u8> = (0..2050u32).map(|i| (i % 251) as u8).collect();

    let mut cursor = Cursor::new(framed(&payload));
    let mut paces = 0;
    let read_back = read_frame(&mut cursor, 1024, || paces += 1).unwrap();

    assert_eq!(read_back.len(), 2050);
    assert_eq!(read_back, payload);
    assert_eq!(paces, 2); // one pacing sleep per full block, no remainder left
}

#[test]
fn payload_smaller_than_one_block_paces_once_before_the_remainder() {
    let payload = b"just a small snapshot".to_vec();

    let mut cursor = Cursor::new(framed(&payload));
    let mut paces = 0;
    let read_back = read_frame(&mut cursor, 1024, || paces += 1).unwrap();

    assert_eq!(read_back, payload);
    assert_eq!(paces, 1);
}

#[test]
fn exact_block_multiple_round_trips() {
    // The leftover header bytes shift the block boundary, so this still
    // splits into one full block plus a remainder.
    let payload = vec![0x5Au8; 2048];

    let mut cursor = Cursor::new(framed(&payload));
    let mut paces = 0;
    let read_back = read_frame(&mut cursor, 1024, || paces += 1).unwrap();
    assert_eq!(read_back, payload);
    assert_eq!(paces, 2);
}

// =============================================================================
// Header Error Tests
// =============================================================================

#[test]
fn header_without_separator_is_io_error() {
    let mut cursor = Cursor::new(b"1234567890".to_vec());
    let result = read_frame(&mut cursor, 1024, || {});
    assert!(matches!(result, Err(GdtError::Io(_))));
}

#[test]
fn non_decimal_length_prefix_is_io_error() {
    let mut cursor = Cursor::new(b"xx 1234567890".to_vec());
    let result = read_frame(&mut cursor, 1024, || {});
    assert!(matches!(result, Err(GdtError::Io(_))));
}

#[test]
fn short_stream_is_io_error() {
    // Declared length larger than what the peer ever sends.
    let mut cursor = Cursor::new(b"100 only-a-few-bytes".to_vec());
    let result = read_frame(&mut cursor, 1024, || {});
    assert!(matches!(result, Err(GdtError::Io(_))));
}

// =============================================================================
// Live Channel Tests
// =============================================================================

#[test]
fn channel_exchanges_a_2050_byte_frame_with_a_stub_server() {
    let payload: Vec<u8> = (0..2050u32).map(|i| (i % 247) as u8).collect();
    let server_payload = payload.clone();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_frame(&mut stream, 1024, || {}).unwrap();
        let mut response = server_payload.len().to_string().into_bytes();
        response.push(b' ');
        response.extend_from_slice(&server_payload);
        stream.write_all(&response).unwrap();
        request
    });

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .pacing_delay(Duration::from_millis(1))
        .build();

    let mut channel = TransportChannel::open(&config).unwrap();
    channel.send_framed(b"fetch-all").unwrap();
    let received = channel.receive_framed(&StdContext).unwrap();

    assert_eq!(received, payload);
    assert_eq!(handle.join().unwrap(), b"fetch-all");
}

#[test]
fn refused_connection_is_connection_error() {
    // Bind then drop so the port is very likely unoccupied.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = Config::builder().host("127.0.0.1").port(port).build();
    let result = TransportChannel::open(&config);
    assert!(matches!(result, Err(GdtError::Connection(_))));
}

#[test]
fn peer_closing_mid_payload_is_io_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 16];
        let _ = stream.read(&mut request);
        // Declare 500 bytes, deliver far fewer, then close.
        stream.write_all(b"500 short").unwrap();
    });

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .pacing_delay(Duration::from_millis(1))
        .build();

    let mut channel = TransportChannel::open(&config).unwrap();
    channel.send_framed(b"fetch-all").unwrap();
    let result = channel.receive_framed(&StdContext);

    assert!(matches!(result, Err(GdtError::Io(_))));
    handle.join().unwrap();
}
