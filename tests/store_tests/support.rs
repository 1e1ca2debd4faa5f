//! Shared test support: stub snapshot servers and a silent host context

use std::net::TcpListener;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gdtlink::protocol::encode_snapshot;
use gdtlink::transport::{read_frame, write_frame};
use gdtlink::{Config, HostContext, LogLevel, Result, Snapshot};

/// Host context for tests: no sleeps, logs recorded in memory
#[derive(Default)]
pub struct TestContext {
    pub logs: Mutex<Vec<(LogLevel, String)>>,
}

impl HostContext for TestContext {
    fn configure(&self, _interface: Option<&str>, _address: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.logs.lock().unwrap().push((level, message.to_string()));
    }

    fn delay(&self, _duration: Duration) {}
}

impl TestContext {
    pub fn has_level(&self, level: LogLevel) -> bool {
        self.logs.lock().unwrap().iter().any(|(l, _)| *l == level)
    }
}

/// Spawn a stub DUT that serves scripted interactions in order
///
/// Each entry is one accepted connection: the stub reads one framed request
/// and, when the entry holds a snapshot, answers with its encoded frame.
/// Returns the port and a handle yielding the raw requests received.
pub fn spawn_script_server(script: Vec<Option<Snapshot>>) -> (u16, JoinHandle<Vec<Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for response in script {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_frame(&mut stream, 1024, || {}).unwrap();
            requests.push(request);
            if let Some(snapshot) = response {
                write_frame(&mut stream, &encode_snapshot(&snapshot)).unwrap();
            }
        }
        requests
    });

    (port, handle)
}

/// Config pointing at a stub server, caching into `cache_dir`
pub fn test_config(port: u16, cache_dir: &std::path::Path) -> Config {
    Config::builder()
        .host("127.0.0.1")
        .port(port)
        .interface("eth-test")
        .cache_dir(cache_dir)
        .pacing_delay(Duration::from_millis(1))
        .build()
}
