use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a chart data API stand-in serving symbols, status, and data routes.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_api_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Spawn the test server or skip when socket permissions are unavailable.
///
/// # Errors
///
/// Returns an error if the server fails for reasons other than insufficient
/// socket permissions.
pub fn spawn_api_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_api_server() {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// A local URL nothing listens on.
///
/// # Errors
///
/// Returns an error if a test listener cannot be bound.
pub fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test listener failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("listener addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn route(path: &str) -> (&'static str, Vec<u8>) {
    if path.starts_with("/api/symbols") {
        return (
            "200 OK",
            br#"{"exchanges":{"coinbase":["BTC-USD","ETH-USD"],"kraken":["BTC-USD"]}}"#.to_vec(),
        );
    }
    if path.starts_with("/api/status") {
        return (
            "200 OK",
            br#"{"exchanges":[{"exchange":"coinbase","last_update":1700000000,"last_update_date":"2023-11-14"}],"cached":true}"#
                .to_vec(),
        );
    }
    if path.starts_with("/api/data") {
        if !path.contains("symbol=") || path.contains("start=2&end=1") {
            return ("400 Bad Request", b"bad request".to_vec());
        }
        let mut body =
            br#"{"columns":[{"name":"time","record_size":4,"num_records":4,"data_length":16}]}"#
                .to_vec();
        body.push(b'\n');
        body.extend_from_slice(&[0_u8; 16]);
        return ("200 OK", body);
    }
    ("404 Not Found", b"not found".to_vec())
}

fn handle_client(mut stream: TcpStream) {
    let mut buffer = [0u8; 2048];
    let Ok(read) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let (status, body) = route(path);
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    if stream.write_all(head.as_bytes()).is_err() || stream.write_all(&body).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `apibench` binary in `cwd` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_apibench<I, S>(cwd: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = apibench_bin()?;
    Command::new(bin)
        .current_dir(cwd)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run apibench failed: {}", err))
}

fn apibench_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_apibench").map_or_else(
        || Err("CARGO_BIN_EXE_apibench missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

#[must_use]
pub fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
