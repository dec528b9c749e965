//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every request with one canned response, then closes the
//! connection.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: Vec<u8>,
    /// Advertise a longer Content-Length than the body actually sent,
    /// so the client sees the connection drop mid-stream.
    pub truncate: bool,
}

impl Reply {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            body,
            truncate: false,
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            body: b"nope".to_vec(),
            truncate: false,
        }
    }

    pub fn truncated(body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            body,
            truncate: true,
        }
    }
}

/// Starts a server in a background thread. Returns a URL for `/image.jpg`.
/// The server runs until the process exits.
pub fn start(reply: Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let reply = Arc::new(reply);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let reply = Arc::clone(&reply);
            thread::spawn(move || handle(stream, &reply));
        }
    });
    format!("http://127.0.0.1:{}/image.jpg", port)
}

/// A URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/image.jpg", port)
}

fn handle(mut stream: TcpStream, reply: &Reply) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let advertised = if reply.truncate {
        reply.body.len() * 2 + 1
    } else {
        reply.body.len()
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status, advertised
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
    let _ = stream.flush();
}
