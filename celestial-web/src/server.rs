//! Static file server for the theme demo page
//!
//! Serves `demo/` on port 8080 for manual visual checks of the starfield,
//! form styling and constellation view. Build the wasm bundle first:
//!
//! ```text
//! wasm-pack build celestial-web --target web --out-dir demo/pkg
//! ```

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};

const ADDR: &str = "127.0.0.1:8080";
const ROOT: &str = "demo";

fn main() {
    let listener = match TcpListener::bind(ADDR) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", ADDR, e);
            std::process::exit(1);
        }
    };

    println!("Celestial demo running at http://{}", ADDR);
    println!("Serving from {}/ directory", ROOT);
    println!("Press Ctrl+C to stop\n");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => handle_client(stream),
            Err(e) => eprintln!("Connection error: {}", e),
        }
    }
}

/// Map a request path onto a file below `root`, rejecting anything that escapes it.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() { "index.html" } else { relative };

    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if resolved.is_dir() {
        resolved.push("index.html");
    }
    Some(resolved)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

fn handle_client(mut stream: TcpStream) {
    let buf_reader = BufReader::new(&mut stream);
    let request_line = match buf_reader.lines().next() {
        Some(Ok(line)) => line,
        _ => {
            eprintln!("Failed to read request line");
            return;
        }
    };

    let full_path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let path = full_path.split_once('?').map_or(full_path, |(p, _)| p);

    let found = resolve(Path::new(ROOT), path)
        .and_then(|file| fs::read(&file).ok().map(|contents| (contents, content_type(&file))));

    let (status, contents, kind) = match found {
        Some((contents, kind)) => ("200 OK", contents, kind),
        None => {
            eprintln!("Not found: {}", path);
            (
                "404 NOT FOUND",
                b"<!DOCTYPE html><html><body><h1>Not found</h1></body></html>".to_vec(),
                "text/html; charset=utf-8",
            )
        }
    };

    let headers = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        status,
        kind,
        contents.len()
    );

    if let Err(e) = stream.write_all(headers.as_bytes()) {
        eprintln!("Failed to write headers: {}", e);
        return;
    }
    if let Err(e) = stream.write_all(&contents) {
        eprintln!("Failed to write file contents: {}", e);
    }
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        assert_eq!(resolve(Path::new("demo"), "/../Cargo.toml"), None);
        assert_eq!(resolve(Path::new("demo"), "/pkg/../../secret"), None);
    }

    #[test]
    fn test_resolve_root_and_files() {
        assert_eq!(
            resolve(Path::new("no-such-root"), "/"),
            Some(PathBuf::from("no-such-root/index.html"))
        );
        assert_eq!(
            resolve(Path::new("no-such-root"), "/pkg/celestial_web.js"),
            Some(PathBuf::from("no-such-root/pkg/celestial_web.js"))
        );
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("a.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("a.css")), "text/css");
        assert_eq!(content_type(Path::new("noext")), "application/octet-stream");
    }
}
