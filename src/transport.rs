// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Byte-stream endpoints and a minimal HTTP/1.1 GET client over them
//!
//! An [`Endpoint`] is either a network `host:port` or a local Unix socket
//! path. The HTTP layer does not care which: the request line and `Host`
//! header are identical, only connection establishment differs. This is what
//! lets the store inspector speak HTTP to snapd, whose socket path rather than
//! a hostname selects the destination.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{CheckError, Result};

/// Where a byte-stream connection is opened to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Network address in `host:port` form
    Tcp(String),
    /// Filesystem path of an `AF_UNIX` stream socket
    Unix(PathBuf),
}

impl Endpoint {
    /// Open a fresh connection; nothing is pooled or reused
    ///
    /// # Errors
    /// Returns the underlying connect error (missing path, refused, denied)
    pub fn connect(&self) -> io::Result<Stream> {
        debug!("connecting to {self}");
        match self {
            Self::Tcp(addr) => TcpStream::connect(addr.as_str()).map(Stream::Tcp),
            Self::Unix(path) => UnixStream::connect(path).map(Stream::Unix),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => f.write_str(addr),
            Self::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}

/// An open connection to an [`Endpoint`]
#[derive(Debug)]
pub enum Stream {
    Tcp(TcpStream),
    Unix(UnixStream),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(s) => s.read(buf),
            Self::Unix(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(s) => s.write(buf),
            Self::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(s) => s.flush(),
            Self::Unix(s) => s.flush(),
        }
    }
}

/// Status and decoded body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Body as UTF-8 text
    ///
    /// # Errors
    /// Returns a protocol error if the body is not valid UTF-8
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body)
            .map_err(|e| CheckError::Protocol(format!("body is not UTF-8: {e}")))
    }
}

/// Send `GET path` over an already open stream and read the full response
///
/// The request asks the peer to close the connection, so the response is
/// read until EOF and then framed by `Content-Length` or chunked encoding.
///
/// # Errors
/// Returns an I/O error if the stream fails, or a protocol error if the
/// response is not well-formed HTTP/1.x
pub fn get<S: Read + Write>(mut stream: S, host: &str, path: &str) -> Result<Response> {
    let request = format!(
        "GET {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: snapcheck/{}\r\n\
         Accept: application/json\r\n\
         Connection: close\r\n\
         \r\n",
        env!("CARGO_PKG_VERSION")
    );
    stream.write_all(request.as_bytes())?;
    stream.flush()?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw)?;
    parse_response(&raw)
}

/// Parse a complete raw HTTP/1.x response
///
/// # Errors
/// Returns a protocol error on a malformed status line, headers or framing
pub fn parse_response(raw: &[u8]) -> Result<Response> {
    let header_end = find(raw, b"\r\n\r\n")
        .ok_or_else(|| CheckError::Protocol("incomplete response headers".into()))?;
    let head = std::str::from_utf8(&raw[..header_end])
        .map_err(|_| CheckError::Protocol("response headers are not UTF-8".into()))?;
    let rest = &raw[header_end + 4..];

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default();
    let status = parse_status_line(status_line)?;
    debug!("received status {status}");

    let mut content_length = None;
    let mut chunked = false;
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| CheckError::Protocol(format!("malformed header: {line}")))?;
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            let len = value
                .parse::<usize>()
                .map_err(|_| CheckError::Protocol(format!("bad Content-Length: {value}")))?;
            content_length = Some(len);
        } else if name.eq_ignore_ascii_case("transfer-encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            chunked = true;
        }
    }

    let body = if chunked {
        decode_chunked(rest)?
    } else if let Some(len) = content_length {
        if rest.len() < len {
            return Err(CheckError::Protocol(format!(
                "body truncated: expected {len} bytes, got {}",
                rest.len()
            )));
        }
        rest[..len].to_vec()
    } else {
        rest.to_vec()
    };

    Ok(Response { status, body })
}

fn parse_status_line(line: &str) -> Result<u16> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/1.") {
        return Err(CheckError::Protocol(format!("bad status line: {line}")));
    }
    parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| CheckError::Protocol(format!("bad status line: {line}")))
}

fn decode_chunked(mut data: &[u8]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let line_end = find(data, b"\r\n")
            .ok_or_else(|| CheckError::Protocol("unterminated chunk size".into()))?;
        let size_line = std::str::from_utf8(&data[..line_end])
            .map_err(|_| CheckError::Protocol("chunk size is not UTF-8".into()))?;
        // Chunk extensions after ';' are ignored
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| CheckError::Protocol(format!("bad chunk size: {size_hex}")))?;
        data = &data[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        let end = size
            .checked_add(2)
            .filter(|&end| end <= data.len() && &data[size..end] == b"\r\n")
            .ok_or_else(|| CheckError::Protocol("truncated chunk".into()))?;
        body.extend_from_slice(&data[..size]);
        data = &data[end..];
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
