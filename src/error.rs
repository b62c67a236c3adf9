// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Failures of the upstream resolver and the store inspector
//!
//! Every variant collapses to "no version obtained" at the reporting layer;
//! the distinction only shapes the diagnostic line.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// Hosting API could not be reached (DNS, TLS, connect, timeout)
    #[error("Error fetching GitHub data: {0}")]
    Upstream(#[from] attohttpc::Error),

    /// A data source answered with a non-success status
    #[error("Error: {origin} returned status {code}")]
    Status { origin: &'static str, code: u16 },

    /// Nothing is listening on the daemon socket
    #[error("Error connecting to snapd socket {endpoint}: {source}")]
    DaemonUnreachable { endpoint: String, source: io::Error },

    /// Response over the socket was not valid HTTP/1.1
    #[error("Error reading snapd response: {0}")]
    Protocol(String),

    /// Socket read or write failed after connecting
    #[error("Error talking to snapd: {0}")]
    Io(#[from] io::Error),

    /// Body is not valid JSON
    #[error("Error parsing response: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parsed but not into the expected structure
    #[error("Error: unexpected response: {0}")]
    UnexpectedShape(String),

    /// Required field absent or empty
    #[error("Error: response has no {0}")]
    MissingField(&'static str),

    #[error("Error: snap {0} not found in store")]
    PackageNotFound(String),

    #[error("Error: channel {key} not present in store (available: {})", .available.join(", "))]
    ChannelNotFound { key: String, available: Vec<String> },
}

pub type Result<T> = std::result::Result<T, CheckError>;
