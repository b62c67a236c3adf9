// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Store inspector: the version snapd reports as published
//!
//! Queries the snapd REST API over its Unix socket with a `find` request and
//! picks the version of one channel out of the matching snap entry.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::channel::Channel;
use crate::error::{CheckError, Result};
use crate::settings::Settings;
use crate::transport::{self, Endpoint};

/// Placeholder `Host` header; the socket path selects the daemon
const SNAPD_HOST: &str = "localhost";

/// Envelope of every snapd API response
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    result: serde_json::Value,
}

/// One search hit of `/v2/find`
#[derive(Deserialize)]
struct StoreSnap {
    #[serde(default)]
    name: String,
    #[serde(default)]
    channels: BTreeMap<String, ChannelInfo>,
}

#[derive(Deserialize)]
struct ChannelInfo {
    #[serde(default)]
    version: String,
}

/// Fetch the published version of the configured snap on `channel`
///
/// # Errors
/// Returns error if the daemon is unreachable, answers with a status other
/// than 200, returns malformed JSON, or does not list the snap or channel
pub fn fetch_version(settings: &Settings, channel: Channel) -> Result<String> {
    let endpoint = Endpoint::Unix(settings.socket_path.clone());
    let stream = endpoint
        .connect()
        .map_err(|source| CheckError::DaemonUnreachable {
            endpoint: endpoint.to_string(),
            source,
        })?;

    let path = settings.find_path();
    debug!("GET {path} via {endpoint}");
    let resp = transport::get(stream, SNAPD_HOST, &path)?;

    if resp.status != 200 {
        return Err(CheckError::Status {
            origin: "snapd API",
            code: resp.status,
        });
    }

    extract_version(
        resp.text()?,
        &settings.snap_name,
        &channel.store_key(&settings.track),
    )
}

/// Pick the trimmed version of `channel_key` for `snap_name` out of a
/// `/v2/find` response body
///
/// # Errors
/// Returns error if the body is not a `sync` response, no entry is named
/// exactly `snap_name`, or the entry does not carry `channel_key`
pub fn extract_version(body: &str, snap_name: &str, channel_key: &str) -> Result<String> {
    let response: ApiResponse = serde_json::from_str(body)?;
    if response.kind != "sync" {
        return Err(CheckError::UnexpectedShape(format!(
            "snapd response type is {:?}, expected \"sync\"",
            response.kind
        )));
    }

    let snaps: Vec<StoreSnap> = serde_json::from_value(response.result)?;
    let snap = snaps
        .into_iter()
        .find(|snap| snap.name == snap_name)
        .ok_or_else(|| CheckError::PackageNotFound(snap_name.to_string()))?;

    match snap.channels.get(channel_key) {
        Some(info) if info.version.trim().is_empty() => Err(CheckError::MissingField("version")),
        Some(info) => Ok(info.version.trim().to_string()),
        None => Err(CheckError::ChannelNotFound {
            key: channel_key.to_string(),
            available: snap.channels.into_keys().collect(),
        }),
    }
}
