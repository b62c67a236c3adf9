// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Upstream resolver: the version the store is expected to carry
//!
//! Stable builds are named after the latest release tag; edge builds after
//! the short SHA of the default branch head. The two conventions are not
//! cross-checked against each other.

use attohttpc::header::{ACCEPT, USER_AGENT};
use tracing::debug;

use crate::channel::Channel;
use crate::error::{CheckError, Result};
use crate::settings::Settings;

/// Length of the abbreviated commit hash used as edge version
pub const SHORT_SHA_LEN: usize = 7;

/// Resolve the expected version for a channel from the hosting API
///
/// # Errors
/// Returns error if the API is unreachable, answers with a non-success
/// status, or the response lacks the required field
pub fn resolve(settings: &Settings, channel: Channel) -> Result<String> {
    match channel {
        Channel::Stable => {
            let body = fetch(&settings.latest_release_url())?;
            parse_release_tag(&body)
        }
        Channel::Edge => {
            let body = fetch(&settings.latest_commit_url())?;
            let sha = parse_commit_sha(&body)?;
            Ok(short_sha(&sha).to_string())
        }
    }
}

fn fetch(url: &str) -> Result<String> {
    debug!("GET {url}");

    let resp = attohttpc::get(url)
        .header(USER_AGENT, format!("snapcheck/{}", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "application/vnd.github+json")
        .send()?;

    if !resp.is_success() {
        return Err(CheckError::Status {
            origin: "GitHub API",
            code: resp.status().as_u16(),
        });
    }

    Ok(resp.text()?)
}

/// Extract the trimmed `tag_name` of a release object
///
/// # Errors
/// Returns error if the body is not JSON or the tag is missing or blank
///
/// # Examples
/// ```
/// use snapcheck::upstream::parse_release_tag;
/// assert_eq!(parse_release_tag(r#"{"tag_name": " 3.1.0-1024\n"}"#).unwrap(), "3.1.0-1024");
/// assert!(parse_release_tag(r#"{"name": "release"}"#).is_err());
/// ```
pub fn parse_release_tag(body: &str) -> Result<String> {
    let release: serde_json::Value = serde_json::from_str(body)?;
    let tag = release["tag_name"].as_str().unwrap_or_default().trim();
    if tag.is_empty() {
        return Err(CheckError::MissingField("tag_name"));
    }
    Ok(tag.to_string())
}

/// Extract the full `sha` of a commit object
///
/// # Errors
/// Returns error if the body is not JSON or the hash is missing or empty
pub fn parse_commit_sha(body: &str) -> Result<String> {
    let commit: serde_json::Value = serde_json::from_str(body)?;
    match commit["sha"].as_str() {
        Some(sha) if !sha.is_empty() => Ok(sha.to_string()),
        _ => Err(CheckError::MissingField("sha")),
    }
}

/// First [`SHORT_SHA_LEN`] characters of a commit hash
///
/// Shorter input is returned whole.
///
/// # Examples
/// ```
/// use snapcheck::upstream::short_sha;
/// assert_eq!(short_sha("abcdef1234"), "abcdef1");
/// assert_eq!(short_sha("abc"), "abc");
/// ```
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices()
        .nth(SHORT_SHA_LEN)
        .map_or(sha, |(idx, _)| &sha[..idx])
}
