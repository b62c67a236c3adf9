// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Fixed coordinates of the two data sources
//!
//! This module holds the upstream project location on the hosting API and the
//! snapd socket and snap name consulted by the store inspector. Production
//! values come from [`Settings::default`]; tests build their own to point at
//! local fakes.

use std::path::PathBuf;

/// Base URL of the hosting API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Upstream repository owner
pub const GITHUB_OWNER: &str = "samsung";

/// Upstream repository name
pub const GITHUB_REPO: &str = "netcoredbg";

/// Default branch whose head commit names edge builds
pub const DEFAULT_BRANCH: &str = "master";

/// Well-known path of the snapd REST API socket
pub const SNAPD_SOCKET: &str = "/run/snapd.socket";

/// Snap name looked up in the store
pub const SNAP_NAME: &str = "netcoredbg";

/// Track combined with the risk level to form the store channel key
pub const SNAP_TRACK: &str = "latest";

/// Where to look for the expected and the published version
#[derive(Debug, Clone)]
pub struct Settings {
    /// Hosting API base URL, without trailing slash
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Unix socket of the package-management daemon
    pub socket_path: PathBuf,
    pub snap_name: String,
    pub track: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            owner: GITHUB_OWNER.to_string(),
            repo: GITHUB_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            socket_path: PathBuf::from(SNAPD_SOCKET),
            snap_name: SNAP_NAME.to_string(),
            track: SNAP_TRACK.to_string(),
        }
    }
}

impl Settings {
    /// URL of the latest published release
    #[must_use]
    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// URL of the head commit on the default branch
    #[must_use]
    pub fn latest_commit_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch
        )
    }

    /// Request path of the snapd find query for the configured snap
    #[must_use]
    pub fn find_path(&self) -> String {
        format!("/v2/find?name={}", self.snap_name)
    }
}
