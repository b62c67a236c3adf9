// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release channel selection

use std::fmt;

use clap::ValueEnum;

/// A release channel (risk level) of the snap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Channel {
    /// Tagged releases
    #[default]
    Stable,
    /// Builds of the default branch head, versioned by short SHA
    Edge,
}

impl Channel {
    /// Risk level name as used by the store
    #[must_use]
    pub fn risk(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Edge => "edge",
        }
    }

    /// Composite `<track>/<risk>` key of the store's channel map
    ///
    /// # Examples
    /// ```
    /// use snapcheck::Channel;
    /// assert_eq!(Channel::Edge.store_key("latest"), "latest/edge");
    /// ```
    #[must_use]
    pub fn store_key(self, track: &str) -> String {
        format!("{track}/{}", self.risk())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.risk())
    }
}
