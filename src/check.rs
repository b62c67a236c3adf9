// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Comparator and reporter
//!
//! Runs the upstream resolver, then the store inspector, and compares the two
//! versions by exact string equality. Progress goes to `out`, diagnostics to
//! `err`. A failed stage ends the run; the store is not queried when the
//! upstream version is unknown.

use std::io::{self, Write};

use tracing::debug;

use crate::channel::Channel;
use crate::settings::Settings;
use crate::{store, upstream};

/// Result of one verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Store carries the upstream version
    Match { version: String },
    /// Store is stale (or ahead)
    Mismatch { expected: String, store: String },
    UpstreamUnavailable,
    StoreUnavailable,
}

impl Outcome {
    /// Process exit status: 0 only for [`Outcome::Match`]
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Match { .. } => 0,
            _ => 1,
        }
    }
}

/// Run the full check for `channel`
///
/// # Errors
/// Only fails if writing to `out` or `err` fails; data source failures are
/// reported and turned into an [`Outcome`]
pub fn run<O: Write, E: Write>(
    settings: &Settings,
    channel: Channel,
    out: &mut O,
    err: &mut E,
) -> io::Result<Outcome> {
    let key = channel.store_key(&settings.track);
    debug!("checking {} on {key}", settings.snap_name);

    let what = match channel {
        Channel::Stable => "stable release",
        Channel::Edge => "edge commit",
    };
    writeln!(out, "Fetching latest upstream {what}...")?;
    let expected = match upstream::resolve(settings, channel) {
        Ok(version) => version,
        Err(e) => {
            writeln!(err, "{e}")?;
            writeln!(err, "Failed to fetch upstream version")?;
            return Ok(Outcome::UpstreamUnavailable);
        }
    };
    writeln!(out, "Upstream version: {expected}")?;

    writeln!(out, "Fetching snap store version for channel {key}...")?;
    let published = match store::fetch_version(settings, channel) {
        Ok(version) => version,
        Err(e) => {
            writeln!(err, "{e}")?;
            writeln!(err, "Failed to fetch snap store version (is snapd running?)")?;
            return Ok(Outcome::StoreUnavailable);
        }
    };
    writeln!(out, "Snap store version: {published}")?;

    if expected == published {
        writeln!(
            out,
            "✓ Versions match - Snap Store {key} has the latest {} version",
            settings.snap_name
        )?;
        return Ok(Outcome::Match { version: expected });
    }

    writeln!(
        out,
        "✗ Versions differ - Snap Store {key} has {published}, upstream is {expected}"
    )?;
    Ok(Outcome::Mismatch {
        expected,
        store: published,
    })
}
