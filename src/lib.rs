// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Snap Store release verification library
//!
//! This library checks whether the netcoredbg snap published in the Snap Store
//! matches the latest upstream version for a release channel: the latest
//! GitHub release tag for `stable`, the short SHA of the default branch head
//! for `edge`. The store side is read from snapd over its Unix socket.

pub mod channel;
pub mod check;
pub mod error;
pub mod settings;
pub mod store;
pub mod transport;
pub mod upstream;

// Re-export commonly used items at the crate root for convenience
pub use channel::Channel;
pub use check::{Outcome, run};
pub use error::{CheckError, Result};
pub use settings::{SNAPD_SOCKET, Settings};
