// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for snapcheck

use clap::Parser;
use snapcheck::Channel;

/// CLI argument parser
#[derive(Parser, Debug)]
#[command(
    name = "snapcheck",
    version,
    about = "Check that the Snap Store has the latest netcoredbg version",
    disable_version_flag = true
)]
#[command(arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")))]
pub struct Cli {
    /// Release channel to verify
    #[arg(short, long, value_enum, default_value_t = Channel::Stable)]
    pub channel: Channel,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,
}
