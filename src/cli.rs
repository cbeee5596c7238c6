use crate::marker::MarkerPolicy;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

const LONG_ABOUT: &str = "\
Plants graffiti marker files across a git-rooted directory tree.

Treemark walks every directory below PATH, appends a generated graffiti
line (timestamp plus random tag) to one hidden marker file per directory
and one per regular file, and commits each mutation individually. Marker
files are append-only; treemark never deletes or truncates anything.

The git root is located by walking upward from PATH; not finding one is
the only fatal error. Individual marking actions that fail (unwritable
target, failed git invocation) are reported and skipped.

MARKER POLICIES:

  always-create (default):
    Folder marks go to a fresh random hidden name; file marks go to
    .<name>.mark next to the file, appending when that name exists.

  reuse:
    Any mark appends to a randomly chosen existing hidden file in the
    directory, creating a new one only when none exist.";

/// Plant graffiti marker files across a git tree, one commit per mark
#[derive(Parser, Debug)]
#[command(name = "treemark", version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Change to this directory before doing anything else
    #[arg(short = 'C', value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory to start marking from (must sit inside a git work tree)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// How marker files are chosen for each marking action
    #[arg(long, value_enum, default_value_t = PolicyArg::AlwaysCreate)]
    pub policy: PolicyArg,

    /// Resolve and report targets without writing or committing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PolicyArg {
    /// Synthesize a marker name per action (file marks derive from the file)
    AlwaysCreate,
    /// Append to a random existing hidden file, creating one only if needed
    Reuse,
}

impl From<PolicyArg> for MarkerPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AlwaysCreate => MarkerPolicy::AlwaysCreate,
            PolicyArg::Reuse => MarkerPolicy::ReuseOrCreate,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
