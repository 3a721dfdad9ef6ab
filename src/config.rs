use clap::Parser;
use std::path::PathBuf;

use crate::http::parser::MAX_REQUEST_BODY_LENGTH;

/// Command line interface.
#[derive(Debug, Parser)]
#[command(
    name = "littlehttpd",
    version,
    about = "Serves files over HTTP, one request per connection"
)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Stay in the foreground and log to stderr instead of syslog
    #[arg(long)]
    pub debug: bool,

    /// Chroot into the document root at startup (needs --user and --group)
    #[arg(long)]
    pub chroot: bool,

    /// User to run as after the chroot
    #[arg(long)]
    pub user: Option<String>,

    /// Group to run as after the chroot
    #[arg(long)]
    pub group: Option<String>,

    /// Directory the served files live in
    pub docroot: PathBuf,
}

/// Settings the running server reads on every connection. Built once at
/// startup and shared read-only behind an `Arc`; nothing mutates it after
/// that.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base directory request paths resolve against.
    pub document_root: PathBuf,
    /// TCP port the listener binds.
    pub port: u16,
    /// Largest entity body a request may announce.
    pub max_request_body_length: u64,
}

impl ServerConfig {
    /// Derives the runtime settings from the parsed command line.
    ///
    /// Under `--chroot` the document root becomes the filesystem root:
    /// after the chroot the original path no longer exists, the root of
    /// the new namespace is the docroot itself.
    pub fn from_cli(cli: &Cli) -> Self {
        let document_root = if cli.chroot {
            PathBuf::from("/")
        } else {
            cli.docroot.clone()
        };
        Self {
            document_root,
            port: cli.port,
            max_request_body_length: MAX_REQUEST_BODY_LENGTH,
        }
    }
}
