use clap::Parser;
use std::process;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info};

use littlehttpd::config::{Cli, ServerConfig};
use littlehttpd::server::listener;
use littlehttpd::{daemon, logging};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    logging::init(cli.debug);
    logging::install_panic_hook();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        process::exit(1);
    }
}

/// Startup sequence. The order is load-bearing: the null device must be
/// opened before the chroot hides `/dev`, and the listener bound while
/// stderr is still a terminal. The fork inside `daemonize` comes last,
/// before the first runtime thread exists.
fn run(cli: Cli) -> anyhow::Result<()> {
    let null_device = if cli.debug {
        None
    } else {
        Some(daemon::open_null_device()?)
    };
    if cli.chroot {
        daemon::enter_chroot(&cli.docroot, cli.user.as_deref(), cli.group.as_deref())?;
    }
    let config = Arc::new(ServerConfig::from_cli(&cli));
    let std_listener = listener::bind(config.port)?;

    if let Some(null_device) = null_device {
        daemon::daemonize(null_device)?;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to start worker runtime: {e}");
            process::exit(3);
        }
    };

    runtime.block_on(async {
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = listener::run(std_listener, config) => res,

            _ = tokio::signal::ctrl_c() => {
                info!("exit by signal: interrupt");
                process::exit(1);
            }

            _ = terminate.recv() => {
                info!("exit by signal: terminate");
                process::exit(1);
            }
        }
    })
}
