//! Log routing: stderr in debug mode, syslog otherwise.

use std::ffi::CString;
use std::io::{self, Write};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Initializes the global tracing subscriber.
///
/// Debug mode keeps the process in the foreground, so events go to stderr
/// with timestamps and levels. Otherwise everything is handed to syslog
/// under the daemon facility, tagged with the program name and pid; the
/// syslog entry already carries both, so the fmt layer drops them.
pub fn init(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_target(false)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
    } else {
        unsafe {
            libc::openlog(
                c"littlehttpd".as_ptr(),
                libc::LOG_PID | libc::LOG_NDELAY,
                libc::LOG_DAEMON,
            );
        }
        tracing_subscriber::fmt()
            .with_target(false)
            .with_level(false)
            .with_ansi(false)
            .without_time()
            .with_writer(SyslogMakeWriter)
            .init();
    }
}

/// Routes panic messages through the logger. After daemonization stderr
/// points at /dev/null, so the default hook would discard the one line
/// that explains why a connection task died.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

struct SyslogMakeWriter;

impl<'a> MakeWriter<'a> for SyslogMakeWriter {
    type Writer = SyslogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SyslogWriter {
            priority: libc::LOG_INFO,
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        let priority = match *meta.level() {
            Level::ERROR => libc::LOG_ERR,
            Level::WARN => libc::LOG_WARNING,
            Level::INFO => libc::LOG_INFO,
            Level::DEBUG | Level::TRACE => libc::LOG_DEBUG,
        };
        SyslogWriter { priority }
    }
}

/// One formatted event becomes one syslog entry.
struct SyslogWriter {
    priority: libc::c_int,
}

impl Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let message = String::from_utf8_lossy(buf);
        let message = message.trim_end_matches('\n');
        if !message.is_empty() {
            // CString::new fails on interior NULs, which syslog cannot carry.
            if let Ok(text) = CString::new(message) {
                unsafe {
                    libc::syslog(self.priority, c"%s".as_ptr(), text.as_ptr());
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
