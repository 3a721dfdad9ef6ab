//! Process setup: daemonization and privilege dropping.

use anyhow::{Context, bail};
use nix::unistd::{self, ForkResult, Group, User};
use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::os::fd::IntoRawFd;
use std::path::Path;
use std::process;

/// Opens the null device for [`daemonize`] to point the standard streams
/// at.
///
/// Callers grab it early: once a chroot is entered, the document root has
/// no `/dev/null` to offer.
pub fn open_null_device() -> anyhow::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/null")
        .context("failed to open /dev/null")
}

/// Detaches the process from its controlling terminal.
///
/// The classic sequence: move to `/`, point the standard streams at the
/// null device, fork and let the parent exit, then `setsid` in the child,
/// which cannot fail now that the child is no group leader. Must run before
/// the async runtime starts; a forked child keeps only the calling thread.
pub fn daemonize(null_device: File) -> anyhow::Result<()> {
    unistd::chdir("/").context("chdir(2) failed")?;
    redirect_standard_streams(null_device).context("failed to redirect standard streams")?;
    match unsafe { unistd::fork() }.context("fork(2) failed")? {
        ForkResult::Parent { .. } => process::exit(0),
        ForkResult::Child => {}
    }
    unistd::setsid().context("setsid(2) failed")?;
    Ok(())
}

fn redirect_standard_streams(null_device: File) -> anyhow::Result<()> {
    let null = null_device.into_raw_fd();
    for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
        unistd::dup2(null, fd).context("dup2(2) failed")?;
    }
    if null > libc::STDERR_FILENO {
        unistd::close(null).ok();
    }
    Ok(())
}

/// Confines the process to `docroot` and drops root.
///
/// Group first, then supplementary groups, then `chroot`, and the uid
/// switch last: the chroot call itself still needs root. Both names are
/// required; a half-configured drop is refused up front.
pub fn enter_chroot(
    docroot: &Path,
    user: Option<&str>,
    group: Option<&str>,
) -> anyhow::Result<()> {
    let (Some(user), Some(group)) = (user, group) else {
        bail!("use both of --user and --group");
    };

    let group_entry = Group::from_name(group)
        .context("getgrnam(3) failed")?
        .with_context(|| format!("no such group: {group}"))?;
    unistd::setgid(group_entry.gid).context("setgid(2) failed")?;

    let user_cstr = CString::new(user).context("user name contains an interior NUL")?;
    unistd::initgroups(&user_cstr, group_entry.gid).context("initgroups(3) failed")?;

    let user_entry = User::from_name(user)
        .context("getpwnam(3) failed")?
        .with_context(|| format!("no such user: {user}"))?;

    unistd::chroot(docroot).context("chroot(2) failed")?;
    unistd::setuid(user_entry.uid).context("setuid(2) failed")?;
    Ok(())
}
