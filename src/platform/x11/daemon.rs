//! Process daemonization for background operation.

use crate::error::{Error, Result};

/// Detach from the controlling terminal: fork into the background, chdir
/// to `/` and redirect stdio to `/dev/null`. The dump sink must be opened
/// before calling this, since relative paths stop resolving afterwards.
pub fn daemonize() -> Result<()> {
    let rc = unsafe { libc::daemon(0, 0) };
    if rc != 0 {
        return Err(Error::Daemonize(
            std::io::Error::last_os_error().to_string(),
        ));
    }
    Ok(())
}
