// File: crates/graph-core/src/reload.rs
// Summary: The reload action offered when the chart library fails: restart the hosting process.

use std::process::Command;

use tracing::error;

/// Restart the host from scratch, discarding all loader state.
pub trait Reload: Send + Sync {
    fn reload(&self);
}

/// Re-executes the current binary with the same arguments.
/// On success this never returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessReload;

impl Reload for ProcessReload {
    fn reload(&self) {
        let exe = match std::env::current_exe() {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "cannot locate current executable for reload");
                std::process::exit(1);
            }
        };
        let mut cmd = Command::new(&exe);
        cmd.args(std::env::args_os().skip(1));

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // exec only returns on failure
            let e = cmd.exec();
            error!(error = %e, exe = %exe.display(), "reload failed");
            std::process::exit(1);
        }

        #[cfg(not(unix))]
        {
            match cmd.spawn() {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    error!(error = %e, exe = %exe.display(), "reload failed");
                    std::process::exit(1);
                }
            }
        }
    }
}
