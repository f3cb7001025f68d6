use crate::Error;
use log::{debug, warn};
use std::{
    ffi::{OsStr, OsString},
    num::NonZeroI32,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

/// Exit code used when the child's own code is unavailable or the child could not be started.
pub const FALLBACK_EXIT_CODE: i32 = 9;

/// Exit code used when no interpreter is found.
pub const NOT_FOUND_EXIT_CODE: i32 = 1;

const DEFAULT_FALLBACK_CODE: NonZeroI32 = match NonZeroI32::new(FALLBACK_EXIT_CODE) {
    Some(code) => code,
    None => panic!("`FALLBACK_EXIT_CODE` is zero"),
};

/// Name of the script run under the interpreter.
pub const SCRIPT_NAME: &str = "gyp_main.py";

/// Location of [`SCRIPT_NAME`] for a shim installed at `exe`.
///
/// The shim lives in `<root>/bin`, the script in `<root>`. The path is joined, not
/// canonicalized.
#[must_use]
pub fn script_path(exe: &Path) -> PathBuf {
    exe.parent()
        .unwrap_or_else(|| Path::new(""))
        .join("..")
        .join(SCRIPT_NAME)
}

/// Everything needed to start the child. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchSpec {
    interpreter: OsString,
    script: PathBuf,
    args: Vec<OsString>,
}

impl LaunchSpec {
    #[must_use]
    pub fn new<I, S>(interpreter: impl Into<OsString>, script: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn interpreter(&self) -> &OsStr {
        &self.interpreter
    }

    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }

    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// `<interpreter> <script> <args...>` with all three standard streams inherited.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.interpreter);
        command.arg(&self.script);
        command.args(&self.args);
        command.stdin(Stdio::inherit());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());
        command
    }
}

/// Runs a [`LaunchSpec`] to completion and turns its status into an exit code.
#[derive(Clone, Debug)]
pub struct Launcher {
    fallback_code: NonZeroI32,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::with_fallback_code(DEFAULT_FALLBACK_CODE)
    }
}

impl Launcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fallback_code(fallback_code: NonZeroI32) -> Self {
        Self { fallback_code }
    }

    #[must_use]
    pub fn fallback_code(&self) -> i32 {
        self.fallback_code.get()
    }

    /// Spawns the child, blocks until it terminates, and returns the code the shim should exit
    /// with.
    pub fn launch(&self, spec: &LaunchSpec) -> Result<i32, Error> {
        let mut command = spec.command();
        let ignore_interrupts = os_specific::IgnoreInterrupts::new();
        ignore_interrupts.restore_in_child(&mut command);
        debug!("running {command:?}");
        let mut child = command.spawn().map_err(|source| Error::Spawn {
            program: spec.interpreter.clone(),
            source,
        })?;

        let result = child.wait();
        drop(ignore_interrupts);

        match result {
            Ok(status) => Ok(self.exit_code(status)),
            Err(error) => {
                warn!("failed to wait for {command:?}: {error}");
                Ok(self.fallback_code())
            }
        }
    }

    /// The child's exit code, or the fallback code if it has none.
    #[must_use]
    pub fn exit_code(&self, status: ExitStatus) -> i32 {
        debug!("child exited with {status}");
        status.code().unwrap_or(self.fallback_code())
    }

    /// The code the shim exits with when resolving or launching fails.
    #[must_use]
    pub fn error_code(&self, error: &Error) -> i32 {
        match error {
            Error::NotFound { .. } => NOT_FOUND_EXIT_CODE,
            Error::Spawn { .. } => self.fallback_code(),
        }
    }
}

#[cfg(unix)]
mod os_specific {
    use log::debug;
    use nix::sys::signal::{SigHandler, Signal, signal};
    use std::{os::unix::process::CommandExt, process::Command};

    /// Ignores terminal interrupts for as long as it is alive, so that the shim outlives its
    /// child. Created before the child is spawned; the child gets the previous dispositions
    /// back through [`IgnoreInterrupts::restore_in_child`].
    pub struct IgnoreInterrupts(Vec<(Signal, SigHandler)>);

    impl IgnoreInterrupts {
        pub fn new() -> Self {
            let previous = [Signal::SIGINT, Signal::SIGQUIT]
                .into_iter()
                .filter_map(|sig| {
                    // SAFETY: `SigIgn` installs no handler code.
                    match unsafe { signal(sig, SigHandler::SigIgn) } {
                        Ok(handler) => Some((sig, handler)),
                        Err(error) => {
                            debug!("failed to ignore {sig:?}: {error}");
                            None
                        }
                    }
                })
                .collect();
            Self(previous)
        }

        pub fn restore_in_child(&self, command: &mut Command) {
            let previous = self.0.clone();
            // SAFETY: the closure only calls `sigaction`, which is async-signal-safe, and does
            // not allocate.
            unsafe {
                command.pre_exec(move || {
                    for &(sig, handler) in &previous {
                        signal(sig, handler)?;
                    }
                    Ok(())
                });
            }
        }
    }

    impl Drop for IgnoreInterrupts {
        fn drop(&mut self) {
            for &(sig, handler) in &self.0 {
                // SAFETY: `handler` was installed before we replaced it.
                if let Err(error) = unsafe { signal(sig, handler) } {
                    debug!("failed to restore {sig:?}: {error}");
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod os_specific {
    use std::process::Command;

    pub struct IgnoreInterrupts;

    impl IgnoreInterrupts {
        pub fn new() -> Self {
            Self
        }

        pub fn restore_in_child(&self, _command: &mut Command) {}
    }
}
