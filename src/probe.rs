use crate::{Candidate, Config};
use log::debug;
use std::{
    ffi::OsString,
    fmt::{self, Display},
    path::PathBuf,
    process::{Command, Stdio},
};
use which::which_in;

/// An interpreter that passed a [`Probe`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interpreter {
    /// The candidate, verbatim. This is what gets executed.
    pub program: OsString,
    /// Where the candidate was found.
    pub path: PathBuf,
    pub version: Option<Version>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl Version {
    /// Parses the first `Python X.Y[.Z]` line of `--version` output.
    #[must_use]
    pub fn parse(output: &str) -> Option<Self> {
        output.lines().find_map(|line| {
            let rest = line.trim().strip_prefix("Python ")?;
            let mut parts = rest.split('.');
            let major = parts.next()?.parse().ok()?;
            let minor = parts.next()?.parse().ok()?;
            // Pre-release suffixes like `0rc1` only affect the patch number.
            let patch = parts.next().and_then(|patch| {
                let digits = patch
                    .find(|c: char| !c.is_ascii_digit())
                    .map_or(patch, |index| &patch[..index]);
                digits.parse().ok()
            });
            Some(Self {
                major,
                minor,
                patch,
            })
        })
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

/// Decides whether a candidate is a usable interpreter.
///
/// A probe must not let the candidate write to the shim's standard streams.
pub trait Probe {
    fn probe(&self, candidate: &Candidate, config: &Config) -> Option<Interpreter>;
}

/// Accepts any candidate that resolves to an executable file.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lookup;

impl Probe for Lookup {
    fn probe(&self, candidate: &Candidate, config: &Config) -> Option<Interpreter> {
        let program = candidate.as_os_str();
        match which_in(program, config.search_path.as_ref(), &config.current_dir) {
            Ok(path) => Some(Interpreter {
                program: program.to_owned(),
                path,
                version: None,
            }),
            Err(error) => {
                debug!("{candidate}: {error}");
                None
            }
        }
    }
}

/// Like [`Lookup`], but additionally runs `<candidate> --version` and requires Python 3.
#[derive(Clone, Copy, Debug, Default)]
pub struct VersionProbe;

impl Probe for VersionProbe {
    fn probe(&self, candidate: &Candidate, config: &Config) -> Option<Interpreter> {
        let mut interpreter = Lookup.probe(candidate, config)?;

        let mut command = Command::new(&interpreter.path);
        command.arg("--version");
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        let output = match command.output() {
            Ok(output) => output,
            Err(error) => {
                debug!("{candidate}: failed to run {command:?}: {error}");
                return None;
            }
        };
        if !output.status.success() {
            debug!("{candidate}: {command:?} exited with {}", output.status);
            return None;
        }

        // Python 2 reports its version on stderr.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let Some(version) = Version::parse(&stdout).or_else(|| Version::parse(&stderr)) else {
            debug!("{candidate}: unrecognized version output: {stdout:?} {stderr:?}");
            return None;
        };
        if version.major != 3 {
            debug!("{candidate}: Python {version} is not Python 3");
            return None;
        }

        interpreter.version = Some(version);
        Some(interpreter)
    }
}
