use std::{
    ffi::{OsStr, OsString},
    fmt::{self, Display},
};

/// Environment variable naming a preferred interpreter.
pub const OVERRIDE_VAR: &str = "PYTHON";

/// Interpreter names searched for on `PATH`, most preferred first.
pub const PROGRAMS: [&str; 2] = ["python3", "python"];

/// Environment variable replacing [`PLATFORM_FALLBACKS`] with a list of paths, separated
/// like `PATH`. Empty means no fallbacks.
pub const FALLBACKS_VAR: &str = "GYP_PYTHON_FALLBACKS";

/// Tried after [`PROGRAMS`] unless [`FALLBACKS_VAR`] is set.
#[cfg(windows)]
pub const PLATFORM_FALLBACKS: &[&str] = &["py"];

#[cfg(target_os = "macos")]
pub const PLATFORM_FALLBACKS: &[&str] = &["/opt/homebrew/bin/python3", "/usr/local/bin/python3"];

#[cfg(all(unix, not(target_os = "macos")))]
pub const PLATFORM_FALLBACKS: &[&str] = &["/usr/bin/python3", "/usr/local/bin/python3"];

#[cfg(not(any(unix, windows)))]
pub const PLATFORM_FALLBACKS: &[&str] = &[];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidate {
    /// The value of [`OVERRIDE_VAR`].
    Override { var: &'static str, value: OsString },
    /// A program name or an absolute path.
    Program(OsString),
}

impl Candidate {
    #[must_use]
    pub fn program<S: Into<OsString>>(program: S) -> Self {
        Candidate::Program(program.into())
    }

    /// The command used to run this candidate, exactly as it was given.
    #[must_use]
    pub fn as_os_str(&self) -> &OsStr {
        match self {
            Candidate::Override { value, .. } => value,
            Candidate::Program(program) => program,
        }
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Override { var, value } => write!(f, "{var}={}", value.display()),
            Candidate::Program(program) => write!(f, "{}", program.display()),
        }
    }
}

/// Builds the ordered candidate list from the override value, if any, and the fallbacks.
pub(crate) fn candidate_list(
    python_override: Option<&OsStr>,
    fallbacks: &[OsString],
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    if let Some(value) = python_override.filter(|value| !value.is_empty()) {
        candidates.push(Candidate::Override {
            var: OVERRIDE_VAR,
            value: value.to_owned(),
        });
    }
    candidates.extend(PROGRAMS.iter().map(Candidate::program));
    candidates.extend(fallbacks.iter().map(Candidate::program));
    candidates
}

pub(crate) struct DisplayList<'a>(pub &'a [Candidate]);

impl Display for DisplayList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, candidate) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{candidate}")?;
        }
        Ok(())
    }
}
