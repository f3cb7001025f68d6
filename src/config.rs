use crate::candidate::{
    Candidate, FALLBACKS_VAR, OVERRIDE_VAR, PLATFORM_FALLBACKS, candidate_list,
};
use std::{
    env::{current_dir, split_paths, var_os},
    ffi::OsString,
    path::PathBuf,
};

/// The parts of the process environment that interpreter discovery reads.
///
/// Captured once, then handed to a [`Resolver`](crate::Resolver), so that discovery never
/// consults global state on its own.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Value of the `PYTHON` variable.
    pub python_override: Option<OsString>,
    /// Value of `PATH`.
    pub search_path: Option<OsString>,
    /// Directory against which relative candidates are looked up.
    pub current_dir: PathBuf,
    /// Candidates tried after `python3` and `python`.
    pub fallbacks: Vec<OsString>,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            python_override: var_os(OVERRIDE_VAR),
            search_path: var_os("PATH"),
            current_dir: current_dir().unwrap_or_default(),
            fallbacks: fallbacks(var_os(FALLBACKS_VAR)),
        }
    }

    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate> {
        candidate_list(self.python_override.as_deref(), &self.fallbacks)
    }
}

fn fallbacks(value: Option<OsString>) -> Vec<OsString> {
    let Some(value) = value else {
        return PLATFORM_FALLBACKS.iter().map(OsString::from).collect();
    };
    split_paths(&value)
        .filter(|path| !path.as_os_str().is_empty())
        .map(PathBuf::into_os_string)
        .collect()
}
