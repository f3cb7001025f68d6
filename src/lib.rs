//! Locate a Python 3 interpreter and run `gyp_main.py` under it.
//!
//! The [`Resolver`] walks an ordered candidate list (the `PYTHON` override, then `python3`,
//! `python`, then platform fallbacks) and returns the first one a [`Probe`] accepts. The
//! [`Launcher`] then runs the script with the shim's arguments and standard streams, and
//! reports the exit code the shim should terminate with.

mod candidate;
pub use candidate::{Candidate, FALLBACKS_VAR, OVERRIDE_VAR, PLATFORM_FALLBACKS, PROGRAMS};

mod config;
pub use config::Config;

mod error;
pub use error::Error;

mod launch;
pub use launch::{
    FALLBACK_EXIT_CODE, LaunchSpec, Launcher, NOT_FOUND_EXIT_CODE, SCRIPT_NAME, script_path,
};

mod probe;
pub use probe::{Interpreter, Lookup, Probe, Version, VersionProbe};

mod resolve;
pub use resolve::Resolver;
