use crate::candidate::{Candidate, DisplayList, OVERRIDE_VAR};
use std::{ffi::OsString, io};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "no usable Python interpreter found (tried: {}); set {} to select one",
        DisplayList(.tried),
        OVERRIDE_VAR
    )]
    NotFound { tried: Vec<Candidate> },

    #[error("failed to run `{}`", .program.display())]
    Spawn {
        program: OsString,
        #[source]
        source: io::Error,
    },
}
