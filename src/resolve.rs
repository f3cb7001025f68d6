use crate::{Candidate, Config, Error, Interpreter, Probe, VersionProbe};
use log::debug;

/// Finds the first usable interpreter among [`Config::candidates`].
pub struct Resolver<P = VersionProbe> {
    config: Config,
    probe: P,
}

impl Resolver {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_probe(config, VersionProbe)
    }
}

impl<P: Probe> Resolver<P> {
    #[must_use]
    pub fn with_probe(config: Config, probe: P) -> Self {
        Self { config, probe }
    }

    /// Probes candidates in order and stops at the first one that passes.
    pub fn resolve(&self) -> Result<Interpreter, Error> {
        let mut tried = Vec::new();
        for candidate in self.config.candidates() {
            debug!("probing {candidate}");
            if let Some(interpreter) = self.probe.probe(&candidate, &self.config) {
                debug!(
                    "using {candidate} at `{}`{}",
                    interpreter.path.display(),
                    interpreter
                        .version
                        .map(|version| format!(" (Python {version})"))
                        .unwrap_or_default()
                );
                return Ok(interpreter);
            }
            tried.push(candidate);
        }
        Err(Error::NotFound { tried })
    }
}
