/// Knobs for a decode call.
///
/// ```
/// # use flparse::prelude::*;
/// let options = DecodeOptions::new().strict(true).verbose(false);
/// assert!(options.is_strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    strict: bool,
    verbose: bool,
}

impl DecodeOptions {
    /// Lenient, quiet options
    pub const fn new() -> Self {
        Self {
            strict: false,
            verbose: false,
        }
    }

    /// Treat dangling references and missing selections as fatal
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Emit a `TRACE` record for every event
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether strict mode is on
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether per-event tracing is on
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }
}
