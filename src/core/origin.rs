//! Source location of a logging call

use std::fmt;
use std::panic::Location;

/// Function name recorded when only file and line are known.
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Where a log entry was emitted: file base name, line and enclosing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl Origin {
    /// Build an origin from raw call-site parts. The directory part of
    /// `file` is dropped.
    pub fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file: base_name(file),
            line,
            function,
        }
    }

    /// Origin of whoever called the current `#[track_caller]` chain.
    ///
    /// The function name is not available this way and is recorded as
    /// [`UNKNOWN_FUNCTION`]; use the logging macros to capture it.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), UNKNOWN_FUNCTION)
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &'static str {
        self.function
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn base_name(path: &'static str) -> &'static str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Turn the type name of a marker fn declared inside a function body into
/// that function's path. Used by [`origin!`](crate::origin).
#[doc(hidden)]
pub fn enclosing_function(marker_type_name: &'static str) -> &'static str {
    let mut name = marker_type_name
        .strip_suffix("::__callsite")
        .unwrap_or(marker_type_name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}
