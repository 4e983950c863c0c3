//! Errors annotated with the source location that observed them

use super::origin::{Origin, UNKNOWN_FUNCTION};
use std::error::Error;
use std::panic::Location;

/// Boxed error accepted by [`wrap_error`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error prefixed with the `file:line` where it was wrapped.
///
/// The wrapped error stays reachable through [`Error::source`],
/// [`LocatedError::inner`] and [`LocatedError::downcast_ref`].
#[derive(Debug, thiserror::Error)]
#[error("{file}:{line}: {source}")]
pub struct LocatedError {
    file: &'static str,
    line: u32,
    #[source]
    source: BoxError,
}

impl LocatedError {
    fn at(location: &'static Location<'static>, source: BoxError) -> Self {
        let origin = Origin::new(location.file(), location.line(), UNKNOWN_FUNCTION);
        Self {
            file: origin.file(),
            line: origin.line(),
            source,
        }
    }

    /// Wrap `err` at the caller's location.
    #[track_caller]
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self::at(Location::caller(), err.into())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.source
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

/// Prefix an error with the caller's `file:line: `. `None` stays `None`.
///
/// # Example
///
/// ```
/// use callsite_logger::wrap_error;
/// use std::io;
///
/// let none: Option<io::Error> = None;
/// assert!(wrap_error(none).is_none());
///
/// let wrapped = wrap_error(Some(io::Error::new(io::ErrorKind::NotFound, "missing"))).unwrap();
/// assert!(wrapped.to_string().ends_with(": missing"));
/// assert!(wrapped.downcast_ref::<io::Error>().is_some());
/// ```
#[track_caller]
pub fn wrap_error<E: Into<BoxError>>(err: Option<E>) -> Option<LocatedError> {
    let location = Location::caller();
    err.map(|e| LocatedError::at(location, e.into()))
}

/// Location-wrapping for `Result` errors.
pub trait ResultExt<T> {
    /// Wrap the error, if any, at the caller's location.
    fn located(self) -> std::result::Result<T, LocatedError>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn located(self) -> std::result::Result<T, LocatedError> {
        let location = Location::caller();
        self.map_err(|e| LocatedError::at(location, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_none_stays_none() {
        assert!(wrap_error::<io::Error>(None).is_none());
    }

    #[test]
    fn test_prefix_matches_call_site() {
        let err = io::Error::new(io::ErrorKind::NotFound, "config missing");
        let line = line!() + 1;
        let wrapped = wrap_error(Some(err)).unwrap();

        assert_eq!(
            wrapped.to_string(),
            format!("located_error.rs:{}: config missing", line)
        );
        assert_eq!(wrapped.file(), "located_error.rs");
        assert_eq!(wrapped.line(), line);
    }

    #[test]
    fn test_original_error_is_preserved() {
        let wrapped = LocatedError::new(io::Error::new(io::ErrorKind::TimedOut, "slow"));

        let inner = wrapped.downcast_ref::<io::Error>().unwrap();
        assert_eq!(inner.kind(), io::ErrorKind::TimedOut);

        let source = wrapped.source().unwrap();
        assert_eq!(source.to_string(), "slow");

        let boxed = wrapped.into_inner();
        assert!(boxed.downcast::<io::Error>().is_ok());
    }

    #[test]
    fn test_wrapping_twice_nests() {
        let first = LocatedError::new("inner failure");
        let second = wrap_error(Some(first)).unwrap();

        assert!(second.to_string().contains("inner failure"));
        assert!(second.downcast_ref::<LocatedError>().is_some());
    }

    #[test]
    fn test_result_ext() {
        let line = line!() + 1;
        let result: std::result::Result<(), LocatedError> = Err("bad input").located();
        let err = result.unwrap_err();
        assert_eq!(err.line(), line);
        assert!(err.to_string().ends_with(": bad input"));

        let ok: std::result::Result<u8, &str> = Ok(3);
        assert_eq!(ok.located().unwrap(), 3);
    }
}
