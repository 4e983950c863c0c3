//! Logging macros with format arguments and full call-site capture.
//!
//! Unlike the `Logger` methods, the macros also record the enclosing
//! function's path. The message is only formatted when the level passes the
//! logger's gate.
//!
//! Optional parts come before the format string and end with `;`:
//! `err = <&error>`, `payload = <Payload>`, or both in that order.
//!
//! # Examples
//!
//! ```
//! use callsite_logger::prelude::*;
//! use callsite_logger::{error, info};
//!
//! let logger = Logger::default();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, payload = Payload::new().with_field("port", port); "listening on {}", port);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "refused");
//! error!(logger, err = &err; "upstream {} failed", "db");
//! ```

/// Capture the current source location, including the enclosing function.
///
/// # Examples
///
/// ```
/// fn handler() -> callsite_logger::Origin {
///     callsite_logger::origin!()
/// }
///
/// let origin = handler();
/// assert!(origin.function().ends_with("handler"));
/// ```
#[macro_export]
macro_rules! origin {
    () => {{
        fn __callsite() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::Origin::new(
            file!(),
            line!(),
            $crate::core::origin::enclosing_function(__type_name_of(__callsite)),
        )
    }};
}

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use callsite_logger::prelude::*;
/// # let logger = Logger::default();
/// use callsite_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// let payload = Payload::new().with_field("code", 500);
/// log!(logger, LogLevel::Warn, payload = payload; "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    (@emit $logger:expr, $level:expr, $err:expr, $payload:expr, $($arg:tt)+) => {{
        let __logger = &$logger;
        let __level: $crate::LogLevel = $level;
        if __logger.is_enabled(__level) {
            __logger.log_at(
                $crate::origin!(),
                __level,
                ::std::format!($($arg)+),
                $payload,
                $err,
            );
        }
    }};
    ($logger:expr, $level:expr, err = $err:expr, payload = $payload:expr; $($arg:tt)+) => {
        $crate::log!(@emit $logger, $level,
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::Some($payload),
            $($arg)+)
    };
    ($logger:expr, $level:expr, err = $err:expr; $($arg:tt)+) => {
        $crate::log!(@emit $logger, $level,
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::None,
            $($arg)+)
    };
    ($logger:expr, $level:expr, payload = $payload:expr; $($arg:tt)+) => {
        $crate::log!(@emit $logger, $level,
            ::std::option::Option::None,
            ::std::option::Option::Some($payload),
            $($arg)+)
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!(@emit $logger, $level,
            ::std::option::Option::None,
            ::std::option::Option::None,
            $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use callsite_logger::prelude::*;
/// # let logger = Logger::default();
/// use callsite_logger::error;
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such table");
/// error!(logger, "Failed to connect to database");
/// let payload = Payload::new().with_field("table", "users");
/// error!(logger, err = &err, payload = payload; "query failed");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, drain the logger and exit the process.
///
/// # Examples
///
/// ```no_run
/// # use callsite_logger::prelude::*;
/// # let logger = Logger::default();
/// use callsite_logger::fatal;
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// fatal!(logger, err = &err; "Unable to recover");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, err = $err:expr, payload = $payload:expr; $($arg:tt)+) => {
        $logger.fatal_at(
            $crate::origin!(),
            ::std::format!($($arg)+),
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::Some($payload),
        )
    };
    ($logger:expr, err = $err:expr; $($arg:tt)+) => {
        $logger.fatal_at(
            $crate::origin!(),
            ::std::format!($($arg)+),
            ::std::option::Option::Some($err as &dyn ::std::error::Error),
            ::std::option::Option::None,
        )
    };
    ($logger:expr, payload = $payload:expr; $($arg:tt)+) => {
        $logger.fatal_at(
            $crate::origin!(),
            ::std::format!($($arg)+),
            ::std::option::Option::None,
            ::std::option::Option::Some($payload),
        )
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_at(
            $crate::origin!(),
            ::std::format!($($arg)+),
            ::std::option::Option::None,
            ::std::option::Option::None,
        )
    };
}
