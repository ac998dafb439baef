//! Verbosity-gated diagnostics written to stderr.
//!
//! A macro whose level is above the configured verbosity expands to a branch
//! that never runs, so its format arguments are not evaluated.
//!
//! | level | constant            | emitted by                                   |
//! |-------|---------------------|----------------------------------------------|
//! | 0     | `VERBOSITY_SILENT`  | nothing                                      |
//! | 1     | `VERBOSITY_SUMMARY` | one line per graph build and scheduling run  |
//! | 2     | `VERBOSITY_CHECKS`  | activity classification, skipped CSV rows    |
//! | 3     | `VERBOSITY_DEBUG`   | each ES/LF relaxation                        |

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
