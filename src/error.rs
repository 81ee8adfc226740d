//! Builder errors.
//!
//! The underlying LLVM C++ API asserts on misuse; `inkwell` surfaces a
//! `Result` in the places where that is possible. These variants cover
//! exactly those places. There is no recovery story beyond reporting:
//! a failed build leaves nothing the caller needs to clean up.

use thiserror::Error;

/// Errors raised while constructing a function.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The pointee of the supplied pointer type is not a first-class
    /// LLVM type and cannot appear as a parameter or return type.
    #[error("pointee is not a first-class LLVM type: {0}")]
    NonBasicPointee(String),

    /// A parameter expected on a freshly declared function was absent.
    #[error("function {0:?} has no parameter {1}")]
    MissingParam(&'static str, u32),

    /// Error from the LLVM instruction builder.
    #[error("LLVM builder error: {0}")]
    Builder(#[from] inkwell::builder::BuilderError),
}
