//! Convenience result type alias for Pixelbadger.

use crate::error::AppError;

/// A specialized `Result` type for Pixelbadger operations.
pub type AppResult<T> = Result<T, AppError>;
