//! Identifier coercion shared by every mutation

use crate::core::error::{BoundaryError, LiftError};
use async_graphql::ID;

/// Turn an `ID` token (string or integer literal) into a primary key
///
/// Surrounding whitespace is ignored. Anything else that is not a decimal
/// integer fitting an `i64` is rejected before any lookup happens.
pub fn key(id: &ID, argument: &str) -> Result<i64, LiftError> {
    id.0.trim().parse::<i64>().map_err(|_| {
        BoundaryError::NotAnInteger {
            argument: argument.to_string(),
            value: id.0.clone(),
        }
        .into()
    })
}
