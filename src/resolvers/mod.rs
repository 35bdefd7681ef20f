//! Transport-agnostic query and mutation resolvers
//!
//! Every function takes the injected [`Services`] handle and returns a
//! [`LiftError`] on failure. Identifier tokens are coerced to integer keys
//! before they get here; the GraphQL exposure is a thin adapter on top.

pub mod mutations;
pub mod queries;

use crate::core::entity::{ForeignKey, Record};
use crate::core::error::LiftError;
use crate::core::service::DataService;

/// Look up one row, treating a missing or absent key as NotFound
pub(crate) async fn fetch<T: Record>(
    service: &dyn DataService<T>,
    id: Option<i64>,
) -> Result<T, LiftError> {
    let Some(id) = id else {
        return Err(LiftError::NotFound(T::KIND));
    };

    service
        .get(id)
        .await?
        .ok_or(LiftError::NotFound(T::KIND))
}

/// Rows pointing at a parent; an absent parent key yields nothing
pub(crate) async fn children<T: Record>(
    service: &dyn DataService<T>,
    key: Option<ForeignKey>,
) -> Result<Vec<T>, LiftError> {
    match key {
        Some(key) => Ok(service.list_by(key).await?),
        None => Ok(Vec::new()),
    }
}
