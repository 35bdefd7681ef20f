//! Conversion of resolver errors into GraphQL error entries

use crate::core::error::LiftError;
use async_graphql::{Context, Error, ErrorExtensions};

impl ErrorExtensions for LiftError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.error_code()))
    }
}

/// Log a failed root field and turn it into an error entry
pub(crate) fn report(ctx: &Context<'_>, err: LiftError) -> Error {
    let operation = ctx.field().name();

    match &err {
        LiftError::Storage(_) => {
            tracing::error!(operation, error = %err, "operation failed");
        }
        _ => {
            tracing::warn!(operation, code = err.error_code(), error = %err, "operation rejected");
        }
    }

    err.extend()
}
