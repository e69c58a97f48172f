//! Mapping from driver errors to port-level store errors.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

use crate::domain::ports::StoreError;

/// Classify a driver error as connection-class or query-class.
///
/// Connection-class failures (server selection, transport, authentication)
/// surface as [`StoreError::Connection`]; everything else is a query failure.
pub(super) fn map_mongo_error(error: MongoError) -> StoreError {
    debug!(error = %error, "store operation failed");
    match &*error.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. } => StoreError::connection(error.to_string()),
        _ => StoreError::query(error.to_string()),
    }
}

/// Whether the error is a unique-index violation.
pub(super) fn is_duplicate_key(error: &MongoError) -> bool {
    const DUPLICATE_KEY: i32 = 11000;
    match &*error.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}
