use spots::database::DatabaseError;

pub mod spot;

/// Connection level failures end a run, everything else concerns a single
/// statement.
pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DatabaseError::Unavailable(Box::new(why)),
        _ => DatabaseError::Other(Box::new(why)),
    }
}
