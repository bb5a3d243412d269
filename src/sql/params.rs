//! Typed values for dynamically built statements.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to a positional parameter of a built query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    BigInt(i64),
    Text(String),
}

impl SqlParam {
    /// Bind this value as the next positional parameter.
    pub fn bind_to<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            SqlParam::BigInt(n) => query.bind(n),
            SqlParam::Text(s) => query.bind(s),
        }
    }
}
