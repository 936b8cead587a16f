//! Column conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{types::Type, Row};

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a status column stored as its snake_case name.
pub(crate) fn status<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    row.get::<_, String>(index)?
        .parse::<T>()
        .map_err(|e| conversion_error(index, e))
}
