//! Row decoding helpers shared by the query modules.

use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{Row, types::Type};

/// Reads a TEXT column holding a `jiff` timestamp.
pub(crate) fn timestamp_column(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a nullable TEXT column holding a `jiff` timestamp.
pub(crate) fn optional_timestamp_column(
    row: &Row,
    index: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(index)?
        .map(|value| {
            value.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads a TEXT column holding an enum with a string `FromStr`.
pub(crate) fn enum_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let value: String = row.get(index)?;
    value.parse::<T>().map_err(|message| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
        )
    })
}

/// Reads a TEXT column holding JSON.
pub(crate) fn json_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let value: String = row.get(index)?;
    serde_json::from_str(&value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}
