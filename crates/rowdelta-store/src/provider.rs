//! SQLite row provider.
//!
//! Values are read by storage class and then refined by the column's
//! declared type, since SQLite stores dates, times and decimals as text:
//!
//! | Declared type | Stored as | Captured as |
//! |---|---|---|
//! | `BOOL*` | INTEGER | `Bool` |
//! | `DATE` | TEXT | `Date` |
//! | `TIME` | TEXT | `Time` |
//! | `DATETIME`, `TIMESTAMP*` | TEXT | `DateTime` |
//! | `DECIMAL*`, `NUMERIC*` | TEXT | `Decimal` |
//!
//! Text that does not parse under its declared type stays `Text`.

use crate::errors::{access, Result, DATABASE};
use rowdelta_core::model::DataSource;
use rowdelta_core::snapshot::{RowProvider, RowSet};
use rowdelta_core::value::number::parse_decimal;
use rowdelta_core::{DateTimeValue, DateValue, RawValue, TimeValue};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};

/// Declared-type refinement of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declared {
    Boolean,
    Date,
    Time,
    DateTime,
    Decimal,
    Plain,
}

impl Declared {
    fn of(decl_type: Option<&str>) -> Self {
        let Some(decl) = decl_type else {
            return Declared::Plain;
        };
        let decl = decl.trim().to_ascii_uppercase();
        if decl.starts_with("BOOL") {
            Declared::Boolean
        } else if decl == "DATE" {
            Declared::Date
        } else if decl == "TIME" {
            Declared::Time
        } else if decl == "DATETIME" || decl.starts_with("TIMESTAMP") {
            Declared::DateTime
        } else if decl.starts_with("DECIMAL") || decl.starts_with("NUMERIC") {
            Declared::Decimal
        } else {
            Declared::Plain
        }
    }

    fn to_raw(self, value: ValueRef<'_>) -> RawValue {
        match value {
            ValueRef::Null => RawValue::Null,
            ValueRef::Integer(i) if self == Declared::Boolean => RawValue::Bool(i != 0),
            ValueRef::Integer(i) => RawValue::Int(i),
            ValueRef::Real(f) => RawValue::Float(f),
            ValueRef::Text(bytes) => self.refine_text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => RawValue::Bytes(bytes.to_vec()),
        }
    }

    fn refine_text(self, text: String) -> RawValue {
        let refined = match self {
            Declared::Date => DateValue::parse(&text).ok().map(|d| RawValue::Date(d.naive())),
            Declared::Time => TimeValue::parse(&text).ok().map(|t| RawValue::Time(t.naive())),
            Declared::DateTime => DateTimeValue::parse(&text)
                .ok()
                .map(|dt| RawValue::DateTime(dt.naive())),
            Declared::Decimal => parse_decimal(&text).ok().map(RawValue::Decimal),
            Declared::Boolean | Declared::Plain => None,
        };
        refined.unwrap_or(RawValue::Text(text))
    }
}

/// Bind form of a request parameter
fn to_sql(value: &RawValue) -> SqlValue {
    match value {
        RawValue::Null => SqlValue::Null,
        RawValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
        RawValue::Int(i) => SqlValue::Integer(*i),
        RawValue::Float(f) => SqlValue::Real(*f),
        RawValue::Decimal(d) => SqlValue::Text(d.to_string()),
        RawValue::Text(s) => SqlValue::Text(s.clone()),
        RawValue::Bytes(b) => SqlValue::Blob(b.clone()),
        RawValue::Date(d) => SqlValue::Text(d.format("%Y-%m-%d").to_string()),
        RawValue::Time(t) => SqlValue::Text(t.format("%H:%M:%S%.f").to_string()),
        RawValue::DateTime(dt) => SqlValue::Text(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        RawValue::Other { text, .. } => SqlValue::Text(text.clone()),
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Reads data sources through a borrowed connection.
///
/// The caller keeps ownership of the connection and may keep writing
/// through it between capture points.
#[derive(Debug, Clone, Copy)]
pub struct SqliteProvider<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteProvider<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &'c Connection {
        self.conn
    }

    fn query(&self, source_name: &str, sql: &str, params: &[RawValue]) -> Result<RowSet> {
        let mut stmt = self.conn.prepare(sql).map_err(access(source_name))?;
        let (columns, declared): (Vec<String>, Vec<Declared>) = stmt
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), Declared::of(c.decl_type())))
            .unzip();

        let mut rows = stmt
            .query(params_from_iter(params.iter().map(to_sql)))
            .map_err(access(source_name))?;
        let mut set = RowSet {
            columns,
            rows: Vec::new(),
        };
        while let Some(row) = rows.next().map_err(access(source_name))? {
            let values = declared
                .iter()
                .enumerate()
                .map(|(i, decl)| row.get_ref(i).map(|v| decl.to_raw(v)))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(access(source_name))?;
            set.rows.push(values);
        }

        tracing::debug!(
            source = source_name,
            row_count = set.rows.len(),
            "sqlite read"
        );
        Ok(set)
    }
}

impl RowProvider for SqliteProvider<'_> {
    /// Tables are read in primary-key order; requests in the order their
    /// SQL produces.
    fn read(&self, source: &DataSource) -> Result<RowSet> {
        match source {
            DataSource::Table(table) => {
                let pk = self.primary_key_columns(table.name())?;
                let mut sql = format!("SELECT * FROM {}", quote_identifier(table.name()));
                if !pk.is_empty() {
                    let order: Vec<String> = pk.iter().map(|c| quote_identifier(c)).collect();
                    sql.push_str(" ORDER BY ");
                    sql.push_str(&order.join(", "));
                }
                self.query(table.name(), &sql, &[])
            }
            DataSource::Request(request) => {
                self.query(request.sql(), request.sql(), request.parameters())
            }
        }
    }

    fn primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        let sql = format!("PRAGMA table_info({})", quote_identifier(table));
        let mut stmt = self.conn.prepare(&sql).map_err(access(table))?;
        let mut keyed: Vec<(i64, String)> = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(5)?, row.get::<_, String>(1)?)))
            .map_err(access(table))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(access(table))?
            .into_iter()
            .filter(|(position, _)| *position > 0)
            .collect();
        keyed.sort_by_key(|(position, _)| *position);
        Ok(keyed.into_iter().map(|(_, name)| name).collect())
    }

    fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(access(DATABASE))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(access(DATABASE))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(access(DATABASE))?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_refinement() {
        assert_eq!(Declared::of(Some("boolean")), Declared::Boolean);
        assert_eq!(Declared::of(Some("DECIMAL(10,2)")), Declared::Decimal);
        assert_eq!(Declared::of(Some("TIMESTAMP")), Declared::DateTime);
        assert_eq!(Declared::of(Some("VARCHAR(20)")), Declared::Plain);
        assert_eq!(Declared::of(None), Declared::Plain);
    }

    #[test]
    fn test_unparseable_text_stays_text() {
        assert_eq!(
            Declared::Date.to_raw(ValueRef::Text(b"someday")),
            RawValue::Text("someday".into())
        );
        assert_eq!(
            Declared::Boolean.to_raw(ValueRef::Integer(0)),
            RawValue::Bool(false)
        );
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(quote_identifier("movie"), "\"movie\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
