///
/// Production driver over the blocking `mysql` crate.
///
/// Queries run on the text protocol, so every non-NULL cell arrives as the
/// server's textual rendering and is kept byte-for-byte. All rows are read
/// before `query` returns. The escape mode follows the
/// `SERVER_STATUS_NO_BACKSLASH_ESCAPES` flag the server reports on every
/// reply, whatever statement changed it.
///

use std::sync::Once;

use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, Value};
use tracing::{debug, info};

use crate::driver::{BufferedResult, Driver, DriverError, FieldDescriptor, QueryOutcome, RawRow, Session};
use crate::escape::EscapeMode;
use crate::options::ConnectOptions;

const CLIENT_NAME: &str = "mysql-rs";

static LIBRARY_INIT: Once = Once::new();

impl From<mysql::Error> for DriverError {
    fn from(e: mysql::Error) -> Self {
        match e {
            mysql::Error::MySqlError(err) => DriverError::with_code(err.code, err.message),
            other => DriverError::new(other.to_string()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDriver;

impl Driver for MysqlDriver {
    /// The pure-Rust client keeps no process-wide state, so there is nothing
    /// to set up; this only logs once that the client is ready.
    fn init(&self) {
        LIBRARY_INIT.call_once(|| {
            debug!(client = CLIENT_NAME, "native client ready");
        });
    }

    fn client_info(&self) -> String {
        format!("{} (luamy {})", CLIENT_NAME, env!("CARGO_PKG_VERSION"))
    }

    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Session>, DriverError> {
        let builder = OptsBuilder::new()
            .ip_or_hostname(Some(options.host.clone()))
            .tcp_port(options.port)
            .user(Some(options.user.clone()))
            .pass(Some(options.password.clone()))
            .db_name(options.database().map(str::to_string));

        let conn = Conn::new(builder)?;
        info!(host = %options.host, port = options.port, "MySQL session opened");
        Ok(Box::new(MysqlSession { conn }))
    }
}

struct MysqlSession {
    conn: Conn,
}

impl MysqlSession {
    fn run_query(&mut self, sql: &str) -> Result<QueryOutcome, DriverError> {
        let mut result = self.conn.query_iter(sql)?;

        let fields: Vec<FieldDescriptor> = result
            .columns()
            .as_ref()
            .iter()
            .map(|column| {
                FieldDescriptor::new(
                    column.name_str().into_owned(),
                    column.column_type() as u8,
                    column.column_length() as u64,
                    column.flags().bits() as u32,
                )
            })
            .collect();

        if fields.is_empty() {
            return Ok(QueryOutcome::Done {
                affected_rows: result.affected_rows(),
                insert_id: result.last_insert_id().unwrap_or(0),
            });
        }

        let mut rows = Vec::new();
        for row in result.by_ref() {
            let row = row?;
            rows.push(row.unwrap().into_iter().map(cell_bytes).collect::<RawRow>());
        }
        Ok(QueryOutcome::Rows(BufferedResult::new(fields, rows)))
    }
}

/// Text-protocol cells are always `Bytes` or `NULL`; anything else is
/// rendered the way the server would print it.
fn cell_bytes(value: Value) -> Option<Vec<u8>> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(bytes),
        other => {
            let literal = other.as_sql(true);
            let text = literal
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
                .unwrap_or(&literal);
            Some(text.as_bytes().to_vec())
        }
    }
}

impl Session for MysqlSession {
    fn ping(&mut self) -> Result<(), DriverError> {
        self.conn.ping()?;
        Ok(())
    }

    fn select_db(&mut self, name: &str) -> Result<(), DriverError> {
        self.conn.select_db(name)?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<QueryOutcome, DriverError> {
        self.run_query(sql)
    }

    fn escape_mode(&self) -> EscapeMode {
        if self.conn.no_backslash_escape() {
            EscapeMode::QuoteDoubling
        } else {
            EscapeMode::Backslash
        }
    }

    fn close(self: Box<Self>) {
        let id = self.conn.connection_id();
        drop(self.conn);
        info!(connection_id = id, "MySQL session closed");
    }
}
