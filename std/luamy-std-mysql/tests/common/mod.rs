//!
//! In-memory stand-in for a MySQL server.
//!
//! Canned responses are keyed by exact SQL text. `SELECT '<literal>'` is
//! answered by unescaping the literal, which lets tests check that escaped
//! strings survive a round trip. Every open session is counted so tests can
//! assert that nothing leaks.
//!

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use luamy_std_mysql::types::mysql_type;
use luamy_std_mysql::{
    BufferedResult, ConnectOptions, Driver, DriverError, EscapeMode, FieldDescriptor,
    QueryOutcome, Session,
};

#[derive(Clone)]
pub enum Response {
    Rows(BufferedResult),
    Done { affected_rows: u64, insert_id: u64 },
    Fail(String),
    /// Succeeds and switches the server's `NO_BACKSLASH_ESCAPES` status, the
    /// way a stored procedure running `SET sql_mode` would
    SwitchQuoteMode { no_backslash_escapes: bool },
}

#[derive(Default)]
struct ServerState {
    unreachable: bool,
    down: bool,
    no_backslash_escapes: bool,
    databases: Vec<String>,
    responses: HashMap<String, Response>,
    live_sessions: usize,
    init_calls: usize,
    last_options: Option<ConnectOptions>,
}

#[derive(Clone, Default)]
pub struct FakeServer {
    state: Arc<Mutex<ServerState>>,
}

impl FakeServer {
    pub fn new() -> Self {
        let server = Self::default();
        server.state.lock().unwrap().databases = vec!["shop".to_string(), "audit".to_string()];
        server
    }

    pub fn driver(&self) -> Arc<dyn Driver> {
        Arc::new(FakeDriver {
            state: Arc::clone(&self.state),
        })
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unwrap().unreachable = unreachable;
    }

    pub fn set_down(&self, down: bool) {
        self.state.lock().unwrap().down = down;
    }

    pub fn set_no_backslash_escapes(&self, enabled: bool) {
        self.state.lock().unwrap().no_backslash_escapes = enabled;
    }

    pub fn respond(&self, sql: &str, response: Response) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(sql.to_string(), response);
    }

    pub fn live_sessions(&self) -> usize {
        self.state.lock().unwrap().live_sessions
    }

    pub fn init_calls(&self) -> usize {
        self.state.lock().unwrap().init_calls
    }

    pub fn last_options(&self) -> Option<ConnectOptions> {
        self.state.lock().unwrap().last_options.clone()
    }
}

pub fn cell(s: &str) -> Option<Vec<u8>> {
    Some(s.as_bytes().to_vec())
}

/// `products(id INT, name VARCHAR, price DECIMAL, note TEXT)` with three rows
pub fn products() -> Response {
    let fields = vec![
        FieldDescriptor::new("id", mysql_type::LONG, 11, 0x4203),
        FieldDescriptor::new("name", mysql_type::VAR_STRING, 255, 0x1001),
        FieldDescriptor::new("price", mysql_type::NEWDECIMAL, 10, 0x0001),
        FieldDescriptor::new("note", mysql_type::BLOB, 65535, 0x0010),
    ];
    let rows = vec![
        vec![cell("1"), cell("widget"), cell("9.99"), None],
        vec![cell("2"), cell("gadget"), cell("24.50"), cell("fragile")],
        vec![cell("3"), cell("gizmo"), cell("0.75"), Some(b"a\0b".to_vec())],
    ];
    Response::Rows(BufferedResult::new(fields, rows))
}

struct FakeDriver {
    state: Arc<Mutex<ServerState>>,
}

impl Driver for FakeDriver {
    fn init(&self) {
        self.state.lock().unwrap().init_calls += 1;
    }

    fn client_info(&self) -> String {
        "fake-client 8.0.36".to_string()
    }

    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Session>, DriverError> {
        // Allocate first, then try to open, the way native clients do.
        let session = FakeSession::allocate(Arc::clone(&self.state));
        let mut state = self.state.lock().unwrap();
        state.last_options = Some(options.clone());
        if state.unreachable {
            drop(state);
            drop(session);
            return Err(DriverError::with_code(
                2002,
                format!("Can't connect to MySQL server on '{}:{}' (111)", options.host, options.port),
            ));
        }
        Ok(Box::new(session))
    }
}

struct FakeSession {
    state: Arc<Mutex<ServerState>>,
    database: Option<String>,
}

impl FakeSession {
    fn allocate(state: Arc<Mutex<ServerState>>) -> Self {
        state.lock().unwrap().live_sessions += 1;
        Self {
            state,
            database: None,
        }
    }

    fn mode(&self) -> EscapeMode {
        if self.state.lock().unwrap().no_backslash_escapes {
            EscapeMode::QuoteDoubling
        } else {
            EscapeMode::Backslash
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.live_sessions = state
            .live_sessions
            .checked_sub(1)
            .expect("session released twice");
    }
}

fn syntax_error() -> DriverError {
    DriverError::with_code(
        1064,
        "You have an error in your SQL syntax; check the manual for the right syntax to use",
    )
}

/// Decode the body of a quoted literal; `None` if the quote closes early
fn unescape_literal(body: &[u8], mode: EscapeMode) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        let b = body[i];
        match (mode, b) {
            (EscapeMode::Backslash, b'\\') => {
                let next = *body.get(i + 1)?;
                out.push(match next {
                    b'0' => 0,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b'Z' => 0x1a,
                    other => other,
                });
                i += 2;
            }
            (_, b'\'') => {
                if body.get(i + 1) != Some(&b'\'') {
                    return None;
                }
                out.push(b'\'');
                i += 2;
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }
    Some(out)
}

impl Session for FakeSession {
    fn ping(&mut self) -> Result<(), DriverError> {
        if self.state.lock().unwrap().down {
            return Err(DriverError::with_code(2006, "MySQL server has gone away"));
        }
        Ok(())
    }

    fn select_db(&mut self, name: &str) -> Result<(), DriverError> {
        let known = self.state.lock().unwrap().databases.iter().any(|d| d == name);
        if !known {
            return Err(DriverError::with_code(1049, format!("Unknown database '{}'", name)));
        }
        self.database = Some(name.to_string());
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<QueryOutcome, DriverError> {
        if self.state.lock().unwrap().down {
            return Err(DriverError::with_code(2006, "MySQL server has gone away"));
        }

        if let Some(body) = sql.strip_prefix("SELECT '").and_then(|s| s.strip_suffix('\'')) {
            let value = unescape_literal(body.as_bytes(), self.mode()).ok_or_else(syntax_error)?;
            let fields = vec![FieldDescriptor::new("value", mysql_type::VAR_STRING, 255, 0)];
            return Ok(QueryOutcome::Rows(BufferedResult::new(fields, vec![vec![Some(value)]])));
        }

        let response = self.state.lock().unwrap().responses.get(sql).cloned();
        match response {
            Some(Response::Rows(buffer)) => Ok(QueryOutcome::Rows(buffer)),
            Some(Response::Done { affected_rows, insert_id }) => {
                Ok(QueryOutcome::Done { affected_rows, insert_id })
            }
            Some(Response::Fail(message)) => Err(DriverError::new(message)),
            Some(Response::SwitchQuoteMode { no_backslash_escapes }) => {
                self.state.lock().unwrap().no_backslash_escapes = no_backslash_escapes;
                Ok(QueryOutcome::Done {
                    affected_rows: 0,
                    insert_id: 0,
                })
            }
            None => Err(syntax_error()),
        }
    }

    fn escape_mode(&self) -> EscapeMode {
        self.mode()
    }

    fn close(self: Box<Self>) {}
}
