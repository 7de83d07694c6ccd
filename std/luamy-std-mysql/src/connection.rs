///
/// Connection handle exposed to Lua as `MySQL.Connection` userdata.
///
/// Owns at most one native session. `connected` is true exactly while the
/// session is open; `release()` is the single path that ends a session and
/// is safe to run any number of times (explicit `close()`, then the
/// collector's drop).
///

use luamy_std_core::BindingError;
use mlua::prelude::*;
use tracing::{debug, info, warn};

use crate::driver::{Driver, QueryOutcome, Session};
use crate::escape::escape_bytes;
use crate::options::ConnectOptions;
use crate::result::ResultSet;

pub struct Connection {
    session: Option<Box<dyn Session>>,
    connected: bool,
}

/// What a successful `query` hands back to the script
pub enum QueryReply {
    Rows(ResultSet),
    Done { affected_rows: u64, insert_id: u64 },
}

impl Connection {
    /// Open a session through `driver`. A failed attempt leaves nothing behind.
    pub fn connect(driver: &dyn Driver, options: &ConnectOptions) -> Result<Self, BindingError> {
        debug!(host = %options.host, port = options.port, user = %options.user, "connecting");
        match driver.connect(options) {
            Ok(session) => Ok(Self {
                session: Some(session),
                connected: true,
            }),
            Err(e) => {
                let err = BindingError::Connection(e.message);
                warn!(kind = err.type_name(), host = %options.host, port = options.port, "{}", err);
                Err(err)
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn session(&mut self) -> Result<&mut dyn Session, BindingError> {
        match self.session.as_deref_mut() {
            Some(session) if self.connected => Ok(session),
            _ => Err(BindingError::NotConnected),
        }
    }

    /// End the session if one is open. Always succeeds.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            if self.connected {
                session.close();
            }
        }
        self.connected = false;
    }

    pub fn ping(&mut self) -> Result<(), BindingError> {
        self.session()?
            .ping()
            .map_err(|e| BindingError::query("ping", e.message))
    }

    pub fn select_db(&mut self, name: &str) -> Result<(), BindingError> {
        self.session()?
            .select_db(name)
            .map_err(|e| BindingError::query("select_db", e.message))?;
        debug!(database = name, "selected database");
        Ok(())
    }

    pub fn query(&mut self, sql: &str) -> Result<QueryReply, BindingError> {
        let outcome = self
            .session()?
            .query(sql)
            .map_err(|e| BindingError::query("query", e.message))?;
        match outcome {
            QueryOutcome::Rows(buffer) => {
                debug!(rows = buffer.num_rows(), fields = buffer.num_fields(), "query returned rows");
                Ok(QueryReply::Rows(ResultSet::new(buffer)))
            }
            QueryOutcome::Done { affected_rows, insert_id } => {
                debug!(affected_rows, insert_id, "query completed");
                Ok(QueryReply::Done { affected_rows, insert_id })
            }
        }
    }

    pub fn escape_string(&mut self, text: &[u8]) -> Result<Vec<u8>, BindingError> {
        let mode = self.session()?.escape_mode();
        Ok(escape_bytes(text, mode))
    }

    fn address(&self) -> *const () {
        match &self.session {
            Some(session) => &**session as *const dyn Session as *const (),
            None => std::ptr::null(),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.connected {
            info!("releasing unclosed MySQL connection");
        }
        self.release();
    }
}

/// Lua integers are signed; counts above `i64::MAX` keep their bits and
/// read back negative.
fn to_lua_count(n: u64) -> i64 {
    n as i64
}

impl LuaUserData for Connection {
    fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
        methods.add_method_mut("close", |_, this, ()| {
            this.release();
            Ok(true)
        });

        methods.add_method_mut("ping", |_, this, ()| {
            this.ping().into_lua_err()?;
            Ok(true)
        });

        let select_db = |_: &Lua, this: &mut Connection, name: String| -> LuaResult<bool> {
            this.select_db(&name).into_lua_err()?;
            Ok(true)
        };
        methods.add_method_mut("select_db", select_db);
        methods.add_method_mut("select_database", select_db);

        methods.add_method_mut("query", |lua, this, sql: String| {
            match this.query(&sql).into_lua_err()? {
                QueryReply::Rows(result) => result.into_lua_multi(lua),
                QueryReply::Done { affected_rows, insert_id } => {
                    (true, to_lua_count(affected_rows), to_lua_count(insert_id)).into_lua_multi(lua)
                }
            }
        });

        methods.add_method_mut("escape_string", |lua, this, text: LuaString| {
            let escaped = this.escape_string(&text.as_bytes()).into_lua_err()?;
            lua.create_string(&escaped)
        });

        methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| {
            Ok(format!("MySQL connection ({:p})", this.address()))
        });
    }
}
