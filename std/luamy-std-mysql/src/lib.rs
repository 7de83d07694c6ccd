///
/// luamy MySQL Client Support
///
/// Provides MySQL access to Lua scripts through two userdata types and a
/// module table registered with the host runtime.
///
/// Architecture:
/// - `Connection` owns one native session (`Box<dyn Session>`) plus a
///   connected flag. Dropping the userdata (Lua's collector) or calling
///   `close()` releases the session exactly once.
/// - `ResultSet` owns one fully buffered result (`BufferedResult`). Rows
///   are materialized before `query` returns, so no borrow of the session
///   outlives the call.
/// - The native client sits behind the `Driver` / `Session` traits;
///   `MysqlDriver` is the production implementation over the `mysql` crate.
/// - Errors are `BindingError`s raised into Lua as external errors.
///
/// Functions:
/// - Module: connect, version
/// - Connection: close, ping, select_db (alias select_database), query,
///   escape_string, __tostring
/// - Result: fetch, fetch_all, num_rows, num_fields, field_info, close,
///   __tostring
///

pub mod types;
pub mod driver;
pub mod client;
pub mod options;
pub mod escape;
pub mod connection;
pub mod result;
pub mod module;

pub use client::MysqlDriver;
pub use connection::Connection;
pub use driver::*;
pub use escape::{escape_bytes, EscapeMode};
pub use module::{register, register_with_driver};
pub use options::ConnectOptions;
pub use result::ResultSet;
