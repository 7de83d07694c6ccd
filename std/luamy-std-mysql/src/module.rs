///
/// Binding registry: builds the `mysql` module table.
///
/// The table holds the `connect` factory (the only way a script obtains a
/// `Connection`) and `version`, the client library version string. Method
/// tables and destructor hooks for both handle types come from their
/// `UserData` impls; mlua installs them the first time a value of each type
/// crosses into Lua.
///

use std::sync::Arc;

use mlua::prelude::*;
use tracing::debug;

use crate::client::MysqlDriver;
use crate::connection::Connection;
use crate::driver::Driver;
use crate::options::ConnectOptions;

/// Register the module backed by the `mysql` crate
pub fn register(lua: &Lua) -> LuaResult<LuaTable> {
    register_with_driver(lua, Arc::new(MysqlDriver))
}

/// Register the module backed by `driver`
pub fn register_with_driver(lua: &Lua, driver: Arc<dyn Driver>) -> LuaResult<LuaTable> {
    driver.init();

    let module = lua.create_table()?;
    let factory = Arc::clone(&driver);
    module.set(
        "connect",
        lua.create_function(move |lua, args| connect(lua, factory.as_ref(), args))?,
    )?;
    module.set("version", driver.client_info())?;

    debug!(version = %driver.client_info(), "registered mysql module");
    Ok(module)
}

type ConnectArgs = (LuaValue, Option<String>, Option<String>, Option<String>, Option<u16>);

fn connect(lua: &Lua, driver: &dyn Driver, args: ConnectArgs) -> LuaResult<Connection> {
    let (first, user, password, database, port) = args;
    let options = match first {
        LuaValue::Table(_) => {
            if user.is_some() || password.is_some() || database.is_some() || port.is_some() {
                return Err(LuaError::runtime(
                    "bad argument #2 to 'connect' (no further arguments expected after an options table)",
                ));
            }
            lua.from_value::<ConnectOptions>(first)?
        }
        LuaValue::Nil => ConnectOptions::from_positional(None, user, password, database, port),
        // Numbers stand in for strings, as everywhere else in the Lua API
        LuaValue::String(_) | LuaValue::Integer(_) | LuaValue::Number(_) => {
            ConnectOptions::from_positional(Some(first.to_string()?), user, password, database, port)
        }
        other => {
            return Err(LuaError::runtime(format!(
                "bad argument #1 to 'connect' (string or table expected, got {})",
                other.type_name()
            )));
        }
    };
    Connection::connect(driver, &options).into_lua_err()
}
