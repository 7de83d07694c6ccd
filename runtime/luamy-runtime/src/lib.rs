///
/// luamy Runtime Module
///
/// Entry points that put the bindings in front of a Lua interpreter:
/// - `luaopen_mysql` (feature `module`) for `require("mysql")` from a
///   stock interpreter loading this crate as a shared library
/// - `preload()` for hosts embedding Lua through mlua
///
/// Both install a stderr log subscriber unless the host already set one.
///

use mlua::prelude::*;
use tracing::debug;

pub use luamy_std_core::*;
pub use luamy_std_mysql::*;

pub const MODULE_NAME: &str = "mysql";

/// Install the default log subscriber; a subscriber set by the host wins
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

/// Make `require("mysql")` available in `lua`
pub fn preload(lua: &Lua) -> LuaResult<()> {
    init_tracing();
    let package: LuaTable = lua.globals().get("package")?;
    let loaders: LuaTable = package.get("preload")?;
    loaders.set(
        MODULE_NAME,
        lua.create_function(|lua, _: LuaMultiValue| luamy_std_mysql::register(lua))?,
    )?;
    debug!(module = MODULE_NAME, "installed package.preload entry");
    Ok(())
}

#[cfg(feature = "module")]
#[mlua::lua_module]
fn mysql(lua: &Lua) -> LuaResult<LuaTable> {
    init_tracing();
    luamy_std_mysql::register(lua)
}
