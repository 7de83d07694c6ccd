//!
//! Host Value Representation
//!
//! Every value that crosses from the native client into Lua is first turned
//! into a `DynamicValue`. The variants mirror what a Lua script can observe:
//! - Integer and Float map to Lua integers and numbers
//! - Bytes maps to a Lua string and may hold embedded zeros
//! - Absent maps to nil
//!
//! Rows are assembled into a `Row`, which keeps insertion order and exposes
//! each column twice: under its name (converted value) and under its 1-based
//! ordinal (raw text). Callers index by either.
//!

use indexmap::IndexMap;
use mlua::prelude::*;

/// A dynamically typed value handed to the host runtime
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Absent,
}

impl DynamicValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, DynamicValue::Absent)
    }
}

impl From<Option<&[u8]>> for DynamicValue {
    fn from(value: Option<&[u8]>) -> Self {
        match value {
            Some(bytes) => DynamicValue::Bytes(bytes.to_vec()),
            None => DynamicValue::Absent,
        }
    }
}

impl IntoLua for DynamicValue {
    fn into_lua(self, lua: &Lua) -> LuaResult<LuaValue> {
        match self {
            DynamicValue::Integer(i) => Ok(LuaValue::Integer(i)),
            DynamicValue::Float(f) => Ok(LuaValue::Number(f)),
            DynamicValue::Bytes(b) => lua.create_string(b).map(LuaValue::String),
            DynamicValue::Absent => Ok(LuaValue::Nil),
        }
    }
}

/// Key of a row entry: a column name or a 1-based column position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Name(String),
    Ordinal(i64),
}

/// A single row keyed by both column name and ordinal position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: IndexMap<RowKey, DynamicValue>,
}

impl Row {
    pub fn with_columns(columns: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(columns * 2),
        }
    }

    /// Store one column: `converted` under its name, `raw` under `ordinal`.
    /// A later column with a duplicate name replaces the earlier value.
    pub fn push_column(&mut self, name: &str, ordinal: usize, converted: DynamicValue, raw: DynamicValue) {
        self.entries.insert(RowKey::Name(name.to_string()), converted);
        self.entries.insert(RowKey::Ordinal(ordinal as i64), raw);
    }

    pub fn by_name(&self, name: &str) -> Option<&DynamicValue> {
        self.entries.get(&RowKey::Name(name.to_string()))
    }

    pub fn by_ordinal(&self, ordinal: i64) -> Option<&DynamicValue> {
        self.entries.get(&RowKey::Ordinal(ordinal))
    }
}

impl IntoLua for Row {
    fn into_lua(self, lua: &Lua) -> LuaResult<LuaValue> {
        let table = lua.create_table_with_capacity(0, self.entries.len())?;
        for (key, value) in self.entries {
            // nil values leave the slot empty, which is how Lua spells SQL NULL
            match key {
                RowKey::Name(name) => table.raw_set(name, value)?,
                RowKey::Ordinal(ordinal) => table.raw_set(ordinal, value)?,
            }
        }
        Ok(LuaValue::Table(table))
    }
}
