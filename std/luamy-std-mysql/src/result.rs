///
/// Result handle exposed to Lua as `MySQL.Result` userdata.
///
/// Wraps one fully buffered result set. Rows are converted on the way out:
/// each column appears under its name (converted per its type tag) and under
/// its 1-based position (raw bytes). Once released, every method raises
/// `Invalid result object`.
///

use luamy_std_core::{BindingError, DynamicValue, Row};
use mlua::prelude::*;
use tracing::debug;

use crate::driver::{BufferedResult, FieldDescriptor};
use crate::types::{convert_value, type_display_name};

pub struct ResultSet {
    buffer: Option<BufferedResult>,
}

/// Build the dual-keyed row for one buffered record
pub fn convert_row(fields: &[FieldDescriptor], raw: &[Option<Vec<u8>>]) -> Row {
    let mut row = Row::with_columns(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let cell = raw.get(i).and_then(|c| c.as_deref());
        row.push_column(
            &field.name,
            i + 1,
            convert_value(field.type_tag, cell),
            DynamicValue::from(cell),
        );
    }
    row
}

impl ResultSet {
    pub fn new(buffer: BufferedResult) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    pub fn is_live(&self) -> bool {
        self.buffer.is_some()
    }

    fn buffer(&mut self) -> Result<&mut BufferedResult, BindingError> {
        self.buffer.as_mut().ok_or(BindingError::InvalidResult)
    }

    /// Next row, or `None` at end of data
    pub fn fetch(&mut self) -> Result<Option<Row>, BindingError> {
        let buffer = self.buffer()?;
        Ok(buffer.next_row().map(|(fields, raw)| convert_row(fields, raw)))
    }

    /// Every row from the first one on, regardless of earlier `fetch` calls
    pub fn fetch_all(&mut self) -> Result<Vec<Row>, BindingError> {
        let buffer = self.buffer()?;
        buffer.seek(0);
        let mut rows = Vec::with_capacity(buffer.num_rows());
        while let Some((fields, raw)) = buffer.next_row() {
            rows.push(convert_row(fields, raw));
        }
        Ok(rows)
    }

    pub fn num_rows(&mut self) -> Result<usize, BindingError> {
        Ok(self.buffer()?.num_rows())
    }

    pub fn num_fields(&mut self) -> Result<usize, BindingError> {
        Ok(self.buffer()?.num_fields())
    }

    pub fn field_info(&mut self) -> Result<Vec<FieldDescriptor>, BindingError> {
        Ok(self.buffer()?.fields().to_vec())
    }

    /// Drop the buffered rows now instead of waiting for the collector
    pub fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            debug!(rows = buffer.num_rows(), "released MySQL result");
        }
    }
}

impl Drop for ResultSet {
    fn drop(&mut self) {
        self.release();
    }
}

fn field_table(lua: &Lua, field: &FieldDescriptor) -> LuaResult<LuaTable> {
    let table = lua.create_table_with_capacity(0, 5)?;
    table.raw_set("name", field.name.as_str())?;
    table.raw_set("type", type_display_name(field.type_tag))?;
    table.raw_set("length", field.length as i64)?;
    table.raw_set("max_length", field.max_length as i64)?;
    table.raw_set("flags", field.flags as i64)?;
    Ok(table)
}

impl LuaUserData for ResultSet {
    fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
        methods.add_method_mut("fetch", |lua, this, ()| match this.fetch().into_lua_err()? {
            Some(row) => row.into_lua(lua),
            None => Ok(LuaValue::Nil),
        });

        methods.add_method_mut("fetch_all", |lua, this, ()| {
            let rows = this.fetch_all().into_lua_err()?;
            let table = lua.create_table_with_capacity(rows.len(), 0)?;
            for (i, row) in rows.into_iter().enumerate() {
                table.raw_set(i + 1, row)?;
            }
            Ok(table)
        });

        methods.add_method_mut("num_rows", |_, this, ()| {
            Ok(this.num_rows().into_lua_err()? as i64)
        });

        methods.add_method_mut("num_fields", |_, this, ()| {
            Ok(this.num_fields().into_lua_err()? as i64)
        });

        methods.add_method_mut("field_info", |lua, this, ()| {
            let fields = this.field_info().into_lua_err()?;
            let table = lua.create_table_with_capacity(fields.len(), 0)?;
            for (i, field) in fields.iter().enumerate() {
                table.raw_set(i + 1, field_table(lua, field)?)?;
            }
            Ok(table)
        });

        methods.add_method_mut("close", |_, this, ()| {
            this.release();
            Ok(true)
        });

        methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| {
            Ok(match &this.buffer {
                Some(buffer) => format!(
                    "MySQL result (rows: {}, fields: {})",
                    buffer.num_rows(),
                    buffer.num_fields()
                ),
                None => "MySQL result (closed)".to_string(),
            })
        });
    }
}
