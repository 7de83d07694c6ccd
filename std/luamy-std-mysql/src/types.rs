///
/// Column type tag → conversion rule table.
///
/// Every column arrives as length-delimited text tagged with its MySQL field
/// type. The tag picks one of three rules:
/// - integer family: leading-numeric-prefix parse to i64
/// - floating/decimal family: leading-numeric-prefix parse to f64
/// - everything else, including unknown tags: bytes copied verbatim
///
/// The table is total over `u8`; no tag can make conversion fail.
///

use luamy_std_core::{parse_float_prefix, parse_int_prefix, DynamicValue};

/// MySQL field type tags as sent in column definitions.
pub mod mysql_type {
    pub const DECIMAL: u8 = 0x00;
    pub const TINY: u8 = 0x01;
    pub const SHORT: u8 = 0x02;
    pub const LONG: u8 = 0x03;
    pub const FLOAT: u8 = 0x04;
    pub const DOUBLE: u8 = 0x05;
    pub const NULL: u8 = 0x06;
    pub const TIMESTAMP: u8 = 0x07;
    pub const LONGLONG: u8 = 0x08;
    pub const INT24: u8 = 0x09;
    pub const DATE: u8 = 0x0A;
    pub const TIME: u8 = 0x0B;
    pub const DATETIME: u8 = 0x0C;
    pub const YEAR: u8 = 0x0D;
    pub const NEWDATE: u8 = 0x0E;
    pub const VARCHAR: u8 = 0x0F;
    pub const BIT: u8 = 0x10;
    pub const JSON: u8 = 0xF5;
    pub const NEWDECIMAL: u8 = 0xF6;
    pub const ENUM: u8 = 0xF7;
    pub const SET: u8 = 0xF8;
    pub const TINY_BLOB: u8 = 0xF9;
    pub const MEDIUM_BLOB: u8 = 0xFA;
    pub const LONG_BLOB: u8 = 0xFB;
    pub const BLOB: u8 = 0xFC;
    pub const VAR_STRING: u8 = 0xFD;
    pub const STRING: u8 = 0xFE;
    pub const GEOMETRY: u8 = 0xFF;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionRule {
    Integer,
    Float,
    Raw,
}

pub fn conversion_rule(type_tag: u8) -> ConversionRule {
    use mysql_type::*;

    match type_tag {
        TINY | SHORT | LONG | INT24 | LONGLONG => ConversionRule::Integer,
        FLOAT | DOUBLE | DECIMAL | NEWDECIMAL => ConversionRule::Float,
        _ => ConversionRule::Raw,
    }
}

/// Human-readable type name reported by `field_info()`
pub fn type_display_name(type_tag: u8) -> &'static str {
    use mysql_type::*;

    match type_tag {
        TINY => "TINYINT",
        SHORT => "SMALLINT",
        LONG => "INT",
        INT24 => "MEDIUMINT",
        LONGLONG => "BIGINT",
        DECIMAL | NEWDECIMAL => "DECIMAL",
        FLOAT => "FLOAT",
        DOUBLE => "DOUBLE",
        BIT => "BIT",
        TIMESTAMP => "TIMESTAMP",
        DATE => "DATE",
        TIME => "TIME",
        DATETIME => "DATETIME",
        YEAR => "YEAR",
        STRING => "CHAR",
        VAR_STRING => "VARCHAR",
        BLOB => "BLOB",
        SET => "SET",
        ENUM => "ENUM",
        NULL => "NULL",
        _ => "UNKNOWN",
    }
}

/// Convert one column value. SQL NULL (`None`) is absent regardless of type.
pub fn convert_value(type_tag: u8, raw: Option<&[u8]>) -> DynamicValue {
    let Some(bytes) = raw else {
        return DynamicValue::Absent;
    };
    match conversion_rule(type_tag) {
        ConversionRule::Integer => DynamicValue::Integer(parse_int_prefix(bytes)),
        ConversionRule::Float => DynamicValue::Float(parse_float_prefix(bytes)),
        ConversionRule::Raw => DynamicValue::Bytes(bytes.to_vec()),
    }
}
