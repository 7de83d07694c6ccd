///
/// Native client seam.
///
/// The binding never talks to a wire protocol itself. A `Driver` opens
/// sessions; a `Session` runs blocking calls against one open server
/// session. Query results come back fully buffered as a `BufferedResult`,
/// so a result set never borrows from the session that produced it.
///

use thiserror::Error;

use crate::escape::EscapeMode;
use crate::options::ConnectOptions;

/// Error text reported by the native client
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    pub code: Option<u16>,
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}

/// Column metadata, mirroring the native field descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_tag: u8,
    /// Declared display length from the column definition
    pub length: u64,
    /// Longest value observed in the buffered rows
    pub max_length: u64,
    pub flags: u32,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_tag: u8, length: u64, flags: u32) -> Self {
        Self {
            name: name.into(),
            type_tag,
            length,
            max_length: 0,
            flags,
        }
    }
}

/// One buffered row: a cell per column, `None` for SQL NULL
pub type RawRow = Vec<Option<Vec<u8>>>;

/// A result set held entirely in memory with a row cursor
#[derive(Debug, Clone)]
pub struct BufferedResult {
    fields: Vec<FieldDescriptor>,
    rows: Vec<RawRow>,
    cursor: usize,
}

impl BufferedResult {
    pub fn new(mut fields: Vec<FieldDescriptor>, rows: Vec<RawRow>) -> Self {
        for row in &rows {
            for (field, cell) in fields.iter_mut().zip(row) {
                if let Some(bytes) = cell {
                    field.max_length = field.max_length.max(bytes.len() as u64);
                }
            }
        }
        Self {
            fields,
            rows,
            cursor: 0,
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn seek(&mut self, row: usize) {
        self.cursor = row.min(self.rows.len());
    }

    /// Advance the cursor, yielding the column descriptors with the row.
    /// `None` once every row has been returned.
    pub fn next_row(&mut self) -> Option<(&[FieldDescriptor], &[Option<Vec<u8>>])> {
        let row = self.rows.get(self.cursor)?;
        self.cursor += 1;
        Some((&self.fields, row))
    }
}

#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The statement produced tabular data
    Rows(BufferedResult),
    /// The statement completed without a result set
    Done { affected_rows: u64, insert_id: u64 },
}

/// One open server session. Every call blocks until the server answers.
pub trait Session {
    fn ping(&mut self) -> Result<(), DriverError>;

    fn select_db(&mut self, name: &str) -> Result<(), DriverError>;

    fn query(&mut self, sql: &str) -> Result<QueryOutcome, DriverError>;

    /// How string literals must be escaped for the session's current SQL mode
    fn escape_mode(&self) -> EscapeMode {
        EscapeMode::Backslash
    }

    /// End the session. Consumes the handle so it cannot be closed twice.
    fn close(self: Box<Self>);
}

pub trait Driver {
    /// One-time library initialization, run before the first session opens
    fn init(&self) {}

    /// Client library version string
    fn client_info(&self) -> String;

    /// Open a session. On failure nothing allocated for the attempt survives.
    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Session>, DriverError>;
}
