//! Shared parse state threaded through every chunk reader.

use serde::Serialize;

use super::cursor::{ByteCursor, Endian};
use super::resource_id::ResourceIdAllocator;
use crate::options::DecodeOptions;

/// A non-fatal inconsistency noticed while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Chunk or region the record belongs to.
    pub chunk: &'static str,
    pub message: String,
}

/// Cursor, id counter and diagnostics for one load.
///
/// Readers borrow the context mutably in the fixed chunk order; nothing in
/// here outlives the load.
#[derive(Debug)]
pub struct ParseContext {
    pub cursor: ByteCursor,
    pub ids: ResourceIdAllocator,
    pub options: DecodeOptions,
    diagnostics: Vec<Diagnostic>,
}

impl ParseContext {
    /// Start a load over `data`; structural chunks are big-endian.
    #[must_use]
    pub fn new(data: Vec<u8>, options: DecodeOptions) -> Self {
        Self {
            cursor: ByteCursor::new(data, Endian::Big),
            ids: ResourceIdAllocator::new(),
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic and emit it as a warning.
    pub fn diagnose(&mut self, chunk: &'static str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{chunk}: {message}");
        self.diagnostics.push(Diagnostic { chunk, message });
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Hand over the collected diagnostics, ending the load.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
