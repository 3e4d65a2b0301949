//! Fixed-layout DOCX synthesis for supervision records.
//!
//! Renders a stand-by (witness) supervision record into the bureaucratic
//! table layout the supervision bureau expects: a centered title, one main
//! information table with label/content rows, and a trailing signature
//! block. The layout is a compile-time constant ([`schema::STANDBY_SCHEMA`])
//! consumed by a single generic table emitter — the visual contract is
//! fixed, not data-driven.
//!
//! Output is a standard OPC container (`[Content_Types].xml`,
//! `_rels/.rels`, `word/document.xml`) packaged with the `zip` crate.

pub mod docx;
pub mod error;
pub mod schema;
pub mod standby;
mod xml;

pub use error::DocError;
pub use standby::{generate_standby_document, save_document, standby_filename, SupervisionDocData};

/// MIME type of generated documents.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
