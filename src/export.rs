/*!
 * TSV glossary export.
 *
 * Column order and header text are read by downstream tooling and must
 * not change: source text, type, translation, origin. Found rows come
 * first, then not-found rows with an empty translation.
 *
 * Fields are written raw, without csv quoting. Tabs and line breaks inside
 * a field become spaces so every row keeps exactly four columns.
 */

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::translation::TranslationResult;

/// Header row of the glossary
pub const TSV_HEADER: [&str; 4] = ["原文", "类型", "译名", "来源"];

/// Origin recorded for names without a translation
pub const NOT_FOUND_MARKER: &str = "未找到";

/// One glossary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsvRow {
    pub source_text: String,
    pub entity_type: String,
    pub translation: String,
    pub origin: String,
}

fn field(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

/// Glossary rows for a result, in export order
pub fn rows(result: &TranslationResult) -> Vec<TsvRow> {
    let found = result.found.iter().map(|item| TsvRow {
        source_text: field(&item.text),
        entity_type: field(item.kind.as_tag()),
        translation: field(&item.translation),
        origin: field(&item.source),
    });

    let not_found = result.not_found.iter().map(|item| TsvRow {
        source_text: field(&item.text),
        entity_type: field(item.kind.as_tag()),
        translation: String::new(),
        origin: NOT_FOUND_MARKER.to_string(),
    });

    found.chain(not_found).collect()
}

/// Write the glossary to any writer
pub fn write_tsv<W: Write>(result: &TranslationResult, writer: W) -> Result<(), AppError> {
    let mut tsv = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    tsv.write_record(TSV_HEADER)?;
    for row in rows(result) {
        tsv.write_record([&row.source_text, &row.entity_type, &row.translation, &row.origin])?;
    }
    tsv.flush()?;

    Ok(())
}

/// Write the glossary to `path`, creating parent directories as needed
pub fn export_tsv<P: AsRef<Path>>(result: &TranslationResult, path: P) -> Result<(), AppError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        FileManager::ensure_dir(parent)?;
    }

    let file = std::fs::File::create(path)
        .map_err(|e| AppError::File(format!("Failed to create {:?}: {}", path, e)))?;
    write_tsv(result, file)
}

/// Parse a glossary back into rows, skipping the header
pub fn read_tsv<R: Read>(reader: R) -> Result<Vec<TsvRow>, AppError> {
    let mut tsv = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .from_reader(reader);

    let headers = tsv.headers()?.clone();
    if headers.iter().ne(TSV_HEADER.iter().copied()) {
        return Err(AppError::Export(format!("Unexpected header row: {:?}", headers)));
    }

    let mut rows = Vec::new();
    for record in tsv.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        rows.push(TsvRow {
            source_text: field(0),
            entity_type: field(1),
            translation: field(2),
            origin: field(3),
        });
    }

    Ok(rows)
}
