//! Parquet round-trip drift check (enabled with `--features parquet`).
//!
//! Some Arrow types do not come back from a Parquet file exactly as they were
//! written. `schema_drift` writes a zero-row file with the schema into memory,
//! reads the schema back and lists the top-level columns that changed.

use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use arrow_schema::{DataType, Schema as ArrowSchema, SchemaRef};

use crate::error::Result;

/// One column whose type or nullability differs after a Parquet round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDrift {
    pub name: String,
    pub written: DataType,
    pub read: DataType,
    pub written_nullable: bool,
    pub read_nullable: bool,
}

/// Schema as a Parquet reader reports it after writing `schema`.
pub fn roundtrip_schema(schema: &SchemaRef) -> Result<SchemaRef> {
    let mut buf = Vec::new();
    let writer = ArrowWriter::try_new(&mut buf, schema.clone(), None)?;
    writer.close()?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(buf))?;
    Ok(builder.schema().clone())
}

pub fn schema_drift(schema: &ArrowSchema) -> Result<Vec<FieldDrift>> {
    let written = SchemaRef::new(schema.clone());
    let read = roundtrip_schema(&written)?;
    Ok(diff_schemas(&written, &read))
}

/// Top-level columns of `written` whose type or nullability differ in `read`.
/// A column missing from `read` is reported as a nullable `Null`.
pub fn diff_schemas(written: &ArrowSchema, read: &ArrowSchema) -> Vec<FieldDrift> {
    let mut drift = Vec::new();
    for field in written.fields() {
        let (read_type, read_nullable) = match read.field_with_name(field.name()) {
            Ok(back) => (back.data_type().clone(), back.is_nullable()),
            Err(_) => (DataType::Null, true),
        };
        if &read_type != field.data_type() || read_nullable != field.is_nullable() {
            drift.push(FieldDrift {
                name: field.name().clone(),
                written: field.data_type().clone(),
                read: read_type,
                written_nullable: field.is_nullable(),
                read_nullable,
            });
        }
    }
    drift
}
