//! Schema Builder: walk a record's fields in declaration order and assemble
//! the columnar schema.

use arrowmodel_core::{
    Catalog, Error, Field, FieldDecl, FieldPath, RecordDef, Result, Schema, SchemaOptions,
};

use crate::context::ResolveContext;
use crate::resolver::resolve_nullable;

/// Build the columnar schema for `record`.
///
/// Nested records are looked up in `catalog` and expanded under the same
/// `options`. The result is built fresh on every call.
pub fn build_schema(
    catalog: &Catalog,
    record: &RecordDef,
    options: &SchemaOptions,
) -> Result<Schema> {
    let mut ctx = ResolveContext::new(catalog, *options);
    let schema = Schema::new(build_fields(record, &mut ctx)?);

    #[cfg(feature = "tracing")]
    {
        let fingerprint = schema.fingerprint().map(|fp| fp.short()).unwrap_or_default();
        tracing::debug!(record = %record.name, fields = schema.len(), %fingerprint, "built schema");
    }

    Ok(schema)
}

/// Build the schema for the catalog record called `name`.
pub fn build_schema_by_name(
    catalog: &Catalog,
    name: &str,
    options: &SchemaOptions,
) -> Result<Schema> {
    let record = catalog.record(name).ok_or_else(|| Error::UnknownRecord {
        path: FieldPath::root(),
        name: name.to_string(),
    })?;
    build_schema(catalog, record, options)
}

/// Column name for `decl` under the naming policy.
pub fn emitted_name<'d>(decl: &'d FieldDecl, options: &SchemaOptions) -> &'d str {
    match (&decl.alias, options.by_alias) {
        (Some(alias), true) => alias.as_str(),
        _ => decl.name.as_str(),
    }
}

pub(crate) fn build_fields(record: &RecordDef, ctx: &mut ResolveContext<'_>) -> Result<Vec<Field>> {
    ctx.in_record(&record.name, |ctx| {
        let mut fields = Vec::with_capacity(record.fields.len());
        for decl in &record.fields {
            if decl.exclude && ctx.options().exclude_fields {
                #[cfg(feature = "tracing")]
                tracing::trace!(record = %record.name, field = %decl.name, "excluded");
                continue;
            }

            // Paths use declared names so errors point at the declaration.
            let (data_type, nullable) =
                ctx.in_field(&decl.name, |ctx| resolve_nullable(&decl.ty, &decl.constraints, ctx))?;

            #[cfg(feature = "tracing")]
            tracing::trace!(
                record = %record.name,
                field = %decl.name,
                depth = ctx.depth(),
                ty = %decl.ty,
                ?data_type,
                nullable,
                "resolved field"
            );

            fields.push(Field::new(emitted_name(decl, ctx.options()), data_type, nullable));
        }
        Ok(fields)
    })
}
