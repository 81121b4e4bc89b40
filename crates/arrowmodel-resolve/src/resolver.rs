//! Type Resolver: one declared type (plus constraints) → one columnar type.
//!
//! Rules are applied by exhaustive match over `DeclaredType`, so adding a
//! declared-type family forces a decision here at compile time. Nothing is
//! ever defaulted: a type without a rule is an `UnsupportedType` error.

use arrowmodel_core::model::{value_set_kind, ValueSetKind};
use arrowmodel_core::schema::{MAX_DECIMAL_PRECISION, TimeUnit};
use arrowmodel_core::{ColumnType, Constraints, DeclaredType, EnumDef, Error, Field, Result};

use crate::builder::build_fields;
use crate::context::ResolveContext;

/// Child name Arrow uses for list elements.
pub const LIST_ITEM_NAME: &str = "item";
pub const MAP_KEY_NAME: &str = "key";
pub const MAP_VALUE_NAME: &str = "value";

/// Resolve `ty` and report whether it was declared optional.
///
/// Nullability is decided here, per level: an element of a list is nullable
/// only if the element type itself is optional.
pub fn resolve_nullable(
    ty: &DeclaredType,
    constraints: &Constraints,
    ctx: &mut ResolveContext<'_>,
) -> Result<(ColumnType, bool)> {
    let data_type = resolve(ty, constraints, ctx)?;
    Ok((data_type, ty.is_optional()))
}

/// Resolve a declared type to its columnar type, ignoring top-level optionality.
pub fn resolve(
    ty: &DeclaredType,
    constraints: &Constraints,
    ctx: &mut ResolveContext<'_>,
) -> Result<ColumnType> {
    match ty {
        DeclaredType::Str => Ok(ColumnType::Utf8),
        DeclaredType::Bool => Ok(ColumnType::Boolean),
        DeclaredType::Bytes => Ok(ColumnType::Binary),
        // No narrowing: overflow and precision loss are the writer's problem.
        DeclaredType::Float => Ok(ColumnType::Float64),
        DeclaredType::Int => Ok(int_type(constraints)),
        DeclaredType::Decimal => decimal_type(constraints, ctx),
        DeclaredType::Date => Ok(ColumnType::Date32),
        DeclaredType::Time => Ok(ColumnType::Time64(TimeUnit::Microsecond)),
        DeclaredType::NaiveDatetime => Ok(timestamp_ms()),
        DeclaredType::AwareDatetime => tz_losing_timestamp("AwareDatetime", ctx),
        DeclaredType::Datetime => tz_losing_timestamp("datetime", ctx),
        DeclaredType::Uuid => Ok(ColumnType::Uuid),
        DeclaredType::Literal(values) => match value_set_kind(values) {
            ValueSetKind::Strings => Ok(ColumnType::Dictionary),
            // Literal ints carry exact values, not a bound: always signed.
            ValueSetKind::Integers => Ok(ColumnType::Int64),
            ValueSetKind::Mixed | ValueSetKind::Empty => Err(Error::UnsupportedType {
                path: ctx.path().clone(),
                ty: format!(
                    "{} (literal sets must be all strings or all integers)",
                    ty
                ),
            }),
        },
        DeclaredType::Enum(def) => enum_type(def, ctx),
        DeclaredType::List(element) => {
            let (item_type, item_nullable) = resolve_nullable(element, constraints, ctx)?;
            Ok(ColumnType::list(Field::new(
                LIST_ITEM_NAME,
                item_type,
                item_nullable,
            )))
        }
        DeclaredType::Map(key, value) => {
            if key.is_optional() {
                return Err(Error::NullableMapKey {
                    path: ctx.path().clone(),
                });
            }
            let key_type = resolve(key, constraints, ctx)?;
            let (value_type, value_nullable) = resolve_nullable(value, constraints, ctx)?;
            Ok(ColumnType::Map {
                key: Box::new(Field::new(MAP_KEY_NAME, key_type, false)),
                value: Box::new(Field::new(MAP_VALUE_NAME, value_type, value_nullable)),
            })
        }
        DeclaredType::Record(name) => {
            let record = ctx
                .catalog()
                .record(name)
                .ok_or_else(|| Error::UnknownRecord {
                    path: ctx.path().clone(),
                    name: name.clone(),
                })?;
            Ok(ColumnType::Struct(build_fields(record, ctx)?))
        }
        DeclaredType::Optional(inner) => resolve(inner, constraints, ctx),
        DeclaredType::Constrained {
            inner,
            constraints: annotated,
        } => resolve(inner, &constraints.refined_by(annotated), ctx),
        DeclaredType::Opaque(text) => Err(Error::UnsupportedType {
            path: ctx.path().clone(),
            ty: text.clone(),
        }),
    }
}

/// Unsigned when the declared lower bound rules out negatives.
fn int_type(constraints: &Constraints) -> ColumnType {
    match constraints.lower_bound() {
        Some(min) if min >= 0 => ColumnType::UInt64,
        _ => ColumnType::Int64,
    }
}

fn decimal_type(constraints: &Constraints, ctx: &ResolveContext<'_>) -> Result<ColumnType> {
    let (Some(precision), Some(scale)) = (constraints.max_digits, constraints.decimal_places)
    else {
        return Err(Error::DecimalParametersMissing {
            path: ctx.path().clone(),
        });
    };
    if precision == 0
        || precision > MAX_DECIMAL_PRECISION
        || scale < 0
        || i16::from(scale) > i16::from(precision)
    {
        return Err(Error::InvalidDecimalParameters {
            path: ctx.path().clone(),
            precision,
            scale,
        });
    }
    Ok(ColumnType::Decimal { precision, scale })
}

fn timestamp_ms() -> ColumnType {
    ColumnType::Timestamp {
        unit: TimeUnit::Millisecond,
        timezone: None,
    }
}

fn tz_losing_timestamp(ty: &'static str, ctx: &ResolveContext<'_>) -> Result<ColumnType> {
    if ctx.options().allow_losing_tz {
        Ok(timestamp_ms())
    } else {
        Err(Error::TimezoneLoss {
            path: ctx.path().clone(),
            ty,
        })
    }
}

fn enum_type(def: &EnumDef, ctx: &ResolveContext<'_>) -> Result<ColumnType> {
    match def.kind() {
        ValueSetKind::Strings => Ok(ColumnType::Dictionary),
        ValueSetKind::Integers => Ok(ColumnType::Int64),
        ValueSetKind::Mixed | ValueSetKind::Empty => Err(Error::UnsupportedType {
            path: ctx.path().clone(),
            ty: format!(
                "enum {} (members must be all strings or all integers)",
                def.name
            ),
        }),
    }
}
