//! Declared-type model: records, their fields, and the type annotations the
//! resolver understands. Pure data; nothing here knows about Arrow.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single value inside a literal set or an enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            LiteralValue::Int(i) => write!(f, "{}", i),
            LiteralValue::Float(x) => write!(f, "{:?}", x),
            LiteralValue::Str(s) => write!(f, "'{}'", s),
            LiteralValue::Bytes(b) => write!(f, "b'{}'", String::from_utf8_lossy(b)),
        }
    }
}

/// Shape shared by literal sets and enum members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSetKind {
    Strings,
    Integers,
    Mixed,
    Empty,
}

/// Classify a set of values. Only all-string and all-integer sets are mappable.
pub fn value_set_kind<'a>(values: impl IntoIterator<Item = &'a LiteralValue>) -> ValueSetKind {
    let mut strings = 0usize;
    let mut ints = 0usize;
    let mut total = 0usize;
    for v in values {
        total += 1;
        match v {
            LiteralValue::Str(_) => strings += 1,
            LiteralValue::Int(_) => ints += 1,
            _ => {}
        }
    }
    if total == 0 {
        ValueSetKind::Empty
    } else if strings == total {
        ValueSetKind::Strings
    } else if ints == total {
        ValueSetKind::Integers
    } else {
        ValueSetKind::Mixed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub members: Vec<EnumMember>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Enum whose members are named after their string values.
    pub fn of_strings(name: impl Into<String>, values: &[&str]) -> Self {
        let members = values
            .iter()
            .map(|v| EnumMember {
                name: v.to_string(),
                value: LiteralValue::Str(v.to_string()),
            })
            .collect();
        Self::new(name, members)
    }

    pub fn kind(&self) -> ValueSetKind {
        value_set_kind(self.members.iter().map(|m| &m.value))
    }
}

/// Annotation metadata attached to a field (or to a `Constrained` type).
///
/// Numeric bounds and fixed-point parameters only; anything the resolver does
/// not consult is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub ge: Option<i64>,
    pub gt: Option<i64>,
    pub le: Option<i64>,
    pub lt: Option<i64>,
    pub max_digits: Option<u8>,
    pub decimal_places: Option<i8>,
}

impl Constraints {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ge(mut self, v: i64) -> Self {
        self.ge = Some(v);
        self
    }

    pub fn gt(mut self, v: i64) -> Self {
        self.gt = Some(v);
        self
    }

    pub fn le(mut self, v: i64) -> Self {
        self.le = Some(v);
        self
    }

    pub fn lt(mut self, v: i64) -> Self {
        self.lt = Some(v);
        self
    }

    pub fn decimal(mut self, max_digits: u8, decimal_places: i8) -> Self {
        self.max_digits = Some(max_digits);
        self.decimal_places = Some(decimal_places);
        self
    }

    /// Tightest declared lower bound, inclusive or exclusive.
    pub fn lower_bound(&self) -> Option<i64> {
        match (self.ge, self.gt) {
            (Some(ge), Some(gt)) => Some(ge.max(gt)),
            (ge, gt) => ge.or(gt),
        }
    }

    /// Members set on `inner` win; unset ones fall back to `self`.
    pub fn refined_by(&self, inner: &Constraints) -> Constraints {
        Constraints {
            ge: inner.ge.or(self.ge),
            gt: inner.gt.or(self.gt),
            le: inner.le.or(self.le),
            lt: inner.lt.or(self.lt),
            max_digits: inner.max_digits.or(self.max_digits),
            decimal_places: inner.decimal_places.or(self.decimal_places),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Constraints::default()
    }
}

/// Closed set of type annotations a field may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    Str,
    Bool,
    Int,
    Float,
    Bytes,
    Decimal,
    Date,
    Time,
    NaiveDatetime,
    AwareDatetime,
    /// Plain datetime; may or may not carry a timezone at runtime.
    Datetime,
    Uuid,
    Literal(Vec<LiteralValue>),
    Enum(EnumDef),
    List(Box<DeclaredType>),
    Map(Box<DeclaredType>, Box<DeclaredType>),
    /// Reference to a record in the catalog, by name.
    Record(String),
    Optional(Box<DeclaredType>),
    Constrained {
        inner: Box<DeclaredType>,
        constraints: Constraints,
    },
    /// An annotation with no mapping rule, kept verbatim for error reporting.
    Opaque(String),
}

impl DeclaredType {
    pub fn list(element: DeclaredType) -> Self {
        DeclaredType::List(Box::new(element))
    }

    pub fn map(key: DeclaredType, value: DeclaredType) -> Self {
        DeclaredType::Map(Box::new(key), Box::new(value))
    }

    pub fn optional(inner: DeclaredType) -> Self {
        DeclaredType::Optional(Box::new(inner))
    }

    pub fn record(name: impl Into<String>) -> Self {
        DeclaredType::Record(name.into())
    }

    pub fn constrained(inner: DeclaredType, constraints: Constraints) -> Self {
        DeclaredType::Constrained {
            inner: Box::new(inner),
            constraints,
        }
    }

    /// Optional at the top level, looking through annotation wrappers.
    pub fn is_optional(&self) -> bool {
        match self {
            DeclaredType::Optional(_) => true,
            DeclaredType::Constrained { inner, .. } => inner.is_optional(),
            _ => false,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Str => f.write_str("str"),
            DeclaredType::Bool => f.write_str("bool"),
            DeclaredType::Int => f.write_str("int"),
            DeclaredType::Float => f.write_str("float"),
            DeclaredType::Bytes => f.write_str("bytes"),
            DeclaredType::Decimal => f.write_str("Decimal"),
            DeclaredType::Date => f.write_str("date"),
            DeclaredType::Time => f.write_str("time"),
            DeclaredType::NaiveDatetime => f.write_str("NaiveDatetime"),
            DeclaredType::AwareDatetime => f.write_str("AwareDatetime"),
            DeclaredType::Datetime => f.write_str("datetime"),
            DeclaredType::Uuid => f.write_str("UUID"),
            DeclaredType::Literal(values) => {
                f.write_str("Literal[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            DeclaredType::Enum(def) => f.write_str(&def.name),
            DeclaredType::List(e) => write!(f, "List[{}]", e),
            DeclaredType::Map(k, v) => write!(f, "Dict[{}, {}]", k, v),
            DeclaredType::Record(name) => f.write_str(name),
            DeclaredType::Optional(inner) => write!(f, "Optional[{}]", inner),
            DeclaredType::Constrained { inner, .. } => write!(f, "Annotated[{}, ...]", inner),
            DeclaredType::Opaque(text) => f.write_str(text),
        }
    }
}

/// One declared field of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: DeclaredType,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub alias: Option<String>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: DeclaredType) -> Self {
        Self {
            name: name.into(),
            ty,
            constraints: Constraints::default(),
            exclude: false,
            alias: None,
        }
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.ty.is_optional()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDef {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

impl RecordDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Named records and enums. Nested records are looked up here by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    records: BTreeMap<String, RecordDef>,
    enums: BTreeMap<String, EnumDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record, replacing any previous one with the same name.
    pub fn insert_record(&mut self, record: RecordDef) {
        self.records.insert(record.name.clone(), record);
    }

    pub fn insert_enum(&mut self, def: EnumDef) {
        self.enums.insert(def.name.clone(), def);
    }

    pub fn with_record(mut self, record: RecordDef) -> Self {
        self.insert_record(record);
        self
    }

    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.insert_enum(def);
        self
    }

    pub fn record(&self, name: &str) -> Option<&RecordDef> {
        self.records.get(name)
    }

    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordDef> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
