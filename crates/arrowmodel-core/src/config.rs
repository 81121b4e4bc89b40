//! Mapping policy that callers can serialize/deserialize.

use serde::{Deserialize, Serialize};

/// Policy flags threaded unchanged through every level of a schema build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Omit fields marked `exclude` instead of emitting them.
    pub exclude_fields: bool,

    /// Map aware and ambiguous datetimes to timezone-less timestamps instead
    /// of failing. Values are still converted to UTC when written.
    pub allow_losing_tz: bool,

    /// Emit declared aliases as column names where a field has one.
    pub by_alias: bool,
}

impl SchemaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_fields(mut self, yes: bool) -> Self {
        self.exclude_fields = yes;
        self
    }

    pub fn allow_losing_tz(mut self, yes: bool) -> Self {
        self.allow_losing_tz = yes;
        self
    }

    pub fn by_alias(mut self, yes: bool) -> Self {
        self.by_alias = yes;
        self
    }
}
