//! Per-build resolution state: the catalog, the (immutable) options, where we
//! are in the record tree, and which records are currently being expanded.

use arrowmodel_core::{Catalog, Error, FieldPath, Result, SchemaOptions};

pub struct ResolveContext<'a> {
    catalog: &'a Catalog,
    options: SchemaOptions,
    path: FieldPath,
    /// Records on the current descent, root first. A revisit is a cycle.
    visiting: Vec<String>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(catalog: &'a Catalog, options: SchemaOptions) -> Self {
        Self {
            catalog,
            options,
            path: FieldPath::root(),
            visiting: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.visiting.len()
    }

    /// Run `f` with `name` appended to the current path.
    pub fn in_field<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let child = self.path.child(name);
        let parent = std::mem::replace(&mut self.path, child);
        let out = f(self);
        self.path = parent;
        out
    }

    /// Run `f` while `record` is marked as being expanded.
    pub fn in_record<T>(
        &mut self,
        record: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if let Some(start) = self.visiting.iter().position(|r| r == record) {
            let mut cycle: Vec<&str> = self.visiting[start..].iter().map(String::as_str).collect();
            cycle.push(record);
            return Err(Error::CyclicStructure {
                path: self.path.clone(),
                cycle: cycle.join(" -> "),
            });
        }
        self.visiting.push(record.to_string());
        let out = f(self);
        self.visiting.pop();
        out
    }
}
