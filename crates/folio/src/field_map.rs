//! External ↔ storage field naming.

/// An immutable lookup table from external (public) field names to storage
/// column names.
///
/// Names without an entry pass through unchanged, so a table only needs to
/// list the fields whose spelling differs (`imageUrl` → `image_url`).
///
/// ```ignore
/// const PROJECT_FIELDS: FieldMap = FieldMap::new(&[
///     ("imageUrl", "image_url"),
///     ("githubUrl", "github_url"),
/// ]);
/// assert_eq!(PROJECT_FIELDS.resolve("imageUrl"), "image_url");
/// assert_eq!(PROJECT_FIELDS.resolve("name"), "name");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    /// A map with no entries: every name resolves to itself.
    pub const EMPTY: FieldMap = FieldMap { entries: &[] };

    /// Create a map from `(external, storage)` pairs.
    ///
    /// External names are expected to be unique; on duplicates the first entry wins.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve an external field name to its storage column name.
    pub fn resolve<'a>(&self, external: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|&&(ext, _)| ext == external)
            .map_or(external, |&(_, column)| column)
    }

    /// Reverse lookup: the external name for a storage column.
    pub fn external_name<'a>(&self, column: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|&&(_, col)| col == column)
            .map_or(column, |&(ext, _)| ext)
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::EMPTY
    }
}
