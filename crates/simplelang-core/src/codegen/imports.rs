//! Import bookkeeping for generated Go code

use super::EmitErrorKind;

/// A required Go import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Local name, if the import is aliased
    pub alias: Option<String>,
    /// Package path
    pub path: String,
}

/// Ordered, deduplicated set of imports
///
/// An entry is identified by its alias and path together. Reusing an alias for
/// a different path is an error.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    imports: Vec<Import>,
}

impl ImportTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an import, returning `true` if it was not already present
    pub fn register(&mut self, alias: Option<&str>, path: &str) -> Result<bool, EmitErrorKind> {
        for import in &self.imports {
            if import.path == path && import.alias.as_deref() == alias {
                return Ok(false);
            }
            if let Some(alias) = alias {
                if import.alias.as_deref() == Some(alias) {
                    return Err(EmitErrorKind::ImportAliasConflict {
                        alias: alias.to_string(),
                        existing: import.path.clone(),
                        requested: path.to_string(),
                    });
                }
            }
        }

        tracing::trace!(?alias, path, "registered import");
        self.imports.push(Import {
            alias: alias.map(str::to_string),
            path: path.to_string(),
        });
        Ok(true)
    }

    /// Imports in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Render the parenthesized Go import block, one import per line
    #[must_use]
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::from("import (\n");
        for import in &self.imports {
            out.push_str(indent);
            if let Some(alias) = &import.alias {
                out.push_str(alias);
                out.push(' ');
            }
            out.push('"');
            out.push_str(&import.path);
            out.push_str("\"\n");
        }
        out.push_str(")\n");
        out
    }
}
