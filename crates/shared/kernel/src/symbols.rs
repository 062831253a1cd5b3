//! Read-only access to the declarations of one compilation round.
//!
//! Generators never see a host compiler directly; they query a [`SymbolProvider`]. The
//! bundled [`SymbolTable`] answers those queries from a JSON snapshot.

use crate::error::{SealantError, SealantErrorExt};
use fxhash::FxHashSet;
use sealant_domain::names::ClassName;
use sealant_domain::symbols::{Annotation, AnnotationValue, Constructor, Declaration};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Query surface over the symbols of one round.
///
/// Implementors provide lookup and enumeration; everything else has a default built on top.
/// Enumeration must be deterministic: [`SymbolProvider::declarations`] yields declarations
/// sorted by fully-qualified name.
pub trait SymbolProvider: Send + Sync {
    fn declaration(&self, name: &ClassName) -> Option<&Declaration>;

    /// All declarations, sorted by fully-qualified name.
    fn declarations(&self) -> Box<dyn Iterator<Item = &Declaration> + '_>;

    fn declarations_annotated_with<'a>(
        &'a self,
        annotation: &'a ClassName,
    ) -> Box<dyn Iterator<Item = &'a Declaration> + 'a> {
        Box::new(self.declarations().filter(move |d| d.has_annotation(annotation)))
    }

    fn has_annotation(&self, declaration: &Declaration, annotation: &ClassName) -> bool {
        declaration.has_annotation(annotation)
    }

    /// Reads one annotation argument, by name first and by position as a fallback.
    ///
    /// # Errors
    /// Returns [`SealantError::InvalidConfiguration`] if the argument was passed both by name
    /// and at `index` positionally: the payload is ambiguous.
    fn annotation_argument<'a>(
        &self,
        owner: &Declaration,
        annotation: &'a Annotation,
        name: &str,
        index: Option<usize>,
    ) -> Result<Option<&'a AnnotationValue>, SealantError> {
        read_argument(owner, annotation, name, index)
    }

    /// Every supertype reachable from `declaration`, nearest first. Cycles in the snapshot
    /// are tolerated; each name appears once.
    fn all_supertypes(&self, declaration: &Declaration) -> Vec<ClassName> {
        let mut seen = FxHashSet::default();
        let mut ordered = Vec::new();
        let mut queue: Vec<&ClassName> = declaration.supertypes.iter().collect();
        seen.insert(declaration.name.clone());

        while !queue.is_empty() {
            let mut next = Vec::new();
            for name in queue {
                if !seen.insert(name.clone()) {
                    continue;
                }
                ordered.push(name.clone());
                if let Some(decl) = self.declaration(name) {
                    next.extend(decl.supertypes.iter());
                }
            }
            queue = next;
        }

        ordered
    }

    fn is_subtype_of(&self, declaration: &Declaration, supertype: &ClassName) -> bool {
        declaration.name == *supertype || self.all_supertypes(declaration).contains(supertype)
    }

    fn constructors<'a>(&self, declaration: &'a Declaration) -> &'a [Constructor] {
        &declaration.constructors
    }

    fn containing_source_file<'a>(&self, declaration: &'a Declaration) -> Option<&'a Path> {
        declaration.source_file.as_deref()
    }
}

/// Shared argument lookup used by the default [`SymbolProvider::annotation_argument`].
///
/// # Errors
/// See [`SymbolProvider::annotation_argument`].
pub fn read_argument<'a>(
    owner: &Declaration,
    annotation: &'a Annotation,
    name: &str,
    index: Option<usize>,
) -> Result<Option<&'a AnnotationValue>, SealantError> {
    let named = annotation.named(name);
    let positional = index.and_then(|i| annotation.positional(i));

    match (named, positional) {
        (Some(_), Some(_)) => Err(SealantError::configuration(
            &owner.name,
            format!(
                "argument '{name}' of {} is given both by name and at position {}",
                annotation.class,
                index.unwrap_or_default()
            ),
        )),
        (Some(value), None) | (None, Some(value)) => Ok(Some(value)),
        (None, None) => Ok(None),
    }
}

/// In-memory provider keyed by fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    declarations: BTreeMap<ClassName, Declaration>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    List(Vec<Declaration>),
    Wrapped { declarations: Vec<Declaration> },
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration.
    ///
    /// # Errors
    /// Returns [`SealantError::InvalidSnapshot`] if a declaration with the same name exists.
    pub fn insert(&mut self, declaration: Declaration) -> Result<(), SealantError> {
        if self.declarations.contains_key(&declaration.name) {
            return Err(SealantError::snapshot(format!(
                "duplicate declaration {}",
                declaration.name
            )));
        }
        self.declarations.insert(declaration.name.clone(), declaration);
        Ok(())
    }

    /// Parses a snapshot: either a bare array of declarations or `{"declarations": [...]}`.
    ///
    /// # Errors
    /// Returns [`SealantError::Json`] for malformed input and
    /// [`SealantError::InvalidSnapshot`] for duplicates.
    pub fn from_json_str(raw: &str) -> Result<Self, SealantError> {
        let repr: SnapshotRepr = serde_json::from_str(raw).context("Parsing symbol snapshot")?;
        let mut table = Self::new();
        table.extend_from(repr)?;
        Ok(table)
    }

    /// Loads a snapshot file, or every `*.json` file under a directory.
    ///
    /// Directory entries are read in path order so that duplicate detection is deterministic.
    ///
    /// # Errors
    /// Returns [`SealantError::Io`] when a file cannot be read, plus everything
    /// [`SymbolTable::from_json_str`] returns.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SealantError> {
        let path = path.as_ref();
        let mut table = Self::new();

        for file in snapshot_files(path)? {
            let raw = std::fs::read_to_string(&file)
                .context(format!("Reading snapshot {}", file.display()))?;
            let repr: SnapshotRepr = serde_json::from_str(&raw)
                .context(format!("Parsing snapshot {}", file.display()))?;
            table.extend_from(repr)?;
        }

        debug!(path = %path.display(), declarations = table.len(), "Symbol snapshot loaded");
        Ok(table)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn extend_from(&mut self, repr: SnapshotRepr) -> Result<(), SealantError> {
        let declarations = match repr {
            SnapshotRepr::List(list) | SnapshotRepr::Wrapped { declarations: list } => list,
        };
        declarations.into_iter().try_for_each(|d| self.insert(d))
    }
}

impl FromIterator<Declaration> for SymbolTable {
    /// Later duplicates replace earlier ones; use [`SymbolTable::insert`] to reject them.
    fn from_iter<T: IntoIterator<Item = Declaration>>(iter: T) -> Self {
        Self { declarations: iter.into_iter().map(|d| (d.name.clone(), d)).collect() }
    }
}

impl SymbolProvider for SymbolTable {
    fn declaration(&self, name: &ClassName) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    fn declarations(&self) -> Box<dyn Iterator<Item = &Declaration> + '_> {
        Box::new(self.declarations.values())
    }
}

fn snapshot_files(path: &Path) -> Result<Vec<PathBuf>, SealantError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            SealantError::snapshot(format!("walking {}: {e}", path.display()))
        })?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
