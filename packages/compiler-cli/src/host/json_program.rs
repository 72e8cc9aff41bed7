// JSON Program Host
//
// Resolver over declarations a front end serialized to JSON:
//
//   {
//     "files": [
//       { "path": "app/Sample.kt", "package": "app", "declarations": [ ... ] }
//     ],
//     "declarations": [ ... ]
//   }
//
// Declarations listed under a file inherit its path and package. Top-level declarations
// carry no origin unless they name one themselves.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::processor::reflection::{Declaration, Resolver, SourceFile, TypeReference, TypeTarget};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramModel {
    #[serde(default)]
    pub files: Vec<SourceUnit>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// Declarations read from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceUnit {
    pub path: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// Resolver over one or more program models. Declarations are kept sorted by qualified
/// name so every pass sees targets in the same order.
#[derive(Debug, Clone, Default)]
pub struct JsonProgramHost {
    declarations: IndexMap<String, Declaration>,
}

impl JsonProgramHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Self> {
        let mut host = JsonProgramHost::new();
        for path in paths {
            let path = path.as_ref();
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            let model: ProgramModel = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid program model {}: {}", path.display(), e))?;
            host.add_model(model)?;
        }
        Ok(host)
    }

    pub fn from_model(model: ProgramModel) -> anyhow::Result<Self> {
        let mut host = JsonProgramHost::new();
        host.add_model(model)?;
        Ok(host)
    }

    pub fn add_model(&mut self, model: ProgramModel) -> anyhow::Result<()> {
        for unit in model.files {
            let file = SourceFile::new(unit.path);
            for mut declaration in unit.declarations {
                if declaration.containing_file.is_none() {
                    declaration.containing_file = Some(file.clone());
                }
                if declaration.package.is_empty() {
                    declaration.package = unit.package.clone();
                }
                self.insert(declaration)?;
            }
        }
        for declaration in model.declarations {
            self.insert(declaration)?;
        }
        self.declarations.sort_keys();
        Ok(())
    }

    fn insert(&mut self, declaration: Declaration) -> anyhow::Result<()> {
        if declaration.qualified_name.is_empty() {
            anyhow::bail!("declaration `{}` has no qualified name", declaration.simple_name);
        }
        if self.declarations.contains_key(&declaration.qualified_name) {
            anyhow::bail!("duplicate declaration `{}`", declaration.qualified_name);
        }
        self.declarations
            .insert(declaration.qualified_name.clone(), declaration);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&Declaration> {
        self.declarations.get(qualified_name)
    }
}

impl Resolver for JsonProgramHost {
    fn find_annotated(&self, marker: &str) -> Vec<Declaration> {
        self.declarations
            .values()
            .filter(|d| d.annotations_of(marker).next().is_some())
            .cloned()
            .collect()
    }

    fn resolve_declaration(&self, type_ref: &TypeReference) -> Option<Declaration> {
        match &type_ref.target {
            TypeTarget::Declaration(name) => self.declarations.get(name).cloned(),
            TypeTarget::Parameter(_) => None,
        }
    }
}
