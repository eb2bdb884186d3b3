// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML type catalog loader.
//!
//! # Example YAML
//!
//! ```yaml
//! # shapes.yaml
//! types:
//!   - name: com.acme.Shape
//!     kind: class
//!     abstract: true
//!     fields:
//!       - { name: label, type: String }
//!       - { name: origin, type: "int[]" }
//!
//!   - name: com.acme.Circle
//!     superclass: com.acme.Shape
//!     fields:
//!       - { name: radius, type: double }
//!       - { name: tags, type: "java.util.List<String>" }
//!
//!   - name: com.acme.Color
//!     kind: enum
//!     constants: [RED, GREEN, BLUE]
//! ```

use super::{TypeCatalog, TypeDecl};
use crate::types::{Modifiers, TypeKind};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors raised while loading a YAML catalog.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    /// The same type name is declared twice in one document.
    DuplicateType(String),
    /// A declaration is internally inconsistent.
    Invalid { type_name: String, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Yaml(e) => write!(f, "YAML error: {}", e),
            Self::DuplicateType(name) => write!(f, "Type declared twice: {}", name),
            Self::Invalid { type_name, reason } => {
                write!(f, "Invalid declaration of {}: {}", type_name, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

/// Root YAML document structure.
#[derive(Debug, Deserialize)]
pub struct YamlCatalogDocument {
    /// Declared types.
    #[serde(default)]
    pub types: Vec<YamlType>,
}

/// A single type declaration.
#[derive(Debug, Deserialize)]
pub struct YamlType {
    /// Fully-qualified binary name.
    pub name: String,

    /// class, interface or enum
    #[serde(default)]
    pub kind: YamlKind,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "final")]
    pub is_final: bool,

    #[serde(default)]
    pub superclass: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub type_params: Vec<String>,

    #[serde(default)]
    pub fields: Vec<YamlField>,

    /// Enum constants
    #[serde(default)]
    pub constants: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YamlKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A field declaration.
#[derive(Debug, Deserialize)]
pub struct YamlField {
    pub name: String,

    /// Java source type text (`int[]`, `String`, `java.util.Map<K, V>`).
    #[serde(rename = "type")]
    pub type_text: String,

    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// YAML type catalog loader.
pub struct YamlCatalogLoader;

impl YamlCatalogLoader {
    /// Load and parse a catalog file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<YamlCatalogDocument, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        log::debug!("[catalog] loading {}", path.as_ref().display());
        Self::parse_yaml(&content)
    }

    pub fn parse_yaml(yaml_content: &str) -> Result<YamlCatalogDocument, CatalogError> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }

    /// Add every declaration of `doc` to `catalog`.
    ///
    /// Declarations replace earlier ones of the same name, so project types
    /// can shadow the JDK bootstrap.
    pub fn apply(
        doc: &YamlCatalogDocument,
        catalog: &mut TypeCatalog,
    ) -> Result<usize, CatalogError> {
        let mut seen = HashSet::new();
        for ty in &doc.types {
            if !seen.insert(ty.name.as_str()) {
                return Err(CatalogError::DuplicateType(ty.name.clone()));
            }
            catalog.insert(Self::to_decl(ty)?);
        }
        Ok(doc.types.len())
    }

    /// Load a file straight into `catalog`.
    pub fn load_into<P: AsRef<Path>>(
        path: P,
        catalog: &mut TypeCatalog,
    ) -> Result<usize, CatalogError> {
        let doc = Self::load_from_file(path)?;
        Self::apply(&doc, catalog)
    }

    fn to_decl(ty: &YamlType) -> Result<TypeDecl, CatalogError> {
        let invalid = |reason: &str| CatalogError::Invalid {
            type_name: ty.name.clone(),
            reason: reason.to_string(),
        };
        if ty.name.trim().is_empty() {
            return Err(invalid("empty name"));
        }
        if ty.is_abstract && ty.is_final {
            return Err(invalid("abstract and final"));
        }
        if ty.kind != YamlKind::Enum && !ty.constants.is_empty() {
            return Err(invalid("constants on a non-enum type"));
        }
        if ty.kind == YamlKind::Interface && ty.superclass.is_some() {
            return Err(invalid("interfaces have no superclass"));
        }

        let mut decl = match ty.kind {
            YamlKind::Class => {
                let mut modifiers = Modifiers::NONE;
                if ty.is_abstract {
                    modifiers = modifiers | Modifiers::ABSTRACT;
                }
                if ty.is_final {
                    modifiers = modifiers | Modifiers::FINAL;
                }
                TypeDecl::new(ty.name.clone(), TypeKind::Class, modifiers)
            }
            YamlKind::Interface => TypeDecl::interface(ty.name.clone()),
            YamlKind::Enum => TypeDecl::enumeration(ty.name.clone(), ty.constants.iter().cloned()),
        };
        if let Some(superclass) = &ty.superclass {
            decl = decl.extends(superclass.clone());
        }
        for interface in &ty.interfaces {
            decl = decl.implements(interface.clone());
        }
        for param in &ty.type_params {
            decl = decl.type_param(param.clone());
        }
        for field in &ty.fields {
            let modifiers = if field.is_static {
                Modifiers::STATIC
            } else {
                Modifiers::NONE
            };
            decl = decl.field_with(field.name.clone(), field.type_text.clone(), modifiers);
        }
        Ok(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeResolver;
    use std::io::Write;

    const SHAPES: &str = r#"
types:
  - name: com.acme.Shape
    abstract: true
    fields:
      - { name: label, type: String }
      - { name: COUNT, type: int, static: true }
  - name: com.acme.Circle
    superclass: com.acme.Shape
    fields:
      - { name: radius, type: double }
  - name: com.acme.Color
    kind: enum
    constants: [RED, GREEN]
"#;

    #[test]
    fn test_parse_and_apply() {
        let doc = YamlCatalogLoader::parse_yaml(SHAPES).expect("parse");
        let mut catalog = TypeCatalog::with_jdk();
        assert_eq!(YamlCatalogLoader::apply(&doc, &mut catalog).unwrap(), 3);

        let shape = catalog.resolve_type("com.acme.Shape").unwrap().unwrap();
        assert!(shape.is_abstract());
        assert_eq!(catalog.fields_of(&shape).unwrap().len(), 2);

        let color = catalog.resolve_type("com.acme.Color").unwrap().unwrap();
        assert!(color.is_enum());
        assert_eq!(catalog.enum_constants(&color).unwrap(), vec!["RED", "GREEN"]);
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let doc = YamlCatalogLoader::parse_yaml("types:\n  - name: a.B\n  - name: a.B\n").unwrap();
        let err = YamlCatalogLoader::apply(&doc, &mut TypeCatalog::new()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateType(name) if name == "a.B"));
    }

    #[test]
    fn test_inconsistent_declarations() {
        for yaml in [
            "types:\n  - { name: a.B, abstract: true, final: true }\n",
            "types:\n  - { name: a.B, constants: [X] }\n",
            "types:\n  - { name: a.I, kind: interface, superclass: a.B }\n",
        ] {
            let doc = YamlCatalogLoader::parse_yaml(yaml).unwrap();
            assert!(matches!(
                YamlCatalogLoader::apply(&doc, &mut TypeCatalog::new()),
                Err(CatalogError::Invalid { .. })
            ));
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SHAPES.as_bytes()).unwrap();
        let mut catalog = TypeCatalog::new();
        YamlCatalogLoader::load_into(file.path(), &mut catalog).unwrap();
        assert!(catalog.contains("com.acme.Circle"));
    }
}
