// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `tde.yaml` configuration.
//!
//! ```yaml
//! catalogs:
//!   - shapes.yaml
//! aliases:
//!   circle: com.acme.Circle
//! output:
//!   indent: 4
//!   declaration: true
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tde::xml::WriterOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog files, relative to the config file.
    pub catalogs: Vec<PathBuf>,
    /// Extra tag aliases, `alias: type`.
    pub aliases: BTreeMap<String, String>,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub indent: usize,
    pub declaration: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: false,
        }
    }
}

impl OutputConfig {
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions::default()
            .with_indent(self.indent)
            .with_declaration(self.declaration)
    }
}

impl Config {
    pub fn parse(yaml: &str) -> anyhow::Result<Self> {
        // An empty file is a valid, default configuration.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("invalid configuration")
    }

    /// Load `path`; catalog paths become relative to its directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let mut config = Self::parse(&yaml).with_context(|| format!("in {}", path.display()))?;
        if let Some(dir) = path.parent() {
            for catalog in &mut config.catalogs {
                if catalog.is_relative() {
                    *catalog = dir.join(&*catalog);
                }
            }
        }
        Ok(config)
    }
}
