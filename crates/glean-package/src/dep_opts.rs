//! Per-dependency option overrides
//!
//! A dependency-options file lets the invoker append to or replace the cmake
//! arguments of individual dependencies without editing their manifests.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How an override combines with the arguments a manifest already declares
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MergeKind {
    #[default]
    Append,
    Replace,
}

/// One override entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyOption {
    pub dep_name: String,
    pub opt_name: OptionName,
    pub opt_value: Vec<String>,
    #[serde(default)]
    pub merge_type: MergeKind,
}

/// Names an override may target. Closed set; only cmake args for now.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OptionName {
    CmakeArgs,
}

/// Parsed dependency-options file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DependencyOptions {
    #[serde(default)]
    pub values: Vec<DependencyOption>,
}

impl DependencyOptions {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_str(&content)?)
    }

    /// Override entry for a dependency, if any
    pub fn get(&self, dep_name: &str) -> Option<&DependencyOption> {
        self.values.iter().find(|d| d.dep_name == dep_name)
    }

    /// Combine a dependency's manifest-declared cmake args with its override
    pub fn cmake_args_for(&self, dep_name: &str, declared: &[String]) -> Vec<String> {
        match self.get(dep_name) {
            None => declared.to_vec(),
            Some(opt) => match opt.merge_type {
                MergeKind::Replace => opt.opt_value.clone(),
                MergeKind::Append => {
                    let mut args = declared.to_vec();
                    args.extend(opt.opt_value.iter().cloned());
                    args
                }
            },
        }
    }
}
