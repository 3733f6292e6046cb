/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Declarative frame configuration
//!
//! A [`FrameConfig`] lists columns with their type, optional permission and values, and can be
//! loaded from YAML or JSON:
//!
//! ```yaml
//! columns:
//!   - name: lat
//!     type: double
//!     values: [-65.0, -66.6, -67.2]
//!   - name: station_id
//!     type: string
//!     permission: read_only
//!     values: ["00000", "00001", "00002"]
//! ```
//!
//! [`FrameConfig::build`] appends the columns in order to a new frame of either layout, then marks
//! the read-only columns.

use crate::DataType;
use crate::Frame;
use crate::Permission;
use crate::Scalar;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub permission: Permission,
    #[serde(default)]
    pub values: Vec<ConfigValue>,
}

/// A scalar as written in a config document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ConfigValue {
    fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Int(value) => Some(*value as f64),
            ConfigValue::Float(value) => Some(*value),
            ConfigValue::Text(_) => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            ConfigValue::Text(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FrameConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML frame config")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON frame config")
    }

    /// Load a config file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame config: {:?}", path))?;
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        config.with_context(|| format!("Invalid frame config: {:?}", path))
    }

    /// Build a frame holding every configured column
    pub fn build<F: Frame + Default>(&self) -> Result<F> {
        let mut frame = F::default();
        for column in &self.columns {
            column.append_to(&mut frame)?;
        }
        for column in &self.columns {
            if column.permission == Permission::ReadOnly {
                frame.set_column_permission(&column.name, Permission::ReadOnly)?;
            }
        }
        info!(
            columns = frame.column_count(),
            rows = frame.row_count(),
            "Built data frame from config"
        );
        Ok(frame)
    }
}

impl ColumnConfig {
    fn append_to<F: Frame>(&self, frame: &mut F) -> Result<()> {
        let appended = match self.data_type {
            DataType::Int8 => self.append_integers::<i8, F>(frame),
            DataType::Int16 => self.append_integers::<i16, F>(frame),
            DataType::Int32 => self.append_integers::<i32, F>(frame),
            DataType::Int64 => self.append_integers::<i64, F>(frame),
            DataType::Float => {
                let values = self.convert(|value| value.as_f64().map(|value| value as f32))?;
                frame.append_new_column(&self.name, &values)
            }
            DataType::Double => {
                let values = self.convert(ConfigValue::as_f64)?;
                frame.append_new_column(&self.name, &values)
            }
            DataType::String => {
                let values = self.convert(ConfigValue::as_text)?;
                frame.append_new_column(&self.name, &values)
            }
        };
        appended.with_context(|| format!("Failed to add column \"{}\"", self.name))
    }

    fn append_integers<T, F>(&self, frame: &mut F) -> Result<()>
    where
        T: Scalar + TryFrom<i64>,
        F: Frame,
    {
        let values = self.convert(|value| value.as_i64().and_then(|value| T::try_from(value).ok()))?;
        frame.append_new_column(&self.name, &values)
    }

    fn convert<T>(&self, convert: impl Fn(&ConfigValue) -> Option<T>) -> Result<Vec<T>> {
        self.values
            .iter()
            .enumerate()
            .map(|(position, value)| match convert(value) {
                Some(converted) => Ok(converted),
                None => bail!(
                    "Value {:?} at position {} of column \"{}\" is not a valid {}",
                    value,
                    position,
                    self.name,
                    self.data_type
                ),
            })
            .collect()
    }
}
