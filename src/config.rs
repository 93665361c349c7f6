// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration file and environment overrides
//!
//! Nothing here is read implicitly: callers load a [`FrameworxConfig`] and pass
//! its parts to [`crate::repair::Repair::run`] and [`crate::mesh::render_stl`].

use crate::geometry::CapMode;
use crate::mesh::RenderOptions;
use crate::repair::RepairConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up by [`FrameworxConfig::load`] from the working directory
pub const CONFIG_FILE: &str = "frameworx.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworxConfig {
    pub repair: RepairConfig,
    pub render: RenderOptions,
}

impl FrameworxConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: FrameworxConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `frameworx.toml` if present, then apply `FRAMEWORX_*` environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `FRAMEWORX_RADIUS`, `FRAMEWORX_RESOLUTION` and `FRAMEWORX_CAPS`
    /// as returned by `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(radius) = lookup("FRAMEWORX_RADIUS") {
            self.render.radius = radius
                .trim()
                .parse()
                .with_context(|| format!("Invalid FRAMEWORX_RADIUS: {radius:?}"))?;
        }

        if let Some(resolution) = lookup("FRAMEWORX_RESOLUTION") {
            self.render.resolution = resolution
                .trim()
                .parse()
                .with_context(|| format!("Invalid FRAMEWORX_RESOLUTION: {resolution:?}"))?;
        }

        if let Some(caps) = lookup("FRAMEWORX_CAPS") {
            let mode: CapMode = caps
                .parse()
                .map_err(|e| anyhow!("Invalid FRAMEWORX_CAPS: {e}"))?;
            self.render.caps = Some(mode);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
