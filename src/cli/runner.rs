// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Repair-then-render pipeline driven by a loaded configuration

use crate::config::FrameworxConfig;
use crate::geometry::Frame;
use crate::mesh::{render_to_file, RenderSummary};
use crate::repair::RepairSummary;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of one [`Runner::run`]
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// `None` when repair was skipped
    pub repair: Option<RepairSummary>,
    pub render: RenderSummary,
    #[serde(serialize_with = "as_seconds")]
    pub repair_time: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub render_time: Duration,
}

fn as_seconds<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Runs frames through repair and rendering
pub struct Runner {
    config: FrameworxConfig,
    repair: bool,
}

impl Runner {
    pub fn new(config: FrameworxConfig) -> Self {
        Self {
            config,
            repair: true,
        }
    }

    /// Skip the repair stages entirely
    pub fn without_repair(mut self) -> Self {
        self.repair = false;
        self
    }

    pub fn config(&self) -> &FrameworxConfig {
        &self.config
    }

    /// Repair `frame` in place (unless disabled) and render it to `output`
    pub fn run(&self, frame: &mut Frame, output: &Path) -> Result<RunReport> {
        let start = Instant::now();
        let repair = self
            .repair
            .then(|| frame.repair().run(&self.config.repair));
        let repair_time = start.elapsed();

        let start = Instant::now();
        let render = render_to_file(frame, output, &self.config.render)
            .with_context(|| format!("Failed to render frame to {:?}", output))?;
        let render_time = start.elapsed();

        Ok(RunReport {
            repair,
            render,
            repair_time,
            render_time,
        })
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(FrameworxConfig::default())
    }
}
