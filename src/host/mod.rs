//! Host-side export handling
//!
//! Reporters append export descriptors; the host decides where they land and
//! writes them once the run is over.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::report::ExportDescriptor;

/// Append-only list of export descriptors produced during a run
#[derive(Clone, Debug, Default)]
pub struct Exports {
    entries: Vec<ExportDescriptor>,
}

impl Exports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, descriptor: ExportDescriptor) {
        debug!(name = %descriptor.name, "Export registered");
        self.entries.push(descriptor);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExportDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where a descriptor will be written
    pub fn resolve_path(descriptor: &ExportDescriptor, output_dir: &Path) -> PathBuf {
        match &descriptor.path {
            Some(path) => path.clone(),
            None => output_dir.join(&descriptor.default),
        }
    }

    /// Write every descriptor to disk, returning the written paths
    pub fn persist(&self, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        let mut written = Vec::with_capacity(self.entries.len());

        for descriptor in &self.entries {
            let path = Self::resolve_path(descriptor, output_dir);

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            std::fs::write(&path, &descriptor.content)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;

            info!(name = %descriptor.name, path = %path.display(), "Report written");
            written.push(path);
        }

        Ok(written)
    }
}
