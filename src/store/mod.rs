use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::Document;

/// Handle to the JSON data file. Every call reads or rewrites the whole file;
/// nothing is cached between operations.
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    /// Make sure the data directory and file exist, seeding the file with an
    /// empty object. Existing files are left alone.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        if !path.exists() {
            std::fs::write(path, "{}")
                .with_context(|| format!("Failed to create data file: {}", path.display()))?;
            log::info!("Created empty data file at {}", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn load(&self) -> Result<Document> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read data file: {}", self.path.display()))?;
        let doc: Document = serde_json::from_str(&raw)
            .with_context(|| format!("Data file is not valid JSON: {}", self.path.display()))?;
        log::debug!("Loaded {} month(s) from {}", doc.len(), self.path.display());
        Ok(doc)
    }

    /// Replace the data file with `doc`. The new contents go to a temporary
    /// file next to it first and are renamed into place.
    pub(crate) fn save(&self, doc: &Document) -> Result<()> {
        let bytes = to_pretty_json(doc)?;
        let dir = match self.path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .context("Failed to write data to temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace data file: {}", self.path.display()))?;
        log::debug!("Saved {} month(s) to {}", doc.len(), self.path.display());
        Ok(())
    }

    /// Load, apply `f`, save. Returns whatever `f` returns.
    pub(crate) fn update<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let mut doc = self.load()?;
        let out = f(&mut doc);
        self.save(&doc)?;
        Ok(out)
    }
}

fn to_pretty_json(doc: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser).context("Failed to serialize data")?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
mod tests;
