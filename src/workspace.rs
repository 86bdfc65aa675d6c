// src/workspace.rs
use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::errors::{AppError, Result};

/// File types the editor is allowed to read and write.
const EDITABLE_EXTENSIONS: &[&str] = &["py", "txt", "md", "json", "yaml", "yml", "ini", "cfg", "log"];

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    pub modified: String,
    pub extension: String,
}

/// Path-scoped file store for the editor. Every operation is confined to
/// the workspace root; the execution engine never touches this directly,
/// it only ever sees source text.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open (and create, if needed) a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level entries, hidden names skipped, directories first then
    /// case-insensitive alphabetical.
    pub fn list_files(&self) -> Result<Vec<FileEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let meta = entry.metadata()?;
            let is_dir = meta.is_dir();
            entries.push(FileEntry {
                name: name.clone(),
                path: name.clone(),
                kind: if is_dir { "directory" } else { "file" }.to_string(),
                size: if is_dir {
                    "Directory".to_string()
                } else {
                    human_size(meta.len())
                },
                modified: modified_time(&meta),
                extension: if is_dir {
                    String::new()
                } else {
                    Path::new(&name)
                        .extension()
                        .map(|e| format!(".{}", e.to_string_lossy()))
                        .unwrap_or_default()
                },
            });
        }
        entries.sort_by(|a, b| {
            (a.kind == "file", a.name.to_lowercase()).cmp(&(b.kind == "file", b.name.to_lowercase()))
        });
        Ok(entries)
    }

    pub fn read_file(&self, rel: &str) -> Result<String> {
        let path = self.resolve(rel)?;
        if !path.exists() {
            return Err(AppError::FileNotFound(rel.to_string()));
        }
        if !path.is_file() {
            return Err(AppError::NotAFile(rel.to_string()));
        }
        check_extension(rel, &path)?;
        Ok(fs::read_to_string(path)?)
    }

    /// Save `content` to `rel`, creating parent directories as needed.
    pub fn save_file(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.resolve(rel)?;
        check_extension(rel, &path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Delete a file or directory. The workspace root itself is protected.
    pub fn delete_file(&self, rel: &str) -> Result<()> {
        let path = self.resolve(rel)?;
        if path == self.root {
            return Err(AppError::PathOutsideWorkspace(
                "cannot delete workspace root".to_string(),
            ));
        }
        if !path.exists() {
            return Err(AppError::FileNotFound(rel.to_string()));
        }
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Relative paths only; absolute paths and `..` components are rejected.
    fn resolve(&self, rel: &str) -> Result<PathBuf> {
        let candidate = Path::new(rel);
        if candidate.is_absolute() {
            return Err(AppError::PathOutsideWorkspace(rel.to_string()));
        }
        for component in candidate.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(AppError::PathOutsideWorkspace(rel.to_string())),
            }
        }
        Ok(self.root.join(candidate))
    }
}

fn check_extension(rel: &str, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !EDITABLE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::ExtensionNotAllowed(rel.to_string()));
    }
    Ok(())
}

fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

fn modified_time(meta: &fs::Metadata) -> String {
    meta.modified()
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| "Unknown".to_string())
}
