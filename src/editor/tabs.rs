//! Tab manager: the open-file registry plus the tab strip it backs.
//!
//! The registry maps canonical absolute paths to tab indices. Invariant: at
//! most one tab per path, and every registry value indexes the tab tagged
//! with that path.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::editor::buffer::EditorBuffer;
use crate::editor::language::Language;
use crate::error::AppError;

/// One open editing surface and its tab metadata.
#[derive(Debug)]
pub struct Tab {
    pub title: String,
    pub path: Option<PathBuf>,
    pub buffer: EditorBuffer,
    pub language: Language,
}

impl Tab {
    fn untitled() -> Self {
        Self {
            title: "Untitled".to_string(),
            path: None,
            buffer: EditorBuffer::new(),
            language: Language::Plain,
        }
    }
}

/// Result of a save request on the active tab.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the tab's tracked path.
    Saved(PathBuf),
    /// The tab has no path yet; the caller must prompt for one.
    NeedsPath,
}

/// The tab strip and its open-file registry.
#[derive(Debug, Default)]
pub struct EditorTabs {
    tabs: Vec<Tab>,
    active: usize,
    registry: FxHashMap<PathBuf, usize>,
}

impl EditorTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_index(&self) -> Option<usize> {
        if self.tabs.is_empty() {
            None
        } else {
            Some(self.active)
        }
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active)
    }

    /// Number of registered (path-tagged) tabs.
    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_open(&self, path: &Path) -> bool {
        let key = canonicalize_lenient(path);
        self.registry.contains_key(&key)
    }

    /// Open `path` in a new tab, or focus the existing tab if the file is
    /// already open (no re-read). A read failure creates no tab.
    pub fn open(&mut self, path: &Path) -> Result<(), AppError> {
        let key = canonicalize_lenient(path);
        if let Some(&index) = self.registry.get(&key) {
            self.active = index;
            return Ok(());
        }

        let content = fs::read_to_string(&key).map_err(|source| AppError::FileRead {
            path: key.clone(),
            source,
        })?;

        let title = tab_title(&key);
        let tab = Tab {
            title,
            path: Some(key.clone()),
            buffer: EditorBuffer::from_text(&content),
            language: Language::from_path(&key),
        };
        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        self.registry.insert(key, index);
        self.active = index;
        tracing::debug!(tabs = self.tabs.len(), "opened file in new tab");
        Ok(())
    }

    /// Create a fresh unregistered "Untitled" tab and focus it.
    pub fn new_untitled(&mut self) {
        self.tabs.push(Tab::untitled());
        self.active = self.tabs.len() - 1;
    }

    /// Close the tab at `index`, removing its registry entry if it has one.
    pub fn close(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        let tab = self.tabs.remove(index);
        if let Some(path) = tab.path {
            self.registry.remove(&path);
        }
        // Indices past the removed tab shift down by one.
        for slot in self.registry.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        if index < self.active {
            self.active -= 1;
        }
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len().saturating_sub(1);
        }
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active = index;
        }
    }

    pub fn focus_next(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + 1) % self.tabs.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.tabs.is_empty() {
            self.active = (self.active + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    /// Save the active tab to its tracked path, or report that a path is
    /// needed (save-as).
    pub fn save_active(&mut self) -> Result<SaveOutcome, AppError> {
        let Some(tab) = self.tabs.get_mut(self.active) else {
            return Ok(SaveOutcome::NeedsPath);
        };
        let Some(path) = tab.path.clone() else {
            return Ok(SaveOutcome::NeedsPath);
        };
        fs::write(&path, tab.buffer.text()).map_err(|source| AppError::FileWrite {
            path: path.clone(),
            source,
        })?;
        tab.buffer.mark_saved();
        Ok(SaveOutcome::Saved(path))
    }

    /// Write the active tab to `path` and re-tag it: new title, new path,
    /// registry entry moved from any previous key.
    pub fn save_active_as(&mut self, path: &Path) -> Result<PathBuf, AppError> {
        let Some(tab) = self.tabs.get(self.active) else {
            return Err(AppError::FileWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no active tab"),
            });
        };

        fs::write(path, tab.buffer.text()).map_err(|source| AppError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

        // Canonicalize after the write so the file exists.
        let key = canonicalize_lenient(path);
        // If the destination is already open in another tab, that tab is now
        // stale; close it so the registry stays one tab per path.
        if let Some(&other) = self.registry.get(&key) {
            if other != self.active {
                self.close(other);
            }
        }

        let index = self.active;
        let tab = &mut self.tabs[index];
        if let Some(old) = tab.path.replace(key.clone()) {
            self.registry.remove(&old);
        }
        tab.title = tab_title(&key);
        tab.language = Language::from_path(&key);
        tab.buffer.mark_saved();
        self.registry.insert(key.clone(), index);
        Ok(key)
    }
}

fn tab_title(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Canonicalize where possible; fall back to the path as given so a vanished
/// file still produces a stable key and a reportable read error.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
