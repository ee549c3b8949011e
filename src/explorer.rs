//! File tree browser.
//!
//! Displays a filesystem subtree rooted at a settable path. Directory
//! children load lazily on first expansion, sorted directories-first then
//! alphabetically, with hidden entries skipped. Delete and rename report
//! failures instead of propagating them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// One entry in the tree.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub depth: usize,
    pub expanded: bool,
    children: Vec<FileNode>,
    loaded: bool,
}

impl FileNode {
    fn from_path(path: &Path, depth: usize) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            name,
            path: path.to_path_buf(),
            is_dir: path.is_dir(),
            depth,
            expanded: false,
            children: Vec::new(),
            loaded: false,
        })
    }

    fn load_children(&mut self) {
        if !self.is_dir || self.loaded {
            return;
        }
        self.loaded = true;
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read directory");
                return;
            }
        };

        let mut children: Vec<FileNode> = entries
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|e| FileNode::from_path(&e.path(), self.depth + 1))
            .collect();

        children.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        self.children = children;
    }

    fn flatten<'a>(&'a self, out: &mut Vec<&'a FileNode>) {
        out.push(self);
        if self.expanded {
            for child in &self.children {
                child.flatten(out);
            }
        }
    }

    fn find_mut(&mut self, path: &Path) -> Option<&mut FileNode> {
        if self.path == path {
            return Some(self);
        }
        for child in &mut self.children {
            if path.starts_with(&child.path) {
                if let Some(found) = child.find_mut(path) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// What activating the selected entry should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    OpenFile(PathBuf),
    ToggledDir,
    None,
}

/// The explorer pane's tree and selection state.
#[derive(Debug)]
pub struct FileTree {
    root: FileNode,
    pub selected: usize,
}

impl FileTree {
    /// Build a tree rooted at `root`, expanded one level.
    pub fn new(root: &Path) -> Self {
        let mut node = FileNode::from_path(root, 0).unwrap_or_else(|| FileNode {
            name: root.display().to_string(),
            path: root.to_path_buf(),
            is_dir: true,
            depth: 0,
            expanded: false,
            children: Vec::new(),
            loaded: false,
        });
        node.load_children();
        node.expanded = true;
        Self {
            root: node,
            selected: 0,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root.path
    }

    /// Re-root the view at `dir` (Open Folder / navigate-into-folder).
    pub fn set_root(&mut self, dir: &Path) {
        *self = Self::new(dir);
    }

    /// The flattened list of visible nodes, root first.
    pub fn visible_nodes(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        self.root.flatten(&mut out);
        out
    }

    pub fn selected_node(&self) -> Option<FileNode> {
        self.visible_nodes().get(self.selected).map(|n| (*n).clone())
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let count = self.visible_nodes().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    /// Activate the selection: directories toggle expansion, files are
    /// delegated to the owning window's open operation.
    pub fn activate(&mut self) -> Activation {
        let Some(node) = self.selected_node() else {
            return Activation::None;
        };
        if node.is_dir {
            if let Some(target) = self.root.find_mut(&node.path) {
                target.load_children();
                target.expanded = !target.expanded;
            }
            Activation::ToggledDir
        } else {
            Activation::OpenFile(node.path)
        }
    }

    /// Drop cached children under `path` and reload on next expansion.
    pub fn refresh(&mut self, path: &Path) {
        if let Some(node) = self.root.find_mut(path) {
            node.children.clear();
            node.loaded = false;
            node.load_children();
        }
        let count = self.visible_nodes().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Delete a file or directory (recursively). Errors are reported, not
    /// propagated as panics.
    pub fn delete(&mut self, path: &Path) -> Result<(), AppError> {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        result.map_err(|source| AppError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "deleted");
        if let Some(parent) = path.parent() {
            let parent = parent.to_path_buf();
            self.refresh(&parent);
        }
        Ok(())
    }

    /// Rename an entry within its parent directory.
    pub fn rename(&mut self, path: &Path, new_name: &str) -> Result<PathBuf, AppError> {
        let parent = path.parent().ok_or_else(|| AppError::Rename {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent directory"),
        })?;
        let target = parent.join(new_name);
        fs::rename(path, &target).map_err(|source| AppError::Rename {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(from = %path.display(), to = %target.display(), "renamed");
        let parent = parent.to_path_buf();
        self.refresh(&parent);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub").join("inner.txt")).unwrap();
        let mut f = File::create(dir.path().join("main.py")).unwrap();
        f.write_all(b"print('hi')\n").unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        dir
    }

    #[test]
    fn hidden_files_are_skipped_and_dirs_sort_first() {
        let dir = fixture();
        let tree = FileTree::new(dir.path());
        let names: Vec<&str> = tree
            .visible_nodes()
            .iter()
            .skip(1) // root
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["sub", "main.py"]);
    }

    #[test]
    fn activate_dir_expands_and_file_opens() {
        let dir = fixture();
        let mut tree = FileTree::new(dir.path());
        tree.selected = 1; // "sub"
        assert_eq!(tree.activate(), Activation::ToggledDir);
        let names: Vec<&str> = tree
            .visible_nodes()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert!(names.contains(&"inner.txt"));

        tree.selected = tree
            .visible_nodes()
            .iter()
            .position(|n| n.name == "main.py")
            .unwrap();
        match tree.activate() {
            Activation::OpenFile(path) => assert!(path.ends_with("main.py")),
            other => panic!("expected OpenFile, got {:?}", other),
        }
    }

    #[test]
    fn delete_removes_recursively_and_reports_missing() {
        let dir = fixture();
        let mut tree = FileTree::new(dir.path());
        let sub = dir.path().join("sub");
        tree.delete(&sub).expect("delete dir");
        assert!(!sub.exists());

        let err = tree.delete(&dir.path().join("nope.txt"));
        assert!(matches!(err, Err(AppError::Remove { .. })));
    }

    #[test]
    fn rename_moves_within_parent() {
        let dir = fixture();
        let mut tree = FileTree::new(dir.path());
        let renamed = tree
            .rename(&dir.path().join("main.py"), "app.py")
            .expect("rename");
        assert!(renamed.exists());
        assert!(!dir.path().join("main.py").exists());
    }
}
