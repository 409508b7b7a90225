//! Code-tree scanning.
//!
//! # Responsibilities
//! - Derive default scan roots when none are given
//! - Enumerate code files beneath each root, deterministically
//! - Turn file paths into dotted qualified module names
//!
//! # Design Decisions
//! - Walk order is sorted by file name so discovery order is stable
//! - Unreadable entries are skipped with a log event, like a glob would
//! - `mod.rs` collapses onto its directory's module name

use std::collections::HashSet;
use std::path::Path;

use walkdir::WalkDir;

/// The root meaning "the search root itself", produced when code files sit
/// directly beneath it.
const TOP_LEVEL_ROOT: &str = "";

/// Candidate qualified module names beneath `roots`, deduplicated in
/// first-seen order. Empty `roots` derives defaults from the tree itself.
pub(crate) fn candidate_modules(roots: &[String], search_root: &Path) -> Vec<String> {
    let roots = if roots.is_empty() {
        default_roots(search_root)
    } else {
        roots.to_vec()
    };

    let mut seen = HashSet::new();
    let mut modules = Vec::new();
    for root in &roots {
        let base = if root.is_empty() {
            search_root.to_path_buf()
        } else {
            search_root.join(root)
        };
        for path in code_files(&base) {
            if let Some(name) = qualified_name(search_root, &path) {
                if seen.insert(name.clone()) {
                    modules.push(name);
                }
            }
        }
    }
    modules
}

/// Derive default roots: the first path segment of every directory that
/// contains a code file, in first-seen order.
fn default_roots(search_root: &Path) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut roots = Vec::new();
    for path in code_files(search_root) {
        let Ok(relative) = path.strip_prefix(search_root) else {
            continue;
        };
        let root = match relative.components().count() {
            // A file directly beneath the search root scans the root itself.
            0 | 1 => TOP_LEVEL_ROOT.to_string(),
            _ => match relative.components().next() {
                Some(first) => first.as_os_str().to_string_lossy().into_owned(),
                None => continue,
            },
        };
        if seen.insert(root.clone()) {
            roots.push(root);
        }
    }
    roots
}

/// All `.rs` files beneath `base`, in sorted walk order.
fn code_files(base: &Path) -> Vec<std::path::PathBuf> {
    WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

/// Dotted qualified name of a code file, relative to the search root.
/// `clsctl/alpha.rs` → `clsctl.alpha`; `clsctl/mod.rs` → `clsctl`.
fn qualified_name(search_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(search_root).ok()?;
    let stem = relative.file_stem()?.to_str()?;

    let mut parts: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    if stem != "mod" {
        parts.push(stem.to_string());
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, b"").expect("create file");
    }

    #[test]
    fn qualified_names_follow_the_tree() {
        let root = Path::new("/app");
        assert_eq!(
            qualified_name(root, Path::new("/app/root.rs")).as_deref(),
            Some("root")
        );
        assert_eq!(
            qualified_name(root, Path::new("/app/clsctl/alpha.rs")).as_deref(),
            Some("clsctl.alpha")
        );
        assert_eq!(
            qualified_name(root, Path::new("/app/clsctl/mod.rs")).as_deref(),
            Some("clsctl")
        );
        // mod.rs directly beneath the search root names nothing.
        assert_eq!(qualified_name(root, Path::new("/app/mod.rs")), None);
    }

    #[test]
    fn default_roots_cover_top_level_files_and_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "root.rs");
        touch(dir.path(), "clsctl/alpha.rs");
        touch(dir.path(), "clsctl/nested/deep.rs");
        touch(dir.path(), "notes.txt");

        let roots = default_roots(dir.path());
        assert!(roots.contains(&String::new()));
        assert!(roots.contains(&"clsctl".to_string()));
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn explicit_roots_scan_only_their_subtree() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "root.rs");
        touch(dir.path(), "clsctl/alpha.rs");
        touch(dir.path(), "other/beta.rs");

        let modules = candidate_modules(&["clsctl".to_string()], dir.path());
        assert_eq!(modules, vec!["clsctl.alpha".to_string()]);
    }

    #[test]
    fn derived_roots_reach_the_whole_tree_without_duplicates() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "root.rs");
        touch(dir.path(), "clsctl/alpha.rs");

        let modules = candidate_modules(&[], dir.path());
        // The top-level root already covers the whole tree; the clsctl root
        // must not produce a second entry for the same module.
        assert_eq!(
            modules.iter().filter(|m| m.as_str() == "clsctl.alpha").count(),
            1
        );
        assert!(modules.contains(&"root".to_string()));
    }

    #[test]
    fn missing_root_scans_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let modules = candidate_modules(&["absent".to_string()], dir.path());
        assert!(modules.is_empty());
    }
}
