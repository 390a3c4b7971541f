//! @dose
//! purpose: This module collects the TypeScript sources to render, walking directories with
//!     gitignore support and patterns from apiview.toml/CLI --exclude.
//!
//! when-editing:
//!     - !Override patterns use ! prefix to negate (exclude), so we add ! to user patterns
//!     - The ignore crate handles gitignore parsing automatically
//!     - Patterns come from apiview.toml exclude array and CLI --exclude flags
//!
//! invariants:
//!     - Default exclusions (node_modules, .git, etc.) are always applied to directory walks
//!     - Files named explicitly on the command line are never filtered by patterns
//!     - collect_source_files returns sorted, de-duplicated paths
//!
//! do-not:
//!     - Never remove default exclusions without explicit user override
//!
//! gotchas:
//!     - The ignore crate's override patterns are inclusive by default, so we negate them
//!     - dist/ is walked on purpose; published .d.ts files usually live there

use crate::parser::is_supported;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Configuration for file exclusion during directory walking
pub struct ExclusionConfig {
    /// Glob patterns to exclude (from --exclude flags)
    pub patterns: Vec<String>,
    /// Whether to respect .gitignore files (default: true)
    pub respect_gitignore: bool,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            respect_gitignore: true,
        }
    }
}

/// Default directories that are always excluded
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "target",
    "coverage",
    ".next",
    ".nuxt",
    ".turbo",
];

/// Build a WalkBuilder with the given exclusion configuration
pub fn build_walker(root: &Path, config: &ExclusionConfig) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    // Configure gitignore handling
    builder.git_ignore(config.respect_gitignore);
    builder.git_global(config.respect_gitignore);
    builder.git_exclude(config.respect_gitignore);

    // Don't respect hidden files filter (we handle .git explicitly)
    builder.hidden(false);

    // Build override patterns for default exclusions and exclude patterns
    let mut overrides = OverrideBuilder::new(root);

    // Add default directory exclusions
    for dir in DEFAULT_EXCLUDED_DIRS {
        // Exclude the directory and all its contents
        let pattern = format!("!{}/**", dir);
        let _ = overrides.add(&pattern);
        let pattern = format!("!{}", dir);
        let _ = overrides.add(&pattern);
    }

    // Add user patterns as exclusions (! prefix makes them exclude)
    for pattern in &config.patterns {
        let exclude_pattern = format!("!{}", pattern);
        if let Err(e) = overrides.add(&exclude_pattern) {
            tracing::warn!("invalid exclude pattern '{}': {}", pattern, e);
        }
    }

    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    builder
}

/// Build a GlobSet from patterns for additional filtering
pub fn build_exclude_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!("invalid exclude pattern '{}': {}", pattern, e);
            }
        }
    }

    builder.build().ok()
}

/// Collect renderable sources from files and directories, sorted by path.
///
/// Walked files are also checked against the exclude patterns relative to `root`, so
/// project-level patterns apply when only a subdirectory is walked.
pub fn collect_source_files(
    root: &Path,
    paths: &[PathBuf],
    config: &ExclusionConfig,
) -> Vec<PathBuf> {
    let excluded = build_exclude_globset(&config.patterns);
    let mut files = BTreeSet::new();
    for path in paths {
        if path.is_file() {
            if is_supported(path) {
                files.insert(path.clone());
            } else {
                tracing::debug!(path = %path.display(), "not a TypeScript source; skipping");
            }
            continue;
        }
        for entry in build_walker(path, config).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("walk error under {}: {}", path.display(), e);
                    continue;
                }
            };
            let file = entry.path();
            if !file.is_file() || !is_supported(file) {
                continue;
            }
            let relative = file.strip_prefix(root).unwrap_or(file);
            if excluded.as_ref().is_some_and(|set| set.is_match(relative)) {
                tracing::debug!(path = %relative.display(), "excluded by pattern");
                continue;
            }
            files.insert(file.to_path_buf());
        }
    }
    files.into_iter().collect()
}

/// Check if a directory name should be excluded by default
pub fn is_default_excluded_dir(name: &str) -> bool {
    DEFAULT_EXCLUDED_DIRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "export declare const x: number;").unwrap();
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_default_excluded_dirs() {
        assert!(is_default_excluded_dir("node_modules"));
        assert!(is_default_excluded_dir(".git"));
        assert!(is_default_excluded_dir("coverage"));
        assert!(!is_default_excluded_dir("dist"));
        assert!(!is_default_excluded_dir("src"));
    }

    #[test]
    fn test_exclusion_config_default() {
        let config = ExclusionConfig::default();
        assert!(config.patterns.is_empty());
        assert!(config.respect_gitignore);
    }

    #[test]
    fn test_build_exclude_globset_valid_patterns() {
        assert!(build_exclude_globset(&[]).is_none());

        let patterns = vec!["*.test.ts".to_string(), "docs/**".to_string()];
        let globset = build_exclude_globset(&patterns).unwrap();
        assert!(globset.is_match("foo.test.ts"));
        assert!(globset.is_match("docs/readme.md"));
        assert!(!globset.is_match("main.ts"));
    }

    #[test]
    fn test_collects_sorted_typescript_sources() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "src/b.ts");
        touch(root, "src/a.d.ts");
        touch(root, "src/view.tsx");
        touch(root, "src/legacy.js");
        touch(root, "node_modules/dep/index.d.ts");
        touch(root, "dist/index.d.mts");

        let files = collect_source_files(root, &[root.to_path_buf()], &ExclusionConfig::default());
        assert_eq!(
            names(root, &files),
            vec!["dist/index.d.mts", "src/a.d.ts", "src/b.ts", "src/view.tsx"]
        );
    }

    #[test]
    fn test_gitignore_respected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        // Create a .git directory to make it recognized as a git repo
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "generated/\n").unwrap();
        touch(root, "generated/api.d.ts");
        touch(root, "main.ts");

        let files = collect_source_files(root, &[root.to_path_buf()], &ExclusionConfig::default());
        assert_eq!(names(root, &files), vec!["main.ts"]);

        let config = ExclusionConfig {
            patterns: vec![],
            respect_gitignore: false,
        };
        let files = collect_source_files(root, &[root.to_path_buf()], &config);
        assert_eq!(names(root, &files), vec!["generated/api.d.ts", "main.ts"]);
    }

    #[test]
    fn test_exclude_patterns_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "src/main.ts");
        touch(root, "src/main.test.ts");
        touch(root, "src/internal/hidden.ts");

        let config = ExclusionConfig {
            patterns: vec!["*.test.ts".to_string(), "src/internal/**".to_string()],
            respect_gitignore: true,
        };
        let files = collect_source_files(root, &[root.join("src")], &config);
        assert_eq!(names(root, &files), vec!["src/main.ts"]);
    }

    #[test]
    fn test_explicit_files_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "api.test.ts");
        touch(root, "notes.md");

        let config = ExclusionConfig {
            patterns: vec!["*.test.ts".to_string()],
            respect_gitignore: true,
        };
        let files = collect_source_files(
            root,
            &[root.join("api.test.ts"), root.join("notes.md")],
            &config,
        );
        assert_eq!(names(root, &files), vec!["api.test.ts"]);
    }
}
