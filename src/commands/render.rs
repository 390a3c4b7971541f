//! @dose
//! purpose: This module implements the render command: collect TypeScript sources, parse their
//!     declarations, render each one into a token tree and print JSON or text.
//!
//! when-editing:
//!     - !Files render in parallel but output is always in sorted path order
//!     - !A file that fails does not stop the others; the command fails at the end
//!     - Paths in the output are relative to the project root with '/' separators
//!
//! invariants:
//!     - Each file gets its own ReferenceMap; names never navigate across files
//!     - Deprecation flags from the parser are applied to every token of a declaration
//!
//! do-not:
//!     - Never print progress to stdout; stdout carries the rendered output only
//!
//! flows:
//!     - Collect: resolve paths against root -> walk with exclusions
//!     - Render: par_iter over files -> parse -> render_declaration per item
//!     - Output: format -> stdout or --output file

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::exclusion::collect_source_files;
use crate::formatter::format_output;
use crate::generators::render_declaration;
use crate::parser::parse_source_file;
use crate::types::{RenderedDeclaration, RenderedFile};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub fn run_render(args: &RenderArgs, root: &Path) -> Result<()> {
    let config = Config::load(root).merge_cli(args.package.clone(), &args.exclude, args.format);

    let paths = resolve_paths(&args.paths, root);
    let files = collect_source_files(root, &paths, &args.exclusion_config(&config.exclude));
    if files.is_empty() {
        tracing::warn!(root = %root.display(), "no TypeScript sources found");
    }
    tracing::debug!("rendering {} files", files.len());

    let results: Vec<(PathBuf, Result<RenderedFile>)> = files
        .par_iter()
        .map(|path| (path.clone(), render_file(path, root, config.package())))
        .collect();

    let mut rendered = Vec::with_capacity(results.len());
    let mut errors = 0;
    for (path, result) in results {
        match result {
            Ok(file) => rendered.push(file),
            Err(e) => {
                tracing::error!("Error processing {}: {:#}", path.display(), e);
                errors += 1;
            }
        }
    }

    let output = format_output(&rendered, config.format).context("Failed to format output")?;
    write_output(args.output.as_deref(), &output)?;

    if errors > 0 {
        anyhow::bail!("{} files failed to render", errors);
    }

    Ok(())
}

fn resolve_paths(paths: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    if paths.is_empty() {
        return vec![root.to_path_buf()];
    }
    paths
        .iter()
        .map(|p| if p.is_absolute() { p.clone() } else { root.join(p) })
        .collect()
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Parse and render every declaration of one file
pub fn render_file(path: &Path, root: &Path, package: Option<&str>) -> Result<RenderedFile> {
    let source = fs::read_to_string(path).context("Failed to read source file")?;
    let parsed = parse_source_file(path, &source, package)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let declarations = parsed
        .declarations
        .iter()
        .map(|item| render_declaration(&item.declaration, Some(&parsed.references), item.deprecated))
        .collect::<Result<Vec<RenderedDeclaration>, _>>()?;

    Ok(RenderedFile {
        path: display_path(path, root),
        declarations,
    })
}

pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("Failed to create output directory")?;
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeclarationKind;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_paths_defaults_to_root() {
        let root = Path::new("/repo");
        assert_eq!(resolve_paths(&[], root), vec![PathBuf::from("/repo")]);
        assert_eq!(
            resolve_paths(&[PathBuf::from("types")], root),
            vec![PathBuf::from("/repo/types")]
        );
    }

    #[test]
    fn test_render_file_navigates_within_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("api.d.ts");
        fs::write(
            &path,
            "export interface Options { retry: number }\nexport declare function connect(options: Options): void;\n",
        )
        .unwrap();

        let file = render_file(&path, temp_dir.path(), Some("net")).unwrap();
        assert_eq!(file.path, "api.d.ts");
        assert_eq!(file.declarations.len(), 2);

        let connect = &file.declarations[1];
        assert_eq!(connect.kind, DeclarationKind::Function);
        assert_eq!(connect.navigate_to_id.as_deref(), Some("net!connect"));
        let options = connect
            .tokens
            .iter()
            .find(|t| t.value == "Options")
            .unwrap();
        assert_eq!(options.navigate_to_id.as_deref(), Some("net!Options"));
    }

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out/api.json");
        write_output(Some(&target), "[]").unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "[]");
    }
}
