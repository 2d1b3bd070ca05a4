//! Glob-based housekeeping for generated and mirrored files
//!
//! Patterns are evaluated relative to a working directory. Leading path
//! components without wildcards name the directory to search, and the rest
//! is matched against paths below it: `../shared/*.tf` matches `.tf` files
//! in `../shared`, `modules/*/main.tf` one level down, and `**/*.tf` at
//! any depth. `*` never crosses a `/`.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use crate::{Error, Result, io};

/// Find paths matching any of `patterns`, skipping any whose file name
/// matches one of `exclude_name_patterns`.
///
/// Hidden entries (leading `.`) only match patterns that themselves start
/// with a dot. Results keep pattern order, then name order.
pub fn find_paths<P, E>(cwd: &Path, patterns: &[P], exclude_name_patterns: &[E]) -> Result<Vec<PathBuf>>
where
    P: AsRef<str>,
    E: AsRef<str>,
{
    let exclude = build_set(exclude_name_patterns)?;

    let mut found = Vec::new();
    for pattern in patterns {
        let (base, glob) = split_pattern(pattern.as_ref())?;
        let dir = cwd.join(base);
        if !dir.is_dir() {
            tracing::debug!(?dir, "Pattern directory does not exist");
            continue;
        }

        let matcher = compile(glob)?;
        let components: Vec<&str> = glob.split('/').collect();
        let max_depth = if components.contains(&"**") {
            usize::MAX
        } else {
            components.len()
        };

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| visible(entry, &components));
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&dir, e))?;
            let Ok(relative) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            if matcher.is_match(relative) && !exclude.is_match(entry.file_name()) {
                let path = entry.into_path();
                if !found.contains(&path) {
                    found.push(path);
                }
            }
        }
    }
    Ok(found)
}

/// Delete every file matching `patterns` in `cwd`.
///
/// Returns the deleted paths.
pub fn delete_files<P, E>(cwd: &Path, patterns: &[P], exclude_name_patterns: &[E]) -> Result<Vec<PathBuf>>
where
    P: AsRef<str>,
    E: AsRef<str>,
{
    let paths = find_paths(cwd, patterns, exclude_name_patterns)?;

    let mut deleted = Vec::with_capacity(paths.len());
    for path in paths {
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(?path, "Deleted");
        deleted.push(path);
    }
    Ok(deleted)
}

/// Symlink every path matching `patterns` into `cwd`.
///
/// All symlinks already present in `cwd` are removed first, so the
/// directory always mirrors exactly the current matches. Returns the
/// created link paths.
pub fn mirror_files<P, E>(cwd: &Path, patterns: &[P], exclude_name_patterns: &[E]) -> Result<Vec<PathBuf>>
where
    P: AsRef<str>,
    E: AsRef<str>,
{
    let paths = find_paths(cwd, patterns, exclude_name_patterns)?;

    for name in io::list_names(cwd)? {
        let path = cwd.join(&name);
        let metadata = fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if metadata.file_type().is_symlink() {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            tracing::debug!(?path, "Removed old symlink");
        }
    }

    let mut created = Vec::with_capacity(paths.len());
    for real_path in paths {
        let Some(file_name) = real_path.file_name() else {
            continue;
        };
        let link_path = cwd.join(file_name);
        symlink(&real_path, &link_path).map_err(|e| Error::io(&link_path, e))?;
        tracing::debug!(?link_path, ?real_path, "Created symlink");
        created.push(link_path);
    }
    Ok(created)
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> std::io::Result<()> {
    if original.is_dir() {
        std::os::windows::fs::symlink_dir(original, link)
    } else {
        std::os::windows::fs::symlink_file(original, link)
    }
}

/// Hidden entries only match a pattern component that itself starts with
/// a dot. The search root is always visible.
fn visible(entry: &DirEntry, components: &[&str]) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let hidden = entry.file_name().to_string_lossy().starts_with('.');
    !hidden
        || components
            .get(entry.depth() - 1)
            .is_some_and(|component| component.starts_with('.'))
}

fn is_glob(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

/// Split a pattern into its literal directory and the glob below it.
fn split_pattern(pattern: &str) -> Result<(&str, &str)> {
    let mut offset = 0;
    let mut glob_start = None;
    for component in pattern.split('/') {
        if is_glob(component) {
            glob_start = Some(offset);
            break;
        }
        offset += component.len() + 1;
    }
    // Without wildcards the file name is the whole glob.
    let glob_start = glob_start.unwrap_or_else(|| pattern.rfind('/').map_or(0, |idx| idx + 1));

    let (base, glob) = pattern.split_at(glob_start);
    if glob.is_empty() || glob.ends_with('/') {
        return Err(Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: "pattern must end with a file name".into(),
        });
    }

    let base = base.strip_suffix('/').unwrap_or(base);
    let base = if base.is_empty() && pattern.starts_with('/') { "/" } else { base };
    Ok((base, glob))
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

fn walk_error(dir: &Path, error: walkdir::Error) -> Error {
    let path = error.path().unwrap_or(dir).to_path_buf();
    let source = error
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
    Error::io(path, source)
}

fn build_set<E: AsRef<str>>(patterns: &[E]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| Error::InvalidPattern {
        pattern: String::new(),
        message: e.to_string(),
    })
}
