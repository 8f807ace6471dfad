use crate::config::WalkOptions;
use commenter_domain::profile_for_path;
use commenter_infra::filesystem::{CUSTOM_IGNORE_FILENAME, ExcludeMatcher};
use commenter_shared_kernel::{CommenterError, Result};
use crossbeam_channel::Sender;
use globset::GlobBuilder;
use ignore::WalkBuilder;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Item produced by the directory walk.
#[derive(Debug)]
pub enum WalkItem {
    /// A file with a supported extension.
    File(PathBuf),
    /// An entry that could not be read during traversal.
    Failed { path: PathBuf, details: String },
}

/// Parallel directory walk below `root`.
///
/// Honours `.gitignore` (unless disabled) and `.commenterignore`. Hidden
/// entries are walked unless `hidden` is cleared, `.git` never is. Descends
/// only when `recursive` and drops excluded paths and unsupported extensions
/// before they reach the channel.
///
/// # Errors
/// Returns an error if an exclude pattern is not a valid glob.
pub fn walk_parallel(root: &Path, options: &WalkOptions, tx: &Sender<WalkItem>) -> Result<()> {
    let matcher = ExcludeMatcher::new(&options.exclude_patterns)?;

    let mut builder = WalkBuilder::new(root);
    builder
        .threads(options.threads)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .git_global(options.git_ignore)
        .git_exclude(options.git_ignore)
        .require_git(false)
        .follow_links(false)
        .add_custom_ignore_filename(CUSTOM_IGNORE_FILENAME);

    if !options.recursive {
        builder.max_depth(Some(1));
    }

    let walk_root = root.to_path_buf();
    builder.filter_entry(move |entry| {
        entry.depth() == 0 || !(is_vcs_dir(entry) || matcher.is_excluded(entry.path(), &walk_root))
    });

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        let root = root.to_path_buf();
        Box::new(move |entry| {
            let item = match entry {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                        return ignore::WalkState::Continue;
                    }
                    let path = entry.into_path();
                    if profile_for_path(&path).is_none() {
                        return ignore::WalkState::Continue;
                    }
                    WalkItem::File(path)
                }
                Err(ignore::Error::Partial(errors)) => {
                    // Malformed ignore files: keep walking with the rules that parsed.
                    for err in errors {
                        warn!("{err}");
                    }
                    return ignore::WalkState::Continue;
                }
                Err(err) => {
                    let path = error_path(&err).unwrap_or_else(|| root.clone());
                    warn!("walk error at {}: {err}", path.display());
                    WalkItem::Failed { path, details: err.to_string() }
                }
            };
            if tx.send(item).is_err() {
                debug!("receiver dropped; stopping walk");
                return ignore::WalkState::Quit;
            }
            ignore::WalkState::Continue
        })
    });

    Ok(())
}

const GLOB_META: [char; 3] = ['*', '?', '['];

/// Whether `target` is a glob pattern rather than an existing path.
pub fn is_glob(target: &Path) -> bool {
    !target.exists() && target.to_str().is_some_and(|s| s.contains(GLOB_META))
}

/// Expand a glob target (`src/*.ts`, `**/*.go`) into the supported files it
/// names, sorted.
///
/// Only the literal directory prefix is walked; `*`, `?` and `[..]` never
/// cross a `/`, while `**` does. Matched files with unsupported extensions
/// are dropped without error.
///
/// # Errors
/// `InvalidPattern` for a malformed glob, `NoMatches` when no file matches.
pub fn expand_glob(pattern: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let text = pattern.to_string_lossy().into_owned();
    let matcher = GlobBuilder::new(&text)
        .literal_separator(true)
        .build()
        .map_err(|e| CommenterError::InvalidPattern { pattern: text.clone(), details: e.to_string() })?
        .compile_matcher();

    let (base, depth) = literal_prefix(pattern);
    let implicit_base = base.as_os_str().is_empty();
    let walk_base = if implicit_base { PathBuf::from(".") } else { base };

    let mut builder = WalkBuilder::new(&walk_base);
    builder.standard_filters(false).hidden(!options.hidden).follow_links(false).max_depth(depth);
    builder.filter_entry(|entry| entry.depth() == 0 || !is_vcs_dir(entry));

    let mut matches = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = if implicit_base { entry.path().strip_prefix(".").unwrap_or(entry.path()) } else { entry.path() };
        if matcher.is_match(path) {
            matches.push(path.to_path_buf());
        }
    }

    if matches.is_empty() {
        return Err(CommenterError::NoMatches { pattern: text });
    }
    matches.retain(|p| profile_for_path(p).is_some());
    matches.sort();
    debug!("{text}: {} supported files", matches.len());
    Ok(matches)
}

/// Leading components free of glob syntax, plus the walk depth needed below
/// them (`None` when a `**` component allows any depth).
fn literal_prefix(pattern: &Path) -> (PathBuf, Option<usize>) {
    let mut base = PathBuf::new();
    let mut rest = 0usize;
    let mut unbounded = false;
    for component in pattern.components() {
        let part = component.as_os_str().to_string_lossy();
        if rest > 0 || part.contains(GLOB_META) {
            rest += 1;
            unbounded |= part.contains("**");
        } else {
            base.push(component);
        }
    }
    (base, if unbounded { None } else { Some(rest) })
}

/// `.git` is never descended into, even when hidden entries are walked.
fn is_vcs_dir(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir()) && entry.file_name() == ".git"
}

fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => error_path(err),
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalkOptionsBuilder;
    use std::fs;
    use tempfile::tempdir;

    fn collect(root: &Path, options: &WalkOptions) -> Vec<PathBuf> {
        let (tx, rx) = crossbeam_channel::unbounded();
        walk_parallel(root, options, &tx).unwrap();
        drop(tx);
        let mut files: Vec<PathBuf> = rx
            .into_iter()
            .filter_map(|item| match item {
                WalkItem::File(p) => Some(p.strip_prefix(root).unwrap().to_path_buf()),
                WalkItem::Failed { .. } => None,
            })
            .collect();
        files.sort();
        files
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::write(root.join("top.ts"), "// a\n").unwrap();
        fs::write(root.join("README.md"), "# readme\n").unwrap();
        fs::write(root.join("src/main.go"), "// b\n").unwrap();
        fs::write(root.join("src/nested/q.sql"), "-- c\n").unwrap();
        fs::write(root.join("vendor/lib.js"), "// d\n").unwrap();
        fs::write(root.join(".hidden/h.json"), "{}\n").unwrap();
        fs::write(root.join(".eslintrc.json"), "{ // c\n}\n").unwrap();
        dir
    }

    #[test]
    fn recursive_walk_includes_hidden_and_skips_unsupported() {
        let dir = fixture();
        let files = collect(dir.path(), &WalkOptions::default());
        assert_eq!(
            files,
            vec![
                PathBuf::from(".eslintrc.json"),
                PathBuf::from(".hidden/h.json"),
                PathBuf::from("src/main.go"),
                PathBuf::from("src/nested/q.sql"),
                PathBuf::from("top.ts"),
                PathBuf::from("vendor/lib.js"),
            ]
        );
    }

    #[test]
    fn non_recursive_walk_stays_at_top() {
        let dir = fixture();
        let options = WalkOptionsBuilder::default().recursive(false).build().unwrap();
        assert_eq!(collect(dir.path(), &options), vec![PathBuf::from(".eslintrc.json"), PathBuf::from("top.ts")]);
    }

    #[test]
    fn hidden_entries_skipped_when_disabled() {
        let dir = fixture();
        let options = WalkOptionsBuilder::default().hidden(false).build().unwrap();
        let files = collect(dir.path(), &options);
        assert!(!files.contains(&PathBuf::from(".hidden/h.json")));
        assert!(!files.contains(&PathBuf::from(".eslintrc.json")));
        assert!(files.contains(&PathBuf::from("top.ts")));
    }

    #[test]
    fn exclude_patterns_prune_dirs_and_names() {
        let dir = fixture();
        let options = WalkOptionsBuilder::default()
            .exclude_patterns(vec!["vendor".to_string(), "*.sql".to_string()])
            .build()
            .unwrap();
        assert_eq!(
            collect(dir.path(), &options),
            vec![
                PathBuf::from(".eslintrc.json"),
                PathBuf::from(".hidden/h.json"),
                PathBuf::from("src/main.go"),
                PathBuf::from("top.ts"),
            ]
        );
    }

    #[test]
    fn ignore_files_are_honoured() {
        let dir = fixture();
        fs::write(dir.path().join(".gitignore"), "vendor/\n").unwrap();
        fs::write(dir.path().join(CUSTOM_IGNORE_FILENAME), "*.go\n").unwrap();

        let files = collect(dir.path(), &WalkOptions::default());
        assert_eq!(
            files,
            vec![
                PathBuf::from(".eslintrc.json"),
                PathBuf::from(".hidden/h.json"),
                PathBuf::from("src/nested/q.sql"),
                PathBuf::from("top.ts"),
            ]
        );

        let options = WalkOptionsBuilder::default().git_ignore(false).build().unwrap();
        let files = collect(dir.path(), &options);
        assert!(files.contains(&PathBuf::from("vendor/lib.js")));
        assert!(!files.contains(&PathBuf::from("src/main.go")));
    }

    #[test]
    fn git_directory_is_never_walked() {
        let dir = fixture();
        fs::create_dir_all(dir.path().join(".git/hooks")).unwrap();
        fs::write(dir.path().join(".git/hooks/pre-commit.js"), "// hook\n").unwrap();
        assert!(!collect(dir.path(), &WalkOptions::default()).iter().any(|p| p.starts_with(".git")));
        let globbed = expand_glob(&dir.path().join("**/*.js"), &WalkOptions::default()).unwrap();
        assert_eq!(globbed, vec![dir.path().join("vendor/lib.js")]);
    }

    #[test]
    fn glob_detection_requires_meta_and_a_missing_path() {
        let dir = fixture();
        assert!(is_glob(&dir.path().join("*.ts")));
        assert!(is_glob(Path::new("src/a?.go")));
        assert!(!is_glob(&dir.path().join("top.ts")));
        assert!(!is_glob(Path::new("missing.ts")));
    }

    #[test]
    fn glob_expands_within_one_directory() {
        let dir = fixture();
        let files = expand_glob(&dir.path().join("src/*.go"), &WalkOptions::default()).unwrap();
        assert_eq!(files, vec![dir.path().join("src/main.go")]);
    }

    #[test]
    fn double_star_crosses_directories() {
        let dir = fixture();
        let files = expand_glob(&dir.path().join("**/*.sql"), &WalkOptions::default()).unwrap();
        assert_eq!(files, vec![dir.path().join("src/nested/q.sql")]);
    }

    #[test]
    fn glob_keeps_only_supported_matches() {
        let dir = fixture();
        let files = expand_glob(&dir.path().join("*"), &WalkOptions::default()).unwrap();
        assert_eq!(files, vec![dir.path().join(".eslintrc.json"), dir.path().join("top.ts")]);
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let dir = fixture();
        let err = expand_glob(&dir.path().join("*.rs"), &WalkOptions::default()).unwrap_err();
        assert!(err.to_string().contains("no files match pattern"));
        assert_eq!(err.kind(), commenter_shared_kernel::ErrorKind::PathNotFound);
    }

    #[test]
    fn literal_prefix_splits_at_first_meta_component() {
        assert_eq!(literal_prefix(Path::new("src/app/*.ts")), (PathBuf::from("src/app"), Some(1)));
        assert_eq!(literal_prefix(Path::new("*.go")), (PathBuf::new(), Some(1)));
        assert_eq!(literal_prefix(Path::new("web/**/*.tsx")), (PathBuf::from("web"), None));
    }

    #[test]
    fn invalid_exclude_pattern_is_an_error() {
        let dir = fixture();
        let options = WalkOptionsBuilder::default().exclude_patterns(vec!["a[".to_string()]).build().unwrap();
        let (tx, _rx) = crossbeam_channel::unbounded();
        assert!(walk_parallel(dir.path(), &options, &tx).is_err());
    }
}
