//! Literal substitution applied to a single file.
//!
//! The shipped patch turns `async <T>(...)` into `async <T,>(...)` in the
//! frontend's `TimeoutContext.tsx`, so the TSX parser reads the generic as a
//! type parameter instead of an opening JSX tag.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PatchResult;
use crate::utils::fs::{read_file_to_string, write_file_sync};

/// File the shipped patch rewrites
pub const TIMEOUT_CONTEXT_PATH: &str = "/opt/cswap-dex/frontend/src/contexts/TimeoutContext.tsx";

/// Text the shipped patch searches for
pub const GENERIC_ARROW_SEARCH: &str = "async <T>(promise: Promise<T>";

/// Text the shipped patch writes in its place
pub const GENERIC_ARROW_REPLACEMENT: &str = "async <T,>(promise: Promise<T>";

/// A file on disk, identified by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    path: PathBuf,
}

impl TargetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or the whole path when there is none
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A literal search/replacement pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRule {
    /// Exact text to find
    pub search: &'static str,
    /// Exact text written in place of each match
    pub replacement: &'static str,
    /// Short form of `search` used in the confirmation line
    pub old_label: &'static str,
    /// Short form of `replacement` used in the confirmation line
    pub new_label: &'static str,
}

impl SubstitutionRule {
    /// `<T>` to `<T,>` on the generic arrow function in TimeoutContext
    pub const fn generic_arrow() -> Self {
        Self {
            search: GENERIC_ARROW_SEARCH,
            replacement: GENERIC_ARROW_REPLACEMENT,
            old_label: "<T>",
            new_label: "<T,>",
        }
    }

    /// Replace every non-overlapping match, left to right.
    ///
    /// Inserted text is never rescanned. Returns the new content and the
    /// number of matches replaced.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let replacements = content.matches(self.search).count();
        if replacements == 0 {
            return (content.to_string(), 0);
        }
        (content.replace(self.search, self.replacement), replacements)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub target: TargetFile,
    pub old_label: &'static str,
    pub new_label: &'static str,
    /// Number of occurrences replaced, zero for a no-op rewrite
    pub replacements: usize,
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fixed {} - changed {} to {}",
            self.target.basename(),
            self.old_label,
            self.new_label
        )
    }
}

/// Reads a target, applies one rule, writes it back
#[derive(Debug, Clone)]
pub struct Patcher {
    target: TargetFile,
    rule: SubstitutionRule,
}

impl Patcher {
    pub fn new(target: TargetFile, rule: SubstitutionRule) -> Self {
        Self { target, rule }
    }

    /// The shipped patch: TimeoutContext.tsx with the generic arrow rule
    pub fn timeout_context() -> Self {
        Self::new(
            TargetFile::new(TIMEOUT_CONTEXT_PATH),
            SubstitutionRule::generic_arrow(),
        )
    }

    pub fn target(&self) -> &TargetFile {
        &self.target
    }

    pub fn rule(&self) -> &SubstitutionRule {
        &self.rule
    }

    /// Run the patch.
    ///
    /// The file is always rewritten, even when nothing matched. Read errors
    /// leave the file untouched; write errors may leave it truncated.
    pub fn run(&self) -> PatchResult<PatchReport> {
        let path = self.target.path();

        let content = read_file_to_string(path)?;
        let (patched, replacements) = self.rule.apply(&content);
        debug!(
            "{} occurrence(s) of {:?} in {}",
            replacements,
            self.rule.search,
            path.display()
        );

        write_file_sync(path, &patched)?;
        info!("Patched {} ({} replacement(s))", path.display(), replacements);

        Ok(PatchReport {
            target: self.target.clone(),
            old_label: self.rule.old_label,
            new_label: self.rule.new_label,
            replacements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatchError;
    use std::fs;
    use tempfile::tempdir;

    fn patcher_for(path: &Path) -> Patcher {
        Patcher::new(TargetFile::new(path), SubstitutionRule::generic_arrow())
    }

    #[test]
    fn test_single_occurrence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TimeoutContext.tsx");
        fs::write(&path, "async <T>(promise: Promise<T>, ms: number)").unwrap();

        let report = patcher_for(&path).run().unwrap();

        assert_eq!(report.replacements, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "async <T,>(promise: Promise<T>, ms: number)"
        );
    }

    #[test]
    fn test_two_occurrences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TimeoutContext.tsx");
        fs::write(
            &path,
            "async <T>(promise: Promise<T> async <T>(promise: Promise<T>",
        )
        .unwrap();

        let report = patcher_for(&path).run().unwrap();

        assert_eq!(report.replacements, 2);
        let patched = fs::read_to_string(&path).unwrap();
        assert_eq!(
            patched,
            "async <T,>(promise: Promise<T> async <T,>(promise: Promise<T>"
        );
        assert_eq!(patched.matches(GENERIC_ARROW_SEARCH).count(), 0);
    }

    #[test]
    fn test_no_occurrence_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TimeoutContext.tsx");
        let original = "export const withTimeout = <T,>(p: Promise<T>) => p\n\tüñí\r\n";
        fs::write(&path, original).unwrap();

        let report = patcher_for(&path).run().unwrap();

        assert_eq!(report.replacements, 0);
        assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_running_twice_equals_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TimeoutContext.tsx");
        fs::write(
            &path,
            "const run = async <T>(promise: Promise<T>, ms: number) => {}\n",
        )
        .unwrap();

        let patcher = patcher_for(&path);
        patcher.run().unwrap();
        let once = fs::read_to_string(&path).unwrap();
        let second = patcher.run().unwrap();

        assert_eq!(second.replacements, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), once);
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let rule = SubstitutionRule {
            search: "ab",
            replacement: "aab",
            old_label: "ab",
            new_label: "aab",
        };

        let (out, count) = rule.apply("abab");
        assert_eq!(count, 2);
        assert_eq!(out, "aabaab");
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let rule = SubstitutionRule {
            search: "aa",
            replacement: "b",
            old_label: "aa",
            new_label: "b",
        };

        assert_eq!(rule.apply("aaa"), ("ba".to_string(), 1));
    }

    #[test]
    fn test_missing_target_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TimeoutContext.tsx");

        let err = patcher_for(&path).run().unwrap_err();

        assert!(matches!(err, PatchError::Read { .. }));
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_confirmation_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TimeoutContext.tsx");
        fs::write(&path, "").unwrap();

        let report = patcher_for(&path).run().unwrap();
        assert_eq!(
            report.to_string(),
            "Fixed TimeoutContext.tsx - changed <T> to <T,>"
        );
    }

    #[test]
    fn test_shipped_patch_constants() {
        let patcher = Patcher::timeout_context();
        assert_eq!(
            patcher.target().path(),
            Path::new("/opt/cswap-dex/frontend/src/contexts/TimeoutContext.tsx")
        );
        assert_eq!(patcher.target().basename(), "TimeoutContext.tsx");
        assert!(!patcher
            .rule()
            .replacement
            .contains(patcher.rule().search));
    }
}
