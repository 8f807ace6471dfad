use std::path::{Path, PathBuf};

use commenter_shared_kernel::{CommenterError, ErrorKind};

use crate::{model::SegmentKind, stats::LineStats};

/// 除去したコメント1件 (プレビュー表示用)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedComment {
    /// コメント開始行 (1始まり)
    pub line: usize,
    /// 前後の空白を除いた本文
    pub text: String,
}

impl RemovedComment {
    pub fn new(line: usize, text: &str) -> Self {
        Self { line, text: text.trim().to_string() }
    }
}

/// EOF まで閉じられなかった構文の情報 (処理自体は成功扱い)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedNote {
    pub construct: SegmentKind,
    pub line: usize,
}

impl MalformedNote {
    pub fn describe(&self, path: &Path) -> String {
        CommenterError::MalformedInput {
            path: path.to_path_buf(),
            construct: self.construct.to_string(),
            line: self.line,
        }
        .to_string()
    }
}

/// 1ファイルの処理結果区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Success,
    Skipped(String),
    Error { kind: ErrorKind, message: String },
}

/// 1ファイルの処理結果 (生成後は不変)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub path: PathBuf,
    /// 解決された言語名
    pub language: Option<&'static str>,
    pub original_lines: usize,
    pub remaining_lines: usize,
    pub comments_removed: usize,
    /// 書き戻しが行われたか
    pub persisted: bool,
    pub outcome: FileOutcome,
    pub removed: Vec<RemovedComment>,
    pub malformed: Option<MalformedNote>,
}

impl FileResult {
    pub fn success(
        path: PathBuf,
        language: &'static str,
        stats: LineStats,
        comments_removed: usize,
        removed: Vec<RemovedComment>,
    ) -> Self {
        Self {
            path,
            language: Some(language),
            original_lines: stats.original,
            remaining_lines: stats.remaining,
            comments_removed,
            persisted: false,
            outcome: FileOutcome::Success,
            removed,
            malformed: None,
        }
    }

    pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::empty(path, None, FileOutcome::Skipped(reason.into()))
    }

    pub fn failure(path: PathBuf, language: Option<&'static str>, error: &CommenterError) -> Self {
        Self::empty(path, language, FileOutcome::Error { kind: error.kind(), message: error.to_string() })
    }

    fn empty(path: PathBuf, language: Option<&'static str>, outcome: FileOutcome) -> Self {
        Self {
            path,
            language,
            original_lines: 0,
            remaining_lines: 0,
            comments_removed: 0,
            persisted: false,
            outcome,
            removed: Vec::new(),
            malformed: None,
        }
    }

    #[must_use]
    pub fn with_malformed(mut self, note: Option<MalformedNote>) -> Self {
        self.malformed = note;
        self
    }

    #[must_use]
    pub fn with_persisted(mut self, persisted: bool) -> Self {
        self.persisted = persisted;
        self
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FileOutcome::Success)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, FileOutcome::Error { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.outcome {
            FileOutcome::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
