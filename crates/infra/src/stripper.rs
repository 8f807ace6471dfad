// crates/infra/src/stripper.rs
//! コメント除去
//!
//! スキャナのセグメント列を消費し、Code と文字列をそのまま出力、
//! コメントを除去して件数を数えます。出力は常に入力の部分列です。

use std::{
    path::Path,
    time::{Duration, Instant},
};

use commenter_domain::{LanguageProfile, MalformedNote, RemovedComment, Segment, SegmentKind};
use commenter_shared_kernel::{CommenterError, Result};
use log::debug;
use memchr::{memchr, memmem, memrchr};

use crate::scanner::Scanner;

/// タイムアウトを確認するセグメント間隔
const DEADLINE_CHECK_INTERVAL: usize = 4096;

/// 出力レイアウト
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// 除去部分以外を1バイトも変えない
    #[default]
    Preserve,
    /// コメントだけの行を削除し、末尾コメント前の空白を詰める (opt-in)
    Compact,
}

/// 1ファイル分の除去結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripOutcome {
    pub output: Vec<u8>,
    pub comments_removed: usize,
    pub removed: Vec<RemovedComment>,
    pub malformed: Option<MalformedNote>,
}

/// コメント除去器
pub struct Stripper<'p> {
    profile: &'static LanguageProfile,
    layout: Layout,
    ignore: Vec<memmem::Finder<'p>>,
    timeout: Option<Duration>,
    /// 除去によって隣接すると新たなコメント開始になるバイト対
    glue: Vec<[u8; 2]>,
}

impl<'p> Stripper<'p> {
    pub fn new(profile: &'static LanguageProfile, layout: Layout) -> Self {
        let glue = profile
            .line_comments
            .iter()
            .copied()
            .chain(profile.block_comments.iter().map(|b| b.open))
            .filter_map(|t| <[u8; 2]>::try_from(t.as_bytes()).ok())
            .collect();
        Self { profile, layout, ignore: Vec::new(), timeout: None, glue }
    }

    /// 本文にいずれかのパターンを含むコメントは除去しない
    #[must_use]
    pub fn with_ignore_patterns(mut self, patterns: &'p [String]) -> Self {
        self.ignore = patterns.iter().filter(|p| !p.is_empty()).map(|p| memmem::Finder::new(p.as_bytes())).collect();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// バイト列をスキャンして除去する
    pub fn strip_bytes(&self, path: &Path, input: &[u8]) -> Result<StripOutcome> {
        self.strip(path, input.len(), Scanner::new(input, self.profile))
    }

    /// セグメント列から出力を組み立てる
    pub fn strip<'a, I>(&self, path: &Path, size_hint: usize, segments: I) -> Result<StripOutcome>
    where
        I: IntoIterator<Item = Segment<'a>>,
    {
        let started = Instant::now();
        let mut emitter = Emitter::new(self.layout, size_hint);
        let mut pending: Vec<Segment<'a>> = Vec::new();
        let mut removed = Vec::new();
        let mut malformed = None;

        for (n, seg) in segments.into_iter().enumerate() {
            if let Some(limit) = self.timeout
                && n % DEADLINE_CHECK_INTERVAL == 0
                && started.elapsed() >= limit
            {
                return Err(CommenterError::Timeout { path: path.to_path_buf(), limit });
            }

            if !seg.terminated && malformed.is_none() {
                malformed = Some(MalformedNote { construct: seg.kind, line: seg.start_line });
            }

            if seg.is_comment() && !self.is_ignored(&seg) {
                pending.push(seg);
                continue;
            }

            self.flush(&mut emitter, &mut pending, seg.bytes.first().copied(), &mut removed, path);
            match seg.kind {
                SegmentKind::Code => emitter.code(seg.bytes),
                _ => emitter.literal(seg.bytes),
            }
        }
        self.flush(&mut emitter, &mut pending, None, &mut removed, path);

        Ok(StripOutcome { output: emitter.finish(), comments_removed: removed.len(), removed, malformed })
    }

    fn is_ignored(&self, seg: &Segment<'_>) -> bool {
        self.ignore.iter().any(|f| f.find(seg.bytes).is_some())
    }

    /// 保留中のコメントを確定させる
    ///
    /// 除去すると前後のバイトが連結して新しいコメント開始
    /// (`-` + `-` など) になる場合、最後の1件は残す。
    fn flush<'a>(
        &self,
        emitter: &mut Emitter,
        pending: &mut Vec<Segment<'a>>,
        next: Option<u8>,
        removed: &mut Vec<RemovedComment>,
        path: &Path,
    ) {
        if pending.is_empty() {
            return;
        }
        let keep_last = matches!((emitter.last_byte(), next), (Some(p), Some(n)) if self.glue.contains(&[p, n]));
        let count = pending.len();
        for (i, seg) in pending.drain(..).enumerate() {
            if keep_last && i + 1 == count {
                debug!("{}:{}: keeping comment to avoid joining tokens", path.display(), seg.start_line);
                emitter.literal(seg.bytes);
            } else {
                removed.push(RemovedComment::new(seg.start_line, &seg.text()));
                emitter.removed();
            }
        }
    }
}

// ============================================================================
// Emitter: 行単位のレイアウト調整
// ============================================================================

struct Emitter {
    layout: Layout,
    out: Vec<u8>,
    /// 現在行の出力開始位置
    line_start: usize,
    /// 現在行でコメントを除去した
    removal: bool,
    /// 現在行に空白以外の出力がある
    content: bool,
    /// 最後に起きたのがコメント除去 (以降は空白のみ)
    trailing_removal: bool,
}

impl Emitter {
    fn new(layout: Layout, capacity: usize) -> Self {
        Self {
            layout,
            out: Vec::with_capacity(capacity),
            line_start: 0,
            removal: false,
            content: false,
            trailing_removal: false,
        }
    }

    fn last_byte(&self) -> Option<u8> {
        self.out.last().copied()
    }

    fn removed(&mut self) {
        self.removal = true;
        self.trailing_removal = true;
    }

    fn code(&mut self, bytes: &[u8]) {
        if self.layout == Layout::Preserve {
            self.out.extend_from_slice(bytes);
            return;
        }
        let mut rest = bytes;
        while let Some(nl) = memchr(b'\n', rest) {
            let line = &rest[..nl];
            match line.strip_suffix(b"\r") {
                Some(body) => {
                    self.text(body);
                    self.end_line(b"\r\n");
                }
                None => {
                    self.text(line);
                    self.end_line(b"\n");
                }
            }
            rest = &rest[nl + 1..];
        }
        self.text(rest);
    }

    /// 文字列・保持コメント (内部の改行は行として扱わない)
    fn literal(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
        if self.layout == Layout::Preserve {
            return;
        }
        self.content = true;
        self.trailing_removal = false;
        if let Some(nl) = memrchr(b'\n', bytes) {
            self.line_start = self.out.len() - (bytes.len() - nl - 1);
            self.removal = false;
        }
    }

    fn text(&mut self, bytes: &[u8]) {
        if bytes.iter().any(|b| !b.is_ascii_whitespace()) {
            self.content = true;
            self.trailing_removal = false;
        }
        self.out.extend_from_slice(bytes);
    }

    fn end_line(&mut self, terminator: &[u8]) {
        let drop_line = self.settle_line();
        if !drop_line {
            self.out.extend_from_slice(terminator);
        }
        self.line_start = self.out.len();
        self.removal = false;
        self.content = false;
        self.trailing_removal = false;
    }

    /// 除去のあった行を整える。行ごと消すべきなら true
    fn settle_line(&mut self) -> bool {
        if !self.removal {
            return false;
        }
        if self.trailing_removal {
            let keep = self.out[self.line_start..].iter().rposition(|b| !matches!(b, b' ' | b'\t'));
            self.out.truncate(self.line_start + keep.map_or(0, |i| i + 1));
        }
        if !self.content {
            self.out.truncate(self.line_start);
            return true;
        }
        false
    }

    fn finish(mut self) -> Vec<u8> {
        if self.layout == Layout::Compact {
            self.settle_line();
        }
        self.out
    }
}
