// crates/infra/src/scanner.rs
//! 字句スキャナ
//!
//! 入力バイト列を1パスで走査し、Code / 文字列 / 各種コメントに分類した
//! セグメント列を遅延生成します。言語ごとの差異はすべて
//! [`LanguageProfile`] のデータで表現され、ここには言語固有の分岐はありません。

mod state;

use commenter_domain::{LanguageProfile, Segment, SegmentKind};
use memchr::{memchr2, memmem};
pub use state::ScanState;
use state::Step;

/// セグメントイテレータ (1ファイルにつき1回だけ消費する)
pub struct Scanner<'a> {
    input: &'a [u8],
    profile: &'static LanguageProfile,
    /// 開始トークンの先頭になり得るバイト
    openers: [bool; 256],
    pos: usize,
    /// `pos` の行番号 (1始まり)
    line: usize,
    /// Code 走査中に検出済みの次の開始状態 (`pos` で有効)
    pending: Option<ScanState>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8], profile: &'static LanguageProfile) -> Self {
        Self { input, profile, openers: profile.opener_bytes(), pos: 0, line: 1, pending: None }
    }

    // ========================================================================
    // 開始トークン判定
    // ========================================================================

    /// `at` から始まる開始トークンを判定する
    ///
    /// 優先順位: 埋め込みコメント → ブロックコメント → 行コメント → 文字列
    fn opener_at(&self, at: usize) -> Option<ScanState> {
        let rest = &self.input[at..];

        if let Some(emb) = self.profile.embedded_comment
            && rest.starts_with(emb.open.as_bytes())
            && self.embedded_closes(at + emb.open.len(), emb.close.as_bytes())
        {
            return Some(ScanState::EmbeddedComment(emb));
        }

        if let Some(block) = self.profile.block_comments.iter().find(|b| rest.starts_with(b.open.as_bytes())) {
            return Some(ScanState::BlockComment(*block));
        }

        if self.profile.line_comments.iter().any(|m| rest.starts_with(m.as_bytes())) {
            return Some(ScanState::LineComment);
        }

        let first = *rest.first()?;
        self.profile
            .strings
            .iter()
            .find(|s| s.quote == first)
            .map(|s| ScanState::StringLiteral { delim: *s, escape_pending: false })
    }

    /// 埋め込みコメントは、開始後最初の内側終端 (`*/`) の直後が
    /// 終端の最終バイト (`}`) である場合のみ成立する
    fn embedded_closes(&self, from: usize, close: &[u8]) -> bool {
        let Some((&last, inner)) = close.split_last() else {
            return false;
        };
        let Some(tail) = self.input.get(from..) else {
            return false;
        };
        memmem::find(tail, inner).is_some_and(|i| self.input.get(from + i + inner.len()) == Some(&last))
    }

    // ========================================================================
    // 状態ごとの消費
    // ========================================================================

    /// 開始状態 `state` のセグメント終端を求める: (終端位置, 正常に閉じたか)
    fn consume(&self, state: ScanState) -> (usize, bool) {
        let start = self.pos;
        let len = self.input.len();
        match state {
            ScanState::Normal => (self.scan_code(start).0, true),
            ScanState::LineComment => {
                // 改行は Code 側に属する
                let end = memchr2(b'\n', b'\r', &self.input[start..]).map_or(len, |i| start + i);
                (end, true)
            }
            ScanState::BlockComment(delim) | ScanState::EmbeddedComment(delim) => {
                let body = start + delim.open.len();
                let close = delim.close.as_bytes();
                match memmem::find(&self.input[body..], close) {
                    Some(i) => (body + i + close.len(), true),
                    None => (len, false),
                }
            }
            ScanState::StringLiteral { .. } => self.scan_string(state),
        }
    }

    /// 次の開始トークンまでを Code として読み進める
    fn scan_code(&self, start: usize) -> (usize, Option<ScanState>) {
        let mut i = start;
        while i < self.input.len() {
            if self.openers[usize::from(self.input[i])]
                && let Some(state) = self.opener_at(i)
            {
                return (i, Some(state));
            }
            i += 1;
        }
        (i, None)
    }

    /// 文字列リテラルをバイト単位の状態遷移で読み進める
    fn scan_string(&self, mut state: ScanState) -> (usize, bool) {
        let mut i = self.pos + 1;
        while i < self.input.len() {
            let b = self.input[i];
            match state.step(b) {
                Step::Continue(next) => state = next,
                Step::Close => return (i + 1, true),
                // 単一行文字列は改行の手前で打ち切り, 改行は Code へ
                Step::Break => return (i, true),
            }
            i += 1;
        }
        (self.input.len(), false)
    }

    fn segment(&mut self, kind: SegmentKind, end: usize, terminated: bool) -> Segment<'a> {
        let start = self.pos;
        let bytes = &self.input[start..end];
        let newlines = bytecount::count(bytes, b'\n');
        let end_line = self.line + newlines - usize::from(bytes.last() == Some(&b'\n'));
        let seg = Segment { kind, bytes, span: start..end, start_line: self.line, end_line, terminated };
        self.line += newlines;
        self.pos = end;
        seg
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let state = match self.pending.take() {
            Some(state) => state,
            None => self.opener_at(self.pos).unwrap_or(ScanState::Normal),
        };

        if let ScanState::Normal = state {
            let (end, next) = self.scan_code(self.pos);
            self.pending = next;
            return Some(self.segment(SegmentKind::Code, end, true));
        }

        let (end, terminated) = self.consume(state);
        Some(self.segment(state.kind(), end, terminated))
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// `input` を `profile` に従ってセグメント化する
pub fn scan<'a>(input: &'a [u8], profile: &'static LanguageProfile) -> Scanner<'a> {
    Scanner::new(input, profile)
}
