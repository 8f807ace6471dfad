use std::{borrow::Cow, fmt, ops::Range};

/// スキャナが分類するセグメントの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Code,
    LineComment,
    BlockComment,
    /// マークアップ埋め込みコメント `{/* ... */}`
    EmbeddedComment,
    StringLiteral,
}

impl SegmentKind {
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment | Self::EmbeddedComment)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::EmbeddedComment => "embedded comment",
            Self::StringLiteral => "string literal",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 入力バイト列の連続した一区間
///
/// 1回のスキャン中のみ有効で、元バッファを借用します。
/// 全セグメントを順に連結すると入力と完全に一致します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub bytes: &'a [u8],
    /// 入力中のバイト範囲
    pub span: Range<usize>,
    /// 開始行 (1始まり)
    pub start_line: usize,
    /// 終了行 (1始まり, 最終バイトを含む行)
    pub end_line: usize,
    /// 文字列/コメントが閉じる前に EOF に達した場合は false
    pub terminated: bool,
}

impl Segment<'_> {
    #[inline]
    pub const fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 表示用テキスト (不正な UTF-8 は置換文字)
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.bytes)
    }
}
