// crates/infra/src/scanner/state.rs
//! スキャナの状態

use commenter_domain::{BlockDelimiter, SegmentKind, StringDelimiter};

/// オートマトンの現在モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    LineComment,
    BlockComment(BlockDelimiter),
    EmbeddedComment(BlockDelimiter),
    StringLiteral {
        delim: StringDelimiter,
        /// 直前のバイトがエスケープ文字だった
        escape_pending: bool,
    },
}

/// 文字列内の1バイト処理結果
pub(crate) enum Step {
    Continue(ScanState),
    /// 終端クォートを消費して閉じる
    Close,
    /// 単一行文字列が改行に到達 (改行は消費しない)
    Break,
}

impl ScanState {
    /// この状態で生成されるセグメント種別
    pub const fn kind(self) -> SegmentKind {
        match self {
            Self::Normal => SegmentKind::Code,
            Self::LineComment => SegmentKind::LineComment,
            Self::BlockComment(_) => SegmentKind::BlockComment,
            Self::EmbeddedComment(_) => SegmentKind::EmbeddedComment,
            Self::StringLiteral { .. } => SegmentKind::StringLiteral,
        }
    }

    /// 文字列状態で1バイト進める
    pub(crate) fn step(self, b: u8) -> Step {
        let Self::StringLiteral { delim, escape_pending } = self else {
            return Step::Continue(self);
        };

        if escape_pending {
            // エスケープ直後のバイトは無条件に消費
            return Step::Continue(Self::StringLiteral { delim, escape_pending: false });
        }
        if delim.escape == Some(b) {
            return Step::Continue(Self::StringLiteral { delim, escape_pending: true });
        }
        if b == delim.quote {
            return Step::Close;
        }
        if !delim.multiline && matches!(b, b'\n' | b'\r') {
            return Step::Break;
        }
        Step::Continue(self)
    }
}
