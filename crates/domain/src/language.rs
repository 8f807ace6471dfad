//! 言語プロファイル定義
//!
//! 拡張子ごとのコメント構文と文字列構文をデータとして保持します。
//! 言語の追加はテーブルへのエントリ追加のみで完結し、
//! スキャナ側に言語固有の分岐は存在しません。

use std::path::Path;

/// ブロックコメント (開始/終了) の区切り
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDelimiter {
    pub open: &'static str,
    pub close: &'static str,
}

/// 文字列リテラルの区切り
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDelimiter {
    /// 開始と終了を兼ねるクォート文字
    pub quote: u8,
    /// エスケープ文字 (Go の raw string や SQL のように持たない場合は None)
    pub escape: Option<u8>,
    /// 改行をまたげるか (テンプレートリテラル, raw string 等)
    pub multiline: bool,
}

impl StringDelimiter {
    const fn escaped(quote: u8) -> Self {
        Self { quote, escape: Some(b'\\'), multiline: false }
    }

    const fn escaped_multiline(quote: u8) -> Self {
        Self { quote, escape: Some(b'\\'), multiline: true }
    }

    const fn raw_multiline(quote: u8) -> Self {
        Self { quote, escape: None, multiline: true }
    }
}

/// 言語プロファイル
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageProfile {
    /// 表示名
    pub name: &'static str,
    /// 対応拡張子 (ドットなし・小文字)
    pub extensions: &'static [&'static str],
    /// 行コメントマーカー
    pub line_comments: &'static [&'static str],
    /// ブロックコメント区切り
    pub block_comments: &'static [BlockDelimiter],
    /// マークアップ埋め込みコメント (JSX の `{/* ... */}`)
    pub embedded_comment: Option<BlockDelimiter>,
    /// 文字列区切り
    pub strings: &'static [StringDelimiter],
}

impl LanguageProfile {
    /// 先頭バイトがいずれかの開始トークンになり得るか
    pub fn opener_bytes(&self) -> [bool; 256] {
        let mut table = [false; 256];
        let tokens = self
            .line_comments
            .iter()
            .chain(self.block_comments.iter().map(|b| &b.open))
            .chain(self.embedded_comment.iter().map(|b| &b.open));
        for token in tokens {
            if let Some(&first) = token.as_bytes().first() {
                table[usize::from(first)] = true;
            }
        }
        for s in self.strings {
            table[usize::from(s.quote)] = true;
        }
        table
    }
}

const C_BLOCK: BlockDelimiter = BlockDelimiter { open: "/*", close: "*/" };
const JSX_EMBEDDED: BlockDelimiter = BlockDelimiter { open: "{/*", close: "*/}" };

const JS_STRINGS: &[StringDelimiter] = &[
    StringDelimiter::escaped(b'"'),
    StringDelimiter::escaped(b'\''),
    // テンプレートリテラル
    StringDelimiter::escaped_multiline(b'`'),
];

// ============================================================================
// プロファイルテーブル
// ============================================================================

pub static TYPESCRIPT: LanguageProfile = LanguageProfile {
    name: "TypeScript/JavaScript",
    extensions: &["ts", "js"],
    line_comments: &["//"],
    block_comments: &[C_BLOCK],
    embedded_comment: None,
    strings: JS_STRINGS,
};

/// JSX/TSX: マークアップ中の `{/* */}` を1単位として扱う
pub static TSX: LanguageProfile = LanguageProfile {
    name: "TSX/JSX",
    extensions: &["tsx", "jsx"],
    line_comments: &["//"],
    block_comments: &[C_BLOCK],
    embedded_comment: Some(JSX_EMBEDDED),
    strings: JS_STRINGS,
};

pub static GO: LanguageProfile = LanguageProfile {
    name: "Go",
    extensions: &["go"],
    line_comments: &["//"],
    block_comments: &[C_BLOCK],
    embedded_comment: None,
    strings: &[
        StringDelimiter::escaped(b'"'),
        // rune リテラル
        StringDelimiter::escaped(b'\''),
        // raw string はエスケープなし・複数行可
        StringDelimiter::raw_multiline(b'`'),
    ],
};

/// SQL: 'It''s' のような二重クォートは「閉じて再度開く」として自然に処理される
pub static SQL: LanguageProfile = LanguageProfile {
    name: "SQL",
    extensions: &["sql"],
    line_comments: &["--"],
    block_comments: &[C_BLOCK],
    embedded_comment: None,
    strings: &[StringDelimiter::raw_multiline(b'\''), StringDelimiter::raw_multiline(b'"')],
};

/// JSON: 本ツールでは JSONC と同様に C スタイルのコメントを受け付ける
pub static JSON: LanguageProfile = LanguageProfile {
    name: "JSON",
    extensions: &["json"],
    line_comments: &["//"],
    block_comments: &[C_BLOCK],
    embedded_comment: None,
    strings: &[StringDelimiter::escaped(b'"')],
};

/// 対応言語の一覧 (ヘルプ表示順)
pub static PROFILES: &[&LanguageProfile] = &[&TYPESCRIPT, &TSX, &GO, &SQL, &JSON];

/// 拡張子からプロファイルを取得 (先頭のドットは任意, 大文字小文字を区別しない)
pub fn profile_for(extension: &str) -> Option<&'static LanguageProfile> {
    let ext = extension.strip_prefix('.').unwrap_or(extension).to_ascii_lowercase();
    PROFILES.iter().copied().find(|p| p.extensions.contains(&ext.as_str()))
}

/// パスの拡張子からプロファイルを取得
pub fn profile_for_path(path: &Path) -> Option<&'static LanguageProfile> {
    path.extension().and_then(|e| e.to_str()).and_then(profile_for)
}

/// 対応拡張子をドット付きで列挙
pub fn supported_extensions() -> impl Iterator<Item = String> {
    PROFILES.iter().flat_map(|p| p.extensions.iter().map(|e| format!(".{e}")))
}
