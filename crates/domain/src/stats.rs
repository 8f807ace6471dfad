//! 行数統計

/// 1ファイル分の行数 (除去前/除去後)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub original: usize,
    pub remaining: usize,
}

impl LineStats {
    pub fn from_io(input: &[u8], output: &[u8]) -> Self {
        Self { original: count_lines(input), remaining: count_lines(output) }
    }
}

/// `\n` の数 + 末尾が改行で終わらない非空バッファなら 1
pub fn count_lines(buf: &[u8]) -> usize {
    let newlines = bytecount::count(buf, b'\n');
    match buf.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}
