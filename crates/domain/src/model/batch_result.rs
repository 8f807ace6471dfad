use crate::model::FileResult;

/// 集計値
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTotals {
    /// 読み込みと除去が成功したファイル数
    pub files_processed: usize,
    pub comments_removed: usize,
    /// 処理したファイルの元の行数合計
    pub lines_processed: usize,
    pub files_written: usize,
    pub skipped: usize,
    pub failures: usize,
}

impl BatchTotals {
    fn add(&mut self, r: &FileResult) {
        if r.is_success() {
            self.files_processed += 1;
            self.comments_removed += r.comments_removed;
            self.lines_processed += r.original_lines;
        } else if r.is_error() {
            self.failures += 1;
        } else {
            self.skipped += 1;
        }
        if r.persisted {
            self.files_written += 1;
        }
    }
}

/// 全ファイルの試行後に確定するバッチ結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    files: Vec<FileResult>,
    totals: BatchTotals,
}

impl BatchResult {
    /// 結果をパス順に整列して集計する
    pub fn from_results(mut files: Vec<FileResult>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        let mut totals = BatchTotals::default();
        for f in &files {
            totals.add(f);
        }
        Self { files, totals }
    }

    #[inline]
    pub fn files(&self) -> &[FileResult] {
        &self.files
    }

    #[inline]
    pub fn totals(&self) -> BatchTotals {
        self.totals
    }

    /// いずれかのファイルが Error で終わったか
    #[inline]
    pub fn failed(&self) -> bool {
        self.totals.failures > 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| f.is_error())
    }

    pub fn into_files(self) -> Vec<FileResult> {
        self.files
    }
}
