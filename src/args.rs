// src/args.rs
use clap::{CommandFactory, FromArgMatches, Parser, ValueHint};
use commenter_domain::supported_extensions;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version} - Comment Remover
{about}

USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{options}
{after-help}";

const EXAMPLES: &str = "\
EXAMPLES:
    commenter src/main.go
    commenter 'src/**/*.ts'
    commenter --write --exclude '*.min.js,vendor/**' .
    commenter -i @ts-ignore,eslint-disable web/";

#[derive(Parser, Debug)]
#[command(
    name = "commenter",
    version,
    about = "ソースコードからコメントを安全に除去します（文字列リテラルは保持）",
    help_template = HELP_TEMPLATE
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// 対象のファイル・ディレクトリ・glob パターン（例: 'src/*.ts'）
    #[arg(value_hint = ValueHint::AnyPath, default_value = ".")]
    pub path: PathBuf,

    /// 変更をファイルへ書き戻す（省略時はプレビューのみ）
    #[arg(short, long)]
    pub write: bool,

    /// ディレクトリを再帰的に処理する（既定）
    #[arg(short, long, overrides_with = "no_recursive")]
    pub recursive: bool,

    /// 直下のファイルのみ処理する
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// 色付き出力を無効化
    #[arg(long)]
    pub no_color: bool,

    /// 除外する glob（カンマ区切り, 例: '*test.go,*.min.js'）
    #[arg(short, long, value_name = "GLOB", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// この文字列を含むコメントは残す（カンマ区切り, 例: '@ts-ignore,@deprecated'）
    #[arg(short, long = "ignore-pattern", value_name = "TEXT", value_delimiter = ',')]
    pub ignore_pattern: Vec<String>,

    /// 大きなファイル (>500 行) の警告を出さない
    #[arg(long)]
    pub no_warn_large: bool,

    /// コメントだけの行を削除し、末尾コメント前の空白も詰める
    #[arg(long)]
    pub compact: bool,

    /// 並列ワーカー数（既定: CPU 数）
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// ファイル毎の処理時間上限（秒）
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// 隠しファイル/ディレクトリを対象外にする
    #[arg(long)]
    pub no_hidden: bool,

    /// .gitignore を無視する（.commenterignore は常に有効）
    #[arg(long)]
    pub no_gitignore: bool,

    /// 設定ファイル（既定: ./commenter.config.json）
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// 詳細ログ (debug) を出力
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the process arguments with the supported file list in the help footer.
    pub fn parse_cli() -> Self {
        let matches = Self::command().after_help(after_help()).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Explicit recursion choice; `None` when neither flag was given.
    pub fn recursion(&self) -> Option<bool> {
        if self.no_recursive {
            Some(false)
        } else if self.recursive {
            Some(true)
        } else {
            None
        }
    }

    /// Drops blank entries left by `a,,b` or trailing commas.
    pub fn trimmed(values: &[String]) -> Vec<String> {
        values.iter().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()).collect()
    }
}

/// Help footer listing the supported extensions.
pub fn after_help() -> String {
    let extensions: Vec<String> = supported_extensions().collect();
    format!("SUPPORTED FILES:\n    {}\n\n{EXAMPLES}", extensions.join(" "))
}
