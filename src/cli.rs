use crate::backend::UploadBackend;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelf-audit")]
#[command(about = "Captura de segmentos de anaquel y revisión de detecciones", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 検出結果の取得元 (sample/http)
    #[arg(long, value_enum, default_value = "sample", global = true)]
    pub backend: UploadBackend,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式ダッシュボードを起動
    Dashboard,

    /// 1枚の写真を解析して結果を表示
    Analyze {
        /// 写真ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// セグメント名（店舗レイアウトに存在する名前）
        #[arg(short, long)]
        segment: Option<String>,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 検出枠を描いた画像の出力先
        #[arg(short, long)]
        annotate: Option<PathBuf>,
    },

    /// 保存済みの結果でアラートを除外
    Omit {
        /// 結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 除外するレコードのID
        #[arg(long)]
        id: i64,

        /// 除外理由（定型: "Sin inventario" 等、それ以外は自由記述）
        #[arg(short, long)]
        reason: String,

        /// 出力先（省略時は上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保存済みの結果の集計を表示
    Summary {
        /// 結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// Success とみなす達成率の下限
        #[arg(long)]
        high: Option<u8>,

        /// Warning とみなす達成率の下限
        #[arg(long)]
        mid: Option<u8>,
    },

    /// 設定を表示/編集
    Config {
        /// 検出サービスのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
