use clap::ValueEnum;

/// 検出結果の取得元
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UploadBackend {
    /// 固定のサンプルデータ（擬似待ち時間あり）
    #[default]
    Sample,
    /// 検出サービスへmultipart送信
    Http,
}

impl UploadBackend {
    pub fn label(&self) -> &'static str {
        match self {
            UploadBackend::Sample => "sample",
            UploadBackend::Http => "http",
        }
    }
}
