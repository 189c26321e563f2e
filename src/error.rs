use cat_discovery_common::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatDiscoveryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("不正なバンルール: {0}")]
    Rule(#[from] cat_discovery_common::Error),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("Failed to fetch cat data. Try again. ({0})")]
    Fetch(FetchError),

    #[error("No more cats available due to your ban list 😿 ({attempts}回試行)")]
    NoCandidates { attempts: usize },

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for CatDiscoveryError {
    fn from(e: dialoguer::Error) -> Self {
        CatDiscoveryError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatDiscoveryError>;
