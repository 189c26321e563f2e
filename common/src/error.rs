//! エラー型定義

use thiserror::Error;

/// 共通エラー型（ルール解析など）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown attribute: {0} (use breed, origin or temperament)")]
    UnknownAttribute(String),

    #[error("invalid rule: {0} (expected kind=value)")]
    InvalidRule(String),
}

/// 画像APIからの取得失敗
///
/// どの種類でもディスカバリーループは即座に終了する（リトライしない）。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("API returned no images")]
    EmptyResponse,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
