//! 画像API（TheCatAPI）の共通定義
//!
//! ネイティブ(reqwest)とWeb(fetch)の両方から使うURL・ヘッダー・レスポンス処理。

use crate::error::FetchError;
use crate::types::Candidate;

pub const DEFAULT_API_BASE: &str = "https://api.thecatapi.com/v1";

/// APIキーを渡すヘッダー名
pub const API_KEY_HEADER: &str = "x-api-key";

/// 品種情報付きの画像を1件だけ要求するURL
pub fn search_url(base: &str) -> String {
    format!(
        "{}/images/search?limit=1&has_breeds=1",
        base.trim_end_matches('/')
    )
}

/// レスポンス配列から先頭の候補を取り出す
pub fn take_first(candidates: Vec<Candidate>) -> Result<Candidate, FetchError> {
    candidates
        .into_iter()
        .next()
        .ok_or(FetchError::EmptyResponse)
}

/// レスポンス本文(JSON)をパースして候補を1件返す
pub fn parse_search_response(body: &str) -> Result<Candidate, FetchError> {
    let candidates: Vec<Candidate> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    take_first(candidates)
}
