//! 画像APIレコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Candidate: `/images/search` が返す画像1件
//! - Breed: 画像に付随する品種情報

use serde::{Deserialize, Serialize};

/// 取得した猫画像（候補）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// 品種情報（`has_breeds=1` でも欠落しうる）
    pub breeds: Vec<Breed>,
}

/// 品種情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breed {
    pub id: Option<String>,
    pub name: Option<String>,
    pub origin: Option<String>,
    pub life_span: Option<String>,        // "12 - 15" のような年数範囲
    pub temperament: Option<String>,      // カンマ区切りの性格
    pub description: Option<String>,
    pub wikipedia_url: Option<String>,
}

impl Candidate {
    /// 代表品種（先頭の品種）
    pub fn breed(&self) -> Option<&Breed> {
        self.breeds.first()
    }
}

impl Breed {
    /// 性格をカンマで分割し、前後の空白を除いて返す
    pub fn temperaments(&self) -> impl Iterator<Item = &str> {
        self.temperament
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// 空文字列を `None` として扱う
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
