use crate::error::{CatDiscoveryError, Result};
use cat_discovery_common::{DEFAULT_API_BASE, MAX_ATTEMPTS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーの環境変数名（設定ファイルより優先）
pub const API_KEY_ENV: &str = "CAT_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub max_attempts: usize,
    pub timeout_seconds: u64,
}

/// `config` コマンドでまとめて行う変更
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub max_attempts: Option<usize>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.api_base_url.is_none() && self.max_attempts.is_none()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE.into(),
            max_attempts: MAX_ATTEMPTS,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 変更を検証・反映して保存
    pub fn update(update: &ConfigUpdate) -> Result<Self> {
        Self::update_at(&Self::config_path()?, update)
    }

    /// 指定パスの設定に変更を反映して保存（検証に失敗したらファイルは触らない）
    pub fn update_at(path: &Path, update: &ConfigUpdate) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.apply(update)?;
        config.save_to(path)?;
        Ok(config)
    }

    /// すべての変更を検証してから反映する（1つでも不正なら何も変えない）
    pub fn apply(&mut self, update: &ConfigUpdate) -> Result<()> {
        let mut next = self.clone();
        if let Some(key) = &update.api_key {
            next.set_api_key(key.clone());
        }
        if let Some(url) = &update.api_base_url {
            next.set_api_base_url(url.clone())?;
        }
        if let Some(attempts) = update.max_attempts {
            next.set_max_attempts(attempts)?;
        }
        *self = next;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatDiscoveryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cat-discovery").join("config.json"))
    }

    /// APIキー（環境変数を優先、未設定なら None）
    pub fn api_key(&self) -> Option<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn resolve_api_key(env: Option<String>, stored: Option<&str>) -> Option<String> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| stored.filter(|k| !k.trim().is_empty()).map(str::to_string))
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CatDiscoveryError::Config(format!(
                "URLは http:// または https:// で始まる必要があります: {}",
                trimmed
            )));
        }
        self.api_base_url = trimmed.to_string();
        Ok(())
    }

    pub fn set_max_attempts(&mut self, attempts: usize) -> Result<()> {
        if attempts == 0 {
            return Err(CatDiscoveryError::Config("試行回数は1以上を指定してください".into()));
        }
        self.max_attempts = attempts;
        Ok(())
    }
}
