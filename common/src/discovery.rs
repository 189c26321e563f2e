//! ディスカバリーループ
//!
//! 候補を1件ずつ取得し、バンリストに該当しなければ採用する。
//! 該当した場合は上限回数まで取り直す。取得自体の失敗は即座に終了（リトライしない）。

use crate::error::FetchError;
use crate::exclusion::{is_excluded, ExclusionRule};
use crate::types::Candidate;

/// 最大試行回数
pub const MAX_ATTEMPTS: usize = 10;

/// 候補の取得元
///
/// ブラウザの fetch は `Send` でないため、Future に `Send` 制約は付けない。
#[allow(async_fn_in_trait)]
pub trait CandidateSource {
    /// 品種情報付きの候補を1件取得
    async fn fetch_candidate(&self) -> Result<Candidate, FetchError>;
}

/// ディスカバリーの結果
#[derive(Debug, Clone, PartialEq)]
pub enum Discovery {
    /// バンリストに該当しない候補が見つかった
    Accepted { candidate: Candidate, attempts: usize },
    /// 上限回数まですべてバン対象だった
    NotFound { attempts: usize },
    /// 取得に失敗した（通信・ステータス・パース）
    FetchFailed { attempts: usize, error: FetchError },
}

impl Discovery {
    /// 発行したリクエスト数
    pub fn attempts(&self) -> usize {
        match self {
            Discovery::Accepted { attempts, .. }
            | Discovery::NotFound { attempts }
            | Discovery::FetchFailed { attempts, .. } => *attempts,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Discovery::Accepted { candidate, .. } => Some(candidate),
            _ => None,
        }
    }

    /// ユーザー向けの通知文（採用時は None）
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Discovery::Accepted { .. } => None,
            Discovery::NotFound { .. } => Some("No more cats available due to your ban list 😿"),
            Discovery::FetchFailed { .. } => Some("Failed to fetch cat data. Try again."),
        }
    }

    /// 表示中の候補を結果で更新する
    ///
    /// NotFound は表示を消し、FetchFailed は直前の表示を残す。
    pub fn update_current(self, current: &mut Option<Candidate>) {
        match self {
            Discovery::Accepted { candidate, .. } => *current = Some(candidate),
            Discovery::NotFound { .. } => *current = None,
            Discovery::FetchFailed { .. } => {}
        }
    }
}

/// 最大 `MAX_ATTEMPTS` 回まで候補を探す
pub async fn discover<S: CandidateSource>(source: &S, rules: &[ExclusionRule]) -> Discovery {
    discover_with_limit(source, rules, MAX_ATTEMPTS).await
}

/// 試行回数を指定して候補を探す（0 は 1 とみなす）
///
/// `rules` は呼び出し時点のスナップショットとして扱い、ループ中は変化しない。
pub async fn discover_with_limit<S: CandidateSource>(
    source: &S,
    rules: &[ExclusionRule],
    max_attempts: usize,
) -> Discovery {
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let candidate = match source.fetch_candidate().await {
            Ok(candidate) => candidate,
            Err(error) => {
                tracing::warn!(attempt, %error, "Candidate fetch failed");
                return Discovery::FetchFailed {
                    attempts: attempt,
                    error,
                };
            }
        };

        let excluded = is_excluded(&candidate, rules);
        tracing::debug!(attempt, id = %candidate.id, excluded, "Candidate checked");

        if !excluded {
            return Discovery::Accepted {
                candidate,
                attempts: attempt,
            };
        }
    }

    tracing::info!(attempts = max_attempts, rules = rules.len(), "Every candidate was banned");
    Discovery::NotFound {
        attempts: max_attempts,
    }
}
