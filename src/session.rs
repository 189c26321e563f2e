//! 対話式ディスカバリーセッション
//!
//! メニューから「探す」「バン追加」「バン削除」「全クリア」を選び、
//! バンリストはセッション終了とともに破棄する。

use crate::error::{CatDiscoveryError, Result};
use crate::render::{format_ban_list, format_candidate};
use cat_discovery_common::{
    Candidate, CandidateSource, Discovery, ExclusionList, ExclusionRule, ban_targets,
    discover_with_limit,
};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// セッション状態（UIシェルが保持する状態）
#[derive(Debug, Default)]
pub struct SessionState {
    pub bans: ExclusionList,
    pub current: Option<Candidate>,
    pub notice: Option<String>,
}

impl SessionState {
    pub fn new(bans: ExclusionList) -> Self {
        Self {
            bans,
            ..Default::default()
        }
    }

    /// ディスカバリー結果を状態に反映
    ///
    /// - Accepted: 表示中の猫を差し替え
    /// - NotFound: 表示中の猫を消す
    /// - FetchFailed: 表示中の猫はそのまま
    pub fn apply(&mut self, outcome: Discovery) {
        self.notice = outcome.notice().map(str::to_string);
        outcome.update_current(&mut self.current);
    }

    /// 表示中の猫からバンできるルール
    pub fn ban_targets(&self) -> Vec<ExclusionRule> {
        self.current.as_ref().map(ban_targets).unwrap_or_default()
    }
}

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Discover,
    BanFromCurrent,
    BanByHand,
    RemoveBan,
    ClearBans,
    ShowBans,
    Quit,
}

impl MenuAction {
    /// 状態に応じて選べる項目
    pub fn available(state: &SessionState) -> Vec<MenuAction> {
        let mut actions = vec![MenuAction::Discover];
        if !state.ban_targets().is_empty() {
            actions.push(MenuAction::BanFromCurrent);
        }
        actions.push(MenuAction::BanByHand);
        if !state.bans.is_empty() {
            actions.push(MenuAction::RemoveBan);
            actions.push(MenuAction::ClearBans);
        }
        actions.push(MenuAction::ShowBans);
        actions.push(MenuAction::Quit);
        actions
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Discover => "Discover",
            MenuAction::BanFromCurrent => "この猫の属性をバン",
            MenuAction::BanByHand => "バンルールを入力",
            MenuAction::RemoveBan => "バンを削除",
            MenuAction::ClearBans => "Clear Ban List",
            MenuAction::ShowBans => "バンリストを表示",
            MenuAction::Quit => "終了",
        }
    }
}

/// 対話セッションを実行
pub async fn run_session<S: CandidateSource>(
    source: &S,
    bans: ExclusionList,
    max_attempts: usize,
) -> Result<()> {
    let mut state = SessionState::new(bans);

    println!("🐱 Discover Random Cats");
    println!("Discover で猫を表示し、属性を選んでバンできます\n");
    println!("{}\n", format_ban_list(&state.bans));

    loop {
        let actions = MenuAction::available(&state);
        let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();
        let selected = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[selected] {
            MenuAction::Discover => {
                // ループ開始時点のバンリストを使う
                let rules = state.bans.rules().to_vec();
                let outcome = run_with_spinner(source, &rules, max_attempts).await;
                tracing::info!(attempts = outcome.attempts(), "Discovery finished");
                state.apply(outcome);

                if let Some(notice) = &state.notice {
                    println!("⚠ {}\n", notice);
                }
                if let Some(cat) = &state.current {
                    println!("{}\n", format_candidate(cat));
                }
            }
            MenuAction::BanFromCurrent => {
                let targets = state.ban_targets();
                let labels: Vec<String> = targets.iter().map(|r| r.to_string()).collect();
                let selected = Select::new()
                    .with_prompt("バンする属性")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                add_ban(&mut state.bans, targets[selected].clone());
            }
            MenuAction::BanByHand => {
                let input: String = Input::new()
                    .with_prompt("バンルール (breed|origin|temperament=値)")
                    .interact_text()?;
                match input.parse::<ExclusionRule>() {
                    Ok(rule) => add_ban(&mut state.bans, rule),
                    Err(e) => println!("⚠ {}\n", e),
                }
            }
            MenuAction::RemoveBan => {
                let labels: Vec<String> = state.bans.iter().map(|r| r.to_string()).collect();
                let selected = Select::new()
                    .with_prompt("削除するバン")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                if let Some(rule) = state.bans.remove(selected) {
                    println!("✔ 削除: {}\n", rule);
                }
            }
            MenuAction::ClearBans => {
                state.bans.clear();
                println!("✔ バンリストをクリアしました\n");
            }
            MenuAction::ShowBans => {
                println!("{}\n", format_ban_list(&state.bans));
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

fn add_ban(bans: &mut ExclusionList, rule: ExclusionRule) {
    let label = rule.to_string();
    if bans.add(rule) {
        println!("✔ バン追加: {}\n", label);
    } else {
        println!("- 既にバン済み: {}\n", label);
    }
}

/// 一回きりの探索結果を候補かエラーに変換
///
/// エラーの表示文にはセッション画面と同じ通知文が入る。
pub fn into_candidate(outcome: Discovery) -> Result<Candidate> {
    match outcome {
        Discovery::Accepted { candidate, .. } => Ok(candidate),
        Discovery::NotFound { attempts } => Err(CatDiscoveryError::NoCandidates { attempts }),
        Discovery::FetchFailed { error, .. } => Err(CatDiscoveryError::Fetch(error)),
    }
}

/// スピナーを表示しながらディスカバリーを実行
pub async fn run_with_spinner<S: CandidateSource>(
    source: &S,
    rules: &[ExclusionRule],
    max_attempts: usize,
) -> Discovery {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = discover_with_limit(source, rules, max_attempts).await;

    spinner.finish_and_clear();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use cat_discovery_common::{AttributeKind, Breed, FetchError};

    fn cat(id: &str) -> Candidate {
        Candidate {
            id: id.into(),
            url: format!("https://example.com/{}.jpg", id),
            breeds: vec![Breed {
                name: Some("Chartreux".into()),
                origin: Some("France".into()),
                temperament: Some("Calm".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_accepted_replaces_current() {
        let mut state = SessionState::default();
        state.apply(Discovery::Accepted { candidate: cat("a"), attempts: 1 });
        assert_eq!(state.current.as_ref().map(|c| c.id.as_str()), Some("a"));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_apply_not_found_clears_current() {
        let mut state = SessionState::default();
        state.apply(Discovery::Accepted { candidate: cat("a"), attempts: 1 });
        state.apply(Discovery::NotFound { attempts: 10 });
        assert!(state.current.is_none());
        assert!(state.notice.as_deref().unwrap().contains("ban list"));
    }

    #[test]
    fn test_apply_fetch_failed_keeps_current() {
        let mut state = SessionState::default();
        state.apply(Discovery::Accepted { candidate: cat("a"), attempts: 1 });
        state.apply(Discovery::FetchFailed { attempts: 1, error: FetchError::Status(502) });
        assert_eq!(state.current.as_ref().map(|c| c.id.as_str()), Some("a"));
        assert_eq!(state.notice.as_deref(), Some("Failed to fetch cat data. Try again."));
    }

    #[test]
    fn test_into_candidate_messages_match_notice() {
        let not_found = Discovery::NotFound { attempts: 10 };
        let notice = not_found.notice().unwrap();
        let err = into_candidate(not_found).unwrap_err();
        assert!(matches!(err, CatDiscoveryError::NoCandidates { attempts: 10 }));
        assert!(err.to_string().starts_with(notice));

        let failed = Discovery::FetchFailed { attempts: 1, error: FetchError::Status(500) };
        let notice = failed.notice().unwrap();
        let err = into_candidate(failed).unwrap_err();
        assert!(err.to_string().starts_with(notice));
        assert!(err.to_string().contains("500"));

        let ok = into_candidate(Discovery::Accepted { candidate: cat("a"), attempts: 2 });
        assert_eq!(ok.unwrap().id, "a");
    }

    #[test]
    fn test_menu_without_cat_or_bans() {
        let state = SessionState::default();
        assert_eq!(
            MenuAction::available(&state),
            vec![
                MenuAction::Discover,
                MenuAction::BanByHand,
                MenuAction::ShowBans,
                MenuAction::Quit,
            ]
        );
    }

    #[test]
    fn test_menu_with_cat_and_bans() {
        let mut state = SessionState::default();
        state.bans.add(ExclusionRule::new(AttributeKind::Origin, "Japan"));
        state.current = Some(cat("a"));

        let actions = MenuAction::available(&state);
        assert!(actions.contains(&MenuAction::BanFromCurrent));
        assert!(actions.contains(&MenuAction::RemoveBan));
        assert!(actions.contains(&MenuAction::ClearBans));
        assert_eq!(state.ban_targets().len(), 3);
    }
}
