//! 操作ボタンコンポーネント
//!
//! Discover / Clear Ban List と定番バンのボタン

use cat_discovery_common::{AttributeKind, ExclusionRule, preset_rules};
use leptos::prelude::*;

#[component]
pub fn Controls<FD, FC>(
    loading: ReadSignal<bool>,
    on_discover: FD,
    on_clear: FC,
) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="controls">
            <button
                class="btn btn-primary"
                disabled=move || loading.get()
                on:click={
                    let on_discover = on_discover.clone();
                    move |_| on_discover(())
                }
            >
                {move || if loading.get() { "Loading..." } else { "Discover" }}
            </button>

            <button
                class="btn btn-secondary"
                on:click={
                    let on_clear = on_clear.clone();
                    move |_| on_clear(())
                }
            >
                "Clear Ban List"
            </button>
        </div>
    }
}

#[component]
pub fn PresetBans<FB>(on_ban: FB) -> impl IntoView
where
    FB: Fn(ExclusionRule) + 'static + Clone + Send + Sync,
{
    let buttons = preset_rules()
        .into_iter()
        .map(|rule| {
            let label = preset_label(&rule);
            let on_ban = on_ban.clone();
            view! {
                <button class="btn btn-tertiary" on:click=move |_| on_ban(rule.clone())>
                    {label}
                </button>
            }
        })
        .collect_view();

    view! { <div class="ban-buttons">{buttons}</div> }
}

/// 定番バンボタンの文言
pub fn preset_label(rule: &ExclusionRule) -> String {
    match rule.kind {
        AttributeKind::Breed => format!("Ban {} Breed", rule.value),
        AttributeKind::Origin => format!("Ban Cats from {}", rule.value),
        AttributeKind::Temperament => format!("Ban {} Cats", rule.value),
    }
}
