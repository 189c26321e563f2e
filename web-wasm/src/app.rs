//! メインアプリケーションコンポーネント

use crate::api::cat_api::CatApi;
use crate::components::{
    ban_list::BanList,
    cat_card::CatCard,
    controls::{Controls, PresetBans},
    header::Header,
};
use cat_discovery_common::{Candidate, Discovery, ExclusionList, ExclusionRule, discover};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態（バンリストはセッション限り）
    let (cat, set_cat) = signal(None::<Candidate>);
    let (bans, set_bans) = signal(ExclusionList::new());
    let (loading, set_loading) = signal(false);
    let (notice, set_notice) = signal(None::<String>);

    // Discover: 実行中は二重起動しない
    let on_discover = move |_: ()| {
        if loading.get_untracked() {
            return;
        }
        let rules = bans.get_untracked().rules().to_vec();
        set_loading.set(true);
        set_notice.set(None);

        spawn_local(async move {
            let outcome = discover(&CatApi::default(), &rules).await;
            if let Discovery::FetchFailed { error, .. } = &outcome {
                gloo::console::error!(error.to_string());
            }

            set_notice.set(outcome.notice().map(str::to_string));
            set_cat.update(|current| outcome.update_current(current));
            set_loading.set(false);
        });
    };

    let on_ban = move |rule: ExclusionRule| {
        set_bans.update(|list| {
            list.add(rule);
        });
    };

    let on_unban = move |index: usize| {
        set_bans.update(|list| {
            list.remove(index);
        });
    };

    let on_clear = move |_: ()| set_bans.update(ExclusionList::clear);

    view! {
        <div class="container">
            <Header />

            <Controls loading=loading on_discover=on_discover on_clear=on_clear />

            <PresetBans on_ban=on_ban />

            <BanList bans=bans on_remove=on_unban />

            <Show when=move || notice.get().is_some()>
                <p class="notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>

            <CatCard cat=cat on_ban=on_ban />
        </div>
    }
}
