//! バンリストコンポーネント

use cat_discovery_common::{ExclusionList, ExclusionRule};
use leptos::prelude::*;

#[component]
pub fn BanList<FR>(bans: ReadSignal<ExclusionList>, on_remove: FR) -> impl IntoView
where
    FR: Fn(usize) + 'static + Clone + Send + Sync,
{
    let entries = move || {
        bans.get()
            .iter()
            .cloned()
            .enumerate()
            .collect::<Vec<(usize, ExclusionRule)>>()
    };

    view! {
        <div class="ban-list">
            <h3>"🚫 Ban List"</h3>
            <Show
                when=move || !bans.get().is_empty()
                fallback=|| view! { <p class="text-muted">"No bans yet."</p> }
            >
                <div class="chips">
                    <For
                        each=entries
                        key=|(index, rule)| (*index, rule.clone())
                        children={
                            let on_remove = on_remove.clone();
                            move |(index, rule)| {
                                let on_remove = on_remove.clone();
                                view! {
                                    <span
                                        class="chip"
                                        title="Click to remove from ban list"
                                        on:click=move |_| on_remove(index)
                                    >
                                        {format!("{} ✕", rule)}
                                    </span>
                                }
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
