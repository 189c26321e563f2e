//! 猫カードコンポーネント
//!
//! 品種名・原産国・性格はクリックでバンリストに追加できる。

use cat_discovery_common::{AttributeKind, Candidate, ExclusionRule, ban_targets};
use leptos::prelude::*;

#[component]
pub fn CatCard<FB>(cat: ReadSignal<Option<Candidate>>, on_ban: FB) -> impl IntoView
where
    FB: Fn(ExclusionRule) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="cat-card">
            {move || match cat.get() {
                None => view! {
                    <p class="text-muted">"Click “Discover” to see a cat!"</p>
                }
                .into_any(),
                Some(candidate) => view! {
                    <CatDetails candidate=candidate on_ban=on_ban.clone() />
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn CatDetails<FB>(candidate: Candidate, on_ban: FB) -> impl IntoView
where
    FB: Fn(ExclusionRule) + 'static + Clone + Send + Sync,
{
    let image_url = candidate.url.clone();
    let breed = candidate.breed().cloned();
    let targets = ban_targets(&candidate);

    let details = breed.map(|breed| {
        let title = breed.name.clone().unwrap_or_default();
        let life_span = breed
            .life_span
            .clone()
            .map(|years| format!("{} years", years))
            .unwrap_or_else(|| "-".to_string());
        let name_rule = find_target(&targets, AttributeKind::Breed);
        let origin_rule = find_target(&targets, AttributeKind::Origin);

        let temperaments = targets
            .iter()
            .filter(|rule| rule.kind == AttributeKind::Temperament)
            .cloned()
            .map(|rule| {
                let on_ban = on_ban.clone();
                let label = rule.value.clone();
                view! {
                    <span class="chip" on:click=move |_| on_ban(rule.clone())>
                        {label}
                    </span>
                }
            })
            .collect_view();

        view! {
            <div class="breed">
                <h2>{title}</h2>
                <div class="attributes">
                    <AttributeLine label="Breed" rule=name_rule on_ban=on_ban.clone() />
                    <AttributeLine label="Origin" rule=origin_rule on_ban=on_ban.clone() />
                    <span class="attribute">
                        <strong>"Life Span: "</strong>
                        {life_span}
                    </span>
                    <div class="temperaments">
                        <strong>"Temperaments:"</strong>
                        <div class="chips">{temperaments}</div>
                    </div>
                </div>
            </div>
        }
    });

    view! {
        <img src=image_url alt="Cat" class="cat-image" />
        {details}
    }
}

/// クリックでバンできる属性行（値がなければクリック不可）
#[component]
fn AttributeLine<FB>(label: &'static str, rule: Option<ExclusionRule>, on_ban: FB) -> impl IntoView
where
    FB: Fn(ExclusionRule) + 'static + Clone + Send + Sync,
{
    match rule {
        Some(rule) => {
            let value = rule.value.clone();
            view! {
                <span
                    class="attribute clickable"
                    title="Click to ban"
                    on:click=move |_| on_ban(rule.clone())
                >
                    <strong>{format!("{}: ", label)}</strong>
                    {value}
                </span>
            }
            .into_any()
        }
        None => view! {
            <span class="attribute">
                <strong>{format!("{}: ", label)}</strong>
                "-"
            </span>
        }
        .into_any(),
    }
}

fn find_target(targets: &[ExclusionRule], kind: AttributeKind) -> Option<ExclusionRule> {
    targets.iter().find(|rule| rule.kind == kind).cloned()
}
