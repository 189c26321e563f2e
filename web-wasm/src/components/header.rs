//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🐱 Discover Random Cats"</h1>
            <p class="text-muted">"Click “Discover” to see a random cat. Click an attribute to ban it."</p>
        </header>
    }
}
