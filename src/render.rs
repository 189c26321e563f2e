//! 端末表示用の整形

use cat_discovery_common::{Candidate, ExclusionList};

/// 猫1件の表示テキスト
pub fn format_candidate(candidate: &Candidate) -> String {
    let mut lines = vec![format!("🐱 {}", candidate.url)];

    if let (Some(w), Some(h)) = (candidate.width, candidate.height) {
        lines.push(format!("   {}x{}", w, h));
    }

    match candidate.breed() {
        Some(breed) => {
            let or_unknown = |v: Option<&str>| v.unwrap_or("-").to_string();
            lines.push(format!("   Breed:        {}", or_unknown(breed.name.as_deref())));
            lines.push(format!("   Origin:       {}", or_unknown(breed.origin.as_deref())));
            if let Some(life_span) = breed.life_span.as_deref() {
                lines.push(format!("   Life Span:    {} years", life_span));
            }
            let temperaments: Vec<&str> = breed.temperaments().collect();
            if !temperaments.is_empty() {
                lines.push(format!("   Temperaments: {}", temperaments.join(", ")));
            }
            if let Some(url) = breed.wikipedia_url.as_deref() {
                lines.push(format!("   Wikipedia:    {}", url));
            }
        }
        None => lines.push("   (品種情報なし)".to_string()),
    }

    lines.join("\n")
}

/// バンリストの表示テキスト（番号は1始まり）
pub fn format_ban_list(bans: &ExclusionList) -> String {
    if bans.is_empty() {
        return "🚫 Ban List: No bans yet.".to_string();
    }

    let mut lines = vec![format!("🚫 Ban List ({})", bans.len())];
    lines.extend(
        bans.iter()
            .enumerate()
            .map(|(i, rule)| format!("  {}. {}", i + 1, rule)),
    );
    lines.join("\n")
}
