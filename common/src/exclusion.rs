//! 除外ルール（バンリスト）と除外判定
//!
//! - AttributeKind: 判定対象の属性（品種名・原産国・性格）
//! - ExclusionRule: (属性, 値) のペア
//! - ExclusionList: 重複なしの順序付きルール列
//! - is_excluded: 候補がいずれかのルールに該当するかを判定する純粋関数

use crate::error::{Error, Result};
use crate::types::{non_empty, Breed, Candidate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 除外判定に使う属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Breed,
    Origin,
    Temperament,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Breed => "breed",
            AttributeKind::Origin => "origin",
            AttributeKind::Temperament => "temperament",
        }
    }

    /// 品種情報から対応する属性値を取り出す（空文字は None）
    pub fn lookup<'a>(&self, breed: &'a Breed) -> Option<&'a str> {
        let value = match self {
            AttributeKind::Breed => breed.name.as_deref(),
            AttributeKind::Origin => breed.origin.as_deref(),
            AttributeKind::Temperament => breed.temperament.as_deref(),
        };
        non_empty(value)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breed" | "name" | "breed-name" => Ok(AttributeKind::Breed),
            "origin" => Ok(AttributeKind::Origin),
            "temperament" | "temper" => Ok(AttributeKind::Temperament),
            _ => Err(Error::UnknownAttribute(s.to_string())),
        }
    }
}

/// 除外ルール
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub kind: AttributeKind,
    pub value: String,
}

impl ExclusionRule {
    pub fn new(kind: AttributeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// 品種情報がこのルールに該当するか（前後の空白と大文字小文字は無視）
    pub fn matches(&self, breed: &Breed) -> bool {
        let Some(attribute) = self.kind.lookup(breed) else {
            return false;
        };
        let wanted = self.value.trim().to_lowercase();

        match self.kind {
            AttributeKind::Temperament => attribute
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .any(|t| t == wanted),
            AttributeKind::Breed | AttributeKind::Origin => {
                attribute.trim().to_lowercase() == wanted
            }
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

/// `kind=value` または `kind:value` 形式
impl FromStr for ExclusionRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, value) = s
            .split_once('=')
            .or_else(|| s.split_once(':'))
            .ok_or_else(|| Error::InvalidRule(s.to_string()))?;

        let value = value.trim();
        if value.is_empty() {
            return Err(Error::InvalidRule(s.to_string()));
        }

        Ok(Self::new(kind.parse()?, value))
    }
}

/// 候補がいずれかのルールに該当するか
///
/// 品種情報のない候補は判定できないため常に `false`。
pub fn is_excluded(candidate: &Candidate, rules: &[ExclusionRule]) -> bool {
    match candidate.breed() {
        Some(breed) => rules.iter().any(|rule| rule.matches(breed)),
        None => false,
    }
}

/// 候補からバン可能なルールを列挙（品種名 → 原産国 → 性格の順）
pub fn ban_targets(candidate: &Candidate) -> Vec<ExclusionRule> {
    let Some(breed) = candidate.breed() else {
        return Vec::new();
    };

    let mut targets = Vec::new();
    if let Some(name) = AttributeKind::Breed.lookup(breed) {
        targets.push(ExclusionRule::new(AttributeKind::Breed, name.trim()));
    }
    if let Some(origin) = AttributeKind::Origin.lookup(breed) {
        targets.push(ExclusionRule::new(AttributeKind::Origin, origin.trim()));
    }
    targets.extend(
        breed
            .temperaments()
            .map(|t| ExclusionRule::new(AttributeKind::Temperament, t)),
    );
    targets
}

/// ワンクリックで追加できる定番ルール
pub fn preset_rules() -> Vec<ExclusionRule> {
    vec![
        ExclusionRule::new(AttributeKind::Breed, "Persian"),
        ExclusionRule::new(AttributeKind::Origin, "Japan"),
        ExclusionRule::new(AttributeKind::Temperament, "Playful"),
    ]
}

/// バンリスト
///
/// 追加順を保持し、(kind, value) が完全一致するルールは二重に登録しない。
/// 値の比較は登録時のまま（大文字小文字を区別）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionList {
    rules: Vec<ExclusionRule>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルールを追加。既に登録済みなら何もせず `false`
    pub fn add(&mut self, rule: ExclusionRule) -> bool {
        if self.rules.contains(&rule) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// 位置を指定して削除。範囲外なら `None`
    pub fn remove(&mut self, index: usize) -> Option<ExclusionRule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExclusionRule> {
        self.rules.iter()
    }
}

impl FromIterator<ExclusionRule> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = ExclusionRule>>(iter: I) -> Self {
        let mut list = Self::new();
        for rule in iter {
            list.add(rule);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, origin: &str, temperament: &str) -> Candidate {
        Candidate {
            id: "test".to_string(),
            url: "https://example.com/cat.jpg".to_string(),
            breeds: vec![Breed {
                name: Some(name.to_string()),
                origin: Some(origin.to_string()),
                temperament: Some(temperament.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    // =============================================
    // is_excluded テスト
    // =============================================

    #[test]
    fn test_no_breed_is_never_excluded() {
        let cat = Candidate {
            url: "https://example.com/cat.jpg".to_string(),
            ..Default::default()
        };
        let rules = vec![
            ExclusionRule::new(AttributeKind::Breed, "Persian"),
            ExclusionRule::new(AttributeKind::Origin, "Japan"),
            ExclusionRule::new(AttributeKind::Temperament, "Playful"),
        ];
        assert!(!is_excluded(&cat, &rules));
    }

    #[test]
    fn test_empty_rules_never_exclude() {
        let cat = candidate("Persian", "Iran", "Calm");
        assert!(!is_excluded(&cat, &[]));
    }

    #[test]
    fn test_temperament_token_match() {
        let cat = candidate("Bengal", "United States", "Playful, Curious");
        let rules = vec![ExclusionRule::new(AttributeKind::Temperament, "curious")];
        assert!(is_excluded(&cat, &rules));
    }

    #[test]
    fn test_temperament_requires_whole_token() {
        // 部分一致では除外しない
        let cat = candidate("Bengal", "United States", "Playful, Curious");
        let rules = vec![ExclusionRule::new(AttributeKind::Temperament, "Play")];
        assert!(!is_excluded(&cat, &rules));
    }

    #[test]
    fn test_origin_case_insensitive() {
        let cat = candidate("Japanese Bobtail", "Japan", "Active");
        let rules = vec![ExclusionRule::new(AttributeKind::Origin, "JAPAN")];
        assert!(is_excluded(&cat, &rules));
    }

    #[test]
    fn test_origin_exact_equality() {
        let cat = candidate("Japanese Bobtail", "Japan", "Active");
        let rules = vec![ExclusionRule::new(AttributeKind::Origin, "Jap")];
        assert!(!is_excluded(&cat, &rules));
    }

    #[test]
    fn test_breed_rule_matches_name() {
        let cat = candidate("Persian", "Iran (Persia)", "Affectionate, Loyal");
        let rules = vec![ExclusionRule::new(AttributeKind::Breed, "persian")];
        assert!(is_excluded(&cat, &rules));
    }

    #[test]
    fn test_any_rule_matches() {
        let cat = candidate("Siamese", "Thailand", "Active, Agile");
        let rules = vec![
            ExclusionRule::new(AttributeKind::Origin, "Japan"),
            ExclusionRule::new(AttributeKind::Temperament, "agile"),
        ];
        assert!(is_excluded(&cat, &rules));
    }

    #[test]
    fn test_missing_attribute_does_not_match() {
        let cat = Candidate {
            breeds: vec![Breed {
                name: Some("Mystery".to_string()),
                origin: Some(String::new()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let rules = vec![
            ExclusionRule::new(AttributeKind::Origin, ""),
            ExclusionRule::new(AttributeKind::Temperament, "Calm"),
        ];
        assert!(!is_excluded(&cat, &rules));
    }

    #[test]
    fn test_only_first_breed_is_evaluated() {
        let mut cat = candidate("Persian", "Iran", "Calm");
        cat.breeds.push(Breed {
            origin: Some("Japan".to_string()),
            ..Default::default()
        });
        let rules = vec![ExclusionRule::new(AttributeKind::Origin, "Japan")];
        assert!(!is_excluded(&cat, &rules));
    }

    // =============================================
    // ExclusionList テスト
    // =============================================

    #[test]
    fn test_list_ignores_duplicates() {
        let mut list = ExclusionList::new();
        assert!(list.add(ExclusionRule::new(AttributeKind::Origin, "Japan")));
        assert!(!list.add(ExclusionRule::new(AttributeKind::Origin, "Japan")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_list_duplicate_check_is_case_sensitive() {
        let mut list = ExclusionList::new();
        list.add(ExclusionRule::new(AttributeKind::Origin, "Japan"));
        assert!(list.add(ExclusionRule::new(AttributeKind::Origin, "japan")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_list_same_value_different_kind() {
        let mut list = ExclusionList::new();
        list.add(ExclusionRule::new(AttributeKind::Breed, "Siamese"));
        list.add(ExclusionRule::new(AttributeKind::Origin, "Siamese"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_list_remove_by_position() {
        let mut list: ExclusionList = preset_rules().into_iter().collect();
        let removed = list.remove(1);
        assert_eq!(removed, Some(ExclusionRule::new(AttributeKind::Origin, "Japan")));
        assert_eq!(list.len(), 2);
        assert_eq!(list.rules()[1].kind, AttributeKind::Temperament);
    }

    #[test]
    fn test_list_remove_out_of_range() {
        let mut list = ExclusionList::new();
        assert_eq!(list.remove(0), None);
    }

    #[test]
    fn test_list_clear() {
        let mut list: ExclusionList = preset_rules().into_iter().collect();
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_list_rules_exclude() {
        let list: ExclusionList = vec![ExclusionRule::new(AttributeKind::Origin, "Japan")]
            .into_iter()
            .collect();
        assert!(is_excluded(&candidate("Japanese Bobtail", "Japan", "Active"), list.rules()));
        assert!(!is_excluded(&candidate("Chartreux", "France", "Calm"), list.rules()));
    }

    // =============================================
    // パース・表示テスト
    // =============================================

    #[test]
    fn test_rule_from_str() {
        let rule: ExclusionRule = "origin=Japan".parse().unwrap();
        assert_eq!(rule, ExclusionRule::new(AttributeKind::Origin, "Japan"));

        let rule: ExclusionRule = "Temperament: Playful ".parse().unwrap();
        assert_eq!(rule, ExclusionRule::new(AttributeKind::Temperament, "Playful"));

        let rule: ExclusionRule = "name=Maine Coon".parse().unwrap();
        assert_eq!(rule, ExclusionRule::new(AttributeKind::Breed, "Maine Coon"));
    }

    #[test]
    fn test_rule_from_str_errors() {
        assert!(matches!(
            "origin".parse::<ExclusionRule>(),
            Err(Error::InvalidRule(_))
        ));
        assert!(matches!(
            "origin=  ".parse::<ExclusionRule>(),
            Err(Error::InvalidRule(_))
        ));
        assert!(matches!(
            "color=black".parse::<ExclusionRule>(),
            Err(Error::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_rule_display() {
        let rule = ExclusionRule::new(AttributeKind::Temperament, "Playful");
        assert_eq!(rule.to_string(), "temperament: Playful");
    }

    #[test]
    fn test_rule_serialize() {
        let rule = ExclusionRule::new(AttributeKind::Origin, "Japan");
        let json = serde_json::to_string(&rule).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"kind":"origin","value":"Japan"}"#);
    }

    // =============================================
    // ban_targets テスト
    // =============================================

    #[test]
    fn test_ban_targets_order() {
        let cat = candidate("Bengal", "United States", "Alert, Agile , Energetic");
        let targets: Vec<String> = ban_targets(&cat).iter().map(|r| r.to_string()).collect();
        assert_eq!(
            targets,
            vec![
                "breed: Bengal",
                "origin: United States",
                "temperament: Alert",
                "temperament: Agile",
                "temperament: Energetic",
            ]
        );
    }

    #[test]
    fn test_ban_targets_skip_missing() {
        let cat = Candidate {
            breeds: vec![Breed {
                name: Some("Mystery".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            ban_targets(&cat),
            vec![ExclusionRule::new(AttributeKind::Breed, "Mystery")]
        );
        assert!(ban_targets(&Candidate::default()).is_empty());
    }

    #[test]
    fn test_ban_targets_exclude_padded_values() {
        // APIの値に前後の空白があっても、そこから作ったバンで同じ猫を除外できる
        let cat = candidate(" Bengal ", " United States ", " Alert ,Agile");
        let targets = ban_targets(&cat);
        assert_eq!(targets[0], ExclusionRule::new(AttributeKind::Breed, "Bengal"));
        assert_eq!(targets[1], ExclusionRule::new(AttributeKind::Origin, "United States"));

        for rule in targets {
            assert!(is_excluded(&cat, &[rule.clone()]), "not excluded by {}", rule);
        }
    }
}
