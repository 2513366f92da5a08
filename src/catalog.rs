use std::collections::HashSet;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Catalog shipped inside the binary. Parsed and validated once at startup.
pub const EMBEDDED_CONTENT: &str = include_str!("../data/content.json");

/// Cosmetic tiers, ordered cheapest to rarest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// One step up the ladder. Legendary is the ceiling and maps to itself.
    pub fn escalated(self) -> Rarity {
        match self {
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic | Rarity::Legendary => Rarity::Legendary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// One skin as the catalog describes it, before any copy is owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinSpec {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub price: u64,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub pool: Vec<SkinSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    pub starting_balance: u64,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    session: SessionDefaults,
    cases: Vec<Case>,
}

#[derive(Debug)]
pub struct Catalog {
    cases: Vec<Case>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<(Catalog, SessionDefaults)> {
        let file: ContentFile =
            serde_json::from_str(raw).context("content file is not valid JSON")?;
        validate(&file.cases)?;
        Ok((Catalog { cases: file.cases }, file.session))
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn case(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }
}

fn validate(cases: &[Case]) -> Result<()> {
    ensure!(!cases.is_empty(), "content file defines no cases");
    let mut case_ids = HashSet::new();
    for case in cases {
        ensure!(
            case_ids.insert(case.id.as_str()),
            "duplicate case id '{}'",
            case.id
        );
        ensure!(case.price > 0, "case '{}' has a non-positive price", case.id);
        ensure!(!case.pool.is_empty(), "case '{}' has an empty pool", case.id);
        let mut skin_ids = HashSet::new();
        for skin in &case.pool {
            ensure!(
                skin_ids.insert(skin.id.as_str()),
                "case '{}' lists skin '{}' twice",
                case.id,
                skin.id
            );
            ensure!(
                skin.price > 0,
                "skin '{}' has a non-positive price",
                skin.id
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses_and_validates() {
        let (catalog, session) = Catalog::from_json(EMBEDDED_CONTENT).unwrap();
        assert_eq!(session.starting_balance, 1000);
        assert_eq!(catalog.cases().len(), 3);

        let weapons = catalog.case("weapon_case").unwrap();
        assert_eq!(weapons.price, 100);
        assert_eq!(weapons.pool.len(), 5);
        assert!(weapons.pool.iter().any(|s| s.rarity == Rarity::Legendary));

        assert!(catalog.case("sticker_capsule").is_none());
    }

    #[test]
    fn escalation_climbs_one_tier_and_caps_at_legendary() {
        assert_eq!(Rarity::Common.escalated(), Rarity::Uncommon);
        assert_eq!(Rarity::Uncommon.escalated(), Rarity::Rare);
        assert_eq!(Rarity::Rare.escalated(), Rarity::Epic);
        assert_eq!(Rarity::Epic.escalated(), Rarity::Legendary);
        assert_eq!(Rarity::Legendary.escalated(), Rarity::Legendary);
    }

    #[test]
    fn rarity_order_matches_the_ladder() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert_eq!(Rarity::ALL.len(), 5);
    }

    #[test]
    fn rarity_parses_lowercase() {
        let rarity: Rarity = serde_json::from_str("\"epic\"").unwrap();
        assert_eq!(rarity, Rarity::Epic);
        assert!(serde_json::from_str::<Rarity>("\"mythic\"").is_err());
    }

    #[test]
    fn validation_rejects_empty_pools() {
        let raw = r#"{
            "session": { "starting_balance": 100 },
            "cases": [
                { "id": "empty_case", "name": "Empty", "price": 50, "pool": [] }
            ]
        }"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("empty pool"));
    }

    #[test]
    fn validation_rejects_free_cases() {
        let raw = r#"{
            "session": { "starting_balance": 100 },
            "cases": [
                { "id": "free_case", "name": "Free", "price": 0, "pool": [
                    { "id": "s", "name": "S", "rarity": "common", "price": 1, "icon": "x" }
                ] }
            ]
        }"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("non-positive price"));
    }

    #[test]
    fn validation_rejects_duplicate_case_ids() {
        let raw = r#"{
            "session": { "starting_balance": 100 },
            "cases": [
                { "id": "twin", "name": "A", "price": 10, "pool": [
                    { "id": "s1", "name": "S1", "rarity": "common", "price": 1, "icon": "x" }
                ] },
                { "id": "twin", "name": "B", "price": 10, "pool": [
                    { "id": "s2", "name": "S2", "rarity": "common", "price": 1, "icon": "x" }
                ] }
            ]
        }"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate case id"));
    }
}
