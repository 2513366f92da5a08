use chrono::{DateTime, Local, Utc};
use nanoid::nanoid;

use crate::catalog::{Rarity, SkinSpec};
use crate::error::GameError;

// Ambiguous glyphs (0/O, 1/I) left out so uids read cleanly in the feed.
const UID_ALPHABET: &[char] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Mints a per-copy uid: catalog id, a short random body and one blake3
/// checksum character.
fn mint_uid(spec_id: &str) -> String {
    let core = format!("{}#{}", spec_id, nanoid!(6, UID_ALPHABET));
    let digest = blake3::hash(core.as_bytes());
    let check = std::char::from_digit((digest.as_bytes()[0] >> 4) as u32, 16)
        .unwrap_or('0')
        .to_ascii_uppercase();
    format!("{}-{}", core, check)
}

/// One owned copy of a catalog skin. Two copies of the same spec differ
/// only in uid and acquisition time.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinInstance {
    pub uid: String,
    pub name: String,
    pub rarity: Rarity,
    pub price: u64,
    pub icon: String,
    pub acquired_at: DateTime<Utc>,
}

impl SkinInstance {
    pub fn minted(spec: &SkinSpec) -> Self {
        Self {
            uid: mint_uid(&spec.id),
            name: spec.name.clone(),
            rarity: spec.rarity,
            price: spec.price,
            icon: spec.icon.clone(),
            acquired_at: Utc::now(),
        }
    }

    pub fn acquired_local(&self) -> DateTime<Local> {
        self.acquired_at.with_timezone(&Local)
    }
}

/// Owned skins in acquisition order. Lookups go by uid.
#[derive(Debug, Default)]
pub struct Inventory {
    owned: Vec<SkinInstance>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, skin: SkinInstance) {
        self.owned.push(skin);
    }

    pub fn remove(&mut self, uid: &str) -> Result<SkinInstance, GameError> {
        match self.owned.iter().position(|s| s.uid == uid) {
            Some(idx) => Ok(self.owned.remove(idx)),
            None => Err(GameError::not_found("skin", uid)),
        }
    }

    pub fn get(&self, uid: &str) -> Option<&SkinInstance> {
        self.owned.iter().find(|s| s.uid == uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkinInstance> {
        self.owned.iter()
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn total_value(&self) -> u64 {
        self.owned.iter().map(|s| s.price).sum()
    }

    pub fn count_by_rarity(&self, rarity: Rarity) -> usize {
        self.owned.iter().filter(|s| s.rarity == rarity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, rarity: Rarity, price: u64) -> SkinSpec {
        SkinSpec {
            id: id.to_string(),
            name: id.to_uppercase(),
            rarity,
            price,
            icon: "🔫".to_string(),
        }
    }

    #[test]
    fn minted_copies_get_distinct_uids() {
        let spec = spec("ak47_redline", Rarity::Epic, 300);
        let first = SkinInstance::minted(&spec);
        let second = SkinInstance::minted(&spec);
        assert_ne!(first.uid, second.uid);
        assert!(first.uid.starts_with("ak47_redline#"));
        assert_eq!(first.name, second.name);
        assert_eq!(first.price, 300);
    }

    #[test]
    fn uid_ends_with_a_hex_checksum() {
        let skin = SkinInstance::minted(&spec("p250_sand_dune", Rarity::Common, 10));
        let check = skin.uid.chars().last().unwrap();
        assert!(check.is_ascii_hexdigit());
        assert_eq!(skin.uid.chars().rev().nth(1), Some('-'));
    }

    #[test]
    fn add_and_remove_round_trip() {
        let mut inventory = Inventory::new();
        let skin = SkinInstance::minted(&spec("karambit_fade", Rarity::Legendary, 3000));
        let uid = skin.uid.clone();

        inventory.add(skin);
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get(&uid).unwrap().price, 3000);

        let removed = inventory.remove(&uid).unwrap();
        assert_eq!(removed.uid, uid);
        assert!(inventory.is_empty());

        let err = inventory.remove(&uid).unwrap_err();
        assert_eq!(err, GameError::not_found("skin", &uid));
    }

    #[test]
    fn iteration_preserves_acquisition_order() {
        let mut inventory = Inventory::new();
        inventory.add(SkinInstance::minted(&spec("a", Rarity::Common, 10)));
        inventory.add(SkinInstance::minted(&spec("b", Rarity::Rare, 150)));
        inventory.add(SkinInstance::minted(&spec("c", Rarity::Epic, 300)));

        let names: Vec<&str> = inventory.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn aggregates_count_value_and_rarities() {
        let mut inventory = Inventory::new();
        inventory.add(SkinInstance::minted(&spec("a", Rarity::Legendary, 2500)));
        inventory.add(SkinInstance::minted(&spec("b", Rarity::Epic, 300)));
        inventory.add(SkinInstance::minted(&spec("c", Rarity::Epic, 800)));

        assert_eq!(inventory.total_value(), 3600);
        assert_eq!(inventory.count_by_rarity(Rarity::Legendary), 1);
        assert_eq!(inventory.count_by_rarity(Rarity::Epic), 2);
        assert_eq!(inventory.count_by_rarity(Rarity::Common), 0);
    }
}
