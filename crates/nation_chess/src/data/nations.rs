//! Nation catalog
//!
//! Display data for the eleven playable nations: names, motto, play style,
//! theme colour, per-piece names and the four headline ratings (1-5).

use crate::types::{Nation, PieceType};
use serde::Serialize;

/// Headline ratings shown when picking a nation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NationRatings {
    pub attack: u8,
    pub defense: u8,
    pub mobility: u8,
    pub special: u8,
}

/// Themed name of each piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceNames {
    pub king: &'static str,
    pub queen: &'static str,
    pub rook: &'static str,
    pub bishop: &'static str,
    pub knight: &'static str,
    pub pawn: &'static str,
}

impl PieceNames {
    pub fn get(&self, piece: PieceType) -> &'static str {
        match piece {
            PieceType::King => self.king,
            PieceType::Queen => self.queen,
            PieceType::Rook => self.rook,
            PieceType::Bishop => self.bishop,
            PieceType::Knight => self.knight,
            PieceType::Pawn => self.pawn,
        }
    }
}

/// Catalog entry for one nation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NationInfo {
    pub nation: Nation,
    pub name: &'static str,
    pub motto: &'static str,
    pub style: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub pieces: PieceNames,
    pub ratings: NationRatings,
}

const fn names(
    king: &'static str,
    queen: &'static str,
    rook: &'static str,
    bishop: &'static str,
    knight: &'static str,
    pawn: &'static str,
) -> PieceNames {
    PieceNames { king, queen, rook, bishop, knight, pawn }
}

const fn ratings(attack: u8, defense: u8, mobility: u8, special: u8) -> NationRatings {
    NationRatings { attack, defense, mobility, special }
}

/// Catalog in [`Nation::ALL`] order
pub static NATIONS: [NationInfo; 11] = [
    NationInfo {
        nation: Nation::France,
        name: "Kingdom of France",
        motto: "Chivalry and the glory of battle",
        style: "Central breakthrough",
        description: "Heavy cavalry tradition, strong through the centre",
        color: "#0055a4",
        pieces: names("Roi de France", "Reine", "Garde du Château", "Évêque", "Chevalier", "Piéton"),
        ratings: ratings(4, 3, 4, 3),
    },
    NationInfo {
        nation: Nation::England,
        name: "Kingdom of England",
        motto: "Glory of the longbowmen",
        style: "Defensive counterattack",
        description: "Strong ranged strikes and a steady defence",
        color: "#c8102e",
        pieces: names("King of England", "Queen", "Tower Guard", "Archbishop", "Knight", "Longbowman"),
        ratings: ratings(3, 4, 3, 4),
    },
    NationInfo {
        nation: Nation::HolyRoman,
        name: "Holy Roman Empire",
        motto: "Imperial glory, a league of princes",
        style: "Pawn formations",
        description: "Flexible, with strong cooperation between pieces",
        color: "#ffcc00",
        pieces: names("Kaiser", "Kaiserin", "Reichsburg", "Kurfürst", "Teutonic Knight", "Landsknecht"),
        ratings: ratings(3, 4, 3, 4),
    },
    NationInfo {
        nation: Nation::China,
        name: "Chinese Empire",
        motto: "Strategy and stratagem",
        style: "Flexible strategy",
        description: "Flexible tactics and solid counterplay",
        color: "#de2910",
        pieces: names("Emperor", "Empress/General", "Chariot", "Strategist", "Cavalry", "Foot Soldier"),
        ratings: ratings(3, 3, 5, 3),
    },
    NationInfo {
        nation: Nation::Japan,
        name: "Japan",
        motto: "The way of the warrior, one against a hundred",
        style: "Aggressive assault",
        description: "High risk, high reward, strong individual pieces",
        color: "#bc002d",
        pieces: names("Shogun", "Onna-bugeisha", "Castle/Shiro", "Sōhei", "Samurai", "Ashigaru"),
        ratings: ratings(5, 2, 3, 4),
    },
    NationInfo {
        nation: Nation::Ottoman,
        name: "Ottoman Empire",
        motto: "The Sultan's campaign",
        style: "Firepower",
        description: "Heavy firepower and ranged pressure",
        color: "#e30a17",
        pieces: names("Sultan", "Haseki Sultan", "Cannon/Top", "Grand Vizier", "Sipahi", "Janissary"),
        ratings: ratings(4, 3, 3, 4),
    },
    NationInfo {
        nation: Nation::Mongol,
        name: "Mongol Empire",
        motto: "Wolves of the steppe",
        style: "Mobile raiding",
        description: "Extreme mobility and horse-archer tactics",
        color: "#0066b3",
        pieces: names("Great Khan", "Khatun", "Trebuchet", "Shaman", "Kheshig", "Light Cavalry"),
        ratings: ratings(3, 2, 5, 4),
    },
    NationInfo {
        nation: Nation::Byzantine,
        name: "Byzantine Empire",
        motto: "A thousand-year empire",
        style: "Fortress defence",
        description: "Solid defence combining diplomacy and Greek fire",
        color: "#4b0082",
        pieces: names("Basileus", "Augusta", "Theodosian Walls", "Patriarch", "Cataphract", "Greek Fire Soldier"),
        ratings: ratings(3, 5, 2, 4),
    },
    NationInfo {
        nation: Nation::Spain,
        name: "Kingdom of Spain",
        motto: "The Armada and the New World",
        style: "Late-game expansion",
        description: "Faith and colonial expansion",
        color: "#c60b1e",
        pieces: names("Catholic Monarchs", "Isabella", "Alcázar", "Cardinal", "Conquistador", "Tercio"),
        ratings: ratings(4, 3, 3, 4),
    },
    NationInfo {
        nation: Nation::Poland,
        name: "Polish-Lithuanian Commonwealth",
        motto: "The charge of the winged hussars",
        style: "Cavalry assault",
        description: "Superb cavalry and noble democracy",
        color: "#dc143c",
        pieces: names("Król", "Królowa", "Zamek", "Biskup", "Hussar", "Cossack"),
        ratings: ratings(5, 2, 4, 3),
    },
    NationInfo {
        nation: Nation::Rus,
        name: "Kievan Rus' / Muscovy",
        motto: "The troika and the light of Orthodoxy",
        style: "Defensive counterattack",
        description: "Stubborn defence and winter warfare",
        color: "#0039a6",
        pieces: names("Velikiy Knyaz", "Knyaginya", "Kremlin", "Metropolitan", "Boyar Cavalry", "Streltsy"),
        ratings: ratings(3, 5, 3, 3),
    },
];

/// Catalog entry for a nation
pub fn nation_info(nation: Nation) -> &'static NationInfo {
    &NATIONS[nation as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_enum() {
        for nation in Nation::ALL {
            assert_eq!(nation_info(nation).nation, nation);
        }
    }

    #[test]
    fn test_ratings_in_range() {
        for info in NATIONS.iter() {
            let r = info.ratings;
            for value in [r.attack, r.defense, r.mobility, r.special] {
                assert!((1..=5).contains(&value), "{} rating out of range", info.name);
            }
        }
    }
}
