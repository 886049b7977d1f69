//! Ability table
//!
//! One entry per (nation, piece type) ability. Movement extensions and
//! restrictions are interpreted by [`crate::move_gen::modifiers`], passive
//! immunities and reactive effects by [`crate::abilities`], and active
//! abilities are resolved through the two-phase targeting protocol.
//!
//! `max_uses` of `None` means the ability is untracked: a piece never keeps
//! a counter for it and it can be used without limit.

use crate::types::{Nation, PieceType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! ability_ids {
    ($($variant:ident => $id:literal,)+) => {
        /// Identifier of every ability in the game
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum AbilityId {
            $(
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl AbilityId {
            pub const ALL: &'static [AbilityId] = &[$(AbilityId::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(AbilityId::$variant => $id,)+
                }
            }
        }
    };
}

ability_ids! {
    FranceKingRoyalGuard => "france_king_royalGuard",
    FranceBishopBlessing => "france_bishop_blessing",
    FranceKnightCharge => "france_knight_charge",
    EnglandKingCastlePlus => "england_king_castlePlus",
    EnglandRookTowerShot => "england_rook_towerShot",
    EnglandPawnLongbow => "england_pawn_longbow",
    HolyRomanKingElector => "holyroman_king_elector",
    HolyRomanQueenAuthority => "holyroman_queen_authority",
    HolyRomanBishopVote => "holyroman_bishop_vote",
    HolyRomanKnightCrusade => "holyroman_knight_crusade",
    HolyRomanPawnPikeFormation => "holyroman_pawn_pikeFormation",
    ChinaKingExpedition => "china_king_expedition",
    ChinaRookCannon => "china_rook_cannon",
    ChinaBishopAdvisor => "china_bishop_advisor",
    ChinaPawnCrossRiver => "china_pawn_crossRiver",
    JapanKingBushido => "japan_king_bushido",
    JapanQueenValkyrie => "japan_queen_valkyrie",
    JapanBishopChant => "japan_bishop_chant",
    JapanKnightSeppuku => "japan_knight_seppuku",
    JapanPawnTeppo => "japan_pawn_teppo",
    OttomanKingHaremGuard => "ottoman_king_haremGuard",
    OttomanQueenIntrigue => "ottoman_queen_intrigue",
    OttomanRookCannon => "ottoman_rook_cannon",
    OttomanBishopShaman => "ottoman_bishop_shaman",
    OttomanPawnMusket => "ottoman_pawn_musket",
    MongolKingMigration => "mongol_king_migration",
    MongolRookSiege => "mongol_rook_siege",
    MongolBishopProphecy => "mongol_bishop_prophecy",
    MongolKnightHorseArcher => "mongol_knight_horseArcher",
    MongolPawnNomad => "mongol_pawn_nomad",
    ByzantineKingContinuation => "byzantine_king_continuation",
    ByzantineQueenConspiracy => "byzantine_queen_conspiracy",
    ByzantineRookWalls => "byzantine_rook_walls",
    ByzantineBishopExcommunicate => "byzantine_bishop_excommunicate",
    ByzantineKnightCharge => "byzantine_knight_charge",
    ByzantinePawnGreekFire => "byzantine_pawn_greekFire",
    SpainKingInquisition => "spain_king_inquisition",
    SpainQueenVoyage => "spain_queen_voyage",
    SpainBishopHeresy => "spain_bishop_heresy",
    SpainKnightGold => "spain_knight_gold",
    SpainPawnTercio => "spain_pawn_tercio",
    PolandKingElection => "poland_king_election",
    PolandRookSejm => "poland_rook_sejm",
    PolandKnightHussar => "poland_knight_hussar",
    PolandPawnCossack => "poland_pawn_cossack",
    RusKingScorchedEarth => "rus_king_scorchedEarth",
    RusQueenAlliance => "rus_queen_alliance",
    RusRookFortress => "rus_rook_fortress",
    RusBishopIcon => "rus_bishop_icon",
    RusKnightRaid => "rus_knight_raid",
    RusPawnWinter => "rus_pawn_winter",
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbilityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbilityId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown ability '{s}'"))
    }
}

/// When an ability fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    Passive,
    Active,
    OnCapture,
    OnCaptured,
    OnCheck,
    OnMove,
    OnFirstMove,
    EndOfTurn,
    InsteadOfCapture,
}

/// What an ability targets
///
/// Only the player-activated subset has a target generator and an effect
/// handler; the rest are declared for abilities that fire reactively or are
/// not playable yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetType {
    SwapWithAny,
    SwapWithQueen,
    SwapWithPawn,
    RevivePawn,
    ParalyzeEnemy,
    SilenceEnemy,
    ConvertEnemyPawn,
    BanishPawn,
    TeleportPawn,
    NeutralizeKnight,
    ParalyzeKnight,
    GrantExtraLife,
    ShieldNeighbors,
    ParalyzeAround,
    OwnKnight,
    Castle,
    AdjacentCapture,
    BlockWithAlly,
    SwapWithAdjacent,
}

impl TargetType {
    /// Whether resolving an ability of this type hands the turn over
    pub fn ends_turn(self) -> bool {
        !matches!(
            self,
            TargetType::ParalyzeAround
                | TargetType::ParalyzeEnemy
                | TargetType::SilenceEnemy
                | TargetType::ParalyzeKnight
                | TargetType::ShieldNeighbors
        )
    }

    /// Whether the effect moves pieces around (and so can expose the king)
    pub fn relocates(self) -> bool {
        matches!(
            self,
            TargetType::SwapWithAny
                | TargetType::SwapWithQueen
                | TargetType::SwapWithPawn
                | TargetType::TeleportPawn
                | TargetType::BanishPawn
        )
    }
}

/// Declarative ability record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ability {
    pub id: AbilityId,
    pub nation: Nation,
    pub piece: PieceType,
    pub name: &'static str,
    pub description: &'static str,
    pub max_uses: Option<u8>,
    pub trigger: Trigger,
    pub target: Option<TargetType>,
}

const fn entry(
    id: AbilityId,
    nation: Nation,
    piece: PieceType,
    name: &'static str,
    description: &'static str,
    max_uses: Option<u8>,
    trigger: Trigger,
    target: Option<TargetType>,
) -> Ability {
    Ability {
        id,
        nation,
        piece,
        name,
        description,
        max_uses,
        trigger,
        target,
    }
}

use AbilityId as A;
use Nation as N;
use PieceType as P;
use TargetType as T;
use Trigger as Tr;

/// Every ability, grouped by nation
pub static ABILITIES: &[Ability] = &[
    // France
    entry(A::FranceKingRoyalGuard, N::France, P::King, "Royal Guard",
        "When first threatened, the king may swap places with an allied knight",
        Some(1), Tr::OnCheck, Some(T::OwnKnight)),
    entry(A::FranceBishopBlessing, N::France, P::Bishop, "Papal Blessing",
        "May pass over one allied piece and keep sliding",
        None, Tr::Passive, None),
    entry(A::FranceKnightCharge, N::France, P::Knight, "Heavy Charge",
        "Adds a two-square jump in each orthogonal direction",
        None, Tr::Passive, None),
    // England
    entry(A::EnglandKingCastlePlus, N::England, P::King, "Castle Plus",
        "May castle with any unmoved rook on the back rank",
        Some(1), Tr::OnMove, Some(T::Castle)),
    entry(A::EnglandRookTowerShot, N::England, P::Rook, "Tower Guard",
        "Slides at most five squares but gains a one-square diagonal step",
        None, Tr::Passive, None),
    entry(A::EnglandPawnLongbow, N::England, P::Pawn, "Longbowman",
        "Centre-file pawns capture two squares ahead; never advances two",
        None, Tr::Passive, None),
    // Holy Roman Empire
    entry(A::HolyRomanKingElector, N::HolyRoman, P::King, "Prince Elector",
        "Once per game, swap places with an allied pawn",
        Some(1), Tr::Active, Some(T::SwapWithPawn)),
    entry(A::HolyRomanQueenAuthority, N::HolyRoman, P::Queen, "Imperial Authority",
        "Cannot be captured by enemy pawns",
        None, Tr::Passive, None),
    entry(A::HolyRomanBishopVote, N::HolyRoman, P::Bishop, "League Vote",
        "When captured, may swap with an allied pawn",
        Some(1), Tr::OnCapture, Some(T::SwapWithPawn)),
    entry(A::HolyRomanKnightCrusade, N::HolyRoman, P::Knight, "Crusade",
        "In the enemy half, gains a one-square orthogonal step",
        None, Tr::Passive, None),
    entry(A::HolyRomanPawnPikeFormation, N::HolyRoman, P::Pawn, "Pike Formation",
        "A pawn next to an allied pawn cannot be taken by knights",
        None, Tr::Passive, None),
    // China
    entry(A::ChinaKingExpedition, N::China, P::King, "Imperial Expedition",
        "Once per game, swap places with the queen",
        Some(1), Tr::Active, Some(T::SwapWithQueen)),
    entry(A::ChinaRookCannon, N::China, P::Rook, "Cannon Strike",
        "Once per game, capture by jumping exactly one screen",
        Some(1), Tr::Passive, None),
    entry(A::ChinaBishopAdvisor, N::China, P::Bishop, "Field Advisor",
        "Diagonal range limited to five, gains a one-square orthogonal step",
        None, Tr::Passive, None),
    entry(A::ChinaPawnCrossRiver, N::China, P::Pawn, "Crossing the River",
        "After crossing the midline, may step sideways",
        None, Tr::Passive, None),
    // Japan
    entry(A::JapanKingBushido, N::Japan, P::King, "Bushido",
        "When checked, may sacrifice an ally to escape",
        Some(1), Tr::OnCheck, None),
    entry(A::JapanQueenValkyrie, N::Japan, P::Queen, "Onna-bugeisha",
        "After capturing a pawn, spawn a pawn on the own back rank (twice)",
        Some(2), Tr::OnCapture, None),
    entry(A::JapanBishopChant, N::Japan, P::Bishop, "Warrior Monks",
        "Adjacent allies become immune until the next turn",
        Some(1), Tr::Active, Some(T::ShieldNeighbors)),
    entry(A::JapanKnightSeppuku, N::Japan, P::Knight, "Seppuku",
        "When captured, takes the capturing piece with it",
        Some(1), Tr::OnCaptured, None),
    entry(A::JapanPawnTeppo, N::Japan, P::Pawn, "Teppo",
        "Centre-file pawns may advance three squares on their first move",
        Some(1), Tr::OnFirstMove, None),
    // Ottoman Empire
    entry(A::OttomanKingHaremGuard, N::Ottoman, P::King, "Sultan's Guard",
        "Cannot be attacked while an ally stands orthogonally adjacent",
        None, Tr::Passive, None),
    entry(A::OttomanQueenIntrigue, N::Ottoman, P::Queen, "Court Intrigue",
        "Adjacent enemies cannot move next turn",
        Some(1), Tr::Active, Some(T::ParalyzeAround)),
    entry(A::OttomanRookCannon, N::Ottoman, P::Rook, "Great Bombard",
        "Once per game, capture by jumping exactly one screen",
        Some(1), Tr::Passive, None),
    entry(A::OttomanBishopShaman, N::Ottoman, P::Bishop, "Grand Vizier",
        "Forbid an enemy piece to move next turn (twice)",
        Some(2), Tr::Active, Some(T::ParalyzeEnemy)),
    entry(A::OttomanPawnMusket, N::Ottoman, P::Pawn, "Janissary Musket",
        "Unmoved centre-file pawns shoot an enemy one or two squares ahead",
        None, Tr::Passive, None),
    // Mongol Empire
    entry(A::MongolKingMigration, N::Mongol, P::King, "Camp Migration",
        "Swap places with any allied piece",
        Some(1), Tr::Active, Some(T::SwapWithAny)),
    entry(A::MongolRookSiege, N::Mongol, P::Rook, "Siege Breaker",
        "Rooks and bishops it captures cannot counter with abilities",
        None, Tr::OnCapture, None),
    entry(A::MongolBishopProphecy, N::Mongol, P::Bishop, "Sky Prophecy",
        "At turn end, learn which piece the enemy will move next",
        Some(2), Tr::EndOfTurn, None),
    entry(A::MongolKnightHorseArcher, N::Mongol, P::Knight, "Horse Archer",
        "Instead of capturing, shoot an enemy pawn next to the target",
        Some(1), Tr::InsteadOfCapture, Some(T::AdjacentCapture)),
    entry(A::MongolPawnNomad, N::Mongol, P::Pawn, "Nomad",
        "May retreat one square without capturing",
        Some(1), Tr::OnMove, None),
    // Byzantine Empire
    entry(A::ByzantineKingContinuation, N::Byzantine, P::King, "Imperial Continuity",
        "When checked, summon a Varangian guard pawn next to the king",
        Some(1), Tr::OnCheck, None),
    entry(A::ByzantineQueenConspiracy, N::Byzantine, P::Queen, "Palace Conspiracy",
        "Paralyze one enemy piece for a turn",
        Some(1), Tr::Active, Some(T::ParalyzeEnemy)),
    entry(A::ByzantineRookWalls, N::Byzantine, P::Rook, "Theodosian Walls",
        "Cannot be captured by enemy knights",
        None, Tr::Passive, None),
    entry(A::ByzantineBishopExcommunicate, N::Byzantine, P::Bishop, "Excommunication",
        "Banish an enemy pawn to the edge of the board",
        Some(1), Tr::Active, Some(T::BanishPawn)),
    entry(A::ByzantineKnightCharge, N::Byzantine, P::Knight, "Cataphract Charge",
        "When capturing, pushes adjacent enemy pawns one square",
        None, Tr::OnCapture, None),
    entry(A::ByzantinePawnGreekFire, N::Byzantine, P::Pawn, "Greek Fire",
        "When captured, the capturing piece cannot move next turn",
        Some(1), Tr::OnCaptured, None),
    // Spain
    entry(A::SpainKingInquisition, N::Spain, P::King, "Inquisition",
        "Silence an enemy piece for two turns",
        Some(1), Tr::Active, Some(T::SilenceEnemy)),
    entry(A::SpainQueenVoyage, N::Spain, P::Queen, "Royal Voyage",
        "Moves at most five squares; send an own pawn to the enemy back rank",
        Some(1), Tr::Active, Some(T::TeleportPawn)),
    entry(A::SpainBishopHeresy, N::Spain, P::Bishop, "Heresy Trial",
        "Capture an orthogonally adjacent enemy (twice)",
        Some(2), Tr::Passive, None),
    entry(A::SpainKnightGold, N::Spain, P::Knight, "Thirst for Gold",
        "After capturing in the enemy half, spawn a pawn on the own back rank",
        None, Tr::OnCapture, None),
    entry(A::SpainPawnTercio, N::Spain, P::Pawn, "Tercio",
        "With three or more allied pawns on its row, may advance two squares",
        None, Tr::Passive, None),
    // Poland-Lithuania
    entry(A::PolandKingElection, N::Poland, P::King, "Free Election",
        "When checked, any ally may block for the king",
        Some(1), Tr::OnCheck, Some(T::BlockWithAlly)),
    entry(A::PolandRookSejm, N::Poland, P::Rook, "Sejm",
        "Cannot be captured while next to an allied queen, rook or bishop",
        None, Tr::Passive, None),
    entry(A::PolandKnightHussar, N::Poland, P::Knight, "Winged Hussar",
        "Charge up to two squares in a straight line",
        Some(1), Tr::OnMove, None),
    entry(A::PolandPawnCossack, N::Poland, P::Pawn, "Cossack Raid",
        "May step one square sideways (twice)",
        Some(2), Tr::OnMove, None),
    // Rus
    entry(A::RusKingScorchedEarth, N::Rus, P::King, "Scorched Earth",
        "When checked, swap places with an adjacent ally",
        Some(1), Tr::OnCheck, Some(T::SwapWithAdjacent)),
    entry(A::RusQueenAlliance, N::Rus, P::Queen, "Marriage Alliance",
        "An enemy knight cannot move for three turns",
        Some(1), Tr::Active, Some(T::ParalyzeKnight)),
    entry(A::RusRookFortress, N::Rus, P::Rook, "Kremlin",
        "In its own half, may move up to two squares diagonally",
        None, Tr::Passive, None),
    entry(A::RusBishopIcon, N::Rus, P::Bishop, "Holy Icon",
        "Adjacent allies become immune until the next turn",
        Some(1), Tr::Active, Some(T::ShieldNeighbors)),
    entry(A::RusKnightRaid, N::Rus, P::Knight, "Raid",
        "On its first move, may move up to three squares orthogonally",
        Some(1), Tr::OnFirstMove, None),
    entry(A::RusPawnWinter, N::Rus, P::Pawn, "General Winter",
        "In its own half, cannot be captured by enemy pawns",
        None, Tr::Passive, None),
];

/// Looks up an ability by id
pub fn ability(id: AbilityId) -> &'static Ability {
    // Table rows are declared in the same order as the enum variants.
    &ABILITIES[id as usize]
}

/// All abilities of a nation, in table order
pub fn nation_abilities(nation: Nation) -> impl Iterator<Item = &'static Ability> {
    ABILITIES.iter().filter(move |a| a.nation == nation)
}

/// Abilities owned by a (nation, piece type) pair
pub fn abilities_for(nation: Nation, piece: PieceType) -> impl Iterator<Item = &'static Ability> {
    ABILITIES
        .iter()
        .filter(move |a| a.nation == nation && a.piece == piece)
}
