//! The seeded demo world the headless runner plays against.
//!
//! A small fixed cast of clubs, players, contacts and rivals. Between ticks
//! the world drifts (injuries, transfers, job changes, contacts retiring) so
//! that stories actually hit their abort paths. Drift draws from its own
//! random stream so it never perturbs narrative replay.

use scoutline_core::ChoiceResolution;
use scoutline_core::rng::{RngError, StoryRng};
use scoutline_types::{
    Club, ClubId, Contact, ContactId, ContactKind, GameDate, Player, PlayerId, RivalScout,
    RivalScoutId, ScoutProfile, WorldSnapshot,
};

/// Weekly chance an injured player returns to fitness.
const RECOVERY_CHANCE: f64 = 0.35;
/// Weekly chance a fit player picks up an injury.
const INJURY_CHANCE: f64 = 0.04;
/// Weekly chance a player or rival moves to another club.
const MOVE_CHANCE: f64 = 0.03;
/// Weekly chance the scout is let go.
const SACKING_CHANCE: f64 = 0.02;
/// Weekly chance an unemployed scout signs somewhere.
const HIRING_CHANCE: f64 = 0.25;
/// Weekly chance a scout contact retires from the game.
const RETIREMENT_CHANCE: f64 = 0.01;
/// Fatigue the scout sheds every week.
const WEEKLY_RECOVERY: i32 = 2;

const CLUBS: &[(u128, &str, &str)] = &[
    (1, "Harbour Town", "England"),
    (2, "Real Montaña", "Spain"),
    (3, "Sporting Aldeia", "Portugal"),
    (4, "FC Nordlicht", "Germany"),
];

const PLAYERS: &[(u128, &str, u8, u128, u8)] = &[
    (20, "Tomás Ferreira", 19, 3, 88),
    (21, "Jonas Lindqvist", 24, 1, 71),
    (22, "Kofi Asante", 17, 2, 92),
    (23, "Mirko Halvorsen", 21, 4, 77),
    (24, "Dani Ocampo", 18, 3, 84),
    (25, "Levi Okonkwo", 26, 1, 65),
];

const CONTACTS: &[(u128, &str, ContactKind, i32)] = &[
    (10, "Vince Moreau", ContactKind::Agent, 55),
    (11, "Priya Shah", ContactKind::Journalist, 60),
    (12, "Old Tam Reid", ContactKind::Scout, 85),
    (13, "Ines Duarte", ContactKind::Coach, 50),
    (14, "Farid Nasser", ContactKind::Director, 45),
];

const RIVALS: &[(u128, &str, u128, i32)] = &[
    (30, "Dmitri Volkov", 2, 58),
    (31, "Carla Benedetti", 4, 49),
];

const HOME_CLUB: u128 = 1;

/// The world as the runner currently sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoWorld {
    snapshot: WorldSnapshot,
}

impl DemoWorld {
    /// Build the starting cast at `date`.
    pub fn new(scout_name: &str, date: GameDate) -> Self {
        let clubs = CLUBS
            .iter()
            .map(|&(n, name, country)| {
                let id = ClubId::from_u128(n);
                (
                    id,
                    Club {
                        id,
                        name: name.to_owned(),
                        country: country.to_owned(),
                    },
                )
            })
            .collect();

        let players = PLAYERS
            .iter()
            .map(|&(n, name, age, club, potential)| {
                let id = PlayerId::from_u128(n);
                (
                    id,
                    Player {
                        id,
                        name: name.to_owned(),
                        age,
                        club_id: Some(ClubId::from_u128(club)),
                        injured: false,
                        potential,
                    },
                )
            })
            .collect();

        let contacts = CONTACTS
            .iter()
            .map(|&(n, name, kind, relationship)| {
                let id = ContactId::from_u128(n);
                (
                    id,
                    Contact {
                        id,
                        name: name.to_owned(),
                        kind,
                        relationship,
                    },
                )
            })
            .collect();

        let rival_scouts = RIVALS
            .iter()
            .map(|&(n, name, club, reputation)| {
                let id = RivalScoutId::from_u128(n);
                (
                    id,
                    RivalScout {
                        id,
                        name: name.to_owned(),
                        club_id: Some(ClubId::from_u128(club)),
                        reputation,
                    },
                )
            })
            .collect();

        Self {
            snapshot: WorldSnapshot {
                date,
                scout: ScoutProfile {
                    name: scout_name.to_owned(),
                    reputation: 30,
                    fatigue: 10,
                    career_tier: 2,
                    current_club_id: Some(ClubId::from_u128(HOME_CLUB)),
                },
                contacts,
                clubs,
                players,
                rival_scouts,
            },
        }
    }

    /// The read-only view handed to the director.
    pub const fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    /// Move the world on to `date`, applying one week of drift.
    ///
    /// # Errors
    ///
    /// Returns [`RngError`] if the random source breaks its contract.
    pub fn advance_to(&mut self, date: GameDate, rng: &mut dyn StoryRng) -> Result<(), RngError> {
        self.snapshot.date = date;
        let club_ids: Vec<ClubId> = self.snapshot.clubs.keys().copied().collect();

        for player in self.snapshot.players.values_mut() {
            player.injured = if player.injured {
                !rng.chance(RECOVERY_CHANCE)?
            } else {
                rng.chance(INJURY_CHANCE)?
            };
            if let Some(current) = player.club_id
                && rng.chance(MOVE_CHANCE)?
            {
                player.club_id = Some(other_club(&club_ids, current, rng)?);
            }
        }

        for rival in self.snapshot.rival_scouts.values_mut() {
            if let Some(current) = rival.club_id
                && rng.chance(MOVE_CHANCE)?
            {
                rival.club_id = Some(other_club(&club_ids, current, rng)?);
            }
        }

        let scout = &mut self.snapshot.scout;
        match scout.current_club_id {
            Some(_) if rng.chance(SACKING_CHANCE)? => scout.current_club_id = None,
            None if rng.chance(HIRING_CHANCE)? => {
                scout.current_club_id = Some(*rng.pick(&club_ids)?);
            }
            _ => {}
        }
        scout.fatigue = clamp_stat(scout.fatigue.saturating_sub(WEEKLY_RECOVERY));

        let mut retiring = Vec::new();
        for contact in self.snapshot.contacts_of_kind(ContactKind::Scout) {
            if rng.chance(RETIREMENT_CHANCE)? {
                retiring.push(contact.id);
            }
        }
        for id in retiring {
            self.snapshot.contacts.remove(&id);
        }
        Ok(())
    }

    /// Fold a resolved choice's deltas into the scout's stats.
    pub fn apply(&mut self, resolution: &ChoiceResolution) {
        let scout = &mut self.snapshot.scout;
        scout.reputation = clamp_stat(scout.reputation.saturating_add(resolution.reputation_delta));
        scout.fatigue = clamp_stat(scout.fatigue.saturating_add(resolution.fatigue_delta));
        scout.career_tier = tier_for(scout.reputation);
    }
}

fn other_club(
    clubs: &[ClubId],
    current: ClubId,
    rng: &mut dyn StoryRng,
) -> Result<ClubId, RngError> {
    let others: Vec<ClubId> = clubs.iter().copied().filter(|c| *c != current).collect();
    Ok(*rng.pick(&others)?)
}

fn clamp_stat(value: i32) -> i32 {
    value.clamp(0, 100)
}

const fn tier_for(reputation: i32) -> u8 {
    match reputation {
        ..=19 => 1,
        20..=39 => 2,
        40..=59 => 3,
        60..=79 => 4,
        _ => 5,
    }
}
