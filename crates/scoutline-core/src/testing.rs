//! Fixture world shared by unit tests.

use std::collections::BTreeMap;

use scoutline_types::{
    Club, ClubId, Contact, ContactId, ContactKind, GameDate, Player, PlayerId, RivalScout,
    RivalScoutId, ScoutProfile, WorldSnapshot,
};

pub(crate) const HOME_CLUB: ClubId = ClubId::from_u128(1);
pub(crate) const AWAY_CLUB: ClubId = ClubId::from_u128(2);
pub(crate) const AGENT: ContactId = ContactId::from_u128(10);
pub(crate) const JOURNALIST: ContactId = ContactId::from_u128(11);
pub(crate) const MENTOR: ContactId = ContactId::from_u128(12);
pub(crate) const COACH: ContactId = ContactId::from_u128(13);
pub(crate) const STRIKER: PlayerId = PlayerId::from_u128(20);
pub(crate) const KEEPER: PlayerId = PlayerId::from_u128(21);
pub(crate) const RIVAL: RivalScoutId = RivalScoutId::from_u128(30);

fn contact(id: ContactId, name: &str, kind: ContactKind, relationship: i32) -> (ContactId, Contact) {
    (
        id,
        Contact {
            id,
            name: name.to_owned(),
            kind,
            relationship,
        },
    )
}

fn club(id: ClubId, name: &str, country: &str) -> (ClubId, Club) {
    (
        id,
        Club {
            id,
            name: name.to_owned(),
            country: country.to_owned(),
        },
    )
}

fn player(id: PlayerId, name: &str, club_id: ClubId, injured: bool) -> (PlayerId, Player) {
    (
        id,
        Player {
            id,
            name: name.to_owned(),
            age: 19,
            club_id: Some(club_id),
            injured,
            potential: 80,
        },
    )
}

/// A small world where every catalog template has something to work with.
pub(crate) fn snapshot(season: u32, week: u32) -> WorldSnapshot {
    WorldSnapshot {
        date: GameDate::new(season, week),
        scout: ScoutProfile {
            name: "Alex Mercer".to_owned(),
            reputation: 40,
            fatigue: 10,
            career_tier: 3,
            current_club_id: Some(HOME_CLUB),
        },
        contacts: BTreeMap::from([
            contact(AGENT, "Vince Moreau", ContactKind::Agent, 55),
            contact(JOURNALIST, "Priya Shah", ContactKind::Journalist, 45),
            contact(MENTOR, "Old Tam Reid", ContactKind::Scout, 80),
            contact(COACH, "Ines Duarte", ContactKind::Coach, 60),
        ]),
        clubs: BTreeMap::from([
            club(HOME_CLUB, "Harbour Town", "England"),
            club(AWAY_CLUB, "Real Montaña", "Spain"),
        ]),
        players: BTreeMap::from([
            player(STRIKER, "Tomás Ferreira", AWAY_CLUB, false),
            player(KEEPER, "Jonas Lindqvist", HOME_CLUB, true),
        ]),
        rival_scouts: BTreeMap::from([(
            RIVAL,
            RivalScout {
                id: RIVAL,
                name: "Dmitri Volkov".to_owned(),
                club_id: Some(AWAY_CLUB),
                reputation: 55,
            },
        )]),
    }
}
