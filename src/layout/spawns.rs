// src/layout/spawns.rs
//! Faction spawn sets.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::layout::placement::{jitter, uniform};

/// Actor eye/collision height; spawns are not snapped to terrain.
pub const SPAWN_Y: f32 = 2.0;

pub const POLICE_SPAWN_COUNT: usize = 10;
const POLICE_LINE_X: f32 = -50.0;
const POLICE_LINE_JITTER: f32 = 5.0;
const POLICE_LINE_HALF_LENGTH: f32 = 40.0;

/// One anchor per named building or area.
pub const CRIMINAL_ANCHORS: [(&str, f32, f32); 8] = [
    ("north house", 0.0, 50.0),
    ("northeast house", 35.0, 30.0),
    ("barn", -60.0, -35.0),
    ("east shed", 45.0, 5.0),
    ("south house", -20.0, -50.0),
    ("main house", 25.0, 0.0),
    ("pool", 5.0, -25.0),
    ("northwest house", -55.0, 20.0),
];
const CRIMINAL_ANCHOR_JITTER: f32 = 3.0;
pub const CRIMINAL_RANDOM_COUNT: usize = 2;
const CRIMINAL_RANDOM_HALF: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    /// Attackers, entering from the road.
    Police,
    /// Defenders, spread through the buildings.
    Criminal,
}

impl Faction {
    pub fn opponent(self) -> Self {
        match self {
            Faction::Police => Faction::Criminal,
            Faction::Criminal => Faction::Police,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Police => "police",
            Faction::Criminal => "criminal",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown faction '{0}'")]
pub struct UnknownFaction(pub String);

impl FromStr for Faction {
    type Err = UnknownFaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "police" => Ok(Faction::Police),
            "criminal" => Ok(Faction::Criminal),
            _ => Err(UnknownFaction(s.to_string())),
        }
    }
}

/// Spawn positions for both factions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnSet {
    police: Vec<Vec3>,
    criminal: Vec<Vec3>,
}

impl SpawnSet {
    pub fn get(&self, faction: Faction) -> &[Vec3] {
        match faction {
            Faction::Police => &self.police,
            Faction::Criminal => &self.criminal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.police.is_empty() && self.criminal.is_empty()
    }

    pub fn clear(&mut self) {
        self.police.clear();
        self.criminal.clear();
    }

    /// Uniform pick from `faction`'s set, or `None` when it is empty.
    pub fn pick<R: Rng + ?Sized>(&self, faction: Faction, rng: &mut R) -> Option<Vec3> {
        let set = self.get(faction);
        if set.is_empty() {
            return None;
        }
        Some(set[rng.random_range(0..set.len())])
    }
}

/// Police line up along the road; criminals hold the buildings.
pub fn plan_spawns<R: Rng + ?Sized>(rng: &mut R) -> SpawnSet {
    let mut set = SpawnSet::default();

    for _ in 0..POLICE_SPAWN_COUNT {
        let x = POLICE_LINE_X + jitter(rng, POLICE_LINE_JITTER);
        let z = jitter(rng, POLICE_LINE_HALF_LENGTH);
        set.police.push(Vec3::new(x, SPAWN_Y, z));
    }

    for &(_, ax, az) in &CRIMINAL_ANCHORS {
        let x = ax + jitter(rng, CRIMINAL_ANCHOR_JITTER);
        let z = az + jitter(rng, CRIMINAL_ANCHOR_JITTER);
        set.criminal.push(Vec3::new(x, SPAWN_Y, z));
    }
    for _ in 0..CRIMINAL_RANDOM_COUNT {
        let x = uniform(rng, -CRIMINAL_RANDOM_HALF, CRIMINAL_RANDOM_HALF);
        let z = uniform(rng, -CRIMINAL_RANDOM_HALF, CRIMINAL_RANDOM_HALF);
        set.criminal.push(Vec3::new(x, SPAWN_Y, z));
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn set_sizes_and_height() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let set = plan_spawns(&mut rng);
        assert_eq!(set.get(Faction::Police).len(), 10);
        assert_eq!(set.get(Faction::Criminal).len(), 10);
        assert!(set
            .get(Faction::Police)
            .iter()
            .chain(set.get(Faction::Criminal))
            .all(|p| p.y == SPAWN_Y));
    }

    #[test]
    fn police_spawn_along_the_road() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let set = plan_spawns(&mut rng);
        for p in set.get(Faction::Police) {
            assert!((-55.0..=-45.0).contains(&p.x));
            assert!((-40.0..=40.0).contains(&p.z));
        }
        for (p, &(_, ax, az)) in set.get(Faction::Criminal).iter().zip(CRIMINAL_ANCHORS.iter()) {
            assert!((p.x - ax).abs() <= 3.0 && (p.z - az).abs() <= 3.0);
        }
    }

    #[test]
    fn pick_on_empty_set_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(SpawnSet::default().pick(Faction::Police, &mut rng), None);
    }

    #[test]
    fn faction_parsing() {
        assert_eq!("Police".parse::<Faction>(), Ok(Faction::Police));
        assert_eq!(Faction::Criminal.opponent(), Faction::Police);
        assert!("swat".parse::<Faction>().is_err());
        assert_eq!(Faction::Criminal.to_string(), "criminal");
    }
}
