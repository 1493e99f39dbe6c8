//! Stored row types. These are what land in the JSON file and are
//! distinct from the chirpy-types wire shapes to keep the store independent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChirpRow {
    pub id: u32,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: u32,
    pub email: String,
    pub password_hash: String,
}

/// The whole on-disk document. Maps are keyed by id, so iteration order is
/// ascending id and the next id of each kind is one past the largest key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStructure {
    #[serde(default)]
    pub chirps: BTreeMap<u32, ChirpRow>,
    #[serde(default)]
    pub users: BTreeMap<u32, UserRow>,
}

impl DbStructure {
    pub fn next_chirp_id(&self) -> u32 {
        next_id(&self.chirps)
    }

    pub fn next_user_id(&self) -> u32 {
        next_id(&self.users)
    }
}

fn next_id<V>(map: &BTreeMap<u32, V>) -> u32 {
    map.keys().next_back().map_or(1, |max| max + 1)
}
