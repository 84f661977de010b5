//! Identity tokens and the ordered player-to-role mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant, identified by a stable id assigned by the transport.
///
/// Equality, ordering, and hashing only look at the id, so two tokens
/// for the same chat user always compare equal.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Player(String);

impl Player {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Player {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Player {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A secret identity that can be dealt to a player.
///
/// Role tokens may be drawn from the same id space as players (e.g. the
/// member list of a chat room) but are tracked separately.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RoleToken(String);

impl RoleToken {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RoleToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RoleToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Insertion-ordered mapping of players to their dealt roles.
///
/// Re-inserting an existing player replaces the role in place and keeps
/// its original position. Games are small enough that linear lookups
/// beat hashing here.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Assignment {
    entries: Vec<(Player, RoleToken)>,
}

/// A single player's view of the assignment: everyone except themselves.
pub type Board = Assignment;

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `player`'s role, returning the previous role.
    pub fn insert(&mut self, player: Player, role: RoleToken) -> Option<RoleToken> {
        match self.entries.iter_mut().find(|(p, _)| *p == player) {
            Some((_, existing)) => Some(std::mem::replace(existing, role)),
            None => {
                self.entries.push((player, role));
                None
            }
        }
    }

    pub fn remove(&mut self, player: &Player) -> Option<RoleToken> {
        let idx = self.entries.iter().position(|(p, _)| p == player)?;
        Some(self.entries.remove(idx).1)
    }

    #[must_use]
    pub fn get(&self, player: &Player) -> Option<&RoleToken> {
        self.entries
            .iter()
            .find_map(|(p, role)| (p == player).then_some(role))
    }

    #[must_use]
    pub fn contains(&self, player: &Player) -> bool {
        self.get(player).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Player, &RoleToken)> {
        self.entries.iter().map(|(p, r)| (p, r))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleToken> {
        self.entries.iter().map(|(_, r)| r)
    }

    /// Copy of this mapping without `player`'s entry.
    #[must_use]
    pub fn without(&self, player: &Player) -> Board {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(p, _)| p != player)
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<(Player, RoleToken)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Player, RoleToken)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (player, role) in iter {
            assignment.insert(player, role);
        }
        assignment
    }
}

impl IntoIterator for Assignment {
    type Item = (Player, RoleToken);
    type IntoIter = std::vec::IntoIter<(Player, RoleToken)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
