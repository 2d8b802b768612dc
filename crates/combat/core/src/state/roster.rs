use super::{Combatant, EntityId, Position, Team};

/// Active combatants on the floor, in iteration order.
///
/// Enemies act in the order they appear here.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant, replacing any existing entry with the same id.
    pub fn insert(&mut self, combatant: Combatant) {
        match self.index_of(combatant.id) {
            Some(index) => self.combatants[index] = combatant,
            None => self.combatants.push(combatant),
        }
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.team == Team::Player)
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player().map(|c| c.id)
    }

    /// Living combatant standing on `position`.
    pub fn occupant_at(&self, position: Position) -> Option<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.is_alive() && c.position == position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant_at(position).is_some()
    }

    /// Mutable access to two distinct combatants at once.
    ///
    /// Returns `None` if either id is missing or both ids are equal.
    pub fn pair_mut(
        &mut self,
        first: EntityId,
        second: EntityId,
    ) -> Option<(&mut Combatant, &mut Combatant)> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;
        if a == b {
            return None;
        }

        if a < b {
            let (head, tail) = self.combatants.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.combatants.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }

    /// Living enemy ids in iteration order.
    pub fn living_enemies(&self) -> Vec<EntityId> {
        self.combatants
            .iter()
            .filter(|c| c.team == Team::Enemy && c.is_alive())
            .map(|c| c.id)
            .collect()
    }

    /// Drops every defeated non-player combatant and returns their ids.
    ///
    /// A defeated player stays on the roster so the host can read the final
    /// state.
    pub fn remove_defeated(&mut self) -> Vec<EntityId> {
        let removed = self
            .combatants
            .iter()
            .filter(|c| !c.is_alive() && c.team != Team::Player)
            .map(|c| c.id)
            .collect();
        self.combatants
            .retain(|c| c.is_alive() || c.team == Team::Player);
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for combatant in iter {
            roster.insert(combatant);
        }
        roster
    }
}
