use crate::creature::CreatureInst;
use serde::{Deserialize, Serialize};

/// The player's ordered party. Slot 0 is the leader by convention; the order
/// can be rearranged outside of battle. Capped at [`Party::MAX_MEMBERS`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Party {
    members: Vec<CreatureInst>,
}

impl Party {
    pub const MAX_MEMBERS: usize = 6;

    pub fn new() -> Party {
        Party::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= Party::MAX_MEMBERS
    }

    pub fn members(&self) -> &[CreatureInst] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&CreatureInst> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CreatureInst> {
        self.members.get_mut(index)
    }

    /// Add a member, refusing when full. The creature is handed back on
    /// refusal so the caller can log the overflow.
    pub fn push(&mut self, creature: CreatureInst) -> Result<(), CreatureInst> {
        if self.is_full() {
            return Err(creature);
        }
        self.members.push(creature);
        Ok(())
    }

    /// Index of the first member still able to fight.
    pub fn first_living(&self) -> Option<usize> {
        self.members.iter().position(|c| !c.is_fainted())
    }

    /// True if at least one member other than `except` can still fight.
    pub fn any_living_except(&self, except: usize) -> bool {
        self.members
            .iter()
            .enumerate()
            .any(|(i, c)| i != except && !c.is_fainted())
    }

    pub fn all_fainted(&self) -> bool {
        self.members.iter().all(|c| c.is_fainted())
    }

    pub fn heal_all(&mut self) {
        for member in &mut self.members {
            member.heal_full();
        }
    }

    pub fn highest_level(&self) -> u8 {
        self.members.iter().map(|c| c.level).max().unwrap_or(1)
    }

    pub fn average_level(&self) -> u8 {
        if self.members.is_empty() {
            return 1;
        }
        let total: u32 = self.members.iter().map(|c| c.level as u32).sum();
        (total / self.members.len() as u32) as u8
    }

    /// Move the member at `index` into the leader slot, shifting the rest
    /// down. Returns false for slot 0 (already leader) or out of bounds.
    pub fn promote_leader(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.members.len() {
            return false;
        }
        let member = self.members.remove(index);
        self.members.insert(0, member);
        true
    }
}
