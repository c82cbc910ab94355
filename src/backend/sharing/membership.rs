/**
 * Membership Planning
 *
 * Pure decisions about who is on a list or group. Nothing here touches the
 * store: the engine reads a `Membership` snapshot, asks it what to do, and
 * then performs the writes.
 *
 * # Removal Policy
 *
 * - Removing an ordinary member pulls it from `shared_with`.
 * - Removing the admin while others remain promotes the first element of
 *   `shared_with`, which leaves `shared_with` in the same write.
 * - Removing the admin when nobody else remains dissolves the entity.
 */

use uuid::Uuid;

use crate::shared::model::{Group, List};

/// Who controls and who shares a list or group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub admin: Uuid,
    /// Never contains `admin`
    pub shared_with: Vec<Uuid>,
}

/// What removing a participant amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// An ordinary member leaves
    Member,
    /// The admin leaves and `new_admin` takes over
    TransferAdmin { new_admin: Uuid },
    /// The last participant leaves; the entity is deleted
    Dissolve,
}

impl Membership {
    pub fn new(admin: Uuid, shared_with: Vec<Uuid>) -> Self {
        Self { admin, shared_with }
    }

    /// Admin first, then members in order
    pub fn participants(&self) -> Vec<Uuid> {
        std::iter::once(self.admin)
            .chain(self.shared_with.iter().copied())
            .collect()
    }

    /// Whether `user` may see the entity
    pub fn includes(&self, user: Uuid) -> bool {
        self.admin == user || self.shared_with.contains(&user)
    }

    /// The candidates that are not participants yet, each once, in the
    /// order given
    pub fn missing(&self, candidates: &[Uuid]) -> Vec<Uuid> {
        let mut missing: Vec<Uuid> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !self.includes(*candidate) && !missing.contains(candidate) {
                missing.push(*candidate);
            }
        }
        missing
    }

    /// Decide what removing `member` means; `None` when `member` is not a
    /// participant
    pub fn plan_removal(&self, member: Uuid) -> Option<Removal> {
        if member == self.admin {
            return Some(match self.shared_with.first() {
                Some(first) => Removal::TransferAdmin { new_admin: *first },
                None => Removal::Dissolve,
            });
        }
        self.shared_with.contains(&member).then_some(Removal::Member)
    }
}

/// The initial members of a new entity: each id once, owner excluded
pub fn initial_members(owner: Uuid, members: &[Uuid]) -> Vec<Uuid> {
    Membership::new(owner, Vec::new()).missing(members)
}

impl From<&List> for Membership {
    fn from(list: &List) -> Self {
        Self::new(list.admin, list.shared_with.clone())
    }
}

impl From<&Group> for Membership {
    fn from(group: &Group) -> Self {
        Self::new(group.admin, group.shared_with.clone())
    }
}
