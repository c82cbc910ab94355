/**
 * Sharing Engine
 *
 * The membership operations lists and groups have in common: visibility
 * checks, adding and removing participants, cascading deletes, and keeping
 * the `lists`/`groups` back-references on users in step with `admin` and
 * `shared_with`.
 *
 * Every operation is a sequence of single-document writes. Two requests
 * mutating the same entity at once can interleave between those writes and
 * lose an update; a failure halfway leaves the earlier writes in place.
 * Failures are logged with enough context to repair the documents by hand.
 */

use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::sharing::membership::{Membership, Removal};
use crate::backend::store::{Collection, Store};
use crate::shared::model::User;

/// Result of a successful member removal
#[derive(Debug, Clone)]
pub struct RemovedMember {
    /// The user that left
    pub user: User,
    /// What the removal amounted to
    pub removal: Removal,
}

/// Membership operations over a [`Store`]
#[derive(Clone)]
pub struct SharingEngine {
    store: Arc<dyn Store>,
}

impl SharingEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Look up one user; NotFound when absent
    pub async fn require_user(&self, id: Uuid) -> Result<User, BackendError> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| BackendError::not_found("User not found"))
    }

    /// Look up every id in `ids`, which must be distinct
    ///
    /// # Errors
    ///
    /// * `NotFound` - if any id does not resolve to a user
    pub async fn resolve_users(&self, ids: &[Uuid]) -> Result<Vec<User>, BackendError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.store.find_users(ids).await?;
        if users.len() != ids.len() {
            tracing::warn!("Only {} of {} users resolved", users.len(), ids.len());
            return Err(BackendError::not_found("One or more users not found"));
        }
        Ok(users)
    }

    /// Membership of `id`, provided `actor` may see it
    ///
    /// A missing entity and one the actor is not on produce the same
    /// NotFound, so ids of other users' lists are not disclosed.
    pub async fn visible_membership(
        &self,
        collection: Collection,
        actor: Uuid,
        id: Uuid,
    ) -> Result<Membership, BackendError> {
        match self.store.find_membership(collection, id).await? {
            Some(membership) if membership.includes(actor) => Ok(membership),
            _ => Err(BackendError::not_found(format!("{} not found", collection.title()))),
        }
    }

    /// Push the back-reference of a freshly stored entity onto its admin and
    /// members
    ///
    /// The entity is not removed again when this fails.
    pub async fn link(&self, collection: Collection, id: Uuid, membership: &Membership) -> Result<(), BackendError> {
        let participants = membership.participants();
        let linked = self
            .store
            .push_back_reference(collection, &participants, id)
            .await
            .map_err(|e| {
                tracing::error!(
                    "{} {} was stored but its back-references could not be written: {}",
                    collection.title(),
                    id,
                    e
                );
                e
            })?;
        tracing::debug!("Linked {} {} to {} users", collection.label(), id, linked);
        Ok(())
    }

    /// Add `candidates` to `shared_with`
    ///
    /// Candidates already on the entity (as admin or member) and repeated
    /// candidates are skipped, so calling this twice with the same ids
    /// changes nothing the second time.
    ///
    /// # Returns
    ///
    /// The ids that were actually added, in request order
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - if `candidates` is empty
    /// * `NotFound` - if the entity is not visible to `actor` or a candidate is not a user
    pub async fn add_members(
        &self,
        collection: Collection,
        actor: Uuid,
        id: Uuid,
        candidates: &[Uuid],
    ) -> Result<Vec<Uuid>, BackendError> {
        if candidates.is_empty() {
            return Err(BackendError::invalid_argument("No users supplied"));
        }

        let membership = self.visible_membership(collection, actor, id).await?;

        let mut distinct: Vec<Uuid> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !distinct.contains(candidate) {
                distinct.push(*candidate);
            }
        }
        self.resolve_users(&distinct).await?;

        let added = membership.missing(&distinct);
        if added.is_empty() {
            tracing::debug!("All users already on {} {}", collection.label(), id);
            return Ok(added);
        }

        if !self.store.push_members(collection, id, &added).await? {
            return Err(BackendError::not_found(format!("{} not found", collection.title())));
        }
        self.store.push_back_reference(collection, &added, id).await?;

        tracing::info!("Added {} users to {} {}", added.len(), collection.label(), id);
        Ok(added)
    }

    /// Remove `member` from the entity
    ///
    /// Removing the admin promotes the first member; removing the last
    /// participant deletes the entity with a cascade. The member's own
    /// back-reference is pulled in every case.
    ///
    /// # Errors
    ///
    /// * `NotFound` - if the entity is not visible to `actor`, `member` is
    ///   not a user, or `member` is not on the entity
    pub async fn remove_member(
        &self,
        collection: Collection,
        actor: Uuid,
        id: Uuid,
        member: Uuid,
    ) -> Result<RemovedMember, BackendError> {
        let membership = self.visible_membership(collection, actor, id).await?;
        let user = self.require_user(member).await?;

        let removal = membership
            .plan_removal(member)
            .ok_or_else(|| BackendError::not_found(format!("User is not on this {}", collection.label())))?;

        match removal {
            Removal::Member => {
                self.store.pull_member(collection, id, member).await?;
                self.store.pull_back_reference(collection, member, id).await?;
            }
            Removal::TransferAdmin { new_admin } => {
                self.store.transfer_admin(collection, id, new_admin).await?;
                self.store.pull_back_reference(collection, member, id).await?;
                tracing::info!("{} {} transferred from {} to {}", collection.title(), id, member, new_admin);
            }
            Removal::Dissolve => {
                self.cascade_delete(collection, id).await?;
                tracing::info!("Last participant left, {} {} deleted", collection.label(), id);
            }
        }

        Ok(RemovedMember { user, removal })
    }

    /// Delete the entity and prune every back-reference to it
    ///
    /// # Errors
    ///
    /// * `NotFound` - if the entity is not visible to `actor`
    pub async fn delete(&self, collection: Collection, actor: Uuid, id: Uuid) -> Result<(), BackendError> {
        self.visible_membership(collection, actor, id).await?;
        if !self.cascade_delete(collection, id).await? {
            return Err(BackendError::not_found(format!("{} not found", collection.title())));
        }
        Ok(())
    }

    async fn cascade_delete(&self, collection: Collection, id: Uuid) -> Result<bool, BackendError> {
        if !self.store.delete_shared(collection, id).await? {
            return Ok(false);
        }
        let pruned = self.store.pull_back_references(collection, id).await.map_err(|e| {
            tracing::error!("{} {} deleted but back-references were not pruned: {}", collection.title(), id, e);
            e
        })?;
        tracing::info!("Deleted {} {} and pruned {} back-references", collection.label(), id, pruned);
        Ok(true)
    }
}
