//! Property-based tests for membership planning
//!
//! Users are drawn from a small pool so that duplicates and overlaps are
//! common. The removal sequences run through the list service over the
//! in-memory store, so the documents checked are the ones actually written.

use proptest::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use listshare::backend::lists::ListService;
use listshare::backend::sharing::{initial_members, Membership, Removal};
use listshare::backend::store::{Collection, MemoryStore, Store};
use listshare::shared::model::{CreateListRequest, User};

fn user(n: u8) -> Uuid {
    Uuid::from_u128(u128::from(n) + 1)
}

fn users() -> impl Strategy<Value = Vec<Uuid>> {
    proptest::collection::vec(0u8..8, 0..12).prop_map(|ns| ns.into_iter().map(user).collect())
}

fn membership() -> impl Strategy<Value = Membership> {
    (0u8..8, users()).prop_map(|(admin, members)| {
        let admin = user(admin);
        Membership::new(admin, initial_members(admin, &members))
    })
}

fn is_unique(ids: &[Uuid]) -> bool {
    ids.iter().enumerate().all(|(i, id)| !ids[..i].contains(id))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_initial_members_are_unique_and_exclude_owner(owner in 0u8..8, members in users()) {
        let owner = user(owner);
        let initial = initial_members(owner, &members);

        prop_assert!(!initial.contains(&owner));
        prop_assert!(is_unique(&initial));
        for member in &members {
            prop_assert!(*member == owner || initial.contains(member));
        }
    }

    #[test]
    fn test_missing_is_idempotent(mut membership in membership(), candidates in users()) {
        let missing = membership.missing(&candidates);
        prop_assert!(is_unique(&missing));
        for id in &missing {
            prop_assert!(!membership.includes(*id));
        }

        membership.shared_with.extend(missing);
        prop_assert!(membership.missing(&candidates).is_empty());
        prop_assert!(!membership.shared_with.contains(&membership.admin));
    }

    #[test]
    fn test_plan_removal_classifies_every_user(membership in membership(), victim in 0u8..8) {
        let victim = user(victim);

        match membership.plan_removal(victim) {
            None => prop_assert!(!membership.includes(victim)),
            Some(Removal::Member) => {
                prop_assert!(victim != membership.admin);
                prop_assert!(membership.shared_with.contains(&victim));
            }
            Some(Removal::TransferAdmin { new_admin }) => {
                prop_assert_eq!(victim, membership.admin);
                prop_assert_eq!(Some(&new_admin), membership.shared_with.first());
            }
            Some(Removal::Dissolve) => {
                prop_assert_eq!(membership.participants(), vec![victim]);
            }
        }
    }

    #[test]
    fn test_stored_list_stays_consistent_while_users_leave(
        size in 1usize..6,
        leavers in proptest::collection::vec(0usize..6, 1..16),
    ) {
        runtime().block_on(async {
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            let mut ids = Vec::new();
            for n in 0..size {
                let user = User::new(format!("u{}@example.com", n), format!("U{}", n), "hash".into());
                ids.push(store.insert_user(user).await.unwrap().id);
            }
            let service = ListService::new(store.clone());
            let list = service
                .create(ids[0], CreateListRequest { name: "Trip".into(), shared_with: ids[1..].to_vec() })
                .await
                .unwrap();

            for leaver in leavers {
                let leaver = ids[leaver % size];
                let Some(before) = store.find_membership(Collection::Lists, list.id).await.unwrap() else {
                    break;
                };
                if !before.includes(leaver) {
                    continue;
                }

                let removed = service.remove_member(leaver, list.id, leaver).await.unwrap();
                prop_assert_eq!(Some(removed.removal), before.plan_removal(leaver));

                let after = store.find_membership(Collection::Lists, list.id).await.unwrap();
                match &after {
                    Some(after) => {
                        prop_assert!(!after.includes(leaver));
                        prop_assert!(!after.shared_with.contains(&after.admin));
                        prop_assert_eq!(after.participants().len(), before.participants().len() - 1);
                    }
                    None => prop_assert_eq!(removed.removal, Removal::Dissolve),
                }

                for id in &ids {
                    let user = store.find_user(*id).await.unwrap().unwrap();
                    let on_list = after.as_ref().is_some_and(|after| after.includes(*id));
                    prop_assert_eq!(user.lists.contains(&list.id), on_list);
                }
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
