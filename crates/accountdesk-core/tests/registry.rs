//! Integration tests for the account registry.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::rc::Rc;

use accountdesk_core::{
    Account, AccountId, AccountRegistry, AccountType, Error, FileStore, KeyValueStore,
    MemoryStore,
};
use proptest::prelude::*;

fn ids<S: KeyValueStore>(registry: &AccountRegistry<S>) -> Vec<u64> {
    registry.accounts().iter().map(|a| a.id.0).collect()
}

#[test]
fn add_remove_add_scenario() {
    let mut registry = AccountRegistry::new(MemoryStore::new());

    registry.add_account().unwrap();
    registry.add_account().unwrap();
    assert_eq!(ids(&registry), vec![1, 2]);
    for account in registry.accounts() {
        assert_eq!(account.account_type, AccountType::Local);
        assert!(!account.is_valid);
    }

    registry.remove_account(AccountId::new(1));
    assert_eq!(ids(&registry), vec![2]);
    assert_eq!(registry.next_id(), 3);

    let id = registry.add_account().unwrap();
    assert_eq!(id, AccountId::new(3));
    assert_eq!(ids(&registry), vec![2, 3]);
}

#[test]
fn empty_load_defaults() {
    let mut registry = AccountRegistry::new(MemoryStore::new());
    assert!(!registry.load_from_storage().unwrap());
    assert_eq!(registry.next_id(), 1);
    assert!(registry.accounts().is_empty());
}

#[test]
fn save_and_reload_through_shared_store() {
    let store = Rc::new(MemoryStore::new());

    let mut first = AccountRegistry::new(Rc::clone(&store));
    let id = first.add_account().unwrap();
    first.add_account().unwrap();
    first.edit(id, |a| {
        a.login = "frank".to_string();
        a.password = "hunter2".to_string();
        a.set_raw_label("ops; on-call");
        a.revalidate();
    });
    first.remove_account(AccountId::new(2));
    first.save_to_storage().unwrap();

    let mut second = AccountRegistry::new(Rc::clone(&store));
    assert!(second.load_from_storage().unwrap());
    assert_eq!(second.accounts(), first.accounts());
    assert_eq!(second.next_id(), 3);
    assert!(second.get(id).unwrap().is_valid);
    assert_eq!(second.get(id).unwrap().label.len(), 2);
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut registry = AccountRegistry::new(FileStore::open(dir.path()).unwrap());
        registry.add_account().unwrap();
        let ldap = registry.add_account().unwrap();
        registry.edit(ldap, |a| {
            a.set_account_type(AccountType::Ldap);
            a.login = "grace".to_string();
        });
        registry.save_to_storage().unwrap();
    }

    let mut reopened = AccountRegistry::new(FileStore::open(dir.path()).unwrap());
    assert!(reopened.load_from_storage().unwrap());
    assert_eq!(ids(&reopened), vec![1, 2]);
    assert_eq!(reopened.next_id(), 3);
    assert_eq!(
        reopened.get(AccountId::new(2)).unwrap().account_type,
        AccountType::Ldap
    );
}

#[test]
fn loads_blob_written_by_earlier_revision() {
    let blob = r#"{
        "accounts": [
            {"id": 1, "label": [{"text": "a"}], "rawLabel": "a",
             "accountType": "Локальная", "login": "u", "password": "p", "isValid": true},
            {"id": 3, "label": [], "rawLabel": "",
             "accountType": "LDAP", "login": "v", "password": null, "isValid": true}
        ],
        "nextId": 4
    }"#;
    let mut registry = AccountRegistry::new(MemoryStore::with_entry("accounts", blob));
    registry.load_from_storage().unwrap();

    assert_eq!(ids(&registry), vec![1, 3]);
    let ldap = registry.get(AccountId::new(3)).unwrap();
    assert_eq!(ldap.password, "");
    assert!(!ldap.password_valid);
    assert_eq!(
        registry.get(AccountId::new(1)).unwrap().account_type,
        AccountType::Local
    );
}

#[test]
fn ids_at_top_of_range_never_repeat() {
    let top = u64::MAX;
    let blob = format!(r#"{{"accounts": [{{"id": {top}, "accountType": "Local"}}], "nextId": 5}}"#);
    let mut registry = AccountRegistry::new(MemoryStore::with_entry("accounts", blob));
    assert!(matches!(
        registry.load_from_storage(),
        Err(Error::IdSpaceExhausted(_))
    ));
    assert!(registry.is_empty());

    let near = u64::MAX - 3;
    let blob = format!(r#"{{"accounts": [{{"id": {near}, "accountType": "Local"}}], "nextId": 5}}"#);
    let mut registry = AccountRegistry::new(MemoryStore::with_entry("accounts", blob));
    registry.load_from_storage().unwrap();
    assert_eq!(registry.next_id(), near + 1);

    while registry.add_account().is_ok() {}
    let issued = ids(&registry);
    let unique: HashSet<u64> = issued.iter().copied().collect();
    assert_eq!(unique.len(), issued.len());
    assert!(issued.iter().all(|id| *id < registry.next_id()));
    assert_eq!(issued, vec![near, near + 1]);
}

#[test]
fn blank_stored_value_is_ignored() {
    let mut registry = AccountRegistry::new(MemoryStore::with_entry("accounts", ""));
    assert!(!registry.load_from_storage().unwrap());
    assert_eq!(registry.next_id(), 1);
    assert!(registry.accounts().is_empty());
}

#[test]
fn save_overwrites_previous_blob() {
    let store = MemoryStore::new();
    let mut registry = AccountRegistry::new(&store);
    registry.add_account().unwrap();
    registry.save_to_storage().unwrap();
    registry.remove_account(AccountId::new(1));
    registry.save_to_storage().unwrap();

    let blob = store.get("accounts").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["accounts"].as_array().unwrap().len(), 0);
    assert_eq!(value["nextId"], 2);
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(u64),
    Update(u64, String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        1 => (1u64..20).prop_map(Op::Remove),
        1 => (1u64..20, "[a-z]{0,8}").prop_map(|(id, login)| Op::Update(id, login)),
    ]
}

fn apply(registry: &mut AccountRegistry<impl KeyValueStore>, op: &Op) {
    match op {
        Op::Add => {
            registry.add_account().unwrap();
        }
        Op::Remove(id) => {
            registry.remove_account(AccountId::new(*id));
        }
        Op::Update(id, login) => {
            let mut account = Account::new(AccountId::new(*id));
            account.login.clone_from(login);
            registry.update_account(account);
        }
    }
}

proptest! {
    #[test]
    fn ids_are_sequential_and_unique(n in 0usize..50) {
        let mut registry = AccountRegistry::new(MemoryStore::new());
        for _ in 0..n {
            registry.add_account().unwrap();
        }
        let issued = ids(&registry);
        let expected: Vec<u64> = (1..=n as u64).collect();
        prop_assert_eq!(issued, expected);
        prop_assert_eq!(registry.next_id(), n as u64 + 1);
    }

    #[test]
    fn ids_stay_unique_and_below_counter(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut registry = AccountRegistry::new(MemoryStore::new());
        let mut last_counter = registry.next_id();
        for op in &ops {
            apply(&mut registry, op);
            prop_assert!(registry.next_id() >= last_counter);
            last_counter = registry.next_id();
        }
        let issued = ids(&registry);
        let unique: HashSet<u64> = issued.iter().copied().collect();
        prop_assert_eq!(unique.len(), issued.len());
        prop_assert!(issued.iter().all(|id| *id < registry.next_id()));
    }

    #[test]
    fn remove_is_idempotent(adds in 0usize..10, target in 0u64..12) {
        let mut registry = AccountRegistry::new(MemoryStore::new());
        for _ in 0..adds {
            registry.add_account().unwrap();
        }
        registry.remove_account(AccountId::new(target));
        let once = registry.accounts().to_vec();
        registry.remove_account(AccountId::new(target));
        prop_assert_eq!(registry.accounts(), once.as_slice());
    }

    #[test]
    fn save_load_round_trip(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let store = Rc::new(MemoryStore::new());
        let mut original = AccountRegistry::new(Rc::clone(&store));
        for op in &ops {
            apply(&mut original, op);
        }
        original.save_to_storage().unwrap();

        let mut restored = AccountRegistry::new(Rc::clone(&store));
        restored.load_from_storage().unwrap();
        prop_assert_eq!(restored.accounts(), original.accounts());
        prop_assert_eq!(restored.next_id(), original.next_id());
    }
}
