use socialnet_core::{
    MemoryStore, RepoError, SqliteStore, StatusRecord, StatusRepository, Store, UserProfile,
    UserRepository, ValidationError,
};

fn backends() -> Vec<Box<dyn Store>> {
    vec![
        Box::new(MemoryStore::new()),
        Box::new(SqliteStore::open_in_memory().unwrap()),
    ]
}

fn ann() -> UserProfile {
    UserProfile::new("u1", "a@x.com", "Ann", "Lee")
}

fn bea() -> UserProfile {
    UserProfile::new("u2", "b@y.com", "Bea", "Ng")
}

#[test]
fn add_then_search_returns_inserted_values() {
    for mut store in backends() {
        let backend = store.backend_name();
        assert!(store.add_user(&ann()).unwrap(), "{backend}");
        assert_eq!(store.search_user("u1").unwrap(), Some(ann()), "{backend}");
    }
}

#[test]
fn duplicate_add_is_rejected_and_original_kept() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();

        let clash = UserProfile::new("u1", "b@y.com", "Bea", "Ng");
        assert!(!store.add_user(&clash).unwrap(), "{backend}");
        assert_eq!(store.search_user("u1").unwrap(), Some(ann()), "{backend}");
        assert_eq!(store.list_users().unwrap().len(), 1, "{backend}");
    }
}

#[test]
fn modify_missing_user_does_not_insert() {
    for mut store in backends() {
        let backend = store.backend_name();
        assert!(!store.modify_user(&ann()).unwrap(), "{backend}");
        assert!(store.search_user("u1").unwrap().is_none(), "{backend}");
    }
}

#[test]
fn modify_overwrites_all_user_fields() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();

        let updated = UserProfile::new("u1", "ann.lee@x.com", "Annie", "Lee-Ng");
        assert!(store.modify_user(&updated).unwrap(), "{backend}");
        assert_eq!(store.search_user("u1").unwrap(), Some(updated), "{backend}");
    }
}

#[test]
fn second_delete_reports_missing() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();

        assert!(store.delete_user("u1").unwrap(), "{backend}");
        assert!(!store.delete_user("u1").unwrap(), "{backend}");
        assert!(store.search_user("u1").unwrap().is_none(), "{backend}");
    }
}

#[test]
fn search_missing_keys_returns_none() {
    for store in backends() {
        let backend = store.backend_name();
        assert!(store.search_user("nobody").unwrap().is_none(), "{backend}");
        assert!(store.search_status("nothing").unwrap().is_none(), "{backend}");
    }
}

#[test]
fn invalid_user_is_rejected_with_validation_error() {
    for mut store in backends() {
        let backend = store.backend_name();
        let invalid = UserProfile::new("u1", "not-an-email", "Ann", "Lee");

        let err = store.add_user(&invalid).unwrap_err();
        assert!(
            matches!(err, RepoError::Validation(ValidationError::InvalidEmail(_))),
            "{backend}: {err}"
        );
        assert!(store.search_user("u1").unwrap().is_none(), "{backend}");
    }
}

#[test]
fn users_are_listed_in_insertion_order() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&bea()).unwrap();
        store.add_user(&ann()).unwrap();

        let ids: Vec<_> = store
            .list_users()
            .unwrap()
            .into_iter()
            .map(|user| user.user_id)
            .collect();
        assert_eq!(ids, vec!["u2", "u1"], "{backend}");
    }
}

#[test]
fn status_crud_follows_same_key_rules() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();
        let status = StatusRecord::new("s1", "u1", "hello world");

        assert!(store.add_status(&status).unwrap(), "{backend}");
        assert!(
            !store
                .add_status(&StatusRecord::new("s1", "u1", "other"))
                .unwrap(),
            "{backend}"
        );
        assert_eq!(store.search_status("s1").unwrap(), Some(status), "{backend}");

        assert!(
            !store
                .modify_status(&StatusRecord::new("s9", "u1", "missing"))
                .unwrap(),
            "{backend}"
        );
        assert!(store.search_status("s9").unwrap().is_none(), "{backend}");

        assert!(store.delete_status("s1").unwrap(), "{backend}");
        assert!(!store.delete_status("s1").unwrap(), "{backend}");
    }
}

#[test]
fn status_modify_can_move_ownership() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();
        store.add_user(&bea()).unwrap();
        store
            .add_status(&StatusRecord::new("s1", "u1", "draft"))
            .unwrap();

        let moved = StatusRecord::new("s1", "u2", "final");
        assert!(store.modify_status(&moved).unwrap(), "{backend}");
        assert_eq!(store.search_status("s1").unwrap(), Some(moved), "{backend}");
        assert!(
            store.list_statuses_for_user("u1").unwrap().is_empty(),
            "{backend}"
        );
    }
}

#[test]
fn status_for_unknown_user_is_rejected() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();
        store
            .add_status(&StatusRecord::new("s1", "u1", "mine"))
            .unwrap();

        assert!(
            !store
                .add_status(&StatusRecord::new("s2", "ghost", "orphan"))
                .unwrap(),
            "{backend}"
        );
        assert!(store.search_status("s2").unwrap().is_none(), "{backend}");

        assert!(
            !store
                .modify_status(&StatusRecord::new("s1", "ghost", "stolen"))
                .unwrap(),
            "{backend}"
        );
        assert_eq!(
            store.search_status("s1").unwrap().unwrap().status_text,
            "mine",
            "{backend}"
        );
    }
}

#[test]
fn deleting_user_cascades_to_statuses() {
    for mut store in backends() {
        let backend = store.backend_name();
        store.add_user(&ann()).unwrap();
        store.add_user(&bea()).unwrap();
        for (status_id, owner) in [("s1", "u1"), ("s2", "u2"), ("s3", "u1")] {
            store
                .add_status(&StatusRecord::new(status_id, owner, "text"))
                .unwrap();
        }

        assert!(store.delete_user("u1").unwrap(), "{backend}");

        let remaining: Vec<_> = store
            .list_statuses()
            .unwrap()
            .into_iter()
            .map(|status| status.status_id)
            .collect();
        assert_eq!(remaining, vec!["s2"], "{backend}");
    }
}
