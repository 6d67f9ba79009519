//! Auth state persisted across widget instances.

#![allow(clippy::unwrap_used)]

use coffeehub_storefront::config::AnimationConfig;
use coffeehub_storefront::controllers::{LoginField, SignupField};
use coffeehub_storefront::storage::{FileStorage, LocalStorage, keys};
use coffeehub_storefront::{Storefront, UiEvent};

fn dispatch_all(widget: &mut Storefront<FileStorage>, events: Vec<UiEvent>) {
    for event in events {
        widget.dispatch(event).unwrap();
    }
}

#[test]
fn test_login_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let storage = FileStorage::open(&path).unwrap();
        let mut widget = Storefront::new(storage, AnimationConfig::default()).unwrap();
        dispatch_all(
            &mut widget,
            vec![
                UiEvent::SignupInput {
                    field: SignupField::Name,
                    value: "A".to_owned(),
                },
                UiEvent::SignupInput {
                    field: SignupField::Email,
                    value: "a@x.com".to_owned(),
                },
                UiEvent::SignupInput {
                    field: SignupField::Password,
                    value: "p".to_owned(),
                },
                UiEvent::SignupInput {
                    field: SignupField::Confirm,
                    value: "p".to_owned(),
                },
                UiEvent::SubmitSignup,
                UiEvent::LoginInput {
                    field: LoginField::Email,
                    value: "a@x.com".to_owned(),
                },
                UiEvent::LoginInput {
                    field: LoginField::Password,
                    value: "p".to_owned(),
                },
                UiEvent::SubmitLogin,
            ],
        );
    }

    let storage = FileStorage::open(&path).unwrap();
    let mut widget = Storefront::new(storage, AnimationConfig::default()).unwrap();
    assert_eq!(widget.auth().current_user().unwrap().name, "A");
    assert!(widget.render().unwrap().auth_controls.contains(">Logout</button>"));
    assert!(widget.cart().is_empty());

    widget.dispatch(UiEvent::LoginControl).unwrap();
    let storage = FileStorage::open(&path).unwrap();
    assert!(storage.get_item(keys::CURRENT_USER).unwrap().is_none());
    assert!(storage.get_item(keys::USERS).unwrap().is_some());
}

#[test]
fn test_corrupt_current_user_starts_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut storage = FileStorage::open(&path).unwrap();
    storage.set_item(keys::CURRENT_USER, "not json").unwrap();

    let widget = Storefront::new(storage, AnimationConfig::default()).unwrap();
    assert!(widget.auth().current_user().is_none());
    assert!(widget.render().unwrap().auth_controls.contains(">Login</button>"));
}

#[test]
fn test_storage_file_is_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let mut storage = FileStorage::open(&path).unwrap();
    storage.set_item(keys::USERS, "[]").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value[keys::USERS], "[]");
}
