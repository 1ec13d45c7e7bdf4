use std::sync::Arc;

use crate::storage::sqlite::Sqlite;

use super::*;

async fn setup_storage() -> ArcStorage {
    Arc::new(Sqlite::new(None).await.expect("open storage"))
}

#[tokio::test]
async fn test_load_follows_system_without_preference() {
    let storage = setup_storage().await;

    let mut state = ThemeState::load(Arc::clone(&storage), true).await.unwrap();
    assert_eq!(state.preference(), ThemePreference::System);
    assert_eq!(state.theme(), Theme::Dark);

    assert_eq!(state.set_system_dark(false), true);
    assert_eq!(state.theme(), Theme::Light);
    assert_eq!(state.set_system_dark(false), false);
    assert_eq!(storage.get(THEME_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_load_drops_unknown_value() {
    let storage = setup_storage().await;
    storage.set(THEME_KEY, "solarized").await.unwrap();

    let state = ThemeState::load(Arc::clone(&storage), false).await.unwrap();
    assert_eq!(state.preference(), ThemePreference::System);
    assert_eq!(storage.get(THEME_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_toggle_pins_preference() {
    let storage = setup_storage().await;
    storage.set(THEME_KEY, "dark").await.unwrap();

    let mut state = ThemeState::load(Arc::clone(&storage), false).await.unwrap();
    assert_eq!(state.theme(), Theme::Dark);

    assert_eq!(state.toggle().await.unwrap(), Theme::Light);
    assert_eq!(state.preference(), ThemePreference::Light);
    assert_eq!(
        storage.get(THEME_KEY).await.unwrap(),
        Some("light".to_string())
    );

    // A pinned preference ignores the terminal
    assert_eq!(state.set_system_dark(true), false);
    assert_eq!(state.theme(), Theme::Light);

    assert_eq!(state.toggle().await.unwrap(), Theme::Dark);
    assert_eq!(
        storage.get(THEME_KEY).await.unwrap(),
        Some("dark".to_string())
    );
}

#[test]
fn test_dark_background() {
    assert_eq!(dark_background("15;0"), true);
    assert_eq!(dark_background("15;default;8"), true);
    assert_eq!(dark_background("0;15"), false);
    assert_eq!(dark_background("0;7"), false);
    assert_eq!(dark_background(""), false);
    assert_eq!(dark_background("garbage"), false);
}
