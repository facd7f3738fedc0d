use spectral::prelude::*;
use tempfile::TempDir;
use textsum::{
    Theme,
    config::{normalize_base_url, resolve_api_base_url},
    constants::DEFAULT_API_BASE_URL,
    storage::Preferences,
};

fn temp_preferences() -> (TempDir, Preferences) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let preferences = Preferences::new(&dir.path().join("nested").join("preferences.db"))
        .expect("Failed to open preferences");
    (dir, preferences)
}

#[test]
fn default_url_is_used_when_nothing_is_configured() {
    let (_dir, preferences) = temp_preferences();

    let url = resolve_api_base_url(None, &preferences).expect("Expected a URL");

    assert_that(&url).is_equal_to(DEFAULT_API_BASE_URL.to_owned());
    assert_that(&preferences.api_base_url().expect("read")).is_none();
}

#[test]
fn override_wins_and_is_persisted_without_trailing_slash() {
    let (_dir, preferences) = temp_preferences();
    preferences
        .set_api_base_url("http://stored.test")
        .expect("write");

    let url = resolve_api_base_url(Some("http://override.test/"), &preferences)
        .expect("Expected a URL");

    assert_that(&url).is_equal_to("http://override.test".to_owned());
    assert_that(&preferences.api_base_url().expect("read"))
        .is_equal_to(Some("http://override.test".to_owned()));
}

#[test]
fn stored_url_beats_default_in_later_sessions() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preferences.db");

    {
        let preferences = Preferences::new(&path).expect("open");
        resolve_api_base_url(Some("http://saved.test"), &preferences).expect("resolve");
    }

    let preferences = Preferences::new(&path).expect("reopen");
    let url = resolve_api_base_url(None, &preferences).expect("Expected a URL");

    assert_that(&url).is_equal_to("http://saved.test".to_owned());
}

#[test]
fn invalid_override_is_rejected_and_not_persisted() {
    let (_dir, preferences) = temp_preferences();

    let result = resolve_api_base_url(Some("not a url"), &preferences);

    assert_that(&result.is_err()).is_true();
    assert_that(&preferences.api_base_url().expect("read")).is_none();
}

#[test]
fn normalization_strips_one_trailing_slash() {
    assert_that(&normalize_base_url("http://a.test/")).is_equal_to("http://a.test".to_owned());
    assert_that(&normalize_base_url("http://a.test")).is_equal_to("http://a.test".to_owned());
}

#[test]
fn theme_defaults_to_dark_and_persists_toggle() {
    let (_dir, preferences) = temp_preferences();

    let theme = preferences.theme().expect("read");
    assert_that(&theme).is_equal_to(Theme::Dark);

    preferences.set_theme(theme.toggled()).expect("write");
    assert_that(&preferences.theme().expect("read")).is_equal_to(Theme::Light);
}

#[test]
fn unknown_stored_theme_falls_back_to_dark() {
    let (_dir, preferences) = temp_preferences();
    preferences.set("theme", "sepia").expect("write");

    assert_that(&preferences.theme().expect("read")).is_equal_to(Theme::Dark);
}
