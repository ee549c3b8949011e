// Integration tests for the tab manager, settings record and run guard

use std::fs;

use ride::config::{Settings, WindowGeometry};
use ride::editor::{EditorTabs, SaveOutcome};
use ride::error::AppError;
use ride::ui::app::{is_runnable, App, Modal};

fn write_file(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn opening_same_path_twice_creates_one_tab() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "a.py", "print('a')\n");

    let mut tabs = EditorTabs::new();
    tabs.open(&file).expect("first open");
    tabs.open(&file).expect("second open");

    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.registered_count(), 1);
}

#[test]
fn second_open_focuses_existing_tab() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.py", "a\n");
    let b = write_file(dir.path(), "b.py", "b\n");

    let mut tabs = EditorTabs::new();
    tabs.open(&a).unwrap();
    tabs.open(&b).unwrap();
    assert_eq!(tabs.active_index(), Some(1));

    tabs.open(&a).unwrap();
    assert_eq!(tabs.active_index(), Some(0));
    assert_eq!(tabs.len(), 2);
}

#[test]
fn close_removes_exactly_one_registry_entry() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.py", "a\n");
    let b = write_file(dir.path(), "b.py", "b\n");
    let c = write_file(dir.path(), "c.py", "c\n");

    let mut tabs = EditorTabs::new();
    tabs.open(&a).unwrap();
    tabs.open(&b).unwrap();
    tabs.open(&c).unwrap();
    assert_eq!(tabs.registered_count(), 3);

    tabs.close(1);
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs.registered_count(), 2);
    assert!(tabs.is_open(&a));
    assert!(!tabs.is_open(&b));
    assert!(tabs.is_open(&c));

    // Remaining registry entries still point at their tabs.
    tabs.open(&c).unwrap();
    assert_eq!(tabs.active_tab().unwrap().title, "c.py");
}

#[test]
fn read_failure_creates_no_tab() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.py");

    let mut tabs = EditorTabs::new();
    let err = tabs.open(&missing);
    assert!(matches!(err, Err(AppError::FileRead { .. })));
    assert_eq!(tabs.len(), 0);
    assert_eq!(tabs.registered_count(), 0);
}

#[test]
fn save_as_on_untitled_writes_and_retags() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("x.py");

    let mut tabs = EditorTabs::new();
    tabs.new_untitled();
    tabs.active_tab_mut()
        .unwrap()
        .buffer
        .set_text("print('hello')\n");

    // An untitled tab has no path to save to.
    assert_eq!(tabs.save_active().unwrap(), SaveOutcome::NeedsPath);

    let saved = tabs.save_active_as(&dest).expect("save as");
    assert_eq!(fs::read_to_string(&dest).unwrap(), "print('hello')\n");
    assert_eq!(tabs.active_tab().unwrap().title, "x.py");
    assert!(tabs.is_open(&saved));
    assert_eq!(tabs.registered_count(), 1);
    assert!(!tabs.active_tab().unwrap().buffer.is_modified());
}

#[test]
fn save_as_moves_registry_entry_from_old_path() {
    let dir = tempfile::tempdir().unwrap();
    let old = write_file(dir.path(), "old.txt", "text\n");
    let new = dir.path().join("new.txt");

    let mut tabs = EditorTabs::new();
    tabs.open(&old).unwrap();
    tabs.save_active_as(&new).unwrap();

    assert!(!tabs.is_open(&old));
    assert!(tabs.is_open(&new));
    assert_eq!(tabs.registered_count(), 1);
}

#[test]
fn save_as_onto_open_path_closes_the_stale_tab() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.py", "old a\n");
    let b = write_file(dir.path(), "b.py", "b\n");

    let mut tabs = EditorTabs::new();
    tabs.open(&a).unwrap();
    tabs.open(&b).unwrap();

    // The b tab is active; saving it over a.py makes the a tab stale.
    tabs.save_active_as(&a).unwrap();

    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.registered_count(), 1);
    assert_eq!(tabs.active_tab().unwrap().title, "a.py");
    assert_eq!(fs::read_to_string(&a).unwrap(), "b\n");
    assert!(tabs.is_open(&a));
    assert!(!tabs.is_open(&b));

    // The surviving tab's registry entry still indexes it.
    tabs.close(0);
    assert_eq!(tabs.len(), 0);
    assert_eq!(tabs.registered_count(), 0);
}

#[test]
fn closing_an_earlier_tab_keeps_the_active_tab() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.py", "a\n");
    let b = write_file(dir.path(), "b.py", "b\n");
    let c = write_file(dir.path(), "c.py", "c\n");

    let mut tabs = EditorTabs::new();
    tabs.open(&a).unwrap();
    tabs.open(&b).unwrap();
    tabs.open(&c).unwrap();
    assert_eq!(tabs.active_tab().unwrap().title, "c.py");

    tabs.close(0);
    assert_eq!(tabs.active_tab().unwrap().title, "c.py");
    assert_eq!(tabs.active_index(), Some(1));
}

#[test]
fn save_writes_to_tracked_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "a.py", "original\n");

    let mut tabs = EditorTabs::new();
    tabs.open(&file).unwrap();
    tabs.active_tab_mut().unwrap().buffer.set_text("changed\n");

    match tabs.save_active().unwrap() {
        SaveOutcome::Saved(path) => assert_eq!(fs::read_to_string(path).unwrap(), "changed\n"),
        SaveOutcome::NeedsPath => panic!("tab has a path"),
    }
}

#[test]
fn settings_round_trip_preserves_all_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let settings = Settings {
        window: WindowGeometry {
            width: 1280,
            height: 720,
            x: 40,
            y: 25,
        },
        explorer_visible: false,
        terminal_visible: true,
    };
    settings.save_to(&path).expect("save settings");

    let loaded = Settings::load_from(&path);
    assert_eq!(loaded, settings);
}

#[test]
fn settings_unknown_and_missing_keys_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "terminal_visible": false, "future_option": 42 }"#,
    )
    .unwrap();

    let loaded = Settings::load_from(&path);
    assert!(!loaded.terminal_visible);
    // Absent keys take defaults.
    assert!(loaded.explorer_visible);
    assert_eq!(loaded.window, WindowGeometry::default());
}

#[test]
fn settings_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Settings::load_from(&dir.path().join("nope.json"));
    assert_eq!(loaded, Settings::default());
}

#[test]
fn run_on_non_python_file_warns_without_saving_or_running() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "notes.txt", "text\n");

    let mut app = App::new(Settings::default(), dir.path().to_path_buf());
    app.open_file(&file);
    app.tabs.active_tab_mut().unwrap().buffer.insert_str("more ");
    let shell_lines_before = app.shell.lines().len();

    app.run_current_file();

    assert!(matches!(app.modal, Some(Modal::Warning(_))));
    // Neither saved nor executed.
    assert!(app.tabs.active_tab().unwrap().buffer.is_modified());
    assert_eq!(fs::read_to_string(&file).unwrap(), "text\n");
    assert_eq!(app.shell.lines().len(), shell_lines_before);
    assert!(!app.shell.is_running());
}

#[test]
fn only_python_files_are_runnable() {
    assert!(is_runnable(std::path::Path::new("/tmp/x.py")));
    assert!(!is_runnable(std::path::Path::new("/tmp/x.txt")));
    assert!(!is_runnable(std::path::Path::new("/tmp/noext")));
    assert!(!is_runnable(std::path::Path::new("/tmp/x.pyc")));
}
