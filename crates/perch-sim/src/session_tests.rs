use super::*;
use crate::demo_script;

fn session() -> Session {
    Session::new(Config::default(), Rect::new(0, 0, 1920, 1080)).unwrap()
}

fn run(toml: &str) -> Result<Session, SessionError> {
    let script = Script::parse(toml).unwrap();
    let mut session = Session::new(Config::default(), script.screen)?;
    session.run(&script)?;
    Ok(session)
}

#[test]
fn auto_overlay_is_pinned_and_loses_focus() {
    // Arrange
    let toml = r#"
        [[step]]
        do = "spawn"
        title = "terminal"
        class = "alacritty"

        [[step]]
        do = "spawn"
        title = "video"
        class = "mpv"
    "#;

    // Act
    let session = run(toml).unwrap();

    // Assert
    let host = session.host();
    let video = host.find("video").unwrap();
    let terminal = host.find("terminal").unwrap();
    assert_eq!(host.window(video).unwrap().rect, Rect::new(1280, 0, 640, 360));
    assert!(host.window(video).unwrap().floating);
    assert_eq!(host.top(), Some(video));
    assert_eq!(host.focused(), Some(terminal));
    assert_eq!(session.context().overlay().window(), Some(video));
}

#[test]
fn idle_spinner_ticks_on_virtual_clock() {
    // Arrange
    let mut session = session();

    // Act
    session.advance(Duration::from_millis(100));

    // Assert
    let snap = session.snapshot();
    let lines: Vec<_> = snap
        .ticker
        .iter()
        .map(|l| (l.at_ms, l.text.as_str()))
        .collect();
    assert_eq!(lines, [(0, "/"), (50, "-"), (100, "\\")]);
    assert_eq!(snap.elapsed_ms, 100);
}

#[test]
fn refused_actions_are_recorded_and_replay_continues() {
    // Arrange
    let toml = r#"
        [[step]]
        do = "action"
        action = { adjust_size = 1 }

        [[step]]
        do = "spawn"
        title = "video"
        class = "mpv"
    "#;

    // Act
    let session = run(toml).unwrap();

    // Assert
    let snap = session.snapshot();
    assert_eq!(snap.failures.len(), 1);
    assert_eq!(snap.failures[0].step, 1);
    assert_eq!(snap.failures[0].message, "no overlay window is set");
    assert!(snap.overlay.is_some());
}

#[test]
fn unknown_title_aborts_replay() {
    // Arrange
    let toml = "[[step]]\ndo = \"close\"\ntitle = \"ghost\"\n";

    // Act
    let err = run(toml).unwrap_err();

    // Assert
    assert!(matches!(err, SessionError::UnknownTitle { step: 1, .. }));
    assert_eq!(err.to_string(), "step 1: no window titled 'ghost'");
}

#[test]
fn negative_wait_is_rejected() {
    // Arrange
    let mut session = session();

    // Act
    let err = session.step(1, &Step::Wait { secs: -1.0 }).unwrap_err();

    // Assert
    assert!(matches!(err, SessionError::BadWait { step: 1, .. }));
}

#[test]
fn huge_wait_is_rejected_without_ticking() {
    // Arrange
    let mut session = session();

    // Act
    let err = session.step(3, &Step::Wait { secs: 1e9 }).unwrap_err();

    // Assert
    assert!(matches!(err, SessionError::BadWait { step: 3, .. }));
    assert_eq!(session.elapsed(), Duration::ZERO);
    assert!(session.snapshot().ticker.is_empty());
}

#[test]
fn dialogs_are_floated_on_creation() {
    // Arrange
    let toml = r#"
        [[step]]
        do = "spawn"
        title = "editor"
        class = "neovide"

        [[step]]
        do = "spawn"
        title = "save as"
        class = "neovide"
        dialog = true
    "#;

    // Act
    let session = run(toml).unwrap();

    // Assert
    let host = session.host();
    let editor = host.find("editor").unwrap();
    let dialog = host.find("save as").unwrap();
    assert!(!host.window(editor).unwrap().floating);
    assert!(host.window(dialog).unwrap().floating);
    assert_eq!(host.window(dialog).unwrap().rect, Rect::new(480, 270, 960, 540));
}

#[test]
fn demo_mid_session_state() {
    // Arrange: everything up to the bounced click on the overlay
    let script = demo_script().unwrap();
    let mut session = Session::new(Config::default(), script.screen).unwrap();

    // Act
    for (index, step) in script.steps.iter().take(17).enumerate() {
        session.step(index + 1, step).unwrap();
    }

    // Assert
    let host = session.host();
    let video = host.find("video").unwrap();
    let browser = host.find("browser").unwrap();
    let window = host.window(video).unwrap();
    assert_eq!(window.group, "2");
    assert!(!window.minimized);
    assert_eq!(window.rect, Rect::new(1200, 20, 720, 405));
    assert!((window.opacity - 0.7).abs() < 1e-9);
    assert_eq!(host.focused(), Some(browser));
    assert!(session.context().overlay().is_visible());
}

#[test]
fn demo_replays_cleanly() {
    // Arrange
    let script = demo_script().unwrap();

    // Act
    let snap = replay(Config::default(), &script).unwrap();

    // Assert
    assert!(snap.failures.is_empty(), "{:?}", snap.failures);
    assert_eq!(snap.overlay, None);
    assert_eq!(snap.group, "2");
    assert_eq!(snap.focused.as_deref(), Some("browser"));
    assert_eq!(snap.windows.len(), 3);
    let announced: Vec<_> = snap.ticker.iter().take(4).map(|l| (l.at_ms, l.text.as_str())).collect();
    assert_eq!(
        announced,
        [
            (0, "640x360 0x0y"),
            (550, "720x405 0x0y"),
            (750, "720x405 0x20y"),
            (1000, "max"),
        ]
    );
}

#[test]
fn snapshot_serializes_to_json() {
    // Arrange
    let script = demo_script().unwrap();
    let snap = replay(Config::default(), &script).unwrap();

    // Act
    let json = snap.to_json().unwrap();

    // Assert
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["group"], "2");
    assert_eq!(value["focused"], "browser");
    assert!(value["overlay"].is_null());
    assert_eq!(value["ticker"][0]["text"], "640x360 0x0y");
}

#[test]
fn snapshot_renders_for_humans() {
    // Arrange
    let script = demo_script().unwrap();
    let snap = replay(Config::default(), &script).unwrap();

    // Act
    let text = snap.to_string();

    // Assert
    assert!(text.contains("Status line:"));
    assert!(text.contains("Focused: browser"));
    assert!(text.contains("Overlay: (none)"));
}
