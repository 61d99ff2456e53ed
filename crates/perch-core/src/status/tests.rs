use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn rotation_follows_registration_order_and_drops_expired() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("a", "alpha", 1.0, t0);
    status.show_text("b", "beta", 1.0, t0 + secs(0.5));

    // Act
    let first = status.tick(t0 + secs(0.5));
    let later = status.tick(t0 + secs(1.1));

    // Assert
    assert_eq!(first, "alpha");
    assert_eq!(later, "beta");
    assert!(!status.contains("a"));
    assert_eq!(status.subjects(), ["b".to_string()]);
}

#[test]
fn idle_spinner_cycles_with_no_subjects() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();

    // Act
    let frames: Vec<String> = (0..6).map(|i| status.tick(t0 + secs(0.05 * i as f64))).collect();

    // Assert
    assert_eq!(frames, ["/", "-", "\\", "|", "/", "-"]);
}

#[test]
fn idle_spinner_advances_while_subjects_are_shown() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.tick(t0);
    status.show_text("a", "alpha", 0.1, t0);

    // Act
    status.tick(t0);
    let after = status.tick(t0 + secs(0.2));

    // Assert: two ticks were spent on "a", so the spinner resumes at "\"
    assert_eq!(after, "\\");
}

#[test]
fn subjects_rotate_after_rotate_period() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("a", "alpha", 0.0, t0);
    status.show_text("b", "beta", 0.0, t0);

    // Act
    let seq = [
        status.tick(t0),
        status.tick(t0 + secs(0.5)),
        status.tick(t0 + secs(1.0)),
        status.tick(t0 + secs(2.0)),
    ];

    // Assert
    assert_eq!(seq, ["alpha", "alpha", "beta", "alpha"]);
}

#[test]
fn infinite_display_never_expires() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("gauge", "42%", 0.0, t0);

    // Act
    let text = status.tick(t0 + secs(86_400.0));

    // Assert
    assert_eq!(text, "42%");
    assert!(status.contains("gauge"));
}

#[test]
fn compute_once_when_update_is_zero() {
    // Arrange
    let t0 = Instant::now();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut status = StatusScheduler::default();
    status.show(
        "once",
        move || {
            counter.set(counter.get() + 1);
            Ok(format!("call {}", counter.get()))
        },
        0.0,
        0.0,
        t0,
    );

    // Act
    for i in 0..10 {
        status.tick(t0 + secs(0.05 * f64::from(i)));
    }

    // Assert
    assert_eq!(calls.get(), 1);
    assert_eq!(status.content("once"), Some("call 1"));
}

#[test]
fn refreshes_on_update_interval() {
    // Arrange
    let t0 = Instant::now();
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let mut status = StatusScheduler::default();
    status.show(
        "clock",
        move || {
            counter.set(counter.get() + 1);
            Ok(counter.get().to_string())
        },
        0.0,
        0.5,
        t0,
    );

    // Act
    let a = status.tick(t0);
    let b = status.tick(t0 + secs(0.25));
    let c = status.tick(t0 + secs(0.5));

    // Assert
    assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("1", "1", "2"));
}

#[test]
fn failing_producer_keeps_stale_content() {
    // Arrange
    let t0 = Instant::now();
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let mut status = StatusScheduler::default();
    status.show(
        "net",
        move || {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                Ok("wlan0:10.0.0.2".into())
            } else {
                Err("interface vanished".into())
            }
        },
        0.0,
        0.1,
        t0,
    );
    status.show_text("other", "fine", 0.0, t0);

    // Act
    status.tick(t0);
    status.tick(t0 + secs(0.2));

    // Assert
    assert_eq!(calls.get(), 2);
    assert_eq!(status.content("net"), Some("wlan0:10.0.0.2"));
    assert_eq!(status.content("other"), Some("fine"));
}

#[test]
fn failing_first_call_shows_placeholder() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show("broken", || Err("nope".into()), 0.0, 0.0, t0);

    // Act
    let text = status.tick(t0);

    // Assert
    assert_eq!(text, EMPTY_CONTENT);
}

#[test]
fn replacing_subject_keeps_rotation_slot() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("a", "alpha", 0.0, t0);
    status.show_text("b", "beta", 0.0, t0);

    // Act
    status.show_text("a", "ALPHA", 0.0, t0);
    let text = status.tick(t0);

    // Assert
    assert_eq!(status.subjects(), ["a".to_string(), "b".to_string()]);
    assert_eq!(text, "ALPHA");
}

#[test]
fn replacing_subject_resets_display_deadline() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("size", "640x360", 1.0, t0);

    // Act
    status.show_text("size", "720x405", 1.0, t0 + secs(0.9));
    let text = status.tick(t0 + secs(1.5));

    // Assert
    assert_eq!(text, "720x405");
}

#[test]
fn expiring_surfaced_subject_hands_over_to_follower() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("a", "alpha", 0.0, t0);
    status.show_text("b", "beta", 2.0, t0);
    status.show_text("c", "gamma", 0.0, t0);
    status.tick(t0);
    status.tick(t0 + secs(1.0));
    assert_eq!(status.current_subject(), Some("b"));

    // Act
    let text = status.tick(t0 + secs(2.0));

    // Assert
    assert_eq!(text, "gamma");
    assert_eq!(status.current_subject(), Some("c"));
}

#[test]
fn expiring_earlier_subject_keeps_cursor_on_same_subject() {
    // Arrange
    let t0 = Instant::now();
    let mut status = StatusScheduler::default();
    status.show_text("a", "alpha", 1.5, t0);
    status.show_text("b", "beta", 0.0, t0);
    status.tick(t0);
    status.tick(t0 + secs(1.0));
    assert_eq!(status.current_subject(), Some("b"));

    // Act
    let text = status.tick(t0 + secs(1.6));

    // Assert
    assert_eq!(text, "beta");
    assert_eq!(status.subjects(), ["b".to_string()]);
}

#[test]
fn deadline_after_non_positive_is_never() {
    let now = Instant::now();
    assert_eq!(Deadline::after(now, 0.0), Deadline::Never);
    assert_eq!(Deadline::after(now, -3.0), Deadline::Never);
    assert_eq!(Deadline::after(now, f64::NAN), Deadline::Never);
    assert!(!Deadline::Never.has_passed(now));
    assert!(Deadline::after(now, 1.0).has_passed(now + secs(1.0)));
}
