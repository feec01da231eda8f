#![allow(clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_decimal_macros::dec;

use super::dialog::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(dialog: &mut Dialog, s: &str) {
    for c in s.chars() {
        assert_eq!(dialog.handle_key(key(KeyCode::Char(c))), None);
    }
}

// ── Text ──────────────────────────────────────────────────────

#[test]
fn test_text_dialog_returns_input() {
    let mut d = Dialog::text("Category", "Enter category:");
    type_str(&mut d, "Foodd");
    d.handle_key(key(KeyCode::Backspace));
    assert_eq!(
        d.handle_key(key(KeyCode::Enter)),
        Some(Reply::Text(Some("Food".into())))
    );
}

#[test]
fn test_text_dialog_empty_submit_is_empty_string() {
    let mut d = Dialog::text("Category", "Enter category:");
    assert_eq!(
        d.handle_key(key(KeyCode::Enter)),
        Some(Reply::Text(Some(String::new())))
    );
}

#[test]
fn test_text_dialog_escape_cancels() {
    let mut d = Dialog::text("Category", "Enter category:");
    type_str(&mut d, "Rent");
    assert_eq!(d.handle_key(key(KeyCode::Esc)), Some(Reply::Text(None)));
}

#[test]
fn test_text_dialog_ignores_control_chords() {
    let mut d = Dialog::text("Category", "Enter category:");
    let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
    assert_eq!(d.handle_key(ctrl_a), None);
    assert!(d.input.is_empty());
}

// ── Amount ────────────────────────────────────────────────────

#[test]
fn test_amount_dialog_parses_decimal() {
    let mut d = Dialog::amount("Amount", "Enter amount:");
    type_str(&mut d, "1,250.75");
    assert_eq!(
        d.handle_key(key(KeyCode::Enter)),
        Some(Reply::Amount(Some(dec!(1250.75))))
    );
}

#[test]
fn test_amount_dialog_keeps_open_on_garbage() {
    let mut d = Dialog::amount("Amount", "Enter amount:");
    type_str(&mut d, "abc");
    assert_eq!(d.handle_key(key(KeyCode::Enter)), None);
    assert!(d.error.as_deref().unwrap().contains("not a number"));

    // Editing clears the error, then a valid number goes through
    for _ in 0..3 {
        d.handle_key(key(KeyCode::Backspace));
    }
    assert!(d.error.is_none());
    type_str(&mut d, "-5");
    assert_eq!(
        d.handle_key(key(KeyCode::Enter)),
        Some(Reply::Amount(Some(dec!(-5))))
    );
}

#[test]
fn test_amount_dialog_empty_submit_stays_open() {
    let mut d = Dialog::amount("Amount", "Enter amount:");
    assert_eq!(d.handle_key(key(KeyCode::Enter)), None);
    assert_eq!(d.error.as_deref(), Some("Please enter a number"));
}

#[test]
fn test_amount_dialog_refuses_amounts_too_big_to_store() {
    let mut d = Dialog::amount("Amount", "Enter amount:");
    type_str(&mut d, "79228162514264337593543950335");
    assert_eq!(d.handle_key(key(KeyCode::Enter)), None);
    assert!(d.error.as_deref().unwrap().contains("must be below"));

    let mut d = Dialog::amount("Amount", "Enter amount:");
    type_str(&mut d, "0.1234567890123456789");
    assert_eq!(d.handle_key(key(KeyCode::Enter)), None);
    assert!(d.error.as_deref().unwrap().contains("too many digits"));
}

#[test]
fn test_amount_dialog_escape_cancels() {
    let mut d = Dialog::amount("Amount", "Enter amount:");
    assert_eq!(d.handle_key(key(KeyCode::Esc)), Some(Reply::Amount(None)));
}

// ── Yes/No ────────────────────────────────────────────────────

#[test]
fn test_yes_no_shortcuts() {
    let mut d = Dialog::yes_no("Expenses", "Add more?");
    assert_eq!(d.handle_key(key(KeyCode::Char('y'))), Some(Reply::YesNo(true)));
    let mut d = Dialog::yes_no("Expenses", "Add more?");
    assert_eq!(d.handle_key(key(KeyCode::Char('N'))), Some(Reply::YesNo(false)));
    let mut d = Dialog::yes_no("Expenses", "Add more?");
    assert_eq!(d.handle_key(key(KeyCode::Esc)), Some(Reply::YesNo(false)));
}

#[test]
fn test_yes_no_defaults_to_yes_and_toggles() {
    let mut d = Dialog::yes_no("Expenses", "Add more?");
    assert_eq!(d.handle_key(key(KeyCode::Right)), None);
    assert_eq!(d.handle_key(key(KeyCode::Enter)), Some(Reply::YesNo(false)));

    let mut d = Dialog::yes_no("Expenses", "Add more?");
    assert_eq!(d.handle_key(key(KeyCode::Enter)), Some(Reply::YesNo(true)));
}

// ── Info ──────────────────────────────────────────────────────

#[test]
fn test_info_closes_on_enter_only_keys() {
    let mut d = Dialog::info("Saved", "Added");
    assert_eq!(d.handle_key(key(KeyCode::Char('x'))), None);
    assert_eq!(d.handle_key(key(KeyCode::Enter)), Some(Reply::Closed));
}

// ── Rendering ─────────────────────────────────────────────────

#[test]
fn test_render_survives_huge_messages() {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let wide = Dialog::info(&"T".repeat(70_000), &"x".repeat(70_000));
    let tall = Dialog::info("Entries", &"line\n".repeat(70_000));
    for dialog in [wide, tall] {
        terminal
            .draw(|f| render(f, f.area(), &dialog))
            .unwrap();
    }
}
