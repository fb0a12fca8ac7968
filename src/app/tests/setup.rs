//! Setup screen tests.
//!
//! Tests for the task form including:
//! - Initial task and focus
//! - Field editing per kind (text, choice, file)
//! - Validation banners
//! - Task switching through the picker
//! - Starting a conversation and first-turn failures

use std::io::Write;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use super::helpers::*;
use crate::app::AppMode;
use crate::catalog::FieldValue;
use crate::core::{EventKind, Phase, Role};
use crate::tui::widgets::FileStatus;

// =============================================================================
// Initial State
// =============================================================================

#[test]
fn starts_on_first_task_with_first_field_focused() -> Result<()> {
    let h = Harness::new()?;
    assert_eq!(h.app.phase(), Phase::Setup);
    assert_eq!(h.app.mode(), AppMode::Main);
    assert_eq!(h.app.form.task().map(|t| t.key), Some("proofread"));
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("original_text"));
    Ok(())
}

// =============================================================================
// Field Editing
// =============================================================================

#[test]
fn typing_updates_the_form_value() -> Result<()> {
    let mut h = Harness::new()?;
    h.type_text("abc");
    assert_eq!(h.app.form.values().text("original_text"), "abc");

    h.app.handle_key(key(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(h.app.form.values().text("original_text"), "ab");
    Ok(())
}

#[test]
fn enter_in_multiline_field_inserts_newline() -> Result<()> {
    let mut h = Harness::new()?;
    h.type_text("a");
    h.app.handle_key(enter_key(KeyModifiers::NONE));
    h.type_text("b");
    assert_eq!(h.app.form.values().text("original_text"), "a\nb");
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("original_text"));
    Ok(())
}

#[test]
fn paste_normalizes_line_endings() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_paste("line1\r\nline2\rline3");
    assert_eq!(
        h.app.form.values().text("original_text"),
        "line1\nline2\nline3"
    );
    Ok(())
}

#[test]
fn tab_cycles_through_visible_fields() -> Result<()> {
    let mut h = Harness::new()?;
    let tab = key(KeyCode::Tab, KeyModifiers::NONE);

    h.app.handle_key(tab);
    assert_eq!(
        h.app.focused_field().map(|f| f.id),
        Some("recipient_type_select")
    );
    // The custom recipient field is hidden until "その他" is chosen
    h.app.handle_key(tab);
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("tone"));
    h.app.handle_key(tab);
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("original_text"));

    h.app.handle_key(key(KeyCode::BackTab, KeyModifiers::SHIFT));
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("tone"));
    Ok(())
}

#[test]
fn choice_keys_cycle_and_clear() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));

    h.app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
    assert_eq!(h.app.form.values().text("recipient_type_select"), "取引先");
    h.app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
    assert_eq!(h.app.form.values().text("recipient_type_select"), "顧客");
    h.app.handle_key(key(KeyCode::Left, KeyModifiers::NONE));
    h.app.handle_key(key(KeyCode::Left, KeyModifiers::NONE));
    assert_eq!(h.app.form.values().text("recipient_type_select"), "その他");

    h.app.handle_key(key(KeyCode::Backspace, KeyModifiers::NONE));
    assert!(!h.app.form.values().has_value("recipient_type_select"));
    Ok(())
}

#[test]
fn other_choice_reveals_custom_field() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
    h.app.handle_key(key(KeyCode::Left, KeyModifiers::NONE));
    assert_eq!(h.app.form.values().text("recipient_type_select"), "その他");

    let ids: Vec<_> = h.app.visible_fields().iter().map(|f| f.id).collect();
    assert!(ids.contains(&"recipient_type_custom"));

    h.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
    assert_eq!(
        h.app.focused_field().map(|f| f.id),
        Some("recipient_type_custom")
    );
    h.type_text("Partner");
    assert_eq!(h.app.form.values().text("recipient_type_custom"), "Partner");
    Ok(())
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn empty_submit_shows_banner_and_calls_nothing() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(ctrl_key('d'));

    assert_eq!(h.app.phase(), Phase::Setup);
    assert_eq!(
        h.app.form_ui.banner.as_deref(),
        Some("必須項目をすべて入力してください。")
    );
    assert_eq!(h.gateway.call_count(), 0);
    assert!(h.telemetry.events().is_empty());

    h.app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));
    assert!(h.app.form_ui.banner.is_none());
    Ok(())
}

#[test]
fn whitespace_only_text_is_missing() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_paste("   ");
    h.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
    h.app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
    h.app.handle_key(ctrl_key('d'));
    assert_eq!(h.app.phase(), Phase::Setup);
    assert!(h.app.form_ui.banner.is_some());
    Ok(())
}

// =============================================================================
// Task Picker
// =============================================================================

#[test]
fn picker_switches_task_and_clears_values() -> Result<()> {
    let mut h = Harness::new()?;
    h.type_text("draft");

    h.app.handle_key(ctrl_key('t'));
    assert_eq!(h.app.mode(), AppMode::TaskPicker);
    h.app.handle_paste("translate");
    assert_eq!(
        h.app.picker.selected_task().map(|t| t.key),
        Some("translate")
    );
    h.app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(h.app.mode(), AppMode::Main);
    assert_eq!(h.app.form.task().map(|t| t.key), Some("translate"));
    assert!(!h.app.form.values().has_value("original_text"));
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("source_lang"));
    Ok(())
}

#[test]
fn picker_escape_keeps_task() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(ctrl_key('t'));
    h.app.handle_key(key(KeyCode::Down, KeyModifiers::NONE));
    h.app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(h.app.mode(), AppMode::Main);
    assert_eq!(h.app.form.task().map(|t| t.key), Some("proofread"));
    Ok(())
}

// =============================================================================
// File Fields
// =============================================================================

fn select_log_analysis(h: &mut Harness) {
    h.app.select_task("log_analysis");
    assert_eq!(h.app.focused_field().map(|f| f.id), Some("file_upload"));
}

#[tokio::test]
async fn file_path_is_read_in_background() -> Result<()> {
    let mut h = Harness::new()?;
    let path = h.dir.path().join("server.log");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "ERROR boot failed")?;

    select_log_analysis(&mut h);
    h.app.handle_paste(&path.display().to_string());
    assert!(matches!(
        h.app.form_ui.file_status.get("file_upload"),
        Some(FileStatus::Loading(_))
    ));

    assert!(
        wait_until(&mut h.app, |app| app
            .form
            .values()
            .file_name("file_upload")
            .is_some())
        .await
    );
    assert_eq!(h.app.form.values().file_name("file_upload"), Some("server.log"));
    assert!(matches!(
        h.app.form.values().get("file_upload"),
        Some(FieldValue::File { content, .. }) if content.contains("boot failed")
    ));
    assert!(h.app.form_ui.file_status.is_empty());
    Ok(())
}

#[tokio::test]
async fn unsupported_extension_reports_error() -> Result<()> {
    let mut h = Harness::new()?;
    let path = h.dir.path().join("photo.png");
    std::fs::write(&path, [0_u8, 1, 2])?;

    select_log_analysis(&mut h);
    h.type_text(&path.display().to_string());
    h.app.handle_key(enter_key(KeyModifiers::NONE));

    assert!(
        wait_until(&mut h.app, |app| matches!(
            app.form_ui.file_status.get("file_upload"),
            Some(FileStatus::Error(_))
        ))
        .await
    );
    assert!(h.app.form.values().file_name("file_upload").is_none());
    Ok(())
}

#[tokio::test]
async fn file_read_finishing_after_task_switch_is_dropped() -> Result<()> {
    let mut h = Harness::new()?;
    let path = h.dir.path().join("late.log");
    std::fs::write(&path, "late")?;

    select_log_analysis(&mut h);
    h.app.handle_paste(&path.display().to_string());
    h.app.select_task("proofread");
    h.app.select_task("log_analysis");

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    h.app.process_events();
    assert!(h.app.form.values().file_name("file_upload").is_none());
    Ok(())
}

#[test]
fn backspace_clears_loaded_file() -> Result<()> {
    let mut h = Harness::new()?;
    select_log_analysis(&mut h);
    let ticket = h.app.form.begin_file_read("file_upload").unwrap();
    assert!(h.app.form.complete_file_read(ticket, "a.log", "x"));
    h.app.focus_field(h.app.focused_field().unwrap());

    h.app.handle_key(key(KeyCode::Backspace, KeyModifiers::NONE));
    assert!(h.app.form.values().file_name("file_upload").is_none());
    Ok(())
}

// =============================================================================
// Starting
// =============================================================================

#[tokio::test]
async fn submit_starts_conversation() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("修正後の文章です。").await;

    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert!(messages[0].text.contains("お世話になっております。"));
    assert!(messages[0].text.contains("取引先"));
    assert_eq!(messages[1].text, "修正後の文章です。");

    assert_eq!(h.gateway.call_count(), 1);
    assert_eq!(h.gateway.histories()[0].len(), 1);

    let events = h.telemetry.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::TaskStarted);
    assert_eq!(events[0].task_name, "文章の校正");
    assert_eq!(events[0].model, h.app.model());
    Ok(())
}

#[tokio::test]
async fn first_turn_failure_returns_to_setup_with_banner() -> Result<()> {
    let mut h = Harness::new()?;
    h.fill_proofread();
    // No reply queued: the scripted gateway answers with an empty response
    h.app.handle_key(ctrl_key('d'));
    assert_eq!(h.app.phase(), Phase::Starting);

    assert!(wait_until(&mut h.app, |app| app.phase() == Phase::Setup).await);
    let banner = h.app.conversation.error_banner().unwrap_or_default();
    assert!(banner.starts_with("エラーが発生しました: "));
    assert!(h.app.conversation.messages().is_empty());
    // Entered values survive for a retry
    assert_eq!(
        h.app.form.values().text("original_text"),
        "お世話になっております。"
    );
    Ok(())
}

#[tokio::test]
async fn escape_while_starting_cancels_and_ignores_late_reply() -> Result<()> {
    let mut h = Harness::new()?;
    h.gateway.push_reply("late");
    h.fill_proofread();
    h.app.handle_key(ctrl_key('d'));
    h.app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(h.app.phase(), Phase::Setup);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    h.app.process_events();
    assert_eq!(h.app.phase(), Phase::Setup);
    assert!(h.app.conversation.messages().is_empty());
    Ok(())
}

#[test]
fn ctrl_c_quits() -> Result<()> {
    let mut h = Harness::new()?;
    assert!(!h.app.should_quit());
    h.app.handle_key(ctrl_key('c'));
    assert!(h.app.should_quit());
    Ok(())
}
