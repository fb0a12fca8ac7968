//! Chat screen tests.
//!
//! Tests for the live conversation including:
//! - Sending follow-up messages with full history
//! - Busy handling and inline errors
//! - Message selection, copying and suggestions
//! - Feedback and its telemetry
//! - Resetting back to setup

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use super::helpers::*;
use crate::app::{AppMode, ChatFocus, StatusKind};
use crate::core::{EventKind, FeedbackState, FeedbackVerdict, GatewayError, Phase, Role};

fn tab() -> ratatui::crossterm::event::KeyEvent {
    key(KeyCode::Tab, KeyModifiers::NONE)
}

// =============================================================================
// Sending
// =============================================================================

#[tokio::test]
async fn follow_up_resends_full_history() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("一回目").await;
    assert_eq!(h.app.chat_ui.focus, ChatFocus::Composer);

    h.gateway.push_reply("二回目");
    h.type_text("more polite");
    h.app.handle_key(enter_key(KeyModifiers::NONE));
    assert!(h.app.conversation.is_busy());
    assert!(h.app.chat_ui.composer.lines().concat().is_empty());

    assert!(wait_until(&mut h.app, |app| !app.conversation.is_busy()).await);
    let messages = h.app.conversation.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2].text, "more polite");
    assert_eq!(messages[3].text, "二回目");

    let histories = h.gateway.histories();
    assert_eq!(histories.len(), 2);
    assert_eq!(histories[1].len(), 3);
    assert_eq!(histories[1][1].role, Role::Model);
    Ok(())
}

#[tokio::test]
async fn shift_enter_inserts_newline_in_composer() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.type_text("a");
    h.app.handle_key(enter_key(KeyModifiers::SHIFT));
    h.type_text("b");
    assert_eq!(h.app.chat_ui.composer.lines(), ["a", "b"]);
    assert_eq!(h.app.conversation.messages().len(), 2);
    Ok(())
}

#[tokio::test]
async fn blank_message_is_rejected() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.type_text("   ");
    h.app.handle_key(enter_key(KeyModifiers::NONE));
    assert_eq!(h.app.conversation.messages().len(), 2);
    assert_eq!(h.gateway.call_count(), 1);
    assert_eq!(
        h.app.status.as_ref().map(|s| s.kind),
        Some(StatusKind::Error)
    );
    Ok(())
}

#[tokio::test]
async fn composer_is_locked_while_busy() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.gateway.push_reply("slow");
    h.type_text("first");
    h.app.handle_key(enter_key(KeyModifiers::NONE));
    h.type_text("second");
    h.app.handle_key(enter_key(KeyModifiers::NONE));

    // Only the first message went out; the second stays in the composer
    assert_eq!(h.app.conversation.messages().len(), 3);
    assert_eq!(h.app.chat_ui.composer.lines().concat(), "second");
    assert!(wait_until(&mut h.app, |app| !app.conversation.is_busy()).await);
    assert_eq!(h.gateway.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn later_failure_becomes_inline_message() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.gateway.push_error(GatewayError::Api {
        status: 500,
        message: "internal".to_string(),
    });
    h.type_text("again");
    h.app.handle_key(enter_key(KeyModifiers::NONE));
    assert!(wait_until(&mut h.app, |app| app.conversation.messages().len() == 4).await);

    assert_eq!(h.app.phase(), Phase::Chatting);
    let last = &h.app.conversation.messages()[3];
    assert_eq!(last.role, Role::Model);
    assert!(last.text.starts_with("エラー: "));
    assert!(last.suggestions.is_empty());
    Ok(())
}

// =============================================================================
// Message Actions
// =============================================================================

#[tokio::test]
async fn tab_selects_last_message_and_arrows_move() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.app.handle_key(tab());
    assert_eq!(h.app.chat_ui.focus, ChatFocus::Messages);
    assert_eq!(h.app.chat_ui.selected, Some(1));

    h.app.handle_key(key(KeyCode::Up, KeyModifiers::NONE));
    assert_eq!(h.app.chat_ui.selected, Some(0));
    h.app.handle_key(key(KeyCode::Up, KeyModifiers::NONE));
    assert_eq!(h.app.chat_ui.selected, Some(0));
    h.app.handle_key(char_key('j'));
    assert_eq!(h.app.chat_ui.selected, Some(1));

    h.app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(h.app.chat_ui.focus, ChatFocus::Composer);
    assert_eq!(h.app.chat_ui.selected, None);
    Ok(())
}

#[tokio::test]
async fn copy_full_text_and_code_blocks() -> Result<()> {
    let mut h = Harness::new()?;
    let reply = "説明\n```rust\nfn a() {}\n```\n間\n```sql\nSELECT 1;\n```";
    h.start_chat(reply).await;
    h.app.handle_key(tab());

    h.app.handle_key(char_key('c'));
    h.app.handle_key(char_key('y'));
    assert_eq!(
        h.clipboard.copies(),
        vec![reply.to_string(), "fn a() {}\n\nSELECT 1;".to_string()]
    );
    assert_eq!(
        h.app.status.as_ref().map(|s| s.kind),
        Some(StatusKind::Success)
    );
    Ok(())
}

#[tokio::test]
async fn copy_code_without_blocks_copies_text() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("コードなし").await;
    h.app.handle_key(tab());
    h.app.handle_key(char_key('y'));
    assert_eq!(h.clipboard.copies(), vec!["コードなし".to_string()]);
    Ok(())
}

#[tokio::test]
async fn suggestion_key_sends_suggestion() -> Result<()> {
    let mut h = Harness::new()?;
    h.gateway.push_suggestions(["もっと短く", "敬語を強く"]);
    h.start_chat("ok").await;
    assert_eq!(h.app.conversation.messages()[1].suggestions.len(), 2);

    h.gateway.push_reply("短くしました");
    h.app.handle_key(tab());
    h.app.handle_key(char_key('2'));
    assert_eq!(h.app.chat_ui.focus, ChatFocus::Composer);

    assert!(wait_until(&mut h.app, |app| app.conversation.messages().len() == 4).await);
    assert_eq!(h.app.conversation.messages()[2].text, "敬語を強く");
    Ok(())
}

#[tokio::test]
async fn missing_suggestion_reports_error() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(tab());
    h.app.handle_key(char_key('3'));
    assert_eq!(h.app.conversation.messages().len(), 2);
    assert_eq!(
        h.app.status.as_ref().map(|s| s.kind),
        Some(StatusKind::Error)
    );
    Ok(())
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn positive_feedback_is_logged_once() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(tab());

    h.app.handle_key(char_key('+'));
    h.app.handle_key(char_key('+'));
    let events = h.telemetry.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].kind, EventKind::PositiveFeedback);
    assert_eq!(events[1].feedback, None);
    assert_eq!(
        h.app.conversation.messages()[1].feedback,
        FeedbackState::Sent(FeedbackVerdict::Helpful)
    );
    Ok(())
}

#[tokio::test]
async fn negative_feedback_collects_comment() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(tab());

    h.app.handle_key(char_key('-'));
    assert_eq!(h.app.mode(), AppMode::Comment);
    h.type_text("too long");
    assert_eq!(
        h.app.conversation.messages()[1].feedback,
        FeedbackState::Commenting("too long".to_string())
    );
    h.app.handle_key(enter_key(KeyModifiers::NONE));

    assert_eq!(h.app.mode(), AppMode::Main);
    let events = h.telemetry.events();
    let last = events.last().unwrap();
    assert_eq!(last.kind, EventKind::NegativeFeedback);
    assert_eq!(last.feedback.as_deref(), Some("too long"));
    assert_eq!(
        h.app.conversation.messages()[1].feedback,
        FeedbackState::Sent(FeedbackVerdict::Unhelpful)
    );
    Ok(())
}

#[tokio::test]
async fn cancelled_comment_reopens_feedback() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(tab());

    h.app.handle_key(char_key('-'));
    h.type_text("x");
    h.app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));

    assert_eq!(h.app.mode(), AppMode::Main);
    assert!(h.app.conversation.messages()[1].feedback.is_open());
    assert_eq!(h.telemetry.events().len(), 1);
    Ok(())
}

#[tokio::test]
async fn feedback_on_user_message_is_rejected() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(tab());
    h.app.handle_key(key(KeyCode::Up, KeyModifiers::NONE));

    h.app.handle_key(char_key('-'));
    assert_eq!(h.app.mode(), AppMode::Main);
    assert_eq!(
        h.app.status.as_ref().map(|s| s.kind),
        Some(StatusKind::Error)
    );
    Ok(())
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn ctrl_r_returns_to_setup_keeping_values() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.app.handle_key(ctrl_key('r'));
    assert_eq!(h.app.phase(), Phase::Setup);
    assert!(h.app.conversation.messages().is_empty());
    assert_eq!(
        h.app.form.values().text("original_text"),
        "お世話になっております。"
    );
    assert_eq!(h.app.form.values().text("recipient_type_select"), "取引先");
    Ok(())
}

#[tokio::test]
async fn reply_after_reset_is_ignored() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;

    h.gateway.push_reply("late");
    h.type_text("next");
    h.app.handle_key(enter_key(KeyModifiers::NONE));
    h.app.handle_key(ctrl_key('r'));

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    h.app.process_events();
    assert_eq!(h.app.phase(), Phase::Setup);
    assert!(h.app.conversation.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn page_keys_scroll_transcript() -> Result<()> {
    let mut h = Harness::new()?;
    let long: String = (0..60).map(|i| format!("行{i}\n")).collect();
    h.start_chat(&long).await;
    h.app.update_layout(ratatui::layout::Rect::new(0, 0, WIDTH, HEIGHT));
    let bottom = h.app.chat_ui.scroll.offset;
    assert!(bottom > 0);

    h.app.handle_key(key(KeyCode::PageUp, KeyModifiers::NONE));
    assert_eq!(h.app.chat_ui.scroll.offset, bottom.saturating_sub(10));
    assert!(!h.app.chat_ui.scroll.auto_scroll);

    h.app.handle_key(key(KeyCode::End, KeyModifiers::CONTROL));
    assert_eq!(h.app.chat_ui.scroll.offset, bottom);
    Ok(())
}
