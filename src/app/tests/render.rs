//! Rendering tests using `TestBackend`.

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use super::helpers::*;

#[test]
fn setup_screen_shows_task_and_fields() -> Result<()> {
    let mut h = Harness::new()?;
    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;

    assert!(rows[0].contains("TaskPilot"));
    assert!(rows[0].contains(h.app.model()));
    assert!(screen_contains(&rows, "文章の校正"));
    assert!(screen_contains(&rows, "校正したい文章"));
    assert!(screen_contains(&rows, "ここに文章を入力してください。"));
    assert!(screen_contains(&rows, "‹ 選択してください ›"));
    assert!(rows[usize::from(HEIGHT) - 1].contains("[Ctrl+D]"));
    Ok(())
}

#[test]
fn validation_banner_is_rendered() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(ctrl_key('d'));
    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "必須項目をすべて入力してください。"));
    Ok(())
}

#[test]
fn entered_text_is_drawn_in_editor() -> Result<()> {
    let mut h = Harness::new()?;
    h.type_text("hello");
    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "hello"));
    assert!(!screen_contains(&rows, "ここに文章を入力してください。"));
    Ok(())
}

#[test]
fn small_terminal_keeps_focused_field_visible() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(key(KeyCode::BackTab, KeyModifiers::SHIFT));
    let rows = render_rows(&mut h.app, 60, 14)?;
    assert!(screen_contains(&rows, "トーン"));
    Ok(())
}

#[test]
fn task_picker_overlay_lists_tasks() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(ctrl_key('t'));
    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "タスクを選択"));
    assert!(screen_contains(&rows, "検索:"));
    Ok(())
}

#[test]
fn settings_overlay_lists_models() -> Result<()> {
    let mut h = Harness::new()?;
    h.app.handle_key(ctrl_key('s'));
    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "設定"));
    for model in crate::core::Model::all() {
        assert!(screen_contains(&rows, model.name()));
    }
    assert!(screen_contains(&rows, "未設定"));
    Ok(())
}

#[tokio::test]
async fn chat_screen_shows_prompt_and_reply() -> Result<()> {
    let mut h = Harness::new()?;
    h.gateway.push_suggestions(["短くして"]);
    h.start_chat("修正済みの文章").await;

    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "あなたはプロの編集者です"));
    assert!(screen_contains(&rows, "# 元の文章"));
    assert!(screen_contains(&rows, "お世話になっております。"));
    assert!(screen_contains(&rows, "修正済みの文章"));
    assert!(screen_contains(&rows, "[1] 短くして"));
    assert!(screen_contains(&rows, "メッセージ"));
    Ok(())
}

#[tokio::test]
async fn selected_message_shows_action_hints() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));

    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "▌ AI"));
    assert!(screen_contains(&rows, "[+]役に立った"));
    Ok(())
}

#[tokio::test]
async fn comment_box_is_rendered() -> Result<()> {
    let mut h = Harness::new()?;
    h.start_chat("ok").await;
    h.app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
    h.app.handle_key(char_key('-'));

    let rows = render_rows(&mut h.app, WIDTH, HEIGHT)?;
    assert!(screen_contains(&rows, "改善が必要な点"));
    Ok(())
}
