use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model, Tab};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Paste(text) if model.tab == Tab::Edit && !model.help_visible => {
                // terminals send CR line endings in bracketed paste
                Some(Message::InsertStr(text.replace("\r\n", "\n").replace('\r', "\n")))
            }
            Event::Resize(w, h) => {
                resize_debouncer.queue(w, h, Instant::now());
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Commands available on both tabs
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('r') if ctrl => return Some(Message::RequestRewrite),
            KeyCode::Char('y') if ctrl => return Some(Message::CopyDiff),
            KeyCode::Char('p') if ctrl => return Some(Message::ExportHtml),
            KeyCode::Char('s') if ctrl => return Some(Message::Save),
            KeyCode::Char('o') if ctrl => return Some(Message::CopyOriginalToModified),
            KeyCode::Char('g') if ctrl => return Some(Message::CycleGranularity),
            KeyCode::Char('w') if ctrl => return Some(Message::ToggleWatch),
            KeyCode::Char('t') if ctrl => return Some(Message::ToggleTab),
            KeyCode::F(2) => return Some(Message::ToggleTab),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Esc if model.last_error.is_some() => return Some(Message::DismissError),
            _ => {}
        }

        match model.tab {
            Tab::Edit => Self::handle_edit_key(key),
            Tab::Diff => Self::handle_diff_key(key),
        }
    }

    fn handle_edit_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => Some(Message::SwitchFocus),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            _ => None,
        }
    }

    fn handle_diff_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('c') => Some(Message::CopyDiff),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Esc | KeyCode::Tab => Some(Message::ShowTab(Tab::Edit)),
            _ => None,
        }
    }
}
