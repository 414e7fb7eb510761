// Modal overlays
//
// Each modal maps keys to a ModalAction. App holds Option<Modal> and input
// routing acts on the returned action; the modal itself owns no page data.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal (cancels a running countdown)
    Close,
    /// Add-form editing
    Edit(FormEdit),
    /// Send the add form
    Submit,
    /// End the session now
    Logout,
}

/// Keystrokes that edit the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEdit {
    Char(char),
    Backspace,
    NextField,
    PrevField,
    ToggleRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// "Add" form of the current list page
    AddRecord,
    /// Session-expiry countdown
    Logout { remaining: u32 },
    /// Topbar dropdown with the profile name and a logout item
    ProfileMenu,
}

impl Modal {
    pub fn logout(secs: u32) -> Self {
        Modal::Logout { remaining: secs }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::AddRecord => match key {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => ModalAction::Submit,
                KeyCode::Tab | KeyCode::Down => ModalAction::Edit(FormEdit::NextField),
                KeyCode::BackTab | KeyCode::Up => ModalAction::Edit(FormEdit::PrevField),
                KeyCode::Left | KeyCode::Right => ModalAction::Edit(FormEdit::ToggleRole),
                KeyCode::Backspace => ModalAction::Edit(FormEdit::Backspace),
                KeyCode::Char(c) => ModalAction::Edit(FormEdit::Char(c)),
                _ => ModalAction::None,
            },
            Modal::Logout { .. } => match key {
                KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('n') => ModalAction::Close,
                KeyCode::Enter | KeyCode::Char('y') => ModalAction::Logout,
                _ => ModalAction::None,
            },
            Modal::ProfileMenu => match key {
                KeyCode::Esc | KeyCode::Char('p') => ModalAction::Close,
                KeyCode::Enter | KeyCode::Char('o') => ModalAction::Logout,
                _ => ModalAction::None,
            },
        }
    }

    /// Seconds left, if this is the countdown popup
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Modal::Logout { remaining } => Some(*remaining),
            _ => None,
        }
    }
}
