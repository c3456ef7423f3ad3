use raylib::prelude::KeyboardKey;
use tracing::debug;

use crate::document::ElementRole;
use crate::input::{dispatch, NavAction};
use crate::navigator::NavigatorHandle;
use crate::state::SlideChange;

const JUMP_FIELD_MAX_DIGITS: usize = 4;

pub struct KeyboardAdapter {
    nav: NavigatorHandle,
}

fn digit_of(key: KeyboardKey) -> Option<char> {
    use KeyboardKey::*;
    let digit = match key {
        KEY_ONE | KEY_KP_1 => '1',
        KEY_TWO | KEY_KP_2 => '2',
        KEY_THREE | KEY_KP_3 => '3',
        KEY_FOUR | KEY_KP_4 => '4',
        KEY_FIVE | KEY_KP_5 => '5',
        KEY_SIX | KEY_KP_6 => '6',
        KEY_SEVEN | KEY_KP_7 => '7',
        KEY_EIGHT | KEY_KP_8 => '8',
        KEY_NINE | KEY_KP_9 => '9',
        _ => return None,
    };
    Some(digit)
}

impl KeyboardAdapter {
    pub fn new(nav: NavigatorHandle) -> Self {
        Self { nav }
    }

    /// Navigation bound to `key`, or `None` when the key is unbound or focus
    /// sits in an editable field.
    pub fn translate(&self, key: KeyboardKey) -> Option<NavAction> {
        let nav = self.nav.borrow();
        if nav.document().focus_is_editable() {
            return None;
        }

        match key {
            KeyboardKey::KEY_LEFT | KeyboardKey::KEY_UP => Some(NavAction::Previous),
            KeyboardKey::KEY_RIGHT | KeyboardKey::KEY_DOWN | KeyboardKey::KEY_SPACE => Some(NavAction::Next),
            KeyboardKey::KEY_HOME => Some(NavAction::First),
            KeyboardKey::KEY_END => Some(NavAction::Last),
            key => digit_of(key)
                .and_then(|digit| nav.deck().sections().shortcut(digit))
                .map(|section| NavAction::Section(section.to_string())),
        }
    }

    pub fn handle_key(&mut self, key: KeyboardKey) -> Option<SlideChange> {
        let focus_is_editable = self.nav.borrow().document().focus_is_editable();
        let action = if focus_is_editable {
            self.edit_field(key)
        } else {
            self.translate(key)
        };
        action.and_then(|action| dispatch(&self.nav, action, "keyboard"))
    }

    /// Text typed while the jump field has focus. Only digits are accepted.
    pub fn handle_char(&mut self, c: char) {
        let mut nav = self.nav.borrow_mut();
        if !nav.document().focus_is_editable() || !c.is_ascii_digit() {
            return;
        }
        if let Ok(field) = nav.document_mut().by_role_mut(ElementRole::JumpField) {
            if field.text.len() < JUMP_FIELD_MAX_DIGITS {
                field.text.push(c);
            }
        }
    }

    // Editing keys for the focused field. Enter submits it as a jump.
    fn edit_field(&mut self, key: KeyboardKey) -> Option<NavAction> {
        let mut nav = self.nav.borrow_mut();
        let document = nav.document_mut();
        let field = document.by_role_mut(ElementRole::JumpField).ok()?;

        match key {
            KeyboardKey::KEY_BACKSPACE => {
                field.text.pop();
                None
            }
            KeyboardKey::KEY_ESCAPE => {
                field.text.clear();
                document.blur();
                None
            }
            KeyboardKey::KEY_ENTER | KeyboardKey::KEY_KP_ENTER => {
                let text = std::mem::take(&mut field.text);
                document.blur();
                match text.parse::<usize>() {
                    Ok(target) => Some(NavAction::Jump(target)),
                    Err(e) => {
                        debug!(input = %text, "jump field ignored: {}", e);
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::document::Document;
    use crate::navigator::{test_deck, test_navigator, SlideNavigator};
    use crate::sections::SectionTable;
    use std::collections::BTreeMap;

    fn adapter(total: usize) -> KeyboardAdapter {
        KeyboardAdapter::new(test_navigator(total).into_handle())
    }

    fn current(adapter: &KeyboardAdapter) -> usize {
        adapter.nav.borrow().current_slide()
    }

    fn focus_jump_field(adapter: &KeyboardAdapter) {
        let mut nav = adapter.nav.borrow_mut();
        let field = nav.document().find(ElementRole::JumpField).unwrap();
        nav.document_mut().focus(field);
    }

    #[test]
    fn test_key_bindings() {
        let adapter = adapter(10);
        use KeyboardKey::*;
        assert_eq!(adapter.translate(KEY_LEFT), Some(NavAction::Previous));
        assert_eq!(adapter.translate(KEY_UP), Some(NavAction::Previous));
        assert_eq!(adapter.translate(KEY_RIGHT), Some(NavAction::Next));
        assert_eq!(adapter.translate(KEY_DOWN), Some(NavAction::Next));
        assert_eq!(adapter.translate(KEY_SPACE), Some(NavAction::Next));
        assert_eq!(adapter.translate(KEY_HOME), Some(NavAction::First));
        assert_eq!(adapter.translate(KEY_END), Some(NavAction::Last));
        assert_eq!(adapter.translate(KEY_A), None);
        assert_eq!(adapter.translate(KEY_ONE), None); // no shortcuts configured
    }

    #[test]
    fn test_keys_navigate() {
        let mut adapter = adapter(10);
        adapter.handle_key(KeyboardKey::KEY_RIGHT).unwrap();
        adapter.handle_key(KeyboardKey::KEY_SPACE).unwrap();
        assert_eq!(current(&adapter), 3);

        adapter.handle_key(KeyboardKey::KEY_END).unwrap();
        assert_eq!(current(&adapter), 10);
        assert!(adapter.handle_key(KeyboardKey::KEY_DOWN).is_none());

        adapter.handle_key(KeyboardKey::KEY_HOME).unwrap();
        assert!(adapter.handle_key(KeyboardKey::KEY_LEFT).is_none());
        assert_eq!(current(&adapter), 1);
    }

    #[test]
    fn test_arrow_ignored_while_text_field_focused() {
        let mut adapter = adapter(10);
        focus_jump_field(&adapter);

        assert_eq!(adapter.translate(KeyboardKey::KEY_RIGHT), None);
        assert!(adapter.handle_key(KeyboardKey::KEY_RIGHT).is_none());
        assert!(adapter.handle_key(KeyboardKey::KEY_END).is_none());
        assert_eq!(current(&adapter), 1);
    }

    #[test]
    fn test_jump_field_submits_on_enter() {
        let mut adapter = adapter(50);
        focus_jump_field(&adapter);

        for c in ['4', 'x', '2'] {
            adapter.handle_char(c);
        }
        adapter.handle_char('7');
        adapter.handle_key(KeyboardKey::KEY_BACKSPACE);

        let change = adapter.handle_key(KeyboardKey::KEY_ENTER).unwrap();
        assert_eq!(change.to, 42);
        let nav = adapter.nav.borrow();
        assert!(!nav.document().focus_is_editable());
        assert_eq!(nav.document().by_role(ElementRole::JumpField).unwrap().text, "");
    }

    #[test]
    fn test_jump_field_out_of_range_and_escape() {
        let mut adapter = adapter(50);
        focus_jump_field(&adapter);
        for c in "99".chars() {
            adapter.handle_char(c);
        }
        assert!(adapter.handle_key(KeyboardKey::KEY_ENTER).is_none());
        assert_eq!(current(&adapter), 1);

        focus_jump_field(&adapter);
        adapter.handle_char('5');
        adapter.handle_key(KeyboardKey::KEY_ESCAPE);
        assert!(!adapter.nav.borrow().document().focus_is_editable());

        // Typing without focus does nothing
        adapter.handle_char('7');
        assert_eq!(adapter.nav.borrow().document().by_role(ElementRole::JumpField).unwrap().text, "");
    }

    #[test]
    fn test_digit_shortcuts() {
        let sections = BTreeMap::from([("WOMENS_SAFETY".to_string(), 48), ("THANK_YOU".to_string(), 50)]);
        let shortcuts = BTreeMap::from([("4".to_string(), "WOMENS_SAFETY".to_string())]);
        let table = SectionTable::from_manifest(&sections, &shortcuts, 50).unwrap();
        let deck = Deck::new("shortcuts", test_deck(50).slides().to_vec(), table).unwrap();
        let document = Document::for_deck(&deck, 1000.0, 800.0);
        let mut adapter = KeyboardAdapter::new(SlideNavigator::new(deck, document).into_handle());

        assert_eq!(
            adapter.translate(KeyboardKey::KEY_FOUR),
            Some(NavAction::Section("WOMENS_SAFETY".to_string()))
        );
        adapter.handle_key(KeyboardKey::KEY_KP_4).unwrap();
        assert_eq!(current(&adapter), 48);
        assert!(adapter.handle_key(KeyboardKey::KEY_FIVE).is_none());
    }
}
