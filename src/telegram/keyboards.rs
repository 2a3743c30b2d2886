use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const CALLBACK_SHOW_COMMANDS: &str = "show_commands";
pub const CALLBACK_SHOW_SETTINGS: &str = "show_settings";
pub const CALLBACK_EDIT_ADD: &str = "edit_add";
pub const CALLBACK_EDIT_REMOVE: &str = "edit_remove";

/// Keyboard attached to the /help message.
pub fn help_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Команды", CALLBACK_SHOW_COMMANDS),
        InlineKeyboardButton::callback("Настройки", CALLBACK_SHOW_SETTINGS),
    ]])
}

/// Keyboard attached to the /editbanned menu.
pub fn edit_banned_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Добавить слово", CALLBACK_EDIT_ADD),
        InlineKeyboardButton::callback("Удалить слово", CALLBACK_EDIT_REMOVE),
    ]])
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<&str> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn help_keyboard_routes_to_known_callbacks() {
        assert_eq!(
            callback_data(&help_keyboard()),
            vec![CALLBACK_SHOW_COMMANDS, CALLBACK_SHOW_SETTINGS]
        );
    }

    #[test]
    fn edit_keyboard_routes_to_known_callbacks() {
        assert_eq!(
            callback_data(&edit_banned_keyboard()),
            vec![CALLBACK_EDIT_ADD, CALLBACK_EDIT_REMOVE]
        );
    }
}
