use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use teloxide::utils::command::BotCommands;

use crate::{config::AppConfig, filter::SpamFilter};

pub type BotResult<T> = Result<T, teloxide::RequestError>;

pub struct AppState {
    pub config: Arc<AppConfig>,
    pub filter: Arc<SpamFilter>,
    pub editing: EditingStates,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, filter: Arc<SpamFilter>) -> Self {
        Self {
            config,
            filter,
            editing: EditingStates::default(),
        }
    }
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "приветствие и краткая справка")]
    Start,
    #[command(description = "список команд")]
    Help,
    #[command(description = "статистика работы бота")]
    Status,
    #[command(description = "редактировать список запрещённых слов")]
    Editbanned,
}

/// What the bot expects next from a user who pressed one of the editing
/// buttons. The pending state is consumed by that user's next text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    WaitingForAdd,
    WaitingForRemove,
}

/// Per-user editing states; neutral is represented by absence.
#[derive(Default)]
pub struct EditingStates {
    inner: Mutex<HashMap<i64, EditState>>,
}

impl EditingStates {
    pub fn begin(&self, user_id: i64, state: EditState) {
        self.inner.lock().insert(user_id, state);
    }

    pub fn is_pending(&self, user_id: i64) -> bool {
        self.inner.lock().contains_key(&user_id)
    }

    /// Removes and returns the pending state, resetting the user to neutral.
    pub fn take(&self, user_id: i64) -> Option<EditState> {
        self.inner.lock().remove(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_state_is_consumed_once() {
        let states = EditingStates::default();
        states.begin(1, EditState::WaitingForAdd);
        assert!(states.is_pending(1));
        assert_eq!(states.take(1), Some(EditState::WaitingForAdd));
        assert!(!states.is_pending(1));
        assert_eq!(states.take(1), None);
    }

    #[test]
    fn later_choice_overrides_earlier_one() {
        let states = EditingStates::default();
        states.begin(2, EditState::WaitingForAdd);
        states.begin(2, EditState::WaitingForRemove);
        assert_eq!(states.take(2), Some(EditState::WaitingForRemove));
    }

    #[test]
    fn states_are_tracked_per_user() {
        let states = EditingStates::default();
        states.begin(3, EditState::WaitingForAdd);
        assert!(!states.is_pending(4));
        assert_eq!(states.take(4), None);
        assert_eq!(states.take(3), Some(EditState::WaitingForAdd));
    }
}
