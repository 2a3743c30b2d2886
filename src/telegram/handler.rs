use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use teloxide::{
    dispatching::Dispatcher,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{CallbackQuery, Message},
    update_listeners,
    utils::command::BotCommands,
};

use crate::{
    config::AppConfig,
    filter::SpamFilter,
    infrastructure::shutdown::ShutdownListener,
};

use super::{
    keyboards,
    types::{AppState, BotResult, Command, EditState},
    utils::{format_user_display, format_word_list, user_to_i64},
};

pub struct TelegramService {
    bot: Bot,
    state: Arc<AppState>,
}

impl TelegramService {
    pub fn new(bot: Bot, config: Arc<AppConfig>, filter: Arc<SpamFilter>) -> Self {
        let state = Arc::new(AppState::new(config, filter));
        Self { bot, state }
    }

    pub async fn run(&self, mut shutdown: ShutdownListener) -> Result<()> {
        self.bot.set_my_commands(Command::bot_commands()).await?;

        let me = self.bot.get_me().await?;
        if let Some(expected_username) = &self.state.config.bot_username {
            if me.username.as_deref() != Some(expected_username.as_str()) {
                tracing::warn!(
                    target: "telegram",
                    expected = expected_username.as_str(),
                    actual = ?me.username,
                    "BOT_USERNAME не совпадает с реальным аккаунтом бота"
                );
            }
        }
        tracing::info!(
            target: "telegram",
            bot_id = me.id.0,
            username = ?me.username,
            "соединение с Telegram установлено"
        );

        // A user with a pending editing choice gets their next text message
        // consumed as the word to add or remove, even when it looks like a
        // command. That branch therefore has to come before command parsing.
        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .branch(
                        dptree::filter(|msg: Message, state: Arc<AppState>| {
                            msg.text().is_some()
                                && msg.from.as_ref().map_or(false, |user| {
                                    state.editing.is_pending(user_to_i64(user))
                                })
                        })
                        .endpoint(Self::on_editing_input),
                    )
                    .branch(
                        dptree::entry()
                            .filter_command::<Command>()
                            .endpoint(Self::on_command),
                    )
                    .branch(dptree::endpoint(Self::on_plain_message)),
            )
            .branch(Update::filter_callback_query().endpoint(Self::on_callback_query));

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![self.state.clone()])
            .default_handler(|update| async move {
                tracing::debug!(target: "telegram", ?update, "unhandled update");
            })
            .build();

        let listener = update_listeners::polling_default(self.bot.clone()).await;
        let error_handler = LoggingErrorHandler::with_custom_text("update listener error");

        let shutdown_token = dispatcher.shutdown_token();
        let mut dispatcher_future =
            Box::pin(dispatcher.dispatch_with_listener(listener, error_handler));
        let mut dispatcher_finished = false;

        tokio::select! {
            _ = shutdown.notified() => {
                tracing::info!("Telegram-диспетчер останавливается");
                if let Ok(wait) = shutdown_token.shutdown() {
                    wait.await;
                }
            }
            _ = &mut dispatcher_future => {
                dispatcher_finished = true;
                tracing::info!("Telegram-диспетчер завершил работу");
            }
        }

        if !dispatcher_finished {
            dispatcher_future.await;
        }

        Ok(())
    }

    async fn on_command(
        bot: Bot,
        msg: Message,
        cmd: Command,
        state: Arc<AppState>,
    ) -> BotResult<()> {
        match cmd {
            Command::Start => {
                bot.send_message(
                    msg.chat.id,
                    "Привет! Я анти-спам бот. Используйте /help для получения списка команд.",
                )
                .await?
            }
            Command::Help => {
                bot.send_message(msg.chat.id, Command::descriptions().to_string())
                    .reply_markup(keyboards::help_keyboard())
                    .await?
            }
            Command::Status => {
                let stats = state.filter.status_summary();
                bot.send_message(
                    msg.chat.id,
                    format!(
                        "Проверено сообщений: {}\nУдалено сообщений: {}",
                        stats.messages_checked, stats.messages_flagged
                    ),
                )
                .await?
            }
            Command::Editbanned => {
                bot.send_message(
                    msg.chat.id,
                    "Редактирование списка запрещённых слов. Выберите действие:",
                )
                .reply_markup(keyboards::edit_banned_keyboard())
                .await?
            }
        };
        Ok(())
    }

    async fn on_plain_message(bot: Bot, msg: Message, state: Arc<AppState>) -> BotResult<()> {
        let Some(user) = msg.from.as_ref() else {
            return Ok(());
        };
        let Some(text) = msg.text() else {
            return Ok(());
        };

        // Slash-prefixed text that did not parse as a known command; it is
        // answered but never run through the filter.
        if text.starts_with('/') {
            bot.send_message(
                msg.chat.id,
                "Неизвестная команда. Используйте /help для получения списка команд.",
            )
            .await?;
            return Ok(());
        }

        let user_id = user_to_i64(user);
        tracing::info!(
            target: "telegram",
            user_id,
            from = %format_user_display(user),
            text,
            "получено сообщение"
        );

        if state.filter.check(user_id, text, Utc::now()) {
            let spam_count = state.filter.spam_count_for(user_id);
            Self::delete_spam_message(&bot, &msg, spam_count).await;
        }

        Ok(())
    }

    async fn on_editing_input(bot: Bot, msg: Message, state: Arc<AppState>) -> BotResult<()> {
        let Some(user) = msg.from.as_ref() else {
            return Ok(());
        };
        let Some(text) = msg.text() else {
            return Ok(());
        };
        let user_id = user_to_i64(user);
        let Some(edit_state) = state.editing.take(user_id) else {
            return Ok(());
        };

        let word = text.trim();
        match edit_state {
            EditState::WaitingForAdd => {
                state.filter.add_banned_word(word);
                tracing::info!(target: "filter", user_id, word, "запрещённое слово добавлено");
                bot.send_message(
                    msg.chat.id,
                    format!("Слово '{word}' добавлено в список запрещённых."),
                )
                .await?;
            }
            EditState::WaitingForRemove => {
                if state.filter.remove_banned_word(word) {
                    tracing::info!(target: "filter", user_id, word, "запрещённое слово удалено");
                    bot.send_message(
                        msg.chat.id,
                        format!("Слово '{word}' удалено из списка запрещённых."),
                    )
                    .await?;
                } else {
                    bot.send_message(
                        msg.chat.id,
                        format!("Слово '{word}' не найдено в списке запрещённых."),
                    )
                    .await?;
                }
            }
        }
        Ok(())
    }

    async fn on_callback_query(
        bot: Bot,
        query: CallbackQuery,
        state: Arc<AppState>,
    ) -> BotResult<()> {
        let user_id = user_to_i64(&query.from);

        if let (Some(data), Some(message)) = (query.data.as_deref(), query.message.as_ref()) {
            let chat_id = message.chat().id;
            match data {
                keyboards::CALLBACK_SHOW_COMMANDS => {
                    bot.send_message(chat_id, Command::descriptions().to_string())
                        .await?;
                }
                keyboards::CALLBACK_SHOW_SETTINGS => {
                    bot.send_message(chat_id, Self::settings_text(&state)).await?;
                }
                keyboards::CALLBACK_EDIT_ADD => {
                    state.editing.begin(user_id, EditState::WaitingForAdd);
                    bot.send_message(
                        chat_id,
                        "Введите слово, которое хотите добавить в список запрещённых:",
                    )
                    .await?;
                }
                keyboards::CALLBACK_EDIT_REMOVE => {
                    state.editing.begin(user_id, EditState::WaitingForRemove);
                    bot.send_message(
                        chat_id,
                        "Введите слово, которое хотите удалить из списка запрещённых:",
                    )
                    .await?;
                }
                other => {
                    tracing::debug!(target: "telegram", data = other, "unknown callback data");
                }
            }
        }

        bot.answer_callback_query(query.id).await?;
        Ok(())
    }

    fn settings_text(state: &AppState) -> String {
        let words = state.filter.list_banned_words();
        format!(
            "Настройки анти-спам фильтра:\n\
             Порог предупреждений: {}\n\
             Запрещённые слова: {}\n\
             Время между сообщениями: {} мс",
            state.config.filter.warning_threshold,
            format_word_list(&words),
            state.config.filter.min_message_interval.as_millis(),
        )
    }

    // A failed deletion must not roll back the verdict: the filter's
    // counters and the user's spam count already include this message.
    async fn delete_spam_message(bot: &Bot, msg: &Message, spam_count: u32) {
        match bot.delete_message(msg.chat.id, msg.id).await {
            Ok(_) => {
                tracing::info!(
                    target: "telegram",
                    chat_id = msg.chat.id.0,
                    message_id = msg.id.0,
                    spam_count,
                    "спам-сообщение удалено"
                );
            }
            Err(err) => {
                tracing::error!(
                    target: "telegram",
                    error = %err,
                    chat_id = msg.chat.id.0,
                    message_id = msg.id.0,
                    "не удалось удалить спам-сообщение"
                );
            }
        }
    }
}
