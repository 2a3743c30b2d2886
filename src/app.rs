use std::{sync::Arc, time::Duration};

use anyhow::Result;
use teloxide::prelude::*;

use crate::{
    config::AppConfig,
    filter::SpamFilter,
    infrastructure::shutdown::Shutdown,
    telegram::TelegramService,
};

pub struct AntiSpamApp {
    telegram: TelegramService,
    shutdown: Shutdown,
}

impl AntiSpamApp {
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Self {
        let config = Arc::new(config);
        let filter = Arc::new(SpamFilter::new(&config.filter));
        let bot = Bot::new(&config.telegram_bot_token);
        let telegram = TelegramService::new(bot, config, filter);

        Self { telegram, shutdown }
    }

    pub async fn run(self) -> Result<()> {
        let AntiSpamApp { telegram, shutdown } = self;

        tracing::info!("Анти-спам бот запущен");

        let mut shutdown_listener = shutdown.subscribe();
        let shutdown_timeout = Duration::from_secs(5);
        let mut telegram_future = Box::pin(telegram.run(shutdown.subscribe()));
        let mut telegram_completed = false;

        tokio::select! {
            _ = shutdown_listener.notified() => {
                tracing::info!("получен сигнал завершения (CTRL+C / SIGTERM)");
            }
            res = &mut telegram_future => {
                telegram_completed = true;
                if let Err(err) = res {
                    tracing::error!(?err, "Telegram-диспетчер завершился с ошибкой");
                } else {
                    tracing::info!("Telegram-диспетчер завершился штатно");
                }
            }
        }

        shutdown.trigger();

        if !telegram_completed {
            let wait = tokio::time::sleep(shutdown_timeout);
            tokio::pin!(wait);
            tokio::select! {
                res = &mut telegram_future => {
                    if let Err(err) = res {
                        tracing::error!(?err, "Telegram-диспетчер завершился с ошибкой");
                    }
                }
                _ = &mut wait => {
                    tracing::warn!(
                        target: "telegram",
                        "Telegram dispatcher did not stop within {:?}; forcing exit",
                        shutdown_timeout
                    );
                }
            }
        }

        tracing::info!("Бот остановлен");
        Ok(())
    }
}
