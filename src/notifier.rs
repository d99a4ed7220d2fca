// Background reminder for users whose profile is still incomplete.

use crate::db::{self, User};
use sqlx::SqlitePool;
use teloxide::prelude::*;
use tokio::{
    task::JoinHandle,
    time::{Duration, Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, error, info, warn};

/// Reminder for `user`, or `None` when nothing is missing.
pub fn reminder_text(user: &User) -> Option<String> {
    if user.is_complete() {
        return None;
    }

    let mut missing = Vec::with_capacity(2);
    if user.oms_card.is_none() {
        missing.push("номер ПОЛИСа (/omscard)");
    }
    if user.birth_date.is_none() {
        missing.push("дату рождения (/datebirth)");
    }

    Some(format!(
        "Ваш профиль заполнен не полностью. Укажите {}.",
        missing.join(" и ")
    ))
}

/// One pass over the table. Returns how many reminders were delivered.
pub async fn notify_incomplete(bot: &Bot, pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let users = db::incomplete_profiles(pool).await?;
    let mut sent = 0;

    for user in &users {
        let Some(text) = reminder_text(user) else {
            continue;
        };
        match bot.send_message(ChatId(user.chat_id), text).await {
            Ok(_) => sent += 1,
            Err(e) => warn!(user_id = user.id, chat_id = user.chat_id, "Reminder failed: {e}"),
        }
    }

    debug!("Reminder pass: {sent}/{} delivered", users.len());
    Ok(sent)
}

/// Spawn the reminder loop. The first pass runs one `period` after start;
/// the task lives until it is aborted.
pub fn spawn(bot: Bot, pool: SqlitePool, period: Duration) -> JoinHandle<()> {
    info!("Reminder loop every {}s", period.as_secs());

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = notify_incomplete(&bot, &pool).await {
                error!("Could not read users for reminders: {e}");
            }
        }
    })
}
