// Handler for the /datebirth command.

use crate::db;
use crate::handlers::{
    registered_user,
    utils::{parse_birth_date, send_reply_or_plain},
};
use sqlx::SqlitePool;
use teloxide::prelude::*;
use tracing::{error, info};

const UPDATED: &str = "Дата рождения успешно обновлена.";
const UPDATE_FAILED: &str = "Не удалось обновить дату рождения.";

pub async fn date_birth(
    bot: Bot,
    msg: Message,
    raw: String,
    pool: SqlitePool,
) -> Result<(), teloxide::RequestError> {
    let Some(user) = registered_user(&bot, &msg, &pool).await? else {
        return Ok(());
    };

    let date = match parse_birth_date(&raw) {
        Ok(date) => date,
        Err(e) => {
            send_reply_or_plain(&bot, &msg, e.to_string()).await?;
            return Ok(());
        }
    };

    let text = match db::set_birth_date(&pool, user.id, date).await {
        Ok(true) => {
            info!("Updated birth date for user {}", user.id);
            UPDATED
        }
        Ok(false) => {
            error!("Birth date update for user {} matched no rows", user.id);
            UPDATE_FAILED
        }
        Err(e) => {
            error!("Failed to update birth date for user {}: {e}", user.id);
            UPDATE_FAILED
        }
    };

    send_reply_or_plain(&bot, &msg, text).await?;
    Ok(())
}
