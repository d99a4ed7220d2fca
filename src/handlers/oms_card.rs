// Handler for the /omscard command.

use crate::db;
use crate::handlers::{
    registered_user,
    utils::{parse_oms_card, send_reply_or_plain},
};
use sqlx::SqlitePool;
use teloxide::prelude::*;
use tracing::{error, info};

const UPDATED: &str = "Полис успешно обновлён.";
const UPDATE_FAILED: &str = "Не удалось обновить ПОЛИС.";

pub async fn oms_card(
    bot: Bot,
    msg: Message,
    raw: String,
    pool: SqlitePool,
) -> Result<(), teloxide::RequestError> {
    let Some(user) = registered_user(&bot, &msg, &pool).await? else {
        return Ok(());
    };

    let card = match parse_oms_card(&raw) {
        Ok(card) => card,
        Err(e) => {
            send_reply_or_plain(&bot, &msg, e.to_string()).await?;
            return Ok(());
        }
    };

    let text = match db::set_oms_card(&pool, user.id, card).await {
        Ok(true) => {
            info!("Updated OMS card for user {}", user.id);
            UPDATED
        }
        Ok(false) => {
            error!("OMS card update for user {} matched no rows", user.id);
            UPDATE_FAILED
        }
        Err(e) => {
            error!("Failed to update OMS card for user {}: {e}", user.id);
            UPDATE_FAILED
        }
    };

    send_reply_or_plain(&bot, &msg, text).await?;
    Ok(())
}
