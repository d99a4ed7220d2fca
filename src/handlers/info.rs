// Handler for the /info command.

use crate::handlers::{
    registered_user,
    utils::{format_birth_date, format_oms_card, send_reply_or_plain},
};
use sqlx::SqlitePool;
use teloxide::prelude::*;

const NOT_SET: &str = "не указан";

pub async fn info(bot: Bot, msg: Message, pool: SqlitePool) -> Result<(), teloxide::RequestError> {
    let Some(user) = registered_user(&bot, &msg, &pool).await? else {
        return Ok(());
    };

    let card = user
        .oms_card
        .map_or_else(|| NOT_SET.to_string(), format_oms_card);
    let birth_date = user
        .birth_date
        .map_or_else(|| NOT_SET.to_string(), format_birth_date);

    let text = format!("Полис ОМС: {card};\nДата рождения: {birth_date}.");
    send_reply_or_plain(&bot, &msg, text).await?;
    Ok(())
}
