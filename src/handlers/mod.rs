mod date_birth;
mod info;
mod oms_card;
mod start;
pub mod utils;

use date_birth::date_birth;
use info::info;
use oms_card::oms_card;
use start::start;

use crate::commands::Command;
use crate::db::{self, User};
use sqlx::SqlitePool;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::error;
use utils::{extract_user_info, send_reply_or_plain};

pub const USER_NOT_FOUND: &str = "Ваш пользователь не найден в базе. Попробуйте инициализировать запись при помощи команды `/start` или обратитесь к автору бота.";
pub const LOOKUP_FAILED: &str = "Не удалось получить данные о вашем пользователе. Попробуйте позже или обратитесь к автору бота.";

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    pool: SqlitePool,
) -> ResponseResult<()> {
    tracing::info!("Update received: chat_id = {}", msg.chat.id);

    match cmd {
        Command::Help => {
            send_reply_or_plain(&bot, &msg, Command::descriptions().to_string()).await?;
        }
        Command::Start => start(bot, msg, pool).await?,
        Command::Info => info(bot, msg, pool).await?,
        Command::OmsCard(raw) => oms_card(bot, msg, raw, pool).await?,
        Command::DateBirth(raw) => date_birth(bot, msg, raw, pool).await?,
    }
    Ok(())
}

pub fn get_update_handler() -> teloxide::dispatching::UpdateHandler<teloxide::RequestError> {
    teloxide::types::Update::filter_message().branch(
        teloxide::dptree::entry()
            .filter_command::<Command>()
            .endpoint(handle_command),
    )
}

// Loads the sender's record. When there is none (or it can't be read) the
// user has already been told and `None` comes back.
async fn registered_user(
    bot: &Bot,
    msg: &Message,
    pool: &SqlitePool,
) -> Result<Option<User>, teloxide::RequestError> {
    let (user_id, _) = match extract_user_info(msg) {
        Ok(v) => v,
        Err(err_msg) => {
            send_reply_or_plain(bot, msg, err_msg).await?;
            return Ok(None);
        }
    };

    match db::find_user(pool, user_id).await {
        Ok(Some(user)) => Ok(Some(user)),
        Ok(None) => {
            send_reply_or_plain(bot, msg, USER_NOT_FOUND).await?;
            Ok(None)
        }
        Err(e) => {
            error!("Failed to load user {user_id}: {e}");
            send_reply_or_plain(bot, msg, LOOKUP_FAILED).await?;
            Ok(None)
        }
    }
}
