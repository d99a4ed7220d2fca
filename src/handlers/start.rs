// Handler for the /start command: registers the sender on first use.

use crate::db;
use crate::handlers::{
    LOOKUP_FAILED,
    utils::{extract_user_info, send_reply_or_plain},
};
use sqlx::SqlitePool;
use teloxide::prelude::*;
use tracing::{error, info};

const ALREADY_REGISTERED: &str = "Ваш пользователь найден в базе. Инициализация не требуется.";
const CREATED: &str = "Ваш профиль успешно создан. Добавьте свой ПОЛИС и дату рождения при помощи соответствующих команд. Для справки вызовите `/help`";
const CREATE_FAILED: &str = "Не удалось создать ваш профиль. Попробуйте команду ещё раз или обратитесь к автору бота.";

pub async fn start(bot: Bot, msg: Message, pool: SqlitePool) -> Result<(), teloxide::RequestError> {
    let (user_id, chat_id) = match extract_user_info(&msg) {
        Ok(v) => v,
        Err(err_msg) => {
            send_reply_or_plain(&bot, &msg, err_msg).await?;
            return Ok(());
        }
    };

    let text = match db::find_user(&pool, user_id).await {
        Ok(Some(_)) => ALREADY_REGISTERED,
        Ok(None) => match db::create_user(&pool, user_id, chat_id).await {
            Ok(true) => {
                info!("Registered user {user_id} (chat {chat_id})");
                CREATED
            }
            // Another /start from the same user got there first.
            Ok(false) => ALREADY_REGISTERED,
            Err(e) => {
                error!("Failed to create user {user_id}: {e}");
                CREATE_FAILED
            }
        },
        Err(e) => {
            error!("Failed to load user {user_id}: {e}");
            LOOKUP_FAILED
        }
    };

    send_reply_or_plain(&bot, &msg, text).await?;
    Ok(())
}
