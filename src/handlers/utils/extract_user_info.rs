// Keep message/user extraction logic in one place so handlers stay thin.

use teloxide::types::Message;

pub const UNIDENTIFIED_USER: &str = "Не удалось определить вашего пользователя.";

// Extract the sender's Telegram id and the chat the message came from.
pub fn extract_user_info(msg: &Message) -> Result<(i64, i64), &'static str> {
    let user = msg.from.as_ref().ok_or(UNIDENTIFIED_USER)?;

    let user_id: i64 = user.id.0 as i64;
    let chat_id: i64 = msg.chat.id.0;

    Ok((user_id, chat_id))
}
