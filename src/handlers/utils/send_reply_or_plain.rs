// Sends a reply to a message, keeping forum threads and group context intact

use teloxide::{
    prelude::*,
    requests::Requester,
    types::{ReplyParameters, ThreadId},
};

pub async fn send_reply_or_plain(
    bot: &Bot,
    msg: &Message,
    text: impl Into<String>,
) -> Result<Message, teloxide::RequestError> {
    let chat_id = msg.chat.id;
    let thread_id: Option<ThreadId> = msg.thread_id;

    // Groups get a reply so the answer is tied to whoever asked
    if msg.chat.title().is_some() {
        let params = ReplyParameters::new(msg.id).allow_sending_without_reply();
        let req = bot.send_message(chat_id, text.into()).reply_parameters(params);

        match thread_id {
            Some(tid) => req.message_thread_id(tid).await,
            None => req.await,
        }
    } else {
        bot.send_message(chat_id, text.into()).await
    }
}
