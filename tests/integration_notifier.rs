use chrono::NaiveDate;
use omsbot_rs::db;
use omsbot_rs::notifier::notify_incomplete;
use serial_test::serial;
use sqlx::SqlitePool;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use teloxide::{dispatching::UpdateHandler, dptree, prelude::*};
use teloxide_tests::{MockBot, MockMessageText};

const FAILED_PASS: usize = usize::MAX;

// Users 1 and 3 are incomplete, user 2 has everything filled in.
async fn seeded_pool() -> SqlitePool {
    let pool = db::connect_in_memory()
        .await
        .expect("The in-memory database could not be opened");

    for (id, chat_id) in [(1, 10), (2, 20), (3, 30)] {
        db::create_user(&pool, id, chat_id).await.unwrap();
    }
    db::set_oms_card(&pool, 2, 1_234_567_890_123_456).await.unwrap();
    db::set_birth_date(&pool, 2, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
        .await
        .unwrap();
    db::set_oms_card(&pool, 3, 6_543_210_987_654_321).await.unwrap();

    pool
}

// The mocked bot only talks to the fake server while dispatching, so the
// reminder pass runs from inside a handler.
fn reminder_pass_tree() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry().endpoint(
        |bot: Bot, pool: SqlitePool, delivered: Arc<AtomicUsize>| async move {
            let sent = notify_incomplete(&bot, &pool).await.unwrap_or(FAILED_PASS);
            delivered.store(sent, Ordering::SeqCst);
            Ok::<(), teloxide::RequestError>(())
        },
    )
}

fn unreachable_bot() -> Bot {
    let api_url = url::Url::parse("http://127.0.0.1:1").unwrap();
    Bot::new("1234567890:TESTTOKEN").set_api_url(api_url)
}

#[tokio::test]
#[serial]
async fn reminders_reach_only_incomplete_profiles() {
    let pool = seeded_pool().await;
    let delivered = Arc::new(AtomicUsize::new(0));

    let mut bot = MockBot::new(MockMessageText::new().text("tick"), reminder_pass_tree());
    bot.dependencies(dptree::deps![pool, delivered.clone()]);
    bot.dispatch().await;

    assert_eq!(delivered.load(Ordering::SeqCst), 2);

    let responses = bot.get_responses();
    let chats: Vec<i64> = responses
        .sent_messages
        .iter()
        .map(|m| m.chat.id.0)
        .collect();
    assert_eq!(chats, vec![10, 30]);

    let first = responses.sent_messages[0].text().unwrap_or_default();
    assert!(first.contains("/omscard") && first.contains("/datebirth"), "Unexpected: {first}");
    let second = responses.sent_messages[1].text().unwrap_or_default();
    assert!(!second.contains("/omscard") && second.contains("/datebirth"), "Unexpected: {second}");
}

#[tokio::test]
async fn failed_sends_do_not_stop_the_pass() {
    let pool = seeded_pool().await;

    let sent = notify_incomplete(&unreachable_bot(), &pool).await;
    assert!(matches!(sent, Ok(0)), "Unexpected: {sent:?}");
}

#[tokio::test]
async fn unreadable_database_fails_the_pass() {
    let pool = seeded_pool().await;
    pool.close().await;

    let sent = notify_incomplete(&unreachable_bot(), &pool).await;
    assert!(sent.is_err(), "Unexpected: {sent:?}");
}
