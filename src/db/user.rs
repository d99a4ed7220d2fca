use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    /// Telegram user id.
    pub id: i64,
    /// Chat the bot writes to for this user.
    pub chat_id: i64,
    pub oms_card: Option<i64>,
    pub birth_date: Option<NaiveDate>,
}

impl User {
    pub fn is_complete(&self) -> bool {
        self.oms_card.is_some() && self.birth_date.is_some()
    }
}

pub async fn find_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, chat_id, oms_card, birth_date FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Returns false when a user with this id already exists.
pub async fn create_user(pool: &SqlitePool, id: i64, chat_id: i64) -> Result<bool, sqlx::Error> {
    let res = sqlx::query(
        "INSERT INTO users (id, chat_id) VALUES (?, ?) ON CONFLICT(id) DO NOTHING",
    )
    .bind(id)
    .bind(chat_id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected() > 0)
}

/// Returns whether a row was changed.
pub async fn set_oms_card(pool: &SqlitePool, id: i64, card: i64) -> Result<bool, sqlx::Error> {
    let res = sqlx::query("UPDATE users SET oms_card = ? WHERE id = ?")
        .bind(card)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Returns whether a row was changed.
pub async fn set_birth_date(
    pool: &SqlitePool,
    id: i64,
    date: NaiveDate,
) -> Result<bool, sqlx::Error> {
    let res = sqlx::query("UPDATE users SET birth_date = ? WHERE id = ?")
        .bind(date)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Users still missing the card number or the birth date.
pub async fn incomplete_profiles(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, chat_id, oms_card, birth_date
        FROM users
        WHERE oms_card IS NULL
           OR birth_date IS NULL
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}
