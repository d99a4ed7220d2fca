// Parsing and display of the two profile fields users can set.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static OMS_CARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{16}$").unwrap());
static BIRTH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").unwrap());

const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Displayed texts are sent to the user as-is.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileInputError {
    #[error("Полис должен быть указан в формате 16 чисел без дополнительных символов и пробелов.")]
    InvalidOmsCard,
    #[error("Дата рождения должна быть указана в формате ДД.ММ.ГГГГ без дополнительных символов и пробелов.")]
    InvalidBirthDate,
}

pub fn parse_oms_card(raw: &str) -> Result<i64, ProfileInputError> {
    let raw = raw.trim();
    if !OMS_CARD_RE.is_match(raw) {
        return Err(ProfileInputError::InvalidOmsCard);
    }
    // 16 digits always fit in an i64.
    raw.parse::<i64>()
        .map_err(|_| ProfileInputError::InvalidOmsCard)
}

pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, ProfileInputError> {
    let raw = raw.trim();
    if !BIRTH_DATE_RE.is_match(raw) {
        return Err(ProfileInputError::InvalidBirthDate);
    }
    NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT)
        .map_err(|_| ProfileInputError::InvalidBirthDate)
}

/// Cards are stored as integers, so leading zeros come back here.
pub fn format_oms_card(card: i64) -> String {
    format!("{card:016}")
}

pub fn format_birth_date(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sixteen_digits() {
        assert_eq!(parse_oms_card("1234567890123456"), Ok(1_234_567_890_123_456));
        assert_eq!(parse_oms_card("  0000000000000042 "), Ok(42));
    }

    #[test]
    fn rejects_malformed_cards() {
        for raw in [
            "",
            "123456789012345",
            "12345678901234567",
            "12345678901234ab",
            "+123456789012345",
            "-123456789012345",
            "1234 5678 9012 3456",
            "１２３４５６７８９０１２３４５６",
        ] {
            assert_eq!(
                parse_oms_card(raw),
                Err(ProfileInputError::InvalidOmsCard),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn card_display_keeps_leading_zeros() {
        assert_eq!(format_oms_card(42), "0000000000000042");
        assert_eq!(format_oms_card(1_234_567_890_123_456), "1234567890123456");
    }

    #[test]
    fn accepts_day_month_year() {
        let date = parse_birth_date("05.11.1987").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1987, 11, 5).unwrap());
        assert_eq!(format_birth_date(date), "05.11.1987");
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in [
            "",
            "5.11.1987",
            "05.11.87",
            "1987-11-05",
            "31.02.2000",
            "00.01.2000",
            "05.13.1987",
            "05.11.1987 extra",
        ] {
            assert_eq!(
                parse_birth_date(raw),
                Err(ProfileInputError::InvalidBirthDate),
                "accepted {raw:?}"
            );
        }
    }
}
