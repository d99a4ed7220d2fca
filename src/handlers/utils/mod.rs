pub mod extract_user_info;
pub use extract_user_info::extract_user_info;

pub mod profile_input;
pub use profile_input::{
    ProfileInputError, format_birth_date, format_oms_card, parse_birth_date, parse_oms_card,
};

pub mod send_reply_or_plain;
pub use send_reply_or_plain::send_reply_or_plain;
