//! Signed-in account helpers.

pub mod account_helper;

pub use account_helper::{
    describe_blogs_and_accounts, has_blogs, is_dotcom_available, is_logged_in,
    no_self_hosted_blogs, AccountHelper,
};
