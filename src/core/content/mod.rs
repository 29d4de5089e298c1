//! Content provider.
//!
//! Loads the five entity collections from a [`ContentSource`] into an
//! immutable [`ContentSnapshot`](crate::core::types::ContentSnapshot) and
//! keeps the latest one available to request handlers.
//!
//! - **source**: the source trait and the local JSON fixture source
//! - **cms**: headless CMS REST client
//! - **retry**: exponential backoff for transient fetch failures
//! - **store**: current snapshot holder with background refresh

mod cms;
mod retry;
mod source;
mod store;

pub use cms::CmsClient;
pub use retry::{retry_with_backoff, RetryPolicy};
pub use source::{ContentSource, FixtureSource};
pub use store::ContentStore;
