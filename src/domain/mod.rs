pub mod feed_session;
pub mod interaction;
pub mod product;
