//! Kitchen display support

mod feed;

pub use feed::KitchenFeed;
