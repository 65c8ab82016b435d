//! Order lifecycle and money math

pub mod money;
mod service;
pub mod status;

pub use service::{create_order, order_detail, set_item_status, set_status};
