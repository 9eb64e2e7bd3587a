//! Client for the order-history "webstore" API: fetches a single order and
//! maps the webstore payload to the internal order shape.

mod client;
mod error;
mod types;

pub use client::OrdersClient;
pub use error::OrdersError;
pub use types::{Customer, OrderDetails, OrderItem, ShippingAddress};
