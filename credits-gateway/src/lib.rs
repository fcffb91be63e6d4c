//! # Credits Gateway
//!
//! Outbound adapter for the Razorpay payment gateway: order creation,
//! payment lookup and refunds over the REST API, plus the HMAC-SHA256
//! signature scheme used to authenticate checkout confirmations and
//! webhook deliveries.

pub mod signature;

mod razorpay;

pub use razorpay::{RazorpayClient, RazorpayConfig};
