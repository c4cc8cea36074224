#![allow(dead_code)]

mod dns_server_mock;
mod packets;

pub use dns_server_mock::{MockBehavior, MockDnsServer};
pub use packets::{a_query, first_answer};
