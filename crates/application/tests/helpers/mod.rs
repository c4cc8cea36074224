#![allow(dead_code)]

mod mock_ports;
mod packets;

pub use mock_ports::{MockAnswerCache, MockUpstream, RecordingObserver};
pub use packets::{a_query, a_response, query_for};
