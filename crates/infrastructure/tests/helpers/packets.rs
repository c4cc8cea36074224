use ferrous_relay_domain::wire::{scan_answers, Header, Question};
use std::net::Ipv4Addr;

pub fn a_query(id: u16, domain: &str) -> Vec<u8> {
    let header = Header {
        id,
        flags: 0x0100,
        qd_count: 1,
        ..Header::default()
    };
    let mut buf = header.encode().to_vec();
    Question::a(domain).encode(&mut buf).unwrap();
    buf
}

/// First A address and TTL in a response, if any.
pub fn first_answer(response: &[u8]) -> Option<(Ipv4Addr, u32)> {
    let mut found = None;
    scan_answers(response, |record| {
        if found.is_none() {
            found = record.ipv4().map(|address| (address, record.ttl));
        }
    })
    .ok()?;
    found
}
