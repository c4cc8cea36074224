use ferrous_relay_domain::wire::{Header, Question};
use std::net::Ipv4Addr;

pub fn query_for(id: u16, question: Question) -> Vec<u8> {
    let header = Header {
        id,
        flags: 0x0100,
        qd_count: 1,
        ..Header::default()
    };
    let mut buf = header.encode().to_vec();
    question.encode(&mut buf).unwrap();
    buf
}

pub fn a_query(id: u16, domain: &str) -> Vec<u8> {
    query_for(id, Question::a(domain))
}

/// Upstream-style response: the query's question followed by one A answer per
/// entry, each owner name pointing back at the question.
pub fn a_response(id: u16, domain: &str, answers: &[(Ipv4Addr, u32)]) -> Vec<u8> {
    let mut buf = a_query(id, domain);
    buf[2] = 0x81;
    buf[3] = 0x80;
    buf[6..8].copy_from_slice(&(answers.len() as u16).to_be_bytes());

    for (address, ttl) in answers {
        buf.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
        buf.extend_from_slice(&ttl.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x04]);
        buf.extend_from_slice(&address.octets());
    }
    buf
}
