use super::header::{Header, HEADER_LEN};
use super::question::skip_question;
use super::record::ResourceRecord;
use super::{CLASS_IN, TYPE_A};
use crate::DomainError;
use std::net::Ipv4Addr;

/// Compression pointer to offset 12, where the first question name starts.
pub const ANSWER_POINTER: u16 = 0xC00C;

const RESPONSE_FLAGS: u16 = 0x8180;
const A_ANSWER_LEN: usize = 16;

/// Builds the reply to `query` from a cached address.
///
/// The reply keeps the query ID, sets the flags to `0x8180` (QR, RD, RA),
/// echoes the first question and carries one A answer whose owner name is a
/// pointer back at that question. Authority and additional sections of the
/// query are not echoed and their counts are zeroed.
pub fn build_cache_hit_response(
    query: &[u8],
    address: Ipv4Addr,
    ttl: u32,
) -> Result<Vec<u8>, DomainError> {
    let query_header = Header::decode(query)?;
    if query_header.qd_count == 0 {
        return Err(DomainError::NoQuestion);
    }
    let question_end = skip_question(query, HEADER_LEN)?;

    let header = Header {
        id: query_header.id,
        flags: RESPONSE_FLAGS,
        qd_count: 1,
        an_count: 1,
        ns_count: 0,
        ar_count: 0,
    };

    let mut buf = Vec::with_capacity(question_end + A_ANSWER_LEN);
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(&query[HEADER_LEN..question_end]);

    buf.extend_from_slice(&ANSWER_POINTER.to_be_bytes());
    buf.extend_from_slice(&TYPE_A.to_be_bytes());
    buf.extend_from_slice(&CLASS_IN.to_be_bytes());
    buf.extend_from_slice(&ttl.to_be_bytes());
    buf.extend_from_slice(&4u16.to_be_bytes());
    buf.extend_from_slice(&address.octets());

    Ok(buf)
}

/// Walks the answer section of `response`, handing every decoded answer to
/// `visit` in order.
///
/// Questions are stepped over without being kept. The walk stops at the first
/// record that does not decode; answers already visited stay visited, so a
/// caller writing into a cache keeps whatever came before the bad record.
pub fn scan_answers<'a, F>(response: &'a [u8], mut visit: F) -> Result<Header, DomainError>
where
    F: FnMut(&ResourceRecord<'a>),
{
    let header = Header::decode(response)?;
    let mut offset = HEADER_LEN;

    for _ in 0..header.qd_count {
        offset = skip_question(response, offset)?;
    }

    for _ in 0..header.an_count {
        let (record, next) = ResourceRecord::decode(response, offset)?;
        visit(&record);
        offset = next;
    }

    Ok(header)
}
