//! DNS wire format (RFC 1035 §4.1).
//!
//! Everything here works on borrowed packet bytes and never panics on short or
//! hostile input; every bounds failure surfaces as
//! [`DomainError::MalformedPacket`](crate::DomainError::MalformedPacket).

mod header;
mod name;
mod question;
mod record;
mod response;

pub use header::{Header, FLAG_QR, FLAG_RA, FLAG_RD, FLAG_TC, HEADER_LEN};
pub use name::{encode_name, parse_name, MAX_NAME_LEN, MAX_POINTER_HOPS};
pub use question::{skip_question, Question};
pub use record::{ResourceRecord, RR_FIXED_LEN};
pub use response::{build_cache_hit_response, scan_answers, ANSWER_POINTER};

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

#[inline]
pub(crate) fn read_u16(buf: &[u8], pos: usize) -> Option<u16> {
    let bytes = buf.get(pos..pos + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], pos: usize) -> Option<u32> {
    let bytes = buf.get(pos..pos + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
