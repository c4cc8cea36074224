use super::name::parse_name;
use super::{read_u16, read_u32, CLASS_IN, TYPE_A};
use crate::DomainError;
use std::net::Ipv4Addr;

/// TYPE, CLASS, TTL and RDLENGTH that follow every record owner name.
pub const RR_FIXED_LEN: usize = 10;

/// A resource record borrowed from the packet it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord<'a> {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: &'a [u8],
}

impl<'a> ResourceRecord<'a> {
    pub fn decode(buf: &'a [u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = parse_name(buf, offset)?;

        if pos + RR_FIXED_LEN > buf.len() {
            return Err(DomainError::malformed(format!(
                "record '{}' truncated before its fixed fields at offset {}",
                name, pos
            )));
        }

        let rtype = read_u16(buf, pos).unwrap_or_default();
        let rclass = read_u16(buf, pos + 2).unwrap_or_default();
        let ttl = read_u32(buf, pos + 4).unwrap_or_default();
        let rdlength = read_u16(buf, pos + 8).unwrap_or_default() as usize;

        let rdata_start = pos + RR_FIXED_LEN;
        let rdata = buf.get(rdata_start..rdata_start + rdlength).ok_or_else(|| {
            DomainError::malformed(format!(
                "record '{}' claims {} bytes of data past end of packet",
                name, rdlength
            ))
        })?;

        Ok((
            Self {
                name,
                rtype,
                rclass,
                ttl,
                rdata,
            },
            rdata_start + rdlength,
        ))
    }

    /// The address carried by an IN A record with a 4-byte payload.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.rtype != TYPE_A || self.rclass != CLASS_IN {
            return None;
        }
        let octets: [u8; 4] = self.rdata.try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_record(ttl: u32, rdata: &[u8]) -> Vec<u8> {
        let mut buf = vec![1, b'a', 4, b't', b'e', b's', b't', 0];
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        buf.extend_from_slice(&ttl.to_be_bytes());
        buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        buf.extend_from_slice(rdata);
        buf
    }

    #[test]
    fn test_decode_a_record() {
        let buf = a_record(120, &[10, 0, 0, 9]);
        let (record, next) = ResourceRecord::decode(&buf, 0).unwrap();

        assert_eq!(record.name, "a.test");
        assert_eq!(record.ttl, 120);
        assert_eq!(record.ipv4(), Some(Ipv4Addr::new(10, 0, 0, 9)));
        assert_eq!(next, buf.len());
    }

    #[test]
    fn test_a_record_with_wrong_length_has_no_address() {
        let buf = a_record(60, &[10, 0, 0, 9, 1]);
        let (record, _) = ResourceRecord::decode(&buf, 0).unwrap();
        assert_eq!(record.ipv4(), None);
    }

    #[test]
    fn test_truncated_fixed_fields() {
        let buf = a_record(60, &[1, 2, 3, 4]);
        assert!(ResourceRecord::decode(&buf[..12], 0).is_err());
    }

    #[test]
    fn test_rdata_past_end_is_malformed() {
        let buf = a_record(60, &[1, 2, 3, 4]);
        assert!(matches!(
            ResourceRecord::decode(&buf[..buf.len() - 1], 0),
            Err(DomainError::MalformedPacket(_))
        ));
    }
}
