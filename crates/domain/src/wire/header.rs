use super::read_u16;
use crate::DomainError;

pub const HEADER_LEN: usize = 12;

pub const FLAG_QR: u16 = 0x8000;
pub const FLAG_TC: u16 = 0x0200;
pub const FLAG_RD: u16 = 0x0100;
pub const FLAG_RA: u16 = 0x0080;

/// Fixed 12-byte DNS message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    /// QR, Opcode, AA, TC, RD, RA, Z and RCODE packed as on the wire.
    pub flags: u16,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::malformed(format!(
                "header needs {} bytes, got {}",
                HEADER_LEN,
                buf.len()
            )));
        }

        let field = |pos: usize| read_u16(buf, pos).unwrap_or_default();

        Ok(Self {
            id: field(0),
            flags: field(2),
            qd_count: field(4),
            an_count: field(6),
            ns_count: field(8),
            ar_count: field(10),
        })
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        let fields = [
            self.id,
            self.flags,
            self.qd_count,
            self.an_count,
            self.ns_count,
            self.ar_count,
        ];
        for (i, value) in fields.iter().enumerate() {
            buf[i * 2..i * 2 + 2].copy_from_slice(&value.to_be_bytes());
        }
        buf
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & FLAG_TC != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RA != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reads_fields_big_endian() {
        let buf = [
            0xAB, 0xCD, 0x01, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04,
        ];
        let header = Header::decode(&buf).unwrap();

        assert_eq!(header.id, 0xABCD);
        assert_eq!(header.flags, 0x0100);
        assert_eq!(header.qd_count, 1);
        assert_eq!(header.an_count, 2);
        assert_eq!(header.ns_count, 3);
        assert_eq!(header.ar_count, 4);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = vec![0u8; 12];
        buf[1] = 7;
        buf.extend_from_slice(&[0xFF; 20]);
        assert_eq!(Header::decode(&buf).unwrap().id, 7);
    }

    #[test]
    fn test_decode_short_buffer_is_malformed() {
        for len in 0..HEADER_LEN {
            let buf = vec![0u8; len];
            assert!(matches!(
                Header::decode(&buf),
                Err(DomainError::MalformedPacket(_))
            ));
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let headers = [
            Header::default(),
            Header {
                id: 0x1234,
                flags: 0x8180,
                qd_count: 1,
                an_count: 1,
                ns_count: 0,
                ar_count: 0,
            },
            Header {
                id: u16::MAX,
                flags: u16::MAX,
                qd_count: u16::MAX,
                an_count: 0x0102,
                ns_count: 0x0304,
                ar_count: 0x0506,
            },
        ];

        for header in headers {
            assert_eq!(Header::decode(&header.encode()).unwrap(), header);
        }
    }

    #[test]
    fn test_flag_accessors() {
        let header = Header {
            flags: 0x8180,
            ..Header::default()
        };
        assert!(header.is_response());
        assert!(header.recursion_desired());
        assert!(header.recursion_available());
        assert!(!header.is_truncated());
        assert_eq!(header.opcode(), 0);
        assert_eq!(header.rcode(), 0);

        let nxdomain = Header {
            flags: 0x8183,
            ..Header::default()
        };
        assert_eq!(nxdomain.rcode(), 3);
    }
}
