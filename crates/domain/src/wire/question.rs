use super::name::{encode_name, parse_name};
use super::{read_u16, CLASS_IN, TYPE_A};
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    /// An IN-class A question, the only kind the relay answers from cache.
    pub fn a(name: impl Into<String>) -> Self {
        Self::new(name, TYPE_A, CLASS_IN)
    }

    /// Decodes one question at `offset`, returning it with the offset just past it.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = parse_name(buf, offset)?;
        let (qtype, qclass) = match (read_u16(buf, pos), read_u16(buf, pos + 2)) {
            (Some(qtype), Some(qclass)) => (qtype, qclass),
            _ => {
                return Err(DomainError::malformed(format!(
                    "incomplete question: type/class need 4 bytes at offset {}",
                    pos
                )))
            }
        };

        Ok((
            Self {
                name,
                qtype,
                qclass,
            },
            pos + 4,
        ))
    }

    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        encode_name(&self.name, out)?;
        out.extend_from_slice(&self.qtype.to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
        Ok(())
    }

    pub fn is_address_query(&self) -> bool {
        self.qtype == TYPE_A && self.qclass == CLASS_IN
    }
}

/// Steps over one question without keeping its contents.
pub fn skip_question(buf: &[u8], offset: usize) -> Result<usize, DomainError> {
    Question::decode(buf, offset).map(|(_, next)| next)
}
