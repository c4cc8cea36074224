use crate::DomainError;

/// Upper bound on compression pointers followed while decoding one name.
/// A legitimate packet never needs more than a handful; anything beyond this
/// is a pointer loop.
pub const MAX_POINTER_HOPS: usize = 16;

/// Longest name allowed on the wire, length octets included (RFC 1035 §2.3.4).
pub const MAX_NAME_LEN: usize = 255;

const MAX_LABEL_LEN: usize = 63;
const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER_TAG: u8 = 0xC0;
const POINTER_OFFSET_MASK: u16 = 0x3FFF;

/// Decodes the possibly-compressed name starting at `offset`.
///
/// Returns the dot-joined name (no trailing dot, empty for the root) and the
/// offset of the first byte after the name as it sits at `offset`. When the
/// name ends in a compression pointer that is two bytes past the pointer,
/// wherever the pointer led.
pub fn parse_name(buf: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut resume_at: Option<usize> = None;
    let mut hops = 0usize;
    let mut wire_len = 0usize;

    loop {
        let len_byte = *buf.get(pos).ok_or_else(|| {
            DomainError::malformed(format!("name runs past end of packet at offset {}", pos))
        })?;

        if len_byte == 0 {
            pos += 1;
            break;
        }

        match len_byte & LABEL_TYPE_MASK {
            POINTER_TAG => {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    DomainError::malformed(format!("truncated compression pointer at offset {}", pos))
                })?;
                let target = (u16::from_be_bytes([len_byte, low]) & POINTER_OFFSET_MASK) as usize;
                if target >= buf.len() {
                    return Err(DomainError::malformed(format!(
                        "compression pointer to {} outside packet of {} bytes",
                        target,
                        buf.len()
                    )));
                }

                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(DomainError::malformed(format!(
                        "more than {} compression pointers in one name",
                        MAX_POINTER_HOPS
                    )));
                }

                resume_at.get_or_insert(pos + 2);
                pos = target;
            }
            0x00 => {
                let len = len_byte as usize;
                let start = pos + 1;
                let label = buf.get(start..start + len).ok_or_else(|| {
                    DomainError::malformed(format!("label at offset {} runs past end of packet", pos))
                })?;

                wire_len += len + 1;
                if wire_len + 1 > MAX_NAME_LEN {
                    return Err(DomainError::malformed(format!(
                        "name longer than {} octets",
                        MAX_NAME_LEN
                    )));
                }

                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                pos = start + len;
            }
            _ => {
                return Err(DomainError::malformed(format!(
                    "unsupported label type 0x{:02x} at offset {}",
                    len_byte, pos
                )));
            }
        }
    }

    Ok((name, resume_at.unwrap_or(pos)))
}

/// Appends `name` as uncompressed labels followed by the root label.
/// A trailing dot is accepted; empty interior labels are not.
pub fn encode_name(name: &str, out: &mut Vec<u8>) -> Result<(), DomainError> {
    let name = name.strip_suffix('.').unwrap_or(name);
    let mut wire_len = 1;

    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(DomainError::malformed(format!(
                    "invalid label '{}' in name '{}'",
                    label, name
                )));
            }
            wire_len += label.len() + 1;
            if wire_len > MAX_NAME_LEN {
                return Err(DomainError::malformed(format!(
                    "name '{}' longer than {} octets",
                    name, MAX_NAME_LEN
                )));
            }
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }

    out.push(0);
    Ok(())
}
