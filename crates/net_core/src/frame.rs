//! Versioned length framing for replication messages.
//!
//! Format (little-endian):
//! - u8 `FRAME_VERSION` (1)
//! - u32 LEN (bytes of payload)
//! - [u8; LEN] payload
//!
//! Frames delimit messages on a multiplexed stream without peeking into
//! inner payloads; payloads carry their own version bytes.

const FRAME_VERSION: u8 = 1;
const MAX_FRAME_LEN: usize = 1_048_576; // 1 MiB cap

/// Append one framed message to `out`.
pub fn write_msg(out: &mut Vec<u8>, payload: &[u8]) {
    out.push(FRAME_VERSION);
    let len = u32::try_from(payload.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
}

/// Read a single framed message from the front of `inp`.
///
/// The returned slice borrows from `inp`.
pub fn read_msg(inp: &[u8]) -> anyhow::Result<&[u8]> {
    use anyhow::bail;
    if inp.len() < 5 {
        bail!("short frame header");
    }
    let ver = inp[0];
    if ver != FRAME_VERSION {
        bail!("unsupported frame version: {ver}");
    }
    let mut lenb = [0u8; 4];
    lenb.copy_from_slice(&inp[1..5]);
    let len = u32::from_le_bytes(lenb) as usize;
    if len > MAX_FRAME_LEN {
        bail!("frame too large: {len} > {MAX_FRAME_LEN}");
    }
    if inp.len() < 5 + len {
        bail!("short frame payload");
    }
    Ok(&inp[5..5 + len])
}

/// Split a buffer of back-to-back frames into payload slices.
pub fn read_all(mut inp: &[u8]) -> anyhow::Result<Vec<&[u8]>> {
    let mut out = Vec::new();
    while !inp.is_empty() {
        let payload = read_msg(inp)?;
        out.push(payload);
        inp = &inp[5 + payload.len()..];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_frame() {
        let payload = b"boom";
        let mut buf = Vec::new();
        write_msg(&mut buf, payload);
        let got = read_msg(&buf).expect("read");
        assert_eq!(got, payload);
    }

    #[test]
    fn rejects_wrong_version_and_oversize() {
        let mut buf = vec![9u8, 0, 0, 0, 0];
        assert!(read_msg(&buf).is_err());
        buf[0] = FRAME_VERSION;
        buf[1..5].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(read_msg(&buf).is_err());
    }

    #[test]
    fn read_all_splits_stream() {
        let mut buf = Vec::new();
        write_msg(&mut buf, b"a");
        write_msg(&mut buf, b"bc");
        let msgs = read_all(&buf).expect("read all");
        assert_eq!(msgs, vec![b"a".as_slice(), b"bc".as_slice()]);
    }
}
