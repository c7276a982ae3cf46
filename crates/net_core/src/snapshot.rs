//! Snapshot encode/decode traits and the replicated combat messages.
//!
//! Encoding is hand-rolled little-endian; each message carries its own
//! version byte so the framing layer stays oblivious.

use anyhow::bail;

/// Types implementing snapshot encoding write themselves into a byte buffer.
pub trait SnapshotEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing snapshot decoding reconstruct themselves from a byte slice.
pub trait SnapshotDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}

fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
    if inp.len() < N {
        bail!("short read");
    }
    let (a, b) = inp.split_at(N);
    *inp = b;
    let mut buf = [0u8; N];
    buf.copy_from_slice(a);
    Ok(buf)
}

const EXPLOSION_SYNC_VERSION: u8 = 1;
/// A radius-16 blast cannot touch more cells than this.
const MAX_SYNC_BLOCKS: usize = 65_536;

/// One detonation as seen by a single observer: the destroyed cells plus
/// the knockback that observer should apply to itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionSync {
    pub origin: [f32; 3],
    pub radius: f32,
    pub blocks: Vec<[i32; 3]>,
    pub knockback: [f32; 3],
}

impl SnapshotEncode for ExplosionSync {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(EXPLOSION_SYNC_VERSION);
        for c in self.origin {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.radius.to_le_bytes());
        // truncate to the decoder's cap so every emitted message decodes
        let n = self.blocks.len().min(MAX_SYNC_BLOCKS);
        out.extend_from_slice(&(n as u32).to_le_bytes());
        for b in self.blocks.iter().take(n) {
            for c in b {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        for c in self.knockback {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
}

impl SnapshotDecode for ExplosionSync {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let ver = take::<1>(inp)?[0];
        if ver != EXPLOSION_SYNC_VERSION {
            bail!("unsupported explosion sync version: {ver}");
        }
        let mut origin = [0.0f32; 3];
        for c in &mut origin {
            *c = f32::from_le_bytes(take::<4>(inp)?);
        }
        let radius = f32::from_le_bytes(take::<4>(inp)?);
        let n = u32::from_le_bytes(take::<4>(inp)?) as usize;
        if n > MAX_SYNC_BLOCKS {
            bail!("block list too large: {n}");
        }
        let mut blocks = Vec::with_capacity(n);
        for _ in 0..n {
            blocks.push([
                i32::from_le_bytes(take::<4>(inp)?),
                i32::from_le_bytes(take::<4>(inp)?),
                i32::from_le_bytes(take::<4>(inp)?),
            ]);
        }
        let mut knockback = [0.0f32; 3];
        for c in &mut knockback {
            *c = f32::from_le_bytes(take::<4>(inp)?);
        }
        Ok(Self {
            origin,
            radius,
            blocks,
            knockback,
        })
    }
}
