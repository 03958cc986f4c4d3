//! Benchmark profiles for the Porenet object model.
//!
//! - [`reference_session`]: 10K pores, 20K throats, one phase split
//!   across several physics regions with a sliver of overlap.
//! - [`block_partition`]: contiguous index blocks covering `0..count`.
//! - [`scattered_subset`]: deterministic pseudo-random indices.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use porenet_core::{NetworkId, PhaseId, PhysicsId};
use porenet_engine::{Session, SessionConfig, SessionError};

/// Handles into a session built by [`reference_session`].
#[derive(Clone, Debug)]
pub struct Profile {
    pub network: NetworkId,
    pub phase: PhaseId,
    pub physics: Vec<PhysicsId>,
}

/// Build a reference profile: 10K pores and 20K throats, `regions`
/// physics objects over contiguous blocks, each block extended by one
/// pore into its neighbour.
pub fn reference_session(seed: u64, regions: usize) -> Result<(Session, Profile), SessionError> {
    let (num_pores, num_throats) = (10_000, 20_000);
    let mut session = Session::new(SessionConfig {
        seed: Some(seed),
        ..Default::default()
    })?;
    let network = session.add_network(Some("reference"), num_pores, num_throats)?;
    let phase = session.add_phase(network, Some("water"))?;

    let pore_blocks = block_partition(num_pores, regions);
    let throat_blocks = block_partition(num_throats, regions);
    let mut physics = Vec::with_capacity(regions);
    for (i, (pores, throats)) in pore_blocks.into_iter().zip(throat_blocks).enumerate() {
        let mut pores = pores;
        if let Some(&last) = pores.last() {
            if last + 1 < num_pores {
                pores.push(last + 1);
            }
        }
        let name = format!("region{i}");
        physics.push(session.add_physics(network, phase, &pores, &throats, Some(name.as_str()))?);
    }
    Ok((
        session,
        Profile {
            network,
            phase,
            physics,
        },
    ))
}

/// Split `0..count` into `parts` contiguous blocks of near-equal size.
///
/// Earlier blocks take the remainder. `parts == 0` yields no blocks.
pub fn block_partition(count: usize, parts: usize) -> Vec<Vec<usize>> {
    if parts == 0 {
        return Vec::new();
    }
    let base = count / parts;
    let extra = count % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let block = (start..start + len).collect();
            start += len;
            block
        })
        .collect()
}

/// `n` distinct indices in `0..count`, deterministic for a given seed.
///
/// Uses a multiplicative hash with linear probing; `n` is clamped to
/// `count`.
pub fn scattered_subset(count: usize, n: usize, seed: u64) -> Vec<usize> {
    let n = n.min(count);
    let mut taken = vec![false; count];
    let mut out = Vec::with_capacity(n);
    for i in 0..n as u64 {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i.wrapping_mul(1442695040888963407))
            % count as u64) as usize;
        while taken[pos] {
            pos = (pos + 1) % count;
        }
        taken[pos] = true;
        out.push(pos);
    }
    out
}
