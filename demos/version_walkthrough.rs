//! Version walkthrough: build, branch, and read every version back.

use perseq::{AggregateOp, PersistentSequence, VersionId};

fn main() -> anyhow::Result<()> {
    let mut seq = PersistentSequence::from_values(&[1, 3, 5, 7, 9, 11])?;
    let v0 = VersionId(0);
    let v1 = seq.update(v0, 2, 10)?;
    let v2 = seq.update(v1, 0, 20)?;
    // Branch from v0 again; v1 and v2 are unaffected.
    let v3 = seq.update(v0, 5, -4)?;

    for version in [v0, v1, v2, v3] {
        println!(
            "{version}: {:?} sum[1..=4]={} min={} max={} ({})",
            seq.get_version_array(version)?,
            seq.query(version, 1, 4, AggregateOp::Sum)?,
            seq.query(version, 0, 5, AggregateOp::Min)?,
            seq.query(version, 0, 5, AggregateOp::Max)?,
            seq.origin_of(version)?,
        );
    }

    let stats = seq.arena_stats();
    println!(
        "{} versions share {} nodes ({} reachable from all roots)",
        seq.version_count(),
        stats.nodes,
        seq.reachable_nodes(&[v0, v1, v2, v3])?
    );

    Ok(())
}
