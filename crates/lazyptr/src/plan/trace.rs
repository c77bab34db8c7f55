//! Partial-trace plan.
//!
//! The ket keeps identity labels on traced positions and takes a fresh label
//! on each kept position; the bra is all identity labels. Traced positions
//! therefore pair ket with bra and are summed, while each kept position joins
//! the bra to the vector (label `p`) and the ket to the output (fresh label).

use tracing::debug;

use super::ContractionPlan;
use crate::labels::{Label, LabelAllocator};
use crate::partition::Partition;

pub(super) fn build(partition: &Partition) -> ContractionPlan {
    let n = partition.n();
    let mut alloc = LabelAllocator::new(n);

    let bra: Vec<Label> = (0..n).map(|p| alloc.identity(p)).collect();
    let mut ket = bra.clone();
    let mut output = Vec::with_capacity(partition.sysa().len());
    for &p in partition.sysa() {
        let label = alloc.fresh();
        ket[p] = label;
        output.push(label);
    }
    let vector: Vec<Label> = partition.sysa().iter().map(|&p| alloc.identity(p)).collect();

    debug!(
        n,
        kept = partition.sysa().len(),
        fresh = alloc.issued(),
        "built partial-trace plan"
    );

    ContractionPlan {
        n,
        ket,
        bra,
        vector,
        output,
        vector_axes: partition.sysa().to_vec(),
        output_axes: partition.sysa().to_vec(),
    }
}
