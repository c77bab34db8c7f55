//! Partial-trace plus partial-transpose plan.
//!
//! The ket is all identity labels. The bra keeps identity labels on traced
//! positions and takes fresh labels, in ascending position order, on every
//! kept position. Transposing a block swaps which copy of its index meets the
//! vector: for `sysa` the vector takes the ket's label and the output the
//! bra's, for `sysb` the other way round.

use tracing::debug;

use super::ContractionPlan;
use crate::labels::{Label, LabelAllocator};
use crate::partition::{Partition, Role};

pub(super) fn build(partition: &Partition) -> ContractionPlan {
    let n = partition.n();
    let mut alloc = LabelAllocator::new(n);

    let ket: Vec<Label> = (0..n).map(|p| alloc.identity(p)).collect();
    let mut bra = ket.clone();
    let kept = partition.ab_sorted();
    for &p in &kept {
        bra[p] = alloc.fresh();
    }

    let mut vector = Vec::with_capacity(kept.len());
    let mut output = Vec::with_capacity(kept.len());
    for &p in &kept {
        if partition.role(p) == Some(Role::TransposedKept) {
            vector.push(ket[p]);
            output.push(bra[p]);
        } else {
            vector.push(bra[p]);
            output.push(ket[p]);
        }
    }

    debug!(
        n,
        transposed = partition.sysa().len(),
        kept = kept.len(),
        fresh = alloc.issued(),
        "built partial-transpose plan"
    );

    ContractionPlan {
        n,
        ket,
        bra,
        vector,
        output,
        vector_axes: kept.clone(),
        output_axes: kept,
    }
}

#[cfg(test)]
mod tests {
    use crate::plan::ptr_ppt_dot_plan;

    #[test]
    fn test_three_subsystems() {
        let plan = ptr_ppt_dot_plan(3, &[0], &[1]).unwrap();
        assert_eq!(plan.ket(), &[0, 1, 2]);
        assert_eq!(plan.bra(), &[3, 4, 2]);
        assert_eq!(plan.vector(), &[0, 4]);
        assert_eq!(plan.output(), &[3, 1]);
        assert_eq!(plan.vector_dims(&[4, 9, 7]), vec![4, 9]);
        assert_eq!(plan.output_dims(&[4, 9, 7]), vec![4, 9]);
    }

    #[test]
    fn test_many_body() {
        let plan = ptr_ppt_dot_plan(9, &[0, 1, 5], &[2, 3, 6]).unwrap();
        assert_eq!(plan.ket(), &(0..9).collect::<Vec<_>>()[..]);
        assert_eq!(plan.bra(), &[9, 10, 11, 12, 4, 13, 14, 7, 8]);
        assert_eq!(plan.vector(), &[0, 1, 11, 12, 5, 14]);
        assert_eq!(plan.output(), &[9, 10, 2, 3, 13, 6]);
        assert_eq!(plan.vector_axes(), &[0, 1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_caller_order_does_not_matter() {
        let a = ptr_ppt_dot_plan(9, &[0, 1, 5], &[2, 3, 6]).unwrap();
        let b = ptr_ppt_dot_plan(9, &[5, 1, 0], &[6, 3, 2]).unwrap();
        assert_eq!(a.bra(), b.bra());
        assert_eq!(a.vector(), b.vector());
        assert_eq!(a.output(), b.output());
    }

    #[test]
    fn test_empty_transposed_block_is_plain_trace() {
        let plan = ptr_ppt_dot_plan(3, &[], &[1]).unwrap();
        assert_eq!(plan.bra(), &[0, 3, 2]);
        assert_eq!(plan.vector(), &[3]);
        assert_eq!(plan.output(), &[1]);
    }
}
