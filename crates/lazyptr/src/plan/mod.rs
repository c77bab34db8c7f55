//! Contraction plans for reduced-operator application.
//!
//! A plan assigns one [`Label`] to every axis of the three operands of a
//! reduced-operator application (the state as ket, its conjugate as bra and
//! the input vector) and fixes the output label order. Plans depend only on
//! the partition, never on the numeric payload, so one plan can serve any
//! number of applications.
//!
//! Labels below `n` name subsystem positions; labels `>= n` are fresh and
//! come from a single [`LabelAllocator`](crate::labels::LabelAllocator) per
//! plan.

mod trace;
mod transpose;

use crate::error::TensorError;
use crate::labels::Label;
use crate::partition::Partition;

/// Per-operand axis labels plus output order for one reduced operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionPlan {
    n: usize,
    ket: Vec<Label>,
    bra: Vec<Label>,
    vector: Vec<Label>,
    output: Vec<Label>,
    /// Subsystem position behind each vector axis.
    vector_axes: Vec<usize>,
    /// Subsystem position behind each output axis.
    output_axes: Vec<usize>,
}

impl ContractionPlan {
    /// Plan for a validated partition.
    pub fn for_partition(partition: &Partition) -> Self {
        if partition.is_transposed() {
            transpose::build(partition)
        } else {
            trace::build(partition)
        }
    }

    /// Number of subsystems the plan was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn ket(&self) -> &[Label] {
        &self.ket
    }

    pub fn bra(&self) -> &[Label] {
        &self.bra
    }

    pub fn vector(&self) -> &[Label] {
        &self.vector
    }

    pub fn output(&self) -> &[Label] {
        &self.output
    }

    pub fn vector_axes(&self) -> &[usize] {
        &self.vector_axes
    }

    pub fn output_axes(&self) -> &[usize] {
        &self.output_axes
    }

    /// Axis sizes of the input vector.
    pub fn vector_dims(&self, dims: &[usize]) -> Vec<usize> {
        self.vector_axes.iter().map(|&p| dims[p]).collect()
    }

    /// Axis sizes of the output vector.
    pub fn output_dims(&self, dims: &[usize]) -> Vec<usize> {
        self.output_axes.iter().map(|&p| dims[p]).collect()
    }

    /// Length of the space the reduced operator acts on.
    pub fn operator_dim(&self, dims: &[usize]) -> usize {
        self.vector_axes.iter().map(|&p| dims[p]).product()
    }

    /// Check an input vector length against `dims`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless `len` equals the product of the vector-axis
    /// dimensions.
    pub fn check_vector(&self, dims: &[usize], len: usize) -> Result<(), TensorError> {
        let expected = self.operator_dim(dims);
        if len != expected {
            return Err(TensorError::DimensionMismatch {
                expected,
                actual: len,
            });
        }
        Ok(())
    }

    /// Every fresh label used anywhere in the plan, ascending and deduplicated.
    pub fn fresh_labels(&self) -> Vec<Label> {
        let mut fresh: Vec<Label> = self
            .ket
            .iter()
            .chain(&self.bra)
            .chain(&self.vector)
            .chain(&self.output)
            .copied()
            .filter(|&l| l >= self.n)
            .collect();
        fresh.sort_unstable();
        fresh.dedup();
        fresh
    }
}

/// Build the partial-trace plan keeping `sysa` (in caller order).
///
/// # Example
///
/// ```
/// use lazyptr::ptr_dot_plan;
///
/// let plan = ptr_dot_plan(2, &[1]).unwrap();
/// assert_eq!(plan.ket(), &[0, 2]);
/// assert_eq!(plan.bra(), &[0, 1]);
/// assert_eq!(plan.vector(), &[1]);
/// assert_eq!(plan.output(), &[2]);
/// ```
pub fn ptr_dot_plan(n: usize, sysa: &[usize]) -> Result<ContractionPlan, TensorError> {
    Ok(ContractionPlan::for_partition(&Partition::plain(n, sysa)?))
}

/// Build the partial-trace plus partial-transpose plan: trace out the
/// complement of `sysa ∪ sysb`, transpose `sysa`.
///
/// Vector and output axes follow ascending subsystem position.
pub fn ptr_ppt_dot_plan(
    n: usize,
    sysa: &[usize],
    sysb: &[usize],
) -> Result<ContractionPlan, TensorError> {
    Ok(ContractionPlan::for_partition(&Partition::transposed(
        n, sysa, sysb,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartitionFault;

    fn assert_fresh_unique(plan: &ContractionPlan) {
        let fresh = plan.fresh_labels();
        assert!(fresh.iter().all(|&l| l >= plan.n()));
        // Each fresh label sits on exactly one ket or bra axis.
        for l in &fresh {
            let on_state = plan
                .ket()
                .iter()
                .chain(plan.bra())
                .filter(|&x| x == l)
                .count();
            assert_eq!(on_state, 1, "fresh label {l} reused");
        }
    }

    #[test]
    fn test_check_vector() {
        let plan = ptr_dot_plan(3, &[2, 0]).unwrap();
        let dims = [2, 3, 5];
        assert_eq!(plan.vector_dims(&dims), vec![5, 2]);
        assert!(plan.check_vector(&dims, 10).is_ok());
        assert_eq!(
            plan.check_vector(&dims, 9),
            Err(TensorError::DimensionMismatch {
                expected: 10,
                actual: 9
            })
        );
    }

    #[test]
    fn test_invalid_partitions_propagate() {
        assert!(matches!(
            ptr_dot_plan(2, &[2]),
            Err(TensorError::InvalidPartition(PartitionFault::OutOfRange { .. }))
        ));
        assert!(matches!(
            ptr_ppt_dot_plan(3, &[0], &[0]),
            Err(TensorError::InvalidPartition(PartitionFault::Overlap { index: 0 }))
        ));
    }

    #[test]
    fn test_fresh_labels_unique() {
        assert_fresh_unique(&ptr_dot_plan(11, &[1, 2, 3, 4, 8, 9]).unwrap());
        assert_fresh_unique(&ptr_dot_plan(5, &[4, 0, 2]).unwrap());
        assert_fresh_unique(&ptr_ppt_dot_plan(9, &[0, 1, 5], &[2, 3, 6]).unwrap());
        assert_fresh_unique(&ptr_ppt_dot_plan(4, &[3, 1], &[0]).unwrap());
    }
}
