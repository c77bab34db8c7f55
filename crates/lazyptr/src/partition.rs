//! Subsystem role partitions.
//!
//! A composite system of `n` subsystems is split into a kept block `sysa`,
//! an optional second kept block `sysb` (partial-transpose variant only) and
//! the traced complement. Validation happens once, in the constructors; a
//! `Partition` that exists is always a valid one.

use crate::error::{PartitionFault, TensorError};

/// What happens to one subsystem when the reduced operator is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Kept, indices left untouched.
    Kept,
    /// Kept, and partially transposed.
    TransposedKept,
    /// Summed out by the partial trace.
    Traced,
}

/// Validated role assignment over subsystem positions `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    roles: Vec<Role>,
    sysa: Vec<usize>,
    sysb: Vec<usize>,
    transposed: bool,
}

impl Partition {
    /// Partition for a plain partial trace keeping `sysa`.
    ///
    /// The order of `sysa` is preserved; it fixes the axis order of the
    /// vectors the reduced operator acts on.
    ///
    /// # Example
    ///
    /// ```
    /// use lazyptr::{Partition, Role};
    ///
    /// let part = Partition::plain(4, &[2, 0]).unwrap();
    /// assert_eq!(part.roles(), &[Role::Kept, Role::Traced, Role::Kept, Role::Traced]);
    /// assert_eq!(part.complement(), vec![1, 3]);
    /// ```
    pub fn plain(n: usize, sysa: &[usize]) -> Result<Self, TensorError> {
        let mut roles = vec![Role::Traced; n];
        assign(&mut roles, sysa, Role::Kept)?;
        Ok(Self {
            roles,
            sysa: sysa.to_vec(),
            sysb: Vec::new(),
            transposed: false,
        })
    }

    /// Partition for a partial trace over the complement of `sysa ∪ sysb`,
    /// followed by a partial transpose on `sysa`.
    ///
    /// # Errors
    ///
    /// `InvalidPartition` with the first offending index: out of range,
    /// listed twice within `sysa` or `sysb`, or present in both.
    pub fn transposed(n: usize, sysa: &[usize], sysb: &[usize]) -> Result<Self, TensorError> {
        let mut roles = vec![Role::Traced; n];
        assign(&mut roles, sysa, Role::TransposedKept)?;
        assign(&mut roles, sysb, Role::Kept)?;
        Ok(Self {
            roles,
            sysa: sysa.to_vec(),
            sysb: sysb.to_vec(),
            transposed: true,
        })
    }

    /// Number of subsystems.
    pub fn n(&self) -> usize {
        self.roles.len()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role(&self, position: usize) -> Option<Role> {
        self.roles.get(position).copied()
    }

    pub fn sysa(&self) -> &[usize] {
        &self.sysa
    }

    /// Empty for a plain partition.
    pub fn sysb(&self) -> &[usize] {
        &self.sysb
    }

    /// Whether this partition carries a partial transpose.
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Traced positions, ascending.
    pub fn complement(&self) -> Vec<usize> {
        self.positions(|r| r == Role::Traced)
    }

    /// Kept positions (`sysa ∪ sysb`), ascending.
    pub fn ab_sorted(&self) -> Vec<usize> {
        self.positions(|r| r != Role::Traced)
    }

    fn positions(&self, pred: impl Fn(Role) -> bool) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|&(_, &r)| pred(r))
            .map(|(p, _)| p)
            .collect()
    }

    /// Check a subsystem dimension list against this partition.
    ///
    /// Returns the full state length `∏ dims`.
    pub fn check_dims(&self, dims: &[usize]) -> Result<usize, TensorError> {
        if dims.len() != self.n() || dims.contains(&0) {
            return Err(TensorError::InvalidDimensions {
                dims: dims.to_vec(),
                n: self.n(),
            });
        }
        dims.iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| TensorError::InvalidDimensions {
                dims: dims.to_vec(),
                n: self.n(),
            })
    }
}

fn assign(roles: &mut [Role], indices: &[usize], role: Role) -> Result<(), PartitionFault> {
    let n = roles.len();
    for &index in indices {
        let slot = roles
            .get_mut(index)
            .ok_or(PartitionFault::OutOfRange { index, n })?;
        match *slot {
            Role::Traced => *slot = role,
            current if current == role => return Err(PartitionFault::Duplicate { index }),
            _ => return Err(PartitionFault::Overlap { index }),
        }
    }
    Ok(())
}
