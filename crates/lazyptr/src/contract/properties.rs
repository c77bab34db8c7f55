//! Contraction properties for GEMM.
//!
//! Decides whether a pairwise contraction maps onto one matrix product and,
//! if so, computes the GEMM dimensions and the permutations of A, B and C.

use crate::labels::Label;
use crate::operations::is_identity_perm;

/// Properties of a pairwise contraction `C = A * B`.
///
/// - `dleft` = product of A's free dimensions
/// - `dmid` = product of summed shared dimensions
/// - `dright` = product of B's free dimensions
///
/// The contraction becomes `C(dleft, dright) = A(dleft, dmid) * B(dmid, dright)`.
#[derive(Debug, Clone)]
pub struct ContractionProperties {
    /// Summed labels shared by both operands, in A's axis order.
    pub contracted: Vec<Label>,

    /// Axes of A that are free (appear in the output)
    pub uncontracted_a: Vec<usize>,

    /// Axes of B that are free (appear in the output)
    pub uncontracted_b: Vec<usize>,

    /// False when the pair carries batch labels (shared and kept) or labels
    /// summed on one side only; such pairs go through the loop kernel.
    pub gemm_compatible: bool,

    pub permute_a: bool,
    pub permute_b: bool,
    pub permute_c: bool,

    pub dleft: usize,
    pub dmid: usize,
    pub dright: usize,

    /// Permutation for A: [free..., contracted...]
    pub perm_a: Vec<usize>,

    /// Permutation for B: [contracted..., free...]
    pub perm_b: Vec<usize>,

    /// Permutation taking the GEMM output to `keep` order
    pub perm_c: Vec<usize>,

    /// Output labels in GEMM order (before `perm_c`)
    pub output_labels: Vec<Label>,
}

impl ContractionProperties {
    /// Compute contraction properties from labels, shapes and output labels.
    ///
    /// # Example
    ///
    /// ```
    /// use lazyptr::contract::ContractionProperties;
    ///
    /// // C[i,k] = A[i,j] * B[j,k]
    /// let props = ContractionProperties::compute(
    ///     &[0, 1], &[2, 3],
    ///     &[1, 2], &[3, 4],
    ///     &[0, 2],
    /// );
    ///
    /// assert!(props.gemm_compatible);
    /// assert_eq!((props.dleft, props.dmid, props.dright), (2, 3, 4));
    /// ```
    pub fn compute(
        labels_a: &[Label],
        shape_a: &[usize],
        labels_b: &[Label],
        shape_b: &[usize],
        keep: &[Label],
    ) -> Self {
        let mut gemm_compatible = true;

        let mut contracted = Vec::new();
        let mut contracted_a = Vec::new();
        let mut uncontracted_a = Vec::new();
        for (i, &la) in labels_a.iter().enumerate() {
            let shared = labels_b.contains(&la);
            let kept = keep.contains(&la);
            match (shared, kept) {
                (true, false) => {
                    contracted.push(la);
                    contracted_a.push(i);
                }
                (false, true) => uncontracted_a.push(i),
                _ => gemm_compatible = false,
            }
        }

        let contracted_b: Vec<usize> = contracted
            .iter()
            .filter_map(|l| labels_b.iter().position(|lb| lb == l))
            .collect();
        let mut uncontracted_b = Vec::new();
        for (j, &lb) in labels_b.iter().enumerate() {
            if labels_a.contains(&lb) {
                continue;
            }
            if keep.contains(&lb) {
                uncontracted_b.push(j);
            } else {
                gemm_compatible = false;
            }
        }

        let dleft: usize = uncontracted_a.iter().map(|&i| shape_a[i]).product();
        let dmid: usize = contracted_a.iter().map(|&i| shape_a[i]).product();
        let dright: usize = uncontracted_b.iter().map(|&j| shape_b[j]).product();

        let perm_a: Vec<usize> = uncontracted_a
            .iter()
            .chain(contracted_a.iter())
            .copied()
            .collect();
        let perm_b: Vec<usize> = contracted_b
            .iter()
            .chain(uncontracted_b.iter())
            .copied()
            .collect();

        let output_labels: Vec<Label> = uncontracted_a
            .iter()
            .map(|&i| labels_a[i])
            .chain(uncontracted_b.iter().map(|&j| labels_b[j]))
            .collect();

        let perm_c: Vec<usize> = if gemm_compatible {
            keep.iter()
                .filter_map(|k| output_labels.iter().position(|l| l == k))
                .collect()
        } else {
            (0..output_labels.len()).collect()
        };

        Self {
            contracted,
            gemm_compatible,
            permute_a: !is_identity_perm(&perm_a),
            permute_b: !is_identity_perm(&perm_b),
            permute_c: !is_identity_perm(&perm_c),
            uncontracted_a,
            uncontracted_b,
            dleft,
            dmid,
            dright,
            perm_a,
            perm_b,
            perm_c,
            output_labels,
        }
    }

    /// No permutation needed anywhere.
    pub fn is_simple_matmul(&self) -> bool {
        self.gemm_compatible && !self.permute_a && !self.permute_b && !self.permute_c
    }

    /// No summed labels.
    pub fn is_outer_product(&self) -> bool {
        self.contracted.is_empty()
    }

    /// Scalar result.
    pub fn is_full_contraction(&self) -> bool {
        self.uncontracted_a.is_empty() && self.uncontracted_b.is_empty()
    }
}
