//! Multi-operand label contraction.
//!
//! `einsum` accepts any number of labelled operands plus an output label
//! order, sums every label not in the output and returns the free labels in
//! the declared order. Internally it contracts pairwise, greedily picking the
//! pair whose intermediate result is smallest, so a caller only supplies
//! labels and never a contraction path.

use tracing::debug;

use crate::backend::faer_par;
use crate::contract::{
    ContractBackend, ContractOptions, check_keep, contract, contract_gemm, label_sizes, size_of,
};
use crate::error::TensorError;
use crate::labels::Label;
use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorView};

/// Operand still waiting to be contracted.
enum Work<'a, T: Scalar> {
    Borrowed(TensorView<'a, T>),
    Owned(Tensor<T>),
}

impl<T: Scalar> Work<'_, T> {
    fn view(&self) -> TensorView<'_, T> {
        match self {
            Work::Borrowed(v) => *v,
            Work::Owned(t) => t.view(),
        }
    }
}

/// Contract labelled operands into the `output` label order.
///
/// # Errors
///
/// * `WrongNumberOfIndices` if a label list doesn't match its operand's rank;
/// * `InvalidLabels` for no operands, a label repeated on one operand, or an
///   output label missing from every operand;
/// * `ShapeMismatch` if one label spans axes of different sizes;
/// * `ArithmeticFailure` if `options.check_finite` and an operand or the
///   result holds a non-finite value.
///
/// # Example
///
/// ```
/// use lazyptr::Tensor;
/// use lazyptr::contract::{ContractOptions, einsum};
///
/// // y[i] = sum_jk a[i,j] b[j,k] v[k]
/// let a = Tensor::<f64>::ones(&[2, 3]);
/// let b = Tensor::<f64>::ones(&[3, 4]);
/// let v = Tensor::<f64>::ones(&[4]);
///
/// let y = einsum(
///     &[(a.view(), &[0, 1][..]), (b.view(), &[1, 2][..]), (v.view(), &[2][..])],
///     &[0],
///     &ContractOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(y.data(), &[12.0, 12.0]);
/// ```
pub fn einsum<T: Scalar>(
    operands: &[(TensorView<'_, T>, &[Label])],
    output: &[Label],
    options: &ContractOptions,
) -> Result<Tensor<T>, TensorError> {
    if operands.is_empty() {
        return Err(TensorError::InvalidLabels {
            message: "einsum needs at least one operand".to_string(),
        });
    }

    let shapes: Vec<(&[Label], &[usize])> = operands.iter().map(|(t, l)| (*l, t.shape())).collect();
    let sizes = label_sizes(&shapes)?;
    check_keep(output, &sizes)?;

    if options.check_finite {
        for (i, (tensor, _)) in operands.iter().enumerate() {
            check_finite(tensor.data(), &format!("operand {i}"))?;
        }
    }

    let mut work: Vec<(Work<'_, T>, Vec<Label>)> = operands
        .iter()
        .map(|(t, l)| (Work::Borrowed(*t), l.to_vec()))
        .collect();
    if work.len() == 1 {
        // Reduce a lone operand against a rank-0 unit.
        work.push((Work::Owned(Tensor::scalar(T::one())), Vec::new()));
    }

    while work.len() > 1 {
        let (i, j, keep) = pick_pair(&work, output, &sizes);
        debug!(
            left = i,
            right = j,
            remaining = work.len(),
            intermediate = intermediate_size(&keep, &sizes),
            "einsum pairwise step"
        );

        let result = {
            let (left, left_labels) = &work[i];
            let (right, right_labels) = &work[j];
            contract_pair(
                &left.view(),
                left_labels,
                &right.view(),
                right_labels,
                &keep,
                options,
            )?
        };

        work.remove(j);
        work.remove(i);
        work.push((Work::Owned(result), keep));
    }

    let result = match work.pop() {
        Some((Work::Owned(t), _)) => t,
        Some((Work::Borrowed(v), _)) => v.to_tensor(),
        None => unreachable!("einsum always leaves one operand"),
    };

    if options.check_finite {
        check_finite(result.data(), "contraction result")?;
    }
    Ok(result)
}

/// Choose the next pair (i < j) and the labels its result must keep.
fn pick_pair<T: Scalar>(
    work: &[(Work<'_, T>, Vec<Label>)],
    output: &[Label],
    sizes: &[(Label, usize)],
) -> (usize, usize, Vec<Label>) {
    if work.len() == 2 {
        return (0, 1, output.to_vec());
    }

    let mut best: Option<(usize, usize, Vec<Label>, usize)> = None;
    for i in 0..work.len() {
        for j in (i + 1)..work.len() {
            let keep = surviving_labels(work, i, j, output);
            let size = intermediate_size(&keep, sizes);
            if best.as_ref().is_none_or(|(_, _, _, s)| size < *s) {
                best = Some((i, j, keep, size));
            }
        }
    }
    match best {
        Some((i, j, keep, _)) => (i, j, keep),
        None => (0, 1, output.to_vec()),
    }
}

/// Labels of operands `i` and `j` still needed by the output or other operands.
fn surviving_labels<T: Scalar>(
    work: &[(Work<'_, T>, Vec<Label>)],
    i: usize,
    j: usize,
    output: &[Label],
) -> Vec<Label> {
    let needed = |label: &Label| {
        output.contains(label)
            || work
                .iter()
                .enumerate()
                .any(|(k, (_, labels))| k != i && k != j && labels.contains(label))
    };

    let mut keep: Vec<Label> = Vec::new();
    for label in work[i].1.iter().chain(work[j].1.iter()) {
        if !keep.contains(label) && needed(label) {
            keep.push(*label);
        }
    }
    keep
}

fn intermediate_size(labels: &[Label], sizes: &[(Label, usize)]) -> usize {
    labels
        .iter()
        .fold(1usize, |acc, &l| acc.saturating_mul(size_of(sizes, l)))
}

fn contract_pair<T: Scalar>(
    a: &TensorView<'_, T>,
    labels_a: &[Label],
    b: &TensorView<'_, T>,
    labels_b: &[Label],
    keep: &[Label],
    options: &ContractOptions,
) -> Result<Tensor<T>, TensorError> {
    match options.backend {
        ContractBackend::Naive => contract(a, labels_a, b, labels_b, keep),
        ContractBackend::Gemm => contract_gemm(
            a,
            labels_a,
            b,
            labels_b,
            keep,
            faer_par(options.parallelism),
        ),
    }
}

fn check_finite<T: Scalar>(data: &[T], what: &str) -> Result<(), TensorError> {
    match data.iter().position(|x| !x.is_finite_value()) {
        Some(pos) => Err(TensorError::ArithmeticFailure {
            message: format!("{what} holds a non-finite value at offset {pos}"),
        }),
        None => Ok(()),
    }
}
