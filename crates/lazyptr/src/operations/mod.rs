//! Tensor operations.
//!
//! ```text
//! permutedims(view, perm)        # allocate output, validate
//!     → permutedims_into(dest, view, perm)
//!         → backend (GenericBackend)
//! ```

mod permutedims;

pub use permutedims::{permutedims, permutedims_into, validate_permutation};
pub(crate) use permutedims::is_identity_perm;
