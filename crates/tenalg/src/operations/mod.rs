//! Operations on tensors.

mod contract;
mod convolution;
mod elementwise;
mod interpolation;
mod outer;

pub use contract::{contracted, trace_axes};
pub use convolution::{convolve, convolve_inplace, get_border, BorderMode};
pub use elementwise::{
    add, add_assign, apply, apply_binary, apply_binary_inplace, apply_inplace, conj, hadamard,
    hadamard_assign, neg, neg_inplace, norm, norm_sqr, scale, scale_div, scale_div_inplace,
    scale_inplace, sub, sub_assign,
};
pub use interpolation::{resample, resample_into, Interpolation};
pub use outer::{outer, outer_into};
