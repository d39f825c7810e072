//! Shared utility helpers.

pub mod error;
pub(crate) mod extrema;
pub(crate) mod reserve;

pub use error::{PixHomError, PixHomResult};
pub use extrema::{argmin_argmax, Extrema};
