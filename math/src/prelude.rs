pub use crate::{gf, gf_array, gf_vec};
pub use crate::{
    error::Gf256Error,
    gf256::{Gf256, FIELD_SIZE, GROUP_ORDER},
};
