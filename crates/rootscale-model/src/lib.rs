#![forbid(unsafe_code)]
//! rootscale model SSOT.
//!
//! Records, derived groups, slugs and the √2 computation. Nothing here does
//! I/O; the store and server crates build on these types.

mod compute;
mod dimension;
mod group;
mod order;

pub use compute::{parse_number, scale_by_sqrt2, SQRT_2};
pub use dimension::{coerce_name, coerce_value, round2, DimensionRecord, DEFAULT_GROUP};
pub use group::{
    group_slug, groups_in_order, normalize_group, sorted_groups, OpenGroups, NEW_GROUP_SENTINEL,
};
pub use order::{validate_permutation, ValidationError};

pub const CRATE_NAME: &str = "rootscale-model";
