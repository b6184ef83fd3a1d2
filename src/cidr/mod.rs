//! IPv4 address codec and range-to-CIDR decomposition.
//!
//! Both halves of this module are pure and side-effect free: the codec maps
//! dotted-decimal text to and from the `u32` representation used everywhere
//! else in the crate, and the decomposer turns an inclusive address range
//! into the minimal ordered list of aligned CIDR blocks covering it exactly.

mod codec;
mod decompose;

pub use codec::{ip_to_number, number_to_ip};
pub use decompose::{range_to_cidrs, CidrBlock};
