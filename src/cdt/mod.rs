//! Connector Descriptor Table (§4.1 of SPEC_FULL.md).
//!
//! Interns connector strings into canonical [`ConnectorDescriptor`]s with
//! precomputed match keys (`uc_num`, packed lowercase subscript) and a
//! per-type length limit.

mod descriptor;
mod table;

pub use descriptor::{ConnectorDescriptor, DescriptorId, LengthLimit, LC_BITS};
pub(crate) use descriptor::lc_letter_at;
pub use table::ConnectorTable;
