//! Vendor status normalization.

use transcoding_common::Status;

/// Vendor status strings and their canonical meaning.
pub type StatusTable = &'static [(&'static str, Status)];

/// Map a vendor status onto the canonical enum.
///
/// Matching is exact. Anything not in `table` is [`Status::Failed`]: an
/// unrecognised state is never reported as progress.
pub fn normalize(table: StatusTable, vendor_status: &str) -> Status {
    table
        .iter()
        .find(|(native, _)| *native == vendor_status)
        .map(|(_, status)| *status)
        .unwrap_or(Status::Failed)
}
