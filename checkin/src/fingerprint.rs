//! Detection of one device or network address being used by several students.

use crate::types::PriorCheckIn;

/// Which identifiers of an attempt were already used by another student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceMatch {
    pub fingerprint: bool,
    pub ip_address: bool,
}

impl DeviceMatch {
    pub fn any(&self) -> bool {
        self.fingerprint || self.ip_address
    }

    /// Student-facing description of what was shared.
    pub fn describe(&self) -> &'static str {
        match (self.fingerprint, self.ip_address) {
            (true, true) => "Device and IP address match another student's check-in",
            (true, false) => "Device matches another student's check-in",
            (false, true) => "IP address matches another student's check-in",
            (false, false) => "",
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Compares an attempt's fingerprint and IP against records of other students.
///
/// Matching is exact and case-sensitive. Missing or blank values never match, so two
/// students whose browsers sent nothing are not linked to each other.
pub fn find_shared_device(
    student_id: i64,
    device_fingerprint: Option<&str>,
    ip_address: Option<&str>,
    prior: &[PriorCheckIn],
) -> DeviceMatch {
    let fingerprint = present(device_fingerprint);
    let ip = present(ip_address);

    let mut result = DeviceMatch::default();
    for record in prior.iter().filter(|r| r.student_id != student_id) {
        if let Some(fp) = fingerprint {
            if present(record.device_fingerprint.as_deref()) == Some(fp) {
                result.fingerprint = true;
            }
        }
        if let Some(ip) = ip {
            if present(record.ip_address.as_deref()) == Some(ip) {
                result.ip_address = true;
            }
        }
        if result.fingerprint && result.ip_address {
            break;
        }
    }
    result
}
