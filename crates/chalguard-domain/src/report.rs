use chalguard_types::{ChalguardData, DocumentReport, Verdict};

/// Result of evaluating every discovered document.
///
/// Documents stay in the order they were supplied (discovery order) and each
/// document's findings stay in check declaration order.
#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub documents: Vec<DocumentReport>,
    pub data: ChalguardData,
}
