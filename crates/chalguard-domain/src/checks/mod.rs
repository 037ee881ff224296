use crate::model::ChallengeDoc;
use chalguard_types::Finding;

mod api_version;
mod flag_encryption;
mod folder_name;
mod instance_gated;
mod kind;
mod metadata;
mod points;
mod sops_envelope;
mod spec_required;
pub(crate) mod utils;

#[cfg(test)]
mod tests;

/// Run every check against the document, in declaration order.
///
/// The order is part of the report contract: findings are never re-sorted,
/// so two runs on the same tree produce identical output. No check
/// short-circuits another; errors accumulate.
pub fn run_all(doc: &ChallengeDoc, out: &mut Vec<Finding>) {
    api_version::run(doc, out);
    kind::run(doc, out);
    metadata::run(doc, out);
    folder_name::run(doc, out);
    spec_required::run(doc, out);
    points::run(doc, out);
    flag_encryption::run(doc, out);
    instance_gated::run(doc, out);
    sops_envelope::run(doc, out);
}
