//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_DOC_SYNTAX: &str = "doc.syntax";
pub const CHECK_SCHEMA_API_VERSION: &str = "schema.api_version";
pub const CHECK_SCHEMA_KIND: &str = "schema.kind";
pub const CHECK_SCHEMA_METADATA: &str = "schema.metadata";
pub const CHECK_CROSSREF_FOLDER_NAME: &str = "crossref.folder_name";
pub const CHECK_SPEC_REQUIRED_FIELDS: &str = "spec.required_fields";
pub const CHECK_SPEC_POINTS: &str = "spec.points";
pub const CHECK_SPEC_FLAG_ENCRYPTION: &str = "spec.flag_encryption";
pub const CHECK_SPEC_INSTANCE_GATED: &str = "spec.instance_gated";
pub const CHECK_SOPS_ENVELOPE: &str = "sops.envelope";

// Codes: doc.syntax
pub const CODE_INVALID_YAML: &str = "invalid_yaml";
pub const CODE_EMPTY_DOCUMENT: &str = "empty_document";

// Codes: schema.api_version / schema.kind
pub const CODE_API_VERSION_MISMATCH: &str = "api_version_mismatch";
pub const CODE_KIND_MISMATCH: &str = "kind_mismatch";

// Codes: schema.metadata
pub const CODE_MISSING_METADATA: &str = "missing_metadata";
pub const CODE_MISSING_NAME: &str = "missing_name";
pub const CODE_NAME_NOT_STRING: &str = "name_not_string";
pub const CODE_INVALID_NAME: &str = "invalid_name";
pub const CODE_WRONG_NAMESPACE: &str = "wrong_namespace";

// Codes: crossref.folder_name
pub const CODE_FOLDER_MISMATCH: &str = "folder_mismatch";

// Codes: spec.required_fields
pub const CODE_MISSING_SPEC: &str = "missing_spec";
pub const CODE_MISSING_REQUIRED_FIELD: &str = "missing_required_field";

// Codes: spec.points
pub const CODE_INVALID_POINTS: &str = "invalid_points";

// Codes: spec.flag_encryption
pub const CODE_FLAG_NOT_STRING: &str = "flag_not_string";
pub const CODE_UNENCRYPTED_FLAG: &str = "unencrypted_flag";

// Codes: spec.instance_gated
pub const CODE_MISSING_IMAGE: &str = "missing_image";
pub const CODE_INVALID_IMAGE: &str = "invalid_image";
pub const CODE_MISSING_PORT: &str = "missing_port";
pub const CODE_INVALID_PORT: &str = "invalid_port";

// Codes: sops.envelope
pub const CODE_MISSING_SOPS: &str = "missing_sops";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
