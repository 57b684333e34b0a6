//! Constants used throughout envault.
//!
//! Centralizes magic strings shared between the parser, the header framing,
//! and the template codec.

/// Rule line that opens and closes a generated-file header block.
///
/// The parser and the pull command both recognize this exact line, so it
/// must never change between releases or old headers stop being stripped.
pub const HEADER_RULE: &str = "# ============================================================";

/// URI scheme used for template references.
pub const REF_SCHEME: &str = "ref";

/// Default provider CLI binary name.
pub const PROVIDER_BIN: &str = "op";

/// Environment variable overriding the provider binary (used by tests).
pub const PROVIDER_BIN_ENV: &str = "ENVAULT_PROVIDER_BIN";

/// Item category used for pushed items.
pub const ITEM_CATEGORY: &str = "Secure Note";

/// Extension of generated reference templates.
pub const TEMPLATE_EXT: &str = "tpl";
