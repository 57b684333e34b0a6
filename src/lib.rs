//! Envault - push `.env` files into a password-manager vault, pull them back.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── push          # .env → vault item + .tpl template
//! │   ├── pull          # .tpl template → resolved .env
//! │   ├── completions   # Shell completions
//! │   ├── prompt        # Interactive confirmation
//! │   └── output        # Styled terminal output
//! └── core/             # Core library components
//!     ├── parse         # Order-preserving .env document model
//!     ├── header        # Strippable generated-file header framing
//!     ├── template      # ref:// template generation
//!     ├── sync          # Create-vs-update synchronization with field diff
//!     ├── provider/     # Provider client seam
//!     │   ├── mod       # ProviderClient trait + item/vault types
//!     │   └── op        # Subprocess implementation (provider CLI)
//!     └── update        # Best-effort new-version check
//! ```
//!
//! # Features
//!
//! - Structure-preserving round trips (comments, blank lines, ordering)
//! - In-place item updates with stable field identifiers
//! - `ref://{vault}/{item}/{field}` templates safe to commit to git
//! - All secret storage delegated to the provider's own CLI

pub mod cli;
pub mod core;
pub mod error;
