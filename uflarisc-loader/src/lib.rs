//! # UFLA-RISC Loader
//!
//! Parse binary program text (32-character binary literals plus `address`
//! placement directives) into a [`Program`]: a full instruction-store image
//! and the resolved execution start address.
//!
//! ## Example
//!
//! ```rust
//! use uflarisc_loader::load;
//!
//! let text = "address 4\n11111111111111111111111111111111\n";
//! let program = load(text).unwrap();
//! assert_eq!(program.start(), 4);
//! assert_eq!(program.word(4), Some(u32::MAX));
//! ```

pub mod error;
pub mod loader;

pub use error::{LoaderError, Result};
pub use loader::load;

// re-exported so loader callers can hand the artifact straight to the engine
pub use uflarisc_isa::Program;
