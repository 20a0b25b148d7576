//! # lifecycle-core — Transition Rule Codec
//!
//! Encoder/decoder for the `<Transition>` element of a storage lifecycle
//! rule:
//!
//! ```xml
//! <Transition>
//!   <Days>30</Days>
//!   <StorageClass>GLACIER</StorageClass>
//! </Transition>
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Constrained primitives are newtypes.** [`TransitionDays`] and
//!    [`TransitionDate`] each expose `decode` / `encode` / `is_absent` over
//!    plain text, so their checks do not depend on the XML layer.
//!
//! 2. **Zero means absent.** A zero day count and an unset date are the
//!    "not provided" sentinels. Absent fields are omitted on encode.
//!
//! 3. **Decode, then validate.** Decoding rejects malformed fields; the
//!    Days/Date exclusivity and the storage-class requirement are checked
//!    only by [`Transition::validate`].
//!
//! 4. **Unset rules are invisible.** A [`Transition`] that was never decoded
//!    encodes to nothing and always validates.
//!
//! ## Crate Policy
//!
//! - No I/O, no async, no shared state.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod date;
pub mod days;
pub mod error;
pub mod transition;
mod xml;

pub use date::TransitionDate;
pub use days::TransitionDays;
pub use error::TransitionError;
pub use transition::{Transition, TRANSITION_ELEMENT};

// Parents driving their own reader need the same quick-xml types.
pub use quick_xml;
