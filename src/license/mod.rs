//! License text handling.
//!
//! - [`normalizer`] — rejoins hard-wrapped lines so the text reflows in a
//!   Settings footer.

pub mod normalizer;
