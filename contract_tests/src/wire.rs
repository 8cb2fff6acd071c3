//! Wire-format contract for the three bus message shapes
//!
//! These tests pin the serialized field and tag names. A failure here
//! means a peer built against the previous protocol stops understanding
//! us.
