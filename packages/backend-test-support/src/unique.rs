//! Unique test data, so tests sharing a database never collide.

use ulid::Ulid;

/// A fresh participant id shaped like the ones browsers generate.
///
/// ```
/// use backend_test_support::unique::participant_id;
///
/// let a = participant_id("p");
/// let b = participant_id("p");
/// assert_ne!(a, b);
/// assert!(a.starts_with("p-"));
/// ```
pub fn participant_id(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new().to_string().to_lowercase())
}
