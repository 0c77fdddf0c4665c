//! Panic payload formatting.

use std::any::Any;

/// Formats a panic payload into a readable message.
///
/// String payloads are returned as-is; anything else is rendered with its
/// `Debug` form.
///
/// # Examples
///
/// ```
/// use bdd_runner::panic_message;
/// use std::any::Any;
///
/// let payload: Box<dyn Any + Send> = Box::new(String::from("boom"));
/// assert_eq!(panic_message(payload.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| format!("{payload:?}"))
}
