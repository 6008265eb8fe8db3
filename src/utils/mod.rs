//! Shared helpers for input validation.

#[cfg(test)]
pub(crate) mod test_server;
pub mod validation;
