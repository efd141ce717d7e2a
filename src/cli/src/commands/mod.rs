//! Subcommands of the `mailvault` binary.

pub mod can_create;
pub mod guard;
pub mod matrix;
pub mod menu;
pub mod role;
pub mod sub_types;

/// Outcome of a command that answers an access question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied,
}

impl From<bool> for Verdict {
    fn from(allowed: bool) -> Self {
        if allowed {
            Verdict::Allowed
        } else {
            Verdict::Denied
        }
    }
}
