//! Combat domain: boss behaviour modules.

pub(crate) mod boss;

pub use boss::BossController;
