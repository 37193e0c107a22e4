//! Random sources
//!
//! Every random draw in the game (dice, bug spawns, absences, bug detection)
//! goes through a [`RandomSource`] injected into the engine:
//! - [`RngManager`]: seedable xorshift64* generator used in play
//! - [`ScriptedRng`]: preset dice and outcomes for deterministic tests

mod scripted;
mod source;
mod xorshift;

pub use scripted::ScriptedRng;
pub use source::RandomSource;
pub use xorshift::RngManager;
