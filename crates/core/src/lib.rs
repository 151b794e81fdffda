//! Booster assembly. Keep this crate free of IO: card lookups go through
//! [`CardSource`] and all randomness through [`RngState`].

pub mod bonus;
pub mod card;
pub mod config;
pub mod hooks;
pub mod pack;
pub mod query;
pub mod rng;
pub mod select;
pub mod source;

#[cfg(test)]
mod test_support;

pub use bonus::*;
pub use card::*;
pub use config::*;
pub use hooks::{
    parse_params, prefer_present, BreakingNewsHook, HookContext, HookFactory, HookOutcome,
    HookParamsError, HookRegistry, LurkingVariantHook, PackHook, Slot, SpecialsHook,
    UncommonSpecialsHook,
};
pub use pack::*;
pub use query::*;
pub use rng::*;
pub use select::*;
pub use source::*;
