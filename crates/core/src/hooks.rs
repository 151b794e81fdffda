use crate::{fetch_card, Card, CardQuery, CardSource, HookDecl, RngState, SelectError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

mod breaking_news;
mod lurking;
mod specials;
mod uncommon_specials;

pub use breaking_news::{BreakingNewsHook, BreakingNewsParams};
pub use lurking::{LurkingNumbers, LurkingParams, LurkingVariantHook};
pub use specials::{SpecialItem, SpecialsHook, SpecialsParams};
pub use uncommon_specials::{UncommonSpecialsHook, UncommonSpecialsParams};

/// Pack position a hook is consulted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Common,
    Uncommon,
    Rare,
    Wildcard,
    Post,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare_slot",
            Self::Wildcard => "wildcard",
            Self::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    NoEffect,
    Card(Card),
    Cards(Vec<Card>),
}

impl HookOutcome {
    pub fn from_card(card: Option<Card>) -> Self {
        card.map_or(Self::NoEffect, Self::Card)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        if cards.is_empty() {
            Self::NoEffect
        } else {
            Self::Cards(cards)
        }
    }
}

/// What a hook sees of the running pack build.
pub struct HookContext<'a> {
    pub product: &'a str,
    pub rng: &'a mut RngState,
    pub source: &'a mut dyn CardSource,
}

impl HookContext<'_> {
    pub fn fetch(&mut self, query: impl Into<CardQuery>) -> Option<Card> {
        fetch_card(&mut *self.source, &query.into())
    }
}

/// Product-specific extension point. Implementations check the active
/// product and slot themselves and answer [`HookOutcome::NoEffect`] when
/// they do not apply.
pub trait PackHook {
    fn name(&self) -> &'static str;
    fn evaluate(&self, slot: Slot, ctx: &mut HookContext<'_>) -> Result<HookOutcome, SelectError>;
}

pub type HookFactory = fn(&serde_json::Value) -> Result<Box<dyn PackHook>, serde_json::Error>;

#[derive(Debug, Error)]
#[error("invalid params for hook {name}: {source}")]
pub struct HookParamsError {
    pub name: String,
    #[source]
    pub source: serde_json::Error,
}

pub struct HookRegistry {
    factories: HashMap<&'static str, HookFactory>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(LurkingVariantHook::NAME, LurkingVariantHook::build);
        registry.register(BreakingNewsHook::NAME, BreakingNewsHook::build);
        registry.register(SpecialsHook::NAME, SpecialsHook::build);
        registry.register(UncommonSpecialsHook::NAME, UncommonSpecialsHook::build);
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: HookFactory) {
        self.factories.insert(name, factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Binds declared hooks to their parameters, in declaration order.
    /// Names nobody registered are skipped.
    pub fn resolve(&self, decls: &[HookDecl]) -> Result<Vec<Box<dyn PackHook>>, HookParamsError> {
        let mut hooks = Vec::with_capacity(decls.len());
        for decl in decls {
            let Some(factory) = self.factories.get(decl.name.as_str()) else {
                debug!(hook = %decl.name, "ignoring unknown hook");
                continue;
            };
            let hook = factory(&decl.params).map_err(|source| HookParamsError {
                name: decl.name.clone(),
                source,
            })?;
            hooks.push(hook);
        }
        Ok(hooks)
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}

/// Parses a hook's parameter bundle; a missing bundle means defaults.
pub fn parse_params<P: DeserializeOwned + Default>(
    params: &serde_json::Value,
) -> Result<P, serde_json::Error> {
    if params.is_null() {
        Ok(P::default())
    } else {
        serde_json::from_value(params.clone())
    }
}

/// Replace-if-present: a card outcome overrides the running choice, absence
/// keeps it. List outcomes only make sense after the pack is built.
pub fn prefer_present(current: Option<Card>, outcome: HookOutcome, slot: Slot) -> Option<Card> {
    match outcome {
        HookOutcome::Card(card) => Some(card),
        HookOutcome::NoEffect => current,
        HookOutcome::Cards(cards) => {
            warn!(slot = slot.label(), count = cards.len(), "list outcome ignored at card slot");
            current
        }
    }
}

/// Runs every hook at a card slot; the last present result wins.
pub(crate) fn resolve_slot(
    hooks: &[Box<dyn PackHook>],
    slot: Slot,
    ctx: &mut HookContext<'_>,
    initial: Option<Card>,
) -> Result<Option<Card>, SelectError> {
    let mut chosen = initial;
    for hook in hooks {
        let outcome = hook.evaluate(slot, ctx)?;
        if !matches!(outcome, HookOutcome::NoEffect) {
            debug!(hook = hook.name(), slot = slot.label(), "hook produced a card");
        }
        chosen = prefer_present(chosen, outcome, slot);
    }
    Ok(chosen)
}

/// Runs every hook after the pack is built and flattens what they add.
pub(crate) fn collect_extras(
    hooks: &[Box<dyn PackHook>],
    ctx: &mut HookContext<'_>,
) -> Result<Vec<Card>, SelectError> {
    let mut extras = Vec::new();
    for hook in hooks {
        match hook.evaluate(Slot::Post, ctx)? {
            HookOutcome::NoEffect => {}
            HookOutcome::Card(card) => extras.push(card),
            HookOutcome::Cards(cards) => extras.extend(cards),
        }
    }
    Ok(extras)
}
