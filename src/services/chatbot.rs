// src/services/chatbot.rs
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::patterns::{
    Category, CategoryId, DEFAULT_REPLIES, general_categories, quick_option_categories,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    Exact,
    QuickOption,
    Contains,
    Fallback,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::QuickOption => "quickOption",
            MatchKind::Contains => "contains",
            MatchKind::Fallback => "fallback",
        }
    }
}

/// Which category an utterance lands in. Deterministic for a given input.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub category: Option<&'static Category>,
    pub kind: MatchKind,
}

impl Resolution {
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.map(|c| c.id)
    }

    fn candidates(&self) -> &'static [&'static str] {
        match self.category {
            Some(category) => category.replies,
            None => &DEFAULT_REPLIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub category: Option<CategoryId>,
    pub kind: MatchKind,
}

/// Resolve an utterance to a category.
///
/// Passes run in priority order and the first hit wins:
/// exact match on a general trigger, exact match on a quick option,
/// substring match on a general trigger, then the fallback set.
pub fn resolve_category(utterance: &str) -> Resolution {
    let lowered = utterance.to_lowercase();
    let exact = lowered.trim();

    for category in general_categories() {
        if category.triggers.iter().any(|t| *t == exact) {
            return Resolution { category: Some(category), kind: MatchKind::Exact };
        }
    }

    for category in quick_option_categories() {
        if category.triggers.iter().any(|t| *t == exact) {
            return Resolution { category: Some(category), kind: MatchKind::QuickOption };
        }
    }

    for category in general_categories() {
        if category.triggers.iter().any(|t| lowered.contains(t)) {
            return Resolution { category: Some(category), kind: MatchKind::Contains };
        }
    }

    Resolution { category: None, kind: MatchKind::Fallback }
}

/// Pick a reply using the given random source for the variant choice.
pub fn select_reply_with<R: Rng + ?Sized>(utterance: &str, rng: &mut R) -> Reply {
    let resolution = resolve_category(utterance);
    let candidates = resolution.candidates();
    // Every candidate list is a non-empty static literal.
    let text = candidates.choose(rng).copied().unwrap_or(DEFAULT_REPLIES[0]);

    Reply {
        text: text.to_string(),
        category: resolution.category_id(),
        kind: resolution.kind,
    }
}

pub fn select_reply(utterance: &str) -> String {
    select_reply_with(utterance, &mut rand::thread_rng()).text
}
