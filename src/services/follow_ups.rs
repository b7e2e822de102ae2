// src/services/follow_ups.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowUpGroup {
    Order,
    Return,
    Payment,
    Shipping,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpSet {
    pub source_reply: String,
    pub group: FollowUpGroup,
    pub questions: [String; 3],
}

// Checked in order; the first group with a keyword in the reply wins.
const RULES: [(&[&str], FollowUpGroup); 4] = [
    (&["order", "track"], FollowUpGroup::Order),
    (&["return", "refund"], FollowUpGroup::Return),
    (&["payment", "pay"], FollowUpGroup::Payment),
    (&["shipping"], FollowUpGroup::Shipping),
];

impl FollowUpGroup {
    pub fn questions(&self) -> [&'static str; 3] {
        match self {
            FollowUpGroup::Order => [
                "How long does shipping take?",
                "Can I change my delivery address?",
                "What if my package is late?",
            ],
            FollowUpGroup::Return => [
                "How long do refunds take?",
                "Do I have to pay for return shipping?",
                "Can I exchange an item instead?",
            ],
            FollowUpGroup::Payment => [
                "Is my payment information secure?",
                "Can I pay in installments?",
                "Do you accept gift cards?",
            ],
            FollowUpGroup::Shipping => [
                "Do you ship internationally?",
                "How much does express shipping cost?",
                "How can I track my package?",
            ],
            FollowUpGroup::General => [
                "How do I track my order?",
                "What is your return policy?",
                "What payment methods do you accept?",
            ],
        }
    }
}

pub fn classify_reply(reply: &str) -> FollowUpGroup {
    let lowered = reply.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, group)| *group)
        .unwrap_or(FollowUpGroup::General)
}

/// Derive three follow-up questions from the bot's own reply text.
pub fn suggest_follow_ups(reply: &str) -> FollowUpSet {
    let group = classify_reply(reply);
    FollowUpSet {
        source_reply: reply.to_string(),
        group,
        questions: group.questions().map(str::to_string),
    }
}
