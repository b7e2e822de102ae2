//! Chat widget controller.
//!
//! The widget is a pure reducer: [`WidgetState::handle`] takes the current
//! state, one event and the time since mount, and returns the next state plus
//! the side effects the host must perform (network calls, flag writes).
//! Timers are modelled as deadlines checked on [`WidgetEvent::Tick`], so a
//! test can drive the clock by hand.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::services::follow_ups::{FollowUpSet, suggest_follow_ups};
use crate::services::history_store::{ChatExchange, Sender};

pub const GREETING: &str = "Hi there! I'm your shopping assistant. How can I help you today?";

pub const APOLOGY: &str = "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Menu labels; lower-cased they equal the quick-option triggers.
pub const QUICK_OPTIONS: [&str; 4] = [
    "Track my order",
    "Shipping information",
    "Payment methods",
    "Return policy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTimings {
    pub follow_up_delay: Duration,
    pub tooltip_delay: Duration,
    pub tooltip_duration: Duration,
}

impl Default for WidgetTimings {
    fn default() -> Self {
        Self {
            follow_up_delay: Duration::from_millis(1000),
            tooltip_delay: Duration::from_millis(3000),
            tooltip_duration: Duration::from_millis(8000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Greeted,
    Active,
    ActiveWithFollowUps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tooltip {
    Pending,
    Visible { hide_at: Duration },
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Open,
    Close,
    Send(String),
    /// Reply to the request with this id.
    ReplyReceived { request: u64, text: String },
    ReplyFailed { request: u64 },
    HistoryLoaded(Vec<ChatExchange>),
    Reset,
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEffect {
    SendMessage { request: u64, text: String },
    FetchHistory,
    MarkTooltipSeen,
}

#[derive(Debug, Clone)]
pub struct WidgetState {
    timings: WidgetTimings,
    authenticated: bool,
    mounted_at: DateTime<Utc>,
    open: bool,
    phase: Phase,
    exchanges: Vec<ChatExchange>,
    quick_options_visible: bool,
    pending_request: Option<u64>,
    next_request: u64,
    history_requested: bool,
    follow_ups: Option<FollowUpSet>,
    follow_ups_reveal_at: Option<Duration>,
    follow_ups_visible: bool,
    badge_visible: bool,
    tooltip: Tooltip,
}

impl WidgetState {
    /// `tooltip_seen` is the persisted per-browser flag.
    pub fn mount(authenticated: bool, tooltip_seen: bool, timings: WidgetTimings) -> Self {
        Self::mount_at(authenticated, tooltip_seen, timings, Utc::now())
    }

    pub fn mount_at(
        authenticated: bool,
        tooltip_seen: bool,
        timings: WidgetTimings,
        mounted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            timings,
            authenticated,
            mounted_at,
            open: false,
            phase: Phase::Empty,
            exchanges: Vec::new(),
            quick_options_visible: false,
            pending_request: None,
            next_request: 0,
            history_requested: false,
            follow_ups: None,
            follow_ups_reveal_at: None,
            follow_ups_visible: false,
            badge_visible: true,
            tooltip: if tooltip_seen { Tooltip::Done } else { Tooltip::Pending },
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    pub fn quick_options_visible(&self) -> bool {
        self.quick_options_visible
    }

    /// Typing indicator; also means input is disabled.
    pub fn awaiting_reply(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn visible_follow_ups(&self) -> Option<&FollowUpSet> {
        self.follow_ups.as_ref().filter(|_| self.follow_ups_visible)
    }

    pub fn badge_visible(&self) -> bool {
        self.badge_visible
    }

    pub fn tooltip_visible(&self) -> bool {
        matches!(self.tooltip, Tooltip::Visible { .. })
    }

    pub fn handle(mut self, event: WidgetEvent, now: Duration) -> (Self, Vec<WidgetEffect>) {
        let mut effects = Vec::new();
        match event {
            WidgetEvent::Open => self.on_open(now, &mut effects),
            WidgetEvent::Close => self.open = false,
            WidgetEvent::Send(text) => self.on_send(text, now, &mut effects),
            WidgetEvent::ReplyReceived { request, text } => self.on_reply(request, text, now),
            WidgetEvent::ReplyFailed { request } => {
                if self.pending_request == Some(request) {
                    self.pending_request = None;
                    self.push(Sender::Bot, APOLOGY, now);
                }
            }
            WidgetEvent::HistoryLoaded(history) => self.on_history(history),
            WidgetEvent::Reset => self.on_reset(now),
            WidgetEvent::Tick => {}
        }
        self.run_timers(now, &mut effects);
        (self, effects)
    }

    fn timestamp(&self, now: Duration) -> DateTime<Utc> {
        chrono::Duration::from_std(now)
            .ok()
            .and_then(|d| self.mounted_at.checked_add_signed(d))
            .unwrap_or(self.mounted_at)
    }

    fn push(&mut self, sender: Sender, text: impl Into<String>, now: Duration) {
        let timestamp = self.timestamp(now);
        self.exchanges.push(ChatExchange::new(sender, text, timestamp));
    }

    fn greet(&mut self, now: Duration) {
        self.push(Sender::Bot, GREETING, now);
        self.quick_options_visible = true;
        self.phase = Phase::Greeted;
    }

    fn hide_follow_ups(&mut self) {
        self.follow_ups = None;
        self.follow_ups_reveal_at = None;
        self.follow_ups_visible = false;
    }

    fn on_open(&mut self, now: Duration, effects: &mut Vec<WidgetEffect>) {
        self.open = true;
        self.badge_visible = false;
        if self.tooltip != Tooltip::Done {
            self.tooltip = Tooltip::Done;
            effects.push(WidgetEffect::MarkTooltipSeen);
        }
        if self.phase == Phase::Empty {
            self.greet(now);
            if self.authenticated {
                self.history_requested = true;
                effects.push(WidgetEffect::FetchHistory);
            }
        }
    }

    fn on_send(&mut self, text: String, now: Duration, effects: &mut Vec<WidgetEffect>) {
        let text = text.trim();
        if self.pending_request.is_some() || text.is_empty() {
            return;
        }
        if self.phase == Phase::Empty {
            self.greet(now);
        }
        self.quick_options_visible = false;
        self.hide_follow_ups();
        self.push(Sender::User, text, now);
        let request = self.next_request;
        self.next_request += 1;
        self.pending_request = Some(request);
        self.phase = Phase::Active;
        effects.push(WidgetEffect::SendMessage { request, text: text.to_string() });
    }

    // Replies to anything but the pending request (e.g. one sent before a reset) are dropped.
    fn on_reply(&mut self, request: u64, text: String, now: Duration) {
        if self.pending_request != Some(request) {
            return;
        }
        self.pending_request = None;
        self.follow_ups = Some(suggest_follow_ups(&text));
        self.follow_ups_reveal_at = Some(now + self.timings.follow_up_delay);
        self.follow_ups_visible = false;
        self.push(Sender::Bot, text, now);
    }

    // Stored history arrives newest first; shown oldest first ahead of this visit's messages.
    fn on_history(&mut self, mut history: Vec<ChatExchange>) {
        if !self.history_requested {
            return;
        }
        self.history_requested = false;
        if history.is_empty() {
            return;
        }
        history.reverse();
        history.append(&mut self.exchanges);
        self.exchanges = history;
    }

    fn on_reset(&mut self, now: Duration) {
        self.exchanges.clear();
        self.hide_follow_ups();
        self.pending_request = None;
        self.history_requested = false;
        self.greet(now);
    }

    fn run_timers(&mut self, now: Duration, effects: &mut Vec<WidgetEffect>) {
        if let Some(at) = self.follow_ups_reveal_at {
            if now >= at {
                self.follow_ups_reveal_at = None;
                self.follow_ups_visible = true;
                self.phase = Phase::ActiveWithFollowUps;
            }
        }

        match self.tooltip {
            Tooltip::Pending if !self.open && now >= self.timings.tooltip_delay => {
                self.tooltip = Tooltip::Visible { hide_at: now + self.timings.tooltip_duration };
            }
            Tooltip::Visible { hide_at } if now >= hide_at => {
                self.tooltip = Tooltip::Done;
                effects.push(WidgetEffect::MarkTooltipSeen);
            }
            _ => {}
        }
    }
}
