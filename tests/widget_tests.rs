use std::time::Duration;

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use shopbot_backend::services::chatbot::{MatchKind, resolve_category};
use shopbot_backend::services::follow_ups::FollowUpGroup;
use shopbot_backend::services::history_store::{ChatExchange, Sender};
use shopbot_backend::services::patterns::TRACK_ORDER_REPLY;
use shopbot_backend::widget::{
    APOLOGY, GREETING, Phase, QUICK_OPTIONS, WidgetEffect, WidgetEvent, WidgetState, WidgetTimings,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn mounted() -> WidgetState {
    WidgetState::mount(false, true, WidgetTimings::default())
}

#[test]
fn first_open_seeds_one_greeting_and_menu() {
    let (state, effects) = mounted().handle(WidgetEvent::Open, ms(0));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Greeted);
    assert_eq!(state.exchanges().len(), 1);
    assert_eq!(state.exchanges()[0].sender, Sender::Bot);
    assert_eq!(state.exchanges()[0].text, GREETING);
    assert!(state.quick_options_visible());

    // Closing and reopening keeps the conversation.
    let (state, _) = state.handle(WidgetEvent::Close, ms(10));
    assert!(!state.is_open());
    let (state, _) = state.handle(WidgetEvent::Open, ms(20));
    assert!(state.is_open());
    assert_eq!(state.exchanges().len(), 1);
}

#[test]
fn follow_ups_appear_only_after_the_delay() {
    let (state, _) = mounted().handle(WidgetEvent::Open, ms(0));
    let (state, effects) = state.handle(WidgetEvent::Send("Track my order".into()), ms(100));
    assert_eq!(effects, vec![WidgetEffect::SendMessage { request: 0, text: "Track my order".into() }]);
    assert!(!state.quick_options_visible());
    assert!(state.awaiting_reply());

    let (state, _) = state.handle(WidgetEvent::ReplyReceived { request: 0, text: TRACK_ORDER_REPLY.into() }, ms(500));
    assert!(!state.awaiting_reply());
    assert_eq!(state.exchanges().last().unwrap().text, TRACK_ORDER_REPLY);
    assert!(state.visible_follow_ups().is_none());
    assert_eq!(state.phase(), Phase::Active);

    let (state, _) = state.handle(WidgetEvent::Tick, ms(1499));
    assert!(state.visible_follow_ups().is_none());

    let (state, _) = state.handle(WidgetEvent::Tick, ms(1500));
    let follow_ups = state.visible_follow_ups().unwrap();
    assert_eq!(follow_ups.group, FollowUpGroup::Order);
    assert_eq!(state.phase(), Phase::ActiveWithFollowUps);

    // The next message hides the chips again.
    let (state, _) = state.handle(WidgetEvent::Send("What if my package is late?".into()), ms(2000));
    assert!(state.visible_follow_ups().is_none());
    assert_eq!(state.phase(), Phase::Active);
}

#[test]
fn only_one_reply_is_awaited_at_a_time() {
    let (state, _) = mounted().handle(WidgetEvent::Open, ms(0));
    let (state, _) = state.handle(WidgetEvent::Send("hello".into()), ms(10));
    let (state, effects) = state.handle(WidgetEvent::Send("anyone there?".into()), ms(20));
    assert!(effects.is_empty());
    assert_eq!(state.exchanges().len(), 2);

    let (state, effects) = state.handle(WidgetEvent::Send("   ".into()), ms(30));
    assert!(effects.is_empty());
    assert!(state.awaiting_reply());
}

#[test]
fn network_failure_appends_one_apology() {
    let (state, _) = mounted().handle(WidgetEvent::Open, ms(0));
    let (state, _) = state.handle(WidgetEvent::Send("hello".into()), ms(10));
    let (state, effects) = state.handle(WidgetEvent::ReplyFailed { request: 0 }, ms(5000));
    assert!(effects.is_empty());
    assert!(!state.awaiting_reply());
    assert_eq!(state.exchanges().last().unwrap().text, APOLOGY);

    // A second failure without a pending send changes nothing.
    let (state, _) = state.handle(WidgetEvent::ReplyFailed { request: 0 }, ms(6000));
    assert_eq!(state.exchanges().len(), 3);
}

#[test]
fn reset_returns_to_greeted() {
    let (state, _) = mounted().handle(WidgetEvent::Open, ms(0));
    let (state, _) = state.handle(WidgetEvent::Send("hello".into()), ms(10));
    let (state, _) = state.handle(WidgetEvent::ReplyReceived { request: 0, text: "Hi there!".into() }, ms(20));
    let (state, _) = state.handle(WidgetEvent::Reset, ms(30));
    assert_eq!(state.phase(), Phase::Greeted);
    assert_eq!(state.exchanges().len(), 1);
    assert!(state.quick_options_visible());

    // The pending follow-up reveal is cancelled too.
    let (state, _) = state.handle(WidgetEvent::Tick, ms(5000));
    assert!(state.visible_follow_ups().is_none());
}

#[test]
fn tooltip_shows_once_and_sets_the_flag() {
    let state = WidgetState::mount(false, false, WidgetTimings::default());
    let (state, _) = state.handle(WidgetEvent::Tick, ms(2999));
    assert!(!state.tooltip_visible());

    let (state, effects) = state.handle(WidgetEvent::Tick, ms(3000));
    assert!(state.tooltip_visible());
    assert!(effects.is_empty());

    let (state, _) = state.handle(WidgetEvent::Tick, ms(10_999));
    assert!(state.tooltip_visible());

    let (state, effects) = state.handle(WidgetEvent::Tick, ms(11_000));
    assert!(!state.tooltip_visible());
    assert_eq!(effects, vec![WidgetEffect::MarkTooltipSeen]);

    let (state, effects) = state.handle(WidgetEvent::Tick, ms(60_000));
    assert!(!state.tooltip_visible());
    assert!(effects.is_empty());
}

#[test]
fn tooltip_never_shows_when_already_seen_or_open() {
    let (state, _) = mounted().handle(WidgetEvent::Tick, ms(4000));
    assert!(!state.tooltip_visible());

    let state = WidgetState::mount(false, false, WidgetTimings::default());
    let (state, effects) = state.handle(WidgetEvent::Open, ms(100));
    assert_eq!(effects, vec![WidgetEffect::MarkTooltipSeen]);
    let (state, _) = state.handle(WidgetEvent::Close, ms(200));
    let (state, _) = state.handle(WidgetEvent::Tick, ms(4000));
    assert!(!state.tooltip_visible());
}

#[test]
fn badge_clears_on_first_open() {
    let state = mounted();
    assert!(state.badge_visible());
    let (state, _) = state.handle(WidgetEvent::Open, ms(0));
    let (state, _) = state.handle(WidgetEvent::Close, ms(1));
    assert!(!state.badge_visible());
}

#[test]
fn authenticated_open_resumes_history() {
    let state = WidgetState::mount(true, true, WidgetTimings::default());
    let (state, effects) = state.handle(WidgetEvent::Open, ms(0));
    assert_eq!(effects, vec![WidgetEffect::FetchHistory]);

    let now = Utc::now();
    let history = vec![
        ChatExchange::new(Sender::Bot, "older reply", now),
        ChatExchange::new(Sender::User, "older question", now),
    ];
    let (state, _) = state.handle(WidgetEvent::HistoryLoaded(history), ms(50));
    let texts: Vec<_> = state.exchanges().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["older question", "older reply", GREETING]);
}

#[test]
fn exchanges_are_stamped_relative_to_mount() {
    let mounted_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let state = WidgetState::mount_at(false, true, WidgetTimings::default(), mounted_at);
    let (state, _) = state.handle(WidgetEvent::Open, ms(0));
    let (state, _) = state.handle(WidgetEvent::Send("hello".into()), ms(2500));
    assert_eq!(state.exchanges()[0].timestamp, mounted_at);
    assert_eq!(state.exchanges()[1].timestamp, mounted_at + ChronoDuration::milliseconds(2500));
}

#[test]
fn quick_option_labels_hit_the_quick_option_pass() {
    for label in QUICK_OPTIONS {
        assert_eq!(resolve_category(label).kind, MatchKind::QuickOption, "label {:?}", label);
    }
}

#[test]
fn reply_from_before_a_reset_is_dropped() {
    let (state, _) = mounted().handle(WidgetEvent::Open, ms(0));
    let (state, _) = state.handle(WidgetEvent::Send("track my order".into()), ms(10));
    let (state, _) = state.handle(WidgetEvent::Reset, ms(20));
    assert!(!state.awaiting_reply());

    let (state, effects) = state.handle(WidgetEvent::Send("payment methods".into()), ms(30));
    assert_eq!(effects, vec![WidgetEffect::SendMessage { request: 1, text: "payment methods".into() }]);

    // The first request answers late; it belongs to the cleared conversation.
    let (state, _) = state.handle(
        WidgetEvent::ReplyReceived { request: 0, text: TRACK_ORDER_REPLY.into() },
        ms(40),
    );
    assert!(state.awaiting_reply());
    let texts: Vec<_> = state.exchanges().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec![GREETING, "payment methods"]);

    let (state, _) = state.handle(WidgetEvent::ReplyFailed { request: 0 }, ms(50));
    assert!(state.awaiting_reply());

    let (state, _) = state.handle(
        WidgetEvent::ReplyReceived { request: 1, text: "We accept PayPal.".into() },
        ms(60),
    );
    assert!(!state.awaiting_reply());
    assert_eq!(state.exchanges().last().unwrap().text, "We accept PayPal.");
}

#[test]
fn history_arriving_after_reset_is_ignored() {
    let state = WidgetState::mount(true, true, WidgetTimings::default());
    let (state, effects) = state.handle(WidgetEvent::Open, ms(0));
    assert_eq!(effects, vec![WidgetEffect::FetchHistory]);
    let (state, _) = state.handle(WidgetEvent::Reset, ms(10));

    let old = vec![ChatExchange::new(Sender::User, "old", Utc::now())];
    let (state, _) = state.handle(WidgetEvent::HistoryLoaded(old), ms(20));
    let texts: Vec<_> = state.exchanges().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec![GREETING]);
}

#[test]
fn unrequested_history_is_ignored() {
    let (state, _) = mounted().handle(WidgetEvent::Open, ms(0));
    let old = vec![ChatExchange::new(Sender::User, "old", Utc::now())];
    let (state, _) = state.handle(WidgetEvent::HistoryLoaded(old), ms(20));
    assert_eq!(state.exchanges().len(), 1);
}
