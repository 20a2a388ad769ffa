//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::{Phase, SessionState};
use super::transition::transition;
use super::{Effect, Event};
use crate::transcript::{Role, Turn};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Assistant)]
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    (arb_role(), "[a-zA-Z0-9 ]{1,20}").prop_map(|(role, content)| Turn { role, content })
}

fn arb_transcript() -> impl Strategy<Value = Vec<Turn>> {
    proptest::collection::vec(arb_turn(), 0..5)
}

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Idle),
        Just(Phase::AwaitingReply),
        Just(Phase::Listening),
    ]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    (arb_transcript(), "[ -~]{0,20}", arb_phase(), any::<bool>()).prop_map(
        |(transcript, draft, phase, speech_supported)| SessionState {
            transcript,
            draft,
            phase,
            speech_supported,
        },
    )
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[ -~]{0,20}".prop_map(|text| Event::DraftChanged { text }),
        Just(Event::Submit),
        "[a-zA-Z0-9 ]{1,20}".prop_map(|text| Event::ReplyReceived { text }),
        "[a-z ]{1,20}".prop_map(|message| Event::ReplyFailed { message }),
        Just(Event::StartListening),
        "[a-zA-Z0-9 ]{0,20}".prop_map(|transcript| Event::SpeechResult { transcript }),
        "[a-z ]{1,20}".prop_map(|message| Event::SpeechError { message }),
        Just(Event::CaptureEnded),
    ]
}

/// The demo keyword with arbitrary letter case and surrounding whitespace
fn arb_demo_draft() -> impl Strategy<Value = String> {
    ("[ \t]{0,3}", proptest::collection::vec(any::<bool>(), 4), "[ \t]{0,3}").prop_map(
        |(prefix, upper, suffix)| {
            let word: String = "demo"
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            format!("{prefix}{word}{suffix}")
        },
    )
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    /// Accepted events only ever append to the transcript.
    #[test]
    fn transcript_is_append_only(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, event) {
            let old = &state.transcript;
            let new = &result.new_state.transcript;
            prop_assert!(new.len() >= old.len());
            prop_assert_eq!(&new[..old.len()], &old[..]);
        }
    }

    /// A submission while a reply is outstanding is always rejected.
    #[test]
    fn submit_while_awaiting_is_rejected(state in arb_state()) {
        let mut state = state;
        state.phase = Phase::AwaitingReply;
        prop_assert!(transition(&state, Event::Submit).is_err());
    }

    /// An accepted submission dispatches exactly one way: relay call or
    /// canned demo reply, never both, never neither.
    #[test]
    fn accepted_submit_dispatches_exactly_once(state in arb_state()) {
        let mut state = state;
        state.phase = Phase::Idle;

        if let Ok(result) = transition(&state, Event::Submit) {
            prop_assert_eq!(result.effects.len(), 1);
            match &result.effects[0] {
                Effect::CallRelay { transcript } => {
                    // The relay sees the full updated transcript ending with
                    // the new user turn.
                    prop_assert_eq!(transcript, &result.new_state.transcript);
                    prop_assert_eq!(
                        transcript.last().map(|t| t.role),
                        Some(Role::User)
                    );
                }
                Effect::ScheduleCannedReply { .. } => {}
                other => prop_assert!(false, "unexpected effect {:?}", other),
            }
            prop_assert_eq!(result.new_state.phase, Phase::AwaitingReply);
            prop_assert!(result.new_state.draft.is_empty());
        } else {
            // The only rejection from Idle is an empty trimmed draft.
            prop_assert!(state.draft.trim().is_empty());
        }
    }

    /// The demo bypass never produces a relay call.
    #[test]
    fn demo_never_calls_relay(state in arb_state(), draft in arb_demo_draft()) {
        let mut state = state;
        state.phase = Phase::Idle;
        state.draft = draft;

        let result = transition(&state, Event::Submit).unwrap();
        let scheduled_canned_reply =
            matches!(result.effects.as_slice(), [Effect::ScheduleCannedReply { .. }]);
        prop_assert!(scheduled_canned_reply);
    }

    /// Every speech outcome resolves the Listening phase.
    #[test]
    fn speech_outcomes_always_resolve_listening(
        state in arb_state(),
        text in "[a-zA-Z ]{0,20}",
    ) {
        let mut state = state;
        state.phase = Phase::Listening;

        for event in [
            Event::SpeechResult { transcript: text.clone() },
            Event::SpeechError { message: text.clone() },
            Event::CaptureEnded,
        ] {
            let result = transition(&state, event).unwrap();
            prop_assert_eq!(result.new_state.phase, Phase::Idle);
            prop_assert_eq!(&result.new_state.transcript, &state.transcript);
        }
    }

    /// A reply can only land while one is outstanding.
    #[test]
    fn replies_need_an_outstanding_submission(
        state in arb_state(),
        text in "[a-zA-Z ]{1,20}",
    ) {
        let mut state = state;
        if state.phase == Phase::AwaitingReply {
            state.phase = Phase::Idle;
        }
        let rejected = transition(&state, Event::ReplyReceived { text }).is_err();
        prop_assert!(rejected);
    }

    /// Draft edits never touch the transcript or the phase.
    #[test]
    fn draft_edits_only_touch_the_draft(state in arb_state(), text in "[ -~]{0,20}") {
        let result = transition(&state, Event::DraftChanged { text: text.clone() }).unwrap();
        prop_assert_eq!(&result.new_state.transcript, &state.transcript);
        prop_assert_eq!(result.new_state.phase, state.phase);
        prop_assert_eq!(result.new_state.draft, text);
        prop_assert!(result.effects.is_empty());
    }
}
