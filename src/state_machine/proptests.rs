//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::lex::{DialogActionType, IntentState, ResponseEnvelope, TurnEvent};
use crate::orders::{Customer, Delivery, OrderDetails, OrderItem, OrderRecord};
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Test Helpers
// ============================================================================

fn context(policy: DialogPolicy) -> TurnContext {
    TurnContext::new("prop-turn", policy)
}

fn turn_event(intent: &str, slots: Value) -> TurnEvent {
    TurnEvent::from_value(json!({
        "sessionState": { "intent": { "name": intent, "slots": slots } }
    }))
    .unwrap()
}

/// What the store answers if asked
#[derive(Debug, Clone)]
enum StoreOutcome {
    Found(OrderRecord),
    NotFound,
    Failed,
}

/// Drive one turn to completion, answering lookups with `outcome`
fn run_turn(
    ctx: &TurnContext,
    turn: TurnEvent,
    outcome: &StoreOutcome,
) -> (Vec<String>, ResponseEnvelope) {
    let mut state = TurnState::Idle;
    let mut pending = vec![Event::TurnReceived(turn)];
    let mut lookups = vec![];
    let mut response = None;

    while let Some(event) = pending.pop() {
        let result = transition(&state, ctx, event).unwrap();
        for effect in result.effects {
            match effect {
                Effect::LookupOrder { tracking_id } => {
                    lookups.push(tracking_id.clone());
                    pending.push(match outcome {
                        StoreOutcome::Found(order) => Event::OrderFound(OrderRecord {
                            tracking_id,
                            ..order.clone()
                        }),
                        StoreOutcome::NotFound => Event::OrderNotFound,
                        StoreOutcome::Failed => Event::StoreFailed,
                    });
                }
                Effect::Respond(envelope) => {
                    assert!(response.is_none(), "Turn answered twice");
                    response = Some(envelope);
                }
            }
        }
        state = result.new_state;
    }

    assert!(state.is_terminal(), "Turn ended in {state:?}");
    (lookups, response.expect("Turn produced no response"))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_policy() -> impl Strategy<Value = DialogPolicy> {
    (
        prop_oneof![Just(MissingSlotPolicy::Elicit), Just(MissingSlotPolicy::Error)],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(missing_slot, include_order_items, follow_up_card)| DialogPolicy {
            missing_slot,
            include_order_items,
            follow_up_card,
        })
}

fn arb_unknown_intent() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,24}".prop_filter("must not be a handled intent", |name| {
        KnownIntent::from_name(name).is_none()
    })
}

fn arb_intent_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("WelcomeIntent".to_string()),
        Just("GetOrderStatus".to_string()),
        Just("EndConversationIntent".to_string()),
        arb_unknown_intent(),
    ]
}

/// Slot maps ranging from well-formed to broken
fn arb_slots() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!({})),
        Just(json!({ "TrackingID": null })),
        Just(json!({ "TrackingID": { "value": null } })),
        Just(json!("SWL-001")),
        Just(json!([])),
        "[ a-zA-Z0-9-]{0,12}".prop_map(|v| json!({
            "TrackingID": { "value": { "originalValue": v, "interpretedValue": v } }
        })),
        "[a-zA-Z0-9-]{1,12}".prop_map(|v| json!({
            "TrackingID": { "value": { "interpretedValue": v } }
        })),
        any::<i64>().prop_map(|n| json!({ "TrackingID": n })),
        any::<i64>().prop_map(|n| json!({ "TrackingID": { "value": { "originalValue": n } } })),
    ]
}

fn arb_order() -> impl Strategy<Value = OrderRecord> {
    (
        proptest::option::of("[A-Za-z ]{1,20}"),
        proptest::option::of("[A-Za-z ]{1,12}"),
        proptest::option::of("[A-Za-z]{2,8}"),
        proptest::option::of("20[0-9]{2}-0[1-9]-1[0-9]"),
        proptest::collection::vec(("[A-Za-z ]{1,12}", proptest::option::of(1u32..10)), 0..4),
    )
        .prop_map(|(name, status, carrier, estimated_date, items)| OrderRecord {
            tracking_id: String::new(),
            customer: Customer {
                name,
                email: None,
                phone: None,
            },
            delivery: Delivery {
                status,
                carrier,
                estimated_date,
            },
            order_details: OrderDetails {
                items: items
                    .into_iter()
                    .map(|(name, quantity)| OrderItem {
                        name,
                        quantity,
                        vendor: None,
                    })
                    .collect(),
            },
            order_date: None,
        })
}

fn arb_store_outcome() -> impl Strategy<Value = StoreOutcome> {
    prop_oneof![
        arb_order().prop_map(StoreOutcome::Found),
        Just(StoreOutcome::NotFound),
        Just(StoreOutcome::Failed),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_every_turn_gets_one_consistent_response(
        intent in arb_intent_name(),
        slots in arb_slots(),
        policy in arb_policy(),
        outcome in arb_store_outcome(),
    ) {
        let (lookups, envelope) = run_turn(&context(policy), turn_event(&intent, slots), &outcome);

        prop_assert!(envelope.is_consistent(), "Inconsistent envelope: {:?}", envelope);
        prop_assert!(lookups.len() <= 1);
        if intent != "GetOrderStatus" {
            prop_assert!(lookups.is_empty());
        }
    }

    #[test]
    fn prop_unknown_intents_delegate(
        intent in arb_unknown_intent(),
        slots in arb_slots(),
        policy in arb_policy(),
    ) {
        let (_, envelope) =
            run_turn(&context(policy), turn_event(&intent, slots), &StoreOutcome::NotFound);

        prop_assert_eq!(envelope.dialog_action(), DialogActionType::Delegate);
        prop_assert_eq!(envelope.intent_name(), Some(intent.as_str()));
    }

    #[test]
    fn prop_tracking_id_is_trimmed_and_uppercased(
        raw in "[ ]{0,3}[a-zA-Z]{1,4}-?[0-9]{1,5}[ ]{0,3}",
        policy in arb_policy(),
    ) {
        let slots = json!({ "TrackingID": { "value": { "originalValue": raw } } });
        let (lookups, _) = run_turn(
            &context(policy),
            turn_event("GetOrderStatus", slots),
            &StoreOutcome::NotFound,
        );

        prop_assert_eq!(lookups, vec![raw.trim().to_uppercase()]);
    }

    #[test]
    fn prop_store_failures_always_close(
        raw in "[a-zA-Z0-9-]{1,12}",
        policy in arb_policy(),
    ) {
        let slots = json!({ "TrackingID": { "value": { "originalValue": raw } } });
        let (_, envelope) = run_turn(
            &context(policy),
            turn_event("GetOrderStatus", slots),
            &StoreOutcome::Failed,
        );

        prop_assert_eq!(envelope.dialog_action(), DialogActionType::Close);
        prop_assert!(envelope.text().contains("trouble accessing"));
    }

    #[test]
    fn prop_found_orders_mention_delivery_details(
        raw in "[a-zA-Z0-9-]{1,12}",
        order in arb_order(),
        policy in arb_policy(),
    ) {
        let slots = json!({ "TrackingID": { "value": { "originalValue": raw } } });
        let (_, envelope) = run_turn(
            &context(policy),
            turn_event("GetOrderStatus", slots),
            &StoreOutcome::Found(order.clone()),
        );
        let text = envelope.text();

        prop_assert_eq!(envelope.intent_state(), Some(IntentState::Fulfilled));
        prop_assert!(text.contains(&raw.to_uppercase()));
        if let Some(status) = &order.delivery.status {
            prop_assert!(text.contains(status.as_str()));
        }
        if let Some(carrier) = &order.delivery.carrier {
            prop_assert!(text.contains(carrier.as_str()));
        }
        let expected_messages = if policy.follow_up_card { 2 } else { 1 };
        prop_assert_eq!(envelope.messages().len(), expected_messages);
    }

    #[test]
    fn prop_missing_slot_follows_policy(
        slots in prop_oneof![
            Just(Value::Null),
            Just(json!({ "TrackingID": null })),
            "[ ]{0,4}".prop_map(|v| json!({ "TrackingID": { "value": { "originalValue": v } } })),
        ],
        policy in arb_policy(),
    ) {
        let (lookups, envelope) = run_turn(
            &context(policy),
            turn_event("GetOrderStatus", slots),
            &StoreOutcome::NotFound,
        );

        prop_assert!(lookups.is_empty());
        match policy.missing_slot {
            MissingSlotPolicy::Elicit => {
                prop_assert_eq!(envelope.dialog_action(), DialogActionType::ElicitSlot);
                prop_assert_eq!(envelope.slot_to_elicit(), Some(TRACKING_ID_SLOT));
            }
            MissingSlotPolicy::Error => {
                prop_assert_eq!(envelope.dialog_action(), DialogActionType::Close);
                prop_assert_eq!(envelope.intent_state(), Some(IntentState::Failed));
            }
        }
    }
}
