//! Property-Based Test Generators
//!
//! Proptest strategies for claim details, item reports and sequences of
//! workflow requests.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use domain_items::{ClaimDetails, ItemType, NewItem};

/// Strategy for item types
pub fn item_type_strategy() -> impl Strategy<Value = ItemType> {
    prop_oneof![Just(ItemType::Lost), Just(ItemType::Found)]
}

/// Strategy for non-blank single-line text
pub fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.'-]{0,40}"
}

/// Strategy for claim details; any field may be empty
pub fn claim_details_strategy() -> impl Strategy<Value = ClaimDetails> {
    (".{0,40}", ".{0,20}", ".{0,40}").prop_map(|(description, contact_info, proof_details)| {
        ClaimDetails {
            description,
            contact_info,
            proof_details,
        }
    })
}

/// Strategy for valid item reports
pub fn new_item_strategy() -> impl Strategy<Value = NewItem> {
    (
        text_strategy(),
        text_strategy(),
        item_type_strategy(),
        text_strategy(),
        text_strategy(),
        0i64..365,
        any::<bool>(),
    )
        .prop_map(|(title, description, item_type, category, location, day, is_high_value)| NewItem {
            title,
            description,
            item_type,
            category,
            location,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + chrono::Duration::days(day),
            image_url: None,
            contact_method: None,
            is_high_value,
            is_anonymous: false,
        })
}

/// Who sends a workflow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    Reporter,
    Student(usize),
    Admin,
}

/// One workflow request against a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowRequest {
    Submit(Requester),
    Cancel(Requester),
    Approve(Requester, String),
    Reject(Requester),
}

/// Strategy for requesters; `students` is the number of non-reporting students
pub fn requester_strategy(students: usize) -> impl Strategy<Value = Requester> {
    prop_oneof![
        Just(Requester::Reporter),
        (0..students).prop_map(Requester::Student),
        Just(Requester::Admin),
    ]
}

/// Strategy for workflow requests, including ones that must be refused
pub fn workflow_request_strategy(students: usize) -> impl Strategy<Value = WorkflowRequest> {
    let pickup = prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("Front Desk".to_string()),
        Just("Security Office".to_string()),
    ];
    prop_oneof![
        requester_strategy(students).prop_map(WorkflowRequest::Submit),
        requester_strategy(students).prop_map(WorkflowRequest::Cancel),
        (requester_strategy(students), pickup).prop_map(|(r, p)| WorkflowRequest::Approve(r, p)),
        requester_strategy(students).prop_map(WorkflowRequest::Reject),
    ]
}
