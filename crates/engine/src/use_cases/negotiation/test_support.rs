//! Shared fixtures for negotiation use case tests.

use chrono::{DateTime, TimeZone, Utc};
use parley_domain::{CreateNegotiation, Motivation, NegotiationSession, Pitfall};

use crate::infrastructure::ports::MockClockPort;

pub fn fixed_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn fixed_clock() -> MockClockPort {
    let mut clock = MockClockPort::new();
    clock.expect_now().returning(fixed_time);
    clock
}

pub fn create_input(interest: u8, patience: u8) -> CreateNegotiation {
    CreateNegotiation {
        name: "Passage through Greywatch".to_string(),
        npc_name: "Captain Hale".to_string(),
        npc_entity_id: None,
        description: Some("The gate captain controls the only pass".to_string()),
        interest,
        patience,
        impression: 0,
        motivations: vec![
            Motivation::new("Protection", "Sworn to keep the valley safe"),
            Motivation::new("Greed", "Underpaid for years"),
        ],
        pitfalls: vec![Pitfall::new("Questioning her loyalty")],
    }
}

pub fn preparing_session(interest: u8, patience: u8) -> NegotiationSession {
    NegotiationSession::create(create_input(interest, patience), fixed_time()).unwrap()
}

pub fn active_session(interest: u8, patience: u8) -> NegotiationSession {
    let mut session = preparing_session(interest, patience);
    session.start(fixed_time()).unwrap();
    session
}
