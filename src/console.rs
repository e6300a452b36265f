//! Structured round events written to the browser console.
//!
//! Each event is one JSON line, e.g.
//! `{"event":"ended","dip_index":7,"dip_price":12.4,"buy_index":7,"win":true}`.
//! Native builds (tests) compile the serialization but skip the console.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Started {
        opening_price: f64,
    },
    Bought {
        index: usize,
        price: f64,
    },
    Ended {
        dip_index: usize,
        dip_price: f64,
        buy_index: Option<usize>,
        win: bool,
    },
    Reset {
        /// Whether the round was abandoned before it ended.
        mid_round: bool,
    },
}

impl RoundEvent {
    pub fn to_json(&self) -> String {
        // Plain enum of numbers and bools; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Write an event to the console.
pub fn record(event: &RoundEvent) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&event.to_json().into());

    #[cfg(not(target_arch = "wasm32"))]
    let _ = event;
}

/// Write a free-form diagnostic line to the console.
pub fn debug(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());

    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_event_shape() {
        let json = RoundEvent::Started {
            opening_price: 42.5,
        }
        .to_json();
        assert_eq!(json, r#"{"event":"started","opening_price":42.5}"#);
    }

    #[test]
    fn ended_event_without_buy() {
        let json = RoundEvent::Ended {
            dip_index: 3,
            dip_price: 12.0,
            buy_index: None,
            win: false,
        }
        .to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "ended");
        assert_eq!(value["dip_index"], 3);
        assert!(value["buy_index"].is_null());
        assert_eq!(value["win"], false);
    }

    #[test]
    fn reset_event_shape() {
        let json = RoundEvent::Reset { mid_round: true }.to_json();
        assert_eq!(json, r#"{"event":"reset","mid_round":true}"#);
    }

    #[test]
    fn record_is_silent_off_wasm() {
        record(&RoundEvent::Bought {
            index: 2,
            price: 20.0,
        });
        debug("click: row=3");
    }
}
