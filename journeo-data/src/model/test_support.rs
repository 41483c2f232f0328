//! Test utilities for the model planner.
//!
//! [`StubChatClient`] is a deterministic [`ChatClient`] that returns a
//! pre-configured reply and remembers the prompts it was sent.

use std::sync::{Mutex, PoisonError};

use super::{ChatClient, ModelClientError};

/// A reply in the shape the prompt asks for, with two stops near Madurai.
pub const SAMPLE_REPLY: &str = r#"Sure! Here is your trip:
{
  "trip_plan": {
    "start_location": "Villapuram, Madurai",
    "total_duration": "95 minutes",
    "stops": [
      {
        "name": "Meenakshi Amman Temple",
        "interest": "temple",
        "distance": "2.5 km",
        "travel_time": "6 min",
        "visit_duration": "45 min",
        "latitude": "9.9195",
        "longitude": "78.1193",
        "address": "Madurai Main, Madurai, Tamil Nadu 625001",
        "description": "Historic temple complex.",
        "activities": ["Darshan", "Photography"]
      },
      {
        "name": "Thirumalai Nayakkar Mahal",
        "distance": 1.2,
        "travel_time": 3,
        "visit_duration": 30,
        "latitude": 9.9149,
        "longitude": 78.1240,
        "activities": "Light show,History walk"
      }
    ],
    "return": {"destination": "Villapuram, Madurai", "travel_time": "11 min"}
  }
}
Have a great day!"#;

/// Stub `ChatClient` for tests.
#[derive(Debug)]
pub struct StubChatClient {
    response: Result<String, ModelClientError>,
    prompts: Mutex<Vec<String>>,
}

impl StubChatClient {
    /// Create a client that always answers with `reply`.
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            response: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a client that always fails with `error`.
    #[must_use]
    pub fn failing(error: ModelClientError) -> Self {
        Self {
            response: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ChatClient for StubChatClient {
    fn complete(&self, prompt: &str) -> Result<String, ModelClientError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_owned());
        self.response.clone()
    }
}
