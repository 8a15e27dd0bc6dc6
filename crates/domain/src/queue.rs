use crate::shared::entity::{Entity, ID};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Queue ids are published as "<main>.<sub>", e.g. "5.2"
static QUEUE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+$").expect("Invalid QUEUE_ID_RE regex"));

/// A grid segment the user follows outages for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub id: ID,
    /// User chosen display name, e.g. "Home"
    pub name: String,
    pub queue_id: String,
    pub notifications_enabled: bool,
    pub auto_update_enabled: bool,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueueValidationError {
    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("Queue id `{0}` is invalid, expected a format like 5.2")]
    InvalidFormat(String),
}

impl Queue {
    pub fn new(name: String, queue_id: String) -> Self {
        Self {
            id: Default::default(),
            name,
            queue_id,
            notifications_enabled: false,
            auto_update_enabled: true,
        }
    }

    /// Validates user input and creates a `Queue` from it
    pub fn create(name: &str, queue_id: &str) -> Result<Self, QueueValidationError> {
        let (name, queue_id) = validate(name, queue_id)?;
        Ok(Self::new(name, queue_id))
    }

    pub fn validate(&self) -> Result<(), QueueValidationError> {
        validate(&self.name, &self.queue_id).map(|_| ())
    }
}

fn validate(name: &str, queue_id: &str) -> Result<(String, String), QueueValidationError> {
    let name = name.trim();
    let queue_id = queue_id.trim();
    if name.is_empty() {
        return Err(QueueValidationError::EmptyField("name"));
    }
    if queue_id.is_empty() {
        return Err(QueueValidationError::EmptyField("queueId"));
    }
    if !is_valid_queue_id(queue_id) {
        return Err(QueueValidationError::InvalidFormat(queue_id.to_string()));
    }
    Ok((name.to_string(), queue_id.to_string()))
}

pub fn is_valid_queue_id(queue_id: &str) -> bool {
    QUEUE_ID_RE.is_match(queue_id)
}

impl Entity for Queue {
    fn id(&self) -> &ID {
        &self.id
    }
}
