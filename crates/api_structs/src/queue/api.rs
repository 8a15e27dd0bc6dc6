use crate::dtos::{QueueDTO, QueueScheduleDTO, RefreshOutcomeDTO};
use power_schedule_domain::{DayLabel, Queue, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct QueueResponse {
    pub queue: QueueDTO,
}

impl QueueResponse {
    pub fn new(queue: Queue) -> Self {
        Self {
            queue: QueueDTO::new(queue),
        }
    }
}

pub mod add_queue {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub queue_id: String,
    }

    pub type APIResponse = QueueResponse;
}

pub mod get_queues {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub queues: Vec<QueueDTO>,
    }

    impl APIResponse {
        pub fn new(queues: Vec<Queue>) -> Self {
            Self {
                queues: queues.into_iter().map(QueueDTO::new).collect(),
            }
        }
    }
}

pub mod update_queue {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub queue_id: ID,
    }

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub queue_id: Option<String>,
        #[serde(default)]
        pub notifications_enabled: Option<bool>,
        #[serde(default)]
        pub auto_update_enabled: Option<bool>,
    }

    pub type APIResponse = QueueResponse;
}

pub mod delete_queue {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub queue_id: ID,
    }

    pub type APIResponse = QueueResponse;
}

pub mod get_queue_schedule {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub queue_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub day: Option<DayLabel>,
    }

    pub type APIResponse = QueueScheduleDTO;
}

pub mod refresh_queue {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub queue_id: ID,
    }

    pub type APIResponse = RefreshOutcomeDTO;
}

pub mod refresh_queues {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub results: Vec<RefreshOutcomeDTO>,
    }
}
