//! Scripted transport for exercising the fetcher without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::fetcher::{HttpReply, Transport, TransportError};
use crate::utils::http::ListingEndpoint;

type Reply = std::result::Result<HttpReply, TransportError>;

/// Replays canned replies in order and records every requested URL.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Reply {
        self.requests.lock().unwrap().push(url.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::fatal(format!("unscripted request: {url}"))))
    }
}

pub fn json_reply(body: Value) -> Reply {
    Ok(HttpReply {
        status: 200,
        body: body.to_string(),
    })
}

pub fn status_reply(status: u16) -> Reply {
    Ok(HttpReply {
        status,
        body: String::new(),
    })
}

pub fn test_endpoint() -> ListingEndpoint {
    ListingEndpoint::new("http://api.test:8088", "KEY", "ListPublicReservationEducation").unwrap()
}
