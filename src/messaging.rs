// src/messaging.rs

use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::PortalApi;
use crate::models::{Message, SendMessageRequest};
use crate::session::Role;

/// One application's chat thread. Opening fetches the whole thread; sending
/// re-fetches it instead of appending locally, so the displayed list always
/// mirrors what the server has. The server is the ordering authority.
pub struct MessageThread {
    api: Arc<dyn PortalApi>,
    application_id: Uuid,
    messages: Vec<Message>,
}

impl MessageThread {
    pub async fn open(api: Arc<dyn PortalApi>, application_id: Uuid) -> Result<Self, ApiError> {
        let messages = api.thread(application_id).await?;
        debug!(
            "Opened thread for application {} ({} messages)",
            application_id,
            messages.len()
        );
        Ok(Self {
            api,
            application_id,
            messages,
        })
    }

    pub fn application_id(&self) -> Uuid {
        self.application_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.thread(self.application_id).await {
            Ok(messages) => {
                self.messages = messages;
                Ok(())
            }
            Err(err) => {
                if err.is_auth() {
                    self.messages.clear();
                }
                Err(err)
            }
        }
    }

    /// Sends a message to the other party of this thread. Blank content is a
    /// validation error and never reaches the wire.
    pub async fn send(
        &mut self,
        receiver_email: &str,
        receiver_role: Role,
        content: &str,
    ) -> Result<(), ApiError> {
        if content.trim().is_empty() {
            return Err(ApiError::Validation(
                "message cannot be empty".to_string(),
            ));
        }
        let request = SendMessageRequest {
            receiver_email: receiver_email.to_string(),
            receiver_role,
            content: content.to_string(),
            application_id: self.application_id,
        };
        self.api.send_message(&request).await?;
        self.refresh().await
    }
}
