use std::collections::HashMap;

use async_trait::async_trait;
use entities::export::Ticket;
use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode};
use use_cases::import_outages::{AuthError, TicketAuthenticator};

use crate::client::EpiasClient;

#[async_trait]
impl TicketAuthenticator for EpiasClient {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn acquire_ticket(&self) -> Result<Ticket, AuthError> {
        let headers = HashMap::from([
            ("Accept", "text/plain".to_string()),
            (
                "Content-Type",
                "application/x-www-form-urlencoded".to_string(),
            ),
        ]);
        let response = self
            .http
            .post_form(
                self.settings.ticket_url.clone(),
                headers,
                &self.credentials.as_form(),
            )
            .await
            .map_err(|err| AuthError::Network(err.into()))?;

        read_ticket(response).await
    }
}

/// Only `201 Created` carries a ticket.
pub(crate) async fn read_ticket(response: Response) -> Result<Ticket, AuthError> {
    let status = response.status();
    if status != StatusCode::CREATED {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Ticket::from_location(location).map_err(AuthError::MissingTicket)
}
