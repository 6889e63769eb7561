use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::tickets::TicketEntity;

pub const TICKET_NUMBER_PREFIX: &str = "TCK-";
pub const QR_PAYLOAD_PREFIX: &str = "TICKET:";

/// Human-readable ticket number: fixed prefix plus six random digits.
/// Uniqueness is enforced by the caller with an existence-checked retry loop.
pub fn generate_ticket_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6).map(|_| char::from(b'0' + rng.gen_range(0u8..10))).collect();
    format!("{}{}", TICKET_NUMBER_PREFIX, suffix)
}

/// Scannable payload bound to one ticket. The ticket id is generated before
/// insert, so the payload is complete in a single pass.
pub fn build_qr_payload(ticket_id: Uuid, event_id: Uuid, ticket_number: &str) -> String {
    format!("TICKET:{}|EVENT:{}|TOKEN:{}", ticket_id, event_id, ticket_number)
}

/// Resolves a scanned identifier to a ticket number. Accepts the structured
/// `TICKET:..|EVENT:..|TOKEN:..` payload, a JSON object carrying a
/// `ticket_number` field, or a bare ticket number string.
pub fn parse_ticket_identifier(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with(QR_PAYLOAD_PREFIX) {
        let parts: Vec<&str> = raw.split('|').collect();
        if parts.len() != 3 {
            return None;
        }
        let token = parts[2].strip_prefix("TOKEN:")?;
        if token.is_empty() {
            return None;
        }
        return Some(token.to_string());
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
        return value
            .get("ticket_number")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
    }

    Some(raw.to_string())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: Uuid,
    pub ticket_number: String,
    pub event_name: String,
    pub event_location: String,
    pub event_date: DateTime<Utc>,
    pub holder_name: Option<String>,
    pub holder_email: Option<String>,
    pub seat_number: Option<String>,
    pub section: Option<String>,
    pub status: String,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub order_id: Uuid,
    pub event_id: Uuid,
}

impl From<TicketEntity> for TicketDto {
    fn from(entity: TicketEntity) -> Self {
        Self {
            id: entity.id,
            ticket_number: entity.ticket_number,
            event_name: entity.event_name,
            event_location: entity.event_location,
            event_date: entity.event_date,
            holder_name: entity.holder_name,
            holder_email: entity.holder_email,
            seat_number: entity.seat_number,
            section: entity.section,
            status: entity.status,
            used_at: entity.used_at,
            created_at: entity.created_at,
            order_id: entity.order_id,
            event_id: entity.event_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTicketDto {
    pub id: Uuid,
    pub ticket_number: String,
    pub qr_code: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub event_location: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTicketModel {
    pub qr_code: String,
    pub location: Option<String>,
    pub validation_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedTicketDto {
    pub ticket_number: String,
    pub event_name: String,
    pub holder_name: Option<String>,
    pub validated_at: DateTime<Utc>,
    pub event_date: DateTime<Utc>,
}

/// Result of one validation attempt, as decided inside the validation
/// transaction. `Validated` is the only arm that mutated anything.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Validated(ValidatedTicketDto),
    NotFound,
    NotOwned,
    AlreadyUsed {
        ticket_number: String,
        used_at: DateTime<Utc>,
    },
    Cancelled {
        ticket_number: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValidateModel {
    pub qr_codes: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemDto {
    pub qr_code: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummaryDto {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchValidationDto {
    pub results: Vec<BatchItemDto>,
    pub summary: BatchSummaryDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structured_payload() {
        let ticket_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();
        let payload = build_qr_payload(ticket_id, event_id, "TCK-123456");
        assert_eq!(parse_ticket_identifier(&payload).as_deref(), Some("TCK-123456"));
    }

    #[test]
    fn test_parse_json_payload() {
        let raw = r#"{"ticket_number": "TCK-654321"}"#;
        assert_eq!(parse_ticket_identifier(raw).as_deref(), Some("TCK-654321"));
    }

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_ticket_identifier("TCK-000001").as_deref(), Some("TCK-000001"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_ticket_identifier(""), None);
        assert_eq!(parse_ticket_identifier("   "), None);
        // Structured prefix but wrong shape must not fall through to bare.
        assert_eq!(parse_ticket_identifier("TICKET:abc"), None);
        assert_eq!(parse_ticket_identifier("TICKET:a|EVENT:b|BAD:c"), None);
        // JSON without the expected field.
        assert_eq!(parse_ticket_identifier(r#"{"other": 1}"#), None);
    }

    #[test]
    fn test_ticket_number_format() {
        for _ in 0..100 {
            let number = generate_ticket_number();
            let suffix = number.strip_prefix(TICKET_NUMBER_PREFIX).unwrap();
            assert_eq!(suffix.len(), 6);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
