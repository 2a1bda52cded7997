use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::error::ApiError;

use super::store::ScreeningStore;

/// First violated rule when validating screening input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {value}")]
    InvalidFormat { field: &'static str, value: String },

    #[error("sala {room} already has a screening in the requested interval")]
    Conflict { room: i32 },
}

/// Raw create payload. All fields arrive as strings and are parsed here;
/// absent and empty values are treated the same.
#[derive(Debug, Default, Deserialize)]
pub struct CreateScreeningRequest {
    pub id_sala: Option<String>,
    pub title_movie: Option<String>,
    pub description: Option<String>,
    pub data: Option<String>,
    pub inicio: Option<String>,
    pub duracao: Option<String>,
}

/// Raw update payload; only title and description are mutable
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScreeningRequest {
    pub title_movie: Option<String>,
    pub description: Option<String>,
}

/// A fully validated screening ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScreening {
    pub id_sala: i32,
    pub title_movie: String,
    pub description: String,
    pub data: NaiveDate,
    pub inicio: DateTime<Utc>,
    pub fim: DateTime<Utc>,
    pub duracao: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningUpdate {
    pub title_movie: String,
    pub description: String,
}

/// How a field must parse once present
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    RoomId,
    Text,
    Date,
    Timestamp,
    Span,
}

struct FieldRule {
    name: &'static str,
    kind: FieldKind,
}

/// One rule per field, checked in order; the first violation aborts
const CREATE_RULES: &[FieldRule] = &[
    FieldRule { name: "id_sala", kind: FieldKind::RoomId },
    FieldRule { name: "title_movie", kind: FieldKind::Text },
    FieldRule { name: "description", kind: FieldKind::Text },
    FieldRule { name: "data", kind: FieldKind::Date },
    FieldRule { name: "inicio", kind: FieldKind::Timestamp },
    FieldRule { name: "duracao", kind: FieldKind::Span },
];

impl CreateScreeningRequest {
    fn field(&self, name: &str) -> &str {
        let value = match name {
            "id_sala" => self.id_sala.as_deref(),
            "title_movie" => self.title_movie.as_deref(),
            "description" => self.description.as_deref(),
            "data" => self.data.as_deref(),
            "inicio" => self.inicio.as_deref(),
            "duracao" => self.duracao.as_deref(),
            _ => None,
        };
        value.map(str::trim).unwrap_or("")
    }
}

impl FieldKind {
    fn check(self, field: &'static str, raw: &str) -> Result<(), ValidationError> {
        let parsed = match self {
            FieldKind::Text => true,
            FieldKind::RoomId => parse_room(raw).is_some(),
            FieldKind::Date => parse_date(raw).is_some(),
            FieldKind::Timestamp => parse_timestamp(raw).is_some(),
            FieldKind::Span => parse_span(raw).is_some(),
        };

        if parsed {
            Ok(())
        } else {
            Err(ValidationError::InvalidFormat {
                field,
                value: raw.to_string(),
            })
        }
    }
}

fn check_rules(req: &CreateScreeningRequest) -> Result<(), ValidationError> {
    for rule in CREATE_RULES {
        let raw = req.field(rule.name);
        if raw.is_empty() {
            return Err(ValidationError::MissingField(rule.name));
        }
        rule.kind.check(rule.name, raw)?;
    }
    Ok(())
}

fn parse_room(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

/// Calendar dates arrive as DD/MM/YYYY
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

/// Start timestamps arrive either as RFC 3339 or in the Postgres text form,
/// e.g. "2021-07-15 00:15:32.133+00"
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Durations arrive as HH:MM and must span at least one minute
fn parse_span(raw: &str) -> Option<Duration> {
    let time = NaiveTime::parse_from_str(raw, "%H:%M").ok()?;
    let minutes = i64::from(time.hour()) * 60 + i64::from(time.minute());
    if minutes == 0 {
        return None;
    }
    Some(Duration::minutes(minutes))
}

/// Validate a create request: required fields, formats, then the room/time
/// overlap check against the store. Returns the screening ready to persist
/// or the first violated rule.
pub async fn validate_create<S>(
    store: &S,
    req: &CreateScreeningRequest,
) -> Result<NewScreening, ApiError>
where
    S: ScreeningStore + ?Sized,
{
    check_rules(req)?;

    let invalid = |field: &'static str| ValidationError::InvalidFormat {
        field,
        value: req.field(field).to_string(),
    };

    let id_sala = parse_room(req.field("id_sala")).ok_or_else(|| invalid("id_sala"))?;
    let data = parse_date(req.field("data")).ok_or_else(|| invalid("data"))?;
    let inicio = parse_timestamp(req.field("inicio")).ok_or_else(|| invalid("inicio"))?;
    let span = parse_span(req.field("duracao")).ok_or_else(|| invalid("duracao"))?;
    let fim = inicio + span;

    if store.find_conflicting(id_sala, inicio, fim).await?.is_some() {
        return Err(ValidationError::Conflict { room: id_sala }.into());
    }

    Ok(NewScreening {
        id_sala,
        title_movie: req.field("title_movie").to_string(),
        description: req.field("description").to_string(),
        data,
        inicio,
        fim,
        duracao: format!("{:02}:{:02}", span.num_minutes() / 60, span.num_minutes() % 60),
    })
}

/// Validate an update request. Both mutable fields are required; room, date,
/// start and duration cannot change after creation.
pub fn validate_update(req: &UpdateScreeningRequest) -> Result<ScreeningUpdate, ValidationError> {
    let title_movie = req
        .title_movie
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField("title_movie"))?;

    let description = req
        .description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField("description"))?;

    Ok(ScreeningUpdate {
        title_movie: title_movie.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::store::mem::MemScreeningStore;
    use super::*;

    fn valid_request() -> CreateScreeningRequest {
        CreateScreeningRequest {
            id_sala: Some("1".to_string()),
            title_movie: Some("In the Heights".to_string()),
            description: Some("As luzes se acendem em Washington Heights".to_string()),
            data: Some("15/07/2021".to_string()),
            inicio: Some("2021-07-15 00:15:32.133+00".to_string()),
            duracao: Some("01:55".to_string()),
        }
    }

    fn expect_validation_failure(result: Result<NewScreening, ApiError>, field: &str) {
        match result {
            Err(ApiError::ValidationError { field_errors, .. }) => {
                let errors = field_errors.expect("field errors");
                assert!(errors.contains_key(field), "expected error on {field}: {errors:?}");
            }
            other => panic!("expected validation failure on {field}, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepts_a_complete_request() {
        let store = MemScreeningStore::new();
        let new = validate_create(&store, &valid_request()).await.expect("valid");

        assert_eq!(new.id_sala, 1);
        assert_eq!(new.data, NaiveDate::from_ymd_opt(2021, 7, 15).unwrap());
        assert_eq!(new.duracao, "01:55");
        assert_eq!(new.fim - new.inicio, Duration::minutes(115));
    }

    #[tokio::test]
    async fn each_required_field_is_enforced() {
        let store = MemScreeningStore::new();

        for field in ["id_sala", "title_movie", "description", "data", "inicio", "duracao"] {
            let mut req = valid_request();
            match field {
                "id_sala" => req.id_sala = Some("".to_string()),
                "title_movie" => req.title_movie = None,
                "description" => req.description = Some("   ".to_string()),
                "data" => req.data = Some("".to_string()),
                "inicio" => req.inicio = None,
                "duracao" => req.duracao = Some("".to_string()),
                _ => unreachable!(),
            }
            expect_validation_failure(validate_create(&store, &req).await, field);
        }
    }

    #[tokio::test]
    async fn rejects_non_numeric_room() {
        let store = MemScreeningStore::new();
        let mut req = valid_request();
        req.id_sala = Some("1a".to_string());
        expect_validation_failure(validate_create(&store, &req).await, "id_sala");
    }

    #[tokio::test]
    async fn rejects_malformed_date_start_and_duration() {
        let store = MemScreeningStore::new();

        let mut req = valid_request();
        req.data = Some("1f/07-2021".to_string());
        expect_validation_failure(validate_create(&store, &req).await, "data");

        let mut req = valid_request();
        req.inicio = Some("09:15".to_string());
        expect_validation_failure(validate_create(&store, &req).await, "inicio");

        let mut req = valid_request();
        req.duracao = Some("f1-55".to_string());
        expect_validation_failure(validate_create(&store, &req).await, "duracao");
    }

    #[tokio::test]
    async fn rejects_overlap_in_same_room() {
        let store = MemScreeningStore::new();

        // Occupy room 1 from 00:15:32 for 1h35
        let mut first = valid_request();
        first.duracao = Some("01:35".to_string());
        let new = validate_create(&store, &first).await.expect("first is valid");
        store.insert(&new).await.expect("first insert");

        // Same room, same start, 1h55
        let second = valid_request();
        match validate_create(&store, &second).await {
            Err(ApiError::Conflict(_)) => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepts_disjoint_interval_and_other_rooms() {
        let store = MemScreeningStore::new();

        let new = validate_create(&store, &valid_request()).await.expect("valid");
        store.insert(&new).await.expect("insert");

        // Same room, starts right at the previous fim
        let mut later = valid_request();
        later.inicio = Some("2021-07-15 02:10:32.133+00".to_string());
        assert!(validate_create(&store, &later).await.is_ok());

        // Same interval, other room
        let mut other_room = valid_request();
        other_room.id_sala = Some("2".to_string());
        assert!(validate_create(&store, &other_room).await.is_ok());
    }

    #[tokio::test]
    async fn accepts_rfc3339_start() {
        let store = MemScreeningStore::new();
        let mut req = valid_request();
        req.inicio = Some("2021-07-15T00:15:32Z".to_string());
        let new = validate_create(&store, &req).await.expect("valid");
        assert_eq!(new.inicio.to_rfc3339(), "2021-07-15T00:15:32+00:00");
    }

    #[test]
    fn update_requires_both_mutable_fields() {
        let req = UpdateScreeningRequest {
            title_movie: Some("".to_string()),
            description: Some("desc".to_string()),
        };
        assert_eq!(
            validate_update(&req),
            Err(ValidationError::MissingField("title_movie"))
        );

        let req = UpdateScreeningRequest {
            title_movie: Some("In the Heights".to_string()),
            description: None,
        };
        assert_eq!(
            validate_update(&req),
            Err(ValidationError::MissingField("description"))
        );

        let req = UpdateScreeningRequest {
            title_movie: Some("In the Heights".to_string()),
            description: Some("desc".to_string()),
        };
        assert!(validate_update(&req).is_ok());
    }

    #[test]
    fn duration_must_be_positive_and_well_formed() {
        assert_eq!(parse_span("01:55"), Some(Duration::minutes(115)));
        assert_eq!(parse_span("00:01"), Some(Duration::minutes(1)));
        assert!(parse_span("00:00").is_none());
        assert!(parse_span("f1-55").is_none());
        assert!(parse_span("90").is_none());
    }
}
