use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::models::screening::Screening;
use crate::database::pool::{map_constraint_error, DatabaseError};

use super::validator::{NewScreening, ScreeningUpdate};

const SCREENING_COLUMNS: &str =
    "id, id_sala, title_movie, description, data, inicio, fim, duracao, created_at, updated_at";

/// Persistence seam for screenings. The validator only needs the lookup
/// methods; handlers use the rest.
#[async_trait]
pub trait ScreeningStore: Send + Sync {
    /// Any screening in the given room whose interval overlaps [inicio, fim)
    async fn find_conflicting(
        &self,
        id_sala: i32,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
    ) -> Result<Option<Screening>, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Screening>, DatabaseError>;

    async fn list(&self) -> Result<Vec<Screening>, DatabaseError>;

    async fn insert(&self, new: &NewScreening) -> Result<Screening, DatabaseError>;

    async fn update(
        &self,
        id: i32,
        update: &ScreeningUpdate,
    ) -> Result<Option<Screening>, DatabaseError>;

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;
}

pub struct PgScreeningStore {
    pool: PgPool,
}

impl PgScreeningStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScreeningStore for PgScreeningStore {
    async fn find_conflicting(
        &self,
        id_sala: i32,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
    ) -> Result<Option<Screening>, DatabaseError> {
        let screening = sqlx::query_as::<_, Screening>(&format!(
            "SELECT {SCREENING_COLUMNS} FROM sessao \
             WHERE id_sala = $1 AND inicio < $3 AND fim > $2 \
             LIMIT 1"
        ))
        .bind(id_sala)
        .bind(inicio)
        .bind(fim)
        .fetch_optional(&self.pool)
        .await?;

        Ok(screening)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Screening>, DatabaseError> {
        let screening = sqlx::query_as::<_, Screening>(&format!(
            "SELECT {SCREENING_COLUMNS} FROM sessao WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(screening)
    }

    async fn list(&self) -> Result<Vec<Screening>, DatabaseError> {
        let screenings = sqlx::query_as::<_, Screening>(&format!(
            "SELECT {SCREENING_COLUMNS} FROM sessao ORDER BY inicio"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(screenings)
    }

    async fn insert(&self, new: &NewScreening) -> Result<Screening, DatabaseError> {
        // The sessao_sala_horario_excl constraint makes the overlap check
        // atomic: two racing creates cannot both commit.
        sqlx::query_as::<_, Screening>(&format!(
            "INSERT INTO sessao (id_sala, title_movie, description, data, inicio, fim, duracao) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {SCREENING_COLUMNS}"
        ))
        .bind(new.id_sala)
        .bind(&new.title_movie)
        .bind(&new.description)
        .bind(new.data)
        .bind(new.inicio)
        .bind(new.fim)
        .bind(&new.duracao)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "sala already booked for the requested time"))
    }

    async fn update(
        &self,
        id: i32,
        update: &ScreeningUpdate,
    ) -> Result<Option<Screening>, DatabaseError> {
        let screening = sqlx::query_as::<_, Screening>(&format!(
            "UPDATE sessao SET title_movie = $2, description = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING {SCREENING_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.title_movie)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(screening)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM sessao WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) mod mem {
    //! In-memory store used by validator tests

    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemScreeningStore {
        rows: Mutex<Vec<Screening>>,
        next_id: Mutex<i32>,
    }

    impl MemScreeningStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ScreeningStore for MemScreeningStore {
        async fn find_conflicting(
            &self,
            id_sala: i32,
            inicio: DateTime<Utc>,
            fim: DateTime<Utc>,
        ) -> Result<Option<Screening>, DatabaseError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|s| s.id_sala == id_sala && s.inicio < fim && s.fim > inicio)
                .cloned())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Screening>, DatabaseError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|s| s.id == id).cloned())
        }

        async fn list(&self) -> Result<Vec<Screening>, DatabaseError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn insert(&self, new: &NewScreening) -> Result<Screening, DatabaseError> {
            if self
                .find_conflicting(new.id_sala, new.inicio, new.fim)
                .await?
                .is_some()
            {
                return Err(DatabaseError::Conflict(
                    "sala already booked for the requested time".to_string(),
                ));
            }

            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let now = Utc::now();
            let screening = Screening {
                id: *next_id,
                id_sala: new.id_sala,
                title_movie: new.title_movie.clone(),
                description: new.description.clone(),
                data: new.data,
                inicio: new.inicio,
                fim: new.fim,
                duracao: new.duracao.clone(),
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(screening.clone());
            Ok(screening)
        }

        async fn update(
            &self,
            id: i32,
            update: &ScreeningUpdate,
        ) -> Result<Option<Screening>, DatabaseError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(s) = rows.iter_mut().find(|s| s.id == id) {
                s.title_movie = update.title_movie.clone();
                s.description = update.description.clone();
                s.updated_at = Utc::now();
                return Ok(Some(s.clone()));
            }
            Ok(None)
        }

        async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|s| s.id != id);
            Ok(rows.len() < before)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    use super::mem::MemScreeningStore;
    use super::*;

    fn new_screening() -> NewScreening {
        let inicio = Utc.with_ymd_and_hms(2021, 7, 15, 0, 15, 32).unwrap();
        NewScreening {
            id_sala: 1,
            title_movie: "In the Heights".to_string(),
            description: "As luzes se acendem em Washington Heights".to_string(),
            data: NaiveDate::from_ymd_opt(2021, 7, 15).unwrap(),
            inicio,
            fim: inicio + Duration::minutes(115),
            duracao: "01:55".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_id_preserves_fields() {
        let store = MemScreeningStore::new();
        let new = new_screening();

        let created = store.insert(&new).await.expect("insert");
        let fetched = store
            .find_by_id(created.id)
            .await
            .expect("lookup")
            .expect("created screening is visible");

        assert_eq!(fetched.id_sala, new.id_sala);
        assert_eq!(fetched.title_movie, new.title_movie);
        assert_eq!(fetched.description, new.description);
        assert_eq!(fetched.data, new.data);
        assert_eq!(fetched.inicio, new.inicio);
        assert_eq!(fetched.fim, new.fim);
        assert_eq!(fetched.duracao, new.duracao);
    }

    #[tokio::test]
    async fn update_persists_and_leaves_schedule_untouched() {
        let store = MemScreeningStore::new();
        let created = store.insert(&new_screening()).await.expect("insert");

        let update = ScreeningUpdate {
            title_movie: "In the Heights (legendado)".to_string(),
            description: "Sessao legendada".to_string(),
        };
        store
            .update(created.id, &update)
            .await
            .expect("update")
            .expect("screening exists");

        let fetched = store
            .find_by_id(created.id)
            .await
            .expect("lookup")
            .expect("still visible");

        assert_eq!(fetched.title_movie, update.title_movie);
        assert_eq!(fetched.description, update.description);
        // Everything else is immutable after creation
        assert_eq!(fetched.id_sala, created.id_sala);
        assert_eq!(fetched.data, created.data);
        assert_eq!(fetched.inicio, created.inicio);
        assert_eq!(fetched.fim, created.fim);
        assert_eq!(fetched.duracao, created.duracao);
    }

    #[tokio::test]
    async fn update_of_missing_screening_returns_none() {
        let store = MemScreeningStore::new();
        let update = ScreeningUpdate {
            title_movie: "t".to_string(),
            description: "d".to_string(),
        };
        assert!(store.update(42, &update).await.expect("update").is_none());
    }
}
