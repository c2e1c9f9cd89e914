//! PostgreSQL repositories
//!
//! Plain parameterized queries against the `books`, `authors` and `publishers`
//! tables. Identifiers come from the tables' sequences via `RETURNING id`.
//!
//! Selected columns are cast to the types the models decode, so tables laid
//! out with `SERIAL` ids, a `TIMESTAMP` publication date or a `NUMERIC` rating
//! read the same as the `BIGSERIAL`/`DATE`/`SMALLINT` layout. Nullable text
//! columns read as empty strings.

use sqlx::PgPool;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::Pagination;
use super::traits::{Repository, RepositoryResult};
use crate::ids::RecordId;
use crate::models::{Author, AuthorDraft, Book, BookDraft, Entity, Publisher, PublisherDraft};

const BOOK_COLUMNS: &str = "id::BIGINT AS id, \
     COALESCE(title, '') AS title, \
     published_date::DATE AS published_date, \
     rating::SMALLINT AS rating, \
     COALESCE(book_available, 'checked-in') AS book_available, \
     publisher_id::BIGINT AS publisher_id, \
     author_id::BIGINT AS author_id";

const AUTHOR_COLUMNS: &str = "id::BIGINT AS id, \
     COALESCE(first_name, '') AS first_name, \
     COALESCE(last_name, '') AS last_name, \
     COALESCE(pen_name, '') AS pen_name";

const PUBLISHER_COLUMNS: &str = "id::BIGINT AS id, COALESCE(name, '') AS name";

fn select_one(columns: &str, table: &str) -> String {
    format!("SELECT {} FROM {} WHERE id = $1", columns, table)
}

fn select_page(columns: &str, table: &str) -> String {
    format!("SELECT {} FROM {} ORDER BY id LIMIT $1 OFFSET $2", columns, table)
}

fn store_error(
    operation: RepositoryOperation,
    entity_type: &'static str,
) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |err| {
        let err = RepositoryError::from(err).with_operation(operation);
        tracing::debug!(
            operation = %operation,
            entity_type,
            kind = %err.kind,
            "Store call failed: {}", err.message
        );
        err
    }
}

fn assigned_id(raw: i64, entity_type: &'static str) -> RepositoryResult<RecordId> {
    RecordId::try_from(raw).map_err(|e| {
        RepositoryError::serialization_error(
            RepositoryOperation::Create,
            format!("Store returned invalid {} id: {}", entity_type, e),
        )
    })
}

/// Books table
#[derive(Debug, Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<RecordId, Book, BookDraft> for PgBookRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepositoryResult<Option<Book>> {
        sqlx::query_as::<_, Book>(&select_one(BOOK_COLUMNS, "books"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindById, "Book"))
    }

    async fn find_page(&self, pagination: Pagination) -> RepositoryResult<Vec<Book>> {
        sqlx::query_as::<_, Book>(&select_page(BOOK_COLUMNS, "books"))
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindPage, "Book"))
    }

    async fn create(&self, draft: BookDraft) -> RepositoryResult<Book> {
        let raw: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO books
                (title, published_date, rating, book_available, publisher_id, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id::BIGINT
            "#,
        )
        .bind(&draft.title)
        .bind(draft.published_date)
        .bind(draft.rating.map(i16::from))
        .bind(draft.status.as_str())
        .bind(draft.publisher_id)
        .bind(draft.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error(RepositoryOperation::Create, "Book"))?;

        Ok(Book::from_draft(assigned_id(raw, "Book")?, draft))
    }

    async fn update(&self, id: &RecordId, draft: BookDraft) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, published_date = $2, rating = $3, book_available = $4,
                publisher_id = $5, author_id = $6
            WHERE id = $7
            "#,
        )
        .bind(&draft.title)
        .bind(draft.published_date)
        .bind(draft.rating.map(i16::from))
        .bind(draft.status.as_str())
        .bind(draft.publisher_id)
        .bind(draft.author_id)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(store_error(RepositoryOperation::Update, "Book"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &RecordId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Delete, "Book"))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Authors table
#[derive(Debug, Clone)]
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<RecordId, Author, AuthorDraft> for PgAuthorRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepositoryResult<Option<Author>> {
        sqlx::query_as::<_, Author>(&select_one(AUTHOR_COLUMNS, "authors"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindById, "Author"))
    }

    async fn find_page(&self, pagination: Pagination) -> RepositoryResult<Vec<Author>> {
        sqlx::query_as::<_, Author>(&select_page(AUTHOR_COLUMNS, "authors"))
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindPage, "Author"))
    }

    async fn create(&self, draft: AuthorDraft) -> RepositoryResult<Author> {
        let raw: i64 = sqlx::query_scalar(
            "INSERT INTO authors (first_name, last_name, pen_name) VALUES ($1, $2, $3) \
             RETURNING id::BIGINT",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.pen_name)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error(RepositoryOperation::Create, "Author"))?;

        Ok(Author::from_draft(assigned_id(raw, "Author")?, draft))
    }

    async fn update(&self, id: &RecordId, draft: AuthorDraft) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE authors SET first_name = $1, last_name = $2, pen_name = $3 WHERE id = $4",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.pen_name)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(store_error(RepositoryOperation::Update, "Author"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &RecordId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Delete, "Author"))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Publishers table
#[derive(Debug, Clone)]
pub struct PgPublisherRepository {
    pool: PgPool,
}

impl PgPublisherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<RecordId, Publisher, PublisherDraft> for PgPublisherRepository {
    async fn find_by_id(&self, id: &RecordId) -> RepositoryResult<Option<Publisher>> {
        sqlx::query_as::<_, Publisher>(&select_one(PUBLISHER_COLUMNS, "publishers"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindById, "Publisher"))
    }

    async fn find_page(&self, pagination: Pagination) -> RepositoryResult<Vec<Publisher>> {
        sqlx::query_as::<_, Publisher>(&select_page(PUBLISHER_COLUMNS, "publishers"))
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::FindPage, "Publisher"))
    }

    async fn create(&self, draft: PublisherDraft) -> RepositoryResult<Publisher> {
        let raw: i64 =
            sqlx::query_scalar("INSERT INTO publishers (name) VALUES ($1) RETURNING id::BIGINT")
                .bind(&draft.name)
                .fetch_one(&self.pool)
                .await
                .map_err(store_error(RepositoryOperation::Create, "Publisher"))?;

        Ok(Publisher::from_draft(assigned_id(raw, "Publisher")?, draft))
    }

    async fn update(&self, id: &RecordId, draft: PublisherDraft) -> RepositoryResult<bool> {
        let result = sqlx::query("UPDATE publishers SET name = $1 WHERE id = $2")
            .bind(&draft.name)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Update, "Publisher"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &RecordId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM publishers WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error(RepositoryOperation::Delete, "Publisher"))?;

        Ok(result.rows_affected() > 0)
    }
}
