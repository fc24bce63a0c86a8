//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::repo::{RepoError, UniqueConstraint, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Translate SeaORM errors into the port's error type. Unique-constraint
/// violations become the structured `UniqueViolation` kind; everything else
/// stays an opaque backend error.
fn map_db_err(context: &'static str, e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            RepoError::UniqueViolation(UniqueConstraint::from_backend(&message))
        }
        _ => RepoError::Backend(anyhow::Error::new(e).context(context)),
    }
}

#[async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(|e| map_db_err("find_by_id failed", e))?;
        Ok(found.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = UserEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await
            .map_err(|e| map_db_err("find_all failed", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await
            .map_err(|e| map_db_err("email_exists failed", e))?;
        Ok(count > 0)
    }

    async fn insert(&self, user: User) -> Result<(), RepoError> {
        let m = UserAM {
            id: Set(user.id),
            email: Set(user.email),
            name: Set(user.name),
            created_at: Set(user.created_at),
        };
        let _ = m
            .insert(&self.conn)
            .await
            .map_err(|e| map_db_err("insert failed", e))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = UserEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| map_db_err("delete failed", e))?;
        Ok(res.rows_affected > 0)
    }
}
