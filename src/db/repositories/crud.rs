use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;

/// Per-entity capabilities the generic repository needs.
///
/// `name` returns `None` for entities without a unique display name; those
/// skip the duplicate check on insert. `merge` lists the mutable columns
/// explicitly so an update never touches anything else.
pub trait Catalog: EntityTrait {
    /// Human readable label used in outcome messages, e.g. "Branch".
    const LABEL: &'static str;

    fn id(model: &Self::Model) -> i32;

    fn name(model: &Self::Model) -> Option<&str>;

    fn for_insert(model: Self::Model) -> Self::ActiveModel;

    fn merge(existing: Self::Model, incoming: Self::Model) -> Self::ActiveModel;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<M> {
    Inserted(M),
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome<M> {
    Updated(M),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub struct CrudRepository<E> {
    conn: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> CrudRepository<E>
where
    E: Catalog,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    pub async fn all(&self) -> Result<Vec<E::Model>> {
        E::find()
            .all(&self.conn)
            .await
            .with_context(|| format!("Failed to list {}", E::LABEL))
    }

    pub async fn find(&self, id: i32) -> Result<Option<E::Model>> {
        E::find_by_id(id)
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to query {} {id}", E::LABEL))
    }

    /// Case-insensitive lookup by name. Scans the table; the tables this is
    /// used on are small lookup lists.
    pub async fn name_taken(&self, name: &str) -> Result<bool> {
        let wanted = name.trim().to_lowercase();
        let rows = self.all().await?;

        Ok(rows
            .iter()
            .filter_map(E::name)
            .any(|existing| existing.trim().to_lowercase() == wanted))
    }

    pub async fn insert(&self, model: E::Model) -> Result<InsertOutcome<E::Model>> {
        if let Some(name) = E::name(&model)
            && self.name_taken(name).await?
        {
            return Ok(InsertOutcome::Duplicate);
        }

        let inserted = E::for_insert(model)
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to insert {}", E::LABEL))?;

        Ok(InsertOutcome::Inserted(inserted))
    }

    pub async fn update(&self, model: E::Model) -> Result<UpdateOutcome<E::Model>> {
        let Some(existing) = self.find(E::id(&model)).await? else {
            return Ok(UpdateOutcome::NotFound);
        };

        let updated = E::merge(existing, model)
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to update {}", E::LABEL))?;

        Ok(UpdateOutcome::Updated(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome> {
        let result = E::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete {} {id}", E::LABEL))?;

        Ok(if result.rows_affected == 0 {
            DeleteOutcome::NotFound
        } else {
            DeleteOutcome::Deleted
        })
    }
}
