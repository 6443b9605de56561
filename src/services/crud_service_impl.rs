//! `SeaORM` implementations of [`CrudService`] and [`LeaveService`].

use async_trait::async_trait;
use sea_orm::{IntoActiveModel, PrimaryKeyTrait};
use std::marker::PhantomData;
use tracing::{error, info, warn};

use crate::db::repositories::leave::LeaveRepository;
use crate::db::{Catalog, DeleteOutcome, InsertOutcome, Store, UpdateOutcome};
use crate::entities::{employees, medical_leaves, overtimes, vacations};
use crate::models::{EmployeeDetails, GeneralResponse, MedicalLeaveDto, OvertimeDto, VacationDto};
use crate::services::crud_service::{CrudError, CrudService, LeaveService, duplicate, not_found};

/// Serves a catalog entity as-is. Also used by the richer services below for
/// the write side.
pub struct SeaOrmCrudService<E> {
    store: Store,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmCrudService<E>
where
    E: Catalog,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    async fn insert_model(&self, item: E::Model) -> Result<GeneralResponse, CrudError> {
        info!("[insert] Inserting {}", E::LABEL);

        match self.store.crud::<E>().insert(item).await? {
            InsertOutcome::Inserted(model) => {
                info!(id = E::id(&model), "[insert] {} inserted", E::LABEL);
                Ok(GeneralResponse::completed())
            }
            InsertOutcome::Duplicate => {
                warn!("[insert] {} with the same name already added", E::LABEL);
                Ok(duplicate(E::LABEL))
            }
        }
    }

    async fn update_model(&self, item: E::Model) -> Result<GeneralResponse, CrudError> {
        let id = E::id(&item);
        info!(id, "[update] Updating {}", E::LABEL);

        match self.store.crud::<E>().update(item).await? {
            UpdateOutcome::Updated(_) => {
                info!(id, "[update] {} updated", E::LABEL);
                Ok(GeneralResponse::completed())
            }
            UpdateOutcome::NotFound => {
                error!(id, "[update] {} not found", E::LABEL);
                Ok(not_found(E::LABEL))
            }
        }
    }

    async fn delete_model(&self, id: i32) -> Result<GeneralResponse, CrudError> {
        info!(id, "[delete_by_id] Deleting {}", E::LABEL);

        match self.store.crud::<E>().delete(id).await? {
            DeleteOutcome::Deleted => {
                info!(id, "[delete_by_id] {} deleted", E::LABEL);
                Ok(GeneralResponse::completed())
            }
            DeleteOutcome::NotFound => {
                error!(id, "[delete_by_id] {} not found", E::LABEL);
                Ok(not_found(E::LABEL))
            }
        }
    }
}

#[async_trait]
impl<E> CrudService<E::Model> for SeaOrmCrudService<E>
where
    E: Catalog,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    async fn get_all(&self) -> Result<Vec<E::Model>, CrudError> {
        let rows = self.store.crud::<E>().all().await?;
        info!(count = rows.len(), "[get_all] Retrieved {} rows", E::LABEL);
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<E::Model, CrudError> {
        self.store.crud::<E>().find(id).await?.ok_or_else(|| {
            error!(id, "[get_by_id] {} not found", E::LABEL);
            CrudError::NotFound(E::LABEL)
        })
    }

    async fn insert(&self, item: E::Model) -> Result<GeneralResponse, CrudError> {
        self.insert_model(item).await
    }

    async fn update(&self, item: E::Model) -> Result<GeneralResponse, CrudError> {
        self.update_model(item).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<GeneralResponse, CrudError> {
        self.delete_model(id).await
    }
}

/// Employees are read with their branch and city chains and written as
/// plain rows.
pub struct SeaOrmEmployeeService {
    store: Store,
    writes: SeaOrmCrudService<employees::Entity>,
}

impl SeaOrmEmployeeService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            writes: SeaOrmCrudService::new(store.clone()),
            store,
        }
    }
}

#[async_trait]
impl CrudService<EmployeeDetails> for SeaOrmEmployeeService {
    async fn get_all(&self) -> Result<Vec<EmployeeDetails>, CrudError> {
        let rows = self.store.employee_repo().list_detailed().await?;
        info!(count = rows.len(), "[get_all] Retrieved employees");
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<EmployeeDetails, CrudError> {
        self.store
            .employee_repo()
            .get_detailed(id)
            .await?
            .ok_or_else(|| {
                error!(id, "[get_by_id] Employee not found");
                CrudError::NotFound("Employee")
            })
    }

    async fn insert(&self, item: EmployeeDetails) -> Result<GeneralResponse, CrudError> {
        self.writes.insert_model(item.employee).await
    }

    async fn update(&self, item: EmployeeDetails) -> Result<GeneralResponse, CrudError> {
        self.writes.update_model(item.employee).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<GeneralResponse, CrudError> {
        self.writes.delete_model(id).await
    }
}

/// Binds a leave entity to its decorated read shape.
#[async_trait]
pub trait LeaveKind: Catalog {
    type Dto: Send + Sync + 'static;

    async fn list(repo: &LeaveRepository, employee_id: Option<i32>)
    -> anyhow::Result<Vec<Self::Dto>>;

    async fn get(repo: &LeaveRepository, id: i32) -> anyhow::Result<Option<Self::Dto>>;

    fn to_model(dto: &Self::Dto) -> Self::Model;
}

#[async_trait]
impl LeaveKind for vacations::Entity {
    type Dto = VacationDto;

    async fn list(
        repo: &LeaveRepository,
        employee_id: Option<i32>,
    ) -> anyhow::Result<Vec<VacationDto>> {
        repo.vacations(employee_id).await
    }

    async fn get(repo: &LeaveRepository, id: i32) -> anyhow::Result<Option<VacationDto>> {
        repo.vacation(id).await
    }

    fn to_model(dto: &VacationDto) -> vacations::Model {
        dto.to_model()
    }
}

#[async_trait]
impl LeaveKind for overtimes::Entity {
    type Dto = OvertimeDto;

    async fn list(
        repo: &LeaveRepository,
        employee_id: Option<i32>,
    ) -> anyhow::Result<Vec<OvertimeDto>> {
        repo.overtimes(employee_id).await
    }

    async fn get(repo: &LeaveRepository, id: i32) -> anyhow::Result<Option<OvertimeDto>> {
        repo.overtime(id).await
    }

    fn to_model(dto: &OvertimeDto) -> overtimes::Model {
        dto.to_model()
    }
}

#[async_trait]
impl LeaveKind for medical_leaves::Entity {
    type Dto = MedicalLeaveDto;

    async fn list(
        repo: &LeaveRepository,
        employee_id: Option<i32>,
    ) -> anyhow::Result<Vec<MedicalLeaveDto>> {
        repo.medical_leaves(employee_id).await
    }

    async fn get(repo: &LeaveRepository, id: i32) -> anyhow::Result<Option<MedicalLeaveDto>> {
        repo.medical_leave(id).await
    }

    fn to_model(dto: &MedicalLeaveDto) -> medical_leaves::Model {
        dto.to_model()
    }
}

pub struct SeaOrmLeaveService<E> {
    store: Store,
    writes: SeaOrmCrudService<E>,
}

impl<E> SeaOrmLeaveService<E>
where
    E: LeaveKind,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            writes: SeaOrmCrudService::new(store.clone()),
            store,
        }
    }
}

#[async_trait]
impl<E> CrudService<E::Dto> for SeaOrmLeaveService<E>
where
    E: LeaveKind,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    async fn get_all(&self) -> Result<Vec<E::Dto>, CrudError> {
        let rows = E::list(&self.store.leave_repo(), None).await?;
        info!(count = rows.len(), "[get_all] Retrieved {} rows", E::LABEL);
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<E::Dto, CrudError> {
        E::get(&self.store.leave_repo(), id).await?.ok_or_else(|| {
            error!(id, "[get_by_id] {} not found", E::LABEL);
            CrudError::NotFound(E::LABEL)
        })
    }

    async fn insert(&self, item: E::Dto) -> Result<GeneralResponse, CrudError> {
        self.writes.insert_model(E::to_model(&item)).await
    }

    async fn update(&self, item: E::Dto) -> Result<GeneralResponse, CrudError> {
        self.writes.update_model(E::to_model(&item)).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<GeneralResponse, CrudError> {
        self.writes.delete_model(id).await
    }
}

#[async_trait]
impl<E> LeaveService<E::Dto> for SeaOrmLeaveService<E>
where
    E: LeaveKind,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    async fn list_for_employee(&self, employee_id: i32) -> Result<Vec<E::Dto>, CrudError> {
        let rows = E::list(&self.store.leave_repo(), Some(employee_id)).await?;
        info!(
            employee_id,
            count = rows.len(),
            "[list_for_employee] Retrieved {} rows",
            E::LABEL
        );
        Ok(rows)
    }
}
