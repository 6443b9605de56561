use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

use super::employee::EmployeeRepository;
use crate::entities::{medical_leaves, overtime_types, overtimes, vacation_types, vacations};
use crate::models::{MedicalLeaveDto, OvertimeDto, VacationDto};

/// Read side for vacations, overtime and medical leave. Rows are decorated
/// with the employee name and the type name; writes go through
/// [`super::crud::CrudRepository`].
pub struct LeaveRepository {
    conn: DatabaseConnection,
}

fn employee_ids<M>(rows: &[M], employee_id: impl Fn(&M) -> i32) -> Vec<i32> {
    let mut ids: Vec<i32> = rows.iter().map(employee_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl LeaveRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.conn.clone())
    }

    async fn vacation_type_names(&self) -> Result<HashMap<i32, String>> {
        let rows = vacation_types::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list vacation types")?;
        Ok(rows.into_iter().map(|t| (t.id, t.name)).collect())
    }

    async fn overtime_type_names(&self) -> Result<HashMap<i32, String>> {
        let rows = overtime_types::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list overtime types")?;
        Ok(rows.into_iter().map(|t| (t.id, t.name)).collect())
    }

    async fn decorate_vacations(&self, rows: Vec<vacations::Model>) -> Result<Vec<VacationDto>> {
        let names = self
            .employees()
            .names(&employee_ids(&rows, |r| r.employee_id))
            .await?;
        let types = self.vacation_type_names().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let employee = names.get(&row.employee_id).cloned();
                let kind = types.get(&row.vacation_type_id).cloned();
                VacationDto::from_model(row, employee, kind)
            })
            .collect())
    }

    async fn decorate_overtimes(&self, rows: Vec<overtimes::Model>) -> Result<Vec<OvertimeDto>> {
        let names = self
            .employees()
            .names(&employee_ids(&rows, |r| r.employee_id))
            .await?;
        let types = self.overtime_type_names().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let employee = names.get(&row.employee_id).cloned();
                let kind = types.get(&row.overtime_type_id).cloned();
                OvertimeDto::from_model(row, employee, kind)
            })
            .collect())
    }

    async fn decorate_medical_leaves(
        &self,
        rows: Vec<medical_leaves::Model>,
    ) -> Result<Vec<MedicalLeaveDto>> {
        let names = self
            .employees()
            .names(&employee_ids(&rows, |r| r.employee_id))
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let employee = names.get(&row.employee_id).cloned();
                MedicalLeaveDto::from_model(row, employee)
            })
            .collect())
    }

    pub async fn vacations(&self, employee_id: Option<i32>) -> Result<Vec<VacationDto>> {
        let mut query = vacations::Entity::find().order_by_asc(vacations::Column::StartDate);
        if let Some(employee_id) = employee_id {
            query = query.filter(vacations::Column::EmployeeId.eq(employee_id));
        }

        let rows = query
            .all(&self.conn)
            .await
            .context("Failed to list vacations")?;
        self.decorate_vacations(rows).await
    }

    pub async fn vacation(&self, id: i32) -> Result<Option<VacationDto>> {
        let row = vacations::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query vacation")?;

        Ok(match row {
            Some(row) => self.decorate_vacations(vec![row]).await?.pop(),
            None => None,
        })
    }

    pub async fn overtimes(&self, employee_id: Option<i32>) -> Result<Vec<OvertimeDto>> {
        let mut query = overtimes::Entity::find().order_by_asc(overtimes::Column::StartDate);
        if let Some(employee_id) = employee_id {
            query = query.filter(overtimes::Column::EmployeeId.eq(employee_id));
        }

        let rows = query
            .all(&self.conn)
            .await
            .context("Failed to list overtime")?;
        self.decorate_overtimes(rows).await
    }

    pub async fn overtime(&self, id: i32) -> Result<Option<OvertimeDto>> {
        let row = overtimes::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query overtime")?;

        Ok(match row {
            Some(row) => self.decorate_overtimes(vec![row]).await?.pop(),
            None => None,
        })
    }

    pub async fn medical_leaves(&self, employee_id: Option<i32>) -> Result<Vec<MedicalLeaveDto>> {
        let mut query = medical_leaves::Entity::find().order_by_asc(medical_leaves::Column::Date);
        if let Some(employee_id) = employee_id {
            query = query.filter(medical_leaves::Column::EmployeeId.eq(employee_id));
        }

        let rows = query
            .all(&self.conn)
            .await
            .context("Failed to list medical leave")?;
        self.decorate_medical_leaves(rows).await
    }

    pub async fn medical_leave(&self, id: i32) -> Result<Option<MedicalLeaveDto>> {
        let row = medical_leaves::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query medical leave")?;

        Ok(match row {
            Some(row) => self.decorate_medical_leaves(vec![row]).await?.pop(),
            None => None,
        })
    }
}
