use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;

use crate::entities::{branches, cities, countries, departments, employees, general_departments};
use crate::models::{BranchDetails, CityDetails, DepartmentDetails, EmployeeDetails};

/// Read side for employees: joins the branch and city chains in memory.
pub struct EmployeeRepository {
    conn: DatabaseConnection,
}

/// Every lookup table an employee row points into, keyed by id.
struct Lookups {
    branches: HashMap<i32, branches::Model>,
    departments: HashMap<i32, departments::Model>,
    general_departments: HashMap<i32, general_departments::Model>,
    cities: HashMap<i32, cities::Model>,
    countries: HashMap<i32, countries::Model>,
}

impl Lookups {
    fn branch(&self, id: i32) -> Option<BranchDetails> {
        let branch = self.branches.get(&id)?;
        Some(BranchDetails {
            id: branch.id,
            name: branch.name.clone(),
            department: self.department(branch.department_id),
        })
    }

    fn department(&self, id: i32) -> Option<DepartmentDetails> {
        let department = self.departments.get(&id)?;
        Some(DepartmentDetails {
            id: department.id,
            name: department.name.clone(),
            general_department: self
                .general_departments
                .get(&department.general_department_id)
                .cloned(),
        })
    }

    fn city(&self, id: i32) -> Option<CityDetails> {
        let city = self.cities.get(&id)?;
        Some(CityDetails {
            id: city.id,
            name: city.name.clone(),
            country: self.countries.get(&city.country_id).cloned(),
        })
    }

    fn details(&self, employee: employees::Model) -> EmployeeDetails {
        EmployeeDetails {
            branch: self.branch(employee.branch_id),
            city: self.city(employee.city_id),
            employee,
        }
    }
}

fn by_id<M>(rows: Vec<M>, id: impl Fn(&M) -> i32) -> HashMap<i32, M> {
    rows.into_iter().map(|row| (id(&row), row)).collect()
}

impl EmployeeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn lookups(&self) -> Result<Lookups> {
        Ok(Lookups {
            branches: by_id(
                branches::Entity::find().all(&self.conn).await?,
                |b| b.id,
            ),
            departments: by_id(
                departments::Entity::find().all(&self.conn).await?,
                |d| d.id,
            ),
            general_departments: by_id(
                general_departments::Entity::find().all(&self.conn).await?,
                |g| g.id,
            ),
            cities: by_id(cities::Entity::find().all(&self.conn).await?, |c| c.id),
            countries: by_id(countries::Entity::find().all(&self.conn).await?, |c| c.id),
        })
    }

    pub async fn list_detailed(&self) -> Result<Vec<EmployeeDetails>> {
        let rows = employees::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list employees")?;

        let lookups = self.lookups().await.context("Failed to load employee lookups")?;

        Ok(rows.into_iter().map(|row| lookups.details(row)).collect())
    }

    pub async fn get_detailed(&self, id: i32) -> Result<Option<EmployeeDetails>> {
        let Some(row) = employees::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query employee")?
        else {
            return Ok(None);
        };

        let lookups = self.lookups().await.context("Failed to load employee lookups")?;
        Ok(Some(lookups.details(row)))
    }

    /// Display names keyed by employee id, for leave listings.
    pub async fn names(&self, ids: &[i32]) -> Result<HashMap<i32, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = employees::Entity::find()
            .filter(employees::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("Failed to query employee names")?;

        Ok(rows.into_iter().map(|e| (e.id, e.name)).collect())
    }
}
