use serde::{Deserialize, Serialize};

use crate::entities::{countries, employees, general_departments};

/// Employee joined with its branch chain and city chain. Writes accept the
/// plain employee fields; the nested parts are filled on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    #[serde(flatten)]
    pub employee: employees::Model,
    #[serde(default)]
    pub branch: Option<BranchDetails>,
    #[serde(default)]
    pub city: Option<CityDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDetails {
    pub id: i32,
    pub name: String,
    pub department: Option<DepartmentDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDetails {
    pub id: i32,
    pub name: String,
    pub general_department: Option<general_departments::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDetails {
    pub id: i32,
    pub name: String,
    pub country: Option<countries::Model>,
}
