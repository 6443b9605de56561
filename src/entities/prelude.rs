pub use super::application_users::Entity as ApplicationUsers;
pub use super::branches::Entity as Branches;
pub use super::cities::Entity as Cities;
pub use super::countries::Entity as Countries;
pub use super::departments::Entity as Departments;
pub use super::employees::Entity as Employees;
pub use super::general_departments::Entity as GeneralDepartments;
pub use super::medical_leaves::Entity as MedicalLeaves;
pub use super::overtime_types::Entity as OvertimeTypes;
pub use super::overtimes::Entity as Overtimes;
pub use super::refresh_tokens::Entity as RefreshTokens;
pub use super::system_roles::Entity as SystemRoles;
pub use super::user_roles::Entity as UserRoles;
pub use super::vacation_types::Entity as VacationTypes;
pub use super::vacations::Entity as Vacations;
