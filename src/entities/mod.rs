pub mod prelude;

pub mod application_users;
pub mod branches;
pub mod cities;
pub mod countries;
pub mod departments;
pub mod employees;
pub mod general_departments;
pub mod medical_leaves;
pub mod overtime_types;
pub mod overtimes;
pub mod refresh_tokens;
pub mod system_roles;
pub mod user_roles;
pub mod vacation_types;
pub mod vacations;
