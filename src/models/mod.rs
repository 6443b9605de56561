pub mod account;
pub mod employee;
pub mod leave;
pub mod response;

pub use account::{Login, ManageUser, RefreshToken, Register, SystemRoleDto, UserProfile};
pub use employee::{BranchDetails, CityDetails, DepartmentDetails, EmployeeDetails};
pub use leave::{MedicalLeaveDto, OvertimeDto, VacationDto, overtime_days, vacation_days};
pub use response::{GeneralResponse, LoginResponse};
