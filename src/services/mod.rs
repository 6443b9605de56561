pub mod crud_service;
pub mod crud_service_impl;
pub use crud_service::{CrudError, CrudService, LeaveService};
pub use crud_service_impl::{
    LeaveKind, SeaOrmCrudService, SeaOrmEmployeeService, SeaOrmLeaveService,
};

pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService};
pub use account_service_impl::SeaOrmAccountService;

pub mod tokens;
pub use tokens::{Claims, TokenIssuer};

pub mod validation;
