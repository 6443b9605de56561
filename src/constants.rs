pub mod roles {

    pub const ADMIN: &str = "Admin";

    pub const USER: &str = "User";
}

pub mod tokens {

    /// Raw bytes of entropy in an opaque refresh token (before base64).
    pub const REFRESH_TOKEN_BYTES: usize = 64;
}

pub mod messages {

    pub const PROCESS_COMPLETED: &str = "Process completed";

    pub const ACCOUNT_CREATED: &str = "Account Created!";

    pub const LOGIN_SUCCESS: &str = "Login successfully";

    pub const TOKEN_REFRESHED: &str = "Token refreshed successfully";
}

/// Client-side base paths, one per entity controller.
pub mod endpoints {

    pub const GENERAL_DEPARTMENT: &str = "api/generaldepartment";

    pub const DEPARTMENT: &str = "api/department";

    pub const BRANCH: &str = "api/branch";

    pub const COUNTRY: &str = "api/country";

    pub const CITY: &str = "api/city";

    pub const EMPLOYEE: &str = "api/employee";

    pub const HEALTH: &str = "api/health";

    pub const OVERTIME: &str = "api/overtime";

    pub const OVERTIME_TYPE: &str = "api/overtimetype";

    pub const VACATION: &str = "api/vacation";

    pub const VACATION_TYPE: &str = "api/vacationtype";

    pub const AUTHENTICATION: &str = "api/authentication";
}
