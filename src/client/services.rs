//! Typed wrappers over the server's controllers.

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

use super::http::{HttpClient, UserSession};
use crate::constants::endpoints;
use crate::entities::{
    branches, cities, countries, departments, general_departments, overtime_types,
    vacation_types,
};
use crate::models::{
    EmployeeDetails, GeneralResponse, Login, LoginResponse, ManageUser, MedicalLeaveDto,
    OvertimeDto, RefreshToken, Register, SystemRoleDto, UserProfile, VacationDto,
};

/// The five CRUD calls against one `/api/{entity}` base path.
#[derive(Debug, Clone)]
pub struct CrudClient<T> {
    http: HttpClient,
    base: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> CrudClient<T>
where
    T: Serialize + DeserializeOwned + Sync,
{
    #[must_use]
    pub const fn new(http: HttpClient, base: &'static str) -> Self {
        Self {
            http,
            base,
            _item: PhantomData,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<T>> {
        self.http.get(self.base).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<T> {
        self.http.get(&format!("{}/{id}", self.base)).await
    }

    pub async fn insert(&self, item: &T) -> Result<GeneralResponse> {
        self.http.post(self.base, item).await
    }

    pub async fn update(&self, item: &T) -> Result<GeneralResponse> {
        self.http.put(self.base, item).await
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<GeneralResponse> {
        self.http.delete(&format!("{}/{id}", self.base)).await
    }

    /// Leave endpoints only.
    pub async fn list_for_employee(&self, employee_id: i32) -> Result<Vec<T>> {
        self.http
            .get(&format!("{}/employee/{employee_id}", self.base))
            .await
    }
}

/// One typed client per controller, sharing a session.
#[derive(Debug, Clone)]
pub struct HrClient {
    pub http: HttpClient,
    pub accounts: UserAccountClient,
    pub general_departments: CrudClient<general_departments::Model>,
    pub departments: CrudClient<departments::Model>,
    pub branches: CrudClient<branches::Model>,
    pub countries: CrudClient<countries::Model>,
    pub cities: CrudClient<cities::Model>,
    pub employees: CrudClient<EmployeeDetails>,
    pub vacations: CrudClient<VacationDto>,
    pub vacation_types: CrudClient<vacation_types::Model>,
    pub overtimes: CrudClient<OvertimeDto>,
    pub overtime_types: CrudClient<overtime_types::Model>,
    pub health: CrudClient<MedicalLeaveDto>,
}

impl HrClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::new(base_url)?;

        Ok(Self {
            accounts: UserAccountClient::new(http.clone()),
            general_departments: CrudClient::new(http.clone(), endpoints::GENERAL_DEPARTMENT),
            departments: CrudClient::new(http.clone(), endpoints::DEPARTMENT),
            branches: CrudClient::new(http.clone(), endpoints::BRANCH),
            countries: CrudClient::new(http.clone(), endpoints::COUNTRY),
            cities: CrudClient::new(http.clone(), endpoints::CITY),
            employees: CrudClient::new(http.clone(), endpoints::EMPLOYEE),
            vacations: CrudClient::new(http.clone(), endpoints::VACATION),
            vacation_types: CrudClient::new(http.clone(), endpoints::VACATION_TYPE),
            overtimes: CrudClient::new(http.clone(), endpoints::OVERTIME),
            overtime_types: CrudClient::new(http.clone(), endpoints::OVERTIME_TYPE),
            health: CrudClient::new(http.clone(), endpoints::HEALTH),
            http,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UserAccountClient {
    http: HttpClient,
}

impl UserAccountClient {
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn path(action: &str) -> String {
        format!("{}/{action}", endpoints::AUTHENTICATION)
    }

    pub async fn register(&self, form: &Register) -> Result<GeneralResponse> {
        self.http.post(&Self::path("register"), form).await
    }

    /// Signs in and, on success, keeps the returned tokens as the session.
    pub async fn sign_in(&self, form: &Login) -> Result<LoginResponse> {
        let response: LoginResponse = self.http.post(&Self::path("login"), form).await?;
        if let Some(session) = UserSession::from_login(&response) {
            self.http.set_session(Some(session)).await;
        }
        Ok(response)
    }

    pub async fn refresh_token(&self, form: &RefreshToken) -> Result<LoginResponse> {
        let response: LoginResponse = self.http.post(&Self::path("refresh-token"), form).await?;
        if let Some(session) = UserSession::from_login(&response) {
            self.http.set_session(Some(session)).await;
        }
        Ok(response)
    }

    pub async fn sign_out(&self) {
        self.http.set_session(None).await;
    }

    pub async fn users(&self) -> Result<Vec<ManageUser>> {
        self.http.get(&Self::path("users")).await
    }

    pub async fn roles(&self) -> Result<Vec<SystemRoleDto>> {
        self.http.get(&Self::path("roles")).await
    }

    pub async fn update_user(&self, user: &ManageUser) -> Result<GeneralResponse> {
        self.http.put(&Self::path("update-user"), user).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<GeneralResponse> {
        self.http.delete(&Self::path(&format!("delete-user/{id}"))).await
    }

    pub async fn user_profile(&self, id: i32) -> Result<UserProfile> {
        self.http.get(&Self::path(&format!("user-profile/{id}"))).await
    }

    pub async fn update_profile(&self, profile: &UserProfile) -> Result<GeneralResponse> {
        self.http.put(&Self::path("update-profile"), profile).await
    }
}
