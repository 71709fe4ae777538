use serde::Deserialize;

use crate::utils::validate::{Validate, ValidationErrors, Validator};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("email", &self.email)
            .required("password", &self.password)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("current_password", &self.current_password)
            .password("new_password", &self.new_password);
        v.check(
            self.current_password != self.new_password,
            "new_password",
            "New password must differ from the current password",
        );
        v.finish()
    }
}
