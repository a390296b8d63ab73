use serde::Deserialize;

use crate::error::AppError;

/// Registration form body.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("name", &self.name, 1, 15)?;
        check_length("username", &self.username, 4, 15)?;
        check_length("email", &self.email, 6, 20)?;
        check_length("password", &self.password, 4, 15)?;
        if self.password != self.confirm {
            return Err(AppError::Validation("Passwords do not match".into()));
        }
        Ok(())
    }
}

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}
