//! User-related DTOs.

use roster_core::validation::rules::not_blank;
use roster_core::NewUser;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "Email must be 1-100 characters"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Password must be 1-100 characters"))]
    pub password: String,

    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "not_blank", message = "Name must not be blank")
    )]
    pub name: String,
}

impl RegisterUserRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}

impl From<RegisterUserRequest> for NewUser {
    fn from(request: RegisterUserRequest) -> Self {
        NewUser::new(request.email, request.password, request.name)
    }
}
