use crate::api::models::{LoginResponseDto, TokenResponseDto, UserDto};

crate::wire_enum! {
    pub enum UserRole {
        Admin => "admin",
        Teacher => "teacher",
        Accountant => "accountant",
        Parent => "parent",
        Student => "student",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            email: dto.email,
            full_name: dto.full_name,
            role: UserRole::from_wire(&dto.role),
            phone: dto.phone,
            is_active: dto.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub user: User,
}

impl From<LoginResponseDto> for LoginResponse {
    fn from(dto: LoginResponseDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            token_type: dto.token_type.unwrap_or_else(|| "bearer".to_string()),
            user: dto.user.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
}

impl From<TokenResponseDto> for AuthTokens {
    fn from(dto: TokenResponseDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            token_type: dto.token_type.unwrap_or_else(|| "bearer".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_is_case_normalized() {
        let dto = UserDto {
            id: 1,
            email: "bursar@school.test".to_string(),
            full_name: "Bursar".to_string(),
            role: "ACCOUNTANT".to_string(),
            phone: None,
            is_active: true,
        };

        let user = User::from(dto);
        assert_eq!(user.role, UserRole::Accountant);
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let tokens = AuthTokens::from(TokenResponseDto {
            access_token: "a".to_string(),
            refresh_token: None,
            token_type: None,
        });
        assert_eq!(tokens.token_type, "bearer");
    }
}
