use super::RegisterRequest;
use crate::rental::{validate_email, validate_name, validate_password, ValidationError};

/// Validates a registration request.
///
/// Accounts may sign up as `customer` or `owner`; `admin` is provisioned
/// out of band.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationError> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_name(&request.name)?;
    if request.role.is_admin() {
        return Err(ValidationError::RoleNotAllowed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::Role;

    #[test]
    fn valid_registration() {
        let request = RegisterRequest::new("ana@example.com", "secreto123", "Ana");
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn owner_can_self_register() {
        let request = RegisterRequest::new("ana@example.com", "secreto123", "Ana").with_role(Role::Owner);
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn admin_cannot_self_register() {
        let request = RegisterRequest::new("ana@example.com", "secreto123", "Ana").with_role(Role::Admin);
        assert_eq!(validate_registration(&request), Err(ValidationError::RoleNotAllowed));
    }

    #[test]
    fn first_failing_rule_is_reported() {
        let request = RegisterRequest::new("not-an-email", "short", "");
        assert_eq!(validate_registration(&request), Err(ValidationError::InvalidEmail));

        let request = RegisterRequest::new("ana@example.com", "short", "");
        assert_eq!(validate_registration(&request), Err(ValidationError::PasswordTooShort));
    }
}
