// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requirement validation.
//!
//! These checks gate the `draft` → `searching` transition: a slot may only
//! be opened for matching once its requirements are fully specified.

use crate::error::DomainError;
use crate::types::RequirementProfile;

/// Validates that a requirement profile is fully specified.
///
/// A profile is complete when the role is non-empty and every listed
/// language and expertise is non-empty. Empty language/expertise sets are
/// allowed; a slot may require a role alone.
///
/// # Errors
///
/// Returns `DomainError::IncompleteRequirements` naming the offending field.
pub fn validate_requirements(requirement: &RequirementProfile) -> Result<(), DomainError> {
    if requirement.role.trim().is_empty() {
        return Err(DomainError::IncompleteRequirements {
            field: String::from("role"),
            reason: String::from("role must not be empty"),
        });
    }

    if requirement.languages.iter().any(|l| l.trim().is_empty()) {
        return Err(DomainError::IncompleteRequirements {
            field: String::from("languages"),
            reason: String::from("language entries must not be empty"),
        });
    }

    if requirement.expertises.iter().any(|e| e.trim().is_empty()) {
        return Err(DomainError::IncompleteRequirements {
            field: String::from("expertises"),
            reason: String::from("expertise entries must not be empty"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Seniority;

    #[test]
    fn test_complete_requirements_pass() {
        let requirement = RequirementProfile::new(
            String::from("data engineer"),
            Seniority::Intermediate,
            vec![String::from("english")],
            vec![String::from("sql")],
        );
        assert!(validate_requirements(&requirement).is_ok());
    }

    #[test]
    fn test_role_only_requirements_pass() {
        let requirement = RequirementProfile::new(
            String::from("designer"),
            Seniority::Junior,
            Vec::new(),
            Vec::new(),
        );
        assert!(validate_requirements(&requirement).is_ok());
    }

    #[test]
    fn test_empty_role_is_rejected() {
        let requirement = RequirementProfile::new(
            String::from("   "),
            Seniority::Senior,
            Vec::new(),
            Vec::new(),
        );
        let result = validate_requirements(&requirement);
        assert!(matches!(
            result,
            Err(DomainError::IncompleteRequirements { field, .. }) if field == "role"
        ));
    }

    #[test]
    fn test_blank_language_entry_is_rejected() {
        let requirement = RequirementProfile::new(
            String::from("developer"),
            Seniority::Senior,
            vec![String::from("french"), String::new()],
            Vec::new(),
        );
        let result = validate_requirements(&requirement);
        assert!(matches!(
            result,
            Err(DomainError::IncompleteRequirements { field, .. }) if field == "languages"
        ));
    }

    #[test]
    fn test_blank_expertise_entry_is_rejected() {
        let requirement = RequirementProfile::new(
            String::from("developer"),
            Seniority::Senior,
            Vec::new(),
            vec![String::from(" ")],
        );
        let result = validate_requirements(&requirement);
        assert!(matches!(
            result,
            Err(DomainError::IncompleteRequirements { field, .. }) if field == "expertises"
        ));
    }
}
