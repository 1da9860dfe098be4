//! Energization add-ons and their intake forms.
//!
//! Some add-ons (a puja performed in the wearer's name) need the wearer's birth
//! details. The same validation runs in the browser for feedback and on the
//! server before an order is accepted.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sattva_core::{DomainError, DomainResult, ValueObject};

/// An optional ritual/blessing purchasable with a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergizationAddon {
    pub title: String,
    pub price_delta: Decimal,
    #[serde(default)]
    pub requires_form: bool,
}

impl EnergizationAddon {
    pub fn new(title: impl Into<String>, price_delta: Decimal, requires_form: bool) -> Self {
        Self {
            title: title.into(),
            price_delta,
            requires_form,
        }
    }
}

impl ValueObject for EnergizationAddon {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(DomainError::invalid_enum("gender", other)),
        }
    }
}

/// Intention the energization is performed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Purpose {
    General,
    Health,
    WealthFortune,
    Education,
    PersonalRelations,
}

impl FromStr for Purpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "general" => Ok(Purpose::General),
            "health" => Ok(Purpose::Health),
            "wealth-fortune" => Ok(Purpose::WealthFortune),
            "education" => Ok(Purpose::Education),
            "personal-relations" => Ok(Purpose::PersonalRelations),
            other => Err(DomainError::invalid_enum("purpose", other)),
        }
    }
}

/// Raw intake form as submitted.
///
/// Fields stay strings until validated so that a bad value can be reported
/// back against the field it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergizationForm {
    pub wearer_name: Option<String>,
    pub dob: Option<String>,
    pub birth_place: Option<String>,
    pub time: Option<String>,
    pub gender: Option<String>,
    pub gotra: Option<String>,
    pub purpose: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl EnergizationForm {
    /// Required fields, in the order they are reported missing.
    fn required(&self) -> [(&'static str, &Option<String>); 6] {
        [
            ("wearerName", &self.wearer_name),
            ("dob", &self.dob),
            ("birthPlace", &self.birth_place),
            ("time", &self.time),
            ("gender", &self.gender),
            ("purpose", &self.purpose),
        ]
    }

    pub fn parse_gender(&self) -> DomainResult<Gender> {
        present(&self.gender)
            .ok_or(DomainError::missing_field("gender"))?
            .parse()
    }

    pub fn parse_purpose(&self) -> DomainResult<Purpose> {
        present(&self.purpose)
            .ok_or(DomainError::missing_field("purpose"))?
            .parse()
    }

    /// Presence of every required field first, then the enumerated fields.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some((field, _)) = self
            .required()
            .into_iter()
            .find(|(_, value)| present(value).is_none())
        {
            return Err(DomainError::missing_field(field));
        }
        self.parse_gender()?;
        self.parse_purpose()?;
        Ok(())
    }
}

/// Check the intake form an add-on asks for.
///
/// Add-ons without a form accept anything, including no form at all.
pub fn validate_energization_selection(
    addon: &EnergizationAddon,
    form: Option<&EnergizationForm>,
) -> DomainResult<()> {
    if !addon.requires_form {
        return Ok(());
    }
    match form {
        Some(form) => form.validate(),
        None => Err(DomainError::missing_field("wearerName")),
    }
}

/// An add-on chosen at checkout, with its form when one was filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergizationSelection {
    pub addon: EnergizationAddon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<EnergizationForm>,
}

impl EnergizationSelection {
    pub fn new(addon: EnergizationAddon, form_data: Option<EnergizationForm>) -> Self {
        Self { addon, form_data }
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_energization_selection(&self.addon, self.form_data.as_ref())
    }

    pub fn price_delta(&self) -> Decimal {
        self.addon.price_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sattva_core::ValidationError;

    fn form_addon() -> EnergizationAddon {
        EnergizationAddon::new("Personal Puja Energization", Decimal::new(1100, 0), true)
    }

    fn complete_form() -> EnergizationForm {
        EnergizationForm {
            wearer_name: Some("Asha Verma".to_string()),
            dob: Some("1990-04-12".to_string()),
            birth_place: Some("Varanasi".to_string()),
            time: Some("06:45".to_string()),
            gender: Some("female".to_string()),
            gotra: None,
            purpose: Some("wealth-fortune".to_string()),
        }
    }

    fn expect_missing(result: DomainResult<()>, expected: &str) {
        match result.unwrap_err() {
            DomainError::Validation(ValidationError::MissingField(field)) => {
                assert_eq!(field, expected)
            }
            other => panic!("Expected MissingField({expected}), got {other:?}"),
        }
    }

    #[test]
    fn formless_addon_accepts_anything() {
        let addon = EnergizationAddon::new("Temple Energization", Decimal::new(251, 0), false);
        assert!(validate_energization_selection(&addon, None).is_ok());
        assert!(validate_energization_selection(&addon, Some(&EnergizationForm::default())).is_ok());
    }

    #[test]
    fn complete_form_passes_without_gotra() {
        assert!(validate_energization_selection(&form_addon(), Some(&complete_form())).is_ok());
    }

    #[test]
    fn blank_wearer_name_is_missing() {
        let form = EnergizationForm {
            wearer_name: Some(String::new()),
            ..complete_form()
        };
        expect_missing(validate_energization_selection(&form_addon(), Some(&form)), "wearerName");
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let form = EnergizationForm {
            birth_place: Some("   ".to_string()),
            ..complete_form()
        };
        expect_missing(form.validate(), "birthPlace");
    }

    #[test]
    fn missing_fields_reported_in_fixed_order() {
        let form = EnergizationForm {
            dob: None,
            time: None,
            purpose: None,
            ..complete_form()
        };
        expect_missing(form.validate(), "dob");

        let form = EnergizationForm {
            time: None,
            purpose: None,
            ..complete_form()
        };
        expect_missing(form.validate(), "time");

        let form = EnergizationForm {
            gender: None,
            purpose: None,
            ..complete_form()
        };
        expect_missing(form.validate(), "gender");
    }

    #[test]
    fn absent_form_reports_first_field() {
        expect_missing(validate_energization_selection(&form_addon(), None), "wearerName");
    }

    #[test]
    fn unknown_gender_is_invalid_enum() {
        let form = EnergizationForm {
            gender: Some("unknown".to_string()),
            ..complete_form()
        };
        match form.validate().unwrap_err() {
            DomainError::Validation(ValidationError::InvalidEnum { field, value }) => {
                assert_eq!(field, "gender");
                assert_eq!(value, "unknown");
            }
            other => panic!("Expected InvalidEnum, got {other:?}"),
        }
    }

    #[test]
    fn unknown_purpose_is_invalid_enum() {
        let form = EnergizationForm {
            purpose: Some("fame".to_string()),
            ..complete_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.code(), "invalid_enum");
    }

    #[test]
    fn missing_field_wins_over_invalid_enum() {
        let form = EnergizationForm {
            gender: Some("unknown".to_string()),
            purpose: None,
            ..complete_form()
        };
        expect_missing(form.validate(), "purpose");
    }

    #[test]
    fn parses_typed_values() {
        let form = complete_form();
        assert_eq!(form.parse_gender().unwrap(), Gender::Female);
        assert_eq!(form.parse_purpose().unwrap(), Purpose::WealthFortune);
        assert_eq!("personal-relations".parse::<Purpose>().unwrap(), Purpose::PersonalRelations);
    }

    #[test]
    fn form_deserializes_from_camel_case() {
        let form: EnergizationForm = serde_json::from_str(
            r#"{"wearerName":"Ravi","dob":"1985-01-01","birthPlace":"Pune","time":"10:00","gender":"male","purpose":"health"}"#,
        )
        .unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.gotra, None);
    }

    #[test]
    fn selection_validates_through_its_addon() {
        let selection = EnergizationSelection::new(form_addon(), Some(complete_form()));
        assert!(selection.validate().is_ok());
        assert_eq!(selection.price_delta(), Decimal::new(1100, 0));

        let selection = EnergizationSelection::new(form_addon(), None);
        assert!(selection.validate().is_err());
    }
}
