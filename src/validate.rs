use std::str::FromStr;

use serde::Deserialize;

use crate::{Field, FieldError, Gender, UserQuery, ValidationError};

/// Form fields exactly as submitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RawForm {
    pub sector: Option<String>,
    pub subdistrict: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "sejjel")]
    pub value: Option<String>,
}

impl RawForm {
    /// Decode the form from an `application/x-www-form-urlencoded` query.
    ///
    /// Unknown keys are ignored; a repeated field is an error.
    pub fn from_query(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(query)
    }
}

/// Check every field and coerce the form into a query.
///
/// All fields are always inspected so the error lists each problem, but
/// the error displays as one generic message.
pub fn validate(form: &RawForm) -> Result<UserQuery, ValidationError> {
    let mut fields = Vec::new();

    let sector = numeric::<u32>(form.sector.as_deref(), Field::Sector, &mut fields);
    let subdistrict = numeric::<u32>(form.subdistrict.as_deref(), Field::Subdistrict, &mut fields);
    let value = numeric::<u64>(form.value.as_deref(), Field::Value, &mut fields);
    let gender = gender(form.gender.as_deref(), &mut fields);

    match (sector, subdistrict, gender, value) {
        (Some(sector), Some(subdistrict), Some(gender), Some(value)) => Ok(UserQuery {
            sector,
            subdistrict,
            gender,
            value,
        }),
        _ => Err(ValidationError { fields }),
    }
}

fn numeric<T: FromStr>(raw: Option<&str>, field: Field, errors: &mut Vec<FieldError>) -> Option<T> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        errors.push(FieldError::Missing(field));
        return None;
    }

    // Plain decimal digits only: no signs, fractions or exponents.
    let parsed = raw
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| raw.parse::<T>().ok())
        .flatten();
    if parsed.is_none() {
        errors.push(FieldError::NotNumeric(field));
    }
    parsed
}

fn gender(raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<Gender> {
    match raw.map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::Missing(Field::Gender));
            None
        }
        Some(code) => {
            let parsed = code.parse::<Gender>().ok();
            if parsed.is_none() {
                errors.push(FieldError::UnknownGender);
            }
            parsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawForm, validate};
    use crate::{Field, FieldError, Gender, INVALID_INPUT_MESSAGE, UserQuery};

    fn form(sector: &str, subdistrict: &str, gender: &str, value: &str) -> RawForm {
        RawForm {
            sector: Some(sector.to_string()),
            subdistrict: Some(subdistrict.to_string()),
            gender: Some(gender.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn accepts_and_coerces_valid_input() {
        let query = validate(&form("1", " 4 ", "F", "150")).unwrap();

        assert_eq!(
            query,
            UserQuery {
                sector: 1,
                subdistrict: 4,
                gender: Gender::F,
                value: 150,
            }
        );
    }

    #[test]
    fn rejects_empty_sector() {
        let err = validate(&form("", "4", "M", "150")).unwrap_err();

        assert_eq!(err.fields, vec![FieldError::Missing(Field::Sector)]);
    }

    #[test]
    fn rejects_non_numeric_subdistrict() {
        let err = validate(&form("1", "four", "M", "150")).unwrap_err();

        assert_eq!(err.fields, vec![FieldError::NotNumeric(Field::Subdistrict)]);
    }

    #[test]
    fn rejects_unknown_gender() {
        let err = validate(&form("1", "4", "X", "150")).unwrap_err();

        assert_eq!(err.fields, vec![FieldError::UnknownGender]);
    }

    #[test]
    fn rejects_empty_registration_number() {
        let err = validate(&form("1", "4", "M", "")).unwrap_err();

        assert_eq!(err.fields, vec![FieldError::Missing(Field::Value)]);
    }

    #[test]
    fn reports_every_failing_field_with_one_message() {
        let err = validate(&RawForm::default()).unwrap_err();

        assert_eq!(err.fields.len(), 4);
        assert_eq!(err.to_string(), INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn rejects_signs_fractions_and_overflow() {
        assert!(validate(&form("-1", "4", "M", "150")).is_err());
        assert!(validate(&form("1", "4", "M", "1.5")).is_err());
        assert!(validate(&form("1", "4", "M", "1e3")).is_err());
        assert!(validate(&form("4294967296", "4", "M", "150")).is_err());
    }

    #[test]
    fn parses_query_string_fields() {
        let form = RawForm::from_query("sector=1&&subdistrict=4&gender=M&sejjel=150&x=y&bad").unwrap();

        assert_eq!(form.sector.as_deref(), Some("1"));
        assert_eq!(form.subdistrict.as_deref(), Some("4"));
        assert_eq!(form.gender.as_deref(), Some("M"));
        assert_eq!(form.value.as_deref(), Some("150"));
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn decodes_url_encoded_values() {
        let form = RawForm::from_query("sector=%31&subdistrict=4&gender=M&sejjel=+150").unwrap();

        assert_eq!(form.sector.as_deref(), Some("1"));
        assert_eq!(form.value.as_deref(), Some(" 150"));
        assert_eq!(validate(&form).unwrap().value, 150);

        let form = RawForm::from_query("sector=1&subdistrict=4&gender=M&sejjel=%20150").unwrap();
        assert_eq!(validate(&form).unwrap().value, 150);
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let form = RawForm::from_query("gender=F").unwrap();

        assert_eq!(form.sector, None);
        assert_eq!(form.value, None);
        assert!(validate(&form).is_err());
    }

    #[test]
    fn repeated_fields_are_rejected() {
        assert!(RawForm::from_query("sector=1&sector=2").is_err());
    }
}
