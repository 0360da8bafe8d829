//! Form-state reducer shared by every form and modal.
//!
//! A form's state is a field map: either a concrete record implementing
//! [`FormFields`] with its own field enum, or the dynamic [`FieldValues`]
//! map for forms whose shape is only known at runtime. State changes go
//! through [`FormReducer::reduce`], which never mutates its input.

use crate::error::{GnssError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// A form's field map.
pub trait FormFields: Clone + PartialEq {
    /// Field selector, usually a fieldless enum.
    type Field: Clone + Debug + PartialEq;
    type Value: Clone + Debug + PartialEq;

    /// Overwrite one existing field.
    fn assign(&mut self, field: &Self::Field, value: Self::Value) -> Result<()>;
}

/// Actions accepted by [`FormReducer::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction<F: FormFields> {
    /// Replace the whole state with the payload.
    Set(F),
    /// Replace one field's value, leaving the others untouched.
    ChangeValue {
        input_name: F::Field,
        input_value: F::Value,
    },
    /// Restore the state the reducer was built with.
    Clear,
}

/// Reducer bound to the initial state of one form instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FormReducer<F: FormFields> {
    initial: F,
}

impl<F: FormFields> FormReducer<F> {
    pub fn new(initial: F) -> Self {
        FormReducer { initial }
    }

    pub fn initial(&self) -> &F {
        &self.initial
    }

    pub fn reduce(&self, state: &F, action: FormAction<F>) -> Result<F> {
        match action {
            FormAction::Set(payload) => Ok(payload),
            FormAction::ChangeValue {
                input_name,
                input_value,
            } => {
                let mut next = state.clone();
                next.assign(&input_name, input_value)?;
                Ok(next)
            }
            FormAction::Clear => Ok(self.initial.clone()),
        }
    }
}

/// Field map for dynamically shaped forms, ordered by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(pub BTreeMap<String, Value>);

impl FieldValues {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        FieldValues(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FormFields for FieldValues {
    type Field = String;
    type Value = Value;

    /// Only existing keys can change; callers provide the full shape up
    /// front through the initial state or a `Set`.
    fn assign(&mut self, field: &String, value: Value) -> Result<()> {
        match self.0.get_mut(field) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GnssError::UnknownField(field.clone())),
        }
    }
}

/// Wire form of an action as UI event code sends it, e.g.
/// `{"type": "change_value", "inputName": "lat", "inputValue": "1.5"}`.
#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
    #[serde(default, rename = "inputName")]
    input_name: Option<String>,
    #[serde(default, rename = "inputValue")]
    input_value: Option<Value>,
}

impl FormAction<FieldValues> {
    /// Decode a JSON action. Unrecognized `type` tags fail loudly with
    /// [`GnssError::UnknownAction`].
    pub fn from_json(value: Value) -> Result<Self> {
        let raw: RawAction = serde_json::from_value(value)
            .map_err(|e| GnssError::InvalidPayload(e.to_string()))?;
        match raw.kind.as_str() {
            "set" => {
                let payload = raw
                    .payload
                    .ok_or_else(|| GnssError::InvalidPayload("set without payload".to_string()))?;
                let fields: FieldValues = serde_json::from_value(payload)
                    .map_err(|e| GnssError::InvalidPayload(e.to_string()))?;
                Ok(FormAction::Set(fields))
            }
            "change_value" => {
                let input_name = raw.input_name.ok_or_else(|| {
                    GnssError::InvalidPayload("change_value without inputName".to_string())
                })?;
                Ok(FormAction::ChangeValue {
                    input_name,
                    input_value: raw.input_value.unwrap_or(Value::Null),
                })
            }
            "clear" => Ok(FormAction::Clear),
            other => Err(GnssError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct VisitForm {
        station: String,
        date: String,
        people: Vec<String>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum VisitField {
        Station,
        Date,
    }

    impl FormFields for VisitForm {
        type Field = VisitField;
        type Value = String;

        fn assign(&mut self, field: &VisitField, value: String) -> Result<()> {
            match field {
                VisitField::Station => self.station = value,
                VisitField::Date => self.date = value,
            }
            Ok(())
        }
    }

    fn empty_visit() -> VisitForm {
        VisitForm {
            station: String::new(),
            date: String::new(),
            people: Vec::new(),
        }
    }

    fn filled_visit() -> VisitForm {
        VisitForm {
            station: "igs.quin".to_string(),
            date: "2024 65".to_string(),
            people: vec!["R. Smalley".to_string()],
        }
    }

    #[test]
    fn test_set_ignores_prior_state() {
        let reducer = FormReducer::new(empty_visit());
        let payload = filled_visit();
        for prior in [empty_visit(), filled_visit()] {
            let next = reducer.reduce(&prior, FormAction::Set(payload.clone())).unwrap();
            assert_eq!(next, payload);
        }
    }

    #[test]
    fn test_change_value_isolates_field() {
        let reducer = FormReducer::new(empty_visit());
        let state = filled_visit();
        let next = reducer
            .reduce(
                &state,
                FormAction::ChangeValue {
                    input_name: VisitField::Date,
                    input_value: "2024 66".to_string(),
                },
            )
            .unwrap();
        assert_eq!(next.date, "2024 66");
        assert_eq!(next.station, state.station);
        assert_eq!(next.people, state.people);
        // input untouched
        assert_eq!(state.date, "2024 65");
    }

    #[test]
    fn test_clear_restores_initial_not_empty() {
        let initial = VisitForm {
            station: "cap.unsv".to_string(),
            ..empty_visit()
        };
        let reducer = FormReducer::new(initial.clone());
        let next = reducer.reduce(&filled_visit(), FormAction::Clear).unwrap();
        assert_eq!(next, initial);
        assert_eq!(reducer.initial(), &initial);
    }

    fn dynamic_initial() -> FieldValues {
        [
            ("latitude", json!("")),
            ("longitude", json!("")),
            ("radius", json!(50)),
            ("active", json!(true)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_dynamic_change_value_keeps_keys() {
        let reducer = FormReducer::new(dynamic_initial());
        let state = dynamic_initial();
        let next = reducer
            .reduce(
                &state,
                FormAction::ChangeValue {
                    input_name: "radius".to_string(),
                    input_value: json!(75),
                },
            )
            .unwrap();
        assert_eq!(next.get("radius"), Some(&json!(75)));
        assert_eq!(next.get("active"), Some(&json!(true)));
        assert_eq!(next.keys().collect::<Vec<_>>(), state.keys().collect::<Vec<_>>());
    }

    #[test]
    fn test_dynamic_change_value_never_inserts() {
        let reducer = FormReducer::new(dynamic_initial());
        let err = reducer
            .reduce(
                &dynamic_initial(),
                FormAction::ChangeValue {
                    input_name: "radious".to_string(),
                    input_value: json!(1),
                },
            )
            .unwrap_err();
        assert_eq!(err, GnssError::UnknownField("radious".to_string()));
    }

    #[test]
    fn test_dynamic_set_replaces_keys() {
        let reducer = FormReducer::new(dynamic_initial());
        let payload: FieldValues = [("name", json!("Quincy"))].into_iter().collect();
        let next = reducer
            .reduce(&dynamic_initial(), FormAction::Set(payload.clone()))
            .unwrap();
        assert_eq!(next.keys().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(next, payload);
    }

    #[test]
    fn test_action_from_json() {
        let set = FormAction::<FieldValues>::from_json(json!({"type": "set", "payload": {"a": 1}})).unwrap();
        assert_eq!(set, FormAction::Set([("a", json!(1))].into_iter().collect()));

        let change = FormAction::<FieldValues>::from_json(
            json!({"type": "change_value", "inputName": "a", "inputValue": [1, 2]}),
        )
        .unwrap();
        assert_eq!(
            change,
            FormAction::ChangeValue {
                input_name: "a".to_string(),
                input_value: json!([1, 2]),
            }
        );

        assert_eq!(FormAction::<FieldValues>::from_json(json!({"type": "clear"})).unwrap(), FormAction::Clear);
    }

    #[test]
    fn test_unknown_action_fails_loudly() {
        let err = FormAction::<FieldValues>::from_json(json!({"type": "chnage_value"})).unwrap_err();
        assert_eq!(err, GnssError::UnknownAction("chnage_value".to_string()));
        assert!(matches!(
            FormAction::<FieldValues>::from_json(json!({"type": "set"})),
            Err(GnssError::InvalidPayload(_))
        ));
        assert!(matches!(
            FormAction::<FieldValues>::from_json(json!({"inputName": "a"})),
            Err(GnssError::InvalidPayload(_))
        ));
    }
}
