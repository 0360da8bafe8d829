//! Calendar date <-> day-of-year converter.

use crate::form_hook::use_form_reducer;
use crate::forms::{DoyConverterForm, DoyField};
use dioxus::prelude::*;
use gnss_core::doy::{date_from_day, day_from_date_str};
use gnss_core::form_state::FormAction;

/// Two inputs converted live: a UTC date to `year doy h m s`, and back.
#[component]
pub fn DoyConverter() -> Element {
    let mut form = use_form_reducer(DoyConverterForm::default);
    let current = form.value();

    let as_doy = if current.calendar.trim().is_empty() {
        String::new()
    } else {
        // unparseable dates come back as blank fields
        let doy = day_from_date_str(&current.calendar);
        if doy.trim().is_empty() {
            "invalid date".to_string()
        } else {
            doy
        }
    };
    let as_date = if current.day_of_year.trim().is_empty() {
        String::new()
    } else {
        match date_from_day(&current.day_of_year) {
            Ok(date) => date.to_rfc3339(),
            Err(e) => e.to_string(),
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: grid; grid-template-columns: auto 220px auto; gap: 6px 12px; align-items: center;",
            label { style: "font-weight: bold;", "UTC date:" }
            input {
                r#type: "text",
                placeholder: "2024-03-05T12:30:00Z",
                value: "{current.calendar}",
                oninput: move |evt: Event<FormData>| form.dispatch(FormAction::ChangeValue {
                    input_name: DoyField::Calendar,
                    input_value: evt.value(),
                }),
            }
            span { style: "font-family: monospace;", "{as_doy}" }
            label { style: "font-weight: bold;", "Year DOY:" }
            input {
                r#type: "text",
                placeholder: "2024 65 12 30 0",
                value: "{current.day_of_year}",
                oninput: move |evt: Event<FormData>| form.dispatch(FormAction::ChangeValue {
                    input_name: DoyField::DayOfYear,
                    input_value: evt.value(),
                }),
            }
            span { style: "font-family: monospace;", "{as_date}" }
        }
    }
}
