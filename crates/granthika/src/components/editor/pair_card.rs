use dioxus::prelude::*;

use granthika_core::qa::QaPairSet;

#[derive(Clone, Copy, PartialEq)]
enum PairField {
    QEn,
    AEn,
    QHi,
    AHi,
    QSa,
    ASa,
}

fn with_field(mut pair: QaPairSet, field: PairField, value: String) -> QaPairSet {
    match field {
        PairField::QEn => pair.q_en = value,
        PairField::AEn => pair.a_en = value,
        PairField::QHi => pair.q_hi = value,
        PairField::AHi => pair.a_hi = value,
        PairField::QSa => pair.q_sa = value,
        PairField::ASa => pair.a_sa = value,
    }
    pair
}

/// One generated pair: selection checkbox plus six editable fields.
#[component]
pub fn PairCard(
    index: usize,
    pair: QaPairSet,
    selected: bool,
    on_toggle: EventHandler<usize>,
    on_edit: EventHandler<(usize, QaPairSet)>,
) -> Element {
    let fields = [
        ("Question · English", PairField::QEn, pair.q_en.clone()),
        ("Answer · English", PairField::AEn, pair.a_en.clone()),
        ("Question · Hindi", PairField::QHi, pair.q_hi.clone()),
        ("Answer · Hindi", PairField::AHi, pair.a_hi.clone()),
        ("Question · Sanskrit", PairField::QSa, pair.q_sa.clone()),
        ("Answer · Sanskrit", PairField::ASa, pair.a_sa.clone()),
    ];
    let display_number = index + 1;

    rsx! {
        article { class: if selected { "gk-pair-card" } else { "gk-pair-card gk-pair-card--excluded" },
            header { class: "gk-pair-header",
                label { class: "gk-pair-select",
                    input {
                        r#type: "checkbox",
                        checked: selected,
                        onchange: move |_| on_toggle.call(index),
                    }
                    span { "Pair {display_number}" }
                }
                if !selected {
                    span { class: "gk-tag gk-tag--muted", "Excluded from save" }
                }
            }
            div { class: "gk-pair-grid",
                for (label, field, value) in fields {
                    {
                        let base = pair.clone();
                        rsx! {
                            div { class: "gk-pair-field",
                                label { class: "gk-pair-label", "{label}" }
                                textarea {
                                    class: "gk-pair-input",
                                    rows: "2",
                                    value: "{value}",
                                    oninput: move |evt| {
                                        on_edit.call((index, with_field(base.clone(), field, evt.value())));
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
