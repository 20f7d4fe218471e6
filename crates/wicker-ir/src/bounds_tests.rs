use serde_json::{Value, json};

use crate::bounds::{Boundary, Distance};
use crate::error::IrError;

#[test]
fn closed_boundary_keeps_both_bounds() {
    let b = Boundary::closed(2, 4).unwrap();
    assert_eq!(b.min(), 2);
    assert_eq!(b.max(), Some(4));
}

#[test]
fn inverted_boundary_is_rejected() {
    assert_eq!(
        Boundary::closed(4, 2),
        Err(IrError::InvertedBoundary { min: 4, max: 2 })
    );
}

#[test]
fn negative_min_is_rejected() {
    assert_eq!(Boundary::closed(-1, 2), Err(IrError::MissingMin(-1)));
}

#[test]
fn quantifier_spellings() {
    let cases = [
        ("{2,4}", 2, Some(4)),
        ("{2,}", 2, None),
        ("*", 0, None),
        ("+", 1, None),
        ("?", 0, Some(1)),
        ("{0}", 0, Some(0)),
    ];
    for (text, min, max) in cases {
        let b = Boundary::from_quantifier(text).unwrap();
        assert_eq!(b.min(), min, "min of {text}");
        assert_eq!(b.max(), max, "max of {text}");
    }
}

#[test]
fn bad_quantifiers_are_rejected() {
    for text in ["", "{", "{a}", "{1,2,3}", "x"] {
        assert!(matches!(
            Boundary::from_quantifier(text),
            Err(IrError::BadQuantifier(_))
        ));
    }
}

#[test]
fn boundary_doc_omits_unset_max() {
    let b = Boundary::at_least(1).unwrap();
    assert_eq!(
        Value::Object(b.doc()),
        json!({"@type": "ir:boundary", "min": 1})
    );
}

#[test]
fn distance_doc_nests_its_boundary() {
    let d = Distance::new("s", Boundary::exact(0).unwrap());
    assert_eq!(
        Value::Object(d.doc()),
        json!({
            "@type": "ir:distance",
            "key": "s",
            "boundary": {"@type": "ir:boundary", "min": 0, "max": 0}
        })
    );
}

#[test]
fn word_distance_is_the_default_key() {
    let d = Distance::words(Boundary::exact(1).unwrap());
    assert_eq!(d.key, "w");
}
