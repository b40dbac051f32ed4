use cobridge_copybook::{extract_fields, list_variable_names, FieldKind};
use proptest::prelude::*;

fn data_name() -> impl Strategy<Value = String> {
    "[A-Z]{2,6}-[A-Z0-9]{1,6}"
}

proptest! {
    #[test]
    fn prop_declared_shape_is_recovered(
        level in 1u8..50,
        name in data_name(),
        class in prop_oneof![Just("9"), Just("X"), Just("A")],
        length in 1usize..40,
        places in proptest::option::of(0usize..6),
    ) {
        let decimal = places.map(|p| format!("V9({p})")).unwrap_or_default();
        let line = format!("       {level:02} {name} PIC {class}({length}){decimal}.");

        let fields = extract_fields(&line);
        prop_assert_eq!(fields.len(), 1);
        let field = &fields[0];
        prop_assert_eq!(&field.name, &name);
        prop_assert_eq!(field.length, length);
        prop_assert_eq!(field.kind == FieldKind::Numeric, class == "9");
        prop_assert_eq!(field.is_decimal, places.is_some());
        prop_assert_eq!(field.decimal_places, places.unwrap_or(0));
    }

    #[test]
    fn prop_listing_never_repeats_a_name(names in proptest::collection::vec(data_name(), 0..12)) {
        let source: String = names
            .iter()
            .map(|n| format!("       05 {n} PIC X(3).\n"))
            .collect();

        let listed = list_variable_names(&source);
        let mut deduped = listed.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(listed.len(), deduped.len());
        prop_assert_eq!(extract_fields(&source).len(), names.len());
    }
}

#[test]
fn working_storage_section() {
    let source = r"
       IDENTIFICATION DIVISION.
       PROGRAM-ID. PAYROLL.
       DATA DIVISION.
       WORKING-STORAGE SECTION.
       01  EMPLOYEE-RECORD.
           05  EMP-ID          PIC 9(6).
           05  EMP-NAME        PIC X(30).
           05  EMP-SALARY      PIC 9(7)V9(2).
           05  EMP-GRADE       PIC A.
       PROCEDURE DIVISION.
           DISPLAY EMP-NAME.
           STOP RUN.
";
    let fields = extract_fields(source);
    let summary: Vec<_> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.kind, f.length, f.decimal_places))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("EMP-ID", FieldKind::Numeric, 6, 0),
            ("EMP-NAME", FieldKind::Text, 30, 0),
            ("EMP-SALARY", FieldKind::Numeric, 7, 2),
            ("EMP-GRADE", FieldKind::Text, 1, 0),
        ]
    );
}
