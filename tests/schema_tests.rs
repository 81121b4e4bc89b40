//! Schema builder behaviour across the declared-type families.


use arrowmodel_core::model::LiteralValue;
use arrowmodel_core::schema::TimeUnit;
use arrowmodel_core::{
    ColumnType, Constraints, DeclaredType, EnumDef, ErrorKind, Field, RecordDef, Schema,
    SchemaOptions,
};
use arrowmodel_resolve::{build_schema, build_schema_by_name};
use model_fixtures::*;

fn build(record: RecordDef) -> arrowmodel_core::Result<Schema> {
    let catalog = single(record.clone());
    build_schema(&catalog, &record, &SchemaOptions::default())
}

fn item(data_type: ColumnType, nullable: bool) -> ColumnType {
    ColumnType::list(Field::new("item", data_type, nullable))
}

fn millis() -> ColumnType {
    ColumnType::Timestamp {
        unit: TimeUnit::Millisecond,
        timezone: None,
    }
}

#[test]
fn test_simple_types() {
    let record = RecordDef::new(
        "SimpleModel",
        vec![
            field("a", DeclaredType::Str),
            field("b", DeclaredType::Bool),
            field("c", DeclaredType::Int),
            field("d", DeclaredType::Float),
            field("e", DeclaredType::Bytes),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Utf8, false),
        Field::new("b", ColumnType::Boolean, false),
        Field::new("c", ColumnType::Int64, false),
        Field::new("d", ColumnType::Float64, false),
        Field::new("e", ColumnType::Binary, false),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_unknown_type() {
    let record = RecordDef::new(
        "SimpleModel",
        vec![field("a", DeclaredType::Opaque("Deque[int]".into()))],
    );
    let err = build(record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    assert_eq!(err.path().unwrap().to_string(), "a");
    assert!(err.to_string().contains("Deque[int]"));
}

#[test]
fn test_positive_ints() {
    let record = RecordDef::new(
        "IntModel",
        vec![
            field("a", DeclaredType::Int),
            field("b", positive_int()),
            field("c", DeclaredType::Int).with_constraints(Constraints::none().ge(0)),
            field("d", DeclaredType::Int).with_constraints(Constraints::none().ge(-1)),
            field("e", opt(positive_int())),
            field("f", DeclaredType::list(positive_int())),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Int64, false),
        Field::new("b", ColumnType::UInt64, false),
        Field::new("c", ColumnType::UInt64, false),
        Field::new("d", ColumnType::Int64, false),
        Field::new("e", ColumnType::UInt64, true),
        Field::new("f", item(ColumnType::UInt64, false), false),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_nullable_types() {
    let record = RecordDef::new(
        "NullableModel",
        vec![
            field("a", DeclaredType::Str),
            field("b", opt(DeclaredType::Str)),
            field("c", DeclaredType::Int),
            field("d", opt(DeclaredType::Int)),
        ],
    );
    let schema = build(record).unwrap();
    let nullable: Vec<bool> = schema.fields.iter().map(|f| f.nullable).collect();
    assert_eq!(nullable, vec![false, true, false, true]);
}

#[test]
fn test_date_types_with_no_tz() {
    let record = RecordDef::new(
        "DateModel",
        vec![
            field("a", DeclaredType::Date),
            field("b", DeclaredType::NaiveDatetime),
            field("c", DeclaredType::Time),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Date32, false),
        Field::new("b", millis(), false),
        Field::new("c", ColumnType::Time64(TimeUnit::Microsecond), false),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_date_types_with_tz() {
    let record = RecordDef::new(
        "DateModel",
        vec![
            field("a", DeclaredType::Datetime),
            field("b", DeclaredType::AwareDatetime),
        ],
    );
    let catalog = single(record.clone());
    let opts = SchemaOptions::new().allow_losing_tz(true);
    let expected = Schema::new(vec![
        Field::new("a", millis(), false),
        Field::new("b", millis(), false),
    ]);
    assert_eq!(build_schema(&catalog, &record, &opts).unwrap(), expected);
}

#[test]
fn test_datetime_without_flag() {
    let record = RecordDef::new("DateModel", vec![field("a", DeclaredType::Datetime)]);
    let err = build(record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimezoneLoss);
    assert!(err
        .to_string()
        .contains("only allowed if ok losing timezone information"));
}

#[test]
fn test_awaredatetime_without_flag() {
    let record = RecordDef::new("DateModel", vec![field("a", DeclaredType::AwareDatetime)]);
    let err = build(record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimezoneLoss);
}

#[test]
fn test_decimal() {
    let record = RecordDef::new(
        "DecimalModel",
        vec![
            field("a", decimal(5, 2)),
            field("b", opt(decimal(5, 2))),
            field("c", DeclaredType::Decimal).with_constraints(Constraints::none().decimal(16, 3)),
            field("d", DeclaredType::Decimal).with_constraints(Constraints::none().decimal(10, 2)),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Decimal { precision: 5, scale: 2 }, false),
        Field::new("b", ColumnType::Decimal { precision: 5, scale: 2 }, true),
        Field::new("c", ColumnType::Decimal { precision: 16, scale: 3 }, false),
        Field::new("d", ColumnType::Decimal { precision: 10, scale: 2 }, false),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_bare_decimal_should_fail() {
    let record = RecordDef::new("DecimalModel", vec![field("a", DeclaredType::Decimal)]);
    let err = build(record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecimalParametersMissing);
    assert!(err.to_string().contains("max_digits and decimal_places"));
}

#[test]
fn test_decimal_missing_scale_should_fail() {
    let only_digits = Constraints {
        max_digits: Some(10),
        ..Constraints::default()
    };
    let record = RecordDef::new(
        "DecimalModel",
        vec![field("a", DeclaredType::Decimal).with_constraints(only_digits)],
    );
    assert_eq!(
        build(record).unwrap_err().kind(),
        ErrorKind::DecimalParametersMissing
    );
}

#[test]
fn test_nested_model() {
    let nested = RecordDef::new(
        "NestedModel",
        vec![field("a", DeclaredType::Str), field("b", DeclaredType::Int)],
    );
    let outer = RecordDef::new(
        "OuterModel",
        vec![
            field("c", DeclaredType::record("NestedModel")),
            field("d", opt(DeclaredType::record("NestedModel"))),
        ],
    );
    let catalog = single(nested).with_record(outer);

    let nested_fields = ColumnType::Struct(vec![
        Field::new("a", ColumnType::Utf8, false),
        Field::new("b", ColumnType::Int64, false),
    ]);
    let expected = Schema::new(vec![
        Field::new("c", nested_fields.clone(), false),
        Field::new("d", nested_fields, true),
    ]);
    let actual = build_schema_by_name(&catalog, "OuterModel", &SchemaOptions::default()).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_nested_list_of_records() {
    let catalog = nested_list_catalog();
    let schema = build_schema_by_name(&catalog, "OuterModel", &SchemaOptions::default()).unwrap();

    let expected = Schema::new(vec![Field::new(
        "nested",
        item(
            ColumnType::Struct(vec![Field::new("str_field", ColumnType::Utf8, false)]),
            false,
        ),
        false,
    )]);
    assert_eq!(schema, expected);
}

#[test]
fn test_literal() {
    let record = RecordDef::new(
        "LiteralModel",
        vec![
            field(
                "a",
                DeclaredType::Literal(vec![
                    LiteralValue::Str("a".into()),
                    LiteralValue::Str("b".into()),
                ]),
            ),
            field(
                "b",
                DeclaredType::Literal(vec![LiteralValue::Int(1), LiteralValue::Int(2)]),
            ),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Dictionary, false),
        Field::new("b", ColumnType::Int64, false),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_bytes_literal_fails() {
    let record = RecordDef::new(
        "LiteralModel",
        vec![field(
            "a",
            DeclaredType::Literal(vec![
                LiteralValue::Bytes(b"a".to_vec()),
                LiteralValue::Bytes(b"b".to_vec()),
            ]),
        )],
    );
    let err = build(record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    assert!(err.to_string().contains("all strings or all integers"));
}

#[test]
fn test_lists() {
    let record = RecordDef::new(
        "ListModel",
        vec![
            field("a", DeclaredType::list(DeclaredType::Str)),
            field("b", DeclaredType::list(decimal(5, 2))),
            field("c", DeclaredType::list(opt(DeclaredType::Str))),
            field("d", DeclaredType::list(opt(decimal(5, 2)))),
            field("e", opt(DeclaredType::list(DeclaredType::Int))),
        ],
    );
    let dec = ColumnType::Decimal {
        precision: 5,
        scale: 2,
    };
    let expected = Schema::new(vec![
        Field::new("a", item(ColumnType::Utf8, false), false),
        Field::new("b", item(dec.clone(), false), false),
        Field::new("c", item(ColumnType::Utf8, true), false),
        Field::new("d", item(dec, true), false),
        Field::new("e", item(ColumnType::Int64, false), true),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_enum_str() {
    let my_enum = EnumDef::of_strings("MyEnum", &["val1", "val2", "val3"]);
    let record = RecordDef::new(
        "EnumModel",
        vec![
            field("a", DeclaredType::Enum(my_enum.clone())),
            field("b", DeclaredType::list(DeclaredType::Enum(my_enum.clone()))),
            field("c", opt(DeclaredType::Enum(my_enum))),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Dictionary, false),
        Field::new("b", item(ColumnType::Dictionary, false), false),
        Field::new("c", ColumnType::Dictionary, true),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_enum_int() {
    let my_enum = int_enum("MyEnum", &[1, 2, 3]);
    let record = RecordDef::new(
        "EnumModel",
        vec![
            field("a", DeclaredType::Enum(my_enum.clone())),
            field("b", DeclaredType::list(DeclaredType::Enum(my_enum.clone()))),
            field("c", opt(DeclaredType::Enum(my_enum))),
        ],
    );
    let expected = Schema::new(vec![
        Field::new("a", ColumnType::Int64, false),
        Field::new("b", item(ColumnType::Int64, false), false),
        Field::new("c", ColumnType::Int64, true),
    ]);
    assert_eq!(build(record).unwrap(), expected);
}

#[test]
fn test_enum_mixed() {
    let mut mixed = int_enum("MyEnum", &[1]);
    mixed.members.push(arrowmodel_core::model::EnumMember {
        name: "val2".into(),
        value: LiteralValue::Str("val2".into()),
    });
    let record = RecordDef::new("EnumModel", vec![field("a", DeclaredType::Enum(mixed))]);
    assert_eq!(build(record).unwrap_err().kind(), ErrorKind::UnsupportedType);
}

#[test]
fn test_map_field() {
    let record = RecordDef::new(
        "MapModel",
        vec![field(
            "m",
            DeclaredType::map(DeclaredType::Str, opt(DeclaredType::Float)),
        )],
    );
    let schema = build(record).unwrap();
    let ColumnType::Map { key, value } = &schema.fields[0].data_type else {
        panic!("expected a map column");
    };
    assert_eq!(**key, Field::new("key", ColumnType::Utf8, false));
    assert_eq!(**value, Field::new("value", ColumnType::Float64, true));
    assert!(!schema.fields[0].nullable);
}

#[test]
fn test_optional_map_key_fails_fast() {
    let record = RecordDef::new(
        "MapModel",
        vec![field(
            "m",
            DeclaredType::map(opt(DeclaredType::Str), DeclaredType::Int),
        )],
    );
    let err = build(record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NullableMapKey);
    assert_eq!(err.path().unwrap().to_string(), "m");
}

#[test]
fn test_uuid_field() {
    let record = RecordDef::new("Ids", vec![field("id", DeclaredType::Uuid)]);
    let schema = build(record).unwrap();
    assert_eq!(schema.fields[0].data_type, ColumnType::Uuid);
}

#[test]
fn test_field_count_and_order_match_declaration() {
    let catalog = kitchen_sink();
    let person = catalog.record("Person").unwrap();

    let all = build_schema(&catalog, person, &SchemaOptions::default()).unwrap();
    let declared: Vec<&str> = person.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(all.names(), declared);

    let opts = SchemaOptions::new().exclude_fields(true);
    let kept = build_schema(&catalog, person, &opts).unwrap();
    let expected: Vec<&str> = person
        .fields
        .iter()
        .filter(|f| !f.exclude)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(kept.names(), expected);
    assert_eq!(kept.index_of("password"), None);
}

#[test]
fn test_idempotent() {
    let catalog = kitchen_sink();
    let opts = SchemaOptions::new().by_alias(true).exclude_fields(true);
    let first = build_schema_by_name(&catalog, "Person", &opts).unwrap();
    let second = build_schema_by_name(&catalog, "Person", &opts).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn test_alias_falls_back_to_name() {
    let catalog = kitchen_sink();
    let opts = SchemaOptions::new().by_alias(true);
    let schema = build_schema_by_name(&catalog, "Person", &opts).unwrap();
    let home = schema.field_with_name("home").unwrap();
    assert!(home.nullable);
    let names: Vec<&str> = home.children().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["street", "postalCode"]);

    let plain = build_schema_by_name(&catalog, "Person", &SchemaOptions::default()).unwrap();
    let names: Vec<&str> = plain
        .field_with_name("home")
        .unwrap()
        .children()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["street", "zip"]);
}

#[test]
fn test_mutual_recursion_is_detected() {
    let a = RecordDef::new("A", vec![field("b", opt(DeclaredType::record("B")))]);
    let b = RecordDef::new("B", vec![field("a", DeclaredType::list(DeclaredType::record("A")))]);
    let catalog = single(a).with_record(b);
    let err = build_schema_by_name(&catalog, "A", &SchemaOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicStructure);
    assert_eq!(err.path().unwrap().to_string(), "b.a");
    assert!(err.to_string().contains("A -> B -> A"));
}

#[test]
fn test_shared_record_is_not_a_cycle() {
    let catalog = kitchen_sink();
    let schema = build_schema_by_name(&catalog, "Person", &SchemaOptions::default()).unwrap();
    assert!(schema.field_with_name("home").is_some());
    assert!(schema.field_with_name("past").is_some());
}

#[test]
fn test_options_from_json_and_schema_serializes() {
    let opts: SchemaOptions = serde_json::from_str(r#"{"by_alias": true}"#).unwrap();
    assert!(opts.by_alias);
    assert!(!opts.exclude_fields);
    assert!(!opts.allow_losing_tz);

    let schema = build_schema_by_name(&nested_list_catalog(), "OuterModel", &opts).unwrap();
    let json = serde_json::to_string(&schema).unwrap();
    let back: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(back, schema);
}
