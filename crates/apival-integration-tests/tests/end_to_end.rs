//! # Parse → Emit
//!
//! Documents on disk, through the scanner and import graph, into the
//! files under `internal/types`.

use std::fs;
use std::path::Path;

use apival_codegen::{
    emit, types_dir, EmitOptions, FileAction, Locale, CUSTOM_TRANSLATOR_FILE, TRANSLATOR_FILE,
    VALIDATE_FILE,
};
use apival_schema::{parse, WarningReason};

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(types_dir(dir.path())).unwrap();
    dir
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(types_dir(root).join(file)).unwrap()
}

fn translator_on() -> EmitOptions {
    EmitOptions {
        translator: true,
        ..EmitOptions::default()
    }
}

// =========================================================================
// Single document
// =========================================================================

#[test]
fn user_register_example() {
    let root = project();
    write(
        root.path(),
        "user.api",
        r#"syntax = "v1"

type (
    UserRegisterReq {
        Username string `json:"username" validate:"required,min=3,max=20"`
        Email    string `json:"email" validate:"required,email"`
        Age      int    `json:"age" validate:"gte=0,lte=150"`
        Bio      string `json:"bio,optional"`
    }
    UserRegisterResp {
        Id int64 `json:"id"`
    }
)
"#,
    );

    let schema = parse(root.path().join("user.api")).unwrap();
    assert_eq!(schema.record_count(), 1);
    let record = schema.record("UserRegisterReq").unwrap();
    let names: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Username", "Email", "Age"]);
    assert_eq!(record.fields[2].rule, "gte=0,lte=150");

    let report = emit(&schema.records, &EmitOptions::default(), root.path()).unwrap();
    assert_eq!(report.records, 1);
    assert_eq!(report.action_for(VALIDATE_FILE), Some(FileAction::Written));
    assert_eq!(report.action_for(TRANSLATOR_FILE), None);

    let validate = read(root.path(), VALIDATE_FILE);
    assert!(validate.starts_with("// Code generated by goctl-validate. DO NOT EDIT."));
    assert!(validate.contains("package types"));
    assert!(validate.contains("var validate = validator.New()"));
    assert!(validate.contains("func (r *UserRegisterReq) Validate() error {"));
    assert!(validate.contains("\treturn validate.Struct(r)"));
    assert!(!validate.contains("UserRegisterResp"));
}

#[test]
fn document_without_rules_writes_nothing() {
    let root = project();
    write(
        root.path(),
        "plain.api",
        "type (\n    Ping {\n        Id int64 `json:\"id\"`\n    }\n)\n",
    );

    let schema = parse(root.path().join("plain.api")).unwrap();
    assert!(schema.is_empty());
    let report = emit(&schema.records, &translator_on(), root.path()).unwrap();
    assert_eq!(report.written_count(), 0);
    assert!(!types_dir(root.path()).join(VALIDATE_FILE).exists());
}

// =========================================================================
// Import graph
// =========================================================================

#[test]
fn imported_records_come_first() {
    let root = project();
    write(
        root.path(),
        "main.api",
        r#"syntax = "v1"

import (
    "shared/page.api"
)

type (
    ListReq {
        Keyword string `json:"keyword" validate:"max=64"`
    }
)
"#,
    );
    write(
        root.path(),
        "shared/page.api",
        "type (\n    PageReq {\n        Page int `json:\"page\" validate:\"min=1\"`\n    }\n)\n",
    );

    let schema = parse(root.path().join("main.api")).unwrap();
    let names: Vec<&str> = schema.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["PageReq", "ListReq"]);
    assert_eq!(schema.document_count(), 2);

    emit(&schema.records, &EmitOptions::default(), root.path()).unwrap();
    let validate = read(root.path(), VALIDATE_FILE);
    let page = validate.find("func (r *PageReq)").unwrap();
    let list = validate.find("func (r *ListReq)").unwrap();
    assert!(page < list);
}

#[test]
fn mutual_imports_terminate_with_each_record_once() {
    let root = project();
    write(
        root.path(),
        "a.api",
        "import \"b.api\"\n\ntype (\n    A {\n        X string `validate:\"required\"`\n    }\n)\n",
    );
    write(
        root.path(),
        "b.api",
        "import \"a.api\"\n\ntype (\n    B {\n        Y string `validate:\"required\"`\n    }\n)\n",
    );

    let schema = parse(root.path().join("a.api")).unwrap();
    assert_eq!(schema.record_count(), 2);
    assert_eq!(schema.document_count(), 2);
    assert!(schema.warnings.is_empty());
}

#[test]
fn missing_import_is_a_warning_not_a_failure() {
    let root = project();
    write(
        root.path(),
        "main.api",
        "import \"gone.api\"\n\ntype (\n    Req {\n        Name string `validate:\"required\"`\n    }\n)\n",
    );

    let schema = parse(root.path().join("main.api")).unwrap();
    assert_eq!(schema.record_count(), 1);
    assert_eq!(schema.warnings.len(), 1);
    assert_eq!(schema.warnings[0].raw, "gone.api");
    assert_eq!(schema.warnings[0].reason, WarningReason::NotFound);

    let report = emit(&schema.records, &EmitOptions::default(), root.path()).unwrap();
    assert_eq!(report.records, 1);
}

// =========================================================================
// Regeneration
// =========================================================================

#[test]
fn regeneration_is_byte_identical() {
    let root = project();
    write(
        root.path(),
        "user.api",
        "type (\n    Req {\n        Name string `json:\"name\" validate:\"required\"`\n    }\n)\n",
    );
    let options = EmitOptions {
        translator: true,
        locale: Locale::Ja,
        ..EmitOptions::default()
    };

    let schema = parse(root.path().join("user.api")).unwrap();
    emit(&schema.records, &options, root.path()).unwrap();
    let first_validate = read(root.path(), VALIDATE_FILE);
    let first_translator = read(root.path(), TRANSLATOR_FILE);

    let schema = parse(root.path().join("user.api")).unwrap();
    emit(&schema.records, &options, root.path()).unwrap();
    assert_eq!(read(root.path(), VALIDATE_FILE), first_validate);
    assert_eq!(read(root.path(), TRANSLATOR_FILE), first_translator);
    assert!(first_translator.contains("locales/ja"));
}

#[test]
fn customized_stub_survives_schema_change() {
    let root = project();
    write(
        root.path(),
        "user.api",
        "type (\n    Req {\n        Name string `validate:\"required\"`\n    }\n)\n",
    );

    let schema = parse(root.path().join("user.api")).unwrap();
    let report = emit(&schema.records, &translator_on(), root.path()).unwrap();
    assert_eq!(report.action_for(CUSTOM_TRANSLATOR_FILE), Some(FileAction::Written));

    let custom = "package types\n\n// hand edited\n";
    fs::write(types_dir(root.path()).join(CUSTOM_TRANSLATOR_FILE), custom).unwrap();

    write(
        root.path(),
        "user.api",
        "type (\n    Req {\n        Name string `validate:\"required\"`\n    }\n    Other {\n        Code string `validate:\"len=6\"`\n    }\n)\n",
    );
    let schema = parse(root.path().join("user.api")).unwrap();
    let report = emit(&schema.records, &translator_on(), root.path()).unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(report.action_for(CUSTOM_TRANSLATOR_FILE), Some(FileAction::Preserved));
    assert_eq!(read(root.path(), CUSTOM_TRANSLATOR_FILE), custom);
    assert!(read(root.path(), VALIDATE_FILE).contains("func (r *Other) Validate() error"));
}

#[test]
fn missing_types_dir_is_fatal_only_with_records() {
    let root = tempfile::tempdir().unwrap();
    write(
        root.path(),
        "user.api",
        "type (\n    Req {\n        Name string `validate:\"required\"`\n    }\n)\n",
    );
    let schema = parse(root.path().join("user.api")).unwrap();
    let err = emit(&schema.records, &EmitOptions::default(), root.path()).unwrap_err();
    assert!(err.to_string().contains("types directory not found"));

    assert!(emit(&[], &EmitOptions::default(), root.path()).is_ok());
}
