use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["em", "show", "-v", "-p", "proj", "-t", ":memory:"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "proj");
    assert_eq!(cli.global.target.as_deref(), Some(":memory:"));
    assert!(matches!(cli.command, Commands::Show));
}

#[test]
fn test_set_target_parses_object_type() {
    let cli = Cli::try_parse_from([
        "em",
        "mapping",
        "set-target",
        "--database",
        "DW",
        "--schema",
        "HR",
        "--object",
        "DIM_WORKER",
        "--type",
        "dynamic-table",
    ])
    .unwrap();
    let Commands::Mapping(MappingArgs {
        command: MappingCommand::SetTarget { object_type, mapping, .. },
    }) = cli.command
    else {
        panic!("expected mapping set-target");
    };
    assert_eq!(object_type, ObjectType::DynamicTable);
    assert_eq!(mapping.mapping_id, None);
}

#[test]
fn test_set_target_rejects_unknown_type() {
    let err = Cli::try_parse_from([
        "em", "mapping", "set-target", "--database", "DW", "--schema", "HR", "--object", "X",
        "--type", "table",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("[E003]"));
}

#[test]
fn test_employees_default_file() {
    let cli = Cli::try_parse_from(["em", "employees", "export"]).unwrap();
    let Commands::Employees(EmployeesArgs {
        command: EmployeesCommand::Export { file },
    }) = cli.command
    else {
        panic!("expected employees export");
    };
    assert_eq!(file, PathBuf::from("employees.csv"));
}

#[test]
fn test_catalog_output_flag() {
    let cli = Cli::try_parse_from(["em", "catalog", "tables", "--schema", "SC1", "-o", "json"])
        .unwrap();
    let Commands::Catalog(args) = cli.command else {
        panic!("expected catalog");
    };
    assert_eq!(args.output, OutputFormat::Json);
    assert!(matches!(
        args.command,
        CatalogCommand::Tables { schema: Some(ref s) } if s == "SC1"
    ));
}

#[test]
fn test_select_requires_id() {
    assert!(Cli::try_parse_from(["em", "select", "project"]).is_err());
    assert!(Cli::try_parse_from(["em", "select", "reset"]).is_ok());
}
