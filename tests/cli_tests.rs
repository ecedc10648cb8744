//! CLI command tests

#[cfg(feature = "cli")]
mod cli_command_tests {
    use odata_explorer_sdk::cli::commands::export::{ExportArgs, ExportFormat, handle_export};
    use odata_explorer_sdk::cli::commands::inspect::{
        InspectArgs, handle_inspect, handle_search, handle_show, render_entity_detail,
    };
    use odata_explorer_sdk::cli::commands::load_schemas;
    use odata_explorer_sdk::cli::commands::validate::handle_validate;
    use odata_explorer_sdk::cli::error::CliError;
    use odata_explorer_sdk::import::NormalizeOptions;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, tempdir};

    fn fixture(name: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn inspect_args(name: &str) -> InspectArgs {
        InspectArgs {
            input: fixture(name),
            options: NormalizeOptions::default(),
        }
    }

    #[test]
    fn test_cli_inspect_show_search() {
        let args = inspect_args("northwind_v2_metadata.json");
        assert!(handle_inspect(&args).is_ok());
        assert!(handle_show(&args, "Product", true).is_ok());
        assert!(handle_search(&args, "Order").is_ok());
    }

    #[test]
    fn test_cli_show_unknown_entity_type() {
        let args = inspect_args("northwind_v2_metadata.json");
        let err = handle_show(&args, "Territory", false).unwrap_err();
        assert!(matches!(err, CliError::EntityTypeNotFound(_)));
    }

    #[test]
    fn test_cli_detail_lists_navigation_targets() {
        let schemas = load_schemas(
            &fixture("northwind_v2_metadata.xml"),
            NormalizeOptions::default(),
        )
        .unwrap();
        let detail = render_entity_detail(&schemas, "Order", false).unwrap();
        assert!(detail.contains("## Order"));
        assert!(detail.contains("| Customer | NorthwindModel.FK_Orders_Customers | Orders | Customers | Customer |"));
    }

    #[test]
    fn test_cli_missing_input_file() {
        let err = load_schemas("/nonexistent/metadata.xml", NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_cli_export_markdown() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("northwind.md");
        let args = ExportArgs::new(
            ExportFormat::Markdown,
            fixture("northwind_v2_metadata.xml"),
            &output,
        );

        handle_export(&args).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("# NorthwindModel"));
    }

    #[test]
    fn test_cli_export_dot_into_directory_uses_graph_name() {
        let dir = tempdir().unwrap();
        let args = ExportArgs::new(
            ExportFormat::Dot,
            fixture("northwind_v2_metadata.json"),
            dir.path(),
        );

        handle_export(&args).unwrap();
        let content = std::fs::read_to_string(dir.path().join("OData-Model.dot")).unwrap();
        assert!(content.starts_with("digraph"));
    }

    #[test]
    fn test_cli_export_refuses_overwrite_without_force() {
        let output = NamedTempFile::new().unwrap();
        let mut args = ExportArgs::new(
            ExportFormat::GraphJson,
            fixture("northwind_v2_metadata.json"),
            output.path(),
        );

        let err = handle_export(&args).unwrap_err();
        assert!(matches!(err, CliError::OutputExists(_)));

        args.force = true;
        handle_export(&args).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output.path()).unwrap()).unwrap();
        assert_eq!(value["edges"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn test_cli_validate() {
        assert!(
            handle_validate(
                &fixture("northwind_v2_metadata.json"),
                NormalizeOptions::default()
            )
            .is_ok()
        );

        let mut broken = NamedTempFile::new().unwrap();
        write!(
            broken,
            r#"{{"dataServices": {{"schema": [{{"entityType": [{{
                "name": "Customer",
                "navigationProperty": [{{
                    "name": "Orders",
                    "relationship": "Demo.Missing",
                    "fromRole": "A",
                    "toRole": "B"
                }}]
            }}]}}]}}}}"#
        )
        .unwrap();
        broken.flush().unwrap();

        let err = handle_validate(
            &broken.path().to_string_lossy(),
            NormalizeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::DiagnosticsFailed(1)));
    }
}
