//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use cloudscore_test_util::{fixture_names, fixtures_dir, normalize_nondeterministic};
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(cloudscore_types::CloudscoreReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(cloudscore_settings::CloudscoreConfigV1)
}

fn generate_catalog_schema() -> schemars::Schema {
    schema_for!(cloudscore_settings::CatalogFileV1)
}

fn generate_inventory_schema() -> schemars::Schema {
    schema_for!(cloudscore_settings::InventoryFileV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "cloudscore.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "cloudscore.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "cloudscore.catalog.v1.json",
            generate: generate_catalog_schema,
        },
        SchemaSpec {
            filename: "cloudscore.inventory.v1.json",
            generate: generate_inventory_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture inputs and golden reports against the schemas");
    eprintln!("  conform-full      conform + run the cloudscore binary over every fixture");
}

fn compile(spec_generate: fn() -> schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value((spec_generate)()).context("Failed to convert schema")?;
    jsonschema::validator_for(&schema).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_toml_as_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn collect_errors(
    validator: &jsonschema::Validator,
    value: &Value,
    label: &str,
    errors: &mut Vec<String>,
) {
    for err in validator.iter_errors(value) {
        errors.push(format!("{label}: schema validation: {err}"));
    }
}

/// Inputs without a `schema` key may use the legacy field names, which the schemas do not describe.
fn declares_schema(value: &Value) -> bool {
    value.get("schema").is_some_and(Value::is_string)
}

/// Validate every fixture against the generated schemas.
///
/// Checks:
/// 1. `catalog.json`, `assets.json`, and `cloudscore.toml` that declare a `schema` match it
/// 2. `expected.report.json` matches the report schema and only uses placeholders for
///    nondeterministic fields
fn conform() -> anyhow::Result<()> {
    let report = compile(generate_report_schema)?;
    let config = compile(generate_config_schema)?;
    let catalog = compile(generate_catalog_schema)?;
    let inventory = compile(generate_inventory_schema)?;
    println!("✓ schemas compile");

    let names = fixture_names();
    if names.is_empty() {
        bail!("no fixtures found under {}", fixtures_dir().display());
    }

    let mut errors = Vec::new();
    for name in &names {
        let dir = fixtures_dir().join(name);

        for (file, validator) in [("catalog.json", &catalog), ("assets.json", &inventory)] {
            let path = dir.join(file);
            if path.exists() {
                let value = read_json(&path)?;
                if declares_schema(&value) {
                    collect_errors(validator, &value, &format!("{name}/{file}"), &mut errors);
                }
            }
        }
        let config_path = dir.join("cloudscore.toml");
        if config_path.exists() {
            let value = read_toml_as_json(&config_path)?;
            if declares_schema(&value) {
                collect_errors(&config, &value, &format!("{name}/cloudscore.toml"), &mut errors);
            }
        }

        let golden_path = dir.join("expected.report.json");
        if golden_path.exists() {
            let golden = read_json(&golden_path)?;
            collect_errors(&report, &golden, &format!("{name}/expected.report.json"), &mut errors);
            if normalize_nondeterministic(golden.clone()) != golden {
                errors.push(format!(
                    "{name}/expected.report.json: timestamps and tool.version must use placeholders"
                ));
            }
        }
        println!("  ✓ fixture '{}' checked", name);
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ {} fixtures conform", names.len());
    Ok(())
}

/// `conform` plus: run the built binary over every fixture and diff against its golden report.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    println!("\n--- Full conformance: cloudscore binary output ---\n");

    let report_validator = compile(generate_report_schema)?;
    let bin = project_root().join("target").join("debug").join("cloudscore");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "cloudscore binary not found at {}.\n\
            Run `cargo build -p cloudscore-cli` first.",
            bin.display()
        );
    }

    let mut errors = Vec::new();
    for name in fixture_names() {
        let dir = fixtures_dir().join(&name);
        let golden_path = dir.join("expected.report.json");
        if !golden_path.exists() {
            continue;
        }

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .arg("--config")
            .arg(dir.join("cloudscore.toml"))
            .arg("assess")
            .arg("--catalog")
            .arg(dir.join("catalog.json"))
            .arg("--assets")
            .arg(dir.join("assets.json"))
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run cloudscore on fixture '{}'", name))?;

        if !output.status.success() {
            errors.push(format!(
                "fixture '{}': cloudscore exited with {:?}: {}",
                name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let actual = read_json(&report_out)?;
        collect_errors(&report_validator, &actual, &format!("fixture '{name}'"), &mut errors);

        if normalize_nondeterministic(actual) != normalize_nondeterministic(read_json(&golden_path)?) {
            errors.push(format!(
                "fixture '{}': output differs from golden file expected.report.json",
                name
            ));
        } else {
            println!("  ✓ fixture '{}' matches golden report", name);
        }
    }

    if !errors.is_empty() {
        eprintln!("\nFull conformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Full conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ Full conformance checks passed!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
