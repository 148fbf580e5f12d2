//! Integration tests for the CLI command workflow.

use route_cli::commands::{audit, docs, generate, init, perf};
use route_cli::{GenerateArgs, exit_code_for, load_config};
use route_core::cli::{ExitCode, OutputFormat};
use route_core::{Dialect, GeneratorConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small Next.js pages project with an application source tree.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "pages/index.tsx", "export default function Home() {}");
    write(root, "pages/about.tsx", "export default function About() {}");
    write(root, "pages/blog/[slug].tsx", "export default function Post() {}");
    write(
        root,
        "pages/search.tsx",
        "export interface QueryParams {\n  q: string;\n  page?: number;\n}\n",
    );
    write(root, "pages/api/users/[id].ts", "export default function handler() {}");
    write(
        root,
        "src/nav.tsx",
        "import { routes } from \"./routes\";\nexport const links = [routes.about(), routes.blog.slug({ slug: \"x\" })];\nexport const legacy = \"/about\";\n",
    );
    temp
}

fn config_for(temp: &TempDir, args: GenerateArgs) -> GeneratorConfig {
    let path = temp.path().join("typed-routes.toml");
    init::write_default_config(&path, None, true).unwrap();

    let args = GenerateArgs {
        input: Some(temp.path().join("pages")),
        output: Some(temp.path().join("src/routes.ts")),
        ..args
    };
    load_config(Some(&path), args.into_overrides()).unwrap()
}

#[test]
fn test_init_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("typed-routes.toml");

    let summary = init::write_default_config(&path, Some(Dialect::TanStack), false).unwrap();
    assert_eq!(summary.path, path);

    let config = load_config(Some(&path), GenerateArgs::default().into_overrides()).unwrap();
    assert_eq!(config.dialect, Dialect::TanStack);

    let args = GenerateArgs {
        dialect: Some(Dialect::Nuxt),
        ..Default::default()
    };
    let config = load_config(Some(&path), args.into_overrides()).unwrap();
    assert_eq!(config.dialect, Dialect::Nuxt);
}

#[test]
fn test_missing_config_file_is_invalid_input() {
    let temp = TempDir::new().unwrap();
    let err = load_config(
        Some(&temp.path().join("missing.toml")),
        GenerateArgs::default().into_overrides(),
    )
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

#[test]
fn test_generate_all_artifacts() {
    let temp = project();
    let config = config_for(
        &temp,
        GenerateArgs {
            tests: true,
            api: true,
            analytics: true,
            ..Default::default()
        },
    );

    let summary = generate::generate_once(&config).unwrap();
    assert_eq!(summary.routes, 5);
    assert_eq!(summary.files.len(), 4);

    let src = temp.path().join("src");
    let module = fs::read_to_string(src.join("routes.ts")).unwrap();
    assert!(module.contains("about: () => \"/about\","));
    assert!(module.contains("slug: (params: { slug: string }) => `/blog/${params.slug}`,"));
    assert!(module.contains("search: (query: { q: string; page?: number })"));

    let suite = fs::read_to_string(src.join("routes.test.ts")).unwrap();
    assert!(suite.contains("import { routes } from \"./routes\";"));

    let api = fs::read_to_string(src.join("routes.api.ts")).unwrap();
    assert!(api.contains("usersId"));

    let analytics = fs::read_to_string(src.join("routes.analytics.json")).unwrap();
    let analytics: serde_json::Value = serde_json::from_str(&analytics).unwrap();
    assert_eq!(analytics["totalRoutes"], 5);
    assert_eq!(analytics["routesWithQuery"], 1);
}

#[test]
fn test_no_query_flag() {
    let temp = project();
    let config = config_for(
        &temp,
        GenerateArgs {
            no_query: true,
            ..Default::default()
        },
    );

    generate::generate_once(&config).unwrap();
    let module = fs::read_to_string(temp.path().join("src/routes.ts")).unwrap();
    assert!(module.contains("search: () => \"/search\","));
}

#[test]
fn test_regeneration_is_stable() {
    let temp = project();
    let config = config_for(&temp, GenerateArgs::default());

    generate::generate_once(&config).unwrap();
    let first = fs::read_to_string(temp.path().join("src/routes.ts")).unwrap();
    generate::generate_once(&config).unwrap();
    let second = fs::read_to_string(temp.path().join("src/routes.ts")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_write_failure_exit_code() {
    let temp = project();
    write(temp.path(), "blocked", "not a directory");

    let mut config = config_for(&temp, GenerateArgs::default());
    config.output_file = temp.path().join("blocked/routes.ts");

    let err = generate::run(config, OutputFormat::Json).await.unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::WRITE_FAILED);
    assert!(format!("{err:#}").contains("Failed to write"));
}

#[tokio::test]
async fn test_audit_and_reports_after_generate() {
    let temp = project();
    let config = config_for(&temp, GenerateArgs::default());
    generate::generate_once(&config).unwrap();

    let code = audit::run(config.clone(), &temp.path().join("src"), OutputFormat::Json)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let code = perf::run(config.clone(), OutputFormat::Text).await.unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let output = temp.path().join("ROUTES.md");
    let code = docs::run(config, Some(output.clone()), OutputFormat::Pretty)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    let markdown = fs::read_to_string(output).unwrap();
    assert!(markdown.contains("## /blog"));
    assert!(markdown.contains("`q: string`, `page?: number`"));
}

#[test]
fn test_audit_report_contents() {
    let temp = project();
    let config = config_for(&temp, GenerateArgs::default());
    let table = route_scan::scan_routes(&config).unwrap();
    generate::generate_once(&config).unwrap();

    let report = route_reports::audit(&table, &temp.path().join("src")).unwrap();
    assert_eq!(report.scanned_files, 1);
    assert!(report.unused.contains(&"home".to_string()));
    assert_eq!(report.untyped_paths.len(), 1);
    assert_eq!(report.untyped_paths[0].route, "about");
    assert_eq!(report.untyped_paths[0].line, 3);
}
