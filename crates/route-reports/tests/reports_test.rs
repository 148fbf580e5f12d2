//! Reports computed over a scanned project.

use route_core::{Dialect, GeneratorConfig};
use route_reports::{PerformanceReport, RouteAnalytics, audit, render_markdown};
use route_scan::{RouteScanner, RouteTable};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> (TempDir, RouteTable) {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "pages/index.tsx", "export default function Home() {}");
    write(temp.path(), "pages/about.tsx", "export default function About() {}");
    write(
        temp.path(),
        "pages/blog/[slug].tsx",
        "export default function Post({ post }) {\n  if (!post) return null;\n  return post.title ?? \"\";\n}\n",
    );
    write(
        temp.path(),
        "pages/search.tsx",
        "export interface QueryParams {\n  q: string;\n}\nexport default function Search() {}\n",
    );

    let config = GeneratorConfig {
        input_dir: PathBuf::from("pages"),
        dialect: Dialect::NextPages,
        ..Default::default()
    };
    let table = RouteScanner::new(&config)
        .unwrap()
        .with_base_dir(temp.path())
        .scan();
    (temp, table)
}

#[test]
fn test_analytics_over_scanned_routes() {
    let (_temp, table) = project();
    let analytics = RouteAnalytics::from_entries(table.entries(), Dialect::NextPages);

    assert_eq!(analytics.total_routes, 4);
    assert_eq!(analytics.dynamic_routes, 1);
    assert_eq!(analytics.routes_with_query, 1);
    assert_eq!(analytics.param_frequency["slug"], 1);
    assert!(analytics.to_json().unwrap().contains("\"dialect\": \"next-pages\""));
}

#[test]
fn test_audit_usage_and_untyped_literals() {
    let (temp, table) = project();
    write(
        temp.path(),
        "src/nav.tsx",
        "import { routes } from \"./routes\";\n\
         export const links = [routes.home(), routes.about(), routes.about()];\n\
         export const legacy = \"/blog/first-post\";\n",
    );
    write(
        temp.path(),
        "src/routes.ts",
        "// Generated by typed-routes from pages (next-pages). Do not edit by hand.\n\
         export const search = \"/search\";\n",
    );
    write(temp.path(), "src/node_modules/lib/index.js", "routes.search();");

    let report = audit(&table, &temp.path().join("src")).unwrap();

    assert_eq!(report.scanned_files, 1);
    assert_eq!(report.most_used[0].name, "about");
    assert_eq!(report.most_used[0].count, 2);
    assert_eq!(report.most_used[1].name, "home");
    assert_eq!(report.unused, vec!["blog.slug".to_string(), "search".to_string()]);

    assert_eq!(report.untyped_paths.len(), 1);
    let literal = &report.untyped_paths[0];
    assert_eq!(literal.line, 3);
    assert_eq!(literal.route, "blog.slug");
    assert!(literal.file.ends_with("src/nav.tsx"));
}

#[test]
fn test_audit_missing_source_dir() {
    let (temp, table) = project();
    let err = audit(&table, &temp.path().join("nope")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_performance_over_scanned_routes() {
    let (_temp, table) = project();
    let report = PerformanceReport::from_entries(table.entries());

    assert_eq!(report.files.len(), 4);
    let post = report
        .files
        .iter()
        .find(|f| f.route_path == "/blog/:slug")
        .unwrap();
    assert_eq!(post.lines, 4);
    assert_eq!(post.complexity, 2);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_docs_over_scanned_routes() {
    let (_temp, table) = project();
    let markdown = render_markdown(table.entries());

    assert!(markdown.contains("4 routes in 4 groups."));
    assert!(markdown.contains("| `search` | `/search` | - | `q: string` |"));
}
