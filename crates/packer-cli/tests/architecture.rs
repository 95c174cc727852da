use arch_lint::rules::{NoErrorSwallowing, NoSilentResultDrop};
use arch_lint::{Analyzer, Severity};

/// Errors must reach the top-level handler: no swallowed `Err` arms and no
/// dropped `Result`s anywhere in the crates (test code excluded).
#[test]
fn errors_are_never_swallowed() {
    let crates_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory");

    let analyzer = Analyzer::builder()
        .root(crates_dir)
        .exclude("**/target/**")
        .exclude("**/tests/**")
        .rule(NoErrorSwallowing::new())
        .rule(NoSilentResultDrop::new())
        .build()
        .expect("build analyzer");

    let result = analyzer.analyze().expect("analyze");

    assert!(
        !result.has_violations_at(Severity::Warning),
        "{}",
        result.format_test_report(Severity::Warning)
    );
}
