//! Contract tests for logical-expression reconstruction over files and history.

use std::io::Write;

use eqn_source::*;
use tempfile::NamedTempFile;

fn script(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_single_line_strips_only_the_comment() {
    let file = script(&["y = x^2; %comment"]);
    let source = FileSource::new(file.path());

    let expr = reconstruct(&source, 1).unwrap();
    assert_eq!(expr.as_str(), "y = x^2;");
    assert_eq!(expr.physical_lines, 1);
}

#[test]
fn test_three_line_chain_is_joined_without_separators() {
    let file = script(&[
        "disp('setup')",
        "y = a + ...   % first part",
        "    b * ...",
        "    c; % done",
    ]);
    let source = FileSource::new(file.path());

    let expr = reconstruct(&source, 4).unwrap();
    assert_eq!(expr.as_str(), "y = a +b *c;");
    assert!(!expr.as_str().contains("..."));
    assert!(!expr.as_str().contains('%'));
    assert_eq!(expr.physical_lines, 3);
    assert_eq!(expr.terminal_line, 4);
}

#[test]
fn test_first_line_of_file_is_returned_as_is() {
    let file = script(&["z = sqrt(x)", "eqn"]);
    let source = FileSource::new(file.path());

    let expr = reconstruct(&source, 1).unwrap();
    assert_eq!(expr.as_str(), "z = sqrt(x)");
}

#[test]
fn test_chain_reaching_top_of_file_stops_cleanly() {
    let file = script(&["a + ...", "b"]);
    let source = FileSource::new(file.path());

    assert_eq!(reconstruct(&source, 2).unwrap().as_str(), "a +b");
}

#[test]
fn test_non_continued_line_above_is_not_included() {
    let file = script(&["w = 1;", "v = 2;"]);
    let source = FileSource::new(file.path());

    assert_eq!(reconstruct(&source, 2).unwrap().as_str(), "v = 2;");
}

#[test]
fn test_start_past_end_of_file_is_unavailable() {
    let file = script(&["x"]);
    let source = FileSource::new(file.path());

    let err = reconstruct(&source, 5).unwrap_err();
    assert!(matches!(
        err,
        ReconstructError::StartLineUnavailable(FetchError::OutOfRange { requested: 5, .. })
    ));
}

#[test]
fn test_missing_file_is_unavailable() {
    let source = FileSource::new("/no/such/script.m");
    assert!(matches!(
        reconstruct(&source, 1),
        Err(ReconstructError::StartLineUnavailable(
            FetchError::NotFound { .. }
        ))
    ));
}

#[test]
fn test_history_with_two_entries_cannot_start_at_three() {
    let history = CommandHistory::from_entries(["a = 1", "b = 2"]);

    let err = reconstruct(&history, 3).unwrap_err();
    assert_eq!(
        err,
        ReconstructError::StartLineUnavailable(FetchError::NoHistory {
            requested: 3,
            available: 2
        })
    );
}

#[test]
fn test_empty_history_reports_no_preceding_context() {
    let history = CommandHistory::new();
    assert_eq!(
        reconstruct(&history, 1).unwrap_err(),
        ReconstructError::NoPrecedingContext
    );
}

#[test]
fn test_history_chain_keeps_source_order() {
    let history = CommandHistory::from_entries(["f = sin(x) + ...", "  cos(x)  "]);

    let expr = reconstruct(&history, 1).unwrap();
    assert_eq!(expr.as_str(), "f = sin(x) +cos(x)");
    assert_eq!(expr.source, SourceId::History);
}

#[test]
fn test_loaded_history_keeps_repeated_continuation_lines() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "y = 1 + ...\n1 + ...\n1 + ...\n1\n").unwrap();

    let history = CommandHistory::load(file.path()).unwrap();
    let expr = reconstruct(&history, 1).unwrap();
    assert_eq!(expr.as_str(), "y = 1 +1 +1 +1");
    assert_eq!(expr.physical_lines, 4);
}

#[test]
fn test_percent_inside_string_is_treated_as_comment() {
    let file = script(&["label = 'growth 5% per year'"]);
    let source = FileSource::new(file.path());

    assert_eq!(
        reconstruct(&source, 1).unwrap().as_str(),
        "label = 'growth 5"
    );
}

#[test]
fn test_script_call_sites_resolve_to_expression_above() {
    let file = script(&[
        "r = 2;",
        "area = pi*r^2 % circle",
        "eqn",
        "v = 4/3*pi*...",
        "    r^3;",
        "eqn(); % again",
    ]);

    let sites = find_call_sites(file.path(), "eqn").unwrap();
    assert_eq!(sites, vec![3, 6]);

    let source = FileSource::new(file.path());
    let rendered: Vec<String> = sites
        .iter()
        .map(|&line| {
            let at = ScriptCallLocator::new(file.path(), line)
                .locate_caller()
                .unwrap();
            reconstruct(&source, at.index).unwrap().into_string()
        })
        .collect();
    assert_eq!(rendered, vec!["area = pi*r^2", "v = 4/3*pi*r^3;"]);
}

#[test]
fn test_call_site_locator_points_at_previous_source_line() {
    let expected_line = line!() as usize;
    let locator = CallSiteLocator::here();

    let at = locator.locate_caller().unwrap();
    assert_eq!(at.index, expected_line);

    let source = FileSource::new(match &at.source {
        SourceId::File(path) => path.clone(),
        SourceId::History => panic!("expected a file location"),
    });
    let line = source.fetch(at.index).unwrap();
    assert!(line.contains("let expected_line = line!()"));
}
