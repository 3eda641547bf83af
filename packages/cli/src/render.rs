use console::{style, Term};
use common::{Submission, SubmissionStatus};
use workspace_core::{CaseOutcome, CaseState, ProblemWorkspace, SplitLayout, WorkspaceError};

/// Width the panes are laid out against, from the attached terminal.
pub fn viewport_width() -> u32 {
    let (_rows, cols) = Term::stdout().size();
    u32::from(cols)
}

pub fn header(workspace: &ProblemWorkspace) {
    let problem = workspace.problem();
    println!();
    println!(
        "{}  {}  {}",
        style(&problem.title).bold(),
        difficulty_badge(problem.difficulty.label()),
        style(format!(
            "{} ms · {} MB",
            problem.time_limit_ms, problem.memory_limit_mb
        ))
        .dim(),
    );
    if !problem.tags.is_empty() {
        println!("{}", style(problem.tags.join(", ")).dim());
    }
    println!(
        "Language: {}",
        style(workspace.language().label()).cyan()
    );
}

fn difficulty_badge(label: &str) -> console::StyledObject<&str> {
    match label {
        "Easy" => style(label).green(),
        "Medium" => style(label).yellow(),
        _ => style(label).red(),
    }
}

/// The description and editor panes, side by side at the stored split, or
/// stacked when the viewport is too narrow.
pub fn panes(workspace: &ProblemWorkspace, layout: &SplitLayout) {
    let description = description_text(workspace);
    let code = workspace.code().to_string();
    let width = viewport_width();

    println!();
    if SplitLayout::is_stacked(width) {
        println!("{}", style("— Description —").dim());
        println!("{description}");
        println!("{}", style("— Code —").dim());
        println!("{code}");
    } else {
        let sizes = layout.load(workspace.problem().id);
        println!("{}", two_columns(&description, &code, sizes, width as usize));
    }
}

fn description_text(workspace: &ProblemWorkspace) -> String {
    let problem = workspace.problem();
    let mut text = problem.description.clone();
    if let Some(constraints) = &problem.constraints {
        text.push_str("\n\nConstraints:\n");
        text.push_str(constraints);
    }
    for (index, case) in workspace.test_cases().samples().enumerate() {
        text.push_str(&format!(
            "\n\nExample {}:\nInput:\n{}\nExpected Output:\n{}",
            index + 1,
            case.input,
            case.expected_output
        ));
        if let Some(explanation) = &case.explanation {
            text.push_str(&format!("\nExplanation: {explanation}"));
        }
    }
    text
}

/// Lay two texts out as columns sized by the split percentages.
fn two_columns(left: &str, right: &str, sizes: [f64; 2], total_width: usize) -> String {
    let usable = total_width.saturating_sub(3).max(20);
    let left_width = ((usable as f64) * sizes[0] / 100.0) as usize;
    let right_width = usable - left_width;

    let left_lines = wrap_lines(left, left_width);
    let right_lines = wrap_lines(right, right_width);

    let mut out = String::new();
    let rows = left_lines.len().max(right_lines.len());
    for row in 0..rows {
        let l = left_lines.get(row).map(String::as_str).unwrap_or("");
        let r = right_lines.get(row).map(String::as_str).unwrap_or("");
        out.push_str(&format!("{l:<left_width$} {} {r}\n", style("│").dim()));
    }
    out
}

fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut chars = line.chars().collect::<Vec<_>>();
        while !chars.is_empty() {
            let take = chars.len().min(width);
            lines.push(chars[..take].iter().collect());
            chars.drain(..take);
        }
    }
    lines
}

/// Per-case pass/fail/not-yet-run markers plus the summary line.
pub fn outcomes(outcomes: &[CaseOutcome]) {
    if outcomes.is_empty() {
        println!("{}", style("No sample test cases available").dim());
        return;
    }

    println!();
    for (index, outcome) in outcomes.iter().enumerate() {
        let kind = if outcome.test_case.is_custom {
            "Custom"
        } else {
            "Case"
        };
        let marker = match outcome.state() {
            CaseState::Passed => style("✓ Passed").green(),
            CaseState::Failed => style("✗ Failed").red(),
            CaseState::NotRun => style("○ Not yet run").dim(),
        };
        println!("{kind} {}: {marker}", index + 1);

        if let Some(result) = &outcome.result {
            if !result.passed {
                println!("    Input:    {}", outcome.test_case.input);
                println!("    Expected: {}", outcome.test_case.expected_output);
                if let Some(actual) = &result.actual_output {
                    println!("    Actual:   {actual}");
                }
                if let Some(message) = &result.error_message {
                    println!("    Error:    {}", style(message).red());
                }
            }
            if let Some(runtime) = result.runtime_ms {
                println!("    {}", style(format!("Runtime: {runtime} ms")).dim());
            }
        }
    }

    let with_result = outcomes
        .iter()
        .filter(|o| o.state() != CaseState::NotRun)
        .count();
    if with_result > 0 {
        let passed = outcomes
            .iter()
            .filter(|o| o.state() == CaseState::Passed)
            .count();
        let summary = format!("{passed} / {with_result} passed");
        let summary = if passed == with_result {
            style(summary).green()
        } else {
            style(summary).red()
        };
        println!("\nSample tests: {summary}");
    }
}

/// Submission status line: verdict plus resource usage.
pub fn submission(submission: &Submission) {
    let status = status_style(submission.status);
    print!("\nSubmission #{}: {status}", submission.id);
    if let Some(runtime) = submission.runtime_ms {
        print!("  {}", style(format!("Runtime: {runtime} ms")).dim());
    }
    if let Some(memory) = submission.memory_kb {
        print!(
            "  {}",
            style(format!("Memory: {:.2} MB", f64::from(memory) / 1024.0)).dim()
        );
    }
    println!();
    let (passed, total) = submission.passed_counts();
    if total > 0 {
        println!("Passed: {passed} / {total}");
    }
}

fn status_style(status: SubmissionStatus) -> console::StyledObject<&'static str> {
    let label = status.label();
    match status {
        SubmissionStatus::Accepted => style(label).green(),
        SubmissionStatus::Pending | SubmissionStatus::Running => style(label).dim(),
        SubmissionStatus::TimeLimitExceeded => style(label).yellow(),
        SubmissionStatus::MemoryLimitExceeded => style(label).magenta(),
        _ => style(label).red(),
    }
}

/// Dismissible error banner.
pub fn error_banner(error: &WorkspaceError) {
    println!("\n{}", style(format!("⚠ {error}")).red());
}

/// Inline validation message, next to the offending control rather than a
/// blocking dialog.
pub fn validation(error: &WorkspaceError) {
    println!("{}", style(error.to_string()).yellow());
}
