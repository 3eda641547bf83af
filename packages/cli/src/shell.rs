use std::sync::Arc;

use anyhow::Context;
use common::Language;
use console::style;
use dialoguer::{Confirm, Editor, Input, Select};
use workspace_core::api::{JudgeService, ProblemCatalog};
use workspace_core::tabs::TAB_PARAM;
use workspace_core::{
    AttemptOutcome, KeyValueStore, Location, MemoryLocation, ProblemWorkspace, SplitLayout,
    TabSync, WorkspaceError, WorkspaceTab,
};

use crate::render;

enum MenuAction {
    EditCode,
    Run,
    Submit,
    SwitchLanguage,
    SwitchTab,
    ManageTestCases,
    AdjustSplit,
    DismissError,
    Quit,
}

impl MenuAction {
    fn label(&self) -> &'static str {
        match self {
            Self::EditCode => "Edit code",
            Self::Run => "Run",
            Self::Submit => "Submit",
            Self::SwitchLanguage => "Switch language",
            Self::SwitchTab => "Switch tab",
            Self::ManageTestCases => "Manage test cases",
            Self::AdjustSplit => "Adjust split",
            Self::DismissError => "Dismiss error message",
            Self::Quit => "Quit",
        }
    }
}

/// The interactive problem workspace.
pub async fn problem_shell(
    judge: Arc<dyn JudgeService>,
    catalog: Arc<dyn ProblemCatalog>,
    store: Arc<dyn KeyValueStore>,
    problem_id: i32,
    language: Language,
    initial_tab: Option<String>,
) -> anyhow::Result<()> {
    let location = Arc::new(MemoryLocation::new());
    if let Some(tab) = initial_tab {
        location.set_query(TAB_PARAM, &tab);
    }
    let tabs = TabSync::new(location);
    let layout = SplitLayout::new(store.clone());

    let mut workspace =
        ProblemWorkspace::open(judge, catalog, store, problem_id, language).await?;

    loop {
        render_view(&workspace, &tabs, &layout);

        let mut actions = vec![
            MenuAction::EditCode,
            MenuAction::Run,
            MenuAction::Submit,
            MenuAction::SwitchLanguage,
            MenuAction::SwitchTab,
            MenuAction::ManageTestCases,
            MenuAction::AdjustSplit,
        ];
        if workspace.last_error().is_some() {
            actions.push(MenuAction::DismissError);
        }
        actions.push(MenuAction::Quit);

        let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();
        let choice = Select::new()
            .with_prompt("Workspace")
            .items(&labels)
            .default(0)
            .interact()
            .context("Workspace prompt failed")?;

        match actions[choice] {
            MenuAction::EditCode => edit_code(&mut workspace)?,
            MenuAction::Run => {
                let attempt = workspace.run().await;
                match attempt {
                    Ok(outcome) => report_attempt(&workspace, outcome),
                    Err(error) => render::validation(&error),
                }
            }
            MenuAction::Submit => {
                let attempt = workspace.submit().await;
                match attempt {
                    Ok(outcome) => report_attempt(&workspace, outcome),
                    Err(error) => render::validation(&error),
                }
            }
            MenuAction::SwitchLanguage => switch_language(&mut workspace)?,
            MenuAction::SwitchTab => switch_tab(&tabs)?,
            MenuAction::ManageTestCases => manage_test_cases(&mut workspace).await?,
            MenuAction::AdjustSplit => adjust_split(&workspace, &layout)?,
            MenuAction::DismissError => workspace.dismiss_error(),
            MenuAction::Quit => {
                workspace.blur();
                break;
            }
        }
    }

    Ok(())
}

fn render_view(workspace: &ProblemWorkspace, tabs: &TabSync, layout: &SplitLayout) {
    render::header(workspace);

    let active = tabs.active_tab();
    let tab_line = WorkspaceTab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", style(tab_line).dim());

    match active {
        WorkspaceTab::Description => {
            render::panes(workspace, layout);
            render::outcomes(&workspace.outcomes());
        }
        WorkspaceTab::Solutions => {
            println!(
                "\n{}",
                style("Community solutions are published after you solve the problem.").dim()
            );
        }
        WorkspaceTab::Submissions => match workspace.submission() {
            Some(submission) => render::submission(&submission),
            None => println!("\n{}", style("No submissions in this session yet.").dim()),
        },
    }

    if let Some(error) = workspace.last_error() {
        render::error_banner(&error);
    }
}

fn report_attempt(workspace: &ProblemWorkspace, outcome: AttemptOutcome) {
    match outcome {
        AttemptOutcome::Applied => {
            render::outcomes(&workspace.outcomes());
            if let Some(submission) = workspace.submission() {
                render::submission(&submission);
            }
        }
        AttemptOutcome::Busy => {
            println!("{}", style("An execution is already in flight").yellow());
        }
        AttemptOutcome::Discarded => {
            println!("{}", style("Stale response discarded").dim());
        }
        AttemptOutcome::Failed => {
            if let Some(error) = workspace.last_error() {
                render::error_banner(&error);
            }
        }
    }
}

fn edit_code(workspace: &mut ProblemWorkspace) -> anyhow::Result<()> {
    let extension = format!(".{}", workspace.language().extension());
    let edited = Editor::new()
        .extension(&extension)
        .edit(workspace.code())
        .context("Editor failed")?;
    if let Some(code) = edited {
        workspace.set_code(code);
        workspace.blur();
    }
    Ok(())
}

fn switch_language(workspace: &mut ProblemWorkspace) -> anyhow::Result<()> {
    let labels: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
    let current = Language::ALL
        .iter()
        .position(|l| *l == workspace.language())
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Language")
        .items(&labels)
        .default(current)
        .interact()
        .context("Language prompt failed")?;
    workspace.set_language(Language::ALL[choice]);
    Ok(())
}

fn switch_tab(tabs: &TabSync) -> anyhow::Result<()> {
    let labels: Vec<&str> = WorkspaceTab::ALL.iter().map(|t| t.label()).collect();
    let current = WorkspaceTab::ALL
        .iter()
        .position(|t| *t == tabs.active_tab())
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Tab")
        .items(&labels)
        .default(current)
        .interact()
        .context("Tab prompt failed")?;
    tabs.set_tab(WorkspaceTab::ALL[choice]);
    Ok(())
}

async fn manage_test_cases(workspace: &mut ProblemWorkspace) -> anyhow::Result<()> {
    let custom = workspace.test_cases().custom.clone();
    let mut labels = vec!["Add custom test case".to_string()];
    for case in &custom {
        labels.push(format!("Edit custom case #{}", case.id));
        labels.push(format!("Delete custom case #{}", case.id));
    }
    labels.push("Back".to_string());

    let choice = Select::new()
        .with_prompt("Test cases")
        .items(&labels)
        .default(0)
        .interact()
        .context("Test case prompt failed")?;

    let result = if choice == 0 {
        let Some((input, expected)) = prompt_test_case("", "")? else {
            return Ok(());
        };
        workspace.add_custom_test_case(&input, &expected).await
    } else if choice < labels.len() - 1 {
        let case = &custom[(choice - 1) / 2];
        if (choice - 1) % 2 == 0 {
            let Some((input, expected)) =
                prompt_test_case(&case.input, &case.expected_output)?
            else {
                return Ok(());
            };
            workspace
                .update_custom_test_case(case.id, &input, &expected)
                .await
        } else {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete custom case #{}?", case.id))
                .default(false)
                .interact()
                .context("Confirm prompt failed")?;
            if !confirmed {
                return Ok(());
            }
            workspace.delete_custom_test_case(case.id).await
        }
    } else {
        return Ok(());
    };

    if let Err(error) = result {
        match error {
            WorkspaceError::Validation(_) => render::validation(&error),
            other => render::error_banner(&other),
        }
    }
    Ok(())
}

fn prompt_test_case(
    input_seed: &str,
    expected_seed: &str,
) -> anyhow::Result<Option<(String, String)>> {
    let Some(input) = Editor::new()
        .extension(".txt")
        .edit(input_seed)
        .context("Editor failed")?
    else {
        return Ok(None);
    };
    let Some(expected) = Editor::new()
        .extension(".txt")
        .edit(expected_seed)
        .context("Editor failed")?
    else {
        return Ok(None);
    };
    Ok(Some((input, expected)))
}

fn adjust_split(workspace: &ProblemWorkspace, layout: &SplitLayout) -> anyhow::Result<()> {
    let problem_id = workspace.problem().id;
    let width = render::viewport_width();
    if SplitLayout::is_stacked(width) {
        println!(
            "{}",
            style("Terminal too narrow for a split; panes are stacked").dim()
        );
        return Ok(());
    }

    let current = layout.load(problem_id);
    let left: f64 = Input::new()
        .with_prompt("Description pane width %")
        .default(current[0])
        .interact_text()
        .context("Split prompt failed")?;
    let applied = layout.on_drag_end(problem_id, [left, 100.0 - left]);
    println!(
        "{}",
        style(format!("Split set to {:.0} / {:.0}", applied[0], applied[1])).dim()
    );
    Ok(())
}
