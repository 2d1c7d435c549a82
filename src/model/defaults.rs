//! Built-in dataset used when storage holds no boards.

use super::board::{Board, BoardsState, Column, Subtask, Task};

fn task(title: &str, description: &str, status: &str, subtasks: &[(&str, bool)]) -> Task {
    Task {
        description: (!description.is_empty()).then(|| description.to_string()),
        status: Some(status.to_string()),
        subtasks: Some(
            subtasks
                .iter()
                .map(|(title, done)| Subtask {
                    is_completed: *done,
                    ..Subtask::new(*title)
                })
                .collect(),
        ),
        ..Task::new(title)
    }
}

fn column(name: &str, tasks: Vec<Task>) -> Column {
    Column {
        tasks,
        ..Column::new(name)
    }
}

/// The default boards, with ids assigned
pub fn default_state() -> BoardsState {
    BoardsState::new(default_boards())
}

pub fn default_boards() -> Vec<Board> {
    vec![platform_launch(), marketing_plan(), roadmap()]
}

fn platform_launch() -> Board {
    Board::new(
        "Platform Launch",
        vec![
            column(
                "Todo",
                vec![
                    task(
                        "Build UI for onboarding flow",
                        "",
                        "Todo",
                        &[
                            ("Sign up page", true),
                            ("Sign in page", false),
                            ("Welcome page", false),
                        ],
                    ),
                    task(
                        "Build UI for search",
                        "",
                        "Todo",
                        &[("Search page", false)],
                    ),
                    task(
                        "Build settings UI",
                        "",
                        "Todo",
                        &[("Account page", false), ("Billing page", false)],
                    ),
                    task(
                        "QA and test all major user journeys",
                        "Once we feel version one is ready, we need to rigorously test it both internally and externally to identify any major gaps.",
                        "Todo",
                        &[("Internal testing", false), ("External testing", false)],
                    ),
                ],
            ),
            column(
                "Doing",
                vec![
                    task(
                        "Design settings and search pages",
                        "",
                        "Doing",
                        &[
                            ("Settings - Account page", true),
                            ("Settings - Billing page", true),
                            ("Search page", false),
                        ],
                    ),
                    task(
                        "Add account management endpoints",
                        "",
                        "Doing",
                        &[
                            ("Upgrade plan", true),
                            ("Cancel plan", true),
                            ("Update payment method", false),
                        ],
                    ),
                    task(
                        "Design onboarding flow",
                        "",
                        "Doing",
                        &[
                            ("Sign up page", true),
                            ("Sign in page", false),
                            ("Welcome page", false),
                        ],
                    ),
                ],
            ),
            column(
                "Done",
                vec![
                    task(
                        "Conduct 5 wireframe tests",
                        "Ensure the layout continues to make sense and we have strong buy-in from potential users.",
                        "Done",
                        &[("Complete 5 wireframe prototype tests", true)],
                    ),
                    task(
                        "Create wireframe prototype",
                        "Create a greyscale clickable wireframe prototype to test our assumptions so far.",
                        "Done",
                        &[("Create clickable wireframe prototype in Balsamiq", true)],
                    ),
                    task(
                        "Review results of usability tests and iterate",
                        "Keep iterating through the subtasks until we're clear on the core concepts for the app.",
                        "Done",
                        &[
                            ("Meet to review notes from previous tests and plan changes", true),
                            ("Make changes to paper prototypes", true),
                            ("Conduct 5 usability tests", true),
                        ],
                    ),
                ],
            ),
        ],
    )
}

fn marketing_plan() -> Board {
    Board::new(
        "Marketing Plan",
        vec![
            column(
                "Todo",
                vec![
                    task(
                        "Plan Product Hunt launch",
                        "",
                        "Todo",
                        &[("Find hunter", false), ("Gather assets", false), ("Draft product page", false)],
                    ),
                    task(
                        "Share on Show HN",
                        "",
                        "Todo",
                        &[("Draft out HN post", false), ("Get feedback and refine", false), ("Publish post", false)],
                    ),
                    task(
                        "Write launch article to publish on multiple channels",
                        "",
                        "Todo",
                        &[("Write article", false), ("Publish on LinkedIn", false), ("Publish on Medium", false)],
                    ),
                ],
            ),
            column("Doing", Vec::new()),
            column("Done", Vec::new()),
        ],
    )
}

fn roadmap() -> Board {
    Board::new(
        "Roadmap",
        vec![
            column(
                "Now",
                vec![
                    task(
                        "Launch version one",
                        "",
                        "Now",
                        &[("Launch privately to our waitlist", false), ("Launch publicly on PH, HN, etc.", false)],
                    ),
                    task(
                        "Review early feedback and plan next steps for roadmap",
                        "Beyond the initial launch, we're keeping the initial roadmap completely empty. This meeting will help us plan out our next steps based on actual customer feedback.",
                        "Now",
                        &[("Interview 10 customers", false), ("Review common customer pain points and suggestions", false), ("Outline next steps for our roadmap", false)],
                    ),
                ],
            ),
            column("Next", Vec::new()),
            column("Later", Vec::new()),
        ],
    )
}
