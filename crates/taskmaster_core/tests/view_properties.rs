use chrono::NaiveDate;
use taskmaster_core::{count_tasks, filter_tasks, seed_projects, NewTask, Project, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(title: &str, project: &str, due: Option<NaiveDate>, completed: bool) -> Task {
    let mut task = Task::create(NewTask::new(title, project).with_due_date(due)).unwrap();
    task.completed = completed;
    task
}

fn fixture() -> (Vec<Task>, Vec<Project>) {
    let tasks = vec![
        task("Review project proposal", "Work", Some(date(2024, 9, 25)), false),
        task("Buy groceries", "Personal", None, false),
        task("Call dentist", "Personal", Some(date(2024, 9, 23)), true),
        task("Prepare presentation slides", "Work", Some(date(2024, 9, 26)), false),
        task("Renew passport", "Errands", Some(date(2024, 10, 2)), false),
    ];
    (tasks, seed_projects())
}

const SELECTORS: &[&str] = &[
    "inbox", "today", "upcoming", "Work", "Personal", "Health", "unknown",
];

#[test]
fn inbox_without_search_returns_everything_in_order() {
    let (tasks, projects) = fixture();
    let visible = filter_tasks(&tasks, &projects, "inbox", "", date(2024, 9, 25));
    let expected: Vec<&Task> = tasks.iter().collect();
    assert_eq!(visible, expected);
}

#[test]
fn filtering_is_idempotent_for_every_view() {
    let (tasks, projects) = fixture();
    let today = date(2024, 9, 25);

    for selector in SELECTORS {
        for query in ["", "pre", "x"] {
            let once: Vec<Task> = filter_tasks(&tasks, &projects, selector, query, today)
                .into_iter()
                .cloned()
                .collect();
            let twice = filter_tasks(&once, &projects, selector, query, today);
            let once_refs: Vec<&Task> = once.iter().collect();
            assert_eq!(twice, once_refs, "view={selector} query={query}");
        }
    }
}

#[test]
fn visible_tasks_are_an_ordered_subsequence() {
    let (tasks, projects) = fixture();
    for selector in SELECTORS {
        let visible = filter_tasks(&tasks, &projects, selector, "", date(2024, 9, 25));
        let positions: Vec<usize> = visible
            .iter()
            .map(|v| tasks.iter().position(|t| t.id == v.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn inbox_count_ignores_changes_to_completed_tasks() {
    let (mut tasks, projects) = fixture();
    let today = date(2024, 9, 25);
    let before = count_tasks(&tasks, &projects, today);

    let done = tasks.iter_mut().find(|task| task.completed).unwrap();
    done.title = "something else entirely".to_string();
    done.due_date = Some(today);
    let after = count_tasks(&tasks, &projects, today);

    assert_eq!(before, after);
    assert_eq!(after.inbox, tasks.iter().filter(|task| !task.completed).count());
}

#[test]
fn completed_tasks_never_count() {
    let (mut tasks, projects) = fixture();
    for task in &mut tasks {
        task.completed = true;
    }
    let counts = count_tasks(&tasks, &projects, date(2024, 9, 25));
    assert!(counts.entries().all(|(_, count)| count == 0));
}

#[test]
fn counts_cover_views_and_projects() {
    let (tasks, projects) = fixture();
    let counts = count_tasks(&tasks, &projects, date(2024, 9, 25));

    assert_eq!(counts.get("inbox"), Some(4));
    assert_eq!(counts.get("today"), Some(1));
    assert_eq!(counts.get("upcoming"), Some(2));
    assert_eq!(counts.get("Work"), Some(2));
    assert_eq!(counts.get("Personal"), Some(1));
    assert_eq!(counts.get("Shopping"), Some(0));
    assert_eq!(counts.get("Errands"), None);
}

#[test]
fn filtering_never_mutates_inputs() {
    let (tasks, projects) = fixture();
    let snapshot = tasks.clone();
    for selector in SELECTORS {
        let _ = filter_tasks(&tasks, &projects, selector, "a", date(2024, 9, 25));
        let _ = count_tasks(&tasks, &projects, date(2024, 9, 25));
    }
    assert_eq!(tasks, snapshot);
}
