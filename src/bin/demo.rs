use chrono::NaiveDate;

use task_planner::store::TaskStore;
use task_planner::traits::TaskSource;
use task_planner::{Category, Edge, Planner, Priority, SegmentRole, TaskDraft};

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut store = TaskStore::new();
    seed_demo_tasks(&mut store).await;

    let mut planner = Planner::new(store);
    planner.refresh().await.unwrap();
    planner.show_month_of(date(2024, 1, 1));

    println!("---- before resize ----");
    print_month(&planner);

    // Drag the end edge of the first task back to January 14th: the range collapses
    // to a single day rather than going inverted
    let id = planner.tasks()[0].id().clone();
    planner.begin_resize(id, Edge::End);
    planner.drop_on(14).await.unwrap();

    println!("---- after resize ----");
    print_month(&planner);
}

async fn seed_demo_tasks(store: &mut TaskStore) {
    let mut planning = TaskDraft::new("Project Planning".to_string(), date(2024, 1, 15));
    planning.description = "Plan the new project requirements".to_string();
    planning.end_date = Some(date(2024, 1, 17));
    planning.priority = Some(Priority::High);
    planning.category = Some(Category::Work);

    let mut meeting = TaskDraft::new("Team Meeting".to_string(), date(2024, 1, 16));
    meeting.description = "Weekly team standup".to_string();
    meeting.time = chrono::NaiveTime::from_hms_opt(10, 30, 0);
    meeting.category = Some(Category::Meeting);

    let mut review = TaskDraft::new("Code Review".to_string(), date(2024, 1, 17));
    review.description = "Review pull requests".to_string();
    review.end_date = Some(date(2024, 1, 19));
    review.time = chrono::NaiveTime::from_hms_opt(14, 0, 0);
    review.priority = Some(Priority::High);
    review.category = Some(Category::Work);

    for draft in vec![planning, meeting, review] {
        store.create_task(draft).await.unwrap();
    }
}

fn print_month<S: TaskSource>(planner: &Planner<S>) {
    let grid = planner.grid();
    println!("{}-{:02}", grid.year(), grid.month());
    for cell in grid.cells() {
        let day = match cell {
            None => continue,
            Some(day) => day,
        };
        let contents = planner.day_cell(day).unwrap();
        if contents.visible.is_empty() {
            continue;
        }
        print!("  {:2}:", day);
        for task in &contents.visible {
            let marker = match task.range().role_on(grid.date_of(day).unwrap()) {
                Some(SegmentRole::Start) => "\u{2192}",
                Some(SegmentRole::Middle) => "\u{22ef}",
                Some(SegmentRole::End) => "\u{2190}",
                _ => " ",
            };
            print!(" [{} {}]", task.title(), marker);
        }
        if contents.hidden > 0 {
            print!(" +{} more", contents.hidden);
        }
        println!();
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
