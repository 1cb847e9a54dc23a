use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use issue_tree::events::{dispatch, DispatchOutcome, Propagation, Target, TaskCallbacks};
use issue_tree::presenter;
use issue_tree::renderer::RenderContext;
use issue_tree::store::IssueStore;
use issue_tree::theme::Theme;
use issue_tree::view::{ActionKind, TaskListView};
use issue_tree::Task;

fn fixture() -> IssueStore {
    IssueStore::from_json(include_str!("fixtures/issues.json")).unwrap()
}

#[derive(Default)]
struct Calls(Vec<String>);

impl TaskCallbacks for Calls {
    fn on_edit(&mut self, task: &Task) {
        self.0.push(format!("edit {}", task.id));
    }
    fn on_delete(&mut self, task_id: &str) {
        self.0.push(format!("delete {task_id}"));
    }
    fn on_add_subtask(&mut self, task_id: &str) {
        self.0.push(format!("add {task_id}"));
    }
    fn on_card_click(&mut self, task: &Task) {
        self.0.push(format!("card {}", task.id));
    }
}

#[test]
fn fixture_renders_expected_attributes() {
    let store = fixture();
    let theme = Theme::default();
    let ctx = RenderContext::new(&theme, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
    let view = presenter::render(&store.tasks, &ctx);

    let TaskListView::List { header, cards, .. } = &view else {
        panic!("expected a list");
    };
    // 2 top-level + 2 direct subtasks; the grandchild ISS-4 is not counted.
    assert_eq!(header, "Issues (4)");

    let launch = &cards[0];
    assert_eq!(launch.marker, "T");
    assert_eq!(launch.priority.as_ref().map(|p| p.glyph.as_str()), Some("🔴"));
    assert_eq!(launch.dependency_summary.as_deref(), Some("A (Done), B"));
    assert_eq!(launch.duration.as_deref(), Some("40h"));
    let status = launch.status.as_ref().unwrap();
    assert_eq!(
        (status.colors.background.as_str(), status.colors.foreground.as_str(), status.colors.border.as_str()),
        ("#3b82f620", "#3b82f6", "#3b82f640")
    );
    assert!(launch.due_date.as_ref().unwrap().overdue);

    let copy = &launch.children[0];
    assert_eq!(copy.priority.as_ref(), Some(&theme.priority_default));
    let proofread = &copy.children[0];
    assert_eq!((proofread.depth, proofread.indent, proofread.marker.as_str()), (2, 48, "S"));
    assert!(!proofread.due_date.as_ref().unwrap().overdue);

    let host_status = launch.children[1].status.as_ref().unwrap();
    assert_eq!(host_status.colors.background, theme.neutral_background);

    let retro = &cards[1];
    assert_eq!(retro.id, "7");
    assert_eq!(retro.priority, None);
    assert!(retro.children.is_empty());

    let order: Vec<&str> = view.flatten().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["ISS-1", "ISS-2", "ISS-4", "ISS-3", "7"]);
}

#[test]
fn actions_on_grandchild_reach_only_that_card() {
    let store = fixture();
    let theme = Theme::default();
    let view = presenter::render(&store.tasks, &RenderContext::new(&theme, Utc::now()));
    let (path, card) = view
        .flatten_with_paths()
        .into_iter()
        .find(|(_, c)| c.id == "ISS-4")
        .unwrap();
    assert_eq!(path, vec![0, 0, 0]);
    assert_eq!(card.depth, 2);

    for kind in ActionKind::ALL {
        let mut calls = Calls::default();
        let outcome = dispatch(&store.tasks, &path, Target::Action(kind), &mut calls);
        assert_eq!(outcome, DispatchOutcome::Delivered(Propagation::Stop));
        assert_eq!(calls.0.len(), 1);
        assert!(calls.0[0].ends_with("ISS-4"), "{:?}", calls.0);
    }

    let mut calls = Calls::default();
    dispatch(&store.tasks, &path, Target::Title, &mut calls);
    assert_eq!(calls.0, vec!["edit ISS-4", "card ISS-4", "card ISS-2", "card ISS-1"]);
}

#[test]
fn empty_file_renders_placeholder() {
    let store = IssueStore::from_json("[]").unwrap();
    let theme = Theme::default();
    let view = presenter::render(&store.tasks, &RenderContext::new(&theme, Utc::now()));
    assert!(matches!(view, TaskListView::Empty(ref e) if e.message == "No issues yet"));
    assert!(view.flatten().is_empty());
}
