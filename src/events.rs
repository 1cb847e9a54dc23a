//! Interaction dispatch.
//!
//! Hosts report a click as a path to a card plus the element that was hit.
//! The event is delivered to the target card first and then bubbles out
//! through every ancestor card, unless an action control stops it.

use tracing::debug;

use crate::task::Task;
use crate::view::ActionKind;

/// Caller-supplied notifications. Fire-and-forget: nothing is returned.
pub trait TaskCallbacks {
    fn on_edit(&mut self, task: &Task);
    fn on_delete(&mut self, task_id: &str);
    fn on_add_subtask(&mut self, task_id: &str);

    /// Container click on a card, including clicks bubbling up from nested
    /// cards. Most hosts only use it for hover/selection feedback.
    fn on_card_click(&mut self, _task: &Task) {}
}

/// Adapter turning three closures into `TaskCallbacks`.
pub struct Handlers<E, D, A> {
    pub on_edit: E,
    pub on_delete: D,
    pub on_add_subtask: A,
}

impl<E, D, A> TaskCallbacks for Handlers<E, D, A>
where
    E: FnMut(&Task),
    D: FnMut(&str),
    A: FnMut(&str),
{
    fn on_edit(&mut self, task: &Task) {
        (self.on_edit)(task)
    }

    fn on_delete(&mut self, task_id: &str) {
        (self.on_delete)(task_id)
    }

    fn on_add_subtask(&mut self, task_id: &str) {
        (self.on_add_subtask)(task_id)
    }
}

/// Element of a card that received the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Title,
    Body,
    Action(ActionKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered(Propagation),
    /// The path did not name a card; nothing was invoked.
    Unresolved,
}

/// Resolve a path of child indices to the chain of issues from the top-level
/// issue down to the target.
pub fn resolve<'a>(tasks: &'a [Task], path: &[usize]) -> Option<Vec<&'a Task>> {
    let (&first, rest) = path.split_first()?;
    let mut chain = vec![tasks.get(first)?];
    for &idx in rest {
        let parent: &'a Task = *chain.last()?;
        chain.push(parent.subtasks().get(idx)?);
    }
    Some(chain)
}

/// Deliver a click on `target` of the card at `path`.
pub fn dispatch<C: TaskCallbacks + ?Sized>(
    tasks: &[Task],
    path: &[usize],
    target: Target,
    callbacks: &mut C,
) -> DispatchOutcome {
    let Some(chain) = resolve(tasks, path) else {
        debug!(?path, "click on unknown card ignored");
        return DispatchOutcome::Unresolved;
    };
    let Some(&task) = chain.last() else {
        return DispatchOutcome::Unresolved;
    };

    let propagation = match target {
        Target::Title => {
            callbacks.on_edit(task);
            Propagation::Continue
        }
        Target::Body => Propagation::Continue,
        Target::Action(kind) => {
            match kind {
                ActionKind::AddSubtask => callbacks.on_add_subtask(&task.id),
                ActionKind::Edit => callbacks.on_edit(task),
                ActionKind::Delete => callbacks.on_delete(&task.id),
            }
            Propagation::Stop
        }
    };

    if propagation == Propagation::Continue {
        for card in chain.iter().rev() {
            callbacks.on_card_click(card);
        }
    }
    debug!(id = %task.id, ?target, ?propagation, "click dispatched");
    DispatchOutcome::Delivered(propagation)
}
