use super::*;
use slotmap::KeyData;
use std::time::Duration;

fn node(n: u64) -> NodeId {
    NodeId::from(KeyData::from_ffi(n))
}

#[test]
fn test_take_due_splits_by_deadline() {
    let start = Instant::now();
    let mut queue = DeferredQueue::default();
    let early = DeferredTask::ReassertLabel {
        group: node(1),
        label: "a".into(),
    };
    let late = DeferredTask::ReassertLabel {
        group: node(2),
        label: "b".into(),
    };
    queue.schedule(start + Duration::from_millis(50), early.clone());
    queue.schedule(start + Duration::from_millis(500), late.clone());

    assert!(queue.take_due(start).is_empty());
    assert_eq!(queue.take_due(start + Duration::from_millis(60)), vec![early]);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.take_due(start + Duration::from_secs(1)), vec![late]);
    assert!(queue.is_empty());
}

#[test]
fn test_due_tasks_keep_schedule_order() {
    let start = Instant::now();
    let mut queue = DeferredQueue::default();
    for (n, label) in [(1, "first"), (2, "second"), (3, "third")] {
        queue.schedule(
            start,
            DeferredTask::ReassertLabel {
                group: node(n),
                label: label.into(),
            },
        );
    }

    let labels: Vec<String> = queue
        .take_due(start)
        .into_iter()
        .map(|DeferredTask::ReassertLabel { label, .. }| label)
        .collect();
    assert_eq!(labels, ["first", "second", "third"]);
}
