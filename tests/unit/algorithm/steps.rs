//! Tests for solver steps and their double-ended queue

#[cfg(test)]
mod tests {
    use wfc_tiles::algorithm::steps::{StepQueue, WfcStep};

    // Tests step names used when tracing
    // Verified by printing coordinates as (x, y)
    #[test]
    fn test_display() {
        assert_eq!(WfcStep::PickWithMinEntropy.to_string(), "Pick");
        assert_eq!(WfcStep::Collapse { x: 3, y: 1 }.to_string(), "Collapse [3, 1]");
        assert_eq!(
            WfcStep::CalculateEntropy { x: 0, y: 2 }.to_string(),
            "Calculate entropy [0, 2]"
        );
    }

    // Tests front insertion jumps ahead of queued work
    // Verified by routing push_front to the back
    #[test]
    fn test_queue_order() {
        let mut queue = StepQueue::new();
        assert!(queue.is_empty());

        queue.push_back(WfcStep::CalculateEntropy { x: 0, y: 0 });
        queue.push_back(WfcStep::CalculateEntropy { x: 1, y: 0 });
        queue.push_front(WfcStep::Collapse { x: 2, y: 2 });

        assert_eq!(queue.len(), 3);
        assert!(queue.contains(&WfcStep::CalculateEntropy { x: 1, y: 0 }));
        assert!(!queue.contains(&WfcStep::Collapse { x: 1, y: 0 }));
        assert_eq!(
            queue.iter().copied().collect::<Vec<_>>(),
            vec![
                WfcStep::Collapse { x: 2, y: 2 },
                WfcStep::CalculateEntropy { x: 0, y: 0 },
                WfcStep::CalculateEntropy { x: 1, y: 0 },
            ]
        );

        assert_eq!(queue.pop_front(), Some(WfcStep::Collapse { x: 2, y: 2 }));
        assert_eq!(queue.len(), 2);
    }
}
