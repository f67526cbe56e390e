//! The authoritative map of legal status changes, kept as data so the table
//! can be enumerated in tests independent of the dispatch mechanism.

use models::order::OrderStatus;

/// Statuses reachable from `current`. Terminal states map to an empty slice.
pub fn allowed_next(current: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match current {
        Pending => &[Accepted, Rejected],
        Accepted => &[InProgress, Cancelled],
        InProgress => &[Completed, Cancelled],
        Rejected | Completed | Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_next(from).contains(&to)
}

/// A terminal status permits no outbound transition.
pub fn is_terminal(status: OrderStatus) -> bool {
    allowed_next(status).is_empty()
}

/// Window in which the order's client may cancel.
pub fn client_cancellable(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Pending | OrderStatus::Accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;
    use OrderStatus::*;

    #[test]
    fn transition_matrix_is_exact() {
        let allowed: &[(OrderStatus, OrderStatus)] = &[
            (Pending, Accepted),
            (Pending, Rejected),
            (Accepted, InProgress),
            (Accepted, Cancelled),
            (InProgress, Completed),
            (InProgress, Cancelled),
        ];
        for from in OrderStatus::iter() {
            for to in OrderStatus::iter() {
                let expect = allowed.contains(&(from, to));
                assert_eq!(can_transition(from, to), expect, "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for s in [Rejected, Completed, Cancelled] {
            assert!(is_terminal(s));
            assert!(allowed_next(s).is_empty());
        }
        for s in [Pending, Accepted, InProgress] {
            assert!(!is_terminal(s));
        }
    }

    #[test]
    fn cancellation_window_is_pending_or_accepted() {
        for s in OrderStatus::iter() {
            assert_eq!(client_cancellable(s), matches!(s, Pending | Accepted), "{:?}", s);
        }
    }
}
