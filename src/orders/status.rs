//! Order status state machine
//!
//! ```text
//! pending ──> shipped ──> delivered        (terminal)
//!    │           │
//!    │           ├──> returned             (terminal)
//!    ├───────────┼──> cancelled            (terminal)
//!    └───────────┴──> failed               (terminal)
//! ```
//!
//! Every other move is rejected with a state-specific error.

use crate::db::models::OrderStatus;

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::Cancelled
                | OrderStatus::Returned
                | OrderStatus::Failed
        )
    }

    /// Whether the state machine permits `self -> next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Shipped, Cancelled)
                | (Shipped, Returned)
                | (Pending, Failed)
                | (Shipped, Failed)
        )
    }

    /// Why a cancellation from this state is refused, if it is.
    pub fn deny_cancel_reason(self) -> Option<&'static str> {
        match self {
            OrderStatus::Delivered => Some("items already delivered, cannot cancel"),
            OrderStatus::Cancelled => Some("order is already cancelled"),
            OrderStatus::Returned => Some("order has been returned, cannot cancel"),
            OrderStatus::Failed => Some("order has failed, cannot cancel"),
            OrderStatus::Pending | OrderStatus::Shipped => None,
        }
    }

    /// Why a return from this state is refused, if it is.
    pub fn deny_return_reason(self) -> Option<&'static str> {
        match self {
            OrderStatus::Shipped => None,
            OrderStatus::Pending => Some("order has not shipped yet, nothing to return"),
            OrderStatus::Delivered => Some("delivered orders cannot be returned through this flow"),
            OrderStatus::Cancelled => Some("order is already cancelled"),
            OrderStatus::Returned => Some("order has already been returned"),
            OrderStatus::Failed => Some("order has failed, cannot return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 6] = [Pending, Shipped, Delivered, Cancelled, Returned, Failed];

    #[test]
    fn happy_path_transitions() {
        assert!(Pending.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn cancellation_only_from_pending_or_shipped() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));
        for s in [Delivered, Cancelled, Returned, Failed] {
            assert!(!s.can_transition_to(Cancelled), "{s} should not cancel");
            assert!(s.deny_cancel_reason().is_some(), "{s} needs a deny reason");
        }
        assert!(Pending.deny_cancel_reason().is_none());
        assert!(Shipped.deny_cancel_reason().is_none());
    }

    #[test]
    fn delivered_cancel_message_is_specific() {
        assert_eq!(
            Delivered.deny_cancel_reason(),
            Some("items already delivered, cannot cancel")
        );
    }

    #[test]
    fn returns_only_from_shipped() {
        assert!(Shipped.can_transition_to(Returned));
        for s in [Pending, Delivered, Cancelled, Returned, Failed] {
            assert!(!s.can_transition_to(Returned), "{s} should not return");
            assert!(s.deny_return_reason().is_some());
        }
    }

    #[test]
    fn failure_only_from_non_delivered_live_states() {
        assert!(Pending.can_transition_to(Failed));
        assert!(Shipped.can_transition_to(Failed));
        assert!(!Delivered.can_transition_to(Failed));
        assert!(!Cancelled.can_transition_to(Failed));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for s in [Delivered, Cancelled, Returned, Failed] {
            assert!(s.is_terminal());
            for next in ALL {
                assert!(!s.can_transition_to(next), "{s} -> {next} must be rejected");
            }
        }
    }

    #[test]
    fn shipping_a_cancelled_order_is_rejected() {
        assert!(!Cancelled.can_transition_to(Shipped));
        assert!(!Cancelled.can_transition_to(Delivered));
    }
}
